use chrono::{Days, NaiveDate};
use clap::Args;
use habitkit_core::{bucketize, Granularity};

use super::{find_habit, print_json, today, CmdResult, Context};

#[derive(Args)]
pub struct BucketsArgs {
    /// Habit ID
    habit_id: String,
    /// day, week or month (default: report.granularity)
    #[arg(long)]
    granularity: Option<Granularity>,
    /// Window start, YYYY-MM-DD (default: report.window_weeks before --to)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Window end, YYYY-MM-DD (default: today)
    #[arg(long)]
    to: Option<NaiveDate>,
}

pub fn run(ctx: &Context, args: BucketsArgs) -> CmdResult {
    let snapshot = ctx.load_snapshot()?;
    let habit = find_habit(&snapshot, &args.habit_id)?;

    let granularity = args.granularity.unwrap_or(ctx.config.report.granularity);
    let to = args.to.unwrap_or_else(today);
    let from = match args.from {
        Some(from) => from,
        None => {
            let span = u64::from(ctx.config.report.window_weeks.max(1)) * 7 - 1;
            to.checked_sub_days(Days::new(span)).unwrap_or(NaiveDate::MIN)
        }
    };

    let history = snapshot.checkins_by_habit().remove(habit.id()).unwrap_or_default();
    let buckets = bucketize(habit, &history, granularity, from, to);
    print_json(&buckets)
}
