use chrono::{Days, NaiveDate};
use clap::Args;
use habitkit_core::next_due_on_or_after;
use habitkit_core::recurrence::due_dates;

use super::{find_habit, print_json, today, CmdResult, Context};

#[derive(Args)]
pub struct DueArgs {
    /// Habit ID
    habit_id: String,
    /// Range start, YYYY-MM-DD (default: today)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Range end, YYYY-MM-DD (default: 30 days after --from)
    #[arg(long)]
    to: Option<NaiveDate>,
    /// Print only the next due date on or after --from
    #[arg(long)]
    next: bool,
}

pub fn run(ctx: &Context, args: DueArgs) -> CmdResult {
    let snapshot = ctx.load_snapshot()?;
    let habit = find_habit(&snapshot, &args.habit_id)?;
    let from = args.from.unwrap_or_else(today);

    if args.next {
        return print_json(&next_due_on_or_after(habit, from));
    }

    let to = match args.to {
        Some(to) => to,
        None => from.checked_add_days(Days::new(30)).unwrap_or(NaiveDate::MAX),
    };
    let dates: Vec<NaiveDate> = due_dates(habit, from, to).collect();
    print_json(&dates)
}
