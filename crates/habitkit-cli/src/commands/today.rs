use chrono::NaiveDate;
use clap::Args;
use habitkit_core::agenda;

use super::{print_json, today, CmdResult, Context};

#[derive(Args)]
pub struct TodayArgs {
    /// Date to list, YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Only habits not yet completed
    #[arg(long)]
    pending: bool,
}

pub fn run(ctx: &Context, args: TodayArgs) -> CmdResult {
    let snapshot = ctx.load_snapshot()?;
    let date = args.date.unwrap_or_else(today);

    let mut items = agenda(&ctx.config.engine(), &snapshot.habits, &snapshot.checkins_by_habit(), date);
    if args.pending {
        items.retain(|item| !item.completed);
    }
    print_json(&items)
}
