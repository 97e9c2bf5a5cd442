use clap::Args;
use habitkit_core::stats::time_of_day;

use super::{find_habit, print_json, CmdResult, Context};

#[derive(Args)]
pub struct ProfileArgs {
    /// Habit ID (default: all habits)
    habit_id: Option<String>,
}

pub fn run(ctx: &Context, args: ProfileArgs) -> CmdResult {
    let snapshot = ctx.load_snapshot()?;
    let checkins = match &args.habit_id {
        Some(id) => {
            let habit = find_habit(&snapshot, id)?;
            snapshot.checkins_by_habit().remove(habit.id()).unwrap_or_default()
        }
        None => snapshot.checkins.clone(),
    };
    print_json(&time_of_day::profile(&checkins))
}
