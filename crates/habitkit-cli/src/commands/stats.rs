use chrono::NaiveDate;
use clap::Args;
use habitkit_core::achievements::{self, AchievementSignal};
use habitkit_core::{compute_all_parallel, HabitId, HabitStats, RangeStatus};
use habitkit_core::stats::DataAnomaly;
use serde::Serialize;

use super::{find_habit, print_json, today, CmdResult, Context};

#[derive(Args)]
pub struct StatsArgs {
    /// Reference date, YYYY-MM-DD (default: today)
    #[arg(long)]
    as_of: Option<NaiveDate>,
    /// Only this habit
    #[arg(long)]
    habit: Option<String>,
    /// Include range status and data anomalies
    #[arg(long)]
    report: bool,
    /// Include achievement progress signals
    #[arg(long)]
    signals: bool,
}

#[derive(Serialize)]
struct StatsRow<'a> {
    habit_id: &'a HabitId,
    name: &'a str,
    is_archived: bool,
    #[serde(flatten)]
    stats: HabitStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<RangeStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    anomalies: Option<Vec<DataAnomaly>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    signals: Option<Vec<AchievementSignal>>,
}

pub fn run(ctx: &Context, args: StatsArgs) -> CmdResult {
    let snapshot = ctx.load_snapshot()?;
    let as_of = args.as_of.unwrap_or_else(today);
    let engine = ctx.config.engine();

    let habits = match &args.habit {
        Some(id) => vec![find_habit(&snapshot, id)?.clone()],
        None => snapshot.habits.clone(),
    };
    let by_habit = snapshot.checkins_by_habit();

    let rows: Vec<StatsRow> = if args.report {
        habits
            .iter()
            .map(|habit| {
                let history = by_habit.get(habit.id()).map(Vec::as_slice).unwrap_or(&[]);
                let report = engine.compute_report(habit, history, as_of);
                StatsRow {
                    habit_id: habit.id(),
                    name: habit.name(),
                    is_archived: habit.is_archived(),
                    stats: report.stats,
                    status: Some(report.status),
                    anomalies: Some(report.anomalies),
                    signals: None,
                }
            })
            .collect()
    } else {
        let all = compute_all_parallel(&engine, &habits, &by_habit, as_of, ctx.config.workers());
        habits
            .iter()
            .zip(all)
            .map(|(habit, stats)| StatsRow {
                habit_id: habit.id(),
                name: habit.name(),
                is_archived: habit.is_archived(),
                stats,
                status: None,
                anomalies: None,
                signals: None,
            })
            .collect()
    };

    let rows = if args.signals {
        rows.into_iter()
            .zip(&habits)
            .map(|(mut row, habit)| {
                row.signals = Some(achievements::signals_for(habit, None, &row.stats));
                row
            })
            .collect()
    } else {
        rows
    };

    print_json(&rows)
}
