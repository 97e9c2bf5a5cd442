//! Achievement progress signals.
//!
//! The engine never unlocks achievements itself. Callers compare the stats
//! they previously published with freshly computed ones and forward the
//! resulting signals to whatever implements [`AchievementSink`]. Threshold
//! logic lives on the other side of that trait.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::habit::{Habit, HabitId};
use crate::stats::HabitStats;

/// Progress update for the achievement service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AchievementSignal {
    /// The habit's current streak changed
    Streak { habit_id: HabitId, streak_value: u32 },
    /// Completions in a habit category changed
    Category { category: String, duration_value: u32 },
}

/// Receiver of achievement signals.
pub trait AchievementSink {
    fn record(&mut self, signal: AchievementSignal);
}

impl AchievementSink for Vec<AchievementSignal> {
    fn record(&mut self, signal: AchievementSignal) {
        self.push(signal);
    }
}

/// Signals implied by moving from `previous` to `current` stats.
///
/// With no previous stats every non-zero value is reported.
pub fn signals_for(
    habit: &Habit,
    previous: Option<&HabitStats>,
    current: &HabitStats,
) -> Vec<AchievementSignal> {
    let mut signals = Vec::new();

    let streak_changed = previous.map_or(current.current_streak > 0, |prev| {
        prev.current_streak != current.current_streak
    });
    if streak_changed {
        signals.push(AchievementSignal::Streak {
            habit_id: habit.id().clone(),
            streak_value: current.current_streak,
        });
    }

    if let Some(category) = habit.category() {
        let completions_changed = previous.map_or(current.total_completions > 0, |prev| {
            prev.total_completions != current.total_completions
        });
        if completions_changed {
            signals.push(AchievementSignal::Category {
                category: category.to_string(),
                duration_value: current.total_completions,
            });
        }
    }

    signals
}

/// Compute signals and hand them to `sink`. Returns how many were sent.
pub fn publish(
    sink: &mut dyn AchievementSink,
    habit: &Habit,
    previous: Option<&HabitStats>,
    current: &HabitStats,
) -> usize {
    let signals = signals_for(habit, previous, current);
    let sent = signals.len();
    for signal in signals {
        sink.record(signal);
    }
    if sent > 0 {
        debug!(habit_id = %habit.id(), sent, "published achievement signals");
    }
    sent
}
