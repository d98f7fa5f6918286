use crate::models::{BestDay, CalendarGrid, ContributionStats};
use chrono::NaiveDate;

/// Totals and streaks over the grid in cell order. Days after `today` are
/// ignored by the current streak only.
pub fn compute_stats(grid: &CalendarGrid, today: NaiveDate) -> ContributionStats {
    let mut total_contributions = 0u64;
    let mut best_day: Option<BestDay> = None;

    for cell in grid.days().filter(|cell| cell.count > 0) {
        total_contributions = total_contributions.saturating_add(cell.count);
        if best_day.as_ref().is_none_or(|best| cell.count > best.count) {
            best_day = Some(BestDay {
                date: cell.date,
                count: cell.count,
            });
        }
    }

    let mut current_streak = 0u32;
    for cell in grid.days().rev().filter(|cell| cell.date <= today) {
        if cell.count == 0 {
            break;
        }
        current_streak = current_streak.saturating_add(1);
    }

    let mut longest_streak = 0u32;
    let mut run = 0u32;
    for cell in grid.days() {
        if cell.count > 0 {
            run = run.saturating_add(1);
            longest_streak = longest_streak.max(run);
        } else {
            run = 0;
        }
    }

    ContributionStats {
        total_contributions,
        current_streak,
        longest_streak,
        best_day,
    }
}
