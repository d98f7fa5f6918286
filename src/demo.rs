use crate::models::{TaskRecord, TaskStatus};
use chrono::{Datelike, Duration, NaiveDate};

const DONE_PATTERN: [usize; 11] = [0, 1, 2, 0, 3, 1, 0, 5, 2, 1, 7];

/// Deterministic sample tasks for the example page: completions on past
/// days of the year and a sprinkling of open tasks due later on.
pub fn sample_records(today: NaiveDate) -> Vec<TaskRecord> {
    let year_start = today - Duration::days(today.ordinal0() as i64);
    let mut records = Vec::new();

    let mut date = year_start;
    while date.year() == today.year() {
        let ordinal = date.ordinal() as usize;
        if date <= today {
            let done = DONE_PATTERN[(ordinal * 7) % DONE_PATTERN.len()];
            records.extend((0..done).map(|_| TaskRecord {
                status: TaskStatus::Done,
                date,
            }));
        }
        if date >= today && ordinal % 4 == 0 {
            records.push(TaskRecord {
                status: TaskStatus::Pending,
                date,
            });
        }
        date += Duration::days(1);
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{completion_counts, outstanding_counts};

    #[test]
    fn samples_stay_within_the_year() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let records = sample_records(today);
        assert!(!records.is_empty());
        assert!(records.iter().all(|record| record.date.year() == 2024));

        let done = completion_counts(&records);
        assert!(done.keys().all(|date| *date <= today));
        let pending = outstanding_counts(&records);
        assert!(pending.keys().all(|date| *date >= today));
    }

    #[test]
    fn samples_are_reproducible() {
        let today = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        assert_eq!(sample_records(today), sample_records(today));
    }
}
