use crate::models::{CalendarGrid, DAYS_PER_WEEK, DateCountMap, DayCell, WEEKS};
use chrono::{Datelike, Duration, NaiveDate};

/// Colour bucket for a day's count. The thresholds are fixed.
pub fn intensity(count: u64) -> u8 {
    match count {
        0 => 0,
        1 => 1,
        2..=3 => 2,
        4..=5 => 3,
        _ => 4,
    }
}

/// Lays out 53 Sunday-first weeks starting on the Sunday on or before
/// January 1 of `reference`'s year.
pub fn build_calendar(counts: &DateCountMap, reference: NaiveDate) -> CalendarGrid {
    let start = calendar_start(reference);

    let weeks = (0..WEEKS)
        .map(|week| {
            std::array::from_fn(|day| {
                let offset = (week * DAYS_PER_WEEK + day) as i64;
                day_cell(start + Duration::days(offset), counts, reference)
            })
        })
        .collect();

    CalendarGrid { weeks }
}

pub fn calendar_start(reference: NaiveDate) -> NaiveDate {
    let year_start = reference - Duration::days(reference.ordinal0() as i64);
    year_start - Duration::days(year_start.weekday().num_days_from_sunday() as i64)
}

fn day_cell(date: NaiveDate, counts: &DateCountMap, reference: NaiveDate) -> DayCell {
    let count = counts.get(&date).copied().unwrap_or(0);
    DayCell {
        date,
        count,
        intensity: intensity(count),
        month: date.format("%b").to_string(),
        day: date.day().to_string(),
        is_current_month: date.year() == reference.year() && date.month() == reference.month(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn intensity_matches_bucket_table() {
        let expected = [(0, 0), (1, 1), (2, 2), (3, 2), (4, 3), (5, 3), (6, 4), (40, 4)];
        for (count, bucket) in expected {
            assert_eq!(intensity(count), bucket, "count {count}");
        }
        assert_eq!(intensity(u64::MAX), 4);
    }

    #[test]
    fn intensity_is_monotonic() {
        for count in 0..50 {
            assert!(intensity(count) <= intensity(count + 1));
        }
    }

    #[test]
    fn grid_has_fixed_shape_and_starts_on_sunday() {
        for reference in [date(2023, 3, 1), date(2024, 6, 15), date(2027, 12, 31), date(2028, 1, 1)] {
            let grid = build_calendar(&DateCountMap::new(), reference);
            assert_eq!(grid.weeks.len(), 53);
            assert_eq!(grid.days().count(), 371);

            let first = &grid.weeks[0][0];
            assert_eq!(first.date.weekday(), Weekday::Sun);
            let jan_first = date(reference.year(), 1, 1);
            assert!(first.date <= jan_first);
            assert!(jan_first - first.date < Duration::days(7));
        }
    }

    #[test]
    fn consecutive_cells_are_one_day_apart() {
        let grid = build_calendar(&DateCountMap::new(), date(2024, 6, 15));
        let dates: Vec<NaiveDate> = grid.days().map(|cell| cell.date).collect();
        for pair in dates.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
    }

    #[test]
    fn sunday_new_year_needs_no_padding() {
        // 2023-01-01 was a Sunday.
        assert_eq!(calendar_start(date(2023, 8, 9)), date(2023, 1, 1));
        // 2024-01-01 was a Monday.
        assert_eq!(calendar_start(date(2024, 6, 15)), date(2023, 12, 31));
    }

    #[test]
    fn counts_land_on_their_cells() {
        let mut counts = DateCountMap::new();
        counts.insert(date(2024, 1, 1), 1);
        counts.insert(date(2024, 1, 2), 3);

        let grid = build_calendar(&counts, date(2024, 6, 15));

        let first = grid.cell(date(2024, 1, 1)).unwrap();
        assert_eq!((first.count, first.intensity), (1, 1));
        let second = grid.cell(date(2024, 1, 2)).unwrap();
        assert_eq!((second.count, second.intensity), (3, 2));

        let others = grid
            .days()
            .filter(|cell| cell.date != date(2024, 1, 1) && cell.date != date(2024, 1, 2));
        for cell in others {
            assert_eq!((cell.count, cell.intensity), (0, 0));
        }
    }

    #[test]
    fn out_of_range_counts_are_ignored() {
        let mut counts = DateCountMap::new();
        counts.insert(date(2019, 5, 5), 9);
        let grid = build_calendar(&counts, date(2024, 6, 15));
        assert!(grid.days().all(|cell| cell.count == 0));
    }

    #[test]
    fn labels_and_current_month() {
        let grid = build_calendar(&DateCountMap::new(), date(2024, 6, 15));

        let cell = grid.cell(date(2024, 6, 3)).unwrap();
        assert_eq!(cell.month, "Jun");
        assert_eq!(cell.day, "3");
        assert!(cell.is_current_month);

        let padding = &grid.weeks[0][0];
        assert_eq!(padding.month, "Dec");
        assert_eq!(padding.day, "31");
        assert!(!padding.is_current_month);

        assert_eq!(grid.days().filter(|cell| cell.is_current_month).count(), 30);
    }

    #[test]
    fn leap_year_starting_saturday_ends_before_new_years_eve() {
        // 2028-01-01 is a Saturday, so 371 cells stop at 2028-12-30.
        let reference = date(2028, 12, 31);
        let mut counts = DateCountMap::new();
        counts.insert(reference, 3);

        let grid = build_calendar(&counts, reference);
        assert_eq!(grid.days().next_back().unwrap().date, date(2028, 12, 30));
        assert!(grid.cell(reference).is_none());
        assert!(grid.days().all(|cell| cell.count == 0));
    }

    #[test]
    fn building_twice_is_identical() {
        let mut counts = DateCountMap::new();
        counts.insert(date(2024, 3, 10), 4);
        let reference = date(2024, 3, 12);
        assert_eq!(build_calendar(&counts, reference), build_calendar(&counts, reference));
    }

    #[test]
    fn serializes_to_wire_shape() {
        let grid = build_calendar(&DateCountMap::new(), date(2024, 6, 15));
        let value = serde_json::to_value(&grid).unwrap();
        let weeks = value.as_array().unwrap();
        assert_eq!(weeks.len(), 53);
        assert_eq!(weeks[0].as_array().unwrap().len(), 7);
        assert_eq!(
            weeks[0][1],
            serde_json::json!({
                "date": "2024-01-01",
                "count": 0,
                "intensity": 0,
                "month": "Jan",
                "day": "1",
                "isCurrentMonth": false,
            })
        );
    }
}
