use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-date event tally fed into the calendar builder.
pub type DateCountMap = BTreeMap<NaiveDate, u64>;

pub const WEEKS: usize = 53;
pub const DAYS_PER_WEEK: usize = 7;

/// Sunday-first row of the calendar.
pub type Week = [DayCell; DAYS_PER_WEEK];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: NaiveDate,
    pub count: u64,
    pub intensity: u8,
    pub month: String,
    pub day: String,
    pub is_current_month: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarGrid {
    pub weeks: Vec<Week>,
}

impl CalendarGrid {
    /// Cells in grid order: week ascending, then Sunday..Saturday.
    pub fn days(&self) -> impl DoubleEndedIterator<Item = &DayCell> {
        self.weeks.iter().flat_map(|week| week.iter())
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.days().find(|cell| cell.date == date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestDay {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionStats {
    pub total_contributions: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub best_day: Option<BestDay>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Done,
    Pending,
}

impl TaskStatus {
    pub fn is_done(self) -> bool {
        matches!(self, TaskStatus::Done)
    }
}

/// A tracker entry reduced to what the calendar needs. `date` is the
/// completion date for finished tasks and the due date otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub status: TaskStatus,
    pub date: NaiveDate,
}

/// Raw page object as returned by a database query.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionPage {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub properties: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct DatabaseInfo {
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResponse {
    pub database_id: String,
    pub database_title: String,
    pub stats: ContributionStats,
    pub todo_stats: ContributionStats,
    pub completion_data: CalendarGrid,
    pub todo_data: CalendarGrid,
    pub skipped_records: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
