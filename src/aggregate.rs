use crate::config::PropertyNames;
use crate::errors::RecordError;
use crate::models::{DateCountMap, NotionPage, TaskRecord, TaskStatus};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Tallies one event per selected record under the date `date_of` returns.
pub fn aggregate<R, S, D>(records: &[R], select: S, date_of: D) -> DateCountMap
where
    S: Fn(&R) -> bool,
    D: Fn(&R) -> NaiveDate,
{
    let mut counts = DateCountMap::new();
    for record in records {
        if !select(record) {
            continue;
        }
        let entry = counts.entry(date_of(record)).or_insert(0);
        *entry = entry.saturating_add(1);
    }
    counts
}

pub fn completion_counts(records: &[TaskRecord]) -> DateCountMap {
    aggregate(records, |record| record.status.is_done(), |record| record.date)
}

pub fn outstanding_counts(records: &[TaskRecord]) -> DateCountMap {
    aggregate(records, |record| !record.status.is_done(), |record| record.date)
}

#[derive(Debug, Default)]
pub struct ParsedRecords {
    pub records: Vec<TaskRecord>,
    pub skipped: usize,
}

pub fn parse_entries(pages: &[NotionPage], names: &PropertyNames) -> ParsedRecords {
    let mut parsed = ParsedRecords::default();
    for page in pages {
        match parse_entry(page, names) {
            Ok(record) => parsed.records.push(record),
            Err(err) => {
                warn!(page = %page.id, "skipping entry: {err}");
                parsed.skipped += 1;
            }
        }
    }
    parsed
}

#[derive(Deserialize)]
struct StatusProperty {
    status: Option<SelectOption>,
}

#[derive(Deserialize)]
struct SelectOption {
    name: String,
}

#[derive(Deserialize)]
struct DateProperty {
    date: Option<DateValue>,
}

#[derive(Deserialize)]
struct DateValue {
    start: Option<String>,
}

pub fn parse_entry(page: &NotionPage, names: &PropertyNames) -> Result<TaskRecord, RecordError> {
    let status: StatusProperty = property(page, &names.status)?;
    let status_name = status
        .status
        .map(|option| option.name)
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| RecordError::MissingStatus(names.status.clone()))?;

    let (status, date_property) = if status_name == names.done_status {
        (TaskStatus::Done, &names.complete)
    } else {
        (TaskStatus::Pending, &names.due)
    };

    let date: DateProperty = property(page, date_property)?;
    let raw = date
        .date
        .and_then(|value| value.start)
        .ok_or_else(|| RecordError::MissingDate(date_property.clone()))?;

    let date = parse_date(&raw).ok_or_else(|| RecordError::InvalidDate {
        property: date_property.clone(),
        value: raw.clone(),
    })?;

    Ok(TaskRecord { status, date })
}

fn property<T: DeserializeOwned>(page: &NotionPage, name: &str) -> Result<T, RecordError> {
    let value = page
        .properties
        .get(name)
        .ok_or_else(|| RecordError::MissingProperty(name.to_string()))?;
    T::deserialize(value).map_err(|_| RecordError::MalformedProperty {
        property: name.to_string(),
    })
}

/// Accepts a plain `YYYY-MM-DD` or an RFC 3339 timestamp, keeping the
/// calendar date as written in its own offset.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
