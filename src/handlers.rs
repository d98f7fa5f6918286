use crate::aggregate::{completion_counts, outstanding_counts, parse_entries};
use crate::calendar::build_calendar;
use crate::demo::sample_records;
use crate::errors::AppError;
use crate::models::{CalendarResponse, TaskRecord};
use crate::notion::is_valid_database_id;
use crate::state::AppState;
use crate::stats::compute_stats;
use crate::ui::{render_database, render_index, render_not_found};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::{error, info};

const EXAMPLE_ID: &str = "example-database-id";

#[derive(Debug, Deserialize)]
pub struct OpenQuery {
    pub id: String,
}

pub async fn index() -> Html<String> {
    Html(render_index(None))
}

pub async fn open(Query(query): Query<OpenQuery>) -> Response {
    let id = query.id.trim();
    if !is_valid_database_id(id) {
        let page = render_index(Some("Database IDs are 32 letters and digits."));
        return (StatusCode::BAD_REQUEST, Html(page)).into_response();
    }
    Redirect::to(&format!("/{id}")).into_response()
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn example() -> Html<String> {
    let today = today();
    let records = sample_records(today);
    let response = calendar_response(EXAMPLE_ID, "Example Database", &records, 0, today);
    Html(render_database(&response, false))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Path(database_id): Path<String>,
) -> Result<Json<CalendarResponse>, AppError> {
    if !is_valid_database_id(&database_id) {
        return Err(AppError::bad_request("Invalid database ID format"));
    }
    Ok(Json(load_calendar(&state, &database_id).await?))
}

pub async fn database_page(State(state): State<AppState>, Path(database_id): Path<String>) -> Response {
    if !is_valid_database_id(&database_id) {
        return (StatusCode::NOT_FOUND, Html(render_not_found())).into_response();
    }

    match load_calendar(&state, &database_id).await {
        Ok(response) => Html(render_database(&response, true)).into_response(),
        Err(err) => {
            error!(database = %database_id, "failed to load calendar: {}", err.message);
            (StatusCode::NOT_FOUND, Html(render_not_found())).into_response()
        }
    }
}

async fn load_calendar(state: &AppState, database_id: &str) -> Result<CalendarResponse, AppError> {
    let (info, pages) = tokio::try_join!(
        state.notion.retrieve_database(database_id),
        state.notion.query_database(database_id),
    )?;

    let parsed = parse_entries(&pages, &state.properties);
    info!(
        database = database_id,
        records = parsed.records.len(),
        skipped = parsed.skipped,
        "building calendar"
    );

    Ok(calendar_response(
        database_id,
        &info.title,
        &parsed.records,
        parsed.skipped,
        today(),
    ))
}

/// Both series and their stats for one record set, anchored on `today`.
pub fn calendar_response(
    database_id: &str,
    title: &str,
    records: &[TaskRecord],
    skipped: usize,
    today: NaiveDate,
) -> CalendarResponse {
    let completion_data = build_calendar(&completion_counts(records), today);
    let todo_data = build_calendar(&outstanding_counts(records), today);

    CalendarResponse {
        database_id: database_id.to_string(),
        database_title: title.to_string(),
        stats: compute_stats(&completion_data, today),
        todo_stats: compute_stats(&todo_data, today),
        completion_data,
        todo_data,
        skipped_records: skipped,
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;

    #[test]
    fn response_splits_done_and_outstanding() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        let records = vec![
            TaskRecord { status: TaskStatus::Done, date: today },
            TaskRecord { status: TaskStatus::Done, date: yesterday },
            TaskRecord { status: TaskStatus::Pending, date: today },
        ];

        let response = calendar_response("abc", "Tasks", &records, 3, today);
        assert_eq!(response.stats.total_contributions, 2);
        assert_eq!(response.stats.current_streak, 2);
        assert_eq!(response.todo_stats.total_contributions, 1);
        assert_eq!(response.completion_data.cell(today).unwrap().count, 1);
        assert_eq!(response.todo_data.cell(yesterday).unwrap().count, 0);
        assert_eq!(response.skipped_records, 3);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["databaseTitle"], "Tasks");
        assert_eq!(value["completionData"].as_array().unwrap().len(), 53);
    }
}
