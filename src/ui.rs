use crate::models::{CalendarGrid, CalendarResponse, ContributionStats};
use std::fmt::Write;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Completion,
    Outstanding,
}

impl Palette {
    fn color(self, intensity: u8) -> &'static str {
        let colors = match self {
            Palette::Completion => ["#f5f9ff", "#dbeafe", "#93c5fd", "#3b82f6", "#1d4ed8"],
            Palette::Outstanding => ["#fff5f5", "#fed7d7", "#fc8181", "#e53e3e", "#9b2c2c"],
        };
        colors.get(intensity as usize).copied().unwrap_or(colors[0])
    }

    fn border(self) -> &'static str {
        match self {
            Palette::Completion => "rgba(0, 0, 255, 0.2)",
            Palette::Outstanding => "rgba(255, 128, 128, 0.2)",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Palette::Completion => "completion",
            Palette::Outstanding => "open task",
        }
    }
}

pub fn render_index(error: Option<&str>) -> String {
    let error = error
        .map(|message| format!(r#"<p class="error">{}</p>"#, escape_html(message)))
        .unwrap_or_default();
    page("Task Calendar", &INDEX_BODY.replace("{{ERROR}}", &error))
}

pub fn render_not_found() -> String {
    page("Not found", NOT_FOUND_BODY)
}

/// Full page for one database: stat cards, then the completion and
/// outstanding calendars. `show_id` adds the database id footer.
pub fn render_database(response: &CalendarResponse, show_id: bool) -> String {
    let footer = if show_id {
        format!(
            r#"<p class="database-id">Database ID: {}</p>"#,
            escape_html(&response.database_id)
        )
    } else {
        String::new()
    };

    let body = DATABASE_BODY
        .replace("{{TITLE}}", &escape_html(&response.database_title))
        .replace("{{STATS}}", &render_stats(&response.stats))
        .replace("{{COMPLETION}}", &render_calendar(&response.completion_data, Palette::Completion))
        .replace("{{TODO}}", &render_calendar(&response.todo_data, Palette::Outstanding))
        .replace("{{SKIPPED}}", &render_skipped(response.skipped_records))
        .replace("{{FOOTER}}", &footer);
    page(&response.database_title, &body)
}

fn render_stats(stats: &ContributionStats) -> String {
    let mut html = String::new();
    let mut card = |value: String, label: String| {
        let _ = write!(
            html,
            r#"<div class="stat"><span class="value">{value}</span><span class="label">{label}</span></div>"#
        );
    };

    card(stats.total_contributions.to_string(), "Total Completions".into());
    card(stats.current_streak.to_string(), "Current Streak".into());
    card(stats.longest_streak.to_string(), "Longest Streak".into());
    if let Some(best) = &stats.best_day {
        card(
            best.count.to_string(),
            format!("Best Day: {}", best.date.format("%b %-d, %Y")),
        );
    }
    html
}

fn render_skipped(skipped: usize) -> String {
    match skipped {
        0 => String::new(),
        1 => r#"<p class="hint">1 entry was skipped because its status or date could not be read.</p>"#.into(),
        n => format!(r#"<p class="hint">{n} entries were skipped because their status or date could not be read.</p>"#),
    }
}

/// Week index at which each month label sits: the first week holding
/// one of that month's first seven days.
pub fn month_label_positions(grid: &CalendarGrid) -> [usize; 12] {
    MONTHS.map(|month| {
        grid.weeks
            .iter()
            .position(|week| {
                week.iter()
                    .any(|cell| cell.month == month && cell.day.parse::<u32>().is_ok_and(|d| d <= 7))
            })
            .unwrap_or(0)
    })
}

pub fn render_calendar(grid: &CalendarGrid, palette: Palette) -> String {
    let mut html = String::from(r#"<div class="calendar"><div class="month-labels">"#);

    let current_month = grid
        .days()
        .find(|cell| cell.is_current_month)
        .map(|cell| cell.month.as_str());
    for (month, week) in MONTHS.iter().zip(month_label_positions(grid)) {
        let opacity = if Some(*month) == current_month { "1" } else { "0.6" };
        let _ = write!(
            html,
            r#"<div class="month-label" style="grid-column-start: {}; opacity: {opacity}">{month}</div>"#,
            week + 1
        );
    }

    html.push_str(
        r#"</div><div class="calendar-grid"><div class="day-labels"><div>Mon</div><div>Wed</div><div>Fri</div></div><div class="weeks">"#,
    );

    for week in &grid.weeks {
        html.push_str(r#"<div class="week">"#);
        for cell in week {
            let border = if cell.is_current_month { palette.border() } else { "transparent" };
            let plural = if cell.count == 1 { "" } else { "s" };
            let _ = write!(
                html,
                r#"<div class="day" style="background-color: {}; border: 1px solid {border}" title="{}: {} {}{plural}"></div>"#,
                palette.color(cell.intensity),
                cell.date,
                cell.count,
                palette.noun(),
            );
        }
        html.push_str("</div>");
    }

    html.push_str(r#"</div></div><div class="legend"><span>Less</span>"#);
    for level in 0..=4 {
        let _ = write!(
            html,
            r#"<div class="day" style="background-color: {}"></div>"#,
            palette.color(level)
        );
    }
    html.push_str("<span>More</span></div></div>");
    html
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn page(title: &str, body: &str) -> String {
    LAYOUT_HTML
        .replace("{{PAGE_TITLE}}", &escape_html(title))
        .replace("{{BODY}}", body)
}

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{PAGE_TITLE}}</title>
  <style>
    :root {
      --ink: #2b2a28;
      --muted: #6b645d;
      --card: #ffffff;
      --accent: #1d4ed8;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: #f7f8fa;
      color: var(--ink);
      font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(900px, 100%);
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      font-size: 1.8rem;
    }

    .subtitle,
    .hint,
    .database-id {
      margin: 0;
      color: var(--muted);
    }

    .error {
      color: #c63b2b;
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      background: var(--card);
      border-radius: 12px;
      padding: 16px;
      border: 1px solid #eaeaea;
      display: grid;
      gap: 6px;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent);
    }

    .stat .label {
      font-size: 0.85rem;
      color: var(--muted);
    }

    .calendar {
      background: var(--card);
      border-radius: 12px;
      border: 1px solid #eaeaea;
      padding: 16px;
      overflow-x: auto;
    }

    .month-labels {
      width: 742px;
      display: grid;
      grid-template-columns: repeat(53, 1fr);
      font-size: 12px;
      color: var(--muted);
      margin: 0 0 5px 30px;
    }

    .month-label {
      grid-column-end: span 4;
    }

    .calendar-grid {
      display: flex;
    }

    .day-labels {
      display: flex;
      flex-direction: column;
      justify-content: space-between;
      padding: 10px 5px 10px 0;
      color: var(--muted);
      opacity: 0.6;
      font-size: 12px;
      height: 120px;
    }

    .weeks {
      display: flex;
    }

    .week {
      display: flex;
      flex-direction: column;
      width: 11px;
      margin-right: 3px;
    }

    .day {
      height: 11px;
      width: 11px;
      margin: 2px 0;
      border-radius: 2px;
    }

    .legend {
      display: flex;
      align-items: center;
      justify-content: flex-end;
      gap: 3px;
      font-size: 12px;
      color: var(--muted);
      margin-top: 8px;
    }

    form {
      display: flex;
      gap: 12px;
      flex-wrap: wrap;
    }

    input {
      flex: 1;
      min-width: 260px;
      padding: 12px 14px;
      border-radius: 8px;
      border: 1px solid #d0d4da;
      font-size: 1rem;
    }

    button {
      border: none;
      border-radius: 8px;
      padding: 12px 18px;
      font-size: 1rem;
      font-weight: 600;
      background: var(--accent);
      color: white;
      cursor: pointer;
    }
  </style>
</head>
<body>
  <main class="app">
{{BODY}}
  </main>
</body>
</html>
"#;

const INDEX_BODY: &str = r#"    <header>
      <h1>Task Calendar</h1>
      <p class="subtitle">A contribution calendar for the tasks in a Notion database.</p>
    </header>
    <form method="get" action="/open">
      <input name="id" placeholder="Notion database ID (32 characters)" autocomplete="off" />
      <button type="submit">Open</button>
    </form>
    {{ERROR}}
    <p class="hint">Share the database with your integration first, or <a href="/example">see an example</a>.</p>"#;

const NOT_FOUND_BODY: &str = r#"    <header>
      <h1>Database not found</h1>
      <p class="subtitle">The ID is malformed, or the database is not shared with this integration.</p>
    </header>
    <p><a href="/">Back to the start page</a></p>"#;

const DATABASE_BODY: &str = r#"    <header>
      <h1>{{TITLE}}</h1>
    </header>
    <section class="stats">{{STATS}}</section>
    <section>
      <h2>Completed</h2>
      {{COMPLETION}}
    </section>
    <section>
      <h2>To do</h2>
      {{TODO}}
    </section>
    {{SKIPPED}}
    {{FOOTER}}"#;
