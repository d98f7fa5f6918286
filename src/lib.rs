pub mod aggregate;
pub mod app;
pub mod calendar;
pub mod config;
pub mod demo;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod notion;
pub mod state;
pub mod stats;
pub mod ui;

pub use aggregate::{aggregate, completion_counts, outstanding_counts};
pub use app::router;
pub use calendar::{build_calendar, intensity};
pub use config::Config;
pub use notion::NotionClient;
pub use state::AppState;
pub use stats::compute_stats;
