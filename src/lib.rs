pub mod app;
pub mod challenge;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod month;
pub mod state;
pub mod stats;

pub use app::router;
pub use challenge::{challenge_progress, map_challenge_cycle, motivation_tier};
pub use config::ServiceConfig;
pub use errors::ProgressError;
pub use month::{parse_history, partition_by_month};
pub use state::AppState;
pub use stats::{build_month_chart, derive_month_view};
