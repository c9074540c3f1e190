use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/progress/months", post(handlers::months))
        .route("/api/progress/view", post(handlers::month_view))
        .route("/api/challenge", get(handlers::challenge))
        .with_state(state)
}
