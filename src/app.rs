use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/quests",
            get(handlers::list_quests).post(handlers::create_quest),
        )
        .route("/api/quests/:id", delete(handlers::delete_quest))
        .route("/api/toggle", post(handlers::toggle_quest))
        .route("/api/today", get(handlers::get_today))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/chart", get(handlers::get_chart))
        .route("/api/history", get(handlers::get_history))
        .with_state(state)
}
