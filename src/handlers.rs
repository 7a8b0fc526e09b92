use crate::clock;
use crate::errors::AppError;
use crate::models::{
    ChartPoint, CreateQuestRequest, HistoryRow, QuestView, SummaryResponse, TodayResponse,
    ToggleRequest, ToggleResponse,
};
use crate::state::AppState;
use crate::stats;
use crate::storage::persist_data;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

pub async fn list_quests(State(state): State<AppState>) -> Json<Vec<QuestView>> {
    let data = state.data.lock().await;
    Json(stats::quest_views(&data))
}

pub async fn create_quest(
    State(state): State<AppState>,
    Json(payload): Json<CreateQuestRequest>,
) -> Result<Json<QuestView>, AppError> {
    let mut data = state.data.lock().await;
    let template = data.create_template(&payload.name, payload.points)?.clone();
    persist_data(&state.data_dir, &data).await?;

    Ok(Json(QuestView {
        id: template.id,
        name: template.name,
        points: template.points,
        streak: 0,
    }))
}

pub async fn delete_quest(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    data.delete_template(&id);
    persist_data(&state.data_dir, &data).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_quest(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    let day = match payload.day {
        Some(day) => {
            if clock::parse_key(&day).is_none() {
                return Err(AppError::bad_request("day must be formatted YYYY-MM-DD"));
            }
            day
        }
        None => clock::date_key(clock::today()),
    };

    let mut data = state.data.lock().await;
    let done = data.log.toggle(&payload.id, &day);
    // Stale ids still toggle their log slot; they just earn nothing.
    let points_earned = if done {
        data.find_template(&payload.id).map(|template| template.points)
    } else {
        None
    };
    persist_data(&state.data_dir, &data).await?;

    Ok(Json(ToggleResponse {
        id: payload.id,
        day,
        done,
        points_earned,
    }))
}

pub async fn get_today(State(state): State<AppState>) -> Json<TodayResponse> {
    let data = state.data.lock().await;
    Json(stats::build_today(&data))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let data = state.data.lock().await;
    Json(stats::build_summary(&data))
}

pub async fn get_chart(State(state): State<AppState>) -> Json<Vec<ChartPoint>> {
    let data = state.data.lock().await;
    Json(stats::chart_series(&data))
}

pub async fn get_history(State(state): State<AppState>) -> Json<Vec<HistoryRow>> {
    let data = state.data.lock().await;
    Json(stats::build_history(&data))
}
