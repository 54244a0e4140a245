use axum::{
    extract::{Query, State},
    Extension, Json,
};
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::db::DailyLogStore;
use crate::dto::HabitScoreHistoryQuery;
use crate::error::{AppError, AppResult};
use crate::models::habit_score::HabitScore;
use crate::AppState;

const DEFAULT_HISTORY_WEEKS: i64 = 12;

pub async fn latest_habit_score(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<HabitScore>> {
    let score = state
        .store()
        .latest_habit_score(auth_user.id)
        .await?
        .ok_or(AppError::NotFound("No habit score yet".into()))?;

    Ok(Json(score))
}

pub async fn list_habit_scores(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<HabitScoreHistoryQuery>,
) -> AppResult<Json<Vec<HabitScore>>> {
    query.validate()?;

    let scores = state
        .store()
        .habit_scores(auth_user.id, query.limit.unwrap_or(DEFAULT_HISTORY_WEEKS))
        .await?;

    Ok(Json(scores))
}
