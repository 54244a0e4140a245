use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{Duration, NaiveDate, Utc};
use validator::Validate;

use crate::analytics::adherence::WeeklyAdherence;
use crate::analytics::dropoff_risk::RiskReport;
use crate::auth::middleware::AuthUser;
use crate::db::DailyLogStore;
use crate::dto::{
    DailyLogRangeQuery, DailyStatsResponse, ProgressResponse, RecentLogsQuery, StreakResponse,
    UpsertDailyLogRequest,
};
use crate::error::{AppError, AppResult};
use crate::models::daily_log::DailyLog;
use crate::services::daily_logs as service;
use crate::AppState;

pub async fn upsert_daily_log(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<UpsertDailyLogRequest>,
) -> AppResult<Json<DailyLog>> {
    body.validate()?;

    let now = Utc::now();
    let (log_date, patch) = body.into_parts();
    let log_date = log_date.unwrap_or_else(|| now.date_naive());

    let log = service::save_daily_log(
        &state.store(),
        auth_user.id,
        log_date,
        &patch,
        state.config.streak_log_limit,
        now,
    )
    .await?;

    Ok(Json(log))
}

pub async fn list_daily_logs(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<DailyLogRangeQuery>,
) -> AppResult<Json<Vec<DailyLog>>> {
    let today = Utc::now().date_naive();
    let start = query.start_date.unwrap_or_else(|| {
        today - Duration::days(state.config.recent_logs_default_days)
    });
    let end = query.end_date.unwrap_or(today);

    if start > end {
        return Err(AppError::Validation(
            "start_date must not be after end_date".into(),
        ));
    }

    let logs = state
        .store()
        .logs_in_range(auth_user.id, start, end)
        .await?;

    Ok(Json(logs))
}

pub async fn get_daily_log(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(log_date): Path<NaiveDate>,
) -> AppResult<Json<DailyLog>> {
    let log = state
        .store()
        .log_for_date(auth_user.id, log_date)
        .await?
        .ok_or(AppError::NotFound("No log for that date".into()))?;

    Ok(Json(log))
}

pub async fn recent_daily_logs(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<RecentLogsQuery>,
) -> AppResult<Json<Vec<DailyLog>>> {
    query.validate()?;

    let days = query.days.unwrap_or(state.config.recent_logs_default_days);
    let from = service::window_start(Utc::now().date_naive(), days);

    let logs = state.store().logs_since(auth_user.id, from).await?;

    Ok(Json(logs))
}

pub async fn get_streak(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<StreakResponse>> {
    let streak = service::streak(
        &state.store(),
        auth_user.id,
        state.config.streak_log_limit,
        Utc::now().date_naive(),
    )
    .await?;

    Ok(Json(streak))
}

pub async fn get_daily_stats(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<DailyStatsResponse>> {
    let stats = service::daily_stats(
        &state.store(),
        auth_user.id,
        state.config.recent_logs_default_days,
        state.config.streak_log_limit,
        Utc::now().date_naive(),
    )
    .await?;

    Ok(Json(stats))
}

pub async fn get_weekly_adherence(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(weeks_back): Path<i64>,
) -> AppResult<Json<WeeklyAdherence>> {
    let weeks_back = u32::try_from(weeks_back)
        .ok()
        .filter(|w| (1..=520).contains(w))
        .ok_or_else(|| AppError::Validation("Week number must be between 1 and 520".into()))?;

    let adherence = service::weekly_adherence(
        &state.store(),
        auth_user.id,
        weeks_back,
        Utc::now().date_naive(),
    )
    .await?;

    Ok(Json(adherence))
}

pub async fn get_progress(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<ProgressResponse>> {
    let progress = service::progress(&state.store(), auth_user.id, Utc::now()).await?;
    Ok(Json(progress))
}

pub async fn get_dropoff_risk(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<RiskReport>> {
    let report = service::dropoff_risk(
        &state.store(),
        auth_user.id,
        state.config.risk_history_logs,
        Utc::now().date_naive(),
    )
    .await?;

    Ok(Json(report))
}
