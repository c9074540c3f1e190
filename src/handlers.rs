use crate::challenge::challenge_progress;
use crate::errors::AppError;
use crate::models::{
    ChallengeConfig, ChallengeProgress, ChallengeQuery, DailyLogEntry, HistoryRequest, MonthChart,
    MonthKey, MonthPartition, MonthViewRequest, RawLogEntry,
};
use crate::month::{parse_history, partition_by_month};
use crate::state::AppState;
use crate::stats::build_month_chart;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use tracing::{debug, warn};

pub async fn months(
    payload: Result<Json<HistoryRequest>, JsonRejection>,
) -> Result<Json<MonthPartition>, AppError> {
    let Json(payload) = payload.inspect_err(|err| warn!("rejected body: {err}"))?;
    let history = validated_history(&payload.history)?;
    Ok(Json(partition_by_month(&history)))
}

pub async fn month_view(
    payload: Result<Json<MonthViewRequest>, JsonRejection>,
) -> Result<Json<MonthChart>, AppError> {
    let Json(payload) = payload.inspect_err(|err| warn!("rejected body: {err}"))?;
    let history = validated_history(&payload.history)?;
    let month = payload
        .month
        .as_deref()
        .map(str::parse::<MonthKey>)
        .transpose()
        .inspect_err(|err| warn!("rejected month selection: {err}"))?;

    let chart = build_month_chart(&history, month);
    debug!(points = chart.points.len(), "built month chart");
    Ok(Json(chart))
}

pub async fn challenge(
    State(state): State<AppState>,
    query: Result<Query<ChallengeQuery>, QueryRejection>,
) -> Result<Json<ChallengeProgress>, AppError> {
    let Query(query) = query.inspect_err(|err| warn!("rejected query: {err}"))?;
    let config = match query.length {
        Some(length) => ChallengeConfig::new(length)
            .inspect_err(|err| warn!("rejected challenge query: {err}"))?,
        None => state.challenge(),
    };

    let progress = challenge_progress(query.streak, config.challenge_length, query.completed_today)?;
    Ok(Json(progress))
}

fn validated_history(raw: &[RawLogEntry]) -> Result<Vec<DailyLogEntry>, AppError> {
    let history = parse_history(raw).inspect_err(|err| warn!("rejected history: {err}"))?;
    debug!(entries = history.len(), "validated history");
    Ok(history)
}
