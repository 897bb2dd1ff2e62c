use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{AppState, PrecipitationEntry, QueryError, TemperatureObservation, TemperatureStats};

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Every precipitation reading", body = Vec<PrecipitationEntry>),
        (status = SERVICE_UNAVAILABLE, description = "Observation data could not be read", body = crate::ErrorBody)
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationEntry>>, QueryError> {
    state.query_service.precipitation().await.map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Every station name", body = Vec<String>),
        (status = SERVICE_UNAVAILABLE, description = "Observation data could not be read", body = crate::ErrorBody)
    ))]
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, QueryError> {
    state.query_service.stations().await.map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Every temperature observation", body = Vec<TemperatureObservation>),
        (status = SERVICE_UNAVAILABLE, description = "Observation data could not be read", body = crate::ErrorBody)
    ))]
pub async fn temperature_observations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureObservation>>, QueryError> {
    state.query_service.temperature_observations().await.map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
        ("start" = String, Path, description = "First day included, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Min/avg/max temperature from start through today", body = Vec<TemperatureStats>),
        (status = BAD_REQUEST, description = "Malformed date", body = crate::ErrorBody),
        (status = SERVICE_UNAVAILABLE, description = "Observation data could not be read", body = crate::ErrorBody)
    ))]
pub async fn temperature_stats_since(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<Vec<TemperatureStats>>, QueryError> {
    state
        .query_service
        .temperature_stats(&start, None)
        .await
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
        ("start" = String, Path, description = "First day included, YYYY-MM-DD"),
        ("end" = String, Path, description = "Last day included, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Min/avg/max temperature from start through end", body = Vec<TemperatureStats>),
        (status = BAD_REQUEST, description = "Malformed date", body = crate::ErrorBody),
        (status = SERVICE_UNAVAILABLE, description = "Observation data could not be read", body = crate::ErrorBody)
    ))]
pub async fn temperature_stats_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<TemperatureStats>>, QueryError> {
    state
        .query_service
        .temperature_stats(&start, Some(&end))
        .await
        .map(Json)
}
