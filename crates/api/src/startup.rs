use crate::{
    date_range::{Clock, SystemClock},
    db::{ClimateData, SqliteAccess},
    routes, ErrorBody, PrecipitationEntry, QueryService, TemperatureObservation, TemperatureStats,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{header::ACCEPT, Method};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub remote_url: String,
    pub query_service: Arc<QueryService>,
}

impl AppState {
    pub fn new(remote_url: String, data: Arc<dyn ClimateData>, clock: Arc<dyn Clock>) -> Self {
        Self {
            remote_url,
            query_service: Arc::new(QueryService::new(data, clock)),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::climate::climate_routes::precipitation,
        routes::climate::climate_routes::stations,
        routes::climate::climate_routes::temperature_observations,
        routes::climate::climate_routes::temperature_stats_since,
        routes::climate::climate_routes::temperature_stats_between,
    ),
    components(
        schemas(
            PrecipitationEntry,
            TemperatureObservation,
            TemperatureStats,
            ErrorBody,
        )
    ),
    tags(
        (name = "climate observation api", description = "a read-only RESTful api over daily station precipitation and temperature observations")
    )
)]
struct ApiDoc;

pub async fn build_app_state(
    remote_url: String,
    database_path: String,
    max_connections: u32,
) -> Result<AppState, anyhow::Error> {
    let climate_db = SqliteAccess::connect(&database_path, max_connections)
        .await
        .map_err(|e| anyhow!("error opening observation database {}: {}", database_path, e))?;
    climate_db
        .health_check()
        .await
        .map_err(|e| anyhow!("observation database is not readable: {}", e))?;

    Ok(AppState::new(
        remote_url,
        Arc::new(climate_db),
        Arc::new(SystemClock),
    ))
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT])
        .allow_origin(Any);

    Router::new()
        .route("/", get(routes::index_handler))
        .route("/api/v1.0/precipitation", get(routes::precipitation))
        .route("/api/v1.0/stations", get(routes::stations))
        .route("/api/v1.0/tobs", get(routes::temperature_observations))
        .route("/api/v1.0/{start}", get(routes::temperature_stats_since))
        .route(
            "/api/v1.0/{start}/{end}",
            get(routes::temperature_stats_between),
        )
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default()
        .to_owned();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, {} code: {}, time: {}", path, response.status().as_str(), response_time);

    response
}
