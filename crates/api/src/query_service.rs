use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::Date;
use utoipa::ToSchema;

use crate::{
    aggregation::AggregationEngine,
    date_range::{Clock, DateError, DateRange},
    db::{self, ClimateData},
};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

#[derive(thiserror::Error, Debug)]
pub enum QueryError {
    #[error("{0}")]
    MalformedDate(#[from] DateError),
    #[error("observation data unavailable: {0}")]
    DataSourceUnavailable(#[from] db::Error),
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let status = match &self {
            QueryError::MalformedDate(_) => StatusCode::BAD_REQUEST,
            QueryError::DataSourceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PrecipitationEntry {
    #[serde(with = "iso_date")]
    #[schema(value_type = String, format = Date, example = "2017-01-01")]
    pub date: Date,
    /// Missing readings are reported as `null`, never as zero
    pub prcp: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TemperatureObservation {
    #[serde(with = "iso_date")]
    #[schema(value_type = String, format = Date, example = "2017-01-01")]
    pub date: Date,
    pub tobs: f64,
}

/// `null` in all three fields means no observation fell inside the range.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, ToSchema)]
pub struct TemperatureStats {
    pub tmin: Option<f64>,
    pub tavg: Option<f64>,
    pub tmax: Option<f64>,
}

/// The four read operations exposed over HTTP.
///
/// Stateless: each call performs exactly one read against the data source.
pub struct QueryService {
    engine: AggregationEngine,
    clock: Arc<dyn Clock>,
}

impl QueryService {
    pub fn new(data: Arc<dyn ClimateData>, clock: Arc<dyn Clock>) -> Self {
        Self {
            engine: AggregationEngine::new(data),
            clock,
        }
    }

    pub async fn precipitation(&self) -> Result<Vec<PrecipitationEntry>, QueryError> {
        let rows = self.engine.list_precipitation().await.map_err(unavailable)?;
        debug!("returning {} precipitation readings", rows.len());
        Ok(rows
            .into_iter()
            .map(|(date, prcp)| PrecipitationEntry { date, prcp })
            .collect())
    }

    pub async fn stations(&self) -> Result<Vec<String>, QueryError> {
        let stations = self.engine.list_stations().await.map_err(unavailable)?;
        debug!("returning {} stations", stations.len());
        Ok(stations)
    }

    pub async fn temperature_observations(
        &self,
    ) -> Result<Vec<TemperatureObservation>, QueryError> {
        let rows = self
            .engine
            .list_temperature_observations()
            .await
            .map_err(unavailable)?;
        debug!("returning {} temperature observations", rows.len());
        Ok(rows
            .into_iter()
            .map(|(date, tobs)| TemperatureObservation { date, tobs })
            .collect())
    }

    /// Aggregate temperature from `start` through `end`, or through today when `end` is absent.
    ///
    /// The single stats object is wrapped in a list to keep every endpoint list shaped.
    pub async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<Vec<TemperatureStats>, QueryError> {
        let range = DateRange::parse(start, end, self.clock.as_ref())?;
        let result = self
            .engine
            .aggregate_temperature(&range)
            .await
            .map_err(unavailable)?;
        if result.is_empty() {
            debug!(
                "no temperature readings between {} and {}",
                range.start, range.end
            );
        }

        Ok(vec![TemperatureStats {
            tmin: result.tmin,
            tavg: result.tavg,
            tmax: result.tmax,
        }])
    }
}

fn unavailable(e: db::Error) -> QueryError {
    error!("error reading observation data: {}", e);
    QueryError::DataSourceUnavailable(e)
}
