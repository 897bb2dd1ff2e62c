mod sqlite;

pub use sqlite::SqliteAccess;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::Date;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
}

/// A fixed weather station. Loaded with the dataset and never mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Station {
    #[sqlx(rename = "station")]
    pub station_id: String,
    pub name: String,
}

/// One daily observation at one station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Measurement {
    #[sqlx(rename = "station")]
    pub station_id: String,
    pub date: Date,
    #[sqlx(rename = "prcp")]
    pub precipitation: Option<f64>,
    #[sqlx(rename = "tobs")]
    pub temperature: f64,
}

/// Row selection pushed down into the data source query.
///
/// Both bounds are inclusive; an absent bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeasurementFilter {
    pub start: Option<Date>,
    pub end: Option<Date>,
}

impl MeasurementFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(start: Date, end: Date) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }
}

/// Read-only access to the Station and Measurement entities.
///
/// Every call is one independent read; implementations must not share
/// mutable connection state between calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClimateData: Send + Sync {
    async fn measurements(&self, filter: MeasurementFilter) -> Result<Vec<Measurement>, Error>;
    async fn stations(&self) -> Result<Vec<Station>, Error>;
}
