mod aggregation;
pub mod date_range;
pub mod db;
mod query_service;
mod routes;
mod startup;
mod templates;
mod utils;

pub use aggregation::{AggregateResult, AggregationEngine};
pub use date_range::{parse_date, Clock, DateError, DateRange, SystemClock};
pub use db::{ClimateData, Measurement, MeasurementFilter, SqliteAccess, Station};
pub use query_service::{
    ErrorBody, PrecipitationEntry, QueryError, QueryService, TemperatureObservation,
    TemperatureStats,
};
pub use routes::*;
pub use startup::*;
pub use templates::API_ROUTES;
pub use utils::*;
