//! Aggregation over measurement rows read from a [`ClimateData`] source.

use log::debug;
use std::sync::Arc;
use time::Date;

use crate::{
    date_range::DateRange,
    db::{self, ClimateData, MeasurementFilter},
};

/// `{min, avg, max}` of the temperature readings in a range.
///
/// All three are `None` when no rows matched; the aggregate is undefined
/// rather than zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AggregateResult {
    pub tmin: Option<f64>,
    pub tavg: Option<f64>,
    pub tmax: Option<f64>,
}

impl AggregateResult {
    /// Unweighted min/mean/max; every reading contributes once.
    pub fn from_readings(readings: impl IntoIterator<Item = f64>) -> Self {
        let mut count = 0_usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for reading in readings {
            count += 1;
            sum += reading;
            min = min.min(reading);
            max = max.max(reading);
        }

        if count == 0 {
            return Self::default();
        }

        Self {
            tmin: Some(min),
            tavg: Some(sum / count as f64),
            tmax: Some(max),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tmin.is_none() && self.tavg.is_none() && self.tmax.is_none()
    }
}

pub struct AggregationEngine {
    data: Arc<dyn ClimateData>,
}

impl AggregationEngine {
    pub fn new(data: Arc<dyn ClimateData>) -> Self {
        Self { data }
    }

    /// Min/avg/max temperature over rows with `start <= date <= end`.
    pub async fn aggregate_temperature(&self, range: &DateRange) -> Result<AggregateResult, db::Error> {
        let rows = self
            .data
            .measurements(MeasurementFilter::between(range.start, range.end))
            .await?;
        debug!(
            "aggregating {} temperature readings between {} and {}",
            rows.len(),
            range.start,
            range.end
        );

        Ok(AggregateResult::from_readings(
            rows.iter().map(|row| row.temperature),
        ))
    }

    /// Every measurement row as `(date, precipitation)`, in read order.
    pub async fn list_precipitation(&self) -> Result<Vec<(Date, Option<f64>)>, db::Error> {
        let rows = self.data.measurements(MeasurementFilter::all()).await?;
        Ok(rows
            .into_iter()
            .map(|row| (row.date, row.precipitation))
            .collect())
    }

    /// Every measurement row as `(date, temperature)`, in read order.
    pub async fn list_temperature_observations(&self) -> Result<Vec<(Date, f64)>, db::Error> {
        let rows = self.data.measurements(MeasurementFilter::all()).await?;
        Ok(rows
            .into_iter()
            .map(|row| (row.date, row.temperature))
            .collect())
    }

    /// Name of every station row, in read order.
    pub async fn list_stations(&self) -> Result<Vec<String>, db::Error> {
        let stations = self.data.stations().await?;
        Ok(stations.into_iter().map(|station| station.name).collect())
    }
}
