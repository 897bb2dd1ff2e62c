use async_trait::async_trait;
use log::{debug, info};
use scooby::postgres::{select, Parameters};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::{str::FromStr, time::Duration};
use time::Date;

use super::{ClimateData, Error, Measurement, MeasurementFilter, Station};

/// SQLite backed [`ClimateData`].
///
/// Connections are opened read-only. Each read checks a connection out of
/// the pool for a single statement and hands it back when dropped.
pub struct SqliteAccess {
    pool: SqlitePool,
}

impl SqliteAccess {
    pub async fn connect(path: &str, max_connections: u32) -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .read_only(true)
            .create_if_missing(false)
            .pragma("busy_timeout", "5000");

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        info!("SQLite observation database opened at: {}", path);
        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ClimateData for SqliteAccess {
    async fn measurements(&self, filter: MeasurementFilter) -> Result<Vec<Measurement>, Error> {
        let mut placeholders = Parameters::new();
        let mut values: Vec<Date> = vec![];

        let mut query = select(("station", "date", "prcp", "tobs")).from("measurement");

        if let Some(start) = filter.start {
            query = query.where_(format!("date >= {}", placeholders.next()));
            values.push(start);
        }
        if let Some(end) = filter.end {
            query = query.where_(format!("date <= {}", placeholders.next()));
            values.push(end);
        }

        let sql = query.to_string();
        debug!("measurement query: {}", sql);

        let mut conn = self.pool.acquire().await?;
        let mut statement = sqlx::query_as::<_, Measurement>(&sql);
        for value in values {
            statement = statement.bind(value);
        }

        Ok(statement.fetch_all(&mut *conn).await?)
    }

    async fn stations(&self) -> Result<Vec<Station>, Error> {
        let sql = select(("station", "name")).from("station").to_string();
        debug!("station query: {}", sql);

        let mut conn = self.pool.acquire().await?;
        let stations = sqlx::query_as::<_, Station>(&sql)
            .fetch_all(&mut *conn)
            .await?;

        Ok(stations)
    }
}
