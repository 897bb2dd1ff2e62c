use crate::helpers::{
    filtered_measurements, measurement, mock_measurements, mock_stations, spawn_app,
    MockClimateAccess, TODAY,
};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
};
use climate_api::{db, MeasurementFilter};
use hyper::Method;
use serde_json::{json, Value};
use std::sync::Arc;
use time::macros::date;
use tower::ServiceExt;

async fn get(climate_data: MockClimateAccess, uri: &str) -> Response {
    let test_app = spawn_app(Arc::new(climate_data)).await;

    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    test_app
        .app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request.")
}

async fn json_body(response: Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn precipitation_returns_one_entry_per_row() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_measurements()
        .withf(|filter| *filter == MeasurementFilter::all())
        .times(1)
        .returning(|_| Ok(mock_measurements()));

    let response = get(climate_data, "/api/v1.0/precipitation").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!([
            {"date": "2017-01-01", "prcp": 0.5},
            {"date": "2017-01-02", "prcp": null},
            {"date": "2017-01-03", "prcp": 0.1},
        ])
    );
}

#[tokio::test]
async fn stations_returns_flat_list_of_names() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_stations()
        .times(1)
        .returning(|| Ok(mock_stations()));

    let response = get(climate_data, "/api/v1.0/stations").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!(["WAIKIKI 717.2, HI US", "KANEOHE 838.1, HI US"])
    );
}

#[tokio::test]
async fn tobs_returns_one_entry_per_row() {
    let mut climate_data = MockClimateAccess::new();
    climate_data.expect_measurements().times(1).returning(|_| {
        let mut rows = mock_measurements();
        rows.push(measurement(date!(2017 - 01 - 01), Some(0.0), 65.0));
        Ok(rows)
    });

    let response = get(climate_data, "/api/v1.0/tobs").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!([
            {"date": "2017-01-01", "tobs": 70.0},
            {"date": "2017-01-02", "tobs": 72.0},
            {"date": "2017-01-03", "tobs": 68.0},
            {"date": "2017-01-01", "tobs": 65.0},
        ])
    );
}

#[tokio::test]
async fn stats_between_two_dates() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_measurements()
        .withf(|filter| {
            *filter == MeasurementFilter::between(date!(2017 - 01 - 01), date!(2017 - 01 - 02))
        })
        .times(1)
        .returning(|filter| Ok(filtered_measurements(filter)));

    let response = get(climate_data, "/api/v1.0/2017-01-01/2017-01-02").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!([{"tmin": 70.0, "tavg": 71.0, "tmax": 72.0}])
    );
}

#[tokio::test]
async fn stats_since_start_run_through_today() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_measurements()
        .withf(|filter| *filter == MeasurementFilter::between(date!(2017 - 01 - 03), TODAY))
        .times(1)
        .returning(|filter| Ok(filtered_measurements(filter)));

    let response = get(climate_data, "/api/v1.0/2017-01-03").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!([{"tmin": 68.0, "tavg": 68.0, "tmax": 68.0}])
    );
}

#[tokio::test]
async fn stats_without_matching_rows_are_null() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_measurements()
        .times(1)
        .returning(|filter| Ok(filtered_measurements(filter)));

    let response = get(climate_data, "/api/v1.0/2017-06-01/2017-06-02").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!([{"tmin": null, "tavg": null, "tmax": null}])
    );
}

#[tokio::test]
async fn inverted_range_is_an_empty_aggregate() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_measurements()
        .times(1)
        .returning(|filter| Ok(filtered_measurements(filter)));

    let response = get(climate_data, "/api/v1.0/2017-01-03/2017-01-01").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!([{"tmin": null, "tavg": null, "tmax": null}])
    );
}

#[tokio::test]
async fn malformed_start_is_a_bad_request() {
    let mut climate_data = MockClimateAccess::new();
    climate_data.expect_measurements().never();

    let response = get(climate_data, "/api/v1.0/2017-13-01").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("2017-13-01"));
}

#[tokio::test]
async fn malformed_end_is_a_bad_request() {
    let mut climate_data = MockClimateAccess::new();
    climate_data.expect_measurements().never();

    let response = get(climate_data, "/api/v1.0/2017-01-01/2017-02-30").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_date_segment_is_a_bad_request() {
    let mut climate_data = MockClimateAccess::new();
    climate_data.expect_measurements().never();

    let response = get(climate_data, "/api/v1.0/yesterday").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn data_source_failure_is_service_unavailable() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_measurements()
        .times(1)
        .returning(|_| Err(db::Error::Query(sqlx::Error::PoolTimedOut)));

    let response = get(climate_data, "/api/v1.0/precipitation").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn station_failure_is_not_an_empty_list() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_stations()
        .times(1)
        .returning(|| Err(db::Error::Query(sqlx::Error::PoolClosed)));

    let response = get(climate_data, "/api/v1.0/stations").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
