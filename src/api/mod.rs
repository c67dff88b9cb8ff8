use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, warn};

use crate::{
    FloodWatchError, VERSION,
    export::{content_disposition, series_to_csv},
    forecast_service::ForecastService,
    models::ForecastPayload,
};

#[derive(Clone)]
pub struct AppState {
    pub forecasts: Arc<ForecastService>,
}

impl AppState {
    pub fn new(forecasts: ForecastService) -> Self {
        Self {
            forecasts: Arc::new(forecasts),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    pub city: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/city_forecast", get(city_forecast))
        .route("/export_csv", get(export_csv))
        .route("/health", get(health))
        .with_state(state)
}

async fn city_forecast(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> Result<Json<ForecastPayload>, FloodWatchError> {
    let city = query.city.unwrap_or_default();
    let payload = state.forecasts.get_forecast(&city).await?;
    Ok(Json(payload))
}

async fn export_csv(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> Result<Response, FloodWatchError> {
    let city = query.city.unwrap_or_default();
    let payload = state.forecasts.get_forecast(&city).await?;
    let body = series_to_csv(&payload.series)?;

    let disposition = content_disposition(&city);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": VERSION }))
}

impl IntoResponse for FloodWatchError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected: {}", self);
        }
        (status, Json(json!({ "detail": self.user_message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::AdvisoryComposer;
    use crate::models::{Coordinate, HourlySeries};
    use crate::risk::RiskAggregator;
    use crate::weather::{ForecastFetcher, Geocoder};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    struct StubProvider {
        coordinate: Option<Coordinate>,
        forecast_status: Option<u16>,
    }

    #[async_trait]
    impl Geocoder for StubProvider {
        async fn search(&self, _name: &str) -> crate::Result<Option<Coordinate>> {
            Ok(self.coordinate.clone())
        }
    }

    #[async_trait]
    impl ForecastFetcher for StubProvider {
        async fn fetch(&self, _latitude: f64, _longitude: f64) -> crate::Result<HourlySeries> {
            if let Some(status) = self.forecast_status {
                return Err(FloodWatchError::upstream("Forecast", format!("HTTP {status}")));
            }
            Ok(HourlySeries {
                times: vec!["2024-07-01T00:00".into(), "2024-07-01T01:00".into()],
                temperature: vec![31.0, 36.2],
                precipitation: vec![12.0, 20.0],
                humidity: vec![80.0, 85.0],
                wind_speed: vec![4.0, 9.0],
            })
        }
    }

    fn app(coordinate: Option<Coordinate>, forecast_status: Option<u16>) -> Router {
        let provider = Arc::new(StubProvider {
            coordinate,
            forecast_status,
        });
        let service = ForecastService::new(
            provider.clone(),
            provider,
            RiskAggregator::default(),
            AdvisoryComposer::default(),
        );
        router(AppState::new(service))
    }

    fn mumbai() -> Option<Coordinate> {
        Some(Coordinate::new(
            "Mumbai".into(),
            Some("India".into()),
            19.07,
            72.88,
        ))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Response) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        (response.status(), response)
    }

    async fn body_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_city_forecast_ok() {
        let (status, response) = get(app(mumbai(), None), "/city_forecast?city=Mumbai").await;
        assert_eq!(status, StatusCode::OK);

        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["location"], "Mumbai, India");
        assert_eq!(body["rolling_24"], 32.0);
        assert_eq!(body["risk"]["flood"], "Medium");
        assert_eq!(body["risk"]["heat"], "Medium");
        assert_eq!(body["risk"]["storm"], "Medium");
        assert_eq!(body["precip"].as_array().unwrap().len(), 2);
        assert!(
            body["advisory_en"]
                .as_str()
                .unwrap()
                .starts_with("Medium flood risk")
        );
    }

    #[tokio::test]
    async fn test_missing_city_is_bad_request() {
        for uri in ["/city_forecast", "/city_forecast?city=", "/export_csv"] {
            let (status, response) = get(app(mumbai(), None), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
            assert_eq!(body["detail"], "city param required");
        }
    }

    #[tokio::test]
    async fn test_unknown_city_is_not_found() {
        let (status, response) = get(app(None, None), "/city_forecast?city=Atlantis").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["detail"], "Location not found");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_bad_gateway() {
        let (status, _) = get(app(mumbai(), Some(503)), "/city_forecast?city=Mumbai").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, _) = get(app(mumbai(), Some(500)), "/export_csv?city=Mumbai").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_export_csv() {
        let (status, response) = get(app(mumbai(), None), "/export_csv?city=Navi%20Mumbai").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Navi_Mumbai_weather.csv\""
        );
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/csv")
        );

        let csv = body_string(response).await;
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("time,temperature_C,precip_mm,humidity_%,wind_m_s")
        );
        assert_eq!(lines.next(), Some("2024-07-01T00:00,31.0,12.0,80.0,4.0"));
        assert_eq!(lines.count(), 1);
    }

    #[tokio::test]
    async fn test_health() {
        let (status, response) = get(app(None, None), "/health").await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], VERSION);
    }
}
