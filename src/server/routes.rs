use axum::{
    extract::{Query, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::info;

use super::{error::AppError, state::AppState};
use crate::query::GeoQuery;

/// Raw query string of `GET /api/chargers`. Everything stays a string until
/// [`GeoQuery::parse`] has looked at it.
#[derive(Debug, Deserialize)]
pub struct ChargerParams {
    latitude: Option<String>,
    longitude: Option<String>,
    radius: Option<String>,
}

/// Relays the upstream body for the requested point unchanged.
#[tracing::instrument(skip(state))]
pub async fn chargers_handler(
    State(state): State<AppState>,
    Query(params): Query<ChargerParams>,
) -> Result<Response, AppError> {
    let query = GeoQuery::parse(
        params.latitude.as_deref(),
        params.longitude.as_deref(),
        params.radius.as_deref(),
    )?;

    let payload = state.chargers.get_chargers_nearby(&query).await?;
    info!(bytes = payload.as_bytes().len(), "Relaying charger list");

    Ok(([(CONTENT_TYPE, "application/json")], payload.into_bytes()).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LocatorError;
    use crate::services::charger_api::{ChargerApi, ChargerPayload};
    use crate::server::api_router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use bytes::Bytes;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    /// Fake provider that records each query and answers with a fixed body.
    #[derive(Clone, Default)]
    struct FakeChargers {
        calls: Arc<Mutex<Vec<GeoQuery>>>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl ChargerApi for FakeChargers {
        async fn get_chargers_nearby(
            &self,
            query: &GeoQuery,
        ) -> Result<ChargerPayload, LocatorError> {
            self.calls.lock().unwrap().push(*query);
            if self.fail {
                return Err(LocatorError::UpstreamStatus {
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                    body: "boom".to_string(),
                });
            }
            Ok(ChargerPayload::from_bytes(Bytes::from_static(b"[{\"name\":\"A\",\"address\":\"B\"}]"))?)
        }
    }

    async fn call(fake: FakeChargers, uri: &str) -> (StatusCode, Option<String>, Bytes) {
        let app = api_router(AppState::new(fake));
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, content_type, body)
    }

    #[tokio::test]
    async fn test_relays_payload_as_json() {
        let fake = FakeChargers::default();
        let (status, content_type, body) =
            call(fake.clone(), "/api/chargers?latitude=-26.2&longitude=28.0&radius=5").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(&body[..], b"[{\"name\":\"A\",\"address\":\"B\"}]");
        assert_eq!(
            fake.calls.lock().unwrap().as_slice(),
            [GeoQuery::new(-26.2, 28.0, Some(5)).unwrap()]
        );
    }

    #[tokio::test]
    async fn test_radius_defaults_to_ten() {
        let fake = FakeChargers::default();
        let (status, _, _) = call(fake.clone(), "/api/chargers?latitude=1&longitude=2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(fake.calls.lock().unwrap()[0].radius, 10);
    }

    #[tokio::test]
    async fn test_missing_latitude_is_400_without_lookup() {
        let fake = FakeChargers::default();
        let (status, _, body) = call(fake.clone(), "/api/chargers?longitude=2").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(String::from_utf8_lossy(&body).contains("latitude"));
        assert!(fake.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bad_radius_is_400() {
        let (status, _, _) = call(
            FakeChargers::default(),
            "/api/chargers?latitude=1&longitude=2&radius=far",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_502() {
        let fake = FakeChargers {
            fail: true,
            ..Default::default()
        };
        let (status, _, _) = call(fake, "/api/chargers?latitude=1&longitude=2").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_each_request_reaches_provider() {
        let fake = FakeChargers::default();
        let app = api_router(AppState::new(fake.clone()));

        for _ in 0..2 {
            let req = Request::builder()
                .uri("/api/chargers?latitude=1&longitude=2")
                .body(Body::empty())
                .unwrap();
            let resp = app.clone().oneshot(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
        }

        assert_eq!(fake.calls.lock().unwrap().len(), 2);
    }
}
