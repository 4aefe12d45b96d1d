use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{Coordinate, LocatorError, RankedShelter, ServiceFilter, ShelterId};
use super::resolver::{AddressResolver, ObserverQuery};
use super::service::ShelterLocator;

/// Router exposing directory listing, nearby search and connect endpoints.
pub fn shelter_router<R>(locator: Arc<ShelterLocator<R>>) -> Router
where
    R: AddressResolver + 'static,
{
    Router::new()
        .route("/api/v1/shelters", get(list_handler::<R>))
        .route("/api/v1/shelters/nearby", get(nearby_handler::<R>))
        .route("/api/v1/shelters/connect", post(connect_handler::<R>))
        .route("/api/v1/shelters/:shelter_id", get(detail_handler::<R>))
        .with_state(locator)
}

#[derive(Debug, Default, Deserialize)]
pub struct NearbyParams {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConnectRequest {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    pub observer: Coordinate,
    pub service: String,
    pub count: usize,
    pub shelters: Vec<RankedShelter>,
}

pub(crate) async fn list_handler<R>(State(locator): State<Arc<ShelterLocator<R>>>) -> Response
where
    R: AddressResolver + 'static,
{
    let shelters = locator.directory().records().to_vec();
    (StatusCode::OK, Json(shelters)).into_response()
}

pub(crate) async fn detail_handler<R>(
    State(locator): State<Arc<ShelterLocator<R>>>,
    Path(shelter_id): Path<u32>,
) -> Response
where
    R: AddressResolver + 'static,
{
    match locator.shelter(ShelterId(shelter_id)) {
        Some(record) => (StatusCode::OK, Json(record.clone())).into_response(),
        None => {
            let payload = json!({
                "error": format!("shelter {shelter_id} not found"),
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn nearby_handler<R>(
    State(locator): State<Arc<ShelterLocator<R>>>,
    Query(params): Query<NearbyParams>,
) -> Response
where
    R: AddressResolver + 'static,
{
    let query = ObserverQuery {
        latitude: params.latitude,
        longitude: params.longitude,
        address: params.address,
    };
    let filter = ServiceFilter::from(params.service.as_deref());

    match locator.nearby(&query, filter, params.limit) {
        Ok(found) => {
            let body = NearbyResponse {
                observer: found.observer,
                service: found.filter.to_string(),
                count: found.results.len(),
                shelters: found.results,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => locator_error_response(error),
    }
}

pub(crate) async fn connect_handler<R>(
    State(locator): State<Arc<ShelterLocator<R>>>,
    Json(request): Json<ConnectRequest>,
) -> Response
where
    R: AddressResolver + 'static,
{
    let query = ObserverQuery {
        latitude: request.latitude,
        longitude: request.longitude,
        address: request.address,
    };
    let filter = ServiceFilter::from(request.service.as_deref());

    match locator.connect(&query, &filter) {
        Ok(connected) => (StatusCode::OK, Json(connected)).into_response(),
        Err(error) => locator_error_response(error),
    }
}

pub(crate) fn locator_status(error: &LocatorError) -> StatusCode {
    match error {
        LocatorError::InvalidCoordinate { .. } | LocatorError::MissingObserver => {
            StatusCode::BAD_REQUEST
        }
        LocatorError::AddressNotResolved(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LocatorError::NoEligibleShelter => StatusCode::NOT_FOUND,
    }
}

pub(crate) fn locator_error_response(error: LocatorError) -> Response {
    let status = locator_status(&error);
    let payload = match error {
        LocatorError::NoEligibleShelter => json!({
            "error": error.to_string(),
            "fallback": LocatorError::EMERGENCY_FALLBACK,
        }),
        other => json!({ "error": other.to_string() }),
    };
    (status, Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shelters::{ShelterDirectory, StaticAddressResolver};
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    fn router() -> Router {
        let locator = ShelterLocator::new(
            ShelterDirectory::sample(),
            Arc::new(StaticAddressResolver::default()),
        );
        shelter_router(Arc::new(locator))
    }

    fn empty_router() -> Router {
        let locator = ShelterLocator::new(
            ShelterDirectory::empty(),
            Arc::new(StaticAddressResolver::default()),
        );
        shelter_router(Arc::new(locator))
    }

    async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    async fn get_path(router: Router, uri: &str) -> Response {
        router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request builds"))
            .await
            .expect("route executes")
    }

    async fn post_json(router: Router, uri: &str, payload: Value) -> Response {
        router
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("route executes")
    }

    #[tokio::test]
    async fn lists_directory_in_load_order() {
        let response = get_path(router(), "/api/v1/shelters").await;
        assert_eq!(response.status(), StatusCode::OK);

        let payload = read_json_body(response).await;
        let ids: Vec<u64> = payload
            .as_array()
            .expect("array")
            .iter()
            .map(|entry| entry["id"].as_u64().expect("id"))
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn detail_returns_record_or_not_found() {
        let response = get_path(router(), "/api/v1/shelters/4").await;
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["name"], "Animal Control & Welfare Department");

        let missing = get_path(router(), "/api/v1/shelters/42").await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn nearby_ranks_and_filters() {
        let response = get_path(
            router(),
            "/api/v1/shelters/nearby?latitude=40.7128&longitude=-74.0060&service=emergency",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let payload = read_json_body(response).await;
        assert_eq!(payload["service"], "emergency");
        assert_eq!(payload["count"], 3);
        assert_eq!(payload["shelters"][0]["id"], 1);
        assert!(payload["shelters"][0]["distance_miles"].as_f64().expect("distance") < 0.05);
    }

    #[tokio::test]
    async fn nearby_resolves_zip_codes() {
        let response = get_path(router(), "/api/v1/shelters/nearby?address=10036&limit=1").await;
        assert_eq!(response.status(), StatusCode::OK);

        let payload = read_json_body(response).await;
        assert_eq!(payload["count"], 1);
        assert_eq!(payload["shelters"][0]["id"], 2);
    }

    #[tokio::test]
    async fn nearby_rejects_missing_or_invalid_locations() {
        let missing = get_path(router(), "/api/v1/shelters/nearby").await;
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

        let invalid = get_path(router(), "/api/v1/shelters/nearby?latitude=99&longitude=0").await;
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let unresolved = get_path(router(), "/api/v1/shelters/nearby?address=Atlantis").await;
        assert_eq!(unresolved.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn connect_returns_nearest_match() {
        let response = post_json(
            router(),
            "/api/v1/shelters/connect",
            json!({ "latitude": 40.7128, "longitude": -74.0060, "service": "rescue" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let payload = read_json_body(response).await;
        assert_eq!(payload["id"], 2);
        assert!(payload["distance_miles"].as_f64().expect("distance") > 3.0);
    }

    #[tokio::test]
    async fn connect_on_empty_directory_returns_fallback_advice() {
        let response = post_json(
            empty_router(),
            "/api/v1/shelters/connect",
            json!({ "address": "10007" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let payload = read_json_body(response).await;
        assert_eq!(payload["fallback"], LocatorError::EMERGENCY_FALLBACK);
    }
}
