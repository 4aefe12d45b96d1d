use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;

use super::domain::{AbuseReportSubmission, ReportError};
use super::intake::ReportIntakeService;
use crate::shelters::router::locator_error_response;
use crate::shelters::AddressResolver;

pub fn report_router<R>(service: Arc<ReportIntakeService<R>>) -> Router
where
    R: AddressResolver + 'static,
{
    Router::new()
        .route("/api/v1/reports", post(submit_handler::<R>))
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<ReportIntakeService<R>>>,
    Json(submission): Json<AbuseReportSubmission>,
) -> Response
where
    R: AddressResolver + 'static,
{
    match service.submit(submission) {
        Ok(receipt) => (StatusCode::ACCEPTED, Json(receipt)).into_response(),
        Err(ReportError::Locator(error)) => locator_error_response(error),
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}
