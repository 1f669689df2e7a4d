use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{PassportId, PassportSubmission};
use super::report::PassportReportView;
use super::repository::{PassportRepository, RepositoryError};
use super::service::{PassportService, PassportServiceError};

/// Router builder exposing HTTP endpoints for passport issuance, recompute,
/// preview, and audit export.
pub fn passport_router<R>(service: Arc<PassportService<R>>) -> Router
where
    R: PassportRepository + 'static,
{
    Router::new()
        .route("/api/v1/passports", post(create_handler::<R>))
        .route("/api/v1/passports/preview", post(preview_handler::<R>))
        .route(
            "/api/v1/passports/:passport_id",
            get(report_handler::<R>).put(update_handler::<R>),
        )
        .route(
            "/api/v1/passports/:passport_id/audit.csv",
            get(audit_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<PassportService<R>>>,
    axum::Json(submission): axum::Json<PassportSubmission>,
) -> Response
where
    R: PassportRepository + 'static,
{
    match service.create(submission) {
        Ok(record) => {
            let view = record.summary_view();
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn preview_handler<R>(
    State(service): State<Arc<PassportService<R>>>,
    axum::Json(submission): axum::Json<PassportSubmission>,
) -> Response
where
    R: PassportRepository + 'static,
{
    match service.preview(&submission) {
        Ok(computation) => (StatusCode::OK, axum::Json(computation)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn report_handler<R>(
    State(service): State<Arc<PassportService<R>>>,
    Path(passport_id): Path<String>,
) -> Response
where
    R: PassportRepository + 'static,
{
    let id = PassportId(passport_id);
    match service.get(&id) {
        Ok(record) => {
            let view = PassportReportView::build(&record);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<PassportService<R>>>,
    Path(passport_id): Path<String>,
    axum::Json(submission): axum::Json<PassportSubmission>,
) -> Response
where
    R: PassportRepository + 'static,
{
    let id = PassportId(passport_id);
    match service.update(&id, submission) {
        Ok(record) => {
            let view = record.summary_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn audit_handler<R>(
    State(service): State<Arc<PassportService<R>>>,
    Path(passport_id): Path<String>,
) -> Response
where
    R: PassportRepository + 'static,
{
    let id = PassportId(passport_id);
    match service.audit_csv(&id) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: PassportServiceError) -> Response {
    let status = match &error {
        PassportServiceError::Coordinates(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PassportServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        PassportServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        PassportServiceError::Repository(RepositoryError::Unavailable(_))
        | PassportServiceError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
