//! # API REST
//!
//! REST API implementation for the prescription service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON extraction, plain-text rejections, CORS)
//!
//! Uses `api-shared` for wire types and `rx-core` for the submission workflow.

#![warn(rust_2018_idioms)]

pub mod error;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{dto, HealthService};
use rx_core::{Database, PrescriptionService, PRESCRIPTION_ADDED_MESSAGE};

pub use error::ApiError;

/// Route of the submission endpoint.
pub const ADD_PRESCRIPTION_PATH: &str = "/api/adding_prescription/add";

/// Application state shared across REST API handlers
///
/// Holds the store handle; handlers build their services from it per request.
#[derive(Clone)]
pub struct AppState {
    db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, add_prescription),
    components(schemas(
        dto::HealthRes,
        dto::SubmitPrescriptionReq,
        dto::PatientReq,
        dto::DoctorReq,
        dto::PrescriptionHeaderReq,
        dto::MedicamentLineReq,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(ADD_PRESCRIPTION_PATH, post(add_prescription))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = dto::HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<dto::HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/api/adding_prescription/add",
    request_body = dto::SubmitPrescriptionReq,
    responses(
        (status = 200, description = "Prescription stored", body = String, content_type = "text/plain"),
        (status = 400, description = "Submission rejected; body carries the reason", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error")
    )
)]
/// Submit a prescription
///
/// Creates the patient and doctor when their ids are unknown, then stores the prescription and
/// one line per medicament.
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - the body is absent, `null` or malformed,
/// - more than ten medicaments are listed,
/// - a medicament id is not in the catalogue, or
/// - the due date precedes the issue date.
///
/// Returns `500 Internal Server Error` if the store fails.
#[axum::debug_handler]
async fn add_prescription(
    State(state): State<AppState>,
    payload: Result<Json<Option<dto::SubmitPrescriptionReq>>, JsonRejection>,
) -> Result<(StatusCode, &'static str), ApiError> {
    let req = match payload {
        Ok(Json(Some(req))) => req,
        Ok(Json(None)) => return Err(ApiError::invalid_data()),
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable prescription submission");
            return Err(ApiError::invalid_data());
        }
    };

    let service = PrescriptionService::new(state.db.clone());
    tokio::task::spawn_blocking(move || service.submit(&req))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok((StatusCode::OK, PRESCRIPTION_ADDED_MESSAGE))
}
