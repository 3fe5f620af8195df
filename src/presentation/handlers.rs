use crate::application::auth_service::AuthService;
use crate::application::service::ListingService;
use crate::data::memory::InMemoryListingStore;
use crate::data::seed;
use crate::data::user_repository::InMemoryUserRepository;
use crate::domain::error::DomainError;
use crate::domain::models::NewReview;
use crate::infrastructure::security::StaticTokenAuthority;
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

/// Identity attached to reviews posted with the shared demo token.
pub const DEMO_IDENTITY: &str = "maram";

pub struct AppState {
    pub listings: ListingService<InMemoryListingStore>,
    pub auth: AuthService<InMemoryUserRepository>,
}

impl AppState {
    /// Fresh state over the demo dataset, accepting `api_token`.
    pub fn seeded(api_token: impl Into<String>) -> Self {
        Self {
            listings: ListingService::new(Arc::new(seed::listing_store())),
            auth: AuthService::new(
                Arc::new(seed::user_repository()),
                Arc::new(StaticTokenAuthority::new(api_token, DEMO_IDENTITY)),
            ),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = self.to_string();

        match self {
            ApiError::Internal(_) => error!(error = %message, status = %status, "Internal error"),
            _ => warn!(error = %message, status = %status, "Request rejected"),
        }

        HttpResponse::build(status).json(ErrorResponse { message })
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::PlaceNotFound => ApiError::NotFound(message),
            DomainError::InvalidCredentials | DomainError::Unauthorized => {
                ApiError::Unauthorized(message)
            }
            DomainError::Validation(msg) => ApiError::BadRequest(msg),
            DomainError::DuplicateReviewId(_) => {
                ApiError::Internal("Could not allocate a review id".to_string())
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DomainError>() {
            Ok(domain) => domain.into(),
            Err(other) => ApiError::Internal(other.to_string()),
        }
    }
}

/// Largest request body the JSON endpoints will buffer.
pub const MAX_BODY_BYTES: usize = 256 * 1024;

/// Buffers a request body up to [`MAX_BODY_BYTES`].
pub(crate) async fn read_body(payload: web::Payload) -> Result<web::Bytes, ApiError> {
    match payload.to_bytes_limited(MAX_BODY_BYTES).await {
        Ok(Ok(bytes)) => Ok(bytes),
        Ok(Err(_)) => Err(ApiError::PayloadTooLarge(format!(
            "Request body exceeds {} bytes",
            MAX_BODY_BYTES
        ))),
        Err(e) => Err(ApiError::BadRequest(format!(
            "Failed to read request body: {}",
            e
        ))),
    }
}

/// Malformed or missing JSON bodies read as `null`.
pub(crate) fn lenient_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[instrument]
pub async fn health_check() -> HttpResponse {
    info!("Health check requested");
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

#[derive(Debug, Deserialize)]
pub struct ListPlacesQuery {
    pub max_price: Option<String>,
}

#[instrument(skip(state))]
pub async fn list_places(
    state: web::Data<AppState>,
    query: web::Query<ListPlacesQuery>,
) -> Result<HttpResponse, ApiError> {
    let max_price = match query.max_price.as_deref() {
        None => None,
        Some(raw) => match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => return Err(ApiError::BadRequest("max_price must be a number".to_string())),
        },
    };

    let places = state.listings.list_places(max_price).await.map_err(|e| {
        error!(error = %e, "Failed to list places");
        e
    })?;
    info!(count = places.len(), "Places listed");
    Ok(HttpResponse::Ok().json(places))
}

#[instrument(skip(state), fields(place_id = %*path))]
pub async fn get_place(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let place_id = path.into_inner();
    let place = state.listings.get_place(&place_id).await?;
    info!(
        place_id = %place.place.id,
        reviews = place.reviews.len(),
        "Place retrieved"
    );
    Ok(HttpResponse::Ok().json(place))
}

/// Authorization is checked before the body is read.
#[instrument(skip(state, req, payload))]
pub async fn create_review(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Payload,
) -> Result<HttpResponse, ApiError> {
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let author = state.auth.authorize(authorization)?;

    let body = read_body(payload).await?;
    let input = NewReview::from_json(&lenient_json(&body))?;
    info!(place_id = %input.place_id, rating = input.rating, "Creating review");

    let review = state
        .listings
        .add_review(&author, input)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create review");
            e
        })?;
    info!(review_id = %review.id, place_id = %review.place_id, "Review created successfully");
    Ok(HttpResponse::Created().json(review))
}
