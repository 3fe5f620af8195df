use crate::domain::user::LoginRequest;
use crate::presentation::handlers::{ApiError, AppState, lenient_json, read_body};
use actix_web::{HttpResponse, web};
use tracing::{error, info, instrument};

/// A body that is not a JSON object with string fields counts as empty.
#[instrument(skip(state, payload))]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Payload,
) -> Result<HttpResponse, ApiError> {
    let body = read_body(payload).await?;
    let req: LoginRequest = serde_json::from_value(lenient_json(&body)).unwrap_or_default();
    info!(email = %req.email, "Login request received");

    let response = state.auth.login(req).await.map_err(|e| {
        error!(error = %e, "Failed to login");
        ApiError::from(e)
    })?;

    info!(email = %response.user.email, "Login successful");
    Ok(HttpResponse::Ok().json(response))
}
