use crate::presentation::auth::login;
use crate::presentation::handlers::{
    ApiError, create_review, get_place, health_check, list_places,
};
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::web;

pub const API_PREFIX: &str = "/api/v1";

/// Registers the API routes relative to [`API_PREFIX`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .route("/login", web::post().to(login))
    .route("/places", web::get().to(list_places))
    .route("/places/{id}", web::get().to(get_place))
    .route("/reviews", web::post().to(create_review))
    .route("/health", web::get().to(health_check));
}

/// `*` in `origins` allows any origin.
pub fn cors(origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in origins {
            cors = cors.allowed_origin(origin);
        }
    }
    cors
}
