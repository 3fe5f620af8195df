use actix_web::{App, HttpServer, web};
use hbnb_listings_api::infrastructure::config::AppConfig;
use hbnb_listings_api::infrastructure::logging::init_logging;
use hbnb_listings_api::presentation::handlers::AppState;
use hbnb_listings_api::presentation::middleware::{RequestIdMiddleware, TimingMiddleware};
use hbnb_listings_api::presentation::routes::{API_PREFIX, configure, cors};
use tracing::info;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config.log_level);
    info!(
        origins = ?config.cors_origins,
        log_level = %config.log_level,
        "Configuration loaded"
    );

    let state = web::Data::new(AppState::seeded(config.api_token.clone()));
    info!("Seeded in-memory listing store");

    let origins = config.cors_origins.clone();
    let server = HttpServer::new(move || {
        tracing::trace!("Creating new application instance");
        App::new()
            .app_data(state.clone())
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .service(
                web::scope(API_PREFIX)
                    .wrap(cors(&origins))
                    .configure(configure),
            )
    });

    let bind_addr = format!("{}:{}", config.host, config.port);
    info!(address = %bind_addr, "Binding server to address");
    let server = server.bind((config.host.as_str(), config.port))?;

    info!(address = %bind_addr, prefix = API_PREFIX, "Starting HTTP server");
    server.run().await
}
