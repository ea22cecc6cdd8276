use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};

use learnhub_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

fn build_cors(origins: &[String]) -> Cors {
    if origins.is_empty() {
        return Cors::permissive();
    }
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    log::info!(
        "Starting HTTP server on {}:{} (storage: {})",
        host,
        port,
        state.storage_name()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&state.config.cors_allowed_origins))
            .wrap(RequestIdMiddleware)
            .wrap(Logger::default())
            .configure(handlers::app_config(state.clone()))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
