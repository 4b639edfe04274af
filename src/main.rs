use actix_web::{web, App, HttpServer};
use actix_cors::Cors;
use pollboard_server::{api, AppError, AppState, Settings};
use dotenv::dotenv;
use std::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn cors(config: &Settings) -> Cors {
    if !config.cors.enabled {
        // CORS disabled - use most restrictive settings
        return Cors::default();
    }

    let cors_config = Cors::default();
    let cors_config = if config.cors.allow_any_origin {
        cors_config
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
    } else {
        // Only the local front-end dev servers
        cors_config
            .allowed_origin("http://localhost:8080")
            .allowed_origin("http://127.0.0.1:8080")
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec!["Content-Type"])
    };

    cors_config.max_age(config.cors.max_age as usize)
}

#[actix_web::main]
async fn main() -> pollboard_server::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();

    // Load configuration
    let config = Settings::new()?;
    info!("Configuration loaded successfully ({})", config.environment);

    let state = AppState::new(config.clone());
    {
        let store = state.store.read().await;
        info!(
            "Poll store seeded with {} subpolls (option check: {:?}, reject closed votes: {})",
            store.subpolls().len(),
            store.option_check(),
            state.policy.reject_closed_votes
        );
    }
    let state = web::Data::new(state);

    // Create and bind TCP listener
    let listener = TcpListener::bind(format!("{}:{}", config.server.host, config.server.port))?;
    info!("Starting server at http://{}:{}", config.server.host, config.server.port);

    let workers = config.server.workers as usize;

    HttpServer::new(move || {
        App::new()
            .wrap(cors(&config))
            .app_data(state.clone())
            .configure(api::configure)
    })
    .listen(listener)?
    .workers(workers)
    .run()
    .await
    .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(())
}
