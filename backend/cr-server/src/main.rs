use cr_auth::{CredentialCipher, InternalTokenVerifier, JwtValidator};
use cr_config::Config;
use cr_identity::{GoogleTokenExchange, YoutubeDataApi};
use cr_server::{AppState, AuthState, ServerError, build_router, logger};

use std::error::Error;
use std::sync::Arc;

use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let log_dir = Config::config_dir()?.join(&config.logging.dir);
        std::fs::create_dir_all(&log_dir)?;
        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting cr-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Missing or malformed key aborts startup
    let encryption_key = config
        .encryption
        .key
        .as_deref()
        .ok_or(ServerError::MissingSecret {
            name: "encryption.key",
        })?;
    let cipher = Arc::new(CredentialCipher::from_hex(encryption_key).map_err(ServerError::from)?);

    let jwt_secret = config
        .auth
        .jwt_secret
        .as_deref()
        .ok_or(ServerError::MissingSecret {
            name: "auth.jwt_secret",
        })?;

    let internal_token = InternalTokenVerifier::new(config.auth.internal_token.clone());
    if !internal_token.is_enabled() {
        warn!("auth.internal_token is not set - /internal routes will refuse all calls");
    }

    // Initialize database pool (runs migrations)
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());
    let pool = cr_db::connect(&database_path)
        .await
        .map_err(ServerError::from)?;
    info!("Database ready");

    if !config.youtube.is_configured() {
        warn!("YouTube client credentials are not set - profile requests will fail");
    }
    let token_exchange =
        Arc::new(GoogleTokenExchange::from_config(&config.youtube).map_err(ServerError::from)?);
    let data_api =
        Arc::new(YoutubeDataApi::from_config(&config.youtube).map_err(ServerError::from)?);

    let state = AppState::new(
        pool.clone(),
        cipher,
        AuthState {
            jwt_validator: JwtValidator::with_hs256(jwt_secret.as_bytes()),
            internal_token,
            session_cookie: config.auth.session_cookie.clone(),
        },
        token_exchange,
        data_api,
    );

    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => error!("Failed to listen for SIGINT: {}", e),
    }
}
