//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but request-level errors are the
//! crates' own `thiserror` types rendered as `{"detail": ...}`.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use auth::{AuthConfig, PgAuthRepository, TokenService, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use items::{PgItemStore, items_router};
use platform::token::TokenKeys;
use shops::{PgShopRepository, shops_router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(max_connections = config.max_connections, "Connected to database");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Token keys
    let private_pem = tokio::fs::read(&config.jwt_private_key_path)
        .await
        .with_context(|| format!("Failed to read {}", config.jwt_private_key_path.display()))?;
    let public_pem = tokio::fs::read(&config.jwt_public_key_path)
        .await
        .with_context(|| format!("Failed to read {}", config.jwt_public_key_path.display()))?;
    let keys = TokenKeys::from_rsa_pem(&private_pem, &public_pem)?;

    let auth_config = AuthConfig {
        password_pepper: config.password_pepper.clone(),
        ..AuthConfig::default()
    };
    let tokens = Arc::new(TokenService::new(keys, auth_config.token_ttl_secs()));

    let auth_repo = PgAuthRepository::new(pool.clone());

    // A fresh database has no owner to create the first accounts.
    // Errors here should not prevent server startup.
    if let Some(owner) = &config.bootstrap_owner {
        match auth::application::ensure_owner(
            Arc::new(auth_repo.clone()),
            Arc::new(auth_config.clone()),
            owner.email.clone(),
            owner.password.clone(),
        )
        .await
        {
            Ok(created) => tracing::info!(created, "Owner bootstrap completed"),
            Err(e) => tracing::warn!(error = %e, "Owner bootstrap failed, continuing anyway"),
        }
    }

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .merge(auth_router(auth_repo.clone(), tokens.clone(), auth_config))
        .nest(
            "/shops",
            shops_router(
                PgShopRepository::new(pool.clone()),
                auth_repo.clone(),
                tokens.clone(),
            ),
        )
        .nest(
            "/items",
            items_router(PgItemStore::new(pool.clone()), auth_repo, tokens),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
