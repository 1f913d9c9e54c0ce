//! Next Subscription backend server.
//!
//! Loads configuration, connects to PostgreSQL, wires the adapters into
//! the HTTP router, and serves until a shutdown signal arrives.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use next_subscription::adapters::auth::{Argon2PasswordHasher, JwtTokenService};
use next_subscription::adapters::crypto::AesGcmCredentialCipher;
use next_subscription::adapters::http::{
    build_router, AdminAppState, AuthState, SessionCookie, VendorAppState,
};
use next_subscription::adapters::postgres::{
    PostgresAdminRepository, PostgresProductRepository, PostgresProductRequestRepository,
    PostgresStockRequestRepository, PostgresVendorRepository,
};
use next_subscription::config::AppConfig;

#[tokio::main]
async fn main() {
    let config = AppConfig::load().expect("Failed to load configuration");
    config.validate().expect("Invalid configuration");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.server.log_level.clone().into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to PostgreSQL");
    tracing::info!("database pool created");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");
        tracing::info!("migrations applied");
    }

    let vendors = Arc::new(PostgresVendorRepository::new(pool.clone()));
    let admins = Arc::new(PostgresAdminRepository::new(pool.clone()));
    let products = Arc::new(PostgresProductRepository::new(pool.clone()));
    let product_requests = Arc::new(PostgresProductRequestRepository::new(pool.clone()));
    let stock_requests = Arc::new(PostgresStockRequestRepository::new(pool.clone()));

    let password_hasher = Arc::new(Argon2PasswordHasher::new());
    let token_service = Arc::new(JwtTokenService::new(&config.auth));
    let credential_cipher = Arc::new(
        AesGcmCredentialCipher::from_key_material(&config.encryption.key)
            .expect("Invalid encryption key"),
    );

    let session_cookie = SessionCookie::new(
        config.auth.cookie_name.clone(),
        config.auth.cookie_secure,
        config.auth.token_ttl_secs,
    );

    let vendor_state = VendorAppState {
        vendors: vendors.clone(),
        products: products.clone(),
        product_requests: product_requests.clone(),
        stock_requests: stock_requests.clone(),
        password_hasher: password_hasher.clone(),
        token_issuer: token_service.clone(),
        credential_cipher: credential_cipher.clone(),
        session_cookie: session_cookie.clone(),
    };
    let admin_state = AdminAppState {
        admins,
        products,
        product_requests,
        stock_requests,
        password_hasher,
        token_issuer: token_service.clone(),
        session_cookie,
    };
    let validator: AuthState = token_service;

    let cors = if config.server.cors_origins_list().is_empty() {
        CorsLayer::permissive()
    } else {
        let origins = config
            .server
            .cors_origins_list()
            .iter()
            .filter_map(|o| o.parse::<axum::http::HeaderValue>().ok())
            .collect::<Vec<_>>();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_credentials(true)
    };

    let app = build_router(vendor_state, admin_state, validator)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "next-subscription listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
