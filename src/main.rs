//! Apex Auth Gateway
//! Mission: Thin, hardened HTTP front for a remote identity provider

use anyhow::{Context, Result};
use apex_auth_gateway::{
    auth::{auth_router, AuthState, InMemoryRevocationStore, TokenService},
    config::Config,
    middleware::request_logging,
    upstream::{ApexClient, UpstreamAuth},
};
use axum::http::{
    header::{self, HeaderName, HeaderValue},
    Method,
};
use axum::middleware;
use dotenv::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    let config = Config::from_env();
    info!(
        "Starting auth gateway (upstream: {}, token ttl: {}h)",
        config.upstream_base_url, config.jwt_expiration_hours
    );

    let revocations = Arc::new(InMemoryRevocationStore::new());
    let tokens = Arc::new(TokenService::new(
        config.secret_key.clone(),
        config.jwt_expiration_hours,
        revocations,
    ));
    let upstream: Arc<dyn UpstreamAuth> = Arc::new(ApexClient::new(&config)?);

    let state = AuthState { tokens, upstream };

    let app = auth_router(state)
        .layer(middleware::from_fn(request_logging))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-xss-protection"),
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        );

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("🎯 Auth gateway listening on {}", config.bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "apex_auth_gateway=debug,security=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
