use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod gateway;
mod handlers;

use config::PaylinkConfig;
use gateway::GatewayHandle;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paylink_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PaylinkConfig::load()?;
    tracing::info!("Paylink server starting...");
    tracing::info!("Razorpay API: {}", config.razorpay_api_base);
    tracing::info!("App: {} {}", config.app_title, config.app_version);

    let gateway = GatewayHandle::from_config(&config);
    let port = config.port;
    let app = build_router(AppState { config, gateway });

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Paylink listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Clone)]
pub struct AppState {
    pub config: PaylinkConfig,
    pub gateway: GatewayHandle,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/create-payment-link",
            post(handlers::payment_link::create_payment_link),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
