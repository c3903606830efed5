use crate::AppState;
use axum::{Json, extract::State};
use paylink_shared::api::{GatewayStatus, HealthResponse};

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let gateway = if state.gateway.is_configured() {
        GatewayStatus::Configured
    } else {
        GatewayStatus::Unconfigured
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        gateway,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
