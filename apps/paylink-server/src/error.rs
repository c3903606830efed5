use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use paylink_shared::api::ErrorResponse;
use thiserror::Error;

use crate::gateway::GatewayError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid JSON body")]
    InvalidJson,

    #[error("could not convert amount to float: {0}")]
    Coercion(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::InvalidJson => StatusCode::BAD_REQUEST,
            Self::Coercion(_) | Self::Gateway(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Gateway(GatewayError::Provider {
                status: upstream,
                code,
                field,
                message,
            }) => {
                tracing::error!(
                    "Error creating payment link: {} (upstream status {}, code {:?}, field {:?})",
                    message,
                    upstream,
                    code,
                    field
                );
            }
            _ if status.is_server_error() => {
                tracing::error!("Error creating payment link: {}", self);
            }
            _ => {}
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
