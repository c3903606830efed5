use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::PaylinkConfig;

pub mod razorpay;

use razorpay::RazorpayGateway;

/// A payment link request in major currency units (rupees).
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub name: String,
    pub email: String,
    pub contact: String,
    pub amount: f64,
    pub description: Option<String>,
    pub reference_id: Option<String>,
    pub expire_by: Option<i64>,
    pub callback_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentLinkResult {
    pub short_url: String,
    pub link_id: String,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Razorpay client not initialized. Check your environment variables.")]
    ClientNotConfigured,

    #[error("cannot convert amount {0} to paise")]
    InvalidAmount(f64),

    /// The provider answered with a non-success status.
    #[error("{message}")]
    Provider {
        status: u16,
        code: Option<String>,
        field: Option<String>,
        message: String,
    },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response from Razorpay: {0}")]
    MalformedResponse(String),
}

#[async_trait]
pub trait PaymentLinkGateway: Send + Sync {
    /// Create a payment link and return its short URL and id
    async fn create_payment_link(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentLinkResult, GatewayError>;

    /// Get the gateway name
    fn name(&self) -> &str;
}

/// Process-wide gateway, resolved once at startup.
#[derive(Clone)]
pub enum GatewayHandle {
    Configured(Arc<dyn PaymentLinkGateway>),
    Unconfigured { reason: String },
}

impl GatewayHandle {
    pub fn from_config(config: &PaylinkConfig) -> Self {
        match RazorpayGateway::from_config(config) {
            Ok(gateway) => {
                tracing::info!("{} client initialized", gateway.name());
                Self::Configured(Arc::new(gateway))
            }
            Err(e) => {
                tracing::warn!("Error initializing Razorpay client: {}", e);
                Self::Unconfigured {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }

    pub async fn create_payment_link(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentLinkResult, GatewayError> {
        match self {
            Self::Configured(gateway) => gateway.create_payment_link(request).await,
            Self::Unconfigured { reason } => {
                tracing::debug!("Rejecting payment link request, gateway unconfigured: {}", reason);
                Err(GatewayError::ClientNotConfigured)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PaymentRequest {
        PaymentRequest {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            contact: "+919999999999".to_string(),
            amount: 500.0,
            description: None,
            reference_id: Some("ref-1".to_string()),
            expire_by: None,
            callback_url: None,
        }
    }

    #[tokio::test]
    async fn unconfigured_handle_fails_fast() {
        let handle = GatewayHandle::Unconfigured {
            reason: "missing RAZORPAY_KEY_ID".to_string(),
        };

        let err = handle.create_payment_link(&request()).await.unwrap_err();
        assert!(matches!(err, GatewayError::ClientNotConfigured));
        assert_eq!(
            err.to_string(),
            "Razorpay client not initialized. Check your environment variables."
        );
    }

    #[test]
    fn missing_credentials_leave_handle_unconfigured() {
        let config = PaylinkConfig::from_lookup(|key| match key {
            "RAZORPAY_KEY_ID" => Some("rzp_test_key".to_string()),
            _ => None,
        });

        let handle = GatewayHandle::from_config(&config);
        assert!(!handle.is_configured());
        match handle {
            GatewayHandle::Unconfigured { reason } => assert!(reason.contains("RAZORPAY_SECRET")),
            GatewayHandle::Configured(_) => panic!("expected unconfigured handle"),
        }
    }

    #[test]
    fn credentials_produce_configured_handle() {
        let config = PaylinkConfig::from_lookup(|key| match key {
            "RAZORPAY_KEY_ID" => Some("rzp_test_key".to_string()),
            "RAZORPAY_SECRET" => Some("s3cret".to_string()),
            _ => None,
        });

        let handle = GatewayHandle::from_config(&config);
        match handle {
            GatewayHandle::Configured(gateway) => assert_eq!(gateway.name(), "razorpay"),
            GatewayHandle::Unconfigured { reason } => panic!("unexpected: {reason}"),
        }
    }
}
