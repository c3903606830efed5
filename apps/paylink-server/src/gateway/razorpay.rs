use super::{GatewayError, PaymentLinkGateway, PaymentLinkResult, PaymentRequest};
use crate::config::PaylinkConfig;
use async_trait::async_trait;
use paylink_shared::razorpay::{
    CALLBACK_METHOD_GET, CURRENCY_INR, Customer, ErrorEnvelope, Notify, PaymentLink,
    PaymentLinkPayload,
};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_DESCRIPTION: &str = "Payment";

#[derive(Debug, Error)]
pub enum ClientSetupError {
    #[error("{0} is not set")]
    MissingCredential(&'static str),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

pub struct RazorpayGateway {
    client: Client,
    api_base: String,
    key_id: String,
    secret: String,
}

impl RazorpayGateway {
    pub fn new(
        key_id: String,
        secret: String,
        api_base: String,
        user_agent: String,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientSetupError> {
        if key_id.trim().is_empty() {
            return Err(ClientSetupError::MissingCredential("RAZORPAY_KEY_ID"));
        }
        if secret.trim().is_empty() {
            return Err(ClientSetupError::MissingCredential("RAZORPAY_SECRET"));
        }

        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_base: api_base.trim_end_matches('/').to_string(),
            key_id,
            secret,
        })
    }

    pub fn from_config(config: &PaylinkConfig) -> Result<Self, ClientSetupError> {
        let key_id = config
            .razorpay_key_id
            .clone()
            .ok_or(ClientSetupError::MissingCredential("RAZORPAY_KEY_ID"))?;
        let secret = config
            .razorpay_secret
            .clone()
            .ok_or(ClientSetupError::MissingCredential("RAZORPAY_SECRET"))?;

        // App details travel in the User-Agent, next to our own identifier.
        let user_agent = format!(
            "paylink/{} {}/{}",
            env!("CARGO_PKG_VERSION"),
            config.app_title,
            config.app_version
        );

        Self::new(
            key_id,
            secret,
            config.razorpay_api_base.clone(),
            user_agent,
            config.razorpay_timeout_secs.map(Duration::from_secs),
        )
    }
}

/// Rupees to paise, truncating toward zero.
pub fn to_paise(amount: f64) -> Result<i64, GatewayError> {
    if !amount.is_finite() {
        return Err(GatewayError::InvalidAmount(amount));
    }
    let paise = (amount * 100.0).trunc();
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
    if paise < i64::MIN as f64 || paise >= i64::MAX as f64 {
        return Err(GatewayError::InvalidAmount(amount));
    }
    Ok(paise as i64)
}

pub fn build_payload(request: &PaymentRequest) -> Result<PaymentLinkPayload, GatewayError> {
    let non_empty = |v: &Option<String>| v.as_ref().filter(|s| !s.is_empty()).cloned();

    let callback_url = non_empty(&request.callback_url);
    let callback_method = callback_url
        .as_ref()
        .map(|_| CALLBACK_METHOD_GET.to_string());

    Ok(PaymentLinkPayload {
        amount: to_paise(request.amount)?,
        currency: CURRENCY_INR.to_string(),
        accept_partial: false,
        description: non_empty(&request.description)
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        customer: Customer {
            name: request.name.clone(),
            email: request.email.clone(),
            contact: request.contact.clone(),
        },
        notify: Notify {
            email: true,
            sms: false,
        },
        reminder_enable: true,
        reference_id: non_empty(&request.reference_id),
        expire_by: request.expire_by.filter(|ts| *ts != 0),
        callback_url,
        callback_method,
    })
}

fn provider_error(status: StatusCode, body: &str) -> GatewayError {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok();
    let code = parsed.as_ref().and_then(|e| e.error.code.clone());
    let field = parsed.as_ref().and_then(|e| e.error.field.clone());
    let message = parsed
        .and_then(|e| e.error.description)
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| format!("Razorpay request failed with status {}", status));

    GatewayError::Provider {
        status: status.as_u16(),
        code,
        field,
        message,
    }
}

#[async_trait]
impl PaymentLinkGateway for RazorpayGateway {
    async fn create_payment_link(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentLinkResult, GatewayError> {
        let payload = build_payload(request)?;
        let url = format!("{}/payment_links", self.api_base);

        tracing::debug!(
            "Creating Razorpay payment link: amount={} paise, reference_id={:?}",
            payload.amount,
            payload.reference_id
        );

        let resp = self
            .client
            .post(&url)
            .basic_auth(&self.key_id, Some(&self.secret))
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(provider_error(status, &body));
        }

        let link: PaymentLink = serde_json::from_str(&body)
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        tracing::debug!(
            "Razorpay payment link {} status={:?} reference_id={:?}",
            link.id,
            link.status,
            link.reference_id
        );

        Ok(PaymentLinkResult {
            short_url: link.short_url,
            link_id: link.id,
        })
    }

    fn name(&self) -> &str {
        "razorpay"
    }
}
