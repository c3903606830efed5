use serde::{Deserialize, Serialize};

/// Bodies served by the paylink HTTP API.
pub mod api {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct PaymentLinkResponse {
        pub payment_link: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ErrorResponse {
        pub error: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct HealthResponse {
        pub status: String,
        pub gateway: GatewayStatus,
        pub version: String,
    }

    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "snake_case")]
    pub enum GatewayStatus {
        Configured,
        Unconfigured,
    }
}

/// Razorpay payment link wire format (`POST /v1/payment_links`).
pub mod razorpay {
    use super::*;

    pub const CURRENCY_INR: &str = "INR";
    pub const CALLBACK_METHOD_GET: &str = "get";

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct PaymentLinkPayload {
        /// Amount in paise.
        pub amount: i64,
        pub currency: String,
        pub accept_partial: bool,
        pub description: String,
        pub customer: Customer,
        pub notify: Notify,
        pub reminder_enable: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub reference_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub expire_by: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub callback_url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub callback_method: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Customer {
        pub name: String,
        pub email: String,
        pub contact: String,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Notify {
        pub email: bool,
        pub sms: bool,
    }

    /// The subset of the payment link entity we read back.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct PaymentLink {
        pub id: String,
        pub short_url: String,
        #[serde(default)]
        pub status: Option<String>,
        #[serde(default)]
        pub reference_id: Option<String>,
    }

    // {"error": {"code": "BAD_REQUEST_ERROR", "description": "...", "field": "amount"}}
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ErrorEnvelope {
        pub error: ErrorBody,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ErrorBody {
        #[serde(default)]
        pub code: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub field: Option<String>,
    }
}
