use crate::AppState;
use crate::error::ApiError;
use crate::gateway::PaymentRequest;
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use paylink_shared::api::PaymentLinkResponse;
use serde_json::{Map, Value};
use tracing::{info, warn};

const REQUIRED_FIELDS: [&str; 5] = ["name", "email", "contact", "amount", "reference_id"];

/// POST /create-payment-link
pub async fn create_payment_link(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PaymentLinkResponse>, ApiError> {
    let Json(data) = body.map_err(|e| {
        warn!("Rejected payment link body: {}", e);
        ApiError::InvalidJson
    })?;

    // Only key presence is checked; empty strings pass.
    let fields = required_fields(&data).ok_or(ApiError::MissingFields)?;

    let request = PaymentRequest {
        name: field_text(&fields["name"]),
        email: field_text(&fields["email"]),
        contact: field_text(&fields["contact"]),
        amount: coerce_amount(&fields["amount"])?,
        description: Some(state.config.link_description.clone()),
        reference_id: Some(field_text(&fields["reference_id"])),
        expire_by: None,
        callback_url: None,
    };

    let link = state.gateway.create_payment_link(&request).await?;
    info!(
        "Created payment link {} (reference_id={:?})",
        link.link_id, request.reference_id
    );

    Ok(Json(PaymentLinkResponse {
        payment_link: link.short_url,
    }))
}

fn required_fields(data: &Value) -> Option<&Map<String, Value>> {
    data.as_object()
        .filter(|obj| REQUIRED_FIELDS.iter().all(|field| obj.contains_key(*field)))
}

// Customer fields are typed as strings on the wire, so non-string JSON is
// flattened here: numbers and booleans keep their JSON text, null becomes "".
fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// Same inputs a float() cast accepts: numbers, booleans as 1/0, and numeric
// strings with surrounding whitespace or digit-separating underscores.
fn coerce_amount(value: &Value) -> Result<f64, ApiError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| ApiError::Coercion(n.to_string())),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => parse_amount(s).ok_or_else(|| ApiError::Coercion(s.clone())),
        other => Err(ApiError::Coercion(other.to_string())),
    }
}

fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let chars: Vec<char> = trimmed.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if *c != '_' {
            continue;
        }
        let between_digits = i > 0
            && chars[i - 1].is_ascii_digit()
            && chars.get(i + 1).is_some_and(|next| next.is_ascii_digit());
        if !between_digits {
            return None;
        }
    }

    trimmed.replace('_', "").parse::<f64>().ok()
}
