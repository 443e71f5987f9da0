//! JWT claim decoding
//!
//! Only the payload is read; the signature is the server's business.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::ApiError;

/// Decode the `exp` claim of a JWT into a UTC timestamp
pub fn decode_expiry(token: &str) -> Result<DateTime<Utc>, ApiError> {
    // JWT format: header.payload.signature
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(ApiError::InvalidToken);
    }

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|_| ApiError::InvalidToken)?;

    let payload: Value =
        serde_json::from_slice(&payload_bytes).map_err(|_| ApiError::InvalidToken)?;

    let exp = match payload.get("exp") {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or(ApiError::InvalidToken)?,
        _ => return Err(ApiError::InvalidToken),
    };

    DateTime::from_timestamp(exp, 0).ok_or(ApiError::InvalidToken)
}

/// Build an unsigned token carrying the given claims
#[cfg(test)]
pub fn encode_unsigned(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.sig", header, payload)
}
