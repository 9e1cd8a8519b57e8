//! ClaimDecoder - unverified decode of the JWT payload segment
//!
//! The signature segment is accepted but never verified: there is no trust
//! anchor for these tokens, so decoded claims are advisory only. The local
//! claim judgment (`evaluate`) is a pure function of the claims and the
//! clock.

use crate::models::{ClaimCheck, Claims};
use crate::token::is_valid_identifier;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use thiserror::Error;

/// Decode failures, one variant per pipeline stage
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Not exactly three dot-delimited segments
    #[error("not a three-segment token")]
    MalformedStructure,
    /// Payload segment is not valid base64url
    #[error("payload segment is not base64url")]
    InvalidEncoding,
    /// Decoded payload is not a UTF-8 JSON object
    #[error("payload is not a JSON object")]
    InvalidPayload,
}

/// Decode the middle segment of a JWT-shaped value into a claim set
///
/// `sub` is accepted as the subject only when its string form is exactly
/// 17 decimal digits; any other shape leaves the subject empty without
/// failing the decode.
pub fn decode(jwt: &str) -> Result<Claims, DecodeError> {
    let segments: Vec<&str> = jwt.split('.').collect();
    if segments.len() != 3 {
        return Err(DecodeError::MalformedStructure);
    }

    let mut payload = segments[1].to_string();
    // base64url wants the length padded to a multiple of 4
    let remainder = payload.len() % 4;
    if remainder != 0 {
        payload.push_str(&"=".repeat(4 - remainder));
    }

    let bytes = URL_SAFE
        .decode(payload.as_bytes())
        .map_err(|_| DecodeError::InvalidEncoding)?;

    let value: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|_| DecodeError::InvalidPayload)?;
    let raw_payload = match value {
        serde_json::Value::Object(map) => map,
        _ => return Err(DecodeError::InvalidPayload),
    };

    let subject = raw_payload
        .get("sub")
        .and_then(claim_as_string)
        .filter(|s| is_valid_identifier(s));
    let expires_at = raw_payload.get("exp").and_then(claim_as_epoch);
    let issued_at = raw_payload.get("iat").and_then(claim_as_epoch);

    Ok(Claims {
        subject,
        expires_at,
        issued_at,
        raw_payload,
    })
}

/// Judge a decoded claim set against the clock
///
/// Expiry is strict: `exp == now` is NOT expired, `exp < now` is.
pub fn evaluate(claims: &Claims, now: i64) -> ClaimCheck {
    let is_expired = claims.expires_at.is_some_and(|exp| exp < now);
    let is_valid = claims.subject.is_some() && !is_expired;

    let error = if is_expired {
        Some("token has expired".to_string())
    } else if claims.subject.is_none() {
        Some("no valid identifier found in claims".to_string())
    } else {
        None
    };

    ClaimCheck {
        is_valid,
        is_expired,
        error,
    }
}

/// Pull a username-like field out of a claim payload
///
/// Legacy exports put the persona name under several different keys.
pub fn username_from_payload(claims: &Claims) -> Option<String> {
    for field in ["username", "name", "persona", "personaname"] {
        if let Some(value) = claims.raw_payload.get(field).and_then(claim_as_string) {
            return Some(value);
        }
    }
    None
}

fn claim_as_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn claim_as_epoch(value: &serde_json::Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .filter(|&ts| ts > 0)
}

/// Build a structurally valid token around an arbitrary JSON payload
#[cfg(test)]
pub(crate) fn synthetic_token(payload: &serde_json::Value) -> String {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"EdDSA","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
    format!("{}.{}.sig", header, body)
}
