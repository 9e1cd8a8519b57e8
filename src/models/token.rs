//! Token models - normalized credentials and decoded claims

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Canonical form of one raw credential line
///
/// Produced once per input line by the normalizer and immutable afterwards.
/// A record with only `raw` set means no branch recognized the input; that
/// is a legitimate outcome, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRecord {
    /// The raw input string, preserved verbatim
    pub raw: String,
    /// Username carried by the credential itself (prefix or claim payload)
    pub username: Option<String>,
    /// JWT-shaped session value, when one was recognized
    pub jwt_like: Option<String>,
    /// Cookie name/value pairs to present to the session endpoint
    pub cookies: HashMap<String, String>,
}

impl TokenRecord {
    /// Empty record preserving only the raw input
    pub fn from_raw(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            username: None,
            jwt_like: None,
            cookies: HashMap::new(),
        }
    }
}

/// Claim set decoded from the payload segment of a JWT-shaped value
///
/// The signature is never verified; these claims are advisory hints, not
/// security guarantees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// `sub` claim, kept only when it is exactly 17 decimal digits
    pub subject: Option<String>,
    /// `exp` claim (epoch seconds)
    pub expires_at: Option<i64>,
    /// `iat` claim (epoch seconds)
    pub issued_at: Option<i64>,
    /// Full decoded payload object
    pub raw_payload: serde_json::Map<String, serde_json::Value>,
}

/// Local judgment over a decoded claim set
///
/// Pure function of the claims and wall-clock time; never touches the
/// network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimCheck {
    /// Subject present and token not expired
    pub is_valid: bool,
    /// `exp` present and strictly in the past
    pub is_expired: bool,
    /// Human-readable reason when not valid
    pub error: Option<String>,
}
