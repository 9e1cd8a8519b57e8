//! Shared helpers for the unit suites

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use steam_sentinel::ValidationOutcome;

/// A well-formed 17-digit identifier used across the suites
pub const STEAM_ID: &str = "76561198012345678";

/// Build a structurally valid JWT-shaped token around a JSON payload
pub fn jwt_with_payload(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"EdDSA","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
    format!("{}.{}.signature", header, body)
}

/// Session outcome for a delivered, marker-bearing account page
pub fn live_session() -> ValidationOutcome {
    ValidationOutcome {
        is_valid: true,
        status_code: 200,
        response_length: 4096,
        error: None,
    }
}

/// Session outcome for a delivered page without markers
pub fn dead_session() -> ValidationOutcome {
    ValidationOutcome {
        is_valid: false,
        status_code: 200,
        response_length: 4096,
        error: Some("no session markers in response".to_string()),
    }
}
