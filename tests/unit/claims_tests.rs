//! ClaimDecoder unit tests
//!
//! Tests the unverified payload decode and the local claim judgment:
//! - segment-count and encoding failures
//! - subject shape gate
//! - strict expiry boundary

use crate::common::{jwt_with_payload, STEAM_ID};
use chrono::Utc;
use serde_json::json;
use steam_sentinel::token::{decode, evaluate, DecodeError};

#[test]
fn test_malformed_structure_for_any_other_segment_count() {
    for input in ["", "single", "two.segments", "four.seg.men.ts", "a.b.c.d"] {
        match decode(input) {
            Err(DecodeError::MalformedStructure) => {}
            other => panic!("{:?} should be MalformedStructure, got {:?}", input, other),
        }
    }
}

#[test]
fn test_wrong_padding_is_invalid_encoding() {
    // a 1-char segment can never be padded into valid base64url
    assert_eq!(decode("h.x.s").unwrap_err(), DecodeError::InvalidEncoding);
}

#[test]
fn test_round_trip_synthetic_claims() {
    let now = Utc::now().timestamp();
    let jwt = jwt_with_payload(&json!({
        "sub": STEAM_ID,
        "exp": now + 7200,
        "iat": now,
    }));

    let claims = decode(&jwt).expect("synthetic token must decode");
    assert_eq!(claims.subject.as_deref(), Some(STEAM_ID));
    assert_eq!(claims.expires_at, Some(now + 7200));

    let check = evaluate(&claims, now);
    assert!(check.is_valid);
    assert!(!check.is_expired);
    assert!(check.error.is_none());
}

#[test]
fn test_expired_one_hour_ago() {
    let now = Utc::now().timestamp();
    let jwt = jwt_with_payload(&json!({ "sub": STEAM_ID, "exp": now - 3600 }));
    let claims = decode(&jwt).unwrap();
    let check = evaluate(&claims, now);
    assert!(check.is_expired);
    assert!(!check.is_valid);
    assert_eq!(check.error.as_deref(), Some("token has expired"));
}

#[test]
fn test_expiry_equality_is_not_expired() {
    let now = 1_800_000_000;
    let jwt = jwt_with_payload(&json!({ "sub": STEAM_ID, "exp": now }));
    let claims = decode(&jwt).unwrap();
    assert!(!evaluate(&claims, now).is_expired);

    let jwt = jwt_with_payload(&json!({ "sub": STEAM_ID, "exp": now - 1 }));
    let claims = decode(&jwt).unwrap();
    assert!(evaluate(&claims, now).is_expired);
}

#[test]
fn test_short_subject_left_empty_without_error() {
    let jwt = jwt_with_payload(&json!({ "sub": "42", "exp": 9_999_999_999i64 }));
    let claims = decode(&jwt).expect("shape failures are not decode errors");
    assert!(claims.subject.is_none());

    let check = evaluate(&claims, 1_700_000_000);
    assert!(!check.is_valid);
    assert_eq!(
        check.error.as_deref(),
        Some("no valid identifier found in claims")
    );
}

#[test]
fn test_payload_survives_in_raw_form() {
    let jwt = jwt_with_payload(&json!({ "sub": STEAM_ID, "aud": "web", "jti": "abc" }));
    let claims = decode(&jwt).unwrap();
    assert_eq!(claims.raw_payload.get("aud").and_then(|v| v.as_str()), Some("web"));
    assert_eq!(claims.raw_payload.get("jti").and_then(|v| v.as_str()), Some("abc"));
}
