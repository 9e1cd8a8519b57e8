//! IdentifierResolver unit tests
//!
//! Tests the ordered strategy chain:
//! - claims subject outranks everything
//! - legacy || export prefixes
//! - embedded JWT payloads
//! - the percent-decoded 17-digit scan

use crate::common::{jwt_with_payload, STEAM_ID};
use serde_json::json;
use steam_sentinel::token::{normalize, resolve};
use steam_sentinel::Claims;

fn validated_claims(subject: &str) -> Claims {
    Claims {
        subject: Some(subject.to_string()),
        expires_at: None,
        issued_at: None,
        raw_payload: serde_json::Map::new(),
    }
}

#[test]
fn test_scan_recognizes_id_in_arbitrary_text() {
    // property from the identifier scan: any 17-digit run embedded in
    // prefix/suffix text is found
    for raw in [
        format!("{}", STEAM_ID),
        format!("xx{}yy", STEAM_ID),
        format!("a b c {} d", STEAM_ID),
        format!("--{}--", STEAM_ID),
    ] {
        let record = normalize(&raw);
        assert_eq!(
            resolve(&record, None).as_deref(),
            Some(STEAM_ID),
            "scan must find the identifier in {:?}",
            raw
        );
    }
}

#[test]
fn test_claims_subject_outranks_raw_content() {
    let other = "76561198087654321";
    let record = normalize(&format!("{}||rest", STEAM_ID));
    let claims = validated_claims(other);
    assert_eq!(resolve(&record, Some(&claims)).as_deref(), Some(other));
}

#[test]
fn test_legacy_prefix_before_digit_scan() {
    let raw = format!("{}||trailer-76561198087654321", STEAM_ID);
    let record = normalize(&raw);
    assert_eq!(resolve(&record, None).as_deref(), Some(STEAM_ID));
}

#[test]
fn test_embedded_jwt_in_cookie_value() {
    let jwt = jwt_with_payload(&json!({ "sub": STEAM_ID }));
    // two extra dots keep the whole line out of the bare-JWT branch
    let record = normalize(&format!("a=x.y; session={}", jwt));
    assert_eq!(resolve(&record, None).as_deref(), Some(STEAM_ID));
}

#[test]
fn test_legacy_steamid_claim_field() {
    let jwt = jwt_with_payload(&json!({ "steamid": STEAM_ID }));
    let record = normalize(&jwt);
    assert_eq!(resolve(&record, None).as_deref(), Some(STEAM_ID));
}

#[test]
fn test_percent_encoded_cookie_value() {
    let raw = format!("steamLoginSecure={}%7C%7Cabcdef", STEAM_ID);
    let record = normalize(&raw);
    assert_eq!(resolve(&record, None).as_deref(), Some(STEAM_ID));
}

#[test]
fn test_absent_identifier_is_terminal_not_error() {
    let record = normalize("sessionid=abc; lang=en");
    assert_eq!(resolve(&record, None), None);
}

#[test]
fn test_sixteen_digits_do_not_resolve() {
    let record = normalize("id=7656119801234567");
    assert_eq!(resolve(&record, None), None);
}
