//! Pipeline scenario tests
//!
//! Composes the public stages end to end (without the network) and checks
//! the status derivation table:
//! - cookie-format credential with live claims -> VALID
//! - same credential expired -> EXPIRED, identifier still resolved
//! - structureless credential -> status from the session probe alone

use crate::common::{dead_session, jwt_with_payload, live_session, STEAM_ID};
use chrono::Utc;
use serde_json::json;
use steam_sentinel::token::{decode, evaluate, normalize, resolve};
use steam_sentinel::{derive_status, AccountStatus, ClaimCheck};

#[test]
fn test_live_cookie_credential_is_valid() {
    let now = Utc::now().timestamp();
    let jwt = jwt_with_payload(&json!({ "sub": STEAM_ID, "exp": now + 3600 }));
    let raw = format!("steamLoginSecure={}; other=1", jwt);

    let record = normalize(&raw);
    let claims = decode(record.jwt_like.as_deref().unwrap()).unwrap();
    let check = evaluate(&claims, now);
    let steam_id = resolve(&record, Some(&claims));

    assert_eq!(steam_id.as_deref(), Some(STEAM_ID), "identifier populated");
    assert_eq!(
        derive_status(Some(&check), &live_session()),
        AccountStatus::Valid
    );
}

#[test]
fn test_expired_credential_keeps_identifier() {
    let now = Utc::now().timestamp();
    let jwt = jwt_with_payload(&json!({ "sub": STEAM_ID, "exp": now - 3600 }));
    let raw = format!("steamLoginSecure={}; other=1", jwt);

    let record = normalize(&raw);
    let claims = decode(record.jwt_like.as_deref().unwrap()).unwrap();
    let check = evaluate(&claims, now);

    // the identifier still resolves, so ban/profile lookups would still
    // run; only the classification changes
    assert_eq!(resolve(&record, Some(&claims)).as_deref(), Some(STEAM_ID));
    assert_eq!(
        derive_status(Some(&check), &live_session()),
        AccountStatus::Expired
    );
    assert_eq!(
        derive_status(Some(&check), &dead_session()),
        AccountStatus::Expired
    );
}

#[test]
fn test_structureless_credential_follows_session() {
    let record = normalize("no recognizable structure here");
    assert!(record.jwt_like.is_none());
    assert_eq!(resolve(&record, None), None);

    assert_eq!(derive_status(None, &live_session()), AccountStatus::Valid);
    assert_eq!(derive_status(None, &dead_session()), AccountStatus::Invalid);
}

#[test]
fn test_claims_without_subject_are_invalid_claim() {
    let now = Utc::now().timestamp();
    let jwt = jwt_with_payload(&json!({ "exp": now + 3600 }));
    let claims = decode(&jwt).unwrap();
    let check = evaluate(&claims, now);

    assert_eq!(
        derive_status(Some(&check), &live_session()),
        AccountStatus::InvalidClaim
    );
}

#[test]
fn test_valid_claims_dead_session_is_session_invalid() {
    let check = ClaimCheck {
        is_valid: true,
        is_expired: false,
        error: None,
    };
    assert_eq!(
        derive_status(Some(&check), &dead_session()),
        AccountStatus::SessionInvalid
    );
}

#[test]
fn test_derivation_is_total_and_deterministic() {
    for claims_present in [true, false] {
        for is_expired in [true, false] {
            for is_valid in [true, false] {
                for live in [true, false] {
                    let check = claims_present.then_some(ClaimCheck {
                        is_valid,
                        is_expired,
                        error: None,
                    });
                    let session = if live { live_session() } else { dead_session() };
                    let first = derive_status(check.as_ref(), &session);
                    let second = derive_status(check.as_ref(), &session);
                    assert_eq!(first, second);
                    assert_ne!(
                        first,
                        AccountStatus::Error,
                        "the table never produces Error"
                    );
                }
            }
        }
    }
}
