//! IdentifierResolver - ordered strategy chain over token + claims
//!
//! Each strategy is a pure function; the chain short-circuits on the first
//! match, strongest provenance first. Strategies never reconcile: once one
//! matches, later ones are not consulted even if they would disagree.

use crate::models::{Claims, TokenRecord};
use crate::token::{claims, is_valid_identifier};
use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{17}").expect("identifier pattern must compile"));

type Strategy = fn(&TokenRecord, Option<&Claims>) -> Option<String>;

/// Ordered resolution chain, strongest provenance first
const STRATEGIES: &[(&str, Strategy)] = &[
    ("claims_subject", from_claims_subject),
    ("legacy_prefix", from_legacy_prefix),
    ("embedded_jwt", from_embedded_jwt),
    ("digit_scan", from_digit_scan),
];

/// Resolve the canonical 17-digit identifier, or none
///
/// Returning `None` is a valid terminal state: downstream skips ban and
/// profile lookups and derives status from the remaining signals.
pub fn resolve(record: &TokenRecord, validated: Option<&Claims>) -> Option<String> {
    for (name, strategy) in STRATEGIES {
        if let Some(id) = strategy(record, validated) {
            tracing::debug!(strategy = name, steam_id = %id, "Identifier resolved");
            return Some(id);
        }
    }
    None
}

/// Strategy 1: subject of already-validated claims
fn from_claims_subject(_record: &TokenRecord, validated: Option<&Claims>) -> Option<String> {
    validated
        .and_then(|c| c.subject.clone())
        .filter(|s| is_valid_identifier(s))
}

/// Strategy 2: `||`-delimited legacy export prefix
fn from_legacy_prefix(record: &TokenRecord, _validated: Option<&Claims>) -> Option<String> {
    let decoded = percent_decode(&record.raw);
    let (prefix, _) = decoded.split_once("||")?;
    if is_valid_identifier(prefix) {
        Some(prefix.to_string())
    } else {
        None
    }
}

/// Strategy 3: decode any JWT-shaped value in the token or its cookies
fn from_embedded_jwt(record: &TokenRecord, _validated: Option<&Claims>) -> Option<String> {
    let candidates = record
        .jwt_like
        .iter()
        .chain(std::iter::once(&record.raw))
        .chain(record.cookies.values());

    for candidate in candidates {
        if let Ok(decoded) = claims::decode(candidate) {
            let id = decoded.subject.clone().or_else(|| {
                decoded
                    .raw_payload
                    .get("steamid")
                    .and_then(|v| match v {
                        serde_json::Value::String(s) => Some(s.clone()),
                        serde_json::Value::Number(n) => Some(n.to_string()),
                        _ => None,
                    })
                    .filter(|s| is_valid_identifier(s))
            });
            if id.is_some() {
                return id;
            }
        }
    }
    None
}

/// Strategy 4: first 17-digit run anywhere in the percent-decoded raw string
fn from_digit_scan(record: &TokenRecord, _validated: Option<&Claims>) -> Option<String> {
    let decoded = percent_decode(&record.raw);
    IDENTIFIER_RUN
        .find(&decoded)
        .map(|m| m.as_str().to_string())
}

/// Minimal percent-decoding for cookie-encoded tokens
///
/// Malformed escapes pass through untouched; non-UTF8 octets are replaced,
/// which cannot corrupt a digit run.
fn percent_decode(input: &str) -> String {
    if !input.contains('%') {
        return input.to_string();
    }
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).unwrap_or("");
            if let Ok(byte) = u8::from_str_radix(hex, 16) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
