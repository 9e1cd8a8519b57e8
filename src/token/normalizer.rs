//! TokenNormalizer - parses raw credential strings into canonical records
//!
//! Accepted formats, first match wins, no backtracking:
//! 1. `username----JWT` legacy export pairs
//! 2. Cookie strings containing `steamLoginSecure=...`
//! 3. Bare JWT-shaped values (exactly two dots)
//! 4. Generic `key=value; key=value` cookie lines

use crate::models::TokenRecord;
use crate::token::{claims, SESSION_COOKIE};
use std::collections::HashMap;

/// Parse one raw credential line into a `TokenRecord`
///
/// A branch that fails to produce a value falls through to the next; a
/// fully failed parse yields a record with only `raw` preserved. Neither
/// is an error at this layer.
pub fn normalize(raw: &str) -> TokenRecord {
    let mut record = TokenRecord::from_raw(raw);

    // Branch 1: username----JWT export pairs
    if let Some((username, jwt)) = raw.split_once("----") {
        let username = username.trim();
        let jwt = jwt.trim();
        if !username.is_empty() {
            record.username = Some(username.to_string());
        }
        record.jwt_like = Some(jwt.to_string());
        record
            .cookies
            .insert(SESSION_COOKIE.to_string(), jwt.to_string());
        return record;
    }

    // Branch 2: session cookie embedded in a cookie string
    if let Some(value) = extract_session_cookie(raw) {
        record.username = username_from_jwt(&value);
        record
            .cookies
            .insert(SESSION_COOKIE.to_string(), value.clone());
        record.jwt_like = Some(value);
        return record;
    }

    // Branch 3: bare JWT-shaped value
    if raw.matches('.').count() == 2 {
        let jwt = raw.trim().to_string();
        record.username = username_from_jwt(&jwt);
        record
            .cookies
            .insert(SESSION_COOKIE.to_string(), jwt.clone());
        record.jwt_like = Some(jwt);
        return record;
    }

    // Branch 4: generic cookie line
    record.cookies = parse_cookie_line(raw);
    record
}

/// Value of the canonical session cookie, up to the next `;` or end
fn extract_session_cookie(raw: &str) -> Option<String> {
    let marker = format!("{}=", SESSION_COOKIE);
    let start = raw.find(&marker)? + marker.len();
    let rest = &raw[start..];
    let value = match rest.find(';') {
        Some(end) => &rest[..end],
        None => rest,
    };
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parse a `;`-separated cookie line into a map
///
/// Pairs without `=` are skipped; keys and values are trimmed.
pub fn parse_cookie_line(line: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    for part in line.split(';') {
        if let Some((key, value)) = part.split_once('=') {
            let key = key.trim();
            if !key.is_empty() {
                cookies.insert(key.to_string(), value.trim().to_string());
            }
        }
    }
    cookies
}

fn username_from_jwt(jwt: &str) -> Option<String> {
    claims::decode(jwt)
        .ok()
        .and_then(|c| claims::username_from_payload(&c))
}
