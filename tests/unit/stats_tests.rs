//! StatisticsAggregator unit tests
//!
//! Tests the pure reduction over finished records:
//! - status bucketing
//! - economy-ban allow-list
//! - stability under recomputation

use crate::common::{dead_session, live_session};
use chrono::Utc;
use steam_sentinel::{AccountRecord, AccountStatus, BanInfo, ProfileInfo, Statistics};

fn record(status: AccountStatus, economy: &str) -> AccountRecord {
    let session = if status == AccountStatus::Valid {
        live_session()
    } else {
        dead_session()
    };
    AccountRecord {
        index: 0,
        status,
        steam_id: Some("76561198012345678".to_string()),
        username: "u".to_string(),
        real_name: String::new(),
        claim_valid: Some(status == AccountStatus::Valid),
        claim_expired: Some(status == AccountStatus::Expired),
        expires_at: None,
        profile: ProfileInfo::default(),
        bans: BanInfo {
            vac_banned: false,
            community_banned: false,
            economy_ban_status: economy.to_string(),
            vac_ban_count: 0,
            days_since_last_ban: 0,
            game_ban_count: 0,
            steam_id: String::new(),
        },
        session,
        evaluation_failed: false,
        checked_at: Utc::now(),
    }
}

#[test]
fn test_every_status_lands_in_one_bucket() {
    let records = vec![
        record(AccountStatus::Valid, "none"),
        record(AccountStatus::Expired, "none"),
        record(AccountStatus::InvalidClaim, "none"),
        record(AccountStatus::SessionInvalid, "none"),
        record(AccountStatus::Invalid, "none"),
        record(AccountStatus::Error, "error"),
    ];
    let stats = Statistics::compute(&records);
    assert_eq!(stats.total, 6);
    assert_eq!(stats.valid + stats.invalid + stats.expired, 6);
    assert_eq!(stats.valid, 1);
    assert_eq!(stats.expired, 1);
    assert_eq!(stats.invalid, 4);
}

#[test]
fn test_economy_allow_list() {
    let records = vec![
        record(AccountStatus::Valid, "none"),
        record(AccountStatus::Valid, "no_data"),
        record(AccountStatus::Valid, "error"),
        record(AccountStatus::Valid, "invalid_id"),
        record(AccountStatus::Valid, "no_steamid"),
        record(AccountStatus::Valid, "probation"),
        record(AccountStatus::Valid, "banned"),
    ];
    let stats = Statistics::compute(&records);
    assert_eq!(stats.economy_banned, 2, "only real statuses count as bans");
}

#[test]
fn test_economy_ban_counted_for_any_status() {
    // an economy ban counts regardless of the record's own status
    let records = vec![
        record(AccountStatus::Expired, "banned"),
        record(AccountStatus::Invalid, "banned"),
    ];
    let stats = Statistics::compute(&records);
    assert_eq!(stats.economy_banned, 2);
}

#[test]
fn test_empty_batch() {
    let stats = Statistics::compute(&[]);
    assert_eq!(stats.total, 0);
    assert_eq!(stats.valid, 0);
    assert_eq!(stats.economy_banned, 0);
}

#[test]
fn test_claim_valid_counts_only_true() {
    let mut no_claims = record(AccountStatus::Valid, "none");
    no_claims.claim_valid = None;
    let records = vec![
        record(AccountStatus::Valid, "none"), // claim_valid = Some(true)
        record(AccountStatus::Invalid, "none"), // Some(false)
        no_claims,
    ];
    let stats = Statistics::compute(&records);
    assert_eq!(stats.claim_valid, 1);
}
