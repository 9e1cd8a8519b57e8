//! StatisticsAggregator - summary counts over a finished batch
//!
//! Pure reduction over the full record list; recomputed from scratch on
//! every call, never maintained incrementally.

use crate::models::{AccountRecord, AccountStatus};
use serde::{Deserialize, Serialize};

/// Economy statuses that do NOT count as banned: clean answers and the
/// documented sentinels for "no data", "skipped" and "failed"
const ECONOMY_ALLOW_LIST: &[&str] = &["none", "no_data", "error", "invalid_id", "no_steamid"];

/// Summary counts for one batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub expired: usize,
    pub claim_valid: usize,
    pub vac_banned: usize,
    pub community_banned: usize,
    pub economy_banned: usize,
}

impl Statistics {
    /// Reduce the full record list into summary counts
    pub fn compute(records: &[AccountRecord]) -> Self {
        let mut stats = Self {
            total: records.len(),
            ..Self::default()
        };

        for record in records {
            match record.status {
                AccountStatus::Valid => stats.valid += 1,
                AccountStatus::Expired => stats.expired += 1,
                _ => stats.invalid += 1,
            }

            if record.claim_valid == Some(true) {
                stats.claim_valid += 1;
            }
            if record.bans.vac_banned {
                stats.vac_banned += 1;
            }
            if record.bans.community_banned {
                stats.community_banned += 1;
            }
            if is_economy_banned(&record.bans.economy_ban_status) {
                stats.economy_banned += 1;
            }
        }

        stats
    }
}

/// Any status outside the allow-list counts as an economy ban
fn is_economy_banned(status: &str) -> bool {
    let status = status.trim().to_lowercase();
    !status.is_empty() && !ECONOMY_ALLOW_LIST.contains(&status.as_str())
}
