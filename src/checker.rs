//! AccountChecker - per-credential pipeline and batch driver
//!
//! Ties the stages together: normalize -> decode claims -> judge claims ->
//! resolve identifier -> remote lookups -> status classification. One
//! credential at a time, in input order; a credential that fails to
//! evaluate becomes an `Error` record and the batch continues.

use crate::client::SteamClient;
use crate::config::CheckerConfig;
use crate::error::AppResult;
use crate::models::{
    AccountRecord, AccountStatus, BanInfo, ClaimCheck, ProfileInfo, TokenRecord,
    ValidationOutcome,
};
use crate::token::{self, claims, normalizer, resolver};
use chrono::Utc;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::sleep;

/// Derive the final status from claim and session signals
///
/// Pure and total: every combination maps to exactly one status.
pub fn derive_status(claim_check: Option<&ClaimCheck>, session: &ValidationOutcome) -> AccountStatus {
    match claim_check {
        Some(check) if check.is_expired => AccountStatus::Expired,
        Some(check) if !check.is_valid => AccountStatus::InvalidClaim,
        Some(_) if !session.is_valid => AccountStatus::SessionInvalid,
        Some(_) => AccountStatus::Valid,
        None if !session.is_valid => AccountStatus::Invalid,
        None => AccountStatus::Valid,
    }
}

/// Batch credential checker
pub struct AccountChecker {
    client: SteamClient,
    delay_between: Duration,
}

impl AccountChecker {
    pub fn new(client: SteamClient, checker: &CheckerConfig) -> Self {
        Self {
            client,
            delay_between: Duration::from_secs(checker.delay_between_requests_secs),
        }
    }

    /// Process a batch strictly sequentially, in input order
    ///
    /// Sleeps the configured throttle between credentials (not after the
    /// last). No per-credential failure aborts the batch.
    pub async fn process_batch(&self, tokens: &[String]) -> Vec<AccountRecord> {
        let total = tokens.len();
        let mut records = Vec::with_capacity(total);

        for (i, raw) in tokens.iter().enumerate() {
            let index = i + 1;
            tracing::info!(index, total, "Processing credential");

            let record = match self.check_one(index, raw).await {
                Ok(record) => record,
                Err(e) => {
                    tracing::error!(index, error = %e, "Credential failed to evaluate");
                    AccountRecord::evaluation_error(index)
                }
            };

            tracing::info!(
                index,
                status = %record.status,
                steam_id = record.steam_id.as_deref().unwrap_or("-"),
                "Credential classified"
            );
            records.push(record);

            if index < total {
                sleep(self.delay_between).await;
            }
        }

        records
    }

    /// Run the full pipeline for one credential
    async fn check_one(&self, index: usize, raw: &str) -> AppResult<AccountRecord> {
        let record = normalizer::normalize(raw);

        // Decode claims when a JWT-shaped value is present; decode failures
        // downgrade to "no claims", they are not errors.
        let decoded = record
            .jwt_like
            .as_deref()
            .and_then(|jwt| match claims::decode(jwt) {
                Ok(claims) => Some(claims),
                Err(e) => {
                    tracing::debug!(index, error = %e, "Claim decode failed");
                    None
                }
            });

        let claim_check = decoded
            .as_ref()
            .map(|c| claims::evaluate(c, Utc::now().timestamp()));
        if let Some(check) = &claim_check {
            if let Some(error) = &check.error {
                tracing::debug!(index, error = %error, "Claim judgment");
            }
        }

        let steam_id = resolver::resolve(&record, decoded.as_ref());

        // Expiry display favors validated claims, then the session cookie
        let expires_at = decoded
            .as_ref()
            .and_then(|c| c.expires_at)
            .or_else(|| expiration_from_cookies(&record.cookies));

        let session = self.client.check_session(&record.cookies).await?;
        if let Some(error) = &session.error {
            tracing::warn!(index, error = %error, "Session probe not live");
        }

        // Ban and profile lookups run whenever an identifier resolved,
        // even for expired claims; only the status differs.
        let (profile, bans) = match steam_id.as_deref() {
            Some(id) => (
                self.client.fetch_profile(id).await,
                self.client.fetch_bans(id).await,
            ),
            None => {
                tracing::debug!(index, "No identifier; ban and profile checks skipped");
                (ProfileInfo::default(), BanInfo::no_steamid())
            }
        };

        let status = derive_status(claim_check.as_ref(), &session);
        let username = display_username(&profile, &record);

        Ok(AccountRecord {
            index,
            status,
            steam_id,
            username,
            real_name: profile.real_name.clone(),
            claim_valid: claim_check.as_ref().map(|c| c.is_valid),
            claim_expired: claim_check.as_ref().map(|c| c.is_expired),
            expires_at,
            profile,
            bans,
            session,
            evaluation_failed: false,
            checked_at: Utc::now(),
        })
    }
}

/// Profile username first, token-supplied name when the profile is a default
fn display_username(profile: &ProfileInfo, record: &TokenRecord) -> String {
    if profile.username == "Unknown" || profile.username == "Error" {
        if let Some(from_token) = &record.username {
            return from_token.clone();
        }
    }
    profile.username.clone()
}

/// Expiry recovered directly from the session cookie's claim payload
fn expiration_from_cookies(cookies: &HashMap<String, String>) -> Option<i64> {
    cookies
        .get(token::SESSION_COOKIE)
        .and_then(|jwt| claims::decode(jwt).ok())
        .and_then(|c| c.expires_at)
}
