//! SteamClient - remote validation against Steam's endpoints
//!
//! Three independent lookups share one HTTP client and one retry policy:
//! session liveness (store account page), player summary, player bans.
//! Each degrades to a documented sentinel when retries are exhausted; no
//! remote failure ever propagates out of this module.

use crate::config::{CheckerConfig, SteamConfig};
use crate::error::{AppError, AppResult};
use crate::models::{BanInfo, ProfileInfo, ValidationOutcome};
use crate::retry::{with_retries, with_retries_err, RetryPolicy};
use crate::token::is_valid_identifier;
use anyhow::Context;
use reqwest::header::{HeaderValue, COOKIE, USER_AGENT};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Browser-like user agent; the store serves a login redirect to bare clients
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Substrings whose presence marks a logged-in account page
const SESSION_MARKERS: &[&str] = &["logout", "account settings", "welcome", "profile", "dashboard"];

/// Minimum body length for a syntactically successful account page
const MIN_RESPONSE_LENGTH: usize = 1000;

/// Client for the three remote validation lookups
pub struct SteamClient {
    http: reqwest::Client,
    api_key: String,
    api_base_url: String,
    session_check_url: String,
    retry: RetryPolicy,
}

#[derive(Debug, Deserialize)]
struct PlayerSummariesEnvelope {
    response: PlayerSummariesBody,
}

#[derive(Debug, Deserialize)]
struct PlayerSummariesBody {
    #[serde(default)]
    players: Vec<PlayerSummary>,
}

#[derive(Debug, Deserialize)]
struct PlayerSummary {
    #[serde(default)]
    personaname: Option<String>,
    #[serde(default)]
    realname: Option<String>,
    #[serde(default)]
    avatar: Option<String>,
    #[serde(default)]
    profileurl: Option<String>,
    #[serde(default)]
    timecreated: Option<i64>,
    #[serde(default)]
    lastlogoff: Option<i64>,
    #[serde(default)]
    personastate: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct PlayerBansEnvelope {
    #[serde(default)]
    players: Vec<PlayerBans>,
}

#[derive(Debug, Deserialize)]
struct PlayerBans {
    #[serde(rename = "SteamId", default)]
    steam_id: Option<String>,
    #[serde(rename = "VACBanned", default)]
    vac_banned: bool,
    #[serde(rename = "CommunityBanned", default)]
    community_banned: bool,
    #[serde(rename = "EconomyBan", default)]
    economy_ban: Option<String>,
    #[serde(rename = "NumberOfVACBans", default)]
    number_of_vac_bans: i64,
    #[serde(rename = "DaysSinceLastBan", default)]
    days_since_last_ban: i64,
    #[serde(rename = "NumberOfGameBans", default)]
    number_of_game_bans: i64,
}

impl SteamClient {
    /// Build the client from config; one connection pool for the whole run
    pub fn new(steam: &SteamConfig, checker: &CheckerConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(checker.request_timeout_secs))
            .build()
            .map_err(AppError::Http)?;

        Ok(Self {
            http,
            api_key: steam.api_key.clone(),
            api_base_url: steam.api_base_url.trim_end_matches('/').to_string(),
            session_check_url: steam.session_check_url.clone(),
            retry: RetryPolicy::new(
                checker.max_retries,
                Duration::from_millis(checker.retry_delay_ms),
            ),
        })
    }

    /// Probe session liveness with the credential's cookies
    ///
    /// The Cookie header is rebuilt from the map on every attempt, so no
    /// cookie state leaks between credentials. A delivered response always
    /// resolves the probe (no retry); only transport failures retry. A
    /// cookie value that cannot form a header is a record-level error.
    pub async fn check_session(
        &self,
        cookies: &HashMap<String, String>,
    ) -> AppResult<ValidationOutcome> {
        let cookie_header = build_cookie_header(cookies)?;

        let outcome = with_retries_err(self.retry, "session_check", || {
            let cookie_header = cookie_header.clone();
            async move {
                let response = self
                    .http
                    .get(&self.session_check_url)
                    .header(USER_AGENT, BROWSER_USER_AGENT)
                    .header(COOKIE, cookie_header)
                    .send()
                    .await
                    .context("session probe failed")?;

                let status = response.status().as_u16();
                let body = response.text().await.context("session body unreadable")?;
                Ok(judge_session_response(status, &body))
            }
        })
        .await;

        match outcome {
            Ok(outcome) => Ok(outcome),
            Err(e) => Ok(ValidationOutcome::exhausted(e.to_string())),
        }
    }

    /// Fetch the public profile for an identifier
    ///
    /// An empty player list exhausts retries exactly like a transport
    /// failure before degrading to the documented defaults.
    pub async fn fetch_profile(&self, steam_id: &str) -> ProfileInfo {
        let url = format!(
            "{}/ISteamUser/GetPlayerSummaries/v2/",
            self.api_base_url
        );

        let fetched = with_retries(self.retry, "profile_fetch", || {
            let url = url.clone();
            async move {
                let envelope: PlayerSummariesEnvelope = self
                    .http
                    .get(&url)
                    .query(&[("key", self.api_key.as_str()), ("steamids", steam_id)])
                    .send()
                    .await
                    .context("profile request failed")?
                    .error_for_status()
                    .context("profile endpoint returned an error status")?
                    .json()
                    .await
                    .context("profile response is not valid JSON")?;

                envelope
                    .response
                    .players
                    .into_iter()
                    .next()
                    .context("no player record for identifier")
            }
        })
        .await;

        match fetched {
            Some(player) => ProfileInfo {
                username: player.personaname.unwrap_or_else(|| "Unknown".to_string()),
                real_name: player
                    .realname
                    .unwrap_or_else(|| "Not specified".to_string()),
                avatar_url: player.avatar.unwrap_or_default(),
                profile_url: player.profileurl.unwrap_or_default(),
                created_at: player.timecreated.unwrap_or(0),
                last_seen_at: player.lastlogoff.unwrap_or(0),
                persona_state: player.personastate.unwrap_or(0),
            },
            None => ProfileInfo::default(),
        }
    }

    /// Fetch ban state for an identifier
    ///
    /// A missing or malformed identifier short-circuits to the
    /// `invalid_id` sentinel without touching the network.
    pub async fn fetch_bans(&self, steam_id: &str) -> BanInfo {
        if !is_valid_identifier(steam_id) {
            return BanInfo::invalid_id();
        }

        let url = format!("{}/ISteamUser/GetPlayerBans/v1/", self.api_base_url);

        let fetched = with_retries(self.retry, "ban_fetch", || {
            let url = url.clone();
            async move {
                let envelope: PlayerBansEnvelope = self
                    .http
                    .get(&url)
                    .query(&[("key", self.api_key.as_str()), ("steamids", steam_id)])
                    .send()
                    .await
                    .context("ban request failed")?
                    .error_for_status()
                    .context("ban endpoint returned an error status")?
                    .json()
                    .await
                    .context("ban response is not valid JSON")?;

                envelope
                    .players
                    .into_iter()
                    .next()
                    .context("no ban record for identifier")
            }
        })
        .await;

        match fetched {
            Some(player) => BanInfo {
                vac_banned: player.vac_banned,
                community_banned: player.community_banned,
                economy_ban_status: player.economy_ban.unwrap_or_else(|| "none".to_string()),
                vac_ban_count: player.number_of_vac_bans,
                days_since_last_ban: player.days_since_last_ban,
                game_ban_count: player.number_of_game_bans,
                steam_id: player.steam_id.unwrap_or_default(),
            },
            None => BanInfo::error(),
        }
    }
}

/// Classify a delivered account-page response
fn judge_session_response(status: u16, body: &str) -> ValidationOutcome {
    let length = body.len();

    if status == 200 && length > MIN_RESPONSE_LENGTH {
        let lowered = body.to_lowercase();
        let logged_in = SESSION_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker));
        ValidationOutcome {
            is_valid: logged_in,
            status_code: status,
            response_length: length,
            error: if logged_in {
                None
            } else {
                Some("no session markers in response".to_string())
            },
        }
    } else {
        ValidationOutcome {
            is_valid: false,
            status_code: status,
            response_length: length,
            error: Some(format!("HTTP {}", status)),
        }
    }
}

/// Assemble a Cookie header from the credential's map
fn build_cookie_header(cookies: &HashMap<String, String>) -> AppResult<HeaderValue> {
    let joined = cookies
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("; ");

    HeaderValue::from_str(&joined)
        .map_err(|_| AppError::Credential("cookie value cannot be sent as a header".to_string()))
}
