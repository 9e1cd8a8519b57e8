//! Account models - per-credential outcome and status classification

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Final classification of one checked credential
///
/// Derivation precedence (claims present first):
/// ```text
/// claims + expired          -> EXPIRED
/// claims + !valid           -> INVALID_CLAIM
/// claims + valid + !session -> SESSION_INVALID
/// claims + valid + session  -> VALID
/// no claims + !session      -> INVALID
/// no claims + session       -> VALID
/// ```
/// `ERROR` is reserved for credentials that failed to evaluate at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    /// Session proven live (and claims, when present, valid)
    Valid,
    /// Claims carried an expiry strictly in the past
    Expired,
    /// Claims decoded but carried no usable identity
    InvalidClaim,
    /// Claims valid but the live session probe failed
    SessionInvalid,
    /// No claims and the live session probe failed
    Invalid,
    /// Credential could not be evaluated at all
    Error,
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountStatus::Valid => write!(f, "VALID"),
            AccountStatus::Expired => write!(f, "EXPIRED"),
            AccountStatus::InvalidClaim => write!(f, "INVALID_CLAIM"),
            AccountStatus::SessionInvalid => write!(f, "SESSION_INVALID"),
            AccountStatus::Invalid => write!(f, "INVALID"),
            AccountStatus::Error => write!(f, "ERROR"),
        }
    }
}

impl std::str::FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "VALID" => Ok(AccountStatus::Valid),
            "EXPIRED" => Ok(AccountStatus::Expired),
            "INVALID_CLAIM" => Ok(AccountStatus::InvalidClaim),
            "SESSION_INVALID" => Ok(AccountStatus::SessionInvalid),
            "INVALID" => Ok(AccountStatus::Invalid),
            "ERROR" => Ok(AccountStatus::Error),
            _ => Err(format!("Unknown account status: {}", s)),
        }
    }
}

/// Result of the session liveness probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Response delivered, syntactically successful, liveness marker found
    pub is_valid: bool,
    /// HTTP status of the probe (0 when transport failed)
    pub status_code: u16,
    /// Body length of the probe response
    pub response_length: usize,
    /// Underlying HTTP status or transport error text
    pub error: Option<String>,
}

impl ValidationOutcome {
    /// Sentinel for exhausted retries: nothing was ever delivered
    pub fn exhausted(error: String) -> Self {
        Self {
            is_valid: false,
            status_code: 0,
            response_length: 0,
            error: Some(error),
        }
    }
}

/// Public profile fields from the player-summary endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileInfo {
    /// Persona name
    pub username: String,
    /// Real name, when the profile exposes one
    pub real_name: String,
    /// Avatar image URL
    pub avatar_url: String,
    /// Community profile URL
    pub profile_url: String,
    /// Account creation time (epoch seconds, 0 when unavailable)
    pub created_at: i64,
    /// Last logoff time (epoch seconds, 0 when unavailable)
    pub last_seen_at: i64,
    /// Persona state code (0 = offline/unknown)
    pub persona_state: i64,
}

impl Default for ProfileInfo {
    fn default() -> Self {
        Self {
            username: "Unknown".to_string(),
            real_name: "Not specified".to_string(),
            avatar_url: String::new(),
            profile_url: String::new(),
            created_at: 0,
            last_seen_at: 0,
            persona_state: 0,
        }
    }
}

/// Ban state from the player-bans endpoint
///
/// The `economy_ban_status` field doubles as the sentinel channel:
/// `no_steamid` (no identifier, checks skipped), `invalid_id` (identifier
/// rejected at the endpoint gate), `error` (retries exhausted), `none`
/// (clean answer, not banned).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BanInfo {
    /// VAC ban flag
    pub vac_banned: bool,
    /// Community ban flag
    pub community_banned: bool,
    /// Economy ban status string, or a sentinel
    pub economy_ban_status: String,
    /// Number of VAC bans on record
    pub vac_ban_count: i64,
    /// Days since the most recent ban
    pub days_since_last_ban: i64,
    /// Number of game bans on record
    pub game_ban_count: i64,
    /// Identifier echoed by the endpoint
    pub steam_id: String,
}

impl BanInfo {
    fn sentinel(status: &str) -> Self {
        Self {
            vac_banned: false,
            community_banned: false,
            economy_ban_status: status.to_string(),
            vac_ban_count: 0,
            days_since_last_ban: 0,
            game_ban_count: 0,
            steam_id: String::new(),
        }
    }

    /// No identifier was resolved; ban check was skipped entirely
    pub fn no_steamid() -> Self {
        Self::sentinel("no_steamid")
    }

    /// Identifier failed the 17-digit gate at the ban endpoint
    pub fn invalid_id() -> Self {
        Self::sentinel("invalid_id")
    }

    /// Retries exhausted against the ban endpoint
    pub fn error() -> Self {
        Self::sentinel("error")
    }
}

/// Complete outcome for one input credential
///
/// One record per input line, in input order. `claim_valid`/`claim_expired`
/// are `None` when the credential carried no decodable claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    /// 1-based input position
    pub index: usize,
    /// Final status classification
    pub status: AccountStatus,
    /// Canonical 17-digit identifier, when one was resolved
    pub steam_id: Option<String>,
    /// Display username (profile first, token-supplied fallback)
    pub username: String,
    /// Real name from the profile
    pub real_name: String,
    /// Claim judgement, `None` when no claims were present
    pub claim_valid: Option<bool>,
    /// Claim expiry flag, `None` when no claims were present
    pub claim_expired: Option<bool>,
    /// Token expiry (epoch seconds) when the claims carried one
    pub expires_at: Option<i64>,
    /// Profile fields (defaults when unavailable)
    pub profile: ProfileInfo,
    /// Ban fields (sentinels when skipped or failed)
    pub bans: BanInfo,
    /// Session probe outcome
    pub session: ValidationOutcome,
    /// Whether this record's fields are "Error" markers
    pub evaluation_failed: bool,
    /// When this record was produced
    pub checked_at: DateTime<Utc>,
}

impl AccountRecord {
    /// Marker record for a credential that failed to evaluate
    ///
    /// All displayed fields carry an explicit "Error" marker so the report
    /// distinguishes "failed to evaluate" from "evaluated as invalid".
    pub fn evaluation_error(index: usize) -> Self {
        Self {
            index,
            status: AccountStatus::Error,
            steam_id: None,
            username: "Error".to_string(),
            real_name: "Error".to_string(),
            claim_valid: None,
            claim_expired: None,
            expires_at: None,
            profile: ProfileInfo {
                username: "Error".to_string(),
                real_name: "Error".to_string(),
                ..ProfileInfo::default()
            },
            bans: BanInfo::error(),
            session: ValidationOutcome::exhausted("evaluation failed".to_string()),
            evaluation_failed: true,
            checked_at: Utc::now(),
        }
    }
}
