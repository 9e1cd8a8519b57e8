//! Steam Sentinel Library
//!
//! Batch validation pipeline for Steam session credentials.
//! This library exposes core modules for testing.

pub mod checker;
pub mod client;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod report;
pub mod retry;
pub mod stats;
pub mod token;

// Re-export commonly used types for tests
pub use checker::{derive_status, AccountChecker};
pub use client::SteamClient;
pub use config::{AppConfig, CheckerConfig, SteamConfig};
pub use error::{AppError, AppResult};
pub use models::{
    AccountRecord, AccountStatus, BanInfo, ClaimCheck, Claims, ProfileInfo, TokenRecord,
    ValidationOutcome,
};
pub use retry::{with_retries, RetryPolicy};
pub use stats::Statistics;
pub use token::{is_valid_identifier, DecodeError, SESSION_COOKIE};
