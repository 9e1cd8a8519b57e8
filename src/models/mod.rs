//! Data models for the credential validation pipeline

pub mod account;
pub mod token;

pub use account::{
    AccountRecord, AccountStatus, BanInfo, ProfileInfo, ValidationOutcome,
};
pub use token::{ClaimCheck, Claims, TokenRecord};
