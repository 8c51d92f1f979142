//! Domain model for users, topics, question banks and mastery stats.
//!
//! # Responsibility
//! - Define canonical data structures used by quiz business logic.
//! - Own input normalization for user and topic identifiers.
//!
//! # Invariants
//! - Usernames are stored trimmed and never empty.
//! - Topic names map one-to-one onto topic store file names.

pub mod question;
pub mod stats;
pub mod topic;
pub mod user;

use thiserror::Error;

/// Validation failure for caller-provided identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("username is required")]
    EmptyUsername,
    #[error("invalid topic name `{0}`; use letters, digits, `_`, `-` or `.`")]
    InvalidTopicName(String),
}
