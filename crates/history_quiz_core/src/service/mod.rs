//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Own the quiz rules: question ordering, session recording, CSV intake.
//!
//! # Invariants
//! - Services are generic over repository traits and never issue SQL.

pub mod import_service;
pub mod selection;
pub mod stats_service;
pub mod user_service;
