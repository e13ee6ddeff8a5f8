//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate leaf-store calls into externally reachable operations.
//! - Enforce cross-entity invariants the stores cannot see on their own.

pub mod coordinator;
