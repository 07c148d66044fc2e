//! Domain model for stored collections.
//!
//! # Responsibility
//! - Define the canonical record shape shared by load, create and write paths.
//! - Keep candidate validation independent from store state.
//!
//! # Invariants
//! - Every persisted record is identified by a non-empty `_id`.

pub mod record;
