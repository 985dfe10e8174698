//! Domain core for the taskUp backend.
//!
//! Zero-internal-dep crate shared by the persistence and API layers:
//! common id/timestamp types, the domain error taxonomy, the entity
//! graph registry driving soft-delete cascades, field-invariant
//! validation, and the email verification-code store.

pub mod error;
pub mod graph;
pub mod types;
pub mod validation;
pub mod verification;
