//! # timegrid-entity
//!
//! Domain entities for the TimeGrid client: the user profile and the
//! role enumeration driving route-level authorization.

pub mod user;

pub use user::{UserProfile, UserRole};
