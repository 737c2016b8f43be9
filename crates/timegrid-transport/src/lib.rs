//! # timegrid-transport
//!
//! HTTP transport for the TimeGrid backend. [`ApiClient`] wraps a
//! `reqwest::Client`, attaches bearer credentials to every outgoing call,
//! and classifies failed responses into the unified error taxonomy. On an
//! invalidated session (HTTP 401) it clears credentials and broadcasts
//! [`SessionEvent::Invalidated`]; it never performs navigation itself.
//!
//! [`SessionEvent::Invalidated`]: timegrid_core::events::SessionEvent

pub mod client;
pub mod dto;
pub mod intercept;

pub use client::ApiClient;
pub use intercept::NETWORK_ERROR_MESSAGE;
