//! # timegrid-nav
//!
//! The navigation layer of the TimeGrid client: a static route table and
//! the guard authorizing every transition from the current session
//! snapshot. Guard decisions are synchronous; they never await a refresh
//! or revalidation.

pub mod guard;
pub mod route;

pub use guard::{GuardAction, GuardDecision, NavigationGuard};
pub use route::{Route, RouteMeta, RouteTable, paths};
