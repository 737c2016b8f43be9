//! End-to-end tests for the TimeGrid client against a mock backend.

mod session_test;
mod transport_test;
