//! HTTP middleware: Basic authentication, request ID tracking.

pub mod auth;
pub mod request_id;
