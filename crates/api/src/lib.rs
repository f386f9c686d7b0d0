//! HTTP API layer for daybook.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: friends, notifications, pings, questions, content,
//!   groups, reports, users
//! - **Extractors**: authentication
//! - **Middleware**: bearer-token authentication, shared state
//!
//! Built on Axum 0.8 with Tower middleware stack.

// Allow dead_code for API compatibility fields in request structs
#![allow(dead_code)]

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
