#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! HTTP binding for the session manager.
//!
//! Thin plumbing: each handler invokes the core through one call and
//! renders its result or the mapped error. No conversation state lives
//! here.

mod error;
mod handler;
mod routes;

pub use error::ApiError;
pub use handler::GenerateReply;
pub use routes::{AppState, router, serve};
