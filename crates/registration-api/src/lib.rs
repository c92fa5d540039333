//! Event registration API.
//!
//! Accepts signups over HTTP, stores them, lists them for the admin page and
//! emails the operator about each new registration on a best-effort basis.

pub mod api;
pub mod config;
pub mod error;
pub mod telemetry;

pub use config::Config;
pub use error::ApiError;
