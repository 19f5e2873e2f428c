//! # API Shared
//!
//! Shared request/response definitions for the prescription APIs.
//!
//! Contains:
//! - Wire types for the prescription submission endpoint (`dto` module)
//! - Shared services like `HealthService`
//!
//! Used by `rx-core` (which consumes the submission types) and `api-rest`.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
