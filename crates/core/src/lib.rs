//! # Rx Core
//!
//! Core business logic for the prescription service.
//!
//! This crate contains pure data operations over the relational store:
//! - SQLite connection handling and embedded schema migrations (`db`)
//! - Row-level access for patients, doctors, medicaments and prescriptions (`db::repository`)
//! - The prescription submission workflow and medicament catalogue (`repositories`)
//!
//! **No API concerns**: HTTP servers, routing and OpenAPI documentation belong in `api-rest`.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod repositories;

// Submission wire types are shared with the API crates.
pub use api_shared::dto;

pub use config::CoreConfig;
pub use constants::*;
pub use db::{Database, DatabaseError};
pub use error::{PrescriptionError, PrescriptionResult};
pub use repositories::medicament::MedicamentService;
pub use repositories::prescription::PrescriptionService;
