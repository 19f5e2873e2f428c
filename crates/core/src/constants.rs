//! Constants used throughout the core crate.

/// Maximum number of medicament lines a single prescription may carry.
pub const MAX_MEDICAMENTS: usize = 10;

/// Database file used when no explicit path is configured.
pub const DEFAULT_DATABASE_PATH: &str = "prescriptions.db";

/// Special database path selecting a private in-memory store.
pub const IN_MEMORY_DATABASE_PATH: &str = ":memory:";

/// Acknowledgement returned after a successful submission.
pub const PRESCRIPTION_ADDED_MESSAGE: &str = "Prescription added successfully.";
