//! Row-level access, one module per table.
//!
//! Every function takes a plain `&Connection`, so it can run either directly on a connection or
//! inside a `rusqlite::Transaction` (which dereferences to one).

pub mod doctor;
pub mod medicament;
pub mod patient;
pub mod prescription;

pub use doctor::*;
pub use medicament::*;
pub use patient::*;
pub use prescription::*;
