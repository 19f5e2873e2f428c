//! Services built on top of the relational store.
//!
//! Each service holds a [`Database`](crate::db::Database) handle and runs one unit of work per
//! call. Services are cheap to construct, so API layers create them per request.

pub mod medicament;
pub mod prescription;
