//! Read-only access to the book database, split into the scoped connection and
//! the query catalog that runs on top of it.

mod catalog;
mod connection;

pub use catalog::QueryId;
pub use connection::{with_store, Store, EXPECTED_SCHEMA};
