//! Seed MongoDB collections from JSON fixture files.
//!
//! Each fixture `<data-dir>/<name>.json` holds an array of records for one
//! registered collection. A run optionally clears every registered
//! collection, then inserts the requested fixtures one collection at a time.

pub mod cli;
pub mod collections;
pub mod error;
pub mod fixture;
pub mod mongo;
pub mod seed;
pub mod store;

pub use collections::SeedCollection;
pub use error::SeedError;
pub use fixture::FixtureLoader;
pub use seed::{format_database, seed, SeedOptions, SeedReport};
pub use store::{DocumentStore, MemoryStore, StoreOp};
