// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum SeedError {
    /// Name not present in the collection registry. Reported, never fatal.
    #[error("Invalid collection name: {0}")]
    UnknownCollection(String),

    #[error("failed to read fixture {}: {source}", .path.display())]
    ReadFixture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fixture {}: {source}", .path.display())]
    ParseFixture {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed fixture {}: {reason}", .path.display())]
    MalformedFixture { path: PathBuf, reason: String },

    #[error("{operation} on collection '{collection}' failed: {source}")]
    Database {
        collection: String,
        operation: &'static str,
        #[source]
        source: BoxError,
    },
}

impl SeedError {
    pub fn database(
        collection: &str,
        operation: &'static str,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Database {
            collection: collection.to_string(),
            operation,
            source: source.into(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::UnknownCollection(_))
    }
}
