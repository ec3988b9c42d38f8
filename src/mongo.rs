// src/mongo.rs
use crate::error::SeedError;
use crate::store::DocumentStore;
use anyhow::Result;
use async_trait::async_trait;
use bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::debug;

pub const DEFAULT_DATABASE: &str = "fimo-seed";

pub async fn connect(uri: &str, db: Option<&str>) -> Result<Database> {
    let client_options = ClientOptions::parse(uri).await?;
    let name = database_name(db, client_options.default_database.as_deref());
    let client = Client::with_options(client_options)?;
    debug!(database = %name, "opened MongoDB client");
    Ok(client.database(&name))
}

/// `--db` wins, then the database named in the connection string.
pub fn database_name(explicit: Option<&str>, from_uri: Option<&str>) -> String {
    explicit
        .or(from_uri)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_DATABASE)
        .to_string()
}

#[async_trait]
impl DocumentStore for Database {
    async fn delete_all(&self, collection: &str) -> Result<u64, SeedError> {
        let result = self
            .collection::<Document>(collection)
            .delete_many(doc! {})
            .await
            .map_err(|e| SeedError::database(collection, "deleteMany", e))?;
        debug!(collection, deleted = result.deleted_count, "cleared collection");
        Ok(result.deleted_count)
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<usize, SeedError> {
        // The driver rejects an empty batch.
        if documents.is_empty() {
            return Ok(0);
        }
        let result = self
            .collection::<Document>(collection)
            .insert_many(documents)
            .await
            .map_err(|e| SeedError::database(collection, "insertMany", e))?;
        Ok(result.inserted_ids.len())
    }
}
