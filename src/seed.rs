// src/seed.rs
use crate::collections::SeedCollection;
use crate::error::SeedError;
use crate::fixture::FixtureLoader;
use crate::store::DocumentStore;
use bson::Document;
use futures::future::try_join_all;
use serde::Serialize;
use std::num::NonZeroUsize;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct SeedOptions {
    pub format: bool,
    pub batch_size: Option<NonZeroUsize>,
    pub debug: bool,
    /// Only changes the wording of progress lines; the store decides what is written.
    pub dry_run: bool,
}

impl SeedOptions {
    pub fn cleared_line(&self) -> &'static str {
        if self.dry_run {
            "Would clear all collections\n"
        } else {
            "Cleared all collections\n"
        }
    }

    pub fn added_line(&self, name: &str) -> String {
        if self.dry_run {
            format!("Would add {name} collection")
        } else {
            format!("Added {name} collection")
        }
    }

    pub fn finished_line(&self) -> &'static str {
        if self.dry_run {
            "Dry run complete, nothing was written"
        } else {
            "Collections added successfully"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddedCollection {
    pub name: String,
    pub documents: usize,
}

/// What a run did, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub formatted: bool,
    pub added: Vec<AddedCollection>,
    pub skipped: Vec<String>,
}

impl SeedReport {
    pub fn added_names(&self) -> Vec<&str> {
        self.added.iter().map(|a| a.name.as_str()).collect()
    }
}

/// Delete every document from all registered collections. The deletes run
/// concurrently; the first failure fails the whole call.
pub async fn format_database<S>(store: &S) -> Result<(), SeedError>
where
    S: DocumentStore + ?Sized,
{
    let deleted = try_join_all(
        SeedCollection::ALL
            .iter()
            .map(|c| store.delete_all(c.collection_name())),
    )
    .await?;

    info!(deleted = deleted.iter().sum::<u64>(), "formatted database");
    Ok(())
}

/// Optionally format, then load each named fixture into its collection, one
/// at a time. Unknown names are reported and skipped; any other failure
/// stops the run.
pub async fn seed<S>(
    store: &S,
    loader: &FixtureLoader,
    items: &[String],
    options: SeedOptions,
) -> Result<SeedReport, SeedError>
where
    S: DocumentStore + ?Sized,
{
    let mut report = SeedReport::default();

    if options.format {
        format_database(store).await?;
        report.formatted = true;
        println!("{}", options.cleared_line());
    }

    load_collections(store, loader, items, options, &mut report).await?;

    println!("\n{}", options.finished_line());
    Ok(report)
}

pub async fn load_collections<S>(
    store: &S,
    loader: &FixtureLoader,
    items: &[String],
    options: SeedOptions,
    report: &mut SeedReport,
) -> Result<(), SeedError>
where
    S: DocumentStore + ?Sized,
{
    for name in items {
        let collection = match name.parse::<SeedCollection>() {
            Ok(collection) => collection,
            Err(e) => {
                eprintln!("{e}");
                warn!(name = %name, "skipping unknown collection");
                report.skipped.push(name.clone());
                continue;
            }
        };

        let documents = loader.load(collection.fixture_name()).await?;
        debug!(
            fixture = %loader.path_for(collection.fixture_name()).display(),
            documents = documents.len(),
            "loaded fixture"
        );

        if options.debug {
            for doc in &documents {
                println!("{name}: {doc}");
            }
        }

        let inserted = insert_documents(
            store,
            collection.collection_name(),
            documents,
            options.batch_size,
        )
        .await?;

        report.added.push(AddedCollection {
            name: name.clone(),
            documents: inserted,
        });
        println!("{}", options.added_line(name));
    }

    Ok(())
}

async fn insert_documents<S>(
    store: &S,
    collection: &str,
    mut documents: Vec<Document>,
    batch_size: Option<NonZeroUsize>,
) -> Result<usize, SeedError>
where
    S: DocumentStore + ?Sized,
{
    let Some(size) = batch_size else {
        return store.insert_many(collection, documents).await;
    };

    let mut inserted = 0;
    while !documents.is_empty() {
        let rest = documents.split_off(size.get().min(documents.len()));
        inserted += store.insert_many(collection, documents).await?;
        documents = rest;
    }
    Ok(inserted)
}
