//! Test utilities for mview integration tests.
//!
//! Provides [`FakeGateway`], an in-memory [`FetchGateway`] that records every
//! call so tests can assert on exactly which fetches the cascade issued.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use mongodb::bson::Document;
use mview::filter::FilterExpression;
use mview::gateway::FetchGateway;
use mview::BrowseError;

/// One recorded gateway call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListDatabases,
    ListCollections(String),
    Find {
        database: String,
        collection: String,
        filter: Option<Document>,
        limit: usize,
    },
}

#[derive(Default)]
pub struct FakeGateway {
    databases: Vec<String>,
    collections: HashMap<String, Vec<String>>,
    documents: HashMap<(String, String), Vec<String>>,
    /// Overrides the result of a find for a specific filter document.
    filtered: Vec<(Document, Vec<String>)>,
    failing_databases: HashSet<String>,
    failing_collections: HashSet<String>,
    /// Ignore the requested limit and return everything.
    pub overshoot_limit: bool,
    pub calls: Vec<Call>,
}

impl FakeGateway {
    pub fn new(databases: &[&str]) -> Self {
        Self {
            databases: databases.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_collections(mut self, database: &str, names: &[&str]) -> Self {
        self.collections.insert(
            database.to_string(),
            names.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    /// Give `database.collection` `count` generated documents.
    pub fn with_documents(mut self, database: &str, collection: &str, count: usize) -> Self {
        let docs = (0..count)
            .map(|i| format!(r#"{{"_id":{i},"coll":"{collection}"}}"#))
            .collect();
        self.documents
            .insert((database.to_string(), collection.to_string()), docs);
        self
    }

    pub fn with_filtered(mut self, filter: Document, docs: &[&str]) -> Self {
        self.filtered
            .push((filter, docs.iter().map(|s| s.to_string()).collect()));
        self
    }

    pub fn failing_database(mut self, database: &str) -> Self {
        self.failing_databases.insert(database.to_string());
        self
    }

    pub fn failing_collection(mut self, collection: &str) -> Self {
        self.failing_collections.insert(collection.to_string());
        self
    }

    pub fn finds(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Find { .. }))
            .collect()
    }

    pub fn last_call(&self) -> Option<&Call> {
        self.calls.last()
    }
}

impl FetchGateway for FakeGateway {
    fn list_databases(&mut self) -> Result<Vec<String>, BrowseError> {
        self.calls.push(Call::ListDatabases);
        Ok(self.databases.clone())
    }

    fn list_collections(&mut self, database: &str) -> Result<Vec<String>, BrowseError> {
        self.calls.push(Call::ListCollections(database.to_string()));
        if self.failing_databases.contains(database) {
            return Err(BrowseError::remote(format!(
                "not authorized on {database} to execute command"
            )));
        }
        Ok(self.collections.get(database).cloned().unwrap_or_default())
    }

    fn find_documents(
        &mut self,
        database: &str,
        collection: &str,
        filter: &FilterExpression,
        limit: usize,
    ) -> Result<Vec<String>, BrowseError> {
        self.calls.push(Call::Find {
            database: database.to_string(),
            collection: collection.to_string(),
            filter: filter.document().cloned(),
            limit,
        });
        if self.failing_collections.contains(collection) {
            return Err(BrowseError::remote("cursor killed"));
        }

        let docs = match filter.document() {
            Some(doc) => self
                .filtered
                .iter()
                .find(|(f, _)| f == doc)
                .map(|(_, docs)| docs.clone())
                .unwrap_or_default(),
            None => self
                .documents
                .get(&(database.to_string(), collection.to_string()))
                .cloned()
                .unwrap_or_default(),
        };

        if self.overshoot_limit {
            Ok(docs)
        } else {
            Ok(docs.into_iter().take(limit).collect())
        }
    }
}
