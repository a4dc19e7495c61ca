//! Append-only in-memory vector store.
//!
//! The store is unbounded: records are only dropped by [`VectorStore::reset`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use cohort_embeddings::Embedding;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, RetrievalError};

/// A stored text and its embedding. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier (UUIDv7).
    pub id: String,

    /// The stored text, never empty.
    pub text: String,

    /// Embedding of `text`.
    pub embedding: Embedding,

    /// Model that produced `embedding`.
    pub model: String,

    /// When the record was inserted.
    pub created_at: DateTime<Utc>,
}

/// Insertion-ordered collection of records.
#[derive(Debug, Default)]
pub struct VectorStore {
    records: Vec<Arc<Record>>,
}

impl VectorStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record with a freshly generated id.
    pub fn insert(
        &mut self,
        text: impl Into<String>,
        embedding: Embedding,
        model: impl Into<String>,
    ) -> Result<Arc<Record>> {
        let text = text.into();
        if text.is_empty() {
            return Err(RetrievalError::validation("text must not be empty"));
        }

        let record = Arc::new(Record {
            id: Uuid::now_v7().to_string(),
            text,
            embedding,
            model: model.into(),
            created_at: Utc::now(),
        });
        self.records.push(Arc::clone(&record));
        debug!(id = %record.id, total = self.records.len(), "Stored record");

        Ok(record)
    }

    /// Snapshot of every record in insertion order.
    pub fn all(&self) -> Vec<Arc<Record>> {
        self.records.clone()
    }

    /// Drop every record.
    pub fn reset(&mut self) {
        let dropped = self.records.len();
        self.records.clear();
        info!(dropped, "Cleared vector store");
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_insert_keeps_order() {
        let mut store = VectorStore::new();
        store.insert("first", vec![1.0, 0.0], "m").unwrap();
        store.insert("second", vec![0.0, 1.0], "m").unwrap();

        let texts: Vec<String> = store.all().iter().map(|r| r.text.clone()).collect();
        assert_eq!(texts, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_empty_text_is_rejected_without_mutation() {
        let mut store = VectorStore::new();
        store.insert("kept", vec![1.0], "m").unwrap();

        let err = store.insert("", vec![1.0], "m").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_whitespace_text_is_accepted() {
        let mut store = VectorStore::new();
        let record = store.insert(" \t ", vec![1.0], "m").unwrap();

        assert_eq!(record.text, " \t ");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut store = VectorStore::new();
        store.insert("a", vec![1.0], "m").unwrap();

        store.reset();
        assert!(store.is_empty());
        store.reset();
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_snapshot_is_unaffected_by_later_inserts() {
        let mut store = VectorStore::new();
        store.insert("a", vec![1.0], "m").unwrap();
        let snapshot = store.all();

        store.insert("b", vec![1.0], "m").unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_ids_are_unique_under_rapid_inserts() {
        let mut store = VectorStore::new();
        for i in 0..10_000 {
            store.insert(format!("text {i}"), vec![1.0], "m").unwrap();
        }

        let ids: HashSet<String> = store.all().iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), 10_000);
    }
}
