//! Document store abstraction.
//!
//! Every entity is persisted as a flat JSON document inside a named
//! collection and keyed by a UUIDv7. Queries are JSON containment filters,
//! so a backend only has to answer "does this document contain that
//! pattern", which Postgres does natively with `@>`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use strum_macros::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::error::Result;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// A stored JSON document
pub type Document = Value;

/// Named document collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Collection {
    Users,
    Workspaces,
    Boards,
    Tasks,
}

impl Collection {
    /// Top-level fields whose values must be unique within the collection.
    pub fn unique_fields(self) -> &'static [&'static str] {
        match self {
            Collection::Users => &["email"],
            Collection::Workspaces => &["name"],
            Collection::Boards | Collection::Tasks => &[],
        }
    }
}

/// JSON containment filter
///
/// A document matches when it contains the pattern: every object key must be
/// present with a matching value, and every element of a pattern array must
/// match some element of the document's array. An empty filter matches all.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter(Value);

impl Default for Filter {
    fn default() -> Self {
        Filter(Value::Object(Map::new()))
    }
}

impl Filter {
    /// Matches every document in a collection.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: Uuid) -> Self {
        Self::all().eq("id", id)
    }

    /// Requires `field` to equal (or, for objects, contain) `value`.
    pub fn eq(mut self, field: &str, value: impl Serialize) -> Self {
        if let Value::Object(map) = &mut self.0 {
            map.insert(field.to_string(), serde_json::json!(value));
        }
        self
    }

    /// Requires the array at `field` to contain `value`.
    pub fn contains(mut self, field: &str, value: impl Serialize) -> Self {
        if let Value::Object(map) = &mut self.0 {
            map.insert(field.to_string(), Value::Array(vec![serde_json::json!(value)]));
        }
        self
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn matches(&self, document: &Value) -> bool {
        json_contains(document, &self.0)
    }
}

/// Postgres `@>` semantics over `serde_json::Value`.
pub fn json_contains(document: &Value, pattern: &Value) -> bool {
    match (document, pattern) {
        (Value::Object(doc), Value::Object(pat)) => pat.iter().all(|(key, expected)| {
            doc.get(key)
                .is_some_and(|actual| json_contains(actual, expected))
        }),
        (Value::Array(doc), Value::Array(pat)) => pat
            .iter()
            .all(|expected| doc.iter().any(|actual| json_contains(actual, expected))),
        (doc, pat) => doc == pat,
    }
}

/// Storage backend used by every query module
///
/// Single-document writes are atomic. Nothing spans documents, so multi-step
/// operations must tolerate being interrupted halfway.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts a new document. Fails with `Conflict` if a unique field is taken.
    async fn insert(&self, collection: Collection, id: Uuid, document: Document) -> Result<()>;

    /// Returns all matching documents in insertion (id) order.
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>>;

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>>;

    /// Replaces the whole document. Returns false if it does not exist.
    async fn replace(&self, collection: Collection, id: Uuid, document: Document) -> Result<bool>;

    /// Deletes all matching documents and returns how many were removed.
    async fn delete(&self, collection: Collection, filter: &Filter) -> Result<u64>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<()>;
}
