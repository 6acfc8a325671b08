//! Typed accessors over the document store, one module per collection.
//!
//! Query functions only translate between models and documents. Validation
//! and authorization belong to the service layer.

pub mod boards;
pub mod tasks;
pub mod users;
pub mod workspaces;

use serde::{Serialize, de::DeserializeOwned};

use crate::database::Document;
use crate::error::Result;

pub(crate) fn to_document<T: Serialize>(value: &T) -> Result<Document> {
    Ok(serde_json::to_value(value)?)
}

pub(crate) fn from_document<T: DeserializeOwned>(document: Document) -> Result<T> {
    Ok(serde_json::from_value(document)?)
}

pub(crate) fn from_documents<T: DeserializeOwned>(documents: Vec<Document>) -> Result<Vec<T>> {
    documents.into_iter().map(from_document).collect()
}
