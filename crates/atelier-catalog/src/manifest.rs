//! Catalog loading from a JSON manifest

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::GalleryItem;

/// Error loading a catalog manifest
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The manifest was not valid JSON or did not match the expected shape
    #[error("invalid gallery manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The read-only gallery catalog
///
/// Loaded once at startup; the engine treats it as immutable for the life
/// of the process. An empty catalog is valid and simply produces no cards.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    items: Vec<GalleryItem>,
}

impl Catalog {
    /// Create a catalog from an already-built item list
    pub fn new(items: Vec<GalleryItem>) -> Self {
        Self { items }
    }

    /// Parse a catalog from a JSON manifest (a top-level array of items)
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let items: Vec<GalleryItem> = serde_json::from_str(json)?;
        Ok(Self { items })
    }

    /// Number of items
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by index
    #[inline]
    pub fn get(&self, index: usize) -> Option<&GalleryItem> {
        self.items.get(index)
    }

    /// Iterate over all items
    pub fn iter(&self) -> impl Iterator<Item = &GalleryItem> {
        self.items.iter()
    }
}
