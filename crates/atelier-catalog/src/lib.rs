//! Gallery catalog for the Atelier canvas
//!
//! A catalog is a finite, static list of gallery entries, each pairing a
//! scene image, a pixel mask, and a product record. It is loaded once at
//! startup from a JSON manifest and never mutated; the canvas engine only
//! ever reads from it.

mod item;
mod manifest;
mod product;

pub use item::GalleryItem;
pub use manifest::{Catalog, CatalogError};
pub use product::Product;
