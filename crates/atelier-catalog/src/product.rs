//! Product record paired with a gallery scene

use serde::{Deserialize, Serialize};

/// A purchasable product hidden inside a gallery scene
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable product identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Brand name
    pub brand: String,
    /// Price in whole currency units
    pub price: u32,
    /// ISO currency code
    pub currency: String,
    /// Short marketing description
    #[serde(default)]
    pub description: String,
    /// Thumbnail image reference for the detail overlay
    pub thumbnail_ref: String,
}
