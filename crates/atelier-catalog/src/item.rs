//! Gallery entry pairing a scene, a mask, and a product

use serde::{Deserialize, Serialize};

use crate::Product;

/// One catalog entry: a generated scene image, the pixel mask marking the
/// product's silhouette inside it, and the product record itself.
///
/// A single item may back any number of concurrent on-canvas cards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    /// Stable item identifier
    pub id: String,
    /// Scene image reference
    pub scene_image_ref: String,
    /// Mask image reference (bright pixels = product silhouette)
    pub mask_image_ref: String,
    /// The product hidden inside the scene
    pub product: Product,
}
