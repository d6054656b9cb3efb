//! Write-once mask cache fed by decode workers

use std::collections::HashMap;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use thiserror::Error;

use crate::card::CardId;
use crate::math::{Rect, Vec2};

use super::MaskPixels;

/// Error fetching or decoding a mask image
#[derive(Debug, Error)]
pub enum MaskError {
    /// The mask bytes could not be fetched
    #[error("mask fetch failed: {0}")]
    Fetch(String),
    /// The mask bytes were not a decodable image
    #[error("mask decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// Source of raw mask image bytes
///
/// The engine only knows mask references; resolving a reference to bytes
/// (disk, HTTP cache, embedded assets) is the host's concern.
pub trait MaskSource: Send + Sync {
    fn fetch(&self, mask_ref: &str) -> Result<Vec<u8>, MaskError>;
}

impl<F> MaskSource for F
where
    F: Fn(&str) -> Result<Vec<u8>, MaskError> + Send + Sync,
{
    fn fetch(&self, mask_ref: &str) -> Result<Vec<u8>, MaskError> {
        self(mask_ref)
    }
}

/// Decoded artifacts for one card
#[derive(Clone, Debug)]
struct MaskArtifacts {
    pixels: MaskPixels,
    overlay: MaskPixels,
}

/// Cache entry lifecycle: pending while a worker decodes, then ready or
/// failed forever. Entries are never reloaded or invalidated for a card id.
enum MaskEntry {
    Pending,
    Ready(MaskArtifacts),
    Failed,
}

type DecodeResult = (CardId, Result<MaskArtifacts, MaskError>);

/// Asynchronous mask store
///
/// `request` is fire-and-forget: it spawns a decode worker and returns
/// immediately; `poll` installs completed decodes without blocking and is
/// called from the frame tick. Queries against a pending or failed entry
/// return "not over product".
pub struct MaskStore {
    source: Arc<dyn MaskSource>,
    entries: HashMap<CardId, MaskEntry>,
    tx: mpsc::Sender<DecodeResult>,
    rx: mpsc::Receiver<DecodeResult>,
}

impl MaskStore {
    /// Create a store backed by the given byte source
    pub fn new(source: Arc<dyn MaskSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            entries: HashMap::new(),
            tx,
            rx,
        }
    }

    /// Begin decoding the mask for a card; idempotent per card id
    ///
    /// A second call while or after a load for the same card is a no-op.
    pub fn request(&mut self, card_id: CardId, mask_ref: &str) {
        if self.entries.contains_key(&card_id) {
            return;
        }
        self.entries.insert(card_id, MaskEntry::Pending);

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let mask_ref = mask_ref.to_string();
        thread::spawn(move || {
            let result = source.fetch(&mask_ref).and_then(|bytes| decode(&bytes));
            // The receiver may be gone on engine teardown
            let _ = tx.send((card_id, result));
        });
    }

    /// Install any completed decodes; never blocks
    pub fn poll(&mut self) {
        while let Ok((card_id, result)) = self.rx.try_recv() {
            match self.entries.get(&card_id) {
                Some(MaskEntry::Pending) => {}
                // Write-once: a settled entry is never replaced
                _ => continue,
            }
            match result {
                Ok(artifacts) => {
                    self.entries.insert(card_id, MaskEntry::Ready(artifacts));
                }
                Err(err) => {
                    log::warn!("mask decode failed for card {card_id}: {err}");
                    self.entries.insert(card_id, MaskEntry::Failed);
                }
            }
        }
    }

    /// Whether the mask for a card has decoded successfully
    pub fn is_ready(&self, card_id: CardId) -> bool {
        matches!(self.entries.get(&card_id), Some(MaskEntry::Ready(_)))
    }

    /// Whether the decode for a card failed (the card stays visible and
    /// driftable but never reveals a product)
    pub fn is_failed(&self, card_id: CardId) -> bool {
        matches!(self.entries.get(&card_id), Some(MaskEntry::Failed))
    }

    /// Test whether a screen-space pointer is over the card's product
    /// pixels, given the card's current rendered rect
    ///
    /// Deterministic once the mask is loaded; false while pending, after a
    /// failed decode, or for out-of-bounds coordinates. Never panics.
    pub fn is_over_product(&self, card_id: CardId, pointer: Vec2, card_rect: Rect) -> bool {
        match self.entries.get(&card_id) {
            Some(MaskEntry::Ready(artifacts)) => artifacts.pixels.hit_test(pointer, card_rect),
            _ => false,
        }
    }

    /// The highlight overlay for a card, once decoded
    pub fn overlay(&self, card_id: CardId) -> Option<&MaskPixels> {
        match self.entries.get(&card_id) {
            Some(MaskEntry::Ready(artifacts)) => Some(&artifacts.overlay),
            _ => None,
        }
    }
}

/// Decode mask bytes into the pixel buffer and its highlight overlay
fn decode(bytes: &[u8]) -> Result<MaskArtifacts, MaskError> {
    let decoded = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = (decoded.width(), decoded.height());
    let pixels = MaskPixels::new(width, height, decoded.into_raw());
    let overlay = pixels.derive_overlay();
    Ok(MaskArtifacts { pixels, overlay })
}
