use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fotoforma_catalog::ProductCategory;
use fotoforma_core::{EventId, PhotoId, ValueObject};

/// Immutable, finalized selection as it lives on a cart line.
///
/// One variant per category/mode combination. Id lists are sorted at
/// construction (they come out of ordered sets), so structural equality is
/// order-independent by construction and the serialized form is stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartItemSelection {
    /// Bound album: the chosen photo pool.
    Album { photo_ids: Vec<PhotoId> },
    /// Loose photos per event.
    EventPhotosPerEvent {
        photos_by_event: BTreeMap<EventId, Vec<PhotoId>>,
    },
    /// Digital files: the flat all-events bundle.
    DigitalPackageFull,
    /// Digital files: individually chosen event packages.
    DigitalPackagePartial { event_ids: Vec<EventId> },
    /// Digital files sold per photo.
    DigitalUnit {
        photos_by_event: BTreeMap<EventId, Vec<PhotoId>>,
    },
}

impl ValueObject for CartItemSelection {}

impl CartItemSelection {
    /// The product category this selection belongs to.
    pub fn category(&self) -> ProductCategory {
        match self {
            CartItemSelection::Album { .. } => ProductCategory::Album,
            CartItemSelection::EventPhotosPerEvent { .. } => ProductCategory::EventPhotos,
            CartItemSelection::DigitalPackageFull
            | CartItemSelection::DigitalPackagePartial { .. }
            | CartItemSelection::DigitalUnit { .. } => ProductCategory::DigitalFiles,
        }
    }

    /// Number of photos (or whole events, for packages) the selection covers.
    pub fn selected_count(&self) -> usize {
        match self {
            CartItemSelection::Album { photo_ids } => photo_ids.len(),
            CartItemSelection::EventPhotosPerEvent { photos_by_event }
            | CartItemSelection::DigitalUnit { photos_by_event } => {
                photos_by_event.values().map(Vec::len).sum()
            }
            CartItemSelection::DigitalPackageFull => 0,
            CartItemSelection::DigitalPackagePartial { event_ids } => event_ids.len(),
        }
    }
}
