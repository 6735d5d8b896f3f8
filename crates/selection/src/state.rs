use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use fotoforma_catalog::{DigitalFilesConfig, ProductConfiguration};
use fotoforma_core::{DomainError, DomainResult, EventId, PhotoId};

/// Mutable in-progress selection for one product acquisition.
///
/// Created empty when the customer opens a product, mutated by discrete
/// toggles as they pick photos/events, and discarded once finalized into a
/// [`crate::CartItemSelection`]. The interior shape follows the product
/// category, so every toggle either applies cleanly or is a
/// [`DomainError::ConfigurationMismatch`] (a wiring bug in the host, never a
/// user-correctable state).
///
/// Ordered containers keep every derived sequence deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum SelectionState {
    /// One pool of photos for a bound album.
    Album { photo_ids: BTreeSet<PhotoId> },
    /// Photos grouped by the event they were taken at (loose event photos and
    /// unit-mode digital files).
    PerEvent {
        photos_by_event: BTreeMap<EventId, BTreeSet<PhotoId>>,
    },
    /// Package-mode digital files: whole events, or the full bundle.
    ///
    /// Both fields may be set transiently while the customer clicks around;
    /// the rule engine always consults `full_bundle_selected` first.
    Package {
        event_ids: BTreeSet<EventId>,
        full_bundle_selected: bool,
    },
}

impl SelectionState {
    /// Empty selection of the shape the configuration calls for.
    pub fn for_configuration(config: &ProductConfiguration) -> Self {
        match config {
            ProductConfiguration::Album(_) => Self::Album {
                photo_ids: BTreeSet::new(),
            },
            ProductConfiguration::EventPhotos(_)
            | ProductConfiguration::DigitalFiles(DigitalFilesConfig::ByUnit { .. }) => {
                Self::PerEvent {
                    photos_by_event: BTreeMap::new(),
                }
            }
            ProductConfiguration::DigitalFiles(DigitalFilesConfig::ByPackage { .. }) => {
                Self::Package {
                    event_ids: BTreeSet::new(),
                    full_bundle_selected: false,
                }
            }
        }
    }

    /// Toggle one album photo. Returns whether the photo is selected afterwards.
    pub fn toggle_photo(&mut self, photo_id: PhotoId) -> DomainResult<bool> {
        match self {
            Self::Album { photo_ids } => {
                if photo_ids.remove(&photo_id) {
                    Ok(false)
                } else {
                    photo_ids.insert(photo_id);
                    Ok(true)
                }
            }
            _ => Err(Self::mismatch("toggle_photo", self)),
        }
    }

    /// Toggle one photo under its event. Returns whether it is selected afterwards.
    pub fn toggle_event_photo(&mut self, event_id: EventId, photo_id: PhotoId) -> DomainResult<bool> {
        match self {
            Self::PerEvent { photos_by_event } => {
                let photos = photos_by_event.entry(event_id).or_default();
                let selected = if photos.remove(&photo_id) {
                    false
                } else {
                    photos.insert(photo_id);
                    true
                };
                // Events with nothing selected carry no entry at all.
                if photos.is_empty() {
                    photos_by_event.remove(&event_id);
                }
                Ok(selected)
            }
            _ => Err(Self::mismatch("toggle_event_photo", self)),
        }
    }

    /// Toggle one whole-event package. Returns whether it is selected afterwards.
    pub fn toggle_event(&mut self, event_id: EventId) -> DomainResult<bool> {
        match self {
            Self::Package { event_ids, .. } => {
                if event_ids.remove(&event_id) {
                    Ok(false)
                } else {
                    event_ids.insert(event_id);
                    Ok(true)
                }
            }
            _ => Err(Self::mismatch("toggle_event", self)),
        }
    }

    /// Select or clear the all-events bundle.
    pub fn set_full_bundle(&mut self, selected: bool) -> DomainResult<()> {
        match self {
            Self::Package {
                full_bundle_selected,
                ..
            } => {
                *full_bundle_selected = selected;
                Ok(())
            }
            _ => Err(Self::mismatch("set_full_bundle", self)),
        }
    }

    /// Total number of selected photo/event ids, before stale filtering.
    pub fn raw_selected_count(&self) -> usize {
        match self {
            Self::Album { photo_ids } => photo_ids.len(),
            Self::PerEvent { photos_by_event } => {
                photos_by_event.values().map(BTreeSet::len).sum()
            }
            Self::Package { event_ids, .. } => event_ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Package {
                event_ids,
                full_bundle_selected,
            } => event_ids.is_empty() && !*full_bundle_selected,
            _ => self.raw_selected_count() == 0,
        }
    }

    fn mismatch(operation: &str, state: &SelectionState) -> DomainError {
        let shape = match state {
            Self::Album { .. } => "album",
            Self::PerEvent { .. } => "per_event",
            Self::Package { .. } => "package",
        };
        DomainError::configuration_mismatch(format!(
            "{operation} is not valid for a {shape} selection"
        ))
    }
}
