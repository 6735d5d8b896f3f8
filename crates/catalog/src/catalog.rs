use serde::{Deserialize, Serialize};

use fotoforma_core::{EventId, PhotoId};

/// A single photo available for purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    /// Presigned/display URL. Opaque to the engine.
    pub url: String,
}

/// One photographed event and the photos taken at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventGroup {
    pub event_id: EventId,
    pub event_name: String,
    pub photos: Vec<Photo>,
}

impl EventGroup {
    pub fn contains_photo(&self, photo_id: PhotoId) -> bool {
        self.photos.iter().any(|p| p.id == photo_id)
    }
}

/// Read-only catalog of a customer's photographed events, in display order.
///
/// Supplied by the host via [`crate::CatalogProvider`]; the engine only reads
/// it to resolve names and to drop stale photo/event references from counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPhotoCatalog {
    groups: Vec<EventGroup>,
}

impl EventPhotoCatalog {
    pub fn new(groups: Vec<EventGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[EventGroup] {
        &self.groups
    }

    pub fn group(&self, event_id: EventId) -> Option<&EventGroup> {
        self.groups.iter().find(|g| g.event_id == event_id)
    }

    pub fn event_name(&self, event_id: EventId) -> Option<&str> {
        self.group(event_id).map(|g| g.event_name.as_str())
    }

    /// True if the photo currently exists under the given event.
    pub fn contains_photo(&self, event_id: EventId, photo_id: PhotoId) -> bool {
        self.group(event_id)
            .is_some_and(|g| g.contains_photo(photo_id))
    }

    /// True if the photo currently exists under any event.
    pub fn contains_photo_anywhere(&self, photo_id: PhotoId) -> bool {
        self.groups.iter().any(|g| g.contains_photo(photo_id))
    }
}
