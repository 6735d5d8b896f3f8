use serde::{Deserialize, Serialize};

use fotoforma_core::{DomainError, DomainResult, EventId, Money};

/// Product category. Closed set: every purchasable product is exactly one of
/// these, and the selection engine dispatches exhaustively on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    /// Bound photo album: one pool of photos, a binding fee plus a per-photo price.
    Album,
    /// Loose photos sold per event, each event with its own rule.
    EventPhotos,
    /// Digital files, sold either per photo (unit mode) or per event bundle
    /// (package mode).
    DigitalFiles,
}

impl core::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            ProductCategory::Album => "album",
            ProductCategory::EventPhotos => "event_photos",
            ProductCategory::DigitalFiles => "digital_files",
        };
        f.write_str(label)
    }
}

/// Per-event selection rule: how many photos may be picked from one event and
/// what each costs.
///
/// Absent fields deserialize to permissive defaults (no minimum, unbounded
/// maximum, zero price) so a sparse backend payload never fails to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRule {
    pub event_id: EventId,
    #[serde(default)]
    pub min_photos: u32,
    /// `None` means unbounded.
    #[serde(default)]
    pub max_photos: Option<u32>,
    #[serde(default)]
    pub price_per_photo: Money,
}

impl EventRule {
    pub fn new(event_id: EventId, min_photos: u32, max_photos: Option<u32>, price_per_photo: Money) -> Self {
        Self {
            event_id,
            min_photos,
            max_photos,
            price_per_photo,
        }
    }
}

/// Album configuration: a photo-count window and a two-part price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumConfig {
    pub min_photos: u32,
    pub max_photos: u32,
    pub binding_price: Money,
    pub price_per_photo: Money,
}

impl AlbumConfig {
    /// Invariants: `min_photos >= 1`, `max_photos >= min_photos`.
    pub fn new(
        min_photos: u32,
        max_photos: u32,
        binding_price: Money,
        price_per_photo: Money,
    ) -> DomainResult<Self> {
        if min_photos < 1 {
            return Err(DomainError::validation("album min_photos must be at least 1"));
        }
        if max_photos < min_photos {
            return Err(DomainError::validation(
                "album max_photos must be >= min_photos",
            ));
        }
        Ok(Self {
            min_photos,
            max_photos,
            binding_price,
            price_per_photo,
        })
    }
}

/// Per-event photo package configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPhotosConfig {
    pub events: Vec<EventRule>,
}

impl EventPhotosConfig {
    /// Invariant: event ids are unique within the rule list.
    pub fn new(events: Vec<EventRule>) -> DomainResult<Self> {
        ensure_unique_events(events.iter().map(|r| r.event_id))?;
        Ok(Self { events })
    }

    pub fn rule_for(&self, event_id: EventId) -> Option<&EventRule> {
        self.events.iter().find(|r| r.event_id == event_id)
    }
}

/// Flat-priced bundle covering one event in package-mode digital sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPackageRule {
    pub event_id: EventId,
    #[serde(default)]
    pub package_price: Money,
}

/// Digital-file sales configuration. The backend flags a digital product as
/// `sellable_by_unit`; the two resulting rule shapes are incompatible, so they
/// are separate variants rather than a struct with a bool and dead fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DigitalFilesConfig {
    /// Unit mode: priced per photo, ruled per event (same shape as
    /// [`EventPhotosConfig`]).
    ByUnit { events: Vec<EventRule> },
    /// Package mode: per-event flat packages plus a flat price covering all
    /// events at once.
    ByPackage {
        events: Vec<EventPackageRule>,
        full_bundle_price: Money,
    },
}

impl DigitalFilesConfig {
    pub fn by_unit(events: Vec<EventRule>) -> DomainResult<Self> {
        ensure_unique_events(events.iter().map(|r| r.event_id))?;
        Ok(Self::ByUnit { events })
    }

    pub fn by_package(events: Vec<EventPackageRule>, full_bundle_price: Money) -> DomainResult<Self> {
        ensure_unique_events(events.iter().map(|r| r.event_id))?;
        Ok(Self::ByPackage {
            events,
            full_bundle_price,
        })
    }

    pub fn sellable_by_unit(&self) -> bool {
        matches!(self, Self::ByUnit { .. })
    }
}

/// Per-institution rules for one purchasable product, polymorphic over
/// category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ProductConfiguration {
    Album(AlbumConfig),
    EventPhotos(EventPhotosConfig),
    DigitalFiles(DigitalFilesConfig),
}

impl ProductConfiguration {
    pub fn category(&self) -> ProductCategory {
        match self {
            ProductConfiguration::Album(_) => ProductCategory::Album,
            ProductConfiguration::EventPhotos(_) => ProductCategory::EventPhotos,
            ProductConfiguration::DigitalFiles(_) => ProductCategory::DigitalFiles,
        }
    }

    /// Re-check construction invariants, e.g. after deserializing a backend
    /// payload that bypassed the constructors.
    pub fn validate(&self) -> DomainResult<()> {
        match self {
            ProductConfiguration::Album(cfg) => {
                AlbumConfig::new(
                    cfg.min_photos,
                    cfg.max_photos,
                    cfg.binding_price,
                    cfg.price_per_photo,
                )?;
            }
            ProductConfiguration::EventPhotos(cfg) => {
                ensure_unique_events(cfg.events.iter().map(|r| r.event_id))?;
            }
            ProductConfiguration::DigitalFiles(DigitalFilesConfig::ByUnit { events }) => {
                ensure_unique_events(events.iter().map(|r| r.event_id))?;
            }
            ProductConfiguration::DigitalFiles(DigitalFilesConfig::ByPackage { events, .. }) => {
                ensure_unique_events(events.iter().map(|r| r.event_id))?;
            }
        }
        Ok(())
    }
}

fn ensure_unique_events(ids: impl Iterator<Item = EventId>) -> DomainResult<()> {
    let mut seen = std::collections::BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DomainError::validation(format!(
                "duplicate event rule for event {id}"
            )));
        }
    }
    Ok(())
}
