//! Pure rule functions: completeness, pricing, display summary, finalization.
//!
//! Category/mode branching is a single closed dispatch on the configuration
//! and state variants; any shape disagreement is a
//! [`DomainError::ConfigurationMismatch`]. Everything else is total: stale
//! catalog references are excluded, rule-less selections price at zero, and an
//! incomplete selection is a value, not an error.

use std::collections::{BTreeMap, BTreeSet};

use fotoforma_catalog::{
    AlbumConfig, DigitalFilesConfig, EventPackageRule, EventPhotoCatalog, EventRule,
    ProductConfiguration,
};
use fotoforma_core::{DomainError, DomainResult, EventId, Money, PhotoId};

use crate::finalized::CartItemSelection;
use crate::state::SelectionState;
use crate::summary::{SelectionSummary, SummaryRow};

/// Completeness verdict with the specific unmet rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionStatus {
    Complete,
    Incomplete(Vec<IncompleteReason>),
}

impl CompletionStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, CompletionStatus::Complete)
    }

    pub fn reasons(&self) -> &[IncompleteReason] {
        match self {
            CompletionStatus::Complete => &[],
            CompletionStatus::Incomplete(reasons) => reasons,
        }
    }
}

/// Why a selection cannot be confirmed yet.
///
/// These are returned values for the UI to render, never raised as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncompleteReason {
    /// Nothing selected at all; empty purchases are rejected outright.
    EmptySelection,
    /// Below the rule minimum. `event_id` is `None` for the album pool.
    BelowMinimum {
        event_id: Option<EventId>,
        minimum: u32,
        selected: u32,
    },
    /// Above the rule maximum. `event_id` is `None` for the album pool.
    AboveMaximum {
        event_id: Option<EventId>,
        maximum: u32,
        selected: u32,
    },
}

impl core::fmt::Display for IncompleteReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            IncompleteReason::EmptySelection => write!(f, "nothing selected"),
            IncompleteReason::BelowMinimum {
                minimum, selected, ..
            } => write!(f, "{selected} of at least {minimum} photos selected"),
            IncompleteReason::AboveMaximum {
                maximum, selected, ..
            } => write!(f, "{selected} photos selected, maximum is {maximum}"),
        }
    }
}

/// Result of confirming a complete selection: the immutable selection and the
/// price locked in at confirmation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedSelection {
    pub selection: CartItemSelection,
    pub unit_price: Money,
}

/// The four legal configuration/state pairings.
///
/// Exhaustive by construction: adding a category or mode forces every rule
/// function through the compiler.
enum Dispatch<'a> {
    Album {
        config: &'a AlbumConfig,
        photo_ids: &'a BTreeSet<PhotoId>,
    },
    PerEvent {
        rules: &'a [EventRule],
        photos_by_event: &'a BTreeMap<EventId, BTreeSet<PhotoId>>,
        /// Unit-mode digital files share the per-event rules but finalize to a
        /// different selection variant.
        digital: bool,
    },
    Package {
        packages: &'a [EventPackageRule],
        full_bundle_price: Money,
        event_ids: &'a BTreeSet<EventId>,
        full_bundle_selected: bool,
    },
}

fn dispatch<'a>(
    config: &'a ProductConfiguration,
    state: &'a SelectionState,
) -> DomainResult<Dispatch<'a>> {
    match (config, state) {
        (ProductConfiguration::Album(cfg), SelectionState::Album { photo_ids }) => {
            Ok(Dispatch::Album {
                config: cfg,
                photo_ids,
            })
        }
        (ProductConfiguration::EventPhotos(cfg), SelectionState::PerEvent { photos_by_event }) => {
            Ok(Dispatch::PerEvent {
                rules: &cfg.events,
                photos_by_event,
                digital: false,
            })
        }
        (
            ProductConfiguration::DigitalFiles(DigitalFilesConfig::ByUnit { events }),
            SelectionState::PerEvent { photos_by_event },
        ) => Ok(Dispatch::PerEvent {
            rules: events,
            photos_by_event,
            digital: true,
        }),
        (
            ProductConfiguration::DigitalFiles(DigitalFilesConfig::ByPackage {
                events,
                full_bundle_price,
            }),
            SelectionState::Package {
                event_ids,
                full_bundle_selected,
            },
        ) => Ok(Dispatch::Package {
            packages: events,
            full_bundle_price: *full_bundle_price,
            event_ids,
            full_bundle_selected: *full_bundle_selected,
        }),
        (config, state) => Err(DomainError::configuration_mismatch(format!(
            "{} configuration cannot drive a {} selection",
            config.category(),
            match state {
                SelectionState::Album { .. } => "album",
                SelectionState::PerEvent { .. } => "per-event",
                SelectionState::Package { .. } => "package",
            }
        ))),
    }
}

/// Completeness with the specific unmet rules attached.
pub fn completion_status(
    config: &ProductConfiguration,
    state: &SelectionState,
    catalog: &EventPhotoCatalog,
) -> DomainResult<CompletionStatus> {
    let status = match dispatch(config, state)? {
        Dispatch::Album { config, photo_ids } => {
            album_status(config, live_album_count(photo_ids, catalog))
        }
        Dispatch::PerEvent {
            rules,
            photos_by_event,
            ..
        } => per_event_status(rules, &live_photos_by_event(photos_by_event, catalog)),
        Dispatch::Package {
            event_ids,
            full_bundle_selected,
            ..
        } => package_status(&live_event_ids(event_ids, catalog), full_bundle_selected),
    };
    Ok(status)
}

/// Plain boolean form of [`completion_status`].
pub fn is_selection_complete(
    config: &ProductConfiguration,
    state: &SelectionState,
    catalog: &EventPhotoCatalog,
) -> DomainResult<bool> {
    Ok(completion_status(config, state, catalog)?.is_complete())
}

/// Price of the selection as it stands, in exact minor units.
pub fn compute_price(
    config: &ProductConfiguration,
    state: &SelectionState,
    catalog: &EventPhotoCatalog,
) -> DomainResult<Money> {
    match dispatch(config, state)? {
        Dispatch::Album { config, photo_ids } => {
            let n = live_album_count(photo_ids, catalog);
            config
                .binding_price
                .checked_add(config.price_per_photo.checked_mul(n)?)
        }
        Dispatch::PerEvent {
            rules,
            photos_by_event,
            ..
        } => per_event_price(rules, &live_photos_by_event(photos_by_event, catalog)),
        Dispatch::Package {
            packages,
            full_bundle_price,
            event_ids,
            full_bundle_selected,
        } => {
            // Full bundle wins over any transient per-event picks.
            if full_bundle_selected {
                return Ok(full_bundle_price);
            }
            // Selected ids without a matching package rule contribute zero,
            // and ids no longer in the catalog are excluded, matching what
            // finalization keeps.
            let live: BTreeSet<EventId> =
                live_event_ids(event_ids, catalog).into_iter().collect();
            Money::checked_sum(
                packages
                    .iter()
                    .filter(|p| live.contains(&p.event_id))
                    .map(|p| p.package_price),
            )
        }
    }
}

/// Display-only projection: per-event counts and remaining/over-max deltas.
pub fn describe_selection(
    config: &ProductConfiguration,
    state: &SelectionState,
    catalog: &EventPhotoCatalog,
) -> DomainResult<SelectionSummary> {
    let summary = match dispatch(config, state)? {
        Dispatch::Album { config, photo_ids } => {
            let selected = live_album_count(photo_ids, catalog);
            SelectionSummary {
                rows: vec![SummaryRow {
                    event_id: None,
                    event_name: None,
                    selected,
                    remaining: config.min_photos.saturating_sub(selected),
                    over_max: selected.saturating_sub(config.max_photos),
                    capacity: Some(config.max_photos.saturating_sub(selected)),
                }],
                total_selected: selected,
                full_bundle_selected: false,
            }
        }
        Dispatch::PerEvent {
            rules,
            photos_by_event,
            ..
        } => per_event_summary(rules, &live_photos_by_event(photos_by_event, catalog), catalog),
        Dispatch::Package {
            packages,
            event_ids,
            full_bundle_selected,
            ..
        } => {
            let live: BTreeSet<EventId> = live_event_ids(event_ids, catalog).into_iter().collect();
            let rows = packages
                .iter()
                .map(|p| SummaryRow {
                    event_id: Some(p.event_id),
                    event_name: catalog.event_name(p.event_id).map(str::to_owned),
                    selected: u32::from(live.contains(&p.event_id)),
                    remaining: 0,
                    over_max: 0,
                    capacity: None,
                })
                .collect();
            SelectionSummary {
                rows,
                total_selected: live.len() as u32,
                full_bundle_selected,
            }
        }
    };
    Ok(summary)
}

/// Confirm a complete selection, locking in its price.
///
/// Incomplete selections are refused with a validation error naming the unmet
/// rules; nothing is mutated either way. Stale ids are dropped from the
/// finalized selection so it only references what was priced.
pub fn finalize_selection(
    config: &ProductConfiguration,
    state: &SelectionState,
    catalog: &EventPhotoCatalog,
) -> DomainResult<FinalizedSelection> {
    let status = completion_status(config, state, catalog)?;
    if let CompletionStatus::Incomplete(reasons) = status {
        let detail = reasons
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(DomainError::validation(format!(
            "selection is incomplete: {detail}"
        )));
    }

    let unit_price = compute_price(config, state, catalog)?;
    let selection = match dispatch(config, state)? {
        Dispatch::Album { photo_ids, .. } => CartItemSelection::Album {
            photo_ids: photo_ids
                .iter()
                .copied()
                .filter(|p| catalog.contains_photo_anywhere(*p))
                .collect(),
        },
        Dispatch::PerEvent {
            photos_by_event,
            digital,
            ..
        } => {
            let photos_by_event = live_photos_by_event(photos_by_event, catalog);
            if digital {
                CartItemSelection::DigitalUnit { photos_by_event }
            } else {
                CartItemSelection::EventPhotosPerEvent { photos_by_event }
            }
        }
        Dispatch::Package {
            event_ids,
            full_bundle_selected,
            ..
        } => {
            if full_bundle_selected {
                CartItemSelection::DigitalPackageFull
            } else {
                CartItemSelection::DigitalPackagePartial {
                    event_ids: live_event_ids(event_ids, catalog),
                }
            }
        }
    };

    tracing::debug!(
        category = %config.category(),
        unit_price = %unit_price,
        selected = selection.selected_count(),
        "selection finalized"
    );

    Ok(FinalizedSelection {
        selection,
        unit_price,
    })
}

fn album_status(config: &AlbumConfig, selected: u32) -> CompletionStatus {
    let mut reasons = Vec::new();
    if selected < config.min_photos {
        reasons.push(IncompleteReason::BelowMinimum {
            event_id: None,
            minimum: config.min_photos,
            selected,
        });
    }
    if selected > config.max_photos {
        reasons.push(IncompleteReason::AboveMaximum {
            event_id: None,
            maximum: config.max_photos,
            selected,
        });
    }
    if reasons.is_empty() {
        CompletionStatus::Complete
    } else {
        CompletionStatus::Incomplete(reasons)
    }
}

fn per_event_status(
    rules: &[EventRule],
    live: &BTreeMap<EventId, Vec<PhotoId>>,
) -> CompletionStatus {
    // Empty purchases are rejected explicitly; the per-event loop below would
    // otherwise vacuously pass with nothing selected.
    if live.is_empty() {
        return CompletionStatus::Incomplete(vec![IncompleteReason::EmptySelection]);
    }

    let mut reasons = Vec::new();
    for (event_id, photos) in live {
        let selected = photos.len() as u32;
        // Events the customer skipped entirely impose no constraint, and
        // selections under an event with no rule are unconstrained.
        let Some(rule) = rules.iter().find(|r| r.event_id == *event_id) else {
            continue;
        };
        if selected < rule.min_photos {
            reasons.push(IncompleteReason::BelowMinimum {
                event_id: Some(*event_id),
                minimum: rule.min_photos,
                selected,
            });
        }
        if let Some(max) = rule.max_photos {
            if selected > max {
                reasons.push(IncompleteReason::AboveMaximum {
                    event_id: Some(*event_id),
                    maximum: max,
                    selected,
                });
            }
        }
    }

    if reasons.is_empty() {
        CompletionStatus::Complete
    } else {
        CompletionStatus::Incomplete(reasons)
    }
}

fn package_status(live_events: &[EventId], full_bundle_selected: bool) -> CompletionStatus {
    if full_bundle_selected || !live_events.is_empty() {
        CompletionStatus::Complete
    } else {
        CompletionStatus::Incomplete(vec![IncompleteReason::EmptySelection])
    }
}

fn per_event_price(
    rules: &[EventRule],
    live: &BTreeMap<EventId, Vec<PhotoId>>,
) -> DomainResult<Money> {
    let mut total = Money::ZERO;
    for (event_id, photos) in live {
        let price_per_photo = rules
            .iter()
            .find(|r| r.event_id == *event_id)
            .map(|r| r.price_per_photo)
            .unwrap_or(Money::ZERO);
        total = total.checked_add(price_per_photo.checked_mul(photos.len() as u32)?)?;
    }
    Ok(total)
}

fn per_event_summary(
    rules: &[EventRule],
    live: &BTreeMap<EventId, Vec<PhotoId>>,
    catalog: &EventPhotoCatalog,
) -> SelectionSummary {
    let mut rows: Vec<SummaryRow> = rules
        .iter()
        .map(|rule| {
            let selected = live.get(&rule.event_id).map_or(0, |p| p.len() as u32);
            SummaryRow {
                event_id: Some(rule.event_id),
                event_name: catalog.event_name(rule.event_id).map(str::to_owned),
                selected,
                remaining: rule.min_photos.saturating_sub(selected),
                over_max: rule
                    .max_photos
                    .map_or(0, |max| selected.saturating_sub(max)),
                capacity: rule.max_photos.map(|max| max.saturating_sub(selected)),
            }
        })
        .collect();

    // Selections under events the configuration has no rule for still show up,
    // unconstrained.
    for (event_id, photos) in live {
        if rules.iter().any(|r| r.event_id == *event_id) {
            continue;
        }
        rows.push(SummaryRow {
            event_id: Some(*event_id),
            event_name: catalog.event_name(*event_id).map(str::to_owned),
            selected: photos.len() as u32,
            remaining: 0,
            over_max: 0,
            capacity: None,
        });
    }

    let total_selected = live.values().map(|p| p.len() as u32).sum();
    SelectionSummary {
        rows,
        total_selected,
        full_bundle_selected: false,
    }
}

fn live_album_count(photo_ids: &BTreeSet<PhotoId>, catalog: &EventPhotoCatalog) -> u32 {
    photo_ids
        .iter()
        .filter(|p| catalog.contains_photo_anywhere(**p))
        .count() as u32
}

/// Selected photos that still exist in the catalog, keyed by event. Events
/// left with nothing live are dropped.
fn live_photos_by_event(
    photos_by_event: &BTreeMap<EventId, BTreeSet<PhotoId>>,
    catalog: &EventPhotoCatalog,
) -> BTreeMap<EventId, Vec<PhotoId>> {
    photos_by_event
        .iter()
        .filter_map(|(event_id, photos)| {
            let live: Vec<PhotoId> = photos
                .iter()
                .copied()
                .filter(|p| catalog.contains_photo(*event_id, *p))
                .collect();
            (!live.is_empty()).then_some((*event_id, live))
        })
        .collect()
}

fn live_event_ids(event_ids: &BTreeSet<EventId>, catalog: &EventPhotoCatalog) -> Vec<EventId> {
    event_ids
        .iter()
        .copied()
        .filter(|e| catalog.group(*e).is_some())
        .collect()
}
