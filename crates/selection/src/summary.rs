use serde::{Deserialize, Serialize};

use fotoforma_core::EventId;

/// One guidance row of a [`SelectionSummary`].
///
/// `remaining` and `over_max` are the literal deltas against the rule
/// (`max(0, min - selected)` and `max(0, selected - max)`), so a caller can
/// render "2 restantes"-style hints without re-deriving rule arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// `None` for the album row (the album pools photos across events).
    pub event_id: Option<EventId>,
    /// Event name resolved from the catalog; `None` for the album row or when
    /// the event no longer appears in the catalog.
    pub event_name: Option<String>,
    pub selected: u32,
    /// Photos still needed to reach the rule minimum.
    pub remaining: u32,
    /// Photos selected beyond the rule maximum (0 when unbounded).
    pub over_max: u32,
    /// Room left up to the rule maximum; `None` when unbounded.
    pub capacity: Option<u32>,
}

/// Read-only projection of an in-progress selection, for display only.
///
/// Never used for payload construction; derived afresh from the selection
/// state whenever the customer toggles something.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSummary {
    pub rows: Vec<SummaryRow>,
    /// Live selected photos (or whole events in package mode).
    pub total_selected: u32,
    /// Package mode only; always `false` for the other categories.
    pub full_bundle_selected: bool,
}
