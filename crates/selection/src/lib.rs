//! `fotoforma-selection` — the product selection rule engine.
//!
//! Given a product configuration, the customer's in-progress selection and the
//! event/photo catalog, this crate answers three pure questions: is the
//! selection complete, what does it cost, and how should it be described to
//! the customer. A complete selection is finalized into an immutable
//! [`CartItemSelection`] carrying the price computed at that moment.
//!
//! All rule functions are pure and total: an incomplete selection is a
//! returned value (never an error), stale catalog references are silently
//! excluded, and only a configuration/state shape mismatch is loud.

pub mod engine;
pub mod finalized;
pub mod state;
pub mod summary;

pub use engine::{
    compute_price, completion_status, describe_selection, finalize_selection,
    is_selection_complete, CompletionStatus, FinalizedSelection, IncompleteReason,
};
pub use finalized::CartItemSelection;
pub use state::SelectionState;
pub use summary::{SelectionSummary, SummaryRow};
