//! `fotoforma-cart` — the shopping cart and its merge semantics.
//!
//! The cart is the single source of truth for checkout: an ordered list of
//! lines, each uniquely identified by `(product_id, selection)`. Structurally
//! equal selections for the same product always merge into one line by
//! incrementing quantity; `add_item` is the only insertion point. Prices are
//! locked on the line at confirmation time and never recomputed here.

pub mod cart;
pub mod item;
pub mod snapshot;

pub use cart::{selections_equal, Cart};
pub use item::CartItem;
pub use snapshot::{CartSnapshot, SNAPSHOT_SCHEMA_VERSION};
