//! Persisted cart snapshot.
//!
//! The cart must survive a page reload, so hosts serialize it at defined
//! lifecycle points (app start, after each mutation) under a fixed storage
//! key. Only the lines are persisted; transient UI flags are not. The record
//! carries a schema version so a future shape change can migrate instead of
//! silently misreading old data.

use serde::{Deserialize, Serialize};

use fotoforma_core::{DomainError, DomainResult};

use crate::cart::Cart;
use crate::item::CartItem;

/// Current snapshot schema version.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Serialized form of a [`Cart`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub schema_version: u32,
    pub items: Vec<CartItem>,
}

impl CartSnapshot {
    pub fn to_json(&self) -> DomainResult<String> {
        serde_json::to_string(self)
            .map_err(|e| DomainError::validation(format!("cart snapshot encode: {e}")))
    }

    pub fn from_json(json: &str) -> DomainResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("cart snapshot decode: {e}")))
    }
}

impl Cart {
    pub fn to_snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            items: self.items().to_vec(),
        }
    }

    /// Restore a cart from a persisted snapshot.
    ///
    /// An unknown schema version is refused; hosts that want to degrade
    /// gracefully treat that as "no snapshot" and start from an empty cart.
    pub fn from_snapshot(snapshot: CartSnapshot) -> DomainResult<Self> {
        if snapshot.schema_version != SNAPSHOT_SCHEMA_VERSION {
            return Err(DomainError::validation(format!(
                "unsupported cart snapshot schema version {}",
                snapshot.schema_version
            )));
        }
        let mut cart = Cart::new();
        for item in snapshot.items {
            // Reuse the merge path so a hand-edited snapshot cannot smuggle in
            // duplicate lines.
            cart.add_item(item)?;
        }
        Ok(cart)
    }
}
