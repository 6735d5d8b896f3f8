use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fotoforma_catalog::ProductConfiguration;
use fotoforma_core::{CartItemId, DomainResult, Entity, Money, ProductId};
use fotoforma_selection::{CartItemSelection, FinalizedSelection};

/// One cart line: a finalized selection for a product, with a locked-in price.
///
/// `unit_price` and `configuration_snapshot` are captured once at confirmation
/// time. Later catalog or configuration changes must not move prices on lines
/// already in the cart, so nothing here is ever recomputed from live data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub configuration_snapshot: ProductConfiguration,
    pub selection: CartItemSelection,
    /// Price in smallest currency unit, fixed at confirmation.
    pub unit_price: Money,
    /// Always >= 1; lines at quantity 1 can only leave the cart explicitly.
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Build a quantity-1 line from a finalized selection.
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        configuration_snapshot: ProductConfiguration,
        finalized: FinalizedSelection,
        added_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CartItemId::new(),
            product_id,
            product_name: product_name.into(),
            configuration_snapshot,
            selection: finalized.selection,
            unit_price: finalized.unit_price,
            quantity: 1,
            added_at,
        }
    }

    /// `unit_price * quantity`, checked.
    pub fn line_total(&self) -> DomainResult<Money> {
        self.unit_price.checked_mul(self.quantity)
    }
}

impl Entity for CartItem {
    type Id = CartItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
