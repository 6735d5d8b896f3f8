use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fotoforma_cart::{Cart, CartItem};
use fotoforma_catalog::ProductCategory;
use fotoforma_core::{DomainError, DomainResult, EventId, Money, PhotoId, ProductId};
use fotoforma_selection::CartItemSelection;

/// Who is paying for the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayerDetails {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Where physical products (albums, printed photos) are delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// Selected photos under one event, flattened for the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSelectionDetail {
    pub event_id: EventId,
    pub photo_ids: Vec<PhotoId>,
}

/// Wire form of a cart line's selection; mirrors the selection variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionDetails {
    Album { photo_ids: Vec<PhotoId> },
    EventPhotos { events: Vec<EventSelectionDetail> },
    DigitalPackageFull,
    DigitalPackagePartial { event_ids: Vec<EventId> },
    DigitalUnit { events: Vec<EventSelectionDetail> },
}

impl From<&CartItemSelection> for SelectionDetails {
    fn from(selection: &CartItemSelection) -> Self {
        let flatten = |map: &std::collections::BTreeMap<EventId, Vec<PhotoId>>| {
            map.iter()
                .map(|(event_id, photo_ids)| EventSelectionDetail {
                    event_id: *event_id,
                    photo_ids: photo_ids.clone(),
                })
                .collect()
        };
        match selection {
            CartItemSelection::Album { photo_ids } => SelectionDetails::Album {
                photo_ids: photo_ids.clone(),
            },
            CartItemSelection::EventPhotosPerEvent { photos_by_event } => {
                SelectionDetails::EventPhotos {
                    events: flatten(photos_by_event),
                }
            }
            CartItemSelection::DigitalPackageFull => SelectionDetails::DigitalPackageFull,
            CartItemSelection::DigitalPackagePartial { event_ids } => {
                SelectionDetails::DigitalPackagePartial {
                    event_ids: event_ids.clone(),
                }
            }
            CartItemSelection::DigitalUnit { photos_by_event } => SelectionDetails::DigitalUnit {
                events: flatten(photos_by_event),
            },
        }
    }
}

/// One order item as the backend expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemPayload {
    pub product_id: ProductId,
    pub product_name: String,
    /// Normalized category tag: `album`, `event_photos` or `digital_files`.
    pub product_type: ProductCategory,
    pub unit_price: Money,
    pub quantity: u32,
    /// `unit_price * quantity`; the backend recomputes and compares.
    pub total_price: Money,
    pub selection_details: SelectionDetails,
}

/// Order-creation request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreationPayload {
    pub items: Vec<OrderItemPayload>,
    /// Declared total; must equal the sum of item `total_price`s.
    pub order_total: Money,
    pub payer: PayerDetails,
    pub shipping: ShippingDetails,
    pub created_at: DateTime<Utc>,
}

/// Project a finalized cart plus payer/shipping details into the
/// order-creation request.
///
/// An empty cart is refused; nothing else about the cart is revalidated here,
/// since every line was already priced and completeness-checked when it was
/// confirmed.
pub fn build_order_payload(
    cart: &Cart,
    payer: PayerDetails,
    shipping: ShippingDetails,
    created_at: DateTime<Utc>,
) -> DomainResult<OrderCreationPayload> {
    if cart.is_empty() {
        return Err(DomainError::validation("cannot create an order from an empty cart"));
    }

    let items = cart
        .items()
        .iter()
        .map(item_payload)
        .collect::<DomainResult<Vec<_>>>()?;
    let order_total = cart.subtotal()?;

    tracing::debug!(
        lines = items.len(),
        order_total = %order_total,
        "built order-creation payload"
    );

    Ok(OrderCreationPayload {
        items,
        order_total,
        payer,
        shipping,
        created_at,
    })
}

fn item_payload(item: &CartItem) -> DomainResult<OrderItemPayload> {
    Ok(OrderItemPayload {
        product_id: item.product_id,
        product_name: item.product_name.clone(),
        product_type: item.selection.category(),
        unit_price: item.unit_price,
        quantity: item.quantity,
        total_price: item.line_total()?,
        selection_details: SelectionDetails::from(&item.selection),
    })
}
