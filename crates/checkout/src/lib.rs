//! `fotoforma-checkout` — projecting a finalized cart into an order request.
//!
//! The only place selection data crosses the external boundary. The payload
//! shape is a stable contract: the backend independently recomputes every
//! price from the same configuration snapshot concept and rejects orders
//! whose declared totals disagree.

pub mod gateway;
pub mod payload;

pub use gateway::{OrderGateway, OrderReceipt};
pub use payload::{
    build_order_payload, EventSelectionDetail, OrderCreationPayload, OrderItemPayload,
    PayerDetails, SelectionDetails, ShippingDetails,
};
