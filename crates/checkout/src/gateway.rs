//! Order submission port.

use serde::{Deserialize, Serialize};

use fotoforma_core::{DomainResult, OrderId};

use crate::payload::OrderCreationPayload;

/// What the backend returns for a created order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: OrderId,
    /// Payment-gateway URL the customer is redirected to.
    pub checkout_redirect_url: String,
}

/// Collaborator port: hosts implement this over their order API client.
pub trait OrderGateway {
    fn submit_order(&self, payload: &OrderCreationPayload) -> DomainResult<OrderReceipt>;
}
