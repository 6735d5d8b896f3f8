//! Collaborator ports for the read side.
//!
//! The engine performs no I/O. Hosts implement these traits over whatever
//! transport they use (REST client, fixture data in tests) and hand the
//! resulting values to the selection engine.

use fotoforma_core::{CustomerId, DomainResult, InstitutionId, ProductId};

use crate::catalog::EventPhotoCatalog;
use crate::config::ProductConfiguration;

/// Source of the customer's event/photo catalog.
pub trait CatalogProvider {
    fn event_photo_catalog(&self, customer_id: CustomerId) -> DomainResult<EventPhotoCatalog>;
}

/// Source of per-institution product configurations.
pub trait ConfigurationProvider {
    fn product_configuration(
        &self,
        product_id: ProductId,
        institution_id: InstitutionId,
    ) -> DomainResult<ProductConfiguration>;
}
