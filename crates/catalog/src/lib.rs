//! `fotoforma-catalog` — product configurations and the event/photo catalog.
//!
//! Per-institution product rules (how many photos, at what price, in which
//! sales mode) plus the read-only catalog of photographed events the customer
//! picks from. Also defines the collaborator ports the host implements to feed
//! this data in.

pub mod catalog;
pub mod config;
pub mod ports;

pub use catalog::{EventGroup, EventPhotoCatalog, Photo};
pub use config::{
    AlbumConfig, DigitalFilesConfig, EventPackageRule, EventPhotosConfig, EventRule,
    ProductCategory, ProductConfiguration,
};
pub use ports::{CatalogProvider, ConfigurationProvider};
