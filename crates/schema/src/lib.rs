//! Service registry builder for the RPC server.
//!
//! Turns annotated manifests discovered by `skyrpc_reflect` into the schema
//! the server exposes: services, their procedures, and the classes and
//! enumerations they publish.
//!
//! # Key types
//!
//! | Type | Role |
//! |------|------|
//! | [`ServiceBuilder`] | Accumulates one service; enforces unique procedure names. |
//! | [`ServiceDescriptor`] | Sealed, read-only service schema. |
//! | [`Validator`] | Checks annotations and extracts service metadata. |
//! | [`Scanner`] | Walks modules and builds every annotated service. |
//! | [`ServiceCatalog`] | Atomically replaceable set of published services. |
//!
//! # Attribute tags
//!
//! Procedures carry string tags describing how clients should present them.
//! The grammar lives in [`tags`].

mod catalog;
mod config;
mod error;
mod handler;
pub mod markers;
mod phase;
mod procedure;
mod scan;
mod service;
pub mod tags;
mod validate;

pub use catalog::{CatalogBuilder, CatalogSnapshot, ServiceCatalog};
pub use config::{ConfigError, ScanOptions};
pub use error::{SchemaError, ValidationError};
pub use handler::{Handler, Parameter};
pub use markers::{ClassMarker, EnumMarker, ProcedureMarker, PropertyMarker, ServiceMarker};
pub use phase::Phase;
pub use procedure::ProcedureDescriptor;
pub use scan::{ScanError, ScanFailure, ScanReport, Scanner};
pub use service::{EnumValues, ServiceBuilder, ServiceDescriptor};
pub use validate::{MarkerValidator, Validator};
