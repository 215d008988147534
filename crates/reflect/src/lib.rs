//! Static metadata manifests and marker discovery.
//!
//! Rust has no live reflection, so every discoverable entity is described by a
//! static manifest entry ([`TypeInfo`], [`MethodInfo`], [`PropertyInfo`],
//! [`FieldInfo`]) carrying the markers it was declared with. Manifests are
//! grouped into [`Module`]s, which are either linked in at build time through
//! [`module!`] or registered at runtime in a [`ModuleTable`].
//!
//! # Key types
//!
//! | Type | Role |
//! |------|------|
//! | [`Marker`] | Any `'static` tag value attached to a type or member. |
//! | [`Module`] | Unit of failure isolation; lists its types or fails as a whole. |
//! | [`ModuleSource`] | Produces the set of modules a scan walks. |
//! | [`TypeQuery`] | Lazy, restartable query for types carrying a marker. |
//!
//! # Failure isolation
//!
//! A module whose listing fails contributes nothing to a scan. The failure is
//! logged and the scan moves on to the next module.

pub mod discovery;
mod macros;
pub mod marker;
pub mod meta;
pub mod module;

pub use discovery::{Types, TypeQuery, find_methods_with, find_properties_with, find_types_with};
pub use marker::{AmbiguousMarker, Annotated, Marker, count_markers, get_marker, has_marker};
pub use meta::{FieldInfo, MethodInfo, ParamInfo, PropertyInfo, TypeInfo, TypeKind};
pub use module::{LinkedModules, Module, ModuleReg, ModuleSource, ModuleTable, TypeListing, TypeLoadError};

#[doc(hidden)]
pub use inventory as __inventory;
