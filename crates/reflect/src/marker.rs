//! Marker lookup on annotated types and members.
//!
//! A marker is any `'static` value attached to a manifest entry. Lookups are
//! keyed by the marker's concrete type and never follow inheritance; see
//! [`crate::discovery`] for inherited type scans.

use std::any::{Any, type_name};
use std::fmt;

/// A declarative tag attached to a type or member.
///
/// Implemented for every `'static` value that is `Debug + Send + Sync`, so
/// marker kinds are plain structs.
pub trait Marker: Any + Send + Sync + fmt::Debug {}

impl<T: Any + Send + Sync + fmt::Debug> Marker for T {}

/// Anything that carries markers: types, methods and properties.
pub trait Annotated {
	/// Name used in diagnostics.
	fn member_name(&self) -> &'static str;

	/// Markers declared directly on this entity.
	fn markers(&self) -> &'static [&'static dyn Marker];
}

/// Marker lookup found zero or several instances where exactly one was required.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected exactly one {marker} marker on {member}, found {found}")]
pub struct AmbiguousMarker {
	/// Member the lookup was performed on.
	pub member: &'static str,
	/// Type name of the requested marker kind.
	pub marker: &'static str,
	/// Number of matching markers actually attached.
	pub found: usize,
}

fn downcast<M: Marker>(marker: &'static dyn Marker) -> Option<&'static M> {
	let any: &'static dyn Any = marker;
	any.downcast_ref::<M>()
}

fn matching<M: Marker>(markers: &'static [&'static dyn Marker]) -> impl Iterator<Item = &'static M> {
	markers.iter().filter_map(|marker| downcast::<M>(*marker))
}

/// Counts the markers of kind `M` declared on `member`.
pub fn count_markers<M: Marker, A: Annotated + ?Sized>(member: &A) -> usize {
	matching::<M>(member.markers()).count()
}

/// Returns the single marker of kind `M` declared on `member`.
///
/// Zero or multiple instances is an annotation error.
pub fn get_marker<M: Marker, A: Annotated + ?Sized>(member: &A) -> Result<&'static M, AmbiguousMarker> {
	let mut found = matching::<M>(member.markers());
	match (found.next(), found.next()) {
		(Some(marker), None) => Ok(marker),
		_ => Err(AmbiguousMarker {
			member: member.member_name(),
			marker: type_name::<M>(),
			found: count_markers::<M, A>(member),
		}),
	}
}

/// Returns true if `member` declares exactly one marker of kind `M`.
pub fn has_marker<M: Marker, A: Annotated + ?Sized>(member: &A) -> bool {
	count_markers::<M, A>(member) == 1
}
