//! Marker kinds recognised by the schema builder.
//!
//! Class methods and class properties reuse [`ProcedureMarker`] and
//! [`PropertyMarker`]; they are only visited on types marked [`ClassMarker`].

use crate::phase::Phase;

/// Marks a static type as an RPC service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceMarker {
	/// Service name; the type name when `None`.
	pub name: Option<&'static str>,
	/// Phases the service is active in.
	pub phase: Phase,
}

impl ServiceMarker {
	/// Service named after its type, active in every phase.
	pub const DEFAULT: ServiceMarker = ServiceMarker {
		name: None,
		phase: Phase::ALL,
	};
}

/// Marks a method as a remote procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcedureMarker;

/// Marks a property whose accessors become remote procedures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyMarker;

/// Marks a type as a class exposed by `service`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassMarker {
	pub service: &'static str,
}

/// Marks an enumeration exposed by `service`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumMarker {
	pub service: &'static str,
}
