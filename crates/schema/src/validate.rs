//! Annotation validation and extraction.
//!
//! The builder never inspects markers itself; every shape check and every
//! value derived from a marker goes through a [`Validator`]. Errors are
//! returned to the caller unchanged.

use std::any::type_name;

use skyrpc_reflect::{AmbiguousMarker, Annotated, Marker, MethodInfo, PropertyInfo, TypeInfo, TypeKind, count_markers, get_marker};

use crate::error::ValidationError;
use crate::markers::{ClassMarker, EnumMarker, ProcedureMarker, PropertyMarker, ServiceMarker};
use crate::phase::Phase;

/// Checks annotated manifests and extracts service metadata.
pub trait Validator: Send + Sync {
	fn validate_service(&self, ty: &'static TypeInfo) -> Result<(), ValidationError>;

	/// Name a validated service type is exposed under.
	fn service_name(&self, ty: &'static TypeInfo) -> Result<String, ValidationError>;

	/// Phases a validated service type is active in.
	fn service_phase(&self, ty: &'static TypeInfo) -> Result<Phase, ValidationError>;

	fn validate_procedure(&self, method: &'static MethodInfo) -> Result<(), ValidationError>;

	fn validate_property(&self, property: &'static PropertyInfo) -> Result<(), ValidationError>;

	fn validate_class(&self, ty: &'static TypeInfo) -> Result<(), ValidationError>;

	fn validate_enum(&self, ty: &'static TypeInfo) -> Result<(), ValidationError>;

	fn validate_class_method(&self, method: &'static MethodInfo) -> Result<(), ValidationError>;

	fn validate_class_property(&self, property: &'static PropertyInfo) -> Result<(), ValidationError>;
}

/// Default validator built on the marker kinds in [`crate::markers`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerValidator;

fn ensure(ok: bool, subject: impl Into<String>, reason: &'static str) -> Result<(), ValidationError> {
	if ok { Ok(()) } else { Err(ValidationError::invalid(subject, reason)) }
}

/// Class members are reached through discovery, which already established the
/// marker (possibly inherited from an overridden base member). Only repeats fail.
fn at_most_one<M: Marker, A: Annotated + ?Sized>(member: &A) -> Result<(), ValidationError> {
	let found = count_markers::<M, A>(member);
	if found > 1 {
		return Err(AmbiguousMarker {
			member: member.member_name(),
			marker: type_name::<M>(),
			found,
		}
		.into());
	}
	Ok(())
}

impl Validator for MarkerValidator {
	fn validate_service(&self, ty: &'static TypeInfo) -> Result<(), ValidationError> {
		let marker = get_marker::<ServiceMarker, _>(ty)?;
		ensure(ty.is_public, ty.full_name(), "service type must be public")?;
		ensure(ty.is_static, ty.full_name(), "service type must be static")?;
		ensure(marker.name.is_none_or(|name| !name.is_empty()), ty.full_name(), "service name must not be empty")
	}

	fn service_name(&self, ty: &'static TypeInfo) -> Result<String, ValidationError> {
		let marker = get_marker::<ServiceMarker, _>(ty)?;
		Ok(marker.name.unwrap_or(ty.name).to_owned())
	}

	fn service_phase(&self, ty: &'static TypeInfo) -> Result<Phase, ValidationError> {
		Ok(get_marker::<ServiceMarker, _>(ty)?.phase)
	}

	fn validate_procedure(&self, method: &'static MethodInfo) -> Result<(), ValidationError> {
		get_marker::<ProcedureMarker, _>(method)?;
		ensure(method.is_public, method.name, "procedure must be public")?;
		ensure(method.is_static, method.name, "procedure must be static")
	}

	fn validate_property(&self, property: &'static PropertyInfo) -> Result<(), ValidationError> {
		get_marker::<PropertyMarker, _>(property)?;
		ensure(property.accessors().next().is_some(), property.name, "property has no accessors")?;
		ensure(property.is_public(), property.name, "property accessors must be public")?;
		ensure(property.is_static(), property.name, "property accessors must be static")
	}

	fn validate_class(&self, ty: &'static TypeInfo) -> Result<(), ValidationError> {
		get_marker::<ClassMarker, _>(ty)?;
		ensure(ty.is_public, ty.full_name(), "class must be public")?;
		ensure(ty.kind == TypeKind::Class, ty.full_name(), "class marker on a non-class type")?;
		ensure(!ty.is_static, ty.full_name(), "class must not be static")
	}

	fn validate_enum(&self, ty: &'static TypeInfo) -> Result<(), ValidationError> {
		get_marker::<EnumMarker, _>(ty)?;
		ensure(ty.is_public, ty.full_name(), "enumeration must be public")?;
		ensure(ty.kind == TypeKind::Enum, ty.full_name(), "enumeration marker on a non-enum type")
	}

	fn validate_class_method(&self, method: &'static MethodInfo) -> Result<(), ValidationError> {
		at_most_one::<ProcedureMarker, _>(method)?;
		ensure(method.is_public, method.name, "class method must be public")
	}

	fn validate_class_property(&self, property: &'static PropertyInfo) -> Result<(), ValidationError> {
		at_most_one::<PropertyMarker, _>(property)?;
		ensure(property.accessors().next().is_some(), property.name, "class property has no accessors")?;
		ensure(property.is_public(), property.name, "class property accessors must be public")?;
		ensure(
			property.accessors().all(|accessor| !accessor.is_static),
			property.name,
			"class property accessors must not be static",
		)
	}
}
