//! Static manifest entries describing types and their members.
//!
//! Entries are declared as `static` items using struct literal syntax. The
//! associated constants (`TypeInfo::CLASS`, `MethodInfo::STATIC`, ...) supply
//! defaults for struct update syntax:
//!
//! ```
//! use skyrpc_reflect::{MethodInfo, TypeInfo};
//!
//! static VESSEL: TypeInfo = TypeInfo {
//! 	name: "Vessel",
//! 	namespace: "SpaceCenter",
//! 	methods: &[MethodInfo { name: "Recover", ..MethodInfo::INSTANCE }],
//! 	..TypeInfo::CLASS
//! };
//!
//! assert_eq!(VESSEL.full_name(), "SpaceCenter.Vessel");
//! ```

use std::fmt;

use crate::marker::{Annotated, Marker};

/// Kind of a manifest type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
	/// Reference type with identity.
	Class,
	/// Value type.
	Struct,
	/// Enumeration backed by integer constants.
	Enum,
}

/// Manifest entry for a type.
pub struct TypeInfo {
	/// Bare type name, without namespace.
	pub name: &'static str,
	/// Dotted namespace the type lives in.
	pub namespace: &'static str,
	pub kind: TypeKind,
	pub is_public: bool,
	/// Static types cannot be instantiated; services are declared as static types.
	pub is_static: bool,
	pub markers: &'static [&'static dyn Marker],
	/// Base type, followed by inherited lookups.
	pub base: Option<&'static TypeInfo>,
	pub methods: &'static [MethodInfo],
	pub properties: &'static [PropertyInfo],
	pub fields: &'static [FieldInfo],
}

impl TypeInfo {
	/// Public instantiable class with no members.
	pub const CLASS: TypeInfo = TypeInfo {
		name: "",
		namespace: "",
		kind: TypeKind::Class,
		is_public: true,
		is_static: false,
		markers: &[],
		base: None,
		methods: &[],
		properties: &[],
		fields: &[],
	};

	/// Public static class with no members.
	pub const STATIC_CLASS: TypeInfo = TypeInfo {
		is_static: true,
		..TypeInfo::CLASS
	};

	/// Public enumeration with no constants.
	pub const ENUM: TypeInfo = TypeInfo {
		kind: TypeKind::Enum,
		..TypeInfo::CLASS
	};

	/// Namespace-qualified name.
	pub fn full_name(&self) -> String {
		if self.namespace.is_empty() {
			self.name.to_owned()
		} else {
			format!("{}.{}", self.namespace, self.name)
		}
	}

	/// Longest base chain [`lineage`](Self::lineage) follows. Base chains must be
	/// acyclic; a cyclic chain is cut off at this depth.
	pub const MAX_LINEAGE: usize = 64;

	/// This type followed by its base chain, most derived first.
	pub fn lineage(&'static self) -> impl Iterator<Item = &'static TypeInfo> {
		std::iter::successors(Some(self), |ty| ty.base).take(Self::MAX_LINEAGE)
	}

	/// Public static constant fields as `(name, value)` pairs, in declaration order.
	pub fn constants(&self) -> impl Iterator<Item = (&'static str, i32)> + use<> {
		self.fields
			.iter()
			.filter(|field| field.is_public && field.is_static)
			.filter_map(|field| field.constant.map(|value| (field.name, value)))
	}
}

impl fmt::Debug for TypeInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeInfo")
			.field("name", &self.full_name())
			.field("kind", &self.kind)
			.field("markers", &self.markers)
			.field("base", &self.base.map(|base| base.name))
			.finish_non_exhaustive()
	}
}

impl Annotated for TypeInfo {
	fn member_name(&self) -> &'static str {
		self.name
	}

	fn markers(&self) -> &'static [&'static dyn Marker] {
		self.markers
	}
}

/// A declared method parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamInfo {
	pub name: &'static str,
	pub type_name: &'static str,
}

/// Manifest entry for a method or property accessor.
#[derive(Debug)]
pub struct MethodInfo {
	pub name: &'static str,
	pub is_public: bool,
	pub is_static: bool,
	pub markers: &'static [&'static dyn Marker],
	pub params: &'static [ParamInfo],
	/// Return type name, `None` for methods returning nothing.
	pub returns: Option<&'static str>,
}

impl MethodInfo {
	/// Public instance method without parameters or return value.
	pub const INSTANCE: MethodInfo = MethodInfo {
		name: "",
		is_public: true,
		is_static: false,
		markers: &[],
		params: &[],
		returns: None,
	};

	/// Public static method without parameters or return value.
	pub const STATIC: MethodInfo = MethodInfo {
		is_static: true,
		..MethodInfo::INSTANCE
	};
}

impl Annotated for MethodInfo {
	fn member_name(&self) -> &'static str {
		self.name
	}

	fn markers(&self) -> &'static [&'static dyn Marker] {
		self.markers
	}
}

/// Manifest entry for a property.
///
/// Accessors are ordinary methods conventionally named `get_<Name>` and
/// `set_<Name>`. Either side may be absent.
#[derive(Debug)]
pub struct PropertyInfo {
	pub name: &'static str,
	pub markers: &'static [&'static dyn Marker],
	pub getter: Option<MethodInfo>,
	pub setter: Option<MethodInfo>,
}

impl PropertyInfo {
	/// Property without accessors or markers.
	pub const EMPTY: PropertyInfo = PropertyInfo {
		name: "",
		markers: &[],
		getter: None,
		setter: None,
	};

	/// Accessors that exist, getter first.
	pub fn accessors(&self) -> impl Iterator<Item = &MethodInfo> {
		self.getter.iter().chain(self.setter.iter())
	}

	/// True when every present accessor is static.
	pub fn is_static(&self) -> bool {
		self.accessors().all(|accessor| accessor.is_static)
	}

	/// True when every present accessor is public.
	pub fn is_public(&self) -> bool {
		self.accessors().all(|accessor| accessor.is_public)
	}
}

impl Annotated for PropertyInfo {
	fn member_name(&self) -> &'static str {
		self.name
	}

	fn markers(&self) -> &'static [&'static dyn Marker] {
		self.markers
	}
}

/// Manifest entry for a field. Only constants carry a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
	pub name: &'static str,
	pub is_public: bool,
	pub is_static: bool,
	pub constant: Option<i32>,
}

impl FieldInfo {
	/// Public static constant with the given value.
	pub const fn constant(name: &'static str, value: i32) -> Self {
		Self {
			name,
			is_public: true,
			is_static: true,
			constant: Some(value),
		}
	}
}
