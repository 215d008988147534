//! Marker discovery across modules and within types.
//!
//! # Mental model
//!
//! * A [`TypeQuery`] is a description of a scan, not its result. Each call to
//!   [`TypeQuery::iter`] asks the [`ModuleSource`] for its current modules and
//!   lists them one at a time as the iterator advances.
//! * A module whose listing fails yields nothing; the remaining modules are
//!   still scanned.
//! * Member queries walk a single, already loaded type and cannot fail.
//!
//! # Inheritance
//!
//! * Types: with `include_inherited`, a type matches when it or any type in its
//!   base chain carries the marker.
//! * Members: public members declared on base types are always visited. Each
//!   name is reported once, as its most derived declaration.
//! * Member markers: a declaration matches when it carries the marker itself or,
//!   with `include_inherited`, when a same-named declaration further up the
//!   base chain carries it (an unmarked override of a marked member).

use std::marker::PhantomData;

use crate::marker::{Annotated, Marker, count_markers};
use crate::meta::{MethodInfo, PropertyInfo, TypeInfo};
use crate::module::{Module, ModuleSource};


const NO_TYPES: &[&TypeInfo] = &[];

/// Lazy query for every type carrying marker `M`.
pub struct TypeQuery<'s, M, S: ?Sized> {
	source: &'s S,
	include_inherited: bool,
	_marker: PhantomData<fn() -> M>,
}

/// Builds a query for all types in `source` carrying marker `M`.
pub fn find_types_with<M: Marker, S: ModuleSource + ?Sized>(source: &S, include_inherited: bool) -> TypeQuery<'_, M, S> {
	TypeQuery {
		source,
		include_inherited,
		_marker: PhantomData,
	}
}

impl<M: Marker, S: ModuleSource + ?Sized> TypeQuery<'_, M, S> {
	/// Starts a fresh scan over the source's current modules.
	pub fn iter(&self) -> Types<M> {
		Types {
			modules: self.source.modules().into_iter(),
			current: NO_TYPES.iter(),
			include_inherited: self.include_inherited,
			_marker: PhantomData,
		}
	}
}

impl<M: Marker, S: ModuleSource + ?Sized> IntoIterator for &TypeQuery<'_, M, S> {
	type Item = &'static TypeInfo;
	type IntoIter = Types<M>;

	fn into_iter(self) -> Types<M> {
		self.iter()
	}
}

/// Iterator produced by [`TypeQuery::iter`].
pub struct Types<M> {
	modules: std::vec::IntoIter<Module>,
	current: std::slice::Iter<'static, &'static TypeInfo>,
	include_inherited: bool,
	_marker: PhantomData<fn() -> M>,
}

impl<M: Marker> Iterator for Types<M> {
	type Item = &'static TypeInfo;

	fn next(&mut self) -> Option<&'static TypeInfo> {
		loop {
			for &ty in self.current.by_ref() {
				if carries::<M>(ty, self.include_inherited) {
					return Some(ty);
				}
			}
			let module = self.modules.next()?;
			self.current = load_types(&module).iter();
		}
	}
}

fn load_types(module: &Module) -> &'static [&'static TypeInfo] {
	match module.types() {
		Ok(types) => types,
		Err(err) => {
			tracing::debug!(module = module.name, error = %err, "skipping module with unloadable types");
			&[]
		}
	}
}

fn carries<M: Marker>(ty: &'static TypeInfo, include_inherited: bool) -> bool {
	if include_inherited {
		ty.lineage().any(|ty| count_markers::<M, _>(ty) > 0)
	} else {
		count_markers::<M, _>(ty) > 0
	}
}

/// Methods of `ty` and its base types carrying marker `M`.
pub fn find_methods_with<M: Marker>(ty: &'static TypeInfo, include_inherited: bool) -> impl Iterator<Item = &'static MethodInfo> {
	members::<M, _>(ty, include_inherited, |ty| ty.methods)
}

/// Properties of `ty` and its base types carrying marker `M`.
pub fn find_properties_with<M: Marker>(ty: &'static TypeInfo, include_inherited: bool) -> impl Iterator<Item = &'static PropertyInfo> {
	members::<M, _>(ty, include_inherited, |ty| ty.properties)
}

fn members<M: Marker, T: Annotated + 'static>(
	ty: &'static TypeInfo,
	include_inherited: bool,
	declared: fn(&'static TypeInfo) -> &'static [T],
) -> impl Iterator<Item = &'static T> {
	ty.lineage().enumerate().flat_map(move |(level, owner)| {
		declared(owner).iter().filter(move |member| {
			let name = member.member_name();
			let overridden = ty.lineage().take(level).any(|derived| declaration(declared(derived), name).is_some());
			!overridden
				&& (count_markers::<M, T>(*member) > 0
					|| (include_inherited && inherits_marker::<M, T>(owner, name, declared)))
		})
	})
}

fn declaration<T: Annotated>(members: &'static [T], name: &str) -> Option<&'static T> {
	members.iter().find(|member| member.member_name() == name)
}

fn inherits_marker<M: Marker, T: Annotated + 'static>(
	owner: &'static TypeInfo,
	name: &str,
	declared: fn(&'static TypeInfo) -> &'static [T],
) -> bool {
	owner
		.lineage()
		.skip(1)
		.filter_map(|ancestor| declaration(declared(ancestor), name))
		.any(|base| count_markers::<M, T>(base) > 0)
}
