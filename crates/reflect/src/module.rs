//! Loaded modules and the sources scans walk over.
//!
//! Each [`module!`](crate::module) invocation creates a static [`Module`] and
//! submits it via `inventory::submit!`. [`LinkedModules`] collects every
//! submission at scan time. [`ModuleTable`] adds modules registered after
//! startup and publishes its module list as an atomic snapshot.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::meta::TypeInfo;

/// Lists the types declared in a module.
pub type TypeListing = fn() -> Result<&'static [&'static TypeInfo], TypeLoadError>;

/// A module's types could not be listed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to load types from module {module}: {reason}")]
pub struct TypeLoadError {
	pub module: &'static str,
	pub reason: String,
}

/// A unit of code contributing manifest types.
#[derive(Clone, Copy)]
pub struct Module {
	pub name: &'static str,
	listing: TypeListing,
}

impl Module {
	/// Creates a module whose types are produced by `listing`.
	pub const fn new(name: &'static str, listing: TypeListing) -> Self {
		Self { name, listing }
	}

	/// Lists the module's types. Fails as a whole if any type cannot be loaded.
	pub fn types(&self) -> Result<&'static [&'static TypeInfo], TypeLoadError> {
		(self.listing)()
	}
}

impl fmt::Debug for Module {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Module").field(&self.name).finish()
	}
}

/// Wrapper for `inventory::collect!`.
pub struct ModuleReg(pub &'static Module);

inventory::collect!(ModuleReg);

/// Produces the set of modules a scan walks.
///
/// Called once per scan, so sources that change over time are observed by
/// later scans.
pub trait ModuleSource {
	fn modules(&self) -> Vec<Module>;
}

impl ModuleSource for [Module] {
	fn modules(&self) -> Vec<Module> {
		self.to_vec()
	}
}

impl<const N: usize> ModuleSource for [Module; N] {
	fn modules(&self) -> Vec<Module> {
		self.to_vec()
	}
}

/// Every module submitted through [`module!`](crate::module) in the final binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedModules;

impl ModuleSource for LinkedModules {
	fn modules(&self) -> Vec<Module> {
		inventory::iter::<ModuleReg>.into_iter().map(|reg| *reg.0).collect()
	}
}

/// Runtime-extensible module set.
///
/// Readers load the current list without locking; registration publishes a
/// new list atomically.
pub struct ModuleTable {
	modules: ArcSwap<Vec<Module>>,
}

impl ModuleTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self {
			modules: ArcSwap::from_pointee(Vec::new()),
		}
	}

	/// Creates a table seeded with every link-time module.
	pub fn with_linked() -> Self {
		Self {
			modules: ArcSwap::from_pointee(LinkedModules.modules()),
		}
	}

	/// Adds a module, replacing any module previously registered under the same name.
	pub fn register(&self, module: Module) {
		self.modules.rcu(|current| {
			let mut next: Vec<Module> = current.iter().filter(|m| m.name != module.name).copied().collect();
			next.push(module);
			Arc::new(next)
		});
		tracing::debug!(module = module.name, "module registered");
	}

	/// Number of registered modules.
	pub fn len(&self) -> usize {
		self.modules.load().len()
	}

	/// Returns true if no modules are registered.
	pub fn is_empty(&self) -> bool {
		self.modules.load().is_empty()
	}
}

impl Default for ModuleTable {
	fn default() -> Self {
		Self::new()
	}
}

impl ModuleSource for ModuleTable {
	fn modules(&self) -> Vec<Module> {
		self.modules.load().to_vec()
	}
}
