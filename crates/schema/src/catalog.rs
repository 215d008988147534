//! Published set of sealed services.
//!
//! # Lifecycle
//!
//! 1. Startup: the scan loop inserts sealed descriptors into a
//!    [`CatalogBuilder`], which rejects duplicate service names.
//! 2. Publication: [`CatalogBuilder::build`] produces an immutable
//!    [`CatalogSnapshot`] wrapped by a [`ServiceCatalog`].
//! 3. Steady state: request handlers call [`ServiceCatalog::load`] and read the
//!    snapshot without locking.
//! 4. Replacement: a re-scan builds a whole new snapshot and swaps it in with
//!    [`ServiceCatalog::replace`]. Readers holding the previous snapshot keep it
//!    alive until they drop it.

use std::sync::Arc;

use arc_swap::ArcSwap;
use rustc_hash::FxHashMap as HashMap;

use crate::error::SchemaError;
use crate::procedure::ProcedureDescriptor;
use crate::service::ServiceDescriptor;

/// Collects sealed services, enforcing unique names.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
	services: HashMap<String, ServiceDescriptor>,
}

impl CatalogBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn contains(&self, service: &str) -> bool {
		self.services.contains_key(service)
	}

	/// Adds a sealed service.
	pub fn insert(&mut self, service: ServiceDescriptor) -> Result<(), SchemaError> {
		if self.services.contains_key(service.name()) {
			return Err(SchemaError::DuplicateService {
				service: service.name().to_owned(),
			});
		}
		self.services.insert(service.name().to_owned(), service);
		Ok(())
	}

	pub fn build(self) -> CatalogSnapshot {
		CatalogSnapshot { services: self.services }
	}
}

/// Immutable view of every published service.
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
	services: HashMap<String, ServiceDescriptor>,
}

impl CatalogSnapshot {
	pub fn service(&self, name: &str) -> Option<&ServiceDescriptor> {
		self.services.get(name)
	}

	/// Resolves `<service>.<procedure>`.
	pub fn procedure(&self, service: &str, procedure: &str) -> Option<&ProcedureDescriptor> {
		self.service(service)?.procedure(procedure)
	}

	/// Services sorted by name.
	pub fn services(&self) -> Vec<&ServiceDescriptor> {
		let mut services: Vec<&ServiceDescriptor> = self.services.values().collect();
		services.sort_unstable_by(|a, b| a.name().cmp(b.name()));
		services
	}

	/// Number of services.
	pub fn len(&self) -> usize {
		self.services.len()
	}

	pub fn is_empty(&self) -> bool {
		self.services.is_empty()
	}
}

/// Atomically replaceable catalog shared with request handlers.
pub struct ServiceCatalog {
	current: ArcSwap<CatalogSnapshot>,
}

impl ServiceCatalog {
	pub fn new(snapshot: CatalogSnapshot) -> Self {
		Self {
			current: ArcSwap::from_pointee(snapshot),
		}
	}

	/// Current snapshot. Stays valid across later replacements.
	pub fn load(&self) -> Arc<CatalogSnapshot> {
		self.current.load_full()
	}

	/// Publishes `snapshot` and returns the one it replaced.
	pub fn replace(&self, snapshot: CatalogSnapshot) -> Arc<CatalogSnapshot> {
		let previous = self.current.swap(Arc::new(snapshot));
		tracing::info!(services = self.current.load().len(), replaced = previous.len(), "service catalog replaced");
		previous
	}
}

impl Default for ServiceCatalog {
	fn default() -> Self {
		Self::new(CatalogSnapshot::default())
	}
}

impl From<CatalogSnapshot> for ServiceCatalog {
	fn from(snapshot: CatalogSnapshot) -> Self {
		Self::new(snapshot)
	}
}
