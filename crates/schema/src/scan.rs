//! Startup scan feeding discovered manifests into service builders.
//!
//! # Data flow
//!
//! 1. Services: every type marked [`ServiceMarker`] gets a [`ServiceBuilder`]
//!    with its marked procedures and properties.
//! 2. Classes: every type marked [`ClassMarker`] is routed to the builder named
//!    by the marker, registered, then its marked methods and properties added.
//! 3. Enumerations: every type marked [`EnumMarker`] is routed the same way.
//! 4. Publication: surviving builders are sealed into a [`CatalogSnapshot`].
//!
//! # Failure modes
//!
//! * Any error while building a service discards that service only; later
//!   classes and enumerations naming it are skipped.
//! * Two service types with the same name discard both.
//! * With [`ScanOptions::abort_on_error`] the first failure ends the scan.

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use skyrpc_reflect::{Module, ModuleSource, TypeInfo, find_methods_with, find_properties_with, find_types_with, get_marker};

use crate::catalog::{CatalogBuilder, CatalogSnapshot};
use crate::config::ScanOptions;
use crate::error::SchemaError;
use crate::markers::{ClassMarker, EnumMarker, ProcedureMarker, PropertyMarker, ServiceMarker};
use crate::service::ServiceBuilder;
use crate::validate::Validator;

#[cfg(test)]
mod tests;

/// Why a service or type was dropped from the scan.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
	#[error("{ty} belongs to unknown service {service}")]
	UnknownService { service: String, ty: String },

	#[error(transparent)]
	Schema(#[from] SchemaError),
}

/// A failure attributed to a service (or, when no service can be named, a type).
#[derive(Debug, thiserror::Error)]
#[error("failed to register {subject}: {error}")]
pub struct ScanFailure {
	pub subject: String,
	#[source]
	pub error: ScanError,
}

/// Outcome of a completed scan.
#[derive(Debug)]
pub struct ScanReport {
	pub catalog: CatalogSnapshot,
	/// Services dropped along the way, in discovery order.
	pub failures: Vec<ScanFailure>,
}

/// Drives discovery and service building.
pub struct Scanner<'v> {
	options: ScanOptions,
	validator: &'v dyn Validator,
}

struct Excluding<'a, S: ?Sized> {
	source: &'a S,
	options: &'a ScanOptions,
}

impl<S: ModuleSource + ?Sized> ModuleSource for Excluding<'_, S> {
	fn modules(&self) -> Vec<Module> {
		let mut modules = self.source.modules();
		modules.retain(|module| {
			let excluded = self.options.is_excluded(module.name);
			if excluded {
				tracing::debug!(module = module.name, "module excluded from scan");
			}
			!excluded
		});
		modules
	}
}

struct ScanRun<'v> {
	builders: HashMap<String, ServiceBuilder<'v>>,
	dropped: HashSet<String>,
	failures: Vec<ScanFailure>,
	abort_on_error: bool,
}

impl<'v> ScanRun<'v> {
	fn fail(&mut self, subject: String, error: ScanError) -> Result<(), ScanFailure> {
		tracing::error!(subject = %subject, error = %error, "service registration failed");
		self.builders.remove(&subject);
		self.dropped.insert(subject.clone());
		let failure = ScanFailure { subject, error };
		if self.abort_on_error {
			return Err(failure);
		}
		self.failures.push(failure);
		Ok(())
	}

	/// Builder for `service`, or `None` if the service was dropped or never declared.
	fn route(&mut self, service: &str, ty: &'static TypeInfo) -> Result<Option<&mut ServiceBuilder<'v>>, ScanFailure> {
		if self.dropped.contains(service) {
			tracing::debug!(service, ty = %ty.full_name(), "skipping type of dropped service");
			return Ok(None);
		}
		if !self.builders.contains_key(service) {
			let error = ScanError::UnknownService {
				service: service.to_owned(),
				ty: ty.full_name(),
			};
			self.fail(service.to_owned(), error)?;
			return Ok(None);
		}
		Ok(self.builders.get_mut(service))
	}
}

impl<'v> Scanner<'v> {
	pub fn new(options: ScanOptions, validator: &'v dyn Validator) -> Self {
		Self { options, validator }
	}

	pub fn options(&self) -> &ScanOptions {
		&self.options
	}

	/// Scans `source` and publishes every service that built cleanly.
	pub fn scan<S: ModuleSource + ?Sized>(&self, source: &S) -> Result<ScanReport, ScanFailure> {
		let modules = Excluding {
			source,
			options: &self.options,
		};
		let mut run = ScanRun {
			builders: HashMap::default(),
			dropped: HashSet::default(),
			failures: Vec::new(),
			abort_on_error: self.options.abort_on_error,
		};

		for ty in find_types_with::<ServiceMarker, _>(&modules, false).iter() {
			let service = self.validator.service_name(ty).unwrap_or_else(|_| ty.full_name());
			if run.dropped.contains(&service) {
				run.fail(service.clone(), SchemaError::DuplicateService { service }.into())?;
				continue;
			}
			if run.builders.contains_key(&service) {
				run.fail(service.clone(), SchemaError::DuplicateService { service }.into())?;
				continue;
			}
			match self.build_service(ty) {
				Ok(builder) => {
					run.builders.insert(service, builder);
				}
				Err(err) => run.fail(service, err.into())?,
			}
		}

		for ty in find_types_with::<ClassMarker, _>(&modules, false).iter() {
			let service = match get_marker::<ClassMarker, _>(ty) {
				Ok(marker) => marker.service,
				Err(err) => {
					run.fail(ty.full_name(), SchemaError::from(err).into())?;
					continue;
				}
			};
			let Some(builder) = run.route(service, ty)? else { continue };
			if let Err(err) = self.register_class(builder, ty) {
				run.fail(service.to_owned(), err.into())?;
			}
		}

		for ty in find_types_with::<EnumMarker, _>(&modules, false).iter() {
			let service = match get_marker::<EnumMarker, _>(ty) {
				Ok(marker) => marker.service,
				Err(err) => {
					run.fail(ty.full_name(), SchemaError::from(err).into())?;
					continue;
				}
			};
			let Some(builder) = run.route(service, ty)? else { continue };
			if let Err(err) = builder.add_enumeration(ty) {
				run.fail(service.to_owned(), err.into())?;
			}
		}

		let mut builders: Vec<_> = run.builders.drain().collect();
		builders.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
		let mut catalog = CatalogBuilder::new();
		for (service, builder) in builders {
			if let Err(err) = catalog.insert(builder.seal()) {
				run.fail(service, err.into())?;
			}
		}

		let catalog = catalog.build();
		tracing::info!(services = catalog.len(), failures = run.failures.len(), "service scan complete");
		Ok(ScanReport {
			catalog,
			failures: run.failures,
		})
	}

	fn build_service(&self, ty: &'static TypeInfo) -> Result<ServiceBuilder<'v>, SchemaError> {
		let inherit = self.options.include_inherited;
		let mut builder = ServiceBuilder::from_type(ty, self.validator)?;
		for method in find_methods_with::<ProcedureMarker>(ty, inherit) {
			builder.add_procedure_from_method(method)?;
		}
		for property in find_properties_with::<PropertyMarker>(ty, inherit) {
			builder.add_procedure_from_property(property)?;
		}
		Ok(builder)
	}

	fn register_class(&self, builder: &mut ServiceBuilder<'v>, ty: &'static TypeInfo) -> Result<(), SchemaError> {
		let inherit = self.options.include_inherited;
		let class = builder.add_class(ty)?;
		for method in find_methods_with::<ProcedureMarker>(ty, inherit) {
			builder.add_class_method(&class, method)?;
		}
		for property in find_properties_with::<PropertyMarker>(ty, inherit) {
			builder.add_class_property(&class, property)?;
		}
		Ok(())
	}
}
