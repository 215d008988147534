//! Per-service schema aggregation.
//!
//! # Mental model
//!
//! * [`ServiceBuilder`] is owned by the scan loop and receives typed add calls.
//!   Every add funnels through [`ServiceBuilder::add_procedure`], which is the
//!   only place procedure-name uniqueness is checked.
//! * [`ServiceBuilder::seal`] moves the accumulated state into a
//!   [`ServiceDescriptor`], which has no mutation API and is shared read-only
//!   with the RPC server.
//!
//! # Naming
//!
//! * Service-level methods keep their own name; property procedures take the
//!   accessor's name (`get_X` / `set_X`).
//! * Class members are named `<Class>_<Method>` using the underlying method or
//!   accessor name.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use skyrpc_reflect::{MethodInfo, PropertyInfo, TypeInfo};

use crate::error::SchemaError;
use crate::handler::Handler;
use crate::phase::Phase;
use crate::procedure::ProcedureDescriptor;
use crate::tags;
use crate::validate::Validator;


/// Constant name to value, in declaration order.
pub type EnumValues = IndexMap<String, i32>;

/// Accumulates one service's procedures, classes and enumerations.
pub struct ServiceBuilder<'v> {
	name: String,
	phase: Option<Phase>,
	procedures: HashMap<String, ProcedureDescriptor>,
	classes: HashSet<String>,
	enumerations: HashMap<String, EnumValues>,
	validator: &'v dyn Validator,
}

impl<'v> ServiceBuilder<'v> {
	/// Creates a builder for an annotated service type.
	pub fn from_type(ty: &'static TypeInfo, validator: &'v dyn Validator) -> Result<Self, SchemaError> {
		validator.validate_service(ty)?;
		let name = validator.service_name(ty)?;
		let phase = validator.service_phase(ty)?;
		Ok(Self::with_phase(name, Some(phase), validator))
	}

	/// Creates a builder for a manually assembled service with no phase.
	pub fn named(name: impl Into<String>, validator: &'v dyn Validator) -> Self {
		Self::with_phase(name.into(), None, validator)
	}

	fn with_phase(name: String, phase: Option<Phase>, validator: &'v dyn Validator) -> Self {
		Self {
			name,
			phase,
			procedures: HashMap::default(),
			classes: HashSet::default(),
			enumerations: HashMap::default(),
			validator,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn phase(&self) -> Option<Phase> {
		self.phase
	}

	pub fn procedure(&self, name: &str) -> Option<&ProcedureDescriptor> {
		self.procedures.get(name)
	}

	pub fn has_class(&self, name: &str) -> bool {
		self.classes.contains(name)
	}

	/// Number of procedures added so far.
	pub fn len(&self) -> usize {
		self.procedures.len()
	}

	/// Returns true if no procedures have been added.
	pub fn is_empty(&self) -> bool {
		self.procedures.is_empty()
	}

	/// Adds a procedure under `name`.
	pub fn add_procedure(&mut self, name: impl Into<String>, handler: Handler, attributes: Vec<String>) -> Result<(), SchemaError> {
		let name = name.into();
		if self.procedures.contains_key(&name) {
			return Err(SchemaError::DuplicateProcedure {
				service: self.name.clone(),
				procedure: name,
			});
		}
		tracing::debug!(service = %self.name, procedure = %name, handler = %handler.describe(), "procedure added");
		let descriptor = ProcedureDescriptor::new(self.name.clone(), name.clone(), handler, self.phase, attributes);
		self.procedures.insert(name, descriptor);
		Ok(())
	}

	/// Adds a service-level procedure for an annotated static method.
	pub fn add_procedure_from_method(&mut self, method: &'static MethodInfo) -> Result<(), SchemaError> {
		self.validator.validate_procedure(method)?;
		self.add_procedure(method.name, Handler::Plain(method), Vec::new())
	}

	/// Adds one procedure per accessor of an annotated service-level property.
	pub fn add_procedure_from_property(&mut self, property: &'static PropertyInfo) -> Result<(), SchemaError> {
		self.validator.validate_property(property)?;
		if let Some(getter) = &property.getter {
			self.add_procedure(getter.name, Handler::Plain(getter), vec![tags::property_get(property.name)])?;
		}
		if let Some(setter) = &property.setter {
			self.add_procedure(setter.name, Handler::Plain(setter), vec![tags::property_set(property.name)])?;
		}
		Ok(())
	}

	/// Registers an annotated class and returns its name.
	pub fn add_class(&mut self, ty: &'static TypeInfo) -> Result<String, SchemaError> {
		self.validator.validate_class(ty)?;
		let name = ty.name.to_owned();
		if self.classes.contains(&name) {
			return Err(SchemaError::DuplicateClass {
				service: self.name.clone(),
				class: name,
			});
		}
		self.classes.insert(name.clone());
		Ok(name)
	}

	/// Registers an annotated enumeration with its public static constants.
	pub fn add_enumeration(&mut self, ty: &'static TypeInfo) -> Result<&EnumValues, SchemaError> {
		self.validator.validate_enum(ty)?;
		let name = ty.name.to_owned();
		if self.enumerations.contains_key(&name) {
			return Err(SchemaError::DuplicateEnum {
				service: self.name.clone(),
				enumeration: name,
			});
		}
		let values: EnumValues = ty.constants().map(|(constant, value)| (constant.to_owned(), value)).collect();
		Ok(self.enumerations.entry(name).or_insert(values))
	}

	/// Adds a method of a registered class.
	///
	/// Instance methods take the target instance as parameter 0; static methods
	/// take no implicit parameter. The method still passes through
	/// [`Validator::validate_class_method`]; [`MarkerValidator`](crate::MarkerValidator)
	/// accepts an unmarked method but rejects repeated markers and non-public methods.
	pub fn add_class_method(&mut self, class: &str, method: &'static MethodInfo) -> Result<(), SchemaError> {
		self.require_class(class, method.name)?;
		self.validator.validate_class_method(method)?;
		let name = tags::class_member_name(class, method.name);
		if method.is_static {
			let attributes = vec![tags::class_static_method(&self.name, class, method.name)];
			self.add_procedure(name, Handler::Static(method), attributes)
		} else {
			let attributes = vec![
				tags::class_method(&self.name, class, method.name),
				tags::parameter_class(0, &self.name, class),
			];
			self.add_procedure(name, self.instance_handler(class, method), attributes)
		}
	}

	/// Adds one procedure per accessor of a property of a registered class.
	///
	/// The property passes through [`Validator::validate_class_property`] first;
	/// [`MarkerValidator`](crate::MarkerValidator) requires public, non-static
	/// accessors but not the marker itself.
	pub fn add_class_property(&mut self, class: &str, property: &'static PropertyInfo) -> Result<(), SchemaError> {
		self.require_class(class, property.name)?;
		self.validator.validate_class_property(property)?;
		if let Some(getter) = &property.getter {
			let attributes = vec![
				tags::class_property_get(&self.name, class, property.name),
				tags::parameter_class(0, &self.name, class),
			];
			self.add_procedure(tags::class_member_name(class, getter.name), self.instance_handler(class, getter), attributes)?;
		}
		if let Some(setter) = &property.setter {
			let attributes = vec![
				tags::class_property_set(&self.name, class, property.name),
				tags::parameter_class(0, &self.name, class),
			];
			self.add_procedure(tags::class_member_name(class, setter.name), self.instance_handler(class, setter), attributes)?;
		}
		Ok(())
	}

	fn require_class(&self, class: &str, member: &str) -> Result<(), SchemaError> {
		if self.classes.contains(class) {
			Ok(())
		} else {
			Err(SchemaError::UnknownClass {
				service: self.name.clone(),
				class: class.to_owned(),
				member: member.to_owned(),
			})
		}
	}

	fn instance_handler(&self, class: &str, method: &'static MethodInfo) -> Handler {
		Handler::Instance {
			class: format!("{}.{class}", self.name),
			method,
		}
	}

	/// Finishes building. The descriptor cannot be mutated afterwards.
	pub fn seal(self) -> ServiceDescriptor {
		tracing::debug!(
			service = %self.name,
			procedures = self.procedures.len(),
			classes = self.classes.len(),
			enumerations = self.enumerations.len(),
			"service sealed"
		);
		ServiceDescriptor {
			name: self.name,
			phase: self.phase,
			procedures: self.procedures,
			classes: self.classes,
			enumerations: self.enumerations,
		}
	}
}

/// Read-only schema of one service.
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
	name: String,
	phase: Option<Phase>,
	procedures: HashMap<String, ProcedureDescriptor>,
	classes: HashSet<String>,
	enumerations: HashMap<String, EnumValues>,
}

impl ServiceDescriptor {
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Phases the service is active in; `None` for manually assembled services.
	pub fn phase(&self) -> Option<Phase> {
		self.phase
	}

	pub fn procedure(&self, name: &str) -> Option<&ProcedureDescriptor> {
		self.procedures.get(name)
	}

	/// All procedures, in no particular order.
	pub fn procedures(&self) -> impl Iterator<Item = &ProcedureDescriptor> {
		self.procedures.values()
	}

	/// Procedure names, sorted.
	pub fn procedure_names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.procedures.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}

	pub fn has_class(&self, name: &str) -> bool {
		self.classes.contains(name)
	}

	/// Class names, sorted.
	pub fn classes(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.classes.iter().map(String::as_str).collect();
		names.sort_unstable();
		names
	}

	pub fn enumeration(&self, name: &str) -> Option<&EnumValues> {
		self.enumerations.get(name)
	}

	/// Enumerations with their values, in no particular order.
	pub fn enumerations(&self) -> impl Iterator<Item = (&str, &EnumValues)> {
		self.enumerations.iter().map(|(name, values)| (name.as_str(), values))
	}
}
