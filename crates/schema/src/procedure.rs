use crate::handler::{Handler, Parameter};
use crate::phase::Phase;

/// A remote-callable operation within a service.
#[derive(Debug, Clone)]
pub struct ProcedureDescriptor {
	service: String,
	name: String,
	handler: Handler,
	phase: Option<Phase>,
	attributes: Vec<String>,
}

impl ProcedureDescriptor {
	pub fn new(service: impl Into<String>, name: impl Into<String>, handler: Handler, phase: Option<Phase>, attributes: Vec<String>) -> Self {
		Self {
			service: service.into(),
			name: name.into(),
			handler,
			phase,
			attributes,
		}
	}

	/// Owning service name.
	pub fn service(&self) -> &str {
		&self.service
	}

	/// Procedure name, unique within the service.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// `<service>.<procedure>`.
	pub fn full_name(&self) -> String {
		format!("{}.{}", self.service, self.name)
	}

	pub fn handler(&self) -> &Handler {
		&self.handler
	}

	/// Phases the procedure is callable in; `None` when the service has no phase.
	pub fn phase(&self) -> Option<Phase> {
		self.phase
	}

	/// Free-form documentation tags, see [`crate::tags`].
	pub fn attributes(&self) -> &[String] {
		&self.attributes
	}

	/// Returns true if `tag` is among the attributes.
	pub fn has_attribute(&self, tag: &str) -> bool {
		self.attributes.iter().any(|attribute| attribute == tag)
	}

	pub fn parameters(&self) -> Vec<Parameter> {
		self.handler.parameters()
	}

	pub fn return_type(&self) -> Option<&'static str> {
		self.handler.return_type()
	}
}
