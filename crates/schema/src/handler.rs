//! Invocation handlers attached to procedures.
//!
//! The variant is chosen from the statically known `is_static` flag of the
//! underlying method; dispatch never inspects the target at runtime.

use skyrpc_reflect::MethodInfo;

/// How a procedure reaches its underlying method.
#[derive(Debug, Clone)]
pub enum Handler {
	/// Service-level method or property accessor.
	Plain(&'static MethodInfo),
	/// Instance member of a class; parameter 0 is the target instance.
	Instance {
		/// Qualified class name, `<service>.<class>`.
		class: String,
		method: &'static MethodInfo,
	},
	/// Static member of a class.
	Static(&'static MethodInfo),
}

/// A parameter as seen by remote callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
	pub name: &'static str,
	pub type_name: String,
}

impl Handler {
	/// The wrapped method.
	pub fn method(&self) -> &'static MethodInfo {
		match self {
			Self::Plain(method) | Self::Static(method) | Self::Instance { method, .. } => *method,
		}
	}

	/// Returns true if calls carry a target instance as parameter 0.
	pub fn is_instance(&self) -> bool {
		matches!(self, Self::Instance { .. })
	}

	/// Parameters remote callers supply, including the implicit `this`.
	pub fn parameters(&self) -> Vec<Parameter> {
		let declared = self.method().params.iter().map(|param| Parameter {
			name: param.name,
			type_name: param.type_name.to_owned(),
		});
		match self {
			Self::Instance { class, .. } => std::iter::once(Parameter {
				name: "this",
				type_name: format!("Class({class})"),
			})
			.chain(declared)
			.collect(),
			Self::Plain(_) | Self::Static(_) => declared.collect(),
		}
	}

	/// Return type name of the wrapped method.
	pub fn return_type(&self) -> Option<&'static str> {
		self.method().returns
	}

	/// Short description for tracing/logging.
	pub fn describe(&self) -> String {
		match self {
			Self::Plain(method) => format!("plain:{}", method.name),
			Self::Instance { class, method } => format!("instance:{class}.{}", method.name),
			Self::Static(method) => format!("static:{}", method.name),
		}
	}
}
