use skyrpc_reflect::AmbiguousMarker;

/// Annotation rejected by a [`Validator`](crate::Validator).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
	/// A required marker is missing or repeated.
	#[error(transparent)]
	Marker(#[from] AmbiguousMarker),
	/// The annotated entity has the wrong shape for its marker.
	#[error("{subject}: {reason}")]
	Invalid { subject: String, reason: &'static str },
}

impl ValidationError {
	pub(crate) fn invalid(subject: impl Into<String>, reason: &'static str) -> Self {
		Self::Invalid {
			subject: subject.into(),
			reason,
		}
	}
}

/// Errors raised while building a service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
	#[error("service {service} contains duplicate procedure {procedure}")]
	DuplicateProcedure { service: String, procedure: String },

	#[error("service {service} contains duplicate class {class}")]
	DuplicateClass { service: String, class: String },

	#[error("service {service} contains duplicate enumeration {enumeration}")]
	DuplicateEnum { service: String, enumeration: String },

	/// A class member was added before its class.
	#[error("service {service} has no class {class} (while adding {member})")]
	UnknownClass {
		service: String,
		class: String,
		member: String,
	},

	/// Two services share a name in one catalog.
	#[error("duplicate service {service}")]
	DuplicateService { service: String },

	#[error(transparent)]
	Validation(#[from] ValidationError),
}

impl From<AmbiguousMarker> for SchemaError {
	fn from(err: AmbiguousMarker) -> Self {
		Self::Validation(err.into())
	}
}
