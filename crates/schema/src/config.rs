//! Scan configuration.
//!
//! ```toml
//! include_inherited = true
//! excluded_modules = ["legacy_parts"]
//! abort_on_error = false
//! ```

use serde::Deserialize;

/// Options controlling a [`Scanner`](crate::Scanner) run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanOptions {
	/// Let an unmarked member override inherit the marker of the base member it overrides.
	pub include_inherited: bool,
	/// Module names skipped entirely.
	pub excluded_modules: Vec<String>,
	/// Stop at the first failing service instead of dropping it and continuing.
	pub abort_on_error: bool,
}

/// Scan configuration could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("invalid scan configuration: {0}")]
pub struct ConfigError(#[from] toml::de::Error);

impl ScanOptions {
	/// Parses options from a TOML document. Missing keys take their defaults.
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(source)?)
	}

	pub(crate) fn is_excluded(&self, module: &str) -> bool {
		self.excluded_modules.iter().any(|excluded| excluded == module)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn empty_document_uses_defaults() {
		assert_eq!(ScanOptions::from_toml_str("").unwrap(), ScanOptions::default());
	}

	#[test]
	fn parses_all_keys() {
		let options = ScanOptions::from_toml_str(
			r#"
			include_inherited = true
			excluded_modules = ["legacy_parts", "mods"]
			abort_on_error = true
			"#,
		)
		.unwrap();

		assert_eq!(
			options,
			ScanOptions {
				include_inherited: true,
				excluded_modules: vec!["legacy_parts".into(), "mods".into()],
				abort_on_error: true,
			}
		);
		assert!(options.is_excluded("mods"));
		assert!(!options.is_excluded("core"));
	}

	#[test]
	fn unknown_keys_are_rejected() {
		let err = ScanOptions::from_toml_str("fail_fast = true").unwrap_err();
		assert!(err.to_string().starts_with("invalid scan configuration"));
	}
}
