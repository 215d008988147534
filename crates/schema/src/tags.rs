//! Procedure attribute tags.
//!
//! Tags follow the grammar `Category.Subcategory(Arg1,Arg2)`. Client stub and
//! documentation generators parse them, so the format is fixed.

pub fn property_get(property: &str) -> String {
	format!("Property.Get({property})")
}

pub fn property_set(property: &str) -> String {
	format!("Property.Set({property})")
}

pub fn class_method(service: &str, class: &str, method: &str) -> String {
	format!("Class.Method({service}.{class},{method})")
}

pub fn class_static_method(service: &str, class: &str, method: &str) -> String {
	format!("Class.StaticMethod({service}.{class},{method})")
}

pub fn class_property_get(service: &str, class: &str, property: &str) -> String {
	format!("Class.Property.Get({service}.{class},{property})")
}

pub fn class_property_set(service: &str, class: &str, property: &str) -> String {
	format!("Class.Property.Set({service}.{class},{property})")
}

/// Declares that parameter `index` is an instance of `<service>.<class>`.
pub fn parameter_class(index: usize, service: &str, class: &str) -> String {
	format!("ParameterType({index}).Class({service}.{class})")
}

/// Procedure name for a member of a class.
pub fn class_member_name(class: &str, method: &str) -> String {
	format!("{class}_{method}")
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(property_get("Throttle"), "Property.Get(Throttle)")]
	#[case(property_set("Throttle"), "Property.Set(Throttle)")]
	#[case(class_method("SpaceCenter", "Node", "Burn"), "Class.Method(SpaceCenter.Node,Burn)")]
	#[case(class_static_method("SpaceCenter", "Node", "Create"), "Class.StaticMethod(SpaceCenter.Node,Create)")]
	#[case(class_property_get("SpaceCenter", "Node", "DeltaV"), "Class.Property.Get(SpaceCenter.Node,DeltaV)")]
	#[case(class_property_set("SpaceCenter", "Node", "DeltaV"), "Class.Property.Set(SpaceCenter.Node,DeltaV)")]
	#[case(parameter_class(0, "SpaceCenter", "Node"), "ParameterType(0).Class(SpaceCenter.Node)")]
	#[case(class_member_name("Node", "get_DeltaV"), "Node_get_DeltaV")]
	fn tag_grammar(#[case] tag: String, #[case] expected: &str) {
		assert_eq!(tag, expected);
	}
}
