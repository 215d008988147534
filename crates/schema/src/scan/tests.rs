use pretty_assertions::assert_eq;
use rstest::rstest;
use skyrpc_reflect::{FieldInfo, MethodInfo, ModuleTable, PropertyInfo, TypeInfo, TypeLoadError};

use super::*;
use crate::phase::Phase;
use crate::validate::MarkerValidator;

static SPACE_CENTER: TypeInfo = TypeInfo {
	name: "SpaceCenter",
	markers: &[&ServiceMarker {
		name: None,
		phase: Phase::FLIGHT,
	}],
	methods: &[MethodInfo {
		name: "WarpTo",
		markers: &[&ProcedureMarker],
		..MethodInfo::STATIC
	}],
	properties: &[PropertyInfo {
		name: "UT",
		markers: &[&PropertyMarker],
		getter: Some(MethodInfo {
			name: "get_UT",
			returns: Some("double"),
			..MethodInfo::STATIC
		}),
		..PropertyInfo::EMPTY
	}],
	..TypeInfo::STATIC_CLASS
};

static NODE: TypeInfo = TypeInfo {
	name: "Node",
	markers: &[&ClassMarker { service: "SpaceCenter" }],
	methods: &[
		MethodInfo {
			name: "Remove",
			markers: &[&ProcedureMarker],
			..MethodInfo::INSTANCE
		},
		MethodInfo {
			name: "Helper",
			..MethodInfo::INSTANCE
		},
	],
	..TypeInfo::CLASS
};

static SPEED_MODE: TypeInfo = TypeInfo {
	name: "SpeedMode",
	markers: &[&EnumMarker { service: "SpaceCenter" }],
	fields: &[FieldInfo::constant("Orbit", 0), FieldInfo::constant("Surface", 1)],
	..TypeInfo::ENUM
};

// Declares a procedure with an instance method, which services reject.
static BROKEN: TypeInfo = TypeInfo {
	name: "Broken",
	markers: &[&ServiceMarker::DEFAULT],
	methods: &[MethodInfo {
		name: "NotStatic",
		markers: &[&ProcedureMarker],
		..MethodInfo::INSTANCE
	}],
	..TypeInfo::STATIC_CLASS
};

static BROKEN_PART: TypeInfo = TypeInfo {
	name: "Part",
	markers: &[&ClassMarker { service: "Broken" }],
	..TypeInfo::CLASS
};

static ORPHAN: TypeInfo = TypeInfo {
	name: "Orphan",
	markers: &[&ClassMarker { service: "Nowhere" }],
	..TypeInfo::CLASS
};

static KSC_A: TypeInfo = TypeInfo {
	name: "KscA",
	markers: &[&ServiceMarker {
		name: Some("KSC"),
		phase: Phase::ALL,
	}],
	..TypeInfo::STATIC_CLASS
};

static KSC_B: TypeInfo = TypeInfo {
	name: "KscB",
	markers: &[&ServiceMarker {
		name: Some("KSC"),
		phase: Phase::ALL,
	}],
	..TypeInfo::STATIC_CLASS
};

static BASE_SERVICE: TypeInfo = TypeInfo {
	name: "BaseService",
	methods: &[MethodInfo {
		name: "Inherited",
		markers: &[&ProcedureMarker],
		..MethodInfo::STATIC
	}],
	..TypeInfo::STATIC_CLASS
};

static DERIVED_SERVICE: TypeInfo = TypeInfo {
	name: "DerivedService",
	markers: &[&ServiceMarker::DEFAULT],
	base: Some(&BASE_SERVICE),
	..TypeInfo::STATIC_CLASS
};

static PART: TypeInfo = TypeInfo {
	name: "Part",
	methods: &[
		MethodInfo {
			name: "Decouple",
			markers: &[&ProcedureMarker],
			..MethodInfo::INSTANCE
		},
		MethodInfo {
			name: "Activate",
			markers: &[&ProcedureMarker],
			..MethodInfo::INSTANCE
		},
	],
	..TypeInfo::CLASS
};

// Overrides `Activate` without repeating the marker.
static ENGINE: TypeInfo = TypeInfo {
	name: "Engine",
	markers: &[&ClassMarker { service: "SpaceCenter" }],
	base: Some(&PART),
	methods: &[MethodInfo {
		name: "Activate",
		..MethodInfo::INSTANCE
	}],
	..TypeInfo::CLASS
};

fn space_center_types() -> Result<&'static [&'static TypeInfo], TypeLoadError> {
	static TYPES: &[&TypeInfo] = &[&SPACE_CENTER, &NODE, &SPEED_MODE];
	Ok(TYPES)
}

fn engine_types() -> Result<&'static [&'static TypeInfo], TypeLoadError> {
	static TYPES: &[&TypeInfo] = &[&SPACE_CENTER, &ENGINE, &PART];
	Ok(TYPES)
}

fn broken_types() -> Result<&'static [&'static TypeInfo], TypeLoadError> {
	static TYPES: &[&TypeInfo] = &[&BROKEN, &BROKEN_PART];
	Ok(TYPES)
}

fn orphan_types() -> Result<&'static [&'static TypeInfo], TypeLoadError> {
	static TYPES: &[&TypeInfo] = &[&ORPHAN];
	Ok(TYPES)
}

fn duplicate_types() -> Result<&'static [&'static TypeInfo], TypeLoadError> {
	static TYPES: &[&TypeInfo] = &[&KSC_A, &KSC_B];
	Ok(TYPES)
}

fn derived_types() -> Result<&'static [&'static TypeInfo], TypeLoadError> {
	static TYPES: &[&TypeInfo] = &[&DERIVED_SERVICE, &BASE_SERVICE];
	Ok(TYPES)
}

fn unloadable_types() -> Result<&'static [&'static TypeInfo], TypeLoadError> {
	Err(TypeLoadError {
		module: "unloadable",
		reason: "missing dependency".into(),
	})
}

fn scan(modules: &[Module], options: ScanOptions) -> Result<ScanReport, ScanFailure> {
	Scanner::new(options, &MarkerValidator).scan(modules)
}

fn subjects(report: &ScanReport) -> Vec<&str> {
	report.failures.iter().map(|failure| failure.subject.as_str()).collect()
}

#[test]
fn publishes_service_with_classes_and_enumerations() {
	let report = scan(&[Module::new("space_center", space_center_types)], ScanOptions::default()).unwrap();

	assert!(report.failures.is_empty());
	let service = report.catalog.service("SpaceCenter").unwrap();
	assert_eq!(service.phase(), Some(Phase::FLIGHT));
	assert_eq!(service.procedure_names(), vec!["Node_Remove", "WarpTo", "get_UT"]);
	assert_eq!(service.classes(), vec!["Node"]);
	let values: Vec<(&str, i32)> = service.enumeration("SpeedMode").unwrap().iter().map(|(name, value)| (name.as_str(), *value)).collect();
	assert_eq!(values, vec![("Orbit", 0), ("Surface", 1)]);
}

#[test]
fn failing_service_is_dropped_alone() {
	let modules = [
		Module::new("broken", broken_types),
		Module::new("space_center", space_center_types),
	];
	let report = scan(&modules, ScanOptions::default()).unwrap();

	assert_eq!(subjects(&report), vec!["Broken"]);
	assert!(matches!(
		report.failures[0].error,
		ScanError::Schema(SchemaError::Validation(_))
	));
	assert!(report.catalog.service("Broken").is_none());
	assert!(report.catalog.service("SpaceCenter").is_some());
	assert_eq!(report.catalog.len(), 1);
}

#[test]
fn class_of_unknown_service_is_reported() {
	let modules = [
		Module::new("orphan", orphan_types),
		Module::new("space_center", space_center_types),
	];
	let report = scan(&modules, ScanOptions::default()).unwrap();

	assert_eq!(subjects(&report), vec!["Nowhere"]);
	match &report.failures[0].error {
		ScanError::UnknownService { service, ty } => {
			assert_eq!(service, "Nowhere");
			assert_eq!(ty, "Orphan");
		}
		other => panic!("unexpected error: {other}"),
	}
	assert_eq!(report.catalog.len(), 1);
}

#[test]
fn duplicate_service_names_drop_both() {
	let modules = [
		Module::new("ksc", duplicate_types),
		Module::new("space_center", space_center_types),
	];
	let report = scan(&modules, ScanOptions::default()).unwrap();

	assert_eq!(subjects(&report), vec!["KSC"]);
	assert!(matches!(
		&report.failures[0].error,
		ScanError::Schema(SchemaError::DuplicateService { service }) if service == "KSC"
	));
	assert!(report.catalog.service("KSC").is_none());
	assert_eq!(report.catalog.len(), 1);
}

#[test]
fn abort_on_error_stops_at_first_failure() {
	let modules = [
		Module::new("broken", broken_types),
		Module::new("space_center", space_center_types),
	];
	let options = ScanOptions {
		abort_on_error: true,
		..ScanOptions::default()
	};
	let failure = scan(&modules, options).unwrap_err();

	assert_eq!(failure.subject, "Broken");
	assert!(failure.to_string().starts_with("failed to register Broken"));
}

#[test]
fn excluded_modules_are_not_scanned() {
	let modules = [
		Module::new("broken", broken_types),
		Module::new("space_center", space_center_types),
	];
	let options = ScanOptions {
		excluded_modules: vec!["broken".into()],
		..ScanOptions::default()
	};
	let report = scan(&modules, options).unwrap();

	assert!(report.failures.is_empty());
	assert_eq!(report.catalog.len(), 1);
}

#[test]
fn unloadable_module_is_skipped() {
	let modules = [
		Module::new("unloadable", unloadable_types),
		Module::new("space_center", space_center_types),
	];
	let report = scan(&modules, ScanOptions::default()).unwrap();

	assert!(report.failures.is_empty());
	assert!(report.catalog.service("SpaceCenter").is_some());
}

#[rstest]
#[case::declared_markers(false)]
#[case::inherited_markers(true)]
fn base_service_members_are_published(#[case] include_inherited: bool) {
	let options = ScanOptions {
		include_inherited,
		..ScanOptions::default()
	};
	let report = scan(&[Module::new("derived", derived_types)], options).unwrap();

	let service = report.catalog.service("DerivedService").unwrap();
	assert_eq!(service.procedure_names(), vec!["Inherited"]);
}

#[rstest]
#[case::declared_markers(false, vec!["Engine_Decouple", "WarpTo", "get_UT"])]
#[case::override_inherits_marker(true, vec!["Engine_Activate", "Engine_Decouple", "WarpTo", "get_UT"])]
fn class_publishes_marked_base_methods(#[case] include_inherited: bool, #[case] expected: Vec<&str>) {
	let options = ScanOptions {
		include_inherited,
		..ScanOptions::default()
	};
	let report = scan(&[Module::new("engine", engine_types)], options).unwrap();

	assert!(report.failures.is_empty());
	let service = report.catalog.service("SpaceCenter").unwrap();
	assert_eq!(service.classes(), vec!["Engine"]);
	assert_eq!(service.procedure_names(), expected);
	let decouple = service.procedure("Engine_Decouple").unwrap();
	assert!(decouple.has_attribute("Class.Method(SpaceCenter.Engine,Decouple)"));
}

#[test]
fn rescan_observes_registered_modules() {
	let table = ModuleTable::new();
	table.register(Module::new("space_center", space_center_types));
	let scanner = Scanner::new(ScanOptions::default(), &MarkerValidator);

	let first = scanner.scan(&table).unwrap();
	assert_eq!(first.catalog.len(), 1);

	table.register(Module::new("ksc", duplicate_types));
	table.register(Module::new("derived", derived_types));
	let second = scanner.scan(&table).unwrap();
	assert_eq!(
		second.catalog.services().iter().map(|service| service.name()).collect::<Vec<_>>(),
		vec!["DerivedService", "SpaceCenter"]
	);
	assert_eq!(subjects(&second), vec!["KSC"]);
}
