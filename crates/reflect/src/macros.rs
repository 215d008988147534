//! Registration macros for manifest modules.

/// Declares a static [`Module`](crate::Module) listing the given manifest types
/// and submits it for link-time discovery.
///
/// ```ignore
/// skyrpc_reflect::module!(SPACE_CENTER_MODULE, "space_center", [SPACE_CENTER, NODE, SPEED_MODE]);
/// ```
///
/// The types are `static TypeInfo` items; the listing never fails.
#[macro_export]
macro_rules! module {
	($ident:ident, $name:expr, [$($ty:path),* $(,)?]) => {
		pub(crate) static $ident: $crate::Module = $crate::Module::new($name, {
			fn listing() -> ::core::result::Result<&'static [&'static $crate::TypeInfo], $crate::TypeLoadError> {
				static TYPES: &[&$crate::TypeInfo] = &[$(&$ty),*];
				Ok(TYPES)
			}
			listing
		});

		$crate::__inventory::submit!($crate::ModuleReg(&$ident));
	};
}
