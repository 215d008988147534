bitflags::bitflags! {
	/// Runtime phases a service is usable in.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct Phase: u32 {
		/// Space center overview.
		const SPACE_CENTER = 1 << 0;
		/// In flight.
		const FLIGHT = 1 << 1;
		/// Tracking station.
		const TRACKING_STATION = 1 << 2;
		/// Vehicle assembly building editor.
		const EDITOR_VAB = 1 << 3;
		/// Spaceplane hangar editor.
		const EDITOR_SPH = 1 << 4;
		/// Either editor.
		const EDITOR = Self::EDITOR_VAB.bits() | Self::EDITOR_SPH.bits();
		/// Every phase.
		const ALL = Self::SPACE_CENTER.bits()
			| Self::FLIGHT.bits()
			| Self::TRACKING_STATION.bits()
			| Self::EDITOR.bits();
	}
}
