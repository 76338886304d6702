//! # Suction end-effector port

/// Capability exposed by the vacuum end-effector.
pub trait EndEffector {
    /// Start the vacuum pump and close the release valve.
    fn enable(&mut self);

    /// Stop the pump and vent, releasing any held piece.
    fn disable(&mut self);

    /// True while the pump is commanded on.
    fn is_enabled(&self) -> bool;

    /// True when the cup has sealed against a piece.
    fn has_vacuum_seal(&self) -> bool;

    /// True when the measured vacuum is above the minimum holding level.
    fn has_min_vacuum(&self) -> bool;
}
