//! Per-tick input snapshot
//!
//! The platform layer owns the mapping from key tokens ("w", "ArrowUp", "f")
//! to these intents and hands the simulation an immutable snapshot captured
//! at tick start. Unrecognized keys never reach the simulation.

/// Input intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move up / throttle forward
    pub up: bool,
    /// Move down / reverse
    pub down: bool,
    /// Move left / steer left
    pub left: bool,
    /// Move right / steer right
    pub right: bool,
    /// Enter/exit vehicle. Press edge, not held state: the host loop clears
    /// this after every tick.
    pub interact: bool,
}
