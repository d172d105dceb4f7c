//! Host signals delivered to controls

use crate::keyboard::KeyboardEvent;

/// Why the overlay was asked to close
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DismissReason {
    /// Tap on the full-screen dismiss catcher outside the options
    OutsideTap,
    /// Hardware back button (Android)
    HardwareBack,
    /// Explicit close requested by the host
    Explicit,
}

/// Discrete signals a host forwards to a control
///
/// All signals are delivered on the host's UI loop, one at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// Activation gesture on the value box
    Press,
    /// The overlay was asked to close
    Dismiss(DismissReason),
    /// Software keyboard visibility changed
    Keyboard(KeyboardEvent),
    /// Frame tick carrying the host clock
    ///
    /// Drives timers and overlay transitions.
    Frame {
        /// Current time in milliseconds
        now_ms: u64,
    },
}
