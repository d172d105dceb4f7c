//! Picklist Platform Signal Layer
//!
//! This crate provides the platform-facing signal types that Picklist
//! controls consume, so controls stay testable without a real platform.
//!
//! # Architecture
//!
//! - [`KeyboardSource`] - injected software keyboard (visibility + dismiss)
//! - [`OneShotTimer`] - fixed-delay timer driven by the host frame clock
//! - [`HostEvent`] - discrete signals the host forwards to a control
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use picklist_platform::{subscribe, KeyboardEvent, KeyboardSource, SoftKeyboard};
//!
//! let keyboard = SoftKeyboard::shared();
//! let source: Arc<dyn KeyboardSource> = keyboard.clone();
//!
//! let mut subscription = subscribe(&source, Arc::new(|event| {
//!     println!("keyboard: {:?}", event);
//! }));
//!
//! keyboard.emit(KeyboardEvent::DidShow);
//! subscription.release();
//! ```

mod error;
mod event;
mod keyboard;
mod timer;

// Re-export all public types
pub use error::{PlatformError, Result};
pub use event::{DismissReason, HostEvent};
pub use keyboard::{
    subscribe, KeyboardCallback, KeyboardEvent, KeyboardSource, KeyboardSubscription, ListenerId,
    SoftKeyboard,
};
pub use timer::{OneShotTimer, TimerState};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{DismissReason, HostEvent};
    pub use crate::keyboard::{KeyboardEvent, KeyboardSource, KeyboardSubscription, SoftKeyboard};
    pub use crate::timer::OneShotTimer;
}
