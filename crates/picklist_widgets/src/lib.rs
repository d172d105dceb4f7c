//! # Picklist Widgets
//!
//! Headless dropdown controls for touch platforms.
//!
//! ## Philosophy
//!
//! The host owns rendering and the platform; the controls own behavior.
//!
//! - **Primitives**: `picklist_core` resolves values to titles and picks styles
//! - **Platform**: `picklist_platform` carries keyboard, timer and host signals
//! - **Controls**: this crate turns host signals into state, effects and overlay lifecycle
//!
//! ## Example
//!
//! ```rust
//! use picklist_core::SelectOption;
//! use picklist_widgets::prelude::*;
//!
//! let mut size = pk::dropdown(vec![
//!     SelectOption::new("Small", 1u32),
//!     SelectOption::new("Large", 2u32),
//! ])
//! .placeholder("Size")
//! .build()
//! .unwrap();
//!
//! size.mount(0);
//! size.press();
//! assert_eq!(size.visible_options().options().len(), 2);
//!
//! size.select(2);
//! assert_eq!(size.display_value().unwrap(), "Large");
//! ```
//!
//! ## Components
//!
//! - **Dropdown** - modal option list with placeholder, cut and auto open
//! - **Searchable Dropdown** - filtered options, trigger limit and free text

pub mod components;
pub mod controller;
pub mod overlay;
mod stateful;

pub use components::*;
pub use controller::{
    control_events, ControlEvent, Effect, FilterFn, FreeTextFn, InteractionController,
    InteractionState, OpenState, OptionsView, Transition, Variant,
};
pub use overlay::{
    overlay_events, BackdropConfig, OverlayConfig, OverlayNotice, OverlayPresenter, OverlayState,
};
pub use stateful::StateTransitions;

/// Convenience module for accessing controls with `pk::` prefix
pub mod pk {
    pub use crate::components::dropdown::dropdown;
    pub use crate::components::searchable::searchable_dropdown;
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::components::dropdown::{dropdown, Dropdown, DropdownBuilder};
    pub use crate::components::searchable::{
        searchable_dropdown, SearchInputAction, SearchInputProps, SearchableDropdownBuilder,
    };
    pub use crate::controller::{ControlEvent, OptionsView};
    pub use crate::pk;
    // Re-export commonly needed primitive types
    pub use picklist_core::{AnimationType, DropdownSettings, KeyStrategy, SelectOption};
    pub use picklist_platform::{DismissReason, HostEvent};
}
