//! Dropdown controls built on the controller and overlay primitives
//!
//! Each component follows a consistent pattern:
//! - Builder function (e.g., `dropdown(options)`)
//! - Builder struct with fluent setters and a fallible `build()`
//! - A [`Dropdown`] instance driven by host events and frame ticks

pub mod dropdown;
pub mod searchable;

pub use dropdown::{dropdown, Dropdown, DropdownBuilder, Lifecycle, OnSelectFn, AUTO_OPEN_DELAY_MS};
pub use searchable::{
    searchable_dropdown, SearchInputAction, SearchInputProps, SearchableDropdownBuilder,
};
