//! Picklist Core
//!
//! This crate provides the option-resolution primitives for Picklist controls:
//!
//! - **Keys**: derive a stable lookup key from arbitrary option values
//! - **Option Index**: map a selected value back to its display title in O(1)
//! - **Style Selection**: pick the value-box variant for value/placeholder
//! - **Settings**: plain-data control settings with presets and TOML loading
//!
//! # Example
//!
//! ```rust
//! use picklist_core::{KeyStrategy, OptionIndex, SelectOption};
//!
//! let options = vec![
//!     SelectOption::new("Red", "r".to_string()),
//!     SelectOption::new("Blue", "b".to_string()),
//! ];
//! let index = OptionIndex::build(options, KeyStrategy::default()).unwrap();
//!
//! assert_eq!(index.resolve_title(&"r".to_string(), true).unwrap(), "Red");
//! assert_eq!(index.resolve_title(&"g".to_string(), true).unwrap(), "");
//! assert_eq!(index.resolve_title(&"g".to_string(), false).unwrap(), "g");
//! ```

pub mod display;
pub mod error;
pub mod index;
pub mod key;
pub mod option;
pub mod settings;
pub mod style;
pub mod value;

pub use display::{cut_title, value_text, CUT_LENGTH, ELLIPSIS};
pub use error::{PicklistError, Result, UnresolvableReason};
pub use index::OptionIndex;
pub use key::{resolve_key, KeyFn, KeyStrategy};
pub use option::SelectOption;
pub use settings::{AnimationType, DropdownSettings, DEFAULT_NO_OPTIONS_TEXT};
pub use style::{
    select_style, Color, Indicator, IndicatorDirection, StyleVariant, StyleVariants,
};
pub use value::{Key, OptionValue};
