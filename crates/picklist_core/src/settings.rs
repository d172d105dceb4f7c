//! Control settings and presets
//!
//! `DropdownSettings` holds the plain-data part of a dropdown's
//! configuration. Hosts that keep control defaults in config files can load
//! it from TOML:
//!
//! ```rust
//! use picklist_core::{AnimationType, DropdownSettings};
//!
//! let settings = DropdownSettings::from_toml_str(r#"
//!     placeholder = "Choose a city"
//!     filter_trigger_limit = 2
//!     must_match_options = false
//! "#).unwrap();
//!
//! assert_eq!(settings.filter_trigger_limit, 2);
//! assert_eq!(settings.animation, AnimationType::None);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default message shown when a search yields no options
pub const DEFAULT_NO_OPTIONS_TEXT: &str = "No results found for your search.";

/// Overlay transition style
///
/// Animated transitions can race with other overlays shown by the host
/// (an overlay requested closed may stay visible while another animated
/// overlay opens), so `None` is the default. Opt in at your own risk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationType {
    /// Show and hide immediately
    #[default]
    None,
    /// Slide in from the bottom
    Slide,
    /// Fade in and out
    Fade,
}

impl AnimationType {
    /// Enter animation duration in milliseconds
    pub fn enter_ms(&self) -> u32 {
        match self {
            AnimationType::None => 0,
            AnimationType::Slide => 300,
            AnimationType::Fade => 200,
        }
    }

    /// Exit animation duration in milliseconds
    pub fn exit_ms(&self) -> u32 {
        match self {
            AnimationType::None => 0,
            AnimationType::Slide => 250,
            AnimationType::Fade => 150,
        }
    }

    /// Whether transitions complete immediately
    pub fn is_instant(&self) -> bool {
        matches!(self, AnimationType::None)
    }
}

/// Plain-data settings shared by both dropdown variants
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropdownSettings {
    /// Text shown while no value is selected
    pub placeholder: String,
    /// Ignore activation gestures
    pub disabled: bool,
    /// Cut long titles in the value box
    pub cut: bool,
    /// Open automatically after the mount grace delay
    pub initially_open: bool,
    /// Overlay transition style
    pub animation: AnimationType,
    /// Minimum search length before results are shown (search variant)
    pub filter_trigger_limit: usize,
    /// Only values from the option list may be committed (search variant)
    pub must_match_options: bool,
    /// Show a message when the result list is empty
    pub show_no_options_text: bool,
    /// Message shown when the result list is empty
    pub no_options_text: String,
}

impl Default for DropdownSettings {
    fn default() -> Self {
        Self::standard()
    }
}

impl DropdownSettings {
    /// Standard settings for a plain dropdown.
    pub fn standard() -> Self {
        Self {
            placeholder: String::new(),
            disabled: false,
            cut: false,
            initially_open: false,
            animation: AnimationType::None,
            filter_trigger_limit: 0,
            must_match_options: true,
            show_no_options_text: true,
            no_options_text: DEFAULT_NO_OPTIONS_TEXT.to_string(),
        }
    }

    /// Settings for a search field that accepts free text.
    pub fn free_text() -> Self {
        Self {
            filter_trigger_limit: 1,
            must_match_options: false,
            show_no_options_text: false,
            ..Self::standard()
        }
    }

    /// Parse settings from TOML; missing fields keep their standard values.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Encode settings as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Set the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the overlay animation.
    pub fn with_animation(mut self, animation: AnimationType) -> Self {
        self.animation = animation;
        self
    }

    /// Set the search trigger length.
    pub fn with_filter_trigger_limit(mut self, limit: usize) -> Self {
        self.filter_trigger_limit = limit;
        self
    }
}
