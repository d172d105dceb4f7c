//! Visual variant selection for the value box
//!
//! The value box has two looks: `Default` when a value is present and
//! `Placeholder` when it is not. The placeholder look is optional; a control
//! without one keeps using its default style.

use serde::{Deserialize, Serialize};

/// Which visual variant the value box should use
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleVariant {
    /// A value is shown
    #[default]
    Default,
    /// The placeholder is shown
    Placeholder,
}

/// Choose the style variant for the value box
pub fn select_style(has_value: bool, placeholder_configured: bool) -> StyleVariant {
    if !has_value && placeholder_configured {
        StyleVariant::Placeholder
    } else {
        StyleVariant::Default
    }
}

/// A default style paired with an optional placeholder override
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleVariants<S> {
    /// Style used when a value is present, and as fallback
    pub default: S,
    /// Style used while the placeholder is shown
    #[serde(default)]
    pub placeholder: Option<S>,
}

impl<S> StyleVariants<S> {
    /// Variants with only a default style
    pub fn new(default: S) -> Self {
        Self {
            default,
            placeholder: None,
        }
    }

    /// Set the placeholder style
    pub fn with_placeholder(mut self, placeholder: S) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Pick the variant for the current value presence
    pub fn variant(&self, has_value: bool) -> StyleVariant {
        select_style(has_value, self.placeholder.is_some())
    }

    /// Style for a variant, falling back to the default style
    pub fn get(&self, variant: StyleVariant) -> &S {
        match variant {
            StyleVariant::Placeholder => self.placeholder.as_ref().unwrap_or(&self.default),
            StyleVariant::Default => &self.default,
        }
    }

    /// Style for the current value presence
    pub fn resolve(&self, has_value: bool) -> &S {
        self.get(self.variant(has_value))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Colors and indicator
// ─────────────────────────────────────────────────────────────────────────────

/// RGBA color with components in `0.0..=1.0`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    /// Create from RGBA components
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from an `0xRRGGBB` literal, fully opaque
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Same color with a different alpha
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Whether the color is fully transparent
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }
}

/// Direction of the open/closed indicator glyph
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndicatorDirection {
    /// Shown while the options overlay is open
    Down,
    /// Shown while the control is closed
    Up,
}

impl IndicatorDirection {
    /// Glyph direction for the open state
    pub fn for_open(is_open: bool) -> Self {
        if is_open {
            IndicatorDirection::Down
        } else {
            IndicatorDirection::Up
        }
    }
}

/// Indicator glyph plus the color picked for it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Indicator {
    pub direction: IndicatorDirection,
    pub color: Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_style() {
        assert_eq!(select_style(true, true), StyleVariant::Default);
        assert_eq!(select_style(true, false), StyleVariant::Default);
        assert_eq!(select_style(false, true), StyleVariant::Placeholder);
        assert_eq!(select_style(false, false), StyleVariant::Default);
    }

    #[test]
    fn test_variants_fallback() {
        let only_default = StyleVariants::new("bold");
        assert_eq!(*only_default.resolve(false), "bold");

        let both = StyleVariants::new("bold").with_placeholder("muted");
        assert_eq!(*both.resolve(false), "muted");
        assert_eq!(*both.resolve(true), "bold");
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex(0xFF0000);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!(!c.is_transparent());
        assert!(Color::TRANSPARENT.is_transparent());
    }

    #[test]
    fn test_indicator_direction() {
        assert_eq!(IndicatorDirection::for_open(true), IndicatorDirection::Down);
        assert_eq!(IndicatorDirection::for_open(false), IndicatorDirection::Up);
    }
}
