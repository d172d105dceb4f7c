//! Option values and lookup keys
//!
//! The `OptionValue` trait describes what the key resolver may ask of an
//! option value:
//! - its own key capability (`key`)
//! - its primitive string/number representation (`primitive_key`)
//! - a named field (`field`), used by accessor strategies
//! - whether it means "no selection" (`is_unset`)
//! - its free-text form, shown when an unmatched value may be displayed as-is
//!
//! Implementations are provided for strings, numbers, `bool`, `Option<T>` and
//! `serde_json::Value`. Custom value types implement the trait directly,
//! usually only overriding `key`.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A hashable identifier derived from an option value
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    /// Create a key from any string-like input
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning its text
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Key {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<Cow<'_, str>> for Key {
    fn from(key: Cow<'_, str>) -> Self {
        Self(key.into_owned())
    }
}

macro_rules! key_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Key {
                fn from(key: $ty) -> Self {
                    Self(key.to_string())
                }
            }
        )*
    };
}

key_from_display!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, char);

// ─────────────────────────────────────────────────────────────────────────────
// OptionValue
// ─────────────────────────────────────────────────────────────────────────────

/// Capabilities an option value exposes to the key resolver
pub trait OptionValue: fmt::Debug {
    /// The value's own key capability, if it defines one
    fn key(&self) -> Option<Key> {
        None
    }

    /// Primitive representation for strings and numbers
    fn primitive_key(&self) -> Option<Key> {
        None
    }

    /// Look up a named field, for accessor strategies
    fn field(&self, _name: &str) -> Option<Key> {
        None
    }

    /// Whether this value means "no selection"
    fn is_unset(&self) -> bool {
        false
    }

    /// String form used when an unmatched value is displayed as-is
    fn free_text(&self) -> Option<String> {
        self.primitive_key().map(Key::into_string)
    }
}

impl OptionValue for str {
    fn primitive_key(&self) -> Option<Key> {
        Some(Key::from(self))
    }

    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl OptionValue for String {
    fn primitive_key(&self) -> Option<Key> {
        Some(Key::from(self.as_str()))
    }

    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl<T: OptionValue + ?Sized> OptionValue for &T {
    fn key(&self) -> Option<Key> {
        (**self).key()
    }

    fn primitive_key(&self) -> Option<Key> {
        (**self).primitive_key()
    }

    fn field(&self, name: &str) -> Option<Key> {
        (**self).field(name)
    }

    fn is_unset(&self) -> bool {
        (**self).is_unset()
    }

    fn free_text(&self) -> Option<String> {
        (**self).free_text()
    }
}

impl<T: OptionValue + ?Sized> OptionValue for Arc<T> {
    fn key(&self) -> Option<Key> {
        (**self).key()
    }

    fn primitive_key(&self) -> Option<Key> {
        (**self).primitive_key()
    }

    fn field(&self, name: &str) -> Option<Key> {
        (**self).field(name)
    }

    fn is_unset(&self) -> bool {
        (**self).is_unset()
    }

    fn free_text(&self) -> Option<String> {
        (**self).free_text()
    }
}

impl<T: OptionValue> OptionValue for Option<T> {
    fn key(&self) -> Option<Key> {
        self.as_ref().and_then(OptionValue::key)
    }

    fn primitive_key(&self) -> Option<Key> {
        self.as_ref().and_then(OptionValue::primitive_key)
    }

    fn field(&self, name: &str) -> Option<Key> {
        self.as_ref().and_then(|v| v.field(name))
    }

    fn is_unset(&self) -> bool {
        self.as_ref().map_or(true, OptionValue::is_unset)
    }

    fn free_text(&self) -> Option<String> {
        self.as_ref().and_then(OptionValue::free_text)
    }
}

macro_rules! integer_option_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl OptionValue for $ty {
                fn primitive_key(&self) -> Option<Key> {
                    Some(Key::from(*self))
                }

                fn is_unset(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

integer_option_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! float_option_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl OptionValue for $ty {
                fn primitive_key(&self) -> Option<Key> {
                    Some(Key::new(self.to_string()))
                }

                fn is_unset(&self) -> bool {
                    *self == 0.0 || self.is_nan()
                }
            }
        )*
    };
}

float_option_value!(f32, f64);

/// Booleans carry no key of their own: they need an explicit strategy
impl OptionValue for bool {
    fn is_unset(&self) -> bool {
        !*self
    }

    fn free_text(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl OptionValue for serde_json::Value {
    fn primitive_key(&self) -> Option<Key> {
        match self {
            serde_json::Value::String(s) => Some(Key::from(s.as_str())),
            serde_json::Value::Number(n) => Some(Key::new(n.to_string())),
            _ => None,
        }
    }

    fn field(&self, name: &str) -> Option<Key> {
        match self.get(name)? {
            serde_json::Value::Null => None,
            serde_json::Value::Bool(b) => Some(Key::new(b.to_string())),
            other => other.primitive_key().or_else(|| Some(Key::new(other.to_string()))),
        }
    }

    fn is_unset(&self) -> bool {
        match self {
            serde_json::Value::Null => true,
            serde_json::Value::Bool(b) => !b,
            serde_json::Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0 || f.is_nan()),
            serde_json::Value::String(s) => s.is_empty(),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => false,
        }
    }

    fn free_text(&self) -> Option<String> {
        match self {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}
