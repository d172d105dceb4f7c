//! Key resolution for option values
//!
//! A [`KeyStrategy`] decides how the lookup key of an option value is derived:
//!
//! - `Explicit` - a caller-supplied function `V -> Key`
//! - `Accessor` - a named field of the value
//! - `Inferred` - the value's own key capability, else its primitive
//!   string/number representation
//!
//! Resolution is a single exhaustive match; there is no runtime probing of
//! the value's type beyond what [`OptionValue`] exposes.
//!
//! # Example
//!
//! ```rust
//! use picklist_core::{Key, KeyStrategy};
//!
//! let by_len = KeyStrategy::<String>::explicit(|s: &String| Key::from(s.len()));
//! assert_eq!(by_len.resolve(&"abc".to_string()).unwrap(), Key::from("3"));
//!
//! let inferred = KeyStrategy::<u32>::default();
//! assert_eq!(inferred.resolve(&7).unwrap(), Key::from("7"));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::{PicklistError, Result, UnresolvableReason};
use crate::value::{Key, OptionValue};

/// Caller-supplied key function
pub type KeyFn<V> = Arc<dyn Fn(&V) -> Key + Send + Sync>;

/// Policy for deriving a [`Key`] from an option value
pub enum KeyStrategy<V: ?Sized> {
    /// Derive the key with a caller-supplied function
    Explicit(KeyFn<V>),
    /// Use a named field of the value
    Accessor(Cow<'static, str>),
    /// Use the value's key capability, falling back to its primitive form
    Inferred,
}

impl<V: ?Sized> KeyStrategy<V> {
    /// Strategy backed by a key function
    pub fn explicit<F>(f: F) -> Self
    where
        F: Fn(&V) -> Key + Send + Sync + 'static,
    {
        KeyStrategy::Explicit(Arc::new(f))
    }

    /// Strategy reading a named field
    pub fn accessor(field: impl Into<Cow<'static, str>>) -> Self {
        KeyStrategy::Accessor(field.into())
    }

    /// Whether two strategies are the same reference/configuration
    ///
    /// Explicit strategies compare by function identity, so an index built
    /// with a cloned strategy is considered up to date.
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (KeyStrategy::Explicit(a), KeyStrategy::Explicit(b)) => Arc::ptr_eq(a, b),
            (KeyStrategy::Accessor(a), KeyStrategy::Accessor(b)) => a == b,
            (KeyStrategy::Inferred, KeyStrategy::Inferred) => true,
            _ => false,
        }
    }
}

impl<V: OptionValue + ?Sized> KeyStrategy<V> {
    /// Resolve the key of `value` under this strategy
    pub fn resolve(&self, value: &V) -> Result<Key> {
        resolve_key(value, self)
    }
}

impl<V: ?Sized> Clone for KeyStrategy<V> {
    fn clone(&self) -> Self {
        match self {
            KeyStrategy::Explicit(f) => KeyStrategy::Explicit(Arc::clone(f)),
            KeyStrategy::Accessor(field) => KeyStrategy::Accessor(field.clone()),
            KeyStrategy::Inferred => KeyStrategy::Inferred,
        }
    }
}

impl<V: ?Sized> Default for KeyStrategy<V> {
    fn default() -> Self {
        KeyStrategy::Inferred
    }
}

impl<V: ?Sized> fmt::Debug for KeyStrategy<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyStrategy::Explicit(_) => f.write_str("Explicit(<fn>)"),
            KeyStrategy::Accessor(field) => f.debug_tuple("Accessor").field(field).finish(),
            KeyStrategy::Inferred => f.write_str("Inferred"),
        }
    }
}

/// Resolve the lookup key of `value`
///
/// Fails with [`PicklistError::UnresolvableKey`] when the strategy cannot
/// produce a key. Deterministic and free of side effects.
pub fn resolve_key<V: OptionValue + ?Sized>(value: &V, strategy: &KeyStrategy<V>) -> Result<Key> {
    match strategy {
        KeyStrategy::Explicit(f) => Ok(f(value)),
        KeyStrategy::Accessor(field) => value
            .field(field)
            .ok_or_else(|| unresolvable(value, UnresolvableReason::MissingField(field.to_string()))),
        KeyStrategy::Inferred => value
            .key()
            .or_else(|| value.primitive_key())
            .ok_or_else(|| unresolvable(value, UnresolvableReason::NoStrategy)),
    }
}

fn unresolvable<V: OptionValue + ?Sized>(value: &V, reason: UnresolvableReason) -> PicklistError {
    PicklistError::UnresolvableKey {
        value: format!("{:?}", value),
        reason,
    }
}
