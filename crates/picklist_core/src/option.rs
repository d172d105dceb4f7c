//! Selectable options

use serde::{Deserialize, Serialize};

/// A (title, value) pair offered for selection
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectOption<V> {
    /// Display title shown in the list and in the value box
    pub title: String,
    /// The value committed when this option is selected
    pub value: V,
}

impl<V> SelectOption<V> {
    /// Create a new option with title and value
    pub fn new(title: impl Into<String>, value: V) -> Self {
        Self {
            title: title.into(),
            value,
        }
    }
}

impl<V, T: Into<String>> From<(T, V)> for SelectOption<V> {
    fn from((title, value): (T, V)) -> Self {
        Self::new(title, value)
    }
}
