//! Option index: value key -> display title
//!
//! The index is built once per option list and key strategy. It shares the
//! caller's option list (`Arc<[SelectOption<V>]>`) and stores only the
//! position of the option owning each key, so titles are never copied.
//! Rebuild the index whenever the list or the strategy changes; there is no
//! incremental update.
//!
//! When two options resolve to the same key the later one wins.

use std::borrow::Cow;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::key::{resolve_key, KeyStrategy};
use crate::option::SelectOption;
use crate::value::{Key, OptionValue};

/// Mapping from resolved key to option title
pub struct OptionIndex<V> {
    options: Arc<[SelectOption<V>]>,
    strategy: KeyStrategy<V>,
    positions: FxHashMap<Key, usize>,
}

impl<V: OptionValue> OptionIndex<V> {
    /// Build the index for `options` under `strategy`
    ///
    /// Propagates [`crate::PicklistError::UnresolvableKey`] from the first
    /// option whose value has no usable key.
    pub fn build(options: impl Into<Arc<[SelectOption<V>]>>, strategy: KeyStrategy<V>) -> Result<Self> {
        let options = options.into();
        let mut positions =
            FxHashMap::with_capacity_and_hasher(options.len(), Default::default());

        for (position, option) in options.iter().enumerate() {
            let key = resolve_key(&option.value, &strategy)?;
            if let Some(previous) = positions.insert(key, position) {
                tracing::trace!(
                    "OptionIndex::build - option {} overrides option {} with the same key",
                    position,
                    previous
                );
            }
        }

        tracing::trace!(
            "OptionIndex::build - {} options, {} keys, strategy {:?}",
            options.len(),
            positions.len(),
            strategy
        );

        Ok(Self {
            options,
            strategy,
            positions,
        })
    }

    /// Resolve the display title of `value`
    ///
    /// - an unset value resolves to `""`
    /// - a value whose key is indexed resolves to that option's title
    /// - an unknown value resolves to its own string form when `must_match`
    ///   is false, and to `""` otherwise
    ///
    /// Never mutates the index.
    pub fn resolve_title(&self, value: &V, must_match: bool) -> Result<Cow<'_, str>> {
        if value.is_unset() {
            return Ok(Cow::Borrowed(""));
        }

        let key = resolve_key(value, &self.strategy)?;
        if let Some(title) = self.title_for_key(&key) {
            return Ok(Cow::Borrowed(title));
        }

        if !must_match {
            if let Some(text) = value.free_text() {
                return Ok(Cow::Owned(text));
            }
        }

        Ok(Cow::Borrowed(""))
    }

    /// Find the option matching `value`, if any
    pub fn option_for(&self, value: &V) -> Result<Option<&SelectOption<V>>> {
        if value.is_unset() {
            return Ok(None);
        }
        let key = resolve_key(value, &self.strategy)?;
        Ok(self.positions.get(&key).map(|&i| &self.options[i]))
    }
}

impl<V> OptionIndex<V> {
    /// Title stored for `key`
    pub fn title_for_key(&self, key: &Key) -> Option<&str> {
        self.positions
            .get(key)
            .map(|&position| self.options[position].title.as_str())
    }

    /// Whether this index was built from exactly this list and strategy
    pub fn is_built_from(&self, options: &Arc<[SelectOption<V>]>, strategy: &KeyStrategy<V>) -> bool {
        Arc::ptr_eq(&self.options, options) && self.strategy.same_as(strategy)
    }

    /// The indexed option list
    pub fn options(&self) -> &Arc<[SelectOption<V>]> {
        &self.options
    }

    /// The strategy keys were resolved with
    pub fn strategy(&self) -> &KeyStrategy<V> {
        &self.strategy
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the index holds no keys
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl<V> std::fmt::Debug for OptionIndex<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionIndex")
            .field("options", &self.options.len())
            .field("keys", &self.positions.len())
            .field("strategy", &self.strategy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn colors() -> Vec<SelectOption<String>> {
        vec![
            SelectOption::new("Red", "r".to_string()),
            SelectOption::new("Blue", "b".to_string()),
        ]
    }

    #[test]
    fn test_resolves_exact_title() {
        let index = OptionIndex::build(colors(), KeyStrategy::default()).unwrap();
        assert_eq!(index.resolve_title(&"r".to_string(), true).unwrap(), "Red");
        assert_eq!(index.resolve_title(&"b".to_string(), true).unwrap(), "Blue");
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_unknown_value_with_must_match() {
        let index = OptionIndex::build(colors(), KeyStrategy::default()).unwrap();
        assert_eq!(index.resolve_title(&"g".to_string(), true).unwrap(), "");
    }

    #[test]
    fn test_unknown_value_without_must_match() {
        let index = OptionIndex::build(colors(), KeyStrategy::default()).unwrap();
        assert_eq!(index.resolve_title(&"zzz".to_string(), false).unwrap(), "zzz");
    }

    #[test]
    fn test_unset_value_is_empty() {
        let index = OptionIndex::build(colors(), KeyStrategy::default()).unwrap();
        assert_eq!(index.resolve_title(&String::new(), false).unwrap(), "");

        let numbers = OptionIndex::build(vec![SelectOption::new("Zero", 0u8)], KeyStrategy::default()).unwrap();
        assert_eq!(numbers.resolve_title(&0, true).unwrap(), "");
    }

    #[test]
    fn test_last_write_wins() {
        let options = vec![SelectOption::new("A", 1i32), SelectOption::new("B", 1i32)];
        let index = OptionIndex::build(options, KeyStrategy::default()).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.title_for_key(&Key::from("1")), Some("B"));
        assert_eq!(index.resolve_title(&1, true).unwrap(), "B");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let index = OptionIndex::build(colors(), KeyStrategy::default()).unwrap();
        let before = format!("{:?}", index);
        let first = index.resolve_title(&"b".to_string(), true).unwrap().into_owned();
        let second = index.resolve_title(&"b".to_string(), true).unwrap().into_owned();
        assert_eq!(first, second);
        assert_eq!(before, format!("{:?}", index));
    }

    #[test]
    fn test_build_propagates_unresolvable_key() {
        let options = vec![SelectOption::new("Object", json!({ "id": 1 }))];
        let err = OptionIndex::build(options, KeyStrategy::default()).unwrap_err();
        assert!(err.is_unresolvable_key());
    }

    #[test]
    fn test_accessor_index_over_json() {
        let options = vec![
            SelectOption::new("Berlin", json!({ "id": 1, "name": "berlin" })),
            SelectOption::new("Paris", json!({ "id": 2, "name": "paris" })),
        ];
        let index = OptionIndex::build(options, KeyStrategy::accessor("id")).unwrap();
        assert_eq!(index.resolve_title(&json!({ "id": 2 }), true).unwrap(), "Paris");

        let err = index.resolve_title(&json!({ "name": "rome" }), true).unwrap_err();
        assert!(err.is_unresolvable_key());
    }

    #[test]
    fn test_is_built_from() {
        let options: Arc<[SelectOption<String>]> = colors().into();
        let strategy = KeyStrategy::default();
        let index = OptionIndex::build(Arc::clone(&options), strategy.clone()).unwrap();
        assert!(index.is_built_from(&options, &strategy));

        let other: Arc<[SelectOption<String>]> = colors().into();
        assert!(!index.is_built_from(&other, &strategy));
    }

    #[test]
    fn test_option_for() {
        let index = OptionIndex::build(colors(), KeyStrategy::default()).unwrap();
        let option = index.option_for(&"b".to_string()).unwrap().unwrap();
        assert_eq!(option.title, "Blue");
        assert!(index.option_for(&"x".to_string()).unwrap().is_none());
    }
}
