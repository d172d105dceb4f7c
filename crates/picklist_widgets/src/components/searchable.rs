//! Searchable dropdown - filter options by typing
//!
//! The overlay hosts a search input above the result list. Results stay
//! hidden until the search text reaches the filter trigger limit. With
//! `must_match_options(false)` the control also accepts free text: whatever
//! was typed is committed when the overlay is dismissed.
//!
//! Hosts that draw their own search input read [`SearchInputProps`] and feed
//! user actions back with [`Dropdown::apply_search_input`].
//!
//! # Example
//!
//! ```rust
//! use picklist_core::SelectOption;
//! use picklist_platform::DismissReason;
//! use picklist_widgets::prelude::*;
//!
//! let mut city = searchable_dropdown(vec![
//!     SelectOption::new("Berlin", "BER".to_string()),
//!     SelectOption::new("Bern", "BRN".to_string()),
//! ])
//! .filter(|option, text| option.title.to_lowercase().starts_with(&text.to_lowercase()))
//! .filter_trigger_limit(2)
//! .must_match_options(false)
//! .build()
//! .unwrap();
//!
//! city.mount(0);
//! city.press();
//! city.set_search_text("Bonn");
//! city.dismiss(DismissReason::OutsideTap);
//! assert_eq!(city.display_value().unwrap(), "Bonn");
//! ```

use std::sync::Arc;

use picklist_core::{AnimationType, Color, DropdownSettings, KeyStrategy, OptionValue, Result, SelectOption};
use picklist_platform::KeyboardSource;

use super::dropdown::{Dropdown, DropdownBuilder, DropdownConfig};
use crate::controller::{ControlEvent, FilterFn, FreeTextFn, InteractionController, Variant};

// =============================================================================
// Search input
// =============================================================================

/// What a custom search input needs to render
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchInputProps<'a> {
    /// Current search text
    pub value: &'a str,
    /// Hint shown while the search text is empty
    pub placeholder: &'a str,
    /// Whether the input should take focus now
    pub autofocus: bool,
}

/// Actions a custom search input reports back
#[derive(Clone, Debug, PartialEq)]
pub enum SearchInputAction<V> {
    /// The text changed
    ChangeText(String),
    /// Commit a value without closing the overlay
    Select(V),
    /// Open or close the overlay without committing
    SetModal(bool),
}

impl<V> From<SearchInputAction<V>> for ControlEvent<V> {
    fn from(action: SearchInputAction<V>) -> Self {
        match action {
            SearchInputAction::ChangeText(text) => ControlEvent::SearchChanged(text),
            SearchInputAction::Select(value) => ControlEvent::CommitValue(value),
            SearchInputAction::SetModal(open) => ControlEvent::SetOpen(open),
        }
    }
}

impl<V: OptionValue + Clone> Dropdown<V> {
    /// Props for the search input, `None` for plain dropdowns
    ///
    /// Takes the pending focus request, so `autofocus` is `true` once per
    /// overlay show.
    pub fn search_input_props(&mut self) -> Option<SearchInputProps<'_>> {
        if self.variant() != Variant::Search {
            return None;
        }
        let autofocus = self.take_focus_request();
        Some(SearchInputProps {
            value: &self.state().search_text,
            placeholder: self.search_placeholder(),
            autofocus,
        })
    }

    /// Apply an action reported by the search input
    pub fn apply_search_input(&mut self, action: SearchInputAction<V>) -> bool {
        if self.variant() != Variant::Search {
            tracing::warn!("Dropdown::apply_search_input - not a searchable dropdown");
            return false;
        }
        self.apply(action.into())
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for creating searchable Dropdown controls with fluent API
pub struct SearchableDropdownBuilder<V> {
    config: DropdownConfig<V>,
    filter: Option<FilterFn<V>>,
    free_text: Option<FreeTextFn<V>>,
}

impl<V: OptionValue + Clone> SearchableDropdownBuilder<V> {
    /// Create a builder over `options`
    pub fn new(options: impl IntoIterator<Item = SelectOption<V>>) -> Self {
        Self {
            config: DropdownBuilder::new(options).into_config(),
            filter: None,
            free_text: None,
        }
    }

    /// Add an option
    pub fn option(mut self, title: impl Into<String>, value: V) -> Self {
        self.config.options.push(SelectOption::new(title, value));
        self
    }

    /// Set the initially committed value
    pub fn value(mut self, value: V) -> Self {
        self.config.value = Some(value);
        self
    }

    /// Set how option values are keyed
    pub fn option_key(mut self, strategy: KeyStrategy<V>) -> Self {
        self.config.key = strategy;
        self
    }

    /// Apply plain-data settings
    ///
    /// `must_match_options = false` only takes effect through
    /// [`Self::must_match_options`], which needs a text conversion.
    /// `must_match_options = true` drops any free text set up before.
    pub fn settings(mut self, settings: DropdownSettings) -> Self {
        if settings.must_match_options {
            self.free_text = None;
        }
        self.config.settings = settings;
        self
    }

    /// Set the placeholder text
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.config.settings.placeholder = placeholder.into();
        self
    }

    /// Set the search input hint, defaulting to the placeholder
    pub fn search_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.config.search_placeholder = Some(placeholder.into());
        self
    }

    /// Set disabled state
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.config.settings.disabled = disabled;
        self
    }

    /// Cut long titles in the value box
    pub fn cut(mut self, cut: bool) -> Self {
        self.config.settings.cut = cut;
        self
    }

    /// Open automatically after mount
    pub fn initially_open(mut self, open: bool) -> Self {
        self.config.settings.initially_open = open;
        self
    }

    /// Set the overlay transition
    pub fn animation(mut self, animation: AnimationType) -> Self {
        self.config.settings.animation = animation;
        self
    }

    /// Use a distinct value box style while the placeholder is shown
    pub fn placeholder_style(mut self, enabled: bool) -> Self {
        self.config.placeholder_style = enabled;
        self
    }

    /// Set the indicator color
    pub fn indicator_color(mut self, color: Color) -> Self {
        self.config.indicator_colors.default = color;
        self
    }

    /// Set the indicator color used while the placeholder is shown
    pub fn placeholder_indicator_color(mut self, color: Color) -> Self {
        self.config.indicator_colors.placeholder = Some(color);
        self
    }

    /// Inject the platform keyboard
    pub fn keyboard(mut self, keyboard: Arc<dyn KeyboardSource>) -> Self {
        self.config.keyboard = Some(keyboard);
        self
    }

    /// Set the select callback
    pub fn on_select<F>(mut self, callback: F) -> Self
    where
        F: Fn(&V) + Send + Sync + 'static,
    {
        self.config.on_select = Some(Arc::new(callback));
        self
    }

    /// Set the search filter predicate
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&SelectOption<V>, &str) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Minimum search text length (in characters) before results are shown
    pub fn filter_trigger_limit(mut self, limit: usize) -> Self {
        self.config.settings.filter_trigger_limit = limit;
        self
    }

    /// Show or suppress the "no results" message
    pub fn show_no_options_text(mut self, show: bool) -> Self {
        self.config.settings.show_no_options_text = show;
        self
    }

    /// Set the "no results" message
    pub fn no_options_text(mut self, text: impl Into<String>) -> Self {
        self.config.settings.no_options_text = text.into();
        self
    }

    /// Build the control
    ///
    /// Fails with `UnresolvableKey` if an option value has no usable key.
    pub fn build(self) -> Result<Dropdown<V>> {
        let settings = &self.config.settings;
        let mut controller = InteractionController::search()
            .filter_fn(self.filter)
            .filter_trigger_limit(settings.filter_trigger_limit)
            .show_no_options_text(settings.show_no_options_text)
            .no_options_text(settings.no_options_text.clone());

        match self.free_text {
            Some(convert) => controller = controller.free_text_with(convert),
            None if !settings.must_match_options => {
                tracing::warn!(
                    "SearchableDropdownBuilder::build - free text needs must_match_options(false); keeping must-match"
                );
            }
            None => {}
        }

        Dropdown::from_config(self.config, controller)
    }
}

impl<V: OptionValue + Clone + From<String>> SearchableDropdownBuilder<V> {
    /// Require committed values to come from the option list
    ///
    /// With `false`, the typed text is committed as a value when the overlay
    /// is dismissed, and unknown values display as their own text.
    pub fn must_match_options(mut self, must_match: bool) -> Self {
        self.config.settings.must_match_options = must_match;
        self.free_text = if must_match {
            None
        } else {
            Some(Arc::new(|text: &str| V::from(text.to_string())))
        };
        self
    }
}

/// Create a searchable dropdown over `options`
pub fn searchable_dropdown<V: OptionValue + Clone>(
    options: impl IntoIterator<Item = SelectOption<V>>,
) -> SearchableDropdownBuilder<V> {
    SearchableDropdownBuilder::new(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::OptionsView;
    use picklist_core::DEFAULT_NO_OPTIONS_TEXT;
    use picklist_platform::{DismissReason, KeyboardEvent, SoftKeyboard};
    use std::sync::Mutex;

    fn colors() -> Vec<SelectOption<String>> {
        vec![
            SelectOption::new("Red", "r".to_string()),
            SelectOption::new("Green", "g".to_string()),
            SelectOption::new("Blue", "b".to_string()),
        ]
    }

    fn contains_ci(option: &SelectOption<String>, text: &str) -> bool {
        option.title.to_lowercase().contains(&text.to_lowercase())
    }

    fn titles(control: &Dropdown<String>) -> Vec<String> {
        control
            .visible_options()
            .options()
            .iter()
            .map(|option| option.title.clone())
            .collect()
    }

    #[test]
    fn test_results_follow_trigger_limit() {
        let mut control = searchable_dropdown(colors())
            .filter(contains_ci)
            .filter_trigger_limit(2)
            .build()
            .unwrap();
        control.mount(0);
        control.press();

        control.set_search_text("r");
        assert_eq!(control.visible_options(), OptionsView::Pending);

        control.set_search_text("re");
        assert_eq!(titles(&control), vec!["Red", "Green"]);
    }

    #[test]
    fn test_free_text_committed_once_on_dismiss() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let mut control = searchable_dropdown(colors())
            .filter(contains_ci)
            .must_match_options(false)
            .on_select(move |value: &String| sink.lock().unwrap().push(value.clone()))
            .build()
            .unwrap();
        control.mount(0);
        control.press();
        control.set_search_text("zzz");
        assert_eq!(
            control.visible_options(),
            OptionsView::Empty {
                message: Some(DEFAULT_NO_OPTIONS_TEXT)
            }
        );

        assert!(control.dismiss(DismissReason::OutsideTap));
        assert!(!control.dismiss(DismissReason::OutsideTap));
        assert_eq!(*log.lock().unwrap(), vec!["zzz".to_string()]);
        assert_eq!(control.display_value().unwrap(), "zzz");
    }

    #[test]
    fn test_must_match_dismiss_commits_nothing() {
        let log = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = Arc::clone(&log);
        let mut control = searchable_dropdown(colors())
            .placeholder("Color")
            .on_select(move |value: &String| sink.lock().unwrap().push(value.clone()))
            .build()
            .unwrap();
        control.mount(0);
        control.press();
        control.set_search_text("zzz");
        control.dismiss(DismissReason::HardwareBack);

        assert!(log.lock().unwrap().is_empty());
        assert_eq!(control.display_value().unwrap(), "Color");
        // Reopening shows the previous query
        control.press();
        assert_eq!(control.state().search_text, "zzz");
    }

    #[test]
    fn test_select_clears_search_text() {
        let mut control = searchable_dropdown(colors()).filter(contains_ci).build().unwrap();
        control.mount(0);
        control.press();
        control.set_search_text("bl");
        assert_eq!(titles(&control), vec!["Blue"]);

        control.select("b".to_string());
        assert_eq!(control.state().search_text, "");
        assert!(!control.is_open());
        assert_eq!(control.display_value().unwrap(), "Blue");
    }

    #[test]
    fn test_select_index_counts_filtered_rows() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let mut control = searchable_dropdown(colors())
            .filter(contains_ci)
            .on_select(move |value: &String| sink.lock().unwrap().push(value.clone()))
            .build()
            .unwrap();
        control.mount(0);
        control.press();
        control.set_search_text("bl");
        assert_eq!(titles(&control), vec!["Blue"]);

        assert!(control.select_index(0));
        assert_eq!(*log.lock().unwrap(), vec!["b".to_string()]);
        assert_eq!(control.display_value().unwrap(), "Blue");
    }

    #[test]
    fn test_select_index_outside_filtered_rows() {
        let mut control = searchable_dropdown(colors())
            .filter(contains_ci)
            .filter_trigger_limit(1)
            .build()
            .unwrap();
        control.mount(0);
        control.press();
        // Nothing listed until the trigger limit is reached
        assert!(!control.select_index(0));

        control.set_search_text("bl");
        assert!(!control.select_index(1));
        assert!(control.is_open());
        assert_eq!(control.value(), None);
    }

    #[test]
    fn test_focus_requested_once_shown() {
        let mut control = searchable_dropdown(colors())
            .animation(AnimationType::Slide)
            .search_placeholder("Type to search")
            .build()
            .unwrap();
        control.mount(0);
        control.press();

        let props = control.search_input_props().unwrap();
        assert!(!props.autofocus);
        assert_eq!(props.placeholder, "Type to search");

        control.tick(0);
        control.tick(300);
        assert!(control.search_input_props().unwrap().autofocus);
        assert!(!control.search_input_props().unwrap().autofocus);
    }

    #[test]
    fn test_plain_dropdown_has_no_search_input() {
        let mut control = crate::components::dropdown(colors()).build().unwrap();
        control.mount(0);
        control.press();
        assert_eq!(control.search_input_props(), None);
        assert!(!control.apply_search_input(SearchInputAction::ChangeText("r".into())));
    }

    #[test]
    fn test_search_input_actions() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let mut control = searchable_dropdown(colors())
            .on_select(move |value: &String| sink.lock().unwrap().push(value.clone()))
            .build()
            .unwrap();
        control.mount(0);

        assert!(control.apply_search_input(SearchInputAction::SetModal(true)));
        assert!(control.is_open());

        control.apply_search_input(SearchInputAction::ChangeText("gr".into()));
        assert_eq!(control.search_input_props().unwrap().value, "gr");

        control.apply_search_input(SearchInputAction::Select("g".to_string()));
        assert!(control.is_open());
        assert_eq!(*log.lock().unwrap(), vec!["g".to_string()]);

        control.apply_search_input(SearchInputAction::SetModal(false));
        assert!(!control.is_open());
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_no_results_message_suppressed() {
        let mut control = searchable_dropdown(colors())
            .filter(contains_ci)
            .show_no_options_text(false)
            .build()
            .unwrap();
        control.mount(0);
        control.press();
        control.set_search_text("purple");
        assert_eq!(control.visible_options(), OptionsView::Empty { message: None });
    }

    #[test]
    fn test_settings_preset() {
        let mut control = searchable_dropdown(colors())
            .settings(DropdownSettings::free_text())
            .must_match_options(false)
            .filter(contains_ci)
            .build()
            .unwrap();
        control.mount(0);
        control.press();
        assert_eq!(control.visible_options(), OptionsView::Pending);

        control.set_search_text("g");
        assert_eq!(titles(&control), vec!["Green"]);
    }

    #[test]
    fn test_must_match_settings_override_free_text() {
        let log = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = Arc::clone(&log);
        let mut control = searchable_dropdown(colors())
            .must_match_options(false)
            .settings(DropdownSettings::standard())
            .on_select(move |value: &String| sink.lock().unwrap().push(value.clone()))
            .build()
            .unwrap();
        control.mount(0);
        control.press();
        control.set_search_text("zzz");
        control.dismiss(DismissReason::OutsideTap);
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(control.value(), None);
    }

    #[test]
    fn test_unmount_dismisses_visible_keyboard() {
        let keyboard = SoftKeyboard::shared();
        let mut control = searchable_dropdown(colors())
            .keyboard(keyboard.clone())
            .build()
            .unwrap();
        control.mount(0);
        control.press();
        keyboard.emit(KeyboardEvent::DidShow);

        control.unmount();
        assert_eq!(keyboard.listener_count(), 0);
        assert!(!keyboard.is_visible());
        // One from the press, one from teardown
        assert_eq!(keyboard.dismiss_requests(), 2);
    }
}
