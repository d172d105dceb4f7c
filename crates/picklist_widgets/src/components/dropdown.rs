//! Dropdown component - select a value from a modal option list
//!
//! A dropdown shows the selected option's title (or a placeholder) in a
//! value box. Pressing the box opens a modal overlay listing the options;
//! selecting one commits it, invokes `on_select` and closes the overlay.
//!
//! The control is headless: the host forwards gestures and frame ticks and
//! renders from `display_value`, `style_variant`, `indicator` and
//! `visible_options`.
//!
//! # Example
//!
//! ```rust
//! use picklist_core::SelectOption;
//! use picklist_widgets::prelude::*;
//!
//! let mut colors = dropdown(vec![
//!     SelectOption::new("Red", "r".to_string()),
//!     SelectOption::new("Blue", "b".to_string()),
//! ])
//! .placeholder("Pick a color")
//! .on_select(|value: &String| println!("Selected: {}", value))
//! .build()
//! .unwrap();
//!
//! colors.mount(0);
//! assert_eq!(colors.display_value().unwrap(), "Pick a color");
//!
//! colors.press();
//! colors.select_index(1);
//! assert_eq!(colors.display_value().unwrap(), "Blue");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use picklist_core::{
    select_style, value_text, Color, DropdownSettings, Indicator, IndicatorDirection, KeyStrategy,
    OptionIndex, OptionValue, Result, SelectOption, StyleVariant, StyleVariants,
};
use picklist_platform::{DismissReason, HostEvent, KeyboardSource, OneShotTimer};

use crate::controller::{
    ControlEvent, Effect, InteractionController, InteractionState, OptionsView, Variant,
};
use crate::overlay::{OverlayConfig, OverlayNotice, OverlayPresenter};

/// Delay between mount and the automatic open of an `initially_open` control
pub const AUTO_OPEN_DELAY_MS: u64 = 2000;

/// Callback invoked with each committed value
pub type OnSelectFn<V> = Arc<dyn Fn(&V) + Send + Sync>;

/// Mount lifecycle of a control
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Built but not mounted yet
    #[default]
    Created,
    /// Receiving events
    Mounted,
    /// Torn down; all further events are ignored
    Unmounted,
}

// =============================================================================
// Dropdown
// =============================================================================

/// A dropdown control instance
pub struct Dropdown<V> {
    index: OptionIndex<V>,
    value: Option<V>,
    placeholder: String,
    search_placeholder: Option<String>,
    cut: bool,
    initially_open: bool,
    controller: InteractionController<V>,
    state: InteractionState,
    overlay: OverlayPresenter,
    keyboard: Option<Arc<dyn KeyboardSource>>,
    on_select: Option<OnSelectFn<V>>,
    auto_open: OneShotTimer,
    lifecycle: Lifecycle,
    now_ms: u64,
    focus_requested: bool,
    indicator_colors: StyleVariants<Color>,
    placeholder_style: bool,
}

impl<V: OptionValue + Clone> Dropdown<V> {
    pub(crate) fn from_config(
        config: DropdownConfig<V>,
        controller: InteractionController<V>,
    ) -> Result<Self> {
        let overlay_config = match controller.variant() {
            Variant::Plain => OverlayConfig::dropdown(),
            Variant::Search => OverlayConfig::search(),
        }
        .animation(config.settings.animation);

        let index = OptionIndex::build(config.options, config.key)?;

        tracing::debug!(
            "Dropdown::from_config - {:?} with {} options",
            controller.variant(),
            index.options().len()
        );

        Ok(Self {
            index,
            value: config.value,
            placeholder: config.settings.placeholder,
            search_placeholder: config.search_placeholder,
            cut: config.settings.cut,
            initially_open: config.settings.initially_open,
            controller: controller.disabled(config.settings.disabled),
            state: InteractionState::default(),
            overlay: OverlayPresenter::new(overlay_config),
            keyboard: config.keyboard,
            on_select: config.on_select,
            auto_open: OneShotTimer::new(AUTO_OPEN_DELAY_MS),
            lifecycle: Lifecycle::Created,
            now_ms: 0,
            focus_requested: false,
            indicator_colors: config.indicator_colors,
            placeholder_style: config.placeholder_style,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Start receiving events
    ///
    /// Attaches keyboard listeners and, for `initially_open` controls, arms
    /// the auto-open timer to fire [`AUTO_OPEN_DELAY_MS`] after `now_ms`.
    pub fn mount(&mut self, now_ms: u64) {
        if self.lifecycle != Lifecycle::Created {
            tracing::warn!("Dropdown::mount - already {:?}", self.lifecycle);
            return;
        }
        self.lifecycle = Lifecycle::Mounted;
        self.now_ms = now_ms;

        if let Some(keyboard) = &self.keyboard {
            self.overlay.attach(Arc::clone(keyboard));
        }
        if self.initially_open {
            self.auto_open.arm(now_ms);
            tracing::debug!(
                "Dropdown::mount - auto open armed for {:?}ms",
                self.auto_open.deadline_ms()
            );
        }
    }

    /// Stop receiving events and release everything held
    pub fn unmount(&mut self) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }
        self.lifecycle = Lifecycle::Unmounted;
        self.auto_open.disarm();
        self.overlay.teardown();
        tracing::debug!("Dropdown::unmount - torn down");
    }

    /// Advance the frame clock
    pub fn tick(&mut self, now_ms: u64) {
        if self.lifecycle != Lifecycle::Mounted {
            return;
        }
        self.now_ms = self.now_ms.max(now_ms);

        if self.auto_open.poll(self.now_ms) {
            tracing::debug!("Dropdown::tick - auto open fired at {}ms", self.now_ms);
            self.apply(ControlEvent::AutoOpen);
        }

        self.overlay.update(self.now_ms);
        self.drain_notices();
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Events
    // ─────────────────────────────────────────────────────────────────────────

    /// Activation gesture on the value box
    pub fn press(&mut self) -> bool {
        self.apply(ControlEvent::Press)
    }

    /// Close the overlay
    pub fn dismiss(&mut self, reason: DismissReason) -> bool {
        self.apply(ControlEvent::Dismiss(reason))
    }

    /// Tap on the dismiss catcher outside the options
    pub fn backdrop_tap(&mut self) -> bool {
        match self.overlay.handle_backdrop_tap() {
            Some(reason) => self.dismiss(reason),
            None => false,
        }
    }

    /// Hardware back button; returns whether the press was consumed
    pub fn back(&mut self) -> bool {
        match self.overlay.handle_back() {
            Some(reason) => self.dismiss(reason),
            None => false,
        }
    }

    /// Select `value` from the list
    pub fn select(&mut self, value: V) -> bool {
        self.apply(ControlEvent::Select(value))
    }

    /// Select the row at `index` of the list the surface shows
    ///
    /// Rows are counted in [`Dropdown::visible_options`], so a filtered
    /// search list selects the option the user saw.
    pub fn select_index(&mut self, index: usize) -> bool {
        let value = self
            .visible_options()
            .options()
            .get(index)
            .map(|option| option.value.clone());
        let Some(value) = value else {
            tracing::warn!("Dropdown::select_index - no listed option at {}", index);
            return false;
        };
        self.select(value)
    }

    /// Replace the search text
    pub fn set_search_text(&mut self, text: impl Into<String>) -> bool {
        self.apply(ControlEvent::SearchChanged(text.into()))
    }

    /// Route a host signal
    pub fn handle_event(&mut self, event: HostEvent) -> bool {
        match event {
            HostEvent::Press => self.press(),
            HostEvent::Dismiss(reason) => self.dismiss(reason),
            HostEvent::Keyboard(event) => {
                if self.lifecycle != Lifecycle::Mounted {
                    return false;
                }
                self.overlay.note_keyboard(event)
            }
            HostEvent::Frame { now_ms } => {
                self.tick(now_ms);
                false
            }
        }
    }

    /// Feed one event through the controller and apply its effects
    ///
    /// Effects run first, then the new state is stored, then the overlay is
    /// synced to it. Animated overlay transitions start on the next `tick`,
    /// so events need no timestamp of their own. Returns whether anything
    /// changed.
    pub fn apply(&mut self, event: ControlEvent<V>) -> bool {
        if self.lifecycle != Lifecycle::Mounted {
            tracing::debug!(
                "Dropdown::apply - ignoring {:?} while {:?}",
                event,
                self.lifecycle
            );
            return false;
        }

        let transition = self.controller.transition(&self.state, event);
        let changed = transition.state != self.state || !transition.effects.is_empty();

        for effect in transition.effects {
            match effect {
                Effect::DismissKeyboard => self.overlay.dismiss_keyboard(),
                Effect::Commit(value) => self.commit(value),
            }
        }

        self.state = transition.state;
        self.overlay.sync(self.state.is_open(), self.now_ms);
        self.drain_notices();
        changed
    }

    fn commit(&mut self, value: V) {
        tracing::debug!("Dropdown::commit - {:?}", value);
        let value = self.value.insert(value);
        if let Some(on_select) = &self.on_select {
            on_select(value);
        }
    }

    fn drain_notices(&mut self) {
        for notice in self.overlay.take_notices() {
            if notice == OverlayNotice::Shown && self.controller.variant() == Variant::Search {
                self.focus_requested = true;
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Properties
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the committed value
    pub fn set_value(&mut self, value: Option<V>) {
        self.value = value;
    }

    /// Replace the option list, rebuilding the title index
    pub fn set_options(&mut self, options: impl Into<Arc<[SelectOption<V>]>>) -> Result<()> {
        let options = options.into();
        if self.index.is_built_from(&options, self.index.strategy()) {
            return Ok(());
        }
        self.index = OptionIndex::build(options, self.index.strategy().clone())?;
        Ok(())
    }

    /// Replace the key strategy, rebuilding the title index
    pub fn set_option_key(&mut self, strategy: KeyStrategy<V>) -> Result<()> {
        if self.index.strategy().same_as(&strategy) {
            return Ok(());
        }
        self.index = OptionIndex::build(Arc::clone(self.index.options()), strategy)?;
        Ok(())
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.controller.set_disabled(disabled);
    }

    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn options(&self) -> &[SelectOption<V>] {
        self.index.options()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn overlay(&self) -> &OverlayPresenter {
        &self.overlay
    }

    pub fn variant(&self) -> Variant {
        self.controller.variant()
    }

    /// Whether a value is selected
    pub fn has_value(&self) -> bool {
        self.value.as_ref().is_some_and(|value| !value.is_unset())
    }

    /// Title of the committed value
    ///
    /// Unknown values resolve to `""` for must-match controls and to their
    /// own text otherwise.
    pub fn title(&self) -> Result<Cow<'_, str>> {
        match &self.value {
            Some(value) => self
                .index
                .resolve_title(value, self.controller.must_match_options()),
            None => Ok(Cow::Borrowed("")),
        }
    }

    /// Text for the value box
    pub fn display_value(&self) -> Result<String> {
        let title = self.title()?;
        Ok(value_text(&title, &self.placeholder, self.cut).into_owned())
    }

    /// Visual variant for the value box
    pub fn style_variant(&self) -> StyleVariant {
        select_style(
            self.has_value(),
            self.placeholder_style || self.indicator_colors.placeholder.is_some(),
        )
    }

    /// Indicator glyph and its color
    pub fn indicator(&self) -> Indicator {
        Indicator {
            direction: IndicatorDirection::for_open(self.state.is_open()),
            color: *self.indicator_colors.get(self.style_variant()),
        }
    }

    /// Options the overlay should list
    pub fn visible_options(&self) -> OptionsView<'_, V> {
        self.controller
            .visible_options(&self.state, self.index.options())
    }

    /// Check and clear the pending search input focus request
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    pub(crate) fn search_placeholder(&self) -> &str {
        self.search_placeholder
            .as_deref()
            .unwrap_or(&self.placeholder)
    }
}

impl<V: fmt::Debug> fmt::Debug for Dropdown<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dropdown")
            .field("value", &self.value)
            .field("state", &self.state)
            .field("lifecycle", &self.lifecycle)
            .field("index", &self.index)
            .field("overlay", &self.overlay)
            .finish()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Configuration shared by both dropdown builders
pub(crate) struct DropdownConfig<V> {
    pub(crate) options: Vec<SelectOption<V>>,
    pub(crate) value: Option<V>,
    pub(crate) key: KeyStrategy<V>,
    pub(crate) settings: DropdownSettings,
    pub(crate) on_select: Option<OnSelectFn<V>>,
    pub(crate) keyboard: Option<Arc<dyn KeyboardSource>>,
    pub(crate) indicator_colors: StyleVariants<Color>,
    pub(crate) placeholder_style: bool,
    pub(crate) search_placeholder: Option<String>,
}

impl<V> DropdownConfig<V> {
    pub(crate) fn new(options: Vec<SelectOption<V>>) -> Self {
        Self {
            options,
            value: None,
            key: KeyStrategy::default(),
            settings: DropdownSettings::standard(),
            on_select: None,
            keyboard: None,
            indicator_colors: StyleVariants::new(Color::from_hex(0x333333)),
            placeholder_style: false,
            search_placeholder: None,
        }
    }
}

/// Builder for creating Dropdown controls with fluent API
pub struct DropdownBuilder<V> {
    config: DropdownConfig<V>,
}

impl<V: OptionValue + Clone> DropdownBuilder<V> {
    /// Create a builder over `options`
    pub fn new(options: impl IntoIterator<Item = SelectOption<V>>) -> Self {
        Self {
            config: DropdownConfig::new(options.into_iter().collect()),
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
    pub fn settings(mut self, settings: DropdownSettings) -> Self {
        self.config.settings = settings;
        self
    }

    /// Set the placeholder text
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.config.settings.placeholder = placeholder.into();
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
    pub fn animation(mut self, animation: picklist_core::AnimationType) -> Self {
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

    /// Build the control
    ///
    /// Fails with `UnresolvableKey` if an option value has no usable key.
    pub fn build(self) -> Result<Dropdown<V>> {
        Dropdown::from_config(self.config, InteractionController::plain())
    }

    pub(crate) fn into_config(self) -> DropdownConfig<V> {
        self.config
    }
}

/// Create a dropdown over `options`
pub fn dropdown<V: OptionValue + Clone>(
    options: impl IntoIterator<Item = SelectOption<V>>,
) -> DropdownBuilder<V> {
    DropdownBuilder::new(options)
}
