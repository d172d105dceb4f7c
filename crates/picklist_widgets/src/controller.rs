//! Interaction controller - the dropdown state machine
//!
//! The controller is a pure transition function over [`InteractionState`]:
//! `transition(state, event) -> (state, effects)`. It owns no state itself,
//! only the policy of one control instance (variant, disabled, match policy,
//! filter). Effects are returned in the order the caller must apply them.
//!
//! | From   | Event                 | To     | Effects                                  |
//! |--------|-----------------------|--------|------------------------------------------|
//! | Closed | `Press` (enabled)     | Open   | `DismissKeyboard`                        |
//! | any    | `AutoOpen`            | Open   |                                          |
//! | Open   | `Dismiss`             | Closed | free-text search: `Commit(search text)`  |
//! | Open   | `Select(v)`           | Closed | `Commit(v)`, search text cleared         |
//! | Open   | `SearchChanged(t)`    | Open   | search text updated                      |
//! | Open   | `CommitValue(v)`      | Open   | `Commit(v)`                              |
//! | any    | `SetOpen(b)`          | b      |                                          |
//!
//! The search text survives a dismiss; a reopened search shows the previous
//! query.

use std::fmt;
use std::sync::Arc;

use picklist_core::{SelectOption, DEFAULT_NO_OPTIONS_TEXT};
use picklist_platform::DismissReason;
use smallvec::SmallVec;

use crate::stateful::StateTransitions;

// =============================================================================
// Control Event Types
// =============================================================================

/// Event codes for the open/closed state machine
pub mod control_events {
    /// Activation gesture on the value box (Closed -> Open)
    pub const PRESS: u32 = 21001;
    /// Grace-delay auto open (any -> Open)
    pub const AUTO_OPEN: u32 = 21002;
    /// Overlay dismiss signal (Open -> Closed)
    pub const DISMISS: u32 = 21003;
    /// Option selected (Open -> Closed)
    pub const SELECT: u32 = 21004;
    /// Programmatic open (any -> Open)
    pub const SET_OPEN: u32 = 21005;
    /// Programmatic close (any -> Closed)
    pub const SET_CLOSED: u32 = 21006;
}

/// Open/closed state of a control
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OpenState {
    /// The options overlay is not requested
    #[default]
    Closed,
    /// The options overlay is requested
    Open,
}

impl OpenState {
    /// Whether the overlay is requested
    pub fn is_open(&self) -> bool {
        matches!(self, OpenState::Open)
    }
}

impl StateTransitions for OpenState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use control_events::*;
        use OpenState::*;

        match (self, event) {
            (Closed, PRESS) | (Closed, AUTO_OPEN) | (Closed, SET_OPEN) => Some(Open),
            (Open, DISMISS) | (Open, SELECT) | (Open, SET_CLOSED) => Some(Closed),
            _ => None,
        }
    }
}

/// Interaction state of one control instance
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    /// Open/closed state
    pub open: OpenState,
    /// Current search text (search variant only)
    pub search_text: String,
}

impl InteractionState {
    /// Whether the overlay is requested
    pub fn is_open(&self) -> bool {
        self.open.is_open()
    }
}

/// Events fed to the controller
#[derive(Clone, Debug, PartialEq)]
pub enum ControlEvent<V> {
    /// Activation gesture on the value box
    Press,
    /// Grace-delay auto open fired
    AutoOpen,
    /// The overlay was asked to close
    Dismiss(DismissReason),
    /// An option's value was selected from the list
    Select(V),
    /// The search text changed
    SearchChanged(String),
    /// Commit a value without closing (custom search input)
    CommitValue(V),
    /// Open or close without committing (custom search input)
    SetOpen(bool),
}

/// Side effects requested by a transition
#[derive(Clone, Debug, PartialEq)]
pub enum Effect<V> {
    /// Hide any software keyboard currently shown
    DismissKeyboard,
    /// Invoke the on-select callback with this value
    Commit(V),
}

/// Result of a transition
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<V> {
    /// The next state
    pub state: InteractionState,
    /// Effects to apply, in order, before the state is observed by the overlay
    pub effects: SmallVec<[Effect<V>; 2]>,
}

impl<V> Transition<V> {
    fn unchanged(state: &InteractionState) -> Self {
        Self {
            state: state.clone(),
            effects: SmallVec::new(),
        }
    }

    /// Values committed by this transition
    pub fn commits(&self) -> impl Iterator<Item = &V> {
        self.effects.iter().filter_map(|effect| match effect {
            Effect::Commit(value) => Some(value),
            Effect::DismissKeyboard => None,
        })
    }
}

/// Control variant
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Plain list select
    #[default]
    Plain,
    /// Search-filterable select
    Search,
}

/// Predicate deciding whether an option matches the search text
pub type FilterFn<V> = Arc<dyn Fn(&SelectOption<V>, &str) -> bool + Send + Sync>;

/// Conversion from committed free text to a value
pub type FreeTextFn<V> = Arc<dyn Fn(&str) -> V + Send + Sync>;

/// What the options surface should show
#[derive(Debug, PartialEq)]
pub enum OptionsView<'a, V> {
    /// Search text is below the trigger limit: no results area at all
    Pending,
    /// Options to list, in source order
    List(Vec<&'a SelectOption<V>>),
    /// Nothing to list; carries the message unless it was suppressed
    Empty {
        /// "No results" message to render
        message: Option<&'a str>,
    },
}

impl<'a, V> OptionsView<'a, V> {
    /// Listed options, empty for `Pending` and `Empty`
    pub fn options(&self) -> &[&'a SelectOption<V>] {
        match self {
            OptionsView::List(options) => options.as_slice(),
            _ => &[],
        }
    }

    /// Whether a results area is rendered
    pub fn shows_results(&self) -> bool {
        !matches!(self, OptionsView::Pending)
    }
}

/// Policy of one control instance
pub struct InteractionController<V> {
    variant: Variant,
    disabled: bool,
    free_text: Option<FreeTextFn<V>>,
    filter: Option<FilterFn<V>>,
    filter_trigger_limit: usize,
    show_no_options_text: bool,
    no_options_text: String,
}

impl<V> InteractionController<V> {
    /// Controller for a plain dropdown
    pub fn plain() -> Self {
        Self {
            variant: Variant::Plain,
            disabled: false,
            free_text: None,
            filter: None,
            filter_trigger_limit: 0,
            show_no_options_text: true,
            no_options_text: DEFAULT_NO_OPTIONS_TEXT.to_string(),
        }
    }

    /// Controller for a searchable dropdown
    pub fn search() -> Self {
        Self {
            variant: Variant::Search,
            ..Self::plain()
        }
    }

    /// Set disabled state
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
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

    /// Set a shared search filter predicate
    pub fn filter_fn(mut self, filter: Option<FilterFn<V>>) -> Self {
        self.filter = filter;
        self
    }

    /// Minimum search text length before results are shown
    pub fn filter_trigger_limit(mut self, limit: usize) -> Self {
        self.filter_trigger_limit = limit;
        self
    }

    /// Show or suppress the "no results" message
    pub fn show_no_options_text(mut self, show: bool) -> Self {
        self.show_no_options_text = show;
        self
    }

    /// Set the "no results" message
    pub fn no_options_text(mut self, text: impl Into<String>) -> Self {
        self.no_options_text = text.into();
        self
    }

    /// Accept unmatched search text, converting it with `convert` on dismiss
    pub fn free_text_with(mut self, convert: FreeTextFn<V>) -> Self {
        self.free_text = Some(convert);
        self
    }

    /// Require committed values to come from the option list
    pub fn must_match(mut self) -> Self {
        self.free_text = None;
        self
    }

    /// Change disabled state in place
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether only option values may be committed
    pub fn must_match_options(&self) -> bool {
        self.free_text.is_none()
    }

    /// Compute the next state and effects for `event`
    pub fn transition(&self, state: &InteractionState, event: ControlEvent<V>) -> Transition<V> {
        use control_events::*;

        let mut next = state.clone();
        let mut effects = SmallVec::new();

        match event {
            ControlEvent::Press => {
                if self.disabled {
                    tracing::debug!("InteractionController - press ignored, control is disabled");
                    return Transition::unchanged(state);
                }
                if let Some(open) = state.open.on_event(PRESS) {
                    next.open = open;
                    effects.push(Effect::DismissKeyboard);
                }
            }
            ControlEvent::AutoOpen => {
                next.open = state.open.next(AUTO_OPEN);
            }
            ControlEvent::Dismiss(reason) => {
                let Some(closed) = state.open.on_event(DISMISS) else {
                    return Transition::unchanged(state);
                };
                if self.variant == Variant::Search {
                    if let Some(convert) = &self.free_text {
                        tracing::debug!(
                            "InteractionController - committing free text on {:?}",
                            reason
                        );
                        effects.push(Effect::Commit(convert(&state.search_text)));
                    }
                }
                next.open = closed;
            }
            ControlEvent::Select(value) => {
                let Some(closed) = state.open.on_event(SELECT) else {
                    return Transition::unchanged(state);
                };
                effects.push(Effect::Commit(value));
                if self.variant == Variant::Search {
                    next.search_text.clear();
                }
                next.open = closed;
            }
            ControlEvent::SearchChanged(text) => {
                if self.variant != Variant::Search || !state.is_open() {
                    return Transition::unchanged(state);
                }
                next.search_text = text;
            }
            ControlEvent::CommitValue(value) => {
                if !state.is_open() {
                    return Transition::unchanged(state);
                }
                effects.push(Effect::Commit(value));
            }
            ControlEvent::SetOpen(open) => {
                next.open = state.open.next(if open { SET_OPEN } else { SET_CLOSED });
            }
        }

        Transition {
            state: next,
            effects,
        }
    }

    /// Whether the results area is shown for `search_text`
    pub fn results_visible(&self, search_text: &str) -> bool {
        match self.variant {
            Variant::Plain => true,
            Variant::Search => search_text.chars().count() >= self.filter_trigger_limit,
        }
    }

    /// Options the surface should show in `state`
    pub fn visible_options<'a>(
        &'a self,
        state: &InteractionState,
        options: &'a [SelectOption<V>],
    ) -> OptionsView<'a, V> {
        if !self.results_visible(&state.search_text) {
            return OptionsView::Pending;
        }

        let listed: Vec<&SelectOption<V>> = match (&self.filter, self.variant) {
            (Some(filter), Variant::Search) => options
                .iter()
                .filter(|option| filter(option, &state.search_text))
                .collect(),
            _ => options.iter().collect(),
        };

        if listed.is_empty() {
            OptionsView::Empty {
                message: self
                    .show_no_options_text
                    .then_some(self.no_options_text.as_str()),
            }
        } else {
            OptionsView::List(listed)
        }
    }
}

impl<V: From<String>> InteractionController<V> {
    /// Accept unmatched search text, committing it as a value on dismiss
    pub fn free_text(self) -> Self {
        self.free_text_with(Arc::new(|text: &str| V::from(text.to_string())))
    }
}

impl<V> fmt::Debug for InteractionController<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionController")
            .field("variant", &self.variant)
            .field("disabled", &self.disabled)
            .field("must_match_options", &self.free_text.is_none())
            .field("filter", &self.filter.is_some())
            .field("filter_trigger_limit", &self.filter_trigger_limit)
            .field("show_no_options_text", &self.show_no_options_text)
            .finish()
    }
}
