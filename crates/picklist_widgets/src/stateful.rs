//! State traits shared by control and overlay state machines

use std::hash::Hash;

/// Trait for state types that handle event transitions
///
/// Implement this trait on a state enum to define how numeric events cause
/// state transitions. Returning `None` means the event does not apply in the
/// current state and the state is kept.
///
/// # Example
///
/// ```rust
/// use picklist_widgets::StateTransitions;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// enum Toggle {
///     #[default]
///     Off,
///     On,
/// }
///
/// const FLIP: u32 = 1;
///
/// impl StateTransitions for Toggle {
///     fn on_event(&self, event: u32) -> Option<Self> {
///         match (self, event) {
///             (Toggle::Off, FLIP) => Some(Toggle::On),
///             (Toggle::On, FLIP) => Some(Toggle::Off),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Toggle::Off.next(FLIP), Toggle::On);
/// assert_eq!(Toggle::On.next(99), Toggle::On);
/// ```
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;

    /// Handle an event, keeping the current state when it does not apply
    fn next(&self, event: u32) -> Self {
        self.on_event(event).unwrap_or(*self)
    }
}
