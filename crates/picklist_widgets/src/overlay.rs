//! Overlay presenter - the modal surface hosting the option list
//!
//! A control owns one presenter. The presenter follows the control's
//! requested open state (`sync`) and plays the transition chosen by
//! [`AnimationType`]. It never closes itself: the full-screen dismiss
//! catcher and the hardware back button only produce a [`DismissReason`]
//! that the control feeds to its controller, and the controller's new state
//! is synced back.
//!
//! # Architecture
//!
//! - **FSM-driven State**: `Closed -> Opening -> Open -> Closing -> Closed`
//! - **Frame clock**: a transition starts on the first `update(now_ms)`
//!   after it was requested and completes on a later one
//! - **Notices**: `Shown` once fully open, `Hidden` once fully closed
//! - **Keyboard**: listeners attached with the control, released exactly once
//!
//! # Example
//!
//! ```rust
//! use picklist_core::AnimationType;
//! use picklist_widgets::overlay::{OverlayConfig, OverlayNotice, OverlayPresenter};
//!
//! let mut overlay = OverlayPresenter::new(OverlayConfig::dropdown().animation(AnimationType::Fade));
//! overlay.present(0);
//! assert!(overlay.state().is_animating());
//!
//! overlay.update(1000);
//! overlay.update(1200);
//! assert_eq!(overlay.take_notices().as_slice(), &[OverlayNotice::Shown]);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use picklist_core::{AnimationType, Color};
use picklist_platform::{subscribe, DismissReason, KeyboardEvent, KeyboardSource, KeyboardSubscription};
use smallvec::SmallVec;

use crate::stateful::StateTransitions;

// =============================================================================
// Overlay Event Types
// =============================================================================

/// Custom event types for overlay state machine
pub mod overlay_events {
    /// Open the overlay (Closed -> Opening, Closing -> Opening)
    pub const OPEN: u32 = 20001;
    /// Close the overlay (Open -> Closing, Opening -> Closing)
    pub const CLOSE: u32 = 20002;
    /// Transition completed (Opening -> Open, Closing -> Closed)
    pub const ANIMATION_COMPLETE: u32 = 20003;
    /// Control unmounted (any -> Closed)
    pub const TEARDOWN: u32 = 20004;
}

// =============================================================================
// OverlayState - FSM for overlay lifecycle
// =============================================================================

/// State machine for overlay lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum OverlayState {
    /// Overlay is not visible
    #[default]
    Closed,
    /// Enter transition is playing
    Opening,
    /// Overlay is fully visible and interactive
    Open,
    /// Exit transition is playing
    Closing,
}

impl OverlayState {
    /// Check if overlay should be rendered
    pub fn is_visible(&self) -> bool {
        !matches!(self, OverlayState::Closed)
    }

    /// Check if overlay is fully open and interactive
    pub fn is_open(&self) -> bool {
        matches!(self, OverlayState::Open)
    }

    /// Check if overlay is animating
    pub fn is_animating(&self) -> bool {
        matches!(self, OverlayState::Opening | OverlayState::Closing)
    }

    /// Whether the overlay is open or on its way there
    pub fn is_requested_open(&self) -> bool {
        matches!(self, OverlayState::Opening | OverlayState::Open)
    }
}

impl StateTransitions for OverlayState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use overlay_events::*;
        use OverlayState::*;

        match (self, event) {
            (Closed, OPEN) => Some(Opening),
            (Opening, ANIMATION_COMPLETE) => Some(Open),
            (Open, CLOSE) => Some(Closing),
            (Closing, ANIMATION_COMPLETE) => Some(Closed),

            // Interrupt a running transition in the other direction
            (Opening, CLOSE) => Some(Closing),
            (Closing, OPEN) => Some(Opening),

            (Opening, TEARDOWN) | (Open, TEARDOWN) | (Closing, TEARDOWN) => Some(Closed),

            _ => None,
        }
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the dismiss catcher behind the options
#[derive(Clone, Debug)]
pub struct BackdropConfig {
    /// Scrim color drawn over the host UI
    pub color: Color,
    /// Whether a tap outside the options dismisses the overlay
    pub dismiss_on_tap: bool,
    /// Whether the modal surface itself is transparent
    pub transparent: bool,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            color: Color::rgba(0.0, 0.0, 0.0, 0.5),
            dismiss_on_tap: true,
            transparent: true,
        }
    }
}

impl BackdropConfig {
    /// Dark semi-transparent scrim
    pub fn dark() -> Self {
        Self::default()
    }

    /// Invisible catcher that still dismisses on tap
    pub fn clear() -> Self {
        Self {
            color: Color::TRANSPARENT,
            ..Self::default()
        }
    }

    /// Backdrop that ignores taps
    pub fn persistent() -> Self {
        Self {
            dismiss_on_tap: false,
            ..Self::default()
        }
    }

    /// Set the scrim color
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set whether tapping dismisses the overlay
    pub fn dismiss_on_tap(mut self, dismiss: bool) -> Self {
        self.dismiss_on_tap = dismiss;
        self
    }
}

/// Configuration for an overlay presenter
#[derive(Clone, Debug)]
pub struct OverlayConfig {
    /// Transition style
    pub animation: AnimationType,
    /// Dismiss catcher configuration
    pub backdrop: BackdropConfig,
    /// Close on hardware back button
    pub dismiss_on_back: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::dropdown()
    }
}

impl OverlayConfig {
    /// Option list overlay: clear catcher, no transition
    pub fn dropdown() -> Self {
        Self {
            animation: AnimationType::None,
            backdrop: BackdropConfig::clear(),
            dismiss_on_back: true,
        }
    }

    /// Search overlay: dark scrim so the search field stands out
    pub fn search() -> Self {
        Self {
            backdrop: BackdropConfig::dark(),
            ..Self::dropdown()
        }
    }

    /// Set the transition style
    pub fn animation(mut self, animation: AnimationType) -> Self {
        self.animation = animation;
        self
    }

    /// Set the backdrop
    pub fn backdrop(mut self, backdrop: BackdropConfig) -> Self {
        self.backdrop = backdrop;
        self
    }
}

// =============================================================================
// OverlayPresenter
// =============================================================================

/// Lifecycle notices reported to the control
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayNotice {
    /// The overlay became fully open
    Shown,
    /// The overlay became fully closed
    Hidden,
}

/// Presents and tears down the options overlay of one control
pub struct OverlayPresenter {
    config: OverlayConfig,
    state: OverlayState,
    /// Start of the running transition, stamped by the first `update`
    phase_started_ms: Option<u64>,
    notices: SmallVec<[OverlayNotice; 2]>,
    dirty: AtomicBool,
    keyboard: Option<Arc<dyn KeyboardSource>>,
    subscription: Option<KeyboardSubscription>,
    keyboard_visible: Arc<AtomicBool>,
}

impl OverlayPresenter {
    /// Create a closed presenter
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            state: OverlayState::Closed,
            phase_started_ms: None,
            notices: SmallVec::new(),
            dirty: AtomicBool::new(false),
            keyboard: None,
            subscription: None,
            keyboard_visible: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// Subscribe to keyboard show/hide notifications
    ///
    /// Returns `false` if a subscription is already active.
    pub fn attach(&mut self, keyboard: Arc<dyn KeyboardSource>) -> bool {
        if self.subscription.is_some() {
            return false;
        }

        self.keyboard_visible
            .store(keyboard.is_visible(), Ordering::SeqCst);

        let visible = Arc::clone(&self.keyboard_visible);
        let subscription = subscribe(
            &keyboard,
            Arc::new(move |event| {
                visible.store(event == KeyboardEvent::DidShow, Ordering::SeqCst);
            }),
        );

        tracing::debug!(
            "OverlayPresenter::attach - keyboard listener {:?}",
            subscription.id()
        );

        self.keyboard = Some(keyboard);
        self.subscription = Some(subscription);
        true
    }

    /// Whether the software keyboard is shown, as last reported
    pub fn keyboard_visible(&self) -> bool {
        self.keyboard_visible.load(Ordering::SeqCst)
    }

    /// Record a keyboard show/hide reported by the host
    ///
    /// Returns whether the tracked visibility changed.
    pub fn note_keyboard(&self, event: KeyboardEvent) -> bool {
        let visible = event == KeyboardEvent::DidShow;
        let changed = self.keyboard_visible.swap(visible, Ordering::SeqCst) != visible;
        if changed {
            tracing::trace!("OverlayPresenter::note_keyboard - {:?}", event);
        }
        changed
    }

    /// Ask the platform to hide the software keyboard
    pub fn dismiss_keyboard(&self) {
        if let Some(keyboard) = &self.keyboard {
            keyboard.dismiss();
        }
    }

    /// Start showing the overlay
    ///
    /// Instant transitions complete here; animated ones start on the next
    /// `update`, so a stale `now_ms` never skips the animation.
    pub fn present(&mut self, now_ms: u64) -> bool {
        if !self.transition(overlay_events::OPEN) {
            return false;
        }
        tracing::debug!(
            "OverlayPresenter::present - {:?} at {}ms",
            self.config.animation,
            now_ms
        );
        self.complete_if_instant(now_ms);
        true
    }

    /// Start hiding the overlay
    pub fn dismiss(&mut self, now_ms: u64) -> bool {
        if !self.transition(overlay_events::CLOSE) {
            return false;
        }
        tracing::debug!("OverlayPresenter::dismiss - at {}ms", now_ms);
        self.complete_if_instant(now_ms);
        true
    }

    /// Follow the control's requested open state
    pub fn sync(&mut self, is_open: bool, now_ms: u64) {
        if is_open == self.state.is_requested_open() {
            return;
        }
        if is_open {
            self.present(now_ms);
        } else {
            self.dismiss(now_ms);
        }
    }

    /// Complete running transitions - call this every frame
    pub fn update(&mut self, now_ms: u64) {
        if self.state.is_animating() {
            self.complete_if_elapsed(now_ms);
        }
    }

    /// Get the current transition progress (0.0 to 1.0)
    ///
    /// Returns (progress, is_entering), or None when not animating.
    pub fn animation_progress(&self, now_ms: u64) -> Option<(f32, bool)> {
        let duration = self.phase_duration_ms().filter(|&ms| ms > 0)?;
        let entering = self.state == OverlayState::Opening;
        let started = self.phase_started_ms.unwrap_or(now_ms);
        let elapsed = now_ms.saturating_sub(started) as f32;
        Some(((elapsed / duration as f32).clamp(0.0, 1.0), entering))
    }

    /// Tap on the full-screen dismiss catcher
    pub fn handle_backdrop_tap(&self) -> Option<DismissReason> {
        (self.state.is_requested_open() && self.config.backdrop.dismiss_on_tap)
            .then_some(DismissReason::OutsideTap)
    }

    /// Hardware back button
    pub fn handle_back(&self) -> Option<DismissReason> {
        (self.state.is_requested_open() && self.config.dismiss_on_back)
            .then_some(DismissReason::HardwareBack)
    }

    /// Scrim color to draw, if the overlay is visible
    pub fn scrim(&self) -> Option<Color> {
        self.state.is_visible().then_some(self.config.backdrop.color)
    }

    /// Drain lifecycle notices in the order they happened
    pub fn take_notices(&mut self) -> SmallVec<[OverlayNotice; 2]> {
        std::mem::take(&mut self.notices)
    }

    /// Check and clear dirty flag (overlay needs redraw)
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }

    /// Release keyboard listeners and close the overlay
    ///
    /// Listeners are released at most once; later calls only report `false`.
    /// A visible keyboard is dismissed explicitly.
    pub fn teardown(&mut self) -> bool {
        if self.state.on_event(overlay_events::TEARDOWN).is_some() {
            self.state = OverlayState::Closed;
            self.phase_started_ms = None;
            self.mark_dirty();
        }

        if self.keyboard_visible.swap(false, Ordering::SeqCst) {
            tracing::debug!("OverlayPresenter::teardown - dismissing visible keyboard");
            self.dismiss_keyboard();
        }

        let Some(mut subscription) = self.subscription.take() else {
            return false;
        };
        subscription.release();
        self.keyboard = None;
        true
    }

    /// Whether keyboard listeners are currently registered
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    fn transition(&mut self, event: u32) -> bool {
        let Some(next) = self.state.on_event(event) else {
            return false;
        };
        self.state = next;
        self.phase_started_ms = None;
        self.mark_dirty();
        true
    }

    fn phase_duration_ms(&self) -> Option<u64> {
        match self.state {
            OverlayState::Opening => Some(u64::from(self.config.animation.enter_ms())),
            OverlayState::Closing => Some(u64::from(self.config.animation.exit_ms())),
            _ => None,
        }
    }

    fn complete_if_instant(&mut self, now_ms: u64) {
        if self.phase_duration_ms() == Some(0) {
            self.complete_if_elapsed(now_ms);
        }
    }

    fn complete_if_elapsed(&mut self, now_ms: u64) {
        let Some(duration) = self.phase_duration_ms() else {
            return;
        };
        if duration > 0 {
            let started = *self.phase_started_ms.get_or_insert(now_ms);
            if now_ms.saturating_sub(started) < duration {
                return;
            }
        }

        if self.transition(overlay_events::ANIMATION_COMPLETE) {
            let notice = if self.state.is_open() {
                OverlayNotice::Shown
            } else {
                OverlayNotice::Hidden
            };
            tracing::debug!("OverlayPresenter - {:?} at {}ms", notice, now_ms);
            self.notices.push(notice);
        }
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }
}

impl Default for OverlayPresenter {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}

impl Drop for OverlayPresenter {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for OverlayPresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayPresenter")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("attached", &self.subscription.is_some())
            .field("keyboard_visible", &self.keyboard_visible())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picklist_platform::SoftKeyboard;

    #[test]
    fn test_instant_present_and_dismiss() {
        let mut overlay = OverlayPresenter::default();
        assert!(overlay.present(10));
        assert_eq!(overlay.state(), OverlayState::Open);
        assert_eq!(overlay.take_notices().as_slice(), &[OverlayNotice::Shown]);

        assert!(overlay.dismiss(20));
        assert_eq!(overlay.state(), OverlayState::Closed);
        assert_eq!(overlay.take_notices().as_slice(), &[OverlayNotice::Hidden]);
        assert!(overlay.take_dirty());
        assert!(!overlay.take_dirty());
    }

    #[test]
    fn test_animated_present_completes_on_update() {
        let mut overlay = OverlayPresenter::new(OverlayConfig::dropdown().animation(AnimationType::Slide));
        overlay.present(0);
        assert_eq!(overlay.state(), OverlayState::Opening);
        assert_eq!(overlay.animation_progress(150), Some((0.0, true)));

        overlay.update(0);
        assert_eq!(overlay.animation_progress(150), Some((0.5, true)));

        overlay.update(299);
        assert_eq!(overlay.state(), OverlayState::Opening);
        overlay.update(300);
        assert_eq!(overlay.state(), OverlayState::Open);
        assert_eq!(overlay.animation_progress(400), None);
    }

    #[test]
    fn test_close_interrupts_opening() {
        let mut overlay = OverlayPresenter::new(OverlayConfig::dropdown().animation(AnimationType::Fade));
        overlay.present(0);
        overlay.update(0);
        overlay.sync(false, 50);
        assert_eq!(overlay.state(), OverlayState::Closing);

        overlay.update(50);
        overlay.update(200);
        assert_eq!(overlay.state(), OverlayState::Closed);
        assert_eq!(overlay.take_notices().as_slice(), &[OverlayNotice::Hidden]);
    }

    #[test]
    fn test_present_during_closing_reopens() {
        let mut overlay = OverlayPresenter::new(OverlayConfig::dropdown().animation(AnimationType::Fade));
        overlay.present(0);
        overlay.update(0);
        overlay.update(200);
        overlay.dismiss(300);
        overlay.update(300);
        assert_eq!(overlay.state(), OverlayState::Closing);

        overlay.sync(true, 350);
        assert_eq!(overlay.state(), OverlayState::Opening);
        overlay.update(350);
        overlay.update(550);
        assert_eq!(overlay.state(), OverlayState::Open);
    }

    #[test]
    fn test_transition_starts_on_first_update() {
        let mut overlay = OverlayPresenter::new(OverlayConfig::dropdown().animation(AnimationType::Fade));
        // Requested with a timestamp far behind the next frame
        overlay.present(0);
        overlay.update(5000);
        assert_eq!(overlay.state(), OverlayState::Opening);
        assert_eq!(overlay.animation_progress(5100), Some((0.5, true)));

        overlay.update(5199);
        assert_eq!(overlay.state(), OverlayState::Opening);
        overlay.update(5200);
        assert_eq!(overlay.state(), OverlayState::Open);
        assert_eq!(overlay.take_notices().as_slice(), &[OverlayNotice::Shown]);
    }

    #[test]
    fn test_sync_is_idempotent() {
        let mut overlay = OverlayPresenter::default();
        overlay.sync(true, 0);
        overlay.take_notices();
        overlay.sync(true, 10);
        assert!(overlay.take_notices().is_empty());
        assert_eq!(overlay.state(), OverlayState::Open);
    }

    #[test]
    fn test_dismiss_signals() {
        let mut overlay = OverlayPresenter::default();
        assert_eq!(overlay.handle_backdrop_tap(), None);

        overlay.present(0);
        assert_eq!(overlay.handle_backdrop_tap(), Some(DismissReason::OutsideTap));
        assert_eq!(overlay.handle_back(), Some(DismissReason::HardwareBack));
        // Signals never close the overlay on their own
        assert!(overlay.state().is_open());

        let persistent = {
            let mut o = OverlayPresenter::new(OverlayConfig::dropdown().backdrop(BackdropConfig::persistent()));
            o.present(0);
            o
        };
        assert_eq!(persistent.handle_backdrop_tap(), None);
    }

    #[test]
    fn test_scrim_only_while_visible() {
        let mut overlay = OverlayPresenter::new(OverlayConfig::search());
        assert_eq!(overlay.scrim(), None);
        overlay.present(0);
        assert_eq!(overlay.scrim(), Some(Color::rgba(0.0, 0.0, 0.0, 0.5)));
    }

    #[test]
    fn test_keyboard_tracking_and_teardown() {
        let keyboard = SoftKeyboard::shared();
        let mut overlay = OverlayPresenter::default();
        assert!(overlay.attach(keyboard.clone()));
        assert!(!overlay.attach(keyboard.clone()));
        assert_eq!(keyboard.listener_count(), 1);

        keyboard.emit(KeyboardEvent::DidShow);
        assert!(overlay.keyboard_visible());

        overlay.present(0);
        assert!(overlay.teardown());
        assert_eq!(overlay.state(), OverlayState::Closed);
        assert_eq!(keyboard.listener_count(), 0);
        assert_eq!(keyboard.dismiss_requests(), 1);
        assert!(!keyboard.is_visible());

        // Second teardown releases nothing
        assert!(!overlay.teardown());
        assert_eq!(keyboard.dismiss_requests(), 1);
    }

    #[test]
    fn test_teardown_with_hidden_keyboard() {
        let keyboard = SoftKeyboard::shared();
        let mut overlay = OverlayPresenter::default();
        overlay.attach(keyboard.clone());
        keyboard.emit(KeyboardEvent::DidShow);
        keyboard.emit(KeyboardEvent::DidHide);

        assert!(overlay.teardown());
        assert_eq!(keyboard.dismiss_requests(), 0);
    }

    #[test]
    fn test_noted_keyboard_is_dismissed_on_teardown() {
        let keyboard = SoftKeyboard::shared();
        let mut overlay = OverlayPresenter::default();
        overlay.attach(keyboard.clone());

        // Host reports the keyboard without the source emitting
        assert!(overlay.note_keyboard(KeyboardEvent::DidShow));
        assert!(!overlay.note_keyboard(KeyboardEvent::DidShow));
        assert!(overlay.keyboard_visible());

        assert!(overlay.teardown());
        assert_eq!(keyboard.dismiss_requests(), 1);
        assert!(!overlay.keyboard_visible());
    }

    #[test]
    fn test_note_keyboard_hide() {
        let overlay = OverlayPresenter::default();
        overlay.note_keyboard(KeyboardEvent::DidShow);
        assert!(overlay.note_keyboard(KeyboardEvent::DidHide));
        assert!(!overlay.keyboard_visible());
    }

    #[test]
    fn test_drop_releases_listener() {
        let keyboard = SoftKeyboard::shared();
        {
            let mut overlay = OverlayPresenter::default();
            overlay.attach(keyboard.clone());
            assert_eq!(keyboard.listener_count(), 1);
        }
        assert_eq!(keyboard.listener_count(), 0);
    }
}
