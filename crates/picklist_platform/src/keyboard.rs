//! Software keyboard signals
//!
//! The host platform owns the software keyboard. Controls only need to know
//! whether it is shown and to ask for it to be dismissed, so the platform is
//! injected as a [`KeyboardSource`]. Listener registrations are returned as
//! [`KeyboardSubscription`] guards that release themselves exactly once.
//!
//! [`SoftKeyboard`] is an in-process source: platform glue forwards the
//! native show/hide notifications into it with [`SoftKeyboard::emit`], and
//! tests drive it directly.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::error::{PlatformError, Result};

/// Keyboard visibility notifications
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyboardEvent {
    /// The software keyboard finished showing
    DidShow,
    /// The software keyboard finished hiding
    DidHide,
}

/// Listener callback for keyboard notifications
pub type KeyboardCallback = Arc<dyn Fn(KeyboardEvent) + Send + Sync>;

/// Identifier of a registered keyboard listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Reconstruct an id from its raw value
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Source of software keyboard signals
pub trait KeyboardSource: Send + Sync {
    /// Register a listener for show/hide notifications
    fn add_listener(&self, callback: KeyboardCallback) -> ListenerId;

    /// Remove a listener registered with [`KeyboardSource::add_listener`]
    fn remove_listener(&self, id: ListenerId) -> Result<()>;

    /// Ask the platform to hide the software keyboard
    fn dismiss(&self);

    /// Whether the software keyboard is currently shown
    fn is_visible(&self) -> bool;
}

/// Subscribe `callback` and wrap the registration in a guard
pub fn subscribe(source: &Arc<dyn KeyboardSource>, callback: KeyboardCallback) -> KeyboardSubscription {
    let id = source.add_listener(callback);
    KeyboardSubscription {
        source: Arc::clone(source),
        id: Some(id),
    }
}

/// Guard for a keyboard listener registration
///
/// The listener is removed by [`KeyboardSubscription::release`] or, failing
/// that, on drop. Removal happens at most once.
pub struct KeyboardSubscription {
    source: Arc<dyn KeyboardSource>,
    id: Option<ListenerId>,
}

impl KeyboardSubscription {
    /// Remove the listener now
    ///
    /// Returns `false` if it was already released.
    pub fn release(&mut self) -> bool {
        let Some(id) = self.id.take() else {
            return false;
        };
        if let Err(err) = self.source.remove_listener(id) {
            tracing::warn!("KeyboardSubscription::release - {}", err);
        }
        true
    }

    /// Whether the listener is still registered through this guard
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    /// The registered listener id, if still active
    pub fn id(&self) -> Option<ListenerId> {
        self.id
    }
}

impl Drop for KeyboardSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for KeyboardSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyboardSubscription")
            .field("id", &self.id)
            .finish()
    }
}

// =============================================================================
// SoftKeyboard
// =============================================================================

struct SoftKeyboardInner {
    listeners: FxHashMap<u64, KeyboardCallback>,
    next_id: u64,
    visible: bool,
    dismiss_requests: usize,
}

/// In-process keyboard source fed by the host platform
pub struct SoftKeyboard {
    inner: Mutex<SoftKeyboardInner>,
}

impl SoftKeyboard {
    /// Create a hidden keyboard with no listeners
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SoftKeyboardInner {
                listeners: FxHashMap::default(),
                next_id: 1,
                visible: false,
                dismiss_requests: 0,
            }),
        }
    }

    /// Create a shared keyboard source
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Forward a platform notification to all listeners
    pub fn emit(&self, event: KeyboardEvent) {
        let callbacks: Vec<KeyboardCallback> = {
            let mut inner = self.inner.lock();
            inner.visible = matches!(event, KeyboardEvent::DidShow);
            inner.listeners.values().cloned().collect()
        };

        tracing::trace!("SoftKeyboard::emit - {:?} to {} listeners", event, callbacks.len());

        // Callbacks run without the lock held so they may query the source.
        for callback in callbacks {
            callback(event);
        }
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }

    /// Number of dismiss requests received
    pub fn dismiss_requests(&self) -> usize {
        self.inner.lock().dismiss_requests
    }
}

impl Default for SoftKeyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardSource for SoftKeyboard {
    fn add_listener(&self, callback: KeyboardCallback) -> ListenerId {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.insert(id, callback);
        ListenerId(id)
    }

    fn remove_listener(&self, id: ListenerId) -> Result<()> {
        self.inner
            .lock()
            .listeners
            .remove(&id.0)
            .map(|_| ())
            .ok_or(PlatformError::UnknownListener(id.0))
    }

    fn dismiss(&self) {
        let was_visible = {
            let mut inner = self.inner.lock();
            inner.dismiss_requests += 1;
            inner.visible
        };
        if was_visible {
            self.emit(KeyboardEvent::DidHide);
        }
    }

    fn is_visible(&self) -> bool {
        self.inner.lock().visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn source() -> (Arc<SoftKeyboard>, Arc<dyn KeyboardSource>) {
        let keyboard = SoftKeyboard::shared();
        let dyn_source: Arc<dyn KeyboardSource> = keyboard.clone();
        (keyboard, dyn_source)
    }

    #[test]
    fn test_emit_reaches_listeners() {
        let (keyboard, dyn_source) = source();
        let shows = Arc::new(AtomicUsize::new(0));
        let shows_cb = shows.clone();

        let _sub = subscribe(
            &dyn_source,
            Arc::new(move |event| {
                if event == KeyboardEvent::DidShow {
                    shows_cb.fetch_add(1, Ordering::SeqCst);
                }
            }),
        );

        keyboard.emit(KeyboardEvent::DidShow);
        assert_eq!(shows.load(Ordering::SeqCst), 1);
        assert!(keyboard.is_visible());
    }

    #[test]
    fn test_subscription_releases_once() {
        let (keyboard, dyn_source) = source();
        let mut sub = subscribe(&dyn_source, Arc::new(|_| {}));
        assert_eq!(keyboard.listener_count(), 1);

        assert!(sub.release());
        assert!(!sub.release());
        assert!(!sub.is_active());
        assert_eq!(keyboard.listener_count(), 0);
    }

    #[test]
    fn test_subscription_released_on_drop() {
        let (keyboard, dyn_source) = source();
        {
            let _sub = subscribe(&dyn_source, Arc::new(|_| {}));
            assert_eq!(keyboard.listener_count(), 1);
        }
        assert_eq!(keyboard.listener_count(), 0);
    }

    #[test]
    fn test_dismiss_hides_visible_keyboard() {
        let (keyboard, _) = source();
        keyboard.emit(KeyboardEvent::DidShow);
        keyboard.dismiss();
        assert!(!keyboard.is_visible());
        assert_eq!(keyboard.dismiss_requests(), 1);
    }

    #[test]
    fn test_remove_unknown_listener() {
        let keyboard = SoftKeyboard::new();
        assert_eq!(
            keyboard.remove_listener(ListenerId::from_raw(99)),
            Err(PlatformError::UnknownListener(99))
        );
    }
}
