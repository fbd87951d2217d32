//! Keystroke guard for integer-only inputs.
//!
//! [`decide`] is the whole policy: editing and navigation keys and the
//! clipboard shortcuts pass, a single `0`–`9` passes, everything else has its
//! default action cancelled. The policy is stateless; the only resource is
//! the listener registration, which [`attach`] wraps in a handle that
//! unregisters on drop.
//!
//! Pasted text never goes through keydown and is not filtered here.

use serde::Serialize;

/// Keys that are never cancelled.
pub const ALWAYS_ALLOWED_KEYS: [&str; 6] = [
    "Backspace",
    "Enter",
    "Tab",
    "ArrowRight",
    "ArrowLeft",
    "Delete",
];

/// Keys allowed together with Ctrl (select all, copy, paste, cut).
pub const CTRL_SHORTCUT_KEYS: [&str; 4] = ["a", "c", "v", "x"];

/// A keydown as seen by the guard: the `KeyboardEvent.key` value and whether
/// Ctrl was held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStroke {
    pub key: String,
    pub ctrl: bool,
}

impl KeyStroke {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
        }
    }

    pub fn with_ctrl(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyDecision {
    /// Let the browser perform the default action.
    Allow,
    /// Call `preventDefault()`.
    Cancel,
}

impl KeyDecision {
    pub fn is_cancel(self) -> bool {
        self == Self::Cancel
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Cancel => "cancel",
        }
    }
}

fn is_digit_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_digit())
}

/// Decide whether a keystroke may reach an integer-only field.
///
/// ```
/// use range_picker::guard::{decide, KeyDecision, KeyStroke};
///
/// assert_eq!(decide(&KeyStroke::new("7")), KeyDecision::Allow);
/// assert_eq!(decide(&KeyStroke::new("e")), KeyDecision::Cancel);
/// assert_eq!(decide(&KeyStroke::with_ctrl("v")), KeyDecision::Allow);
/// ```
pub fn decide(stroke: &KeyStroke) -> KeyDecision {
    let key = stroke.key.as_str();
    if ALWAYS_ALLOWED_KEYS.contains(&key) || (stroke.ctrl && CTRL_SHORTCUT_KEYS.contains(&key)) {
        return KeyDecision::Allow;
    }
    if is_digit_key(key) {
        KeyDecision::Allow
    } else {
        KeyDecision::Cancel
    }
}

// ── Attachment ──────────────────────────────────────────────────────────────

/// Keydown handler signature registered on a [`KeydownTarget`].
pub type KeydownHandler = fn(&KeyStroke) -> KeyDecision;

/// An input surface that can dispatch keydown events to handlers.
pub trait KeydownTarget {
    /// Token identifying one registration.
    type Listener;

    fn add_keydown_listener(&mut self, handler: KeydownHandler) -> Self::Listener;

    fn remove_keydown_listener(&mut self, listener: Self::Listener);
}

/// A live guard registration. Dropping it removes the listener.
#[must_use = "the guard is detached as soon as the attachment is dropped"]
pub struct GuardAttachment<'a, T: KeydownTarget> {
    target: &'a mut T,
    listener: Option<T::Listener>,
}

/// Register the guard on `target` for the lifetime of the returned handle.
pub fn attach<T: KeydownTarget>(target: &mut T) -> GuardAttachment<'_, T> {
    let listener = target.add_keydown_listener(decide);
    tracing::debug!("numeric input guard attached");
    GuardAttachment {
        target,
        listener: Some(listener),
    }
}

impl<T: KeydownTarget> GuardAttachment<'_, T> {
    pub fn target(&self) -> &T {
        &*self.target
    }

    /// Remove the listener now instead of at end of scope.
    pub fn detach(self) {}
}

impl<T: KeydownTarget> Drop for GuardAttachment<'_, T> {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.take() {
            self.target.remove_keydown_listener(listener);
            tracing::debug!("numeric input guard detached");
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::rc::Rc;

    /// Input surface whose listener list is shared between clones.
    #[derive(Clone, Default)]
    struct FakeInput {
        listeners: Rc<RefCell<Vec<(usize, KeydownHandler)>>>,
        next_id: usize,
    }

    impl FakeInput {
        /// Dispatch a keydown; returns whether the default action survived.
        fn press(&self, stroke: KeyStroke) -> bool {
            self.listeners
                .borrow()
                .iter()
                .all(|(_, handler)| !handler(&stroke).is_cancel())
        }

        fn listener_count(&self) -> usize {
            self.listeners.borrow().len()
        }
    }

    impl KeydownTarget for FakeInput {
        type Listener = usize;

        fn add_keydown_listener(&mut self, handler: KeydownHandler) -> usize {
            self.next_id += 1;
            self.listeners.borrow_mut().push((self.next_id, handler));
            self.next_id
        }

        fn remove_keydown_listener(&mut self, listener: usize) {
            self.listeners.borrow_mut().retain(|(id, _)| *id != listener);
        }
    }

    // ── decide ──────────────────────────────────────────────────────────

    #[test]
    fn test_digits_allowed() {
        for digit in '0'..='9' {
            assert_eq!(decide(&KeyStroke::new(digit.to_string())), KeyDecision::Allow);
        }
    }

    #[test]
    fn test_editing_keys_allowed() {
        for key in ALWAYS_ALLOWED_KEYS {
            assert_eq!(decide(&KeyStroke::new(key)), KeyDecision::Allow);
            assert_eq!(decide(&KeyStroke::with_ctrl(key)), KeyDecision::Allow);
        }
    }

    #[test]
    fn test_ctrl_shortcuts_allowed() {
        for key in CTRL_SHORTCUT_KEYS {
            assert_eq!(decide(&KeyStroke::with_ctrl(key)), KeyDecision::Allow);
        }
    }

    #[test]
    fn test_shortcut_letters_without_ctrl_cancelled() {
        for key in CTRL_SHORTCUT_KEYS {
            assert_eq!(decide(&KeyStroke::new(key)), KeyDecision::Cancel);
        }
    }

    #[test]
    fn test_other_ctrl_combinations_cancelled() {
        assert_eq!(decide(&KeyStroke::with_ctrl("z")), KeyDecision::Cancel);
        assert_eq!(decide(&KeyStroke::with_ctrl("A")), KeyDecision::Cancel);
    }

    #[test]
    fn test_non_digit_printables_cancelled() {
        for key in ["a", "e", "E", "-", "+", ".", ",", " ", "٣", "½"] {
            assert_eq!(decide(&KeyStroke::new(key)), KeyDecision::Cancel, "key {key:?}");
        }
    }

    #[test]
    fn test_multi_char_keys_cancelled() {
        // Named keys outside the allow-list, and digit-bearing names like F1.
        for key in ["Home", "End", "Escape", "F1", "12"] {
            assert_eq!(decide(&KeyStroke::new(key)), KeyDecision::Cancel, "key {key:?}");
        }
    }

    // ── attach ──────────────────────────────────────────────────────────

    #[test]
    fn test_attached_guard_filters_keys() {
        let mut input = FakeInput::default();
        let guard = attach(&mut input);
        assert!(guard.target().press(KeyStroke::new("4")));
        assert!(!guard.target().press(KeyStroke::new("x")));
        assert_eq!(guard.target().listener_count(), 1);
    }

    #[test]
    fn test_drop_detaches() {
        let mut input = FakeInput::default();
        {
            let _guard = attach(&mut input);
        }
        assert_eq!(input.listener_count(), 0);
        assert!(input.press(KeyStroke::new("x")));
    }

    #[test]
    fn test_explicit_detach() {
        let mut input = FakeInput::default();
        attach(&mut input).detach();
        assert_eq!(input.listener_count(), 0);
    }

    #[test]
    fn test_detached_on_panic() {
        let input = FakeInput::default();
        let mut surface = input.clone();
        let result = catch_unwind(AssertUnwindSafe(|| {
            let guard = attach(&mut surface);
            assert_eq!(guard.target().listener_count(), 1);
            panic!("component torn down");
        }));
        assert!(result.is_err());
        assert_eq!(input.listener_count(), 0);
    }

    #[test]
    fn test_two_surfaces_are_independent() {
        let mut first = FakeInput::default();
        let mut second = FakeInput::default();
        let first_guard = attach(&mut first);
        {
            let _second_guard = attach(&mut second);
        }
        assert_eq!(second.listener_count(), 0);
        assert_eq!(first_guard.target().listener_count(), 1);
    }
}
