use crossterm::event::KeyEvent;

use crate::core::state::ui::InputState;

/// Engine interface that applies a sequence of key events to an input snapshot
/// and returns the resulting snapshot. The implementation should be deterministic
/// and free of external side effects so that it can be used from the pure update path.
pub trait InputEngine {
    /// Apply keys to the given snapshot and return the updated snapshot.
    fn apply_keys(&self, snapshot: &InputState, keys: &[KeyEvent]) -> InputState;
}

/// No-op engine used for tests or when no editing should occur.
pub struct NoopInputEngine;

impl InputEngine for NoopInputEngine {
    fn apply_keys(&self, snapshot: &InputState, _keys: &[KeyEvent]) -> InputState {
        snapshot.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn noop_engine_returns_same_snapshot() {
        let engine = NoopInputEngine;
        let snap = InputState::new("abc", 3);
        let out = engine.apply_keys(
            &snap,
            &[KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE)],
        );
        assert_eq!(out, snap);
    }
}
