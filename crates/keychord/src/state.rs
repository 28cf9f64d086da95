//! Per-bind runtime state and the decay state machine.
//!
//! Every update moves a bind's decay counter one step towards the threshold
//! when its combination is present, or one step towards zero when it is not.
//! A press-edge bind fires when the counter reaches the threshold, a
//! release-edge bind when it drops back to zero. After firing, a bind stays
//! latched until the counter reaches the opposite boundary.

use crate::bind::TriggerEdge;

/// What the matcher concluded for one bind in one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The combination is present.
    Matched,
    /// The combination is absent.
    Unmatched,
    /// Matching failed; the counter is left where it is.
    Skipped,
}

impl MatchOutcome {
    /// Step `decay` once. `None` means the step left the representable range
    /// (below zero, or past `usize::MAX`), which never equals a boundary.
    fn step(self, decay: usize) -> Option<usize> {
        match self {
            Self::Matched => decay.checked_add(1),
            Self::Unmatched => decay.checked_sub(1),
            Self::Skipped => Some(decay),
        }
    }

    fn step_saturating(self, decay: usize) -> usize {
        match self {
            Self::Matched => decay.saturating_add(1),
            Self::Unmatched => decay.saturating_sub(1),
            Self::Skipped => decay,
        }
    }
}

/// Mutable state kept for each bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindState {
    decay: usize,
    released: bool,
    just_released: bool,
    triggered: bool,
}

impl BindState {
    /// Fresh state for a bind firing on `edge`.
    ///
    /// `released` starts out equal to `edge == Press`.
    pub fn new(edge: TriggerEdge) -> Self {
        Self {
            decay: 0,
            released: edge.is_press(),
            just_released: false,
            triggered: false,
        }
    }

    /// Current decay counter.
    pub fn decay(&self) -> usize {
        self.decay
    }

    /// Whether the bind may fire again.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Whether the bind was released during the last update.
    pub fn just_released(&self) -> bool {
        self.just_released
    }

    /// Whether the bind fired during the last update.
    pub fn triggered(&self) -> bool {
        self.triggered
    }

    /// Restore the initial state.
    pub fn reset(&mut self, edge: TriggerEdge) {
        *self = Self::new(edge);
    }

    /// Advance by one update. Returns `true` when the bind fires.
    ///
    /// Boundary checks use the unclamped counter, so a bind resting at zero
    /// (or at the threshold) does not pulse again on every update.
    pub fn advance(&mut self, edge: TriggerEdge, outcome: MatchOutcome, threshold: usize) -> bool {
        let old = self.decay;
        let new = outcome.step(old);

        let fire = self.released
            && match edge {
                TriggerEdge::Release => new == Some(0) && old > 0,
                TriggerEdge::Press => new == Some(threshold) && old < threshold,
            };

        if fire {
            self.released = false;
        }
        self.triggered = fire;

        let at_opposite = match edge {
            TriggerEdge::Press => new == Some(0),
            TriggerEdge::Release => new == Some(threshold),
        };
        if at_opposite {
            self.released = true;
            self.just_released = true;
        } else {
            self.just_released = false;
        }

        self.decay = outcome.step_saturating(old).min(threshold);
        fire
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::MatchOutcome::{Matched, Skipped, Unmatched};

    #[test]
    fn test_initial_state() {
        let press = BindState::new(TriggerEdge::Press);
        assert_eq!(press.decay(), 0);
        assert!(press.is_released());
        assert!(!press.triggered());
        assert!(!press.just_released());

        let release = BindState::new(TriggerEdge::Release);
        assert!(!release.is_released());
    }

    #[test]
    fn test_press_fires_at_threshold() {
        let mut state = BindState::new(TriggerEdge::Press);
        assert!(!state.advance(TriggerEdge::Press, Matched, 2));
        assert_eq!(state.decay(), 1);
        assert!(state.advance(TriggerEdge::Press, Matched, 2));
        assert!(state.triggered());
        assert!(!state.is_released());
        assert_eq!(state.decay(), 2);

        // Holding does not fire again.
        assert!(!state.advance(TriggerEdge::Press, Matched, 2));
        assert!(!state.triggered());
        assert_eq!(state.decay(), 2);
    }

    #[test]
    fn test_press_rearms_at_zero() {
        let mut state = BindState::new(TriggerEdge::Press);
        state.advance(TriggerEdge::Press, Matched, 2);
        state.advance(TriggerEdge::Press, Matched, 2);

        state.advance(TriggerEdge::Press, Unmatched, 2);
        assert!(!state.is_released());
        assert!(!state.just_released());

        state.advance(TriggerEdge::Press, Unmatched, 2);
        assert!(state.is_released());
        assert!(state.just_released());

        // Resting at zero is not a new release.
        state.advance(TriggerEdge::Press, Unmatched, 2);
        assert!(state.is_released());
        assert!(!state.just_released());
        assert_eq!(state.decay(), 0);
    }

    #[test]
    fn test_release_edge_cycle() {
        let edge = TriggerEdge::Release;
        let mut state = BindState::new(edge);

        // Not armed until the combination has been held to the threshold.
        assert!(!state.advance(edge, Matched, 2));
        assert!(!state.advance(edge, Matched, 2));
        assert!(state.is_released());
        assert!(state.just_released());

        assert!(!state.advance(edge, Unmatched, 2));
        assert!(state.advance(edge, Unmatched, 2));
        assert!(state.triggered());
        assert!(!state.is_released());
        assert_eq!(state.decay(), 0);
    }

    #[test]
    fn test_skipped_keeps_decay() {
        let mut state = BindState::new(TriggerEdge::Press);
        state.advance(TriggerEdge::Press, Matched, 3);
        assert!(!state.advance(TriggerEdge::Press, Skipped, 3));
        assert_eq!(state.decay(), 1);
    }

    #[test]
    fn test_decay_clamped_after_threshold_shrinks() {
        let mut state = BindState::new(TriggerEdge::Press);
        for _ in 0..5 {
            state.advance(TriggerEdge::Press, Matched, 5);
        }
        assert_eq!(state.decay(), 5);
        state.advance(TriggerEdge::Press, Matched, 2);
        assert_eq!(state.decay(), 2);
    }

    #[test]
    fn test_huge_threshold_does_not_overflow() {
        let mut state = BindState::new(TriggerEdge::Press);
        assert!(!state.advance(TriggerEdge::Press, Matched, usize::MAX));
        assert_eq!(state.decay(), 1);
        state.advance(TriggerEdge::Press, Unmatched, usize::MAX);
        assert!(state.just_released());
        state.advance(TriggerEdge::Press, Unmatched, usize::MAX);
        assert_eq!(state.decay(), 0);
        assert!(!state.just_released());

        let edge = TriggerEdge::Release;
        let mut state = BindState::new(edge);
        state.advance(edge, Matched, usize::MAX);
        assert!(!state.triggered());
        assert_eq!(state.decay(), 1);
    }

    #[test]
    fn test_reset() {
        let mut state = BindState::new(TriggerEdge::Press);
        state.advance(TriggerEdge::Press, Matched, 1);
        assert!(state.triggered());
        state.reset(TriggerEdge::Press);
        assert_eq!(state, BindState::new(TriggerEdge::Press));
    }
}
