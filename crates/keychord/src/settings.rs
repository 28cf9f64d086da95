//! Tunables for bind detection.
//!
//! The decay threshold is the number of consecutive updates a combination has
//! to be present (or absent) before a bind crosses an edge. It is a
//! process-wide setting shared by every [`BindRegistry`](crate::BindRegistry)
//! that does not pin its own value through [`RegistryConfig`].
//!
//! Changing the global threshold while registries are live takes effect on
//! their next update; decay counters above the new threshold are clamped down
//! at that point.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{KeyBindError, Result};

/// Default number of updates needed to cross an edge.
pub const DEFAULT_CALL_DECAY: usize = 2;

static CALL_DECAY_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_CALL_DECAY);

/// Current process-wide decay threshold.
pub fn call_decay_threshold() -> usize {
    CALL_DECAY_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the process-wide decay threshold.
///
/// A threshold of zero is rejected: no decay value could ever cross it.
pub fn set_call_decay_threshold(threshold: usize) -> Result<()> {
    if threshold == 0 {
        return Err(KeyBindError::invalid_argument(
            "call decay threshold must be at least 1",
        ));
    }
    let previous = CALL_DECAY_THRESHOLD.swap(threshold, Ordering::Relaxed);
    tracing::debug!(
        target: crate::logging::targets::SETTINGS,
        previous,
        threshold,
        "call decay threshold changed"
    );
    Ok(())
}

/// Per-registry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Threshold used instead of the global one. `None` follows the global.
    pub decay_threshold: Option<usize>,
    /// Skip updates that land on the same clock instant as the previous one.
    pub tick_guard: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            decay_threshold: None,
            tick_guard: true,
        }
    }
}

impl RegistryConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the decay threshold for this registry.
    ///
    /// Zero is treated like `None` and falls back to the global threshold.
    pub fn decay_threshold(mut self, threshold: usize) -> Self {
        self.decay_threshold = (threshold > 0).then_some(threshold);
        self
    }

    /// Enable or disable the same-instant update guard.
    pub fn tick_guard(mut self, enabled: bool) -> Self {
        self.tick_guard = enabled;
        self
    }

    /// The threshold in effect right now.
    pub fn effective_threshold(&self) -> usize {
        self.decay_threshold.unwrap_or_else(call_decay_threshold)
    }
}
