//! The bind registry.
//!
//! [`BindRegistry`] owns the registered binds and their runtime state. The host
//! loop samples every key that is currently down and hands the snapshot to
//! [`BindRegistry::update`] once per iteration. Callbacks fire synchronously
//! inside `update`; for the rest of the iteration the host can poll
//! [`clicked`](BindRegistry::clicked), [`pressing`](BindRegistry::pressing)
//! and [`released`](BindRegistry::released) by label.
//!
//! # Example
//!
//! ```
//! use keychord::{BindRegistry, BindSpec, RegistryConfig};
//!
//! let mut registry = BindRegistry::from_binds_with_config(
//!     [BindSpec::new("jump", [32])],
//!     RegistryConfig::new().decay_threshold(2).tick_guard(false),
//! )
//! .unwrap();
//!
//! registry.update(&[32]);
//! assert!(!registry.clicked("jump").unwrap());
//! registry.update(&[32]);
//! assert!(registry.clicked("jump").unwrap());
//! assert!(registry.pressing("jump").unwrap());
//! ```

use std::collections::HashMap;
use std::time::Instant;

use crate::bind::{BindSpec, KeyCode};
use crate::error::{KeyBindError, Result};
use crate::logging::{span_names, targets};
use crate::matcher;
use crate::settings::RegistryConfig;
use crate::state::{BindState, MatchOutcome};

/// A bind and its runtime state.
#[derive(Debug, Clone)]
struct BindEntry {
    spec: BindSpec,
    state: BindState,
}

impl BindEntry {
    fn new(spec: BindSpec) -> Self {
        let state = BindState::new(spec.trigger_edge());
        Self { spec, state }
    }

    /// Decide whether this bind's combination is present in `pressed`.
    fn evaluate(&self, pressed: &[KeyCode]) -> Result<MatchOutcome> {
        let keys = self.spec.keys();
        let size_ok = keys.len() <= pressed.len()
            && (!self.spec.is_exact_arity() || keys.len() == pressed.len());
        if !size_ok {
            return Ok(MatchOutcome::Unmatched);
        }

        let found = matcher::find_sequence(keys, pressed, self.spec.is_order_sensitive())?;
        Ok(if found {
            MatchOutcome::Matched
        } else {
            MatchOutcome::Unmatched
        })
    }
}

/// Registered key-binds plus the per-bind state machine.
///
/// Binds keep their registration order for the lifetime of the registry and
/// `update` visits them in that order.
#[derive(Debug, Clone, Default)]
pub struct BindRegistry {
    entries: Vec<BindEntry>,
    index: HashMap<String, usize>,
    config: RegistryConfig,
    last_update: Option<Instant>,
}

static_assertions::assert_impl_all!(BindRegistry: Send, Sync);

impl BindRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with a custom configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create a registry holding a single bind.
    pub fn with_bind(spec: BindSpec) -> Self {
        let mut registry = Self::new();
        registry.push(spec);
        registry
    }

    /// Create a registry from a list of binds.
    ///
    /// Fails if two binds share a label.
    pub fn from_binds<I>(binds: I) -> Result<Self>
    where
        I: IntoIterator<Item = BindSpec>,
    {
        Self::from_binds_with_config(binds, RegistryConfig::default())
    }

    /// Create a registry from a list of binds with a custom configuration.
    pub fn from_binds_with_config<I>(binds: I, config: RegistryConfig) -> Result<Self>
    where
        I: IntoIterator<Item = BindSpec>,
    {
        let mut registry = Self::with_config(config);
        for spec in binds {
            registry.add(spec)?;
        }
        Ok(registry)
    }

    /// Register another bind after construction.
    pub fn add(&mut self, spec: BindSpec) -> Result<()> {
        if self.index.contains_key(spec.label()) {
            return Err(KeyBindError::duplicate_label(spec.label()));
        }
        self.push(spec);
        Ok(())
    }

    fn push(&mut self, spec: BindSpec) {
        tracing::debug!(target: targets::REGISTRY, bind = %spec, "registered bind");
        self.index.insert(spec.label().to_owned(), self.entries.len());
        self.entries.push(BindEntry::new(spec));
    }

    /// The registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The decay threshold in effect for the next update.
    pub fn decay_threshold(&self) -> usize {
        self.config.effective_threshold()
    }

    /// Number of registered binds, disabled ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no binds are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if a bind is registered under `label`.
    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Iterate over binds and their state in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&BindSpec, &BindState)> {
        self.entries.iter().map(|entry| (&entry.spec, &entry.state))
    }

    /// Feed this iteration's pressed keys.
    ///
    /// `pressed` must be the full set of keys that are down right now, not a
    /// delta. Callbacks of binds that fire run before this returns.
    pub fn update(&mut self, pressed: &[KeyCode]) {
        self.update_at(pressed, Instant::now());
    }

    /// Like [`update`](Self::update), with the caller supplying the clock.
    ///
    /// When the tick guard is on, a call carrying the same instant as the
    /// previous one is ignored.
    pub fn update_at(&mut self, pressed: &[KeyCode], now: Instant) {
        if self.config.tick_guard && self.last_update == Some(now) {
            crate::keychord_trace!("update skipped: same tick as previous");
            return;
        }

        let threshold = self.config.effective_threshold();
        let _span = tracing::trace_span!(
            target: targets::REGISTRY,
            "update",
            operation = span_names::UPDATE,
            pressed = pressed.len(),
            threshold
        )
        .entered();

        for entry in &mut self.entries {
            if !entry.spec.is_enabled() {
                continue;
            }

            let outcome = entry.evaluate(pressed).unwrap_or_else(|err| {
                crate::keychord_warn!(
                    label = entry.spec.label(),
                    error = %err,
                    "match failed; bind left unchanged this update"
                );
                MatchOutcome::Skipped
            });

            let edge = entry.spec.trigger_edge();
            if entry.state.advance(edge, outcome, threshold) {
                tracing::trace!(target: targets::REGISTRY, label = entry.spec.label(), %edge, "bind fired");
                entry.spec.invoke();
            }
            if entry.state.just_released() {
                tracing::trace!(target: targets::REGISTRY, label = entry.spec.label(), "bind released");
            }
        }

        self.last_update = Some(now);
    }

    /// Replace a bind's keys. An empty list disables the bind.
    ///
    /// The bind's state is reset so its state machine restarts cleanly.
    pub fn edit(&mut self, label: &str, keys: impl Into<Vec<KeyCode>>) -> Result<()> {
        let idx = self.position(label)?;
        let entry = &mut self.entries[idx];
        entry.spec.set_keys(keys.into());
        entry.state.reset(entry.spec.trigger_edge());
        tracing::debug!(target: targets::REGISTRY, bind = %entry.spec, "edited bind");
        Ok(())
    }

    /// Like [`edit`](Self::edit), but returns `false` for an unknown label
    /// instead of failing.
    pub fn try_edit(&mut self, label: &str, keys: impl Into<Vec<KeyCode>>) -> bool {
        match self.edit(label, keys) {
            Ok(()) => true,
            Err(err) => {
                crate::keychord_debug!(error = %err, "edit skipped");
                false
            }
        }
    }

    /// The configuration of the bind registered under `label`.
    pub fn get(&self, label: &str) -> Result<&BindSpec> {
        self.entry(label).map(|entry| &entry.spec)
    }

    /// The runtime state of the bind registered under `label`.
    pub fn state(&self, label: &str) -> Result<&BindState> {
        self.entry(label).map(|entry| &entry.state)
    }

    /// Whether the bind fired during the last update.
    ///
    /// For a press-edge bind this is the initial press, for a release-edge
    /// bind the release. Holding the keys does not repeat it.
    pub fn clicked(&self, label: &str) -> Result<bool> {
        self.state(label).map(BindState::triggered)
    }

    /// Whether the bind is currently held, i.e. has fired and not yet reached
    /// the opposite boundary.
    pub fn pressing(&self, label: &str) -> Result<bool> {
        self.state(label).map(|state| !state.is_released())
    }

    /// Whether the bind reached its opposite boundary during the last update.
    pub fn released(&self, label: &str) -> Result<bool> {
        self.state(label).map(BindState::just_released)
    }

    fn position(&self, label: &str) -> Result<usize> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| KeyBindError::not_found(label))
    }

    fn entry(&self, label: &str) -> Result<&BindEntry> {
        self.position(label).map(|idx| &self.entries[idx])
    }
}

impl From<BindSpec> for BindRegistry {
    fn from(spec: BindSpec) -> Self {
        Self::with_bind(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::bind::TriggerEdge;

    fn config() -> RegistryConfig {
        RegistryConfig::new().decay_threshold(2).tick_guard(false)
    }

    fn counted(spec: BindSpec) -> (BindSpec, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let spec = spec.with_callback(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (spec, count)
    }

    #[test]
    fn test_registry_constructors() {
        assert!(BindRegistry::new().is_empty());

        let single = BindRegistry::with_bind(BindSpec::new("a", [1]));
        assert_eq!(single.len(), 1);
        assert!(single.contains("a"));

        let from: BindRegistry = BindSpec::new("b", [2]).into();
        assert!(from.contains("b"));

        let many =
            BindRegistry::from_binds([BindSpec::new("a", [1]), BindSpec::new("b", [2])]).unwrap();
        let labels: Vec<&str> = many.iter().map(|(spec, _)| spec.label()).collect();
        assert_eq!(labels, ["a", "b"]);
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let err = BindRegistry::from_binds([BindSpec::new("a", [1]), BindSpec::new("a", [2])])
            .unwrap_err();
        assert_eq!(err, KeyBindError::duplicate_label("a"));

        let mut registry = BindRegistry::with_bind(BindSpec::new("a", [1]));
        assert!(registry.add(BindSpec::new("a", [3])).is_err());
        assert!(registry.add(BindSpec::new("c", [3])).is_ok());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_initial_state_follows_edge() {
        let registry = BindRegistry::from_binds([
            BindSpec::new("press", [1]),
            BindSpec::new("release", [2]).on_release(),
        ])
        .unwrap();
        assert!(!registry.pressing("press").unwrap());
        assert!(registry.pressing("release").unwrap());
        assert!(!registry.clicked("press").unwrap());
        assert!(!registry.released("release").unwrap());
    }

    #[test]
    fn test_press_fires_once() {
        let (spec, count) = counted(BindSpec::new("jump", [65]));
        let mut registry = BindRegistry::from_binds_with_config([spec], config()).unwrap();

        registry.update(&[65]);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        registry.update(&[65]);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(registry.clicked("jump").unwrap());
        for _ in 0..5 {
            registry.update(&[65]);
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!registry.clicked("jump").unwrap());
        assert!(registry.pressing("jump").unwrap());
    }

    #[test]
    fn test_tick_guard_skips_same_instant() {
        let (spec, count) = counted(BindSpec::new("jump", [65]));
        let mut registry = BindRegistry::from_binds_with_config(
            [spec],
            RegistryConfig::new().decay_threshold(2),
        )
        .unwrap();

        let t0 = Instant::now();
        registry.update_at(&[65], t0);
        registry.update_at(&[65], t0);
        assert_eq!(registry.state("jump").unwrap().decay(), 1);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        registry.update_at(&[65], t0 + Duration::from_millis(16));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_disabled_bind_does_not_block_others() {
        let mut registry = BindRegistry::from_binds_with_config(
            [
                BindSpec::new("off", Vec::new()),
                BindSpec::new("b", [2]).exact_arity(false),
            ],
            config(),
        )
        .unwrap();
        registry.update(&[2, 7]);
        registry.update(&[2, 7]);
        assert!(registry.clicked("b").unwrap());
        assert_eq!(registry.state("off").unwrap().decay(), 0);
        assert!(!registry.clicked("off").unwrap());
    }

    #[test]
    fn test_edit_resets_state() {
        let mut registry = BindRegistry::from_binds_with_config(
            [BindSpec::new("jump", [65])],
            config(),
        )
        .unwrap();
        registry.update(&[65]);
        registry.update(&[65]);
        assert!(registry.clicked("jump").unwrap());

        registry.edit("jump", [66]).unwrap();
        let state = registry.state("jump").unwrap();
        assert_eq!(state.decay(), 0);
        assert!(state.is_released());
        assert!(!state.triggered());
        assert_eq!(registry.get("jump").unwrap().keys(), &[66]);
    }

    #[test]
    fn test_edit_unknown_label() {
        let mut registry = BindRegistry::with_bind(BindSpec::new("jump", [65]));
        let err = registry.edit("dash", [1]).unwrap_err();
        assert!(err.is_not_found());
        assert!(!registry.try_edit("dash", [1]));
        assert!(registry.try_edit("jump", [1]));
    }

    #[test]
    fn test_unknown_label_queries() {
        let registry = BindRegistry::new();
        assert!(registry.get("x").unwrap_err().is_not_found());
        assert!(registry.state("x").unwrap_err().is_not_found());
        assert!(registry.clicked("x").unwrap_err().is_not_found());
        assert!(registry.pressing("x").unwrap_err().is_not_found());
        assert!(registry.released("x").unwrap_err().is_not_found());
    }

    #[test]
    fn test_global_threshold_followed_without_override() {
        let registry = BindRegistry::new();
        assert_eq!(
            registry.decay_threshold(),
            crate::settings::call_decay_threshold()
        );
    }

    #[test]
    fn test_release_edge_registry() {
        let (spec, count) = counted(BindSpec::new("drop", [5]).edge(TriggerEdge::Release));
        let mut registry = BindRegistry::from_binds_with_config([spec], config()).unwrap();

        registry.update(&[5]);
        registry.update(&[5]);
        assert!(registry.released("drop").unwrap());
        registry.update(&[]);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        registry.update(&[]);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(registry.clicked("drop").unwrap());
    }
}
