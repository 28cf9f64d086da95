//! Frame-sampled key-bind detection.
//!
//! This crate turns a per-iteration snapshot of "keys currently down" into
//! clean press, hold, and release events for a set of named binds:
//!
//! - **Binds**: single keys or chords, matched either as a set or as an
//!   ordered contiguous run, optionally requiring that no other key is down
//! - **Decay**: a small per-bind counter that debounces the sampled signal so
//!   a single noisy iteration does not toggle a bind
//! - **Edges**: a bind fires its callback on the press edge or on the release
//!   edge, at most once per press
//! - **Queries**: `clicked`, `pressing`, and `released` by label, valid until
//!   the next update
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//!
//! use keychord::{BindRegistry, BindSpec, RegistryConfig};
//!
//! const KEY_CTRL: i32 = 17;
//! const KEY_S: i32 = 31;
//!
//! let saved = Arc::new(AtomicBool::new(false));
//! let flag = saved.clone();
//!
//! let mut registry = BindRegistry::from_binds_with_config(
//!     [BindSpec::new("save", [KEY_CTRL, KEY_S])
//!         .with_callback(move || flag.store(true, Ordering::SeqCst))],
//!     RegistryConfig::new().tick_guard(false),
//! )?;
//!
//! // Host loop: one snapshot per iteration.
//! for _ in 0..keychord::settings::call_decay_threshold() {
//!     registry.update(&[KEY_S, KEY_CTRL]);
//! }
//! assert!(saved.load(Ordering::SeqCst));
//! assert!(registry.pressing("save")?);
//! # Ok::<(), keychord::KeyBindError>(())
//! ```
//!
//! The registry is not thread-safe in the sense of concurrent updates: keep it
//! on the thread that runs the input loop.

pub mod bind;
mod error;
pub mod logging;
pub mod matcher;
mod registry;
pub mod settings;
pub mod state;

pub use bind::{BindCallback, BindSpec, KeyCode, TriggerEdge};
pub use error::{KeyBindError, Result};
pub use logging::{DebugFormatOptions, RegistryDebug};
pub use registry::BindRegistry;
pub use settings::{
    DEFAULT_CALL_DECAY, RegistryConfig, call_decay_threshold, set_call_decay_threshold,
};
pub use state::{BindState, MatchOutcome};
