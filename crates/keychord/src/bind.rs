//! Static bind configuration.
//!
//! A [`BindSpec`] names a key or chord, how it is matched against the pressed
//! keys, which edge fires it, and what to call when it fires.
//!
//! ```
//! use keychord::{BindSpec, TriggerEdge};
//!
//! let save = BindSpec::new("save", [17, 31])
//!     .with_callback(|| println!("saving"))
//!     .exact_arity(false);
//! assert_eq!(save.keys(), &[17, 31]);
//! assert_eq!(save.trigger_edge(), TriggerEdge::Press);
//! ```

use std::fmt;
use std::sync::Arc;

/// A raw key code as reported by the host.
pub type KeyCode = i32;

/// Callback invoked when a bind fires.
pub type BindCallback = Arc<dyn Fn() + Send + Sync>;

/// The edge of the key signal on which a bind fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TriggerEdge {
    /// Fire when the combination has been held long enough (rising edge).
    #[default]
    Press,
    /// Fire when the combination has been let go long enough (falling edge).
    Release,
}

impl TriggerEdge {
    /// Returns `true` for [`TriggerEdge::Press`].
    pub fn is_press(self) -> bool {
        matches!(self, Self::Press)
    }
}

impl fmt::Display for TriggerEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Press => write!(f, "press"),
            Self::Release => write!(f, "release"),
        }
    }
}

/// Configuration for one registered bind.
#[derive(Clone)]
pub struct BindSpec {
    label: String,
    keys: Vec<KeyCode>,
    enabled: bool,
    callback: Option<BindCallback>,
    order_sensitive: bool,
    exact_arity: bool,
    edge: TriggerEdge,
}

impl BindSpec {
    /// Create a bind with no callback.
    ///
    /// Defaults: order-insensitive, exact arity, fires on press. An empty key
    /// list creates a disabled bind.
    pub fn new(label: impl Into<String>, keys: impl Into<Vec<KeyCode>>) -> Self {
        let keys = keys.into();
        Self {
            label: label.into(),
            enabled: !keys.is_empty(),
            keys,
            callback: None,
            order_sensitive: false,
            exact_arity: true,
            edge: TriggerEdge::Press,
        }
    }

    /// Set the function called when the bind fires.
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Require the keys to appear contiguously and in order.
    pub fn order_sensitive(mut self, order_sensitive: bool) -> Self {
        self.order_sensitive = order_sensitive;
        self
    }

    /// Require the pressed-key count to equal the bind's key count.
    pub fn exact_arity(mut self, exact_arity: bool) -> Self {
        self.exact_arity = exact_arity;
        self
    }

    /// Set the firing edge.
    pub fn edge(mut self, edge: TriggerEdge) -> Self {
        self.edge = edge;
        self
    }

    /// Fire on the rising edge.
    pub fn on_press(self) -> Self {
        self.edge(TriggerEdge::Press)
    }

    /// Fire on the falling edge.
    pub fn on_release(self) -> Self {
        self.edge(TriggerEdge::Release)
    }

    /// The bind's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The key combination. Empty while the bind is disabled.
    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }

    /// Whether `update` considers this bind at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The registered callback, if any.
    pub fn callback(&self) -> Option<&BindCallback> {
        self.callback.as_ref()
    }

    /// Whether matching is order sensitive.
    pub fn is_order_sensitive(&self) -> bool {
        self.order_sensitive
    }

    /// Whether the pressed-key count must equal the key count.
    pub fn is_exact_arity(&self) -> bool {
        self.exact_arity
    }

    /// The firing edge.
    pub fn trigger_edge(&self) -> TriggerEdge {
        self.edge
    }

    /// Replace the key combination. An empty list disables the bind.
    pub(crate) fn set_keys(&mut self, keys: Vec<KeyCode>) {
        self.enabled = !keys.is_empty();
        self.keys = keys;
    }

    /// Run the callback if one is set.
    pub(crate) fn invoke(&self) {
        if let Some(callback) = &self.callback {
            callback();
        }
    }
}

impl fmt::Debug for BindSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindSpec")
            .field("label", &self.label)
            .field("keys", &self.keys)
            .field("enabled", &self.enabled)
            .field("has_callback", &self.callback.is_some())
            .field("order_sensitive", &self.order_sensitive)
            .field("exact_arity", &self.exact_arity)
            .field("edge", &self.edge)
            .finish()
    }
}

impl fmt::Display for BindSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.enabled {
            return write!(f, "{} (disabled)", self.label);
        }
        let sep = if self.order_sensitive { ", " } else { "+" };
        let keys: Vec<String> = self.keys.iter().map(|k| k.to_string()).collect();
        write!(f, "{} [{}] on {}", self.label, keys.join(sep), self.edge)
    }
}
