//! Logging and debugging facilities for keychord.
//!
//! This module provides:
//! - Integration with the `tracing` crate for structured logging
//! - A tabular dump of a registry's binds and their runtime state
//!
//! # Tracing Integration
//!
//! keychord only emits events; it never installs a subscriber. To see logs,
//! install one in the host application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("keychord=trace")
//!         .init();
//!
//!     // Your input loop...
//! }
//! ```
//!
//! Per-update events are emitted at `trace` level under
//! [`targets::REGISTRY`], so they stay silent unless explicitly enabled.
//!
//! # Debug Visualization
//!
//! ```
//! use keychord::{BindRegistry, BindSpec, logging::RegistryDebug};
//!
//! let registry = BindRegistry::with_bind(BindSpec::new("jump", [32]));
//! let dump = RegistryDebug::new().format(&registry);
//! assert!(dump.contains("jump"));
//! ```

use std::fmt::{self, Write as FmtWrite};

use crate::registry::BindRegistry;

/// Span names used throughout keychord for tracing.
pub mod span_names {
    /// One call to `BindRegistry::update`.
    pub const UPDATE: &str = "keychord::update";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Crate-wide target, used by the `keychord_*!` macros.
    pub const CORE: &str = "keychord";
    /// Registry updates, firing, and edits.
    pub const REGISTRY: &str = "keychord::registry";
    /// Global settings changes.
    pub const SETTINGS: &str = "keychord::settings";
}

/// Configuration for registry debug output.
#[derive(Debug, Clone)]
pub struct DebugFormatOptions {
    /// Whether to show the key combination.
    pub show_keys: bool,
    /// Whether to show matching flags and edge.
    pub show_flags: bool,
    /// Whether to show the runtime state columns.
    pub show_state: bool,
    /// Whether to list disabled binds.
    pub show_disabled: bool,
}

impl Default for DebugFormatOptions {
    fn default() -> Self {
        Self {
            show_keys: true,
            show_flags: false,
            show_state: true,
            show_disabled: true,
        }
    }
}

impl DebugFormatOptions {
    /// Create options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_flags: true,
            ..Default::default()
        }
    }

    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_keys: false,
            show_flags: false,
            show_state: false,
            show_disabled: false,
        }
    }
}

/// Debug utility that renders a registry as one line per bind.
#[derive(Debug, Clone, Default)]
pub struct RegistryDebug {
    options: DebugFormatOptions,
}

impl RegistryDebug {
    /// Create a formatter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter with custom options.
    pub fn with_options(options: DebugFormatOptions) -> Self {
        Self { options }
    }

    /// Render the registry.
    pub fn format(&self, registry: &BindRegistry) -> String {
        let mut output = String::new();
        self.format_into(registry, &mut output)
            .expect("write to String");
        output
    }

    fn format_into(&self, registry: &BindRegistry, output: &mut String) -> fmt::Result {
        writeln!(
            output,
            "Bind Registry ({} binds, threshold {}):",
            registry.len(),
            registry.decay_threshold()
        )?;

        let mut shown = 0;
        for (spec, state) in registry.iter() {
            if !spec.is_enabled() && !self.options.show_disabled {
                continue;
            }
            shown += 1;

            write!(output, "  {}", spec.label())?;
            if !spec.is_enabled() {
                write!(output, " (disabled)")?;
            } else if self.options.show_keys {
                write!(output, " {:?}", spec.keys())?;
            }

            if self.options.show_flags {
                write!(
                    output,
                    " edge={} ordered={} exact={} callback={}",
                    spec.trigger_edge(),
                    spec.is_order_sensitive(),
                    spec.is_exact_arity(),
                    spec.callback().is_some()
                )?;
            }

            if self.options.show_state {
                write!(
                    output,
                    " decay={} released={} triggered={} just_released={}",
                    state.decay(),
                    state.is_released(),
                    state.triggered(),
                    state.just_released()
                )?;
            }

            output.push('\n');
        }

        if shown == 0 {
            writeln!(output, "  (empty)")?;
        }
        Ok(())
    }
}

/// Display adapter pairing a formatter with a registry.
pub struct RegistryDisplay<'a> {
    debug: &'a RegistryDebug,
    registry: &'a BindRegistry,
}

impl RegistryDebug {
    /// Borrow the registry for use with `{}` formatting.
    pub fn display<'a>(&'a self, registry: &'a BindRegistry) -> RegistryDisplay<'a> {
        RegistryDisplay {
            debug: self,
            registry,
        }
    }
}

impl fmt::Display for RegistryDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.debug.format(self.registry))
    }
}

/// Macros for common tracing patterns.
///
/// These are thin wrappers around the `tracing` macros with the crate target.
#[macro_export]
macro_rules! keychord_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}

#[macro_export]
macro_rules! keychord_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}

#[macro_export]
macro_rules! keychord_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: $crate::logging::targets::CORE, $($arg)*)
    };
}
