//! crates/logging/src/tracing_macros.rs
//! Internal diagnostics for configuration changes.
//!
//! With the `tracing` feature the macro emits a `debug` event on the
//! `finelog::config` target; without it the arguments are type-checked and
//! discarded.

/// Emit a configuration trace.
///
/// # Example
/// ```ignore
/// trace_config!("logger {:?}: attached handler {}", name, target);
/// ```
#[cfg(feature = "tracing")]
macro_rules! trace_config {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "finelog::config", $($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_config {
    ($($arg:tt)*) => {
        if false {
            let _ = ::std::format_args!($($arg)*);
        }
    };
}

pub(crate) use trace_config;
