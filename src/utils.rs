// src/utils.rs

/// ───────────────────────── logging gate ─────────────────────────
/// Enable step-by-step verifier tracing with: `--features verbose-logs`
#[cfg(feature = "verbose-logs")]
macro_rules! trace { ($($arg:tt)*) => { ::tracing::debug!($($arg)*); } }
#[cfg(not(feature = "verbose-logs"))]
macro_rules! trace { ($($arg:tt)*) => {}; }

pub(crate) use trace;
