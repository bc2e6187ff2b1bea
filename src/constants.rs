//! Application constants for the LazyDag TUI.
//!
//! Centralized UI dimensions, timing intervals, and defaults used across
//! the application.

use std::time::Duration;

// ============================================================================
// Timing
// ============================================================================

/// Target interval between main-loop ticks.
pub const TICK_RATE: Duration = Duration::from_millis(250);

/// Interval between analyzer-state polls.
pub const ANALYZER_STATE_INTERVAL: Duration = Duration::from_secs(10);

// ============================================================================
// UI Dimension Constants
// ============================================================================

/// Height of the application header area (in rows).
///
/// The header contains the title, the requested block number, and the
/// analyzer progress summary.
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the footer area (in rows).
///
/// The footer contains key hints and the last status message.
pub const FOOTER_HEIGHT: u16 = 3;

/// Maximum digits accepted in the block-number input popup.
pub const BLOCK_INPUT_MAX_LEN: usize = 12;

// ============================================================================
// Defaults
// ============================================================================

/// Analyzer API base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

/// Environment variable overriding the configured API base URL.
pub const API_URL_ENV: &str = "LAZYDAG_API_URL";
