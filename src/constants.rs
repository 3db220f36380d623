//! Protocol and application constants
//!
//! Centralized constants to avoid duplication and ensure consistency.

// =============================================================================
// Streaming
// =============================================================================

/// Device base sampling frequency before the divisor is applied (Hz)
pub const BASE_SAMPLE_RATE_HZ: u16 = 400;

/// Set-data-streaming payload length when mask2 is off
pub const STREAM_CONFIG_LEN: usize = 9;

/// Set-data-streaming payload length when mask2 is present
pub const STREAM_CONFIG_LEN_EXTENDED: usize = 13;

/// Default divisor (400 Hz / 40 = 10 Hz)
pub const DEFAULT_DIVISOR: u16 = 40;

/// Default frames per packet
pub const DEFAULT_FRAME_COUNT: u16 = 1;

/// Default packet count (0 = stream until reconfigured)
pub const DEFAULT_PACKET_COUNT: u32 = 0;

// =============================================================================
// Locator
// =============================================================================

/// Read-locator response payload length
pub const LOCATOR_PAYLOAD_LEN: usize = 10;
