//! Set-data-streaming command payload
//!
//! Layout (big-endian):
//!
//! | offset | size | field        |
//! |--------|------|--------------|
//! | 0      | 2    | divisor      |
//! | 2      | 2    | frame count  |
//! | 4      | 4    | mask1        |
//! | 8      | 1    | packet count |
//! | 9      | 4    | mask2 (only when non-zero) |
//!
//! Values are not range-checked here; the device is authoritative.

use super::field::SensorField;
use super::mask::SensorMaskSet;
use crate::constants::{
    BASE_SAMPLE_RATE_HZ, STREAM_CONFIG_LEN, STREAM_CONFIG_LEN_EXTENDED,
};
use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

/// Streaming configuration sent to the device
///
/// Immutable once built; the builder methods consume and return a new value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    divisor: u16,
    frame_count: u16,
    packet_count: u8,
    mask1: u32,
    mask2: u32,
}

impl StreamConfig {
    /// Configuration with both masks off (stops any running stream)
    pub const fn new(divisor: u16, frame_count: u16, packet_count: u8) -> Self {
        Self {
            divisor,
            frame_count,
            packet_count,
            mask1: 0,
            mask2: 0,
        }
    }

    /// Build from wide integers, keeping only the bits each wire field holds
    ///
    /// A packet count of 256 becomes 0 (unlimited), matching what the
    /// device would receive.
    pub const fn from_raw(
        divisor: u32,
        frame_count: u32,
        packet_count: u32,
        mask1: u32,
        mask2: u32,
    ) -> Self {
        Self {
            divisor: divisor as u16,
            frame_count: frame_count as u16,
            packet_count: packet_count as u8,
            mask1,
            mask2,
        }
    }

    /// OR additional bits into the primary mask
    pub const fn with_mask1(mut self, mask: u32) -> Self {
        self.mask1 |= mask;
        self
    }

    /// OR additional bits into the secondary mask
    pub const fn with_mask2(mut self, mask: u32) -> Self {
        self.mask2 |= mask;
        self
    }

    pub fn with_masks(self, masks: SensorMaskSet) -> Self {
        self.with_mask1(masks.mask1).with_mask2(masks.mask2)
    }

    pub fn with_sensor(self, field: SensorField) -> Self {
        self.with_masks(SensorMaskSet::OFF.with(field))
    }

    pub const fn divisor(&self) -> u16 {
        self.divisor
    }

    pub const fn frame_count(&self) -> u16 {
        self.frame_count
    }

    /// Packets to emit; 0 streams until reconfigured
    pub const fn packet_count(&self) -> u8 {
        self.packet_count
    }

    pub const fn mask1(&self) -> u32 {
        self.mask1
    }

    pub const fn mask2(&self) -> u32 {
        self.mask2
    }

    pub const fn masks(&self) -> SensorMaskSet {
        SensorMaskSet::new(self.mask1, self.mask2)
    }

    /// Effective sample rate, `None` when the divisor is zero
    pub fn sample_rate_hz(&self) -> Option<f64> {
        (self.divisor != 0).then(|| f64::from(BASE_SAMPLE_RATE_HZ) / f64::from(self.divisor))
    }

    /// Length of the encoded payload
    pub const fn encoded_len(&self) -> usize {
        if self.mask2 != 0 {
            STREAM_CONFIG_LEN_EXTENDED
        } else {
            STREAM_CONFIG_LEN
        }
    }

    /// Serialize into the device payload layout
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf.freeze()
    }

    /// Append the payload to an existing buffer
    pub fn encode_into<B: BufMut>(&self, out: &mut B) {
        out.put_u16(self.divisor);
        out.put_u16(self.frame_count);
        out.put_u32(self.mask1);
        out.put_u8(self.packet_count);
        if self.mask2 != 0 {
            out.put_u32(self.mask2);
        }
    }
}

/// Serialize a streaming configuration
pub fn encode(config: &StreamConfig) -> Bytes {
    config.encode()
}
