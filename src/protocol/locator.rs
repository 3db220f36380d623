//! Read-locator response payload
//!
//! Five big-endian signed 16-bit values: position X/Y (cm), velocity X/Y
//! (cm/s) and speed over ground (cm/s). Short payloads populate what they
//! can, like the streaming decoder.

use bytes::Buf;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::reading::Vector2;
use crate::constants::LOCATOR_PAYLOAD_LEN;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorReading {
    pub position: Vector2,
    pub velocity: Vector2,
    pub speed_over_ground: i16,
}

impl LocatorReading {
    pub fn decode(payload: &[u8]) -> Self {
        if payload.len() < LOCATOR_PAYLOAD_LEN {
            debug!("Short locator payload: {} bytes", payload.len());
        }

        let mut cursor = payload;
        let mut next = || {
            if cursor.remaining() >= 2 {
                cursor.get_i16()
            } else {
                0
            }
        };

        Self {
            position: Vector2::new(next(), next()),
            velocity: Vector2::new(next(), next()),
            speed_over_ground: next(),
        }
    }
}
