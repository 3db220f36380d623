//! Sensor data streaming payload decoder
//!
//! Walks the canonical field order once, consuming one big-endian signed
//! 16-bit slot per enabled field. A payload that runs out early leaves the
//! remaining fields at zero; decoding never fails.

use super::field::{SensorField, PRIMARY_ORDER, SECONDARY_ORDER};
use super::mask::SensorMaskSet;
use super::reading::SensorReading;
use bytes::Buf;
use serde::Serialize;
use tracing::debug;

/// Decoder bound to the masks of the configuration that produced the stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamPacketDecoder {
    masks: SensorMaskSet,
}

/// Reading plus diagnostics about how much of the payload was used
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeReport {
    pub reading: SensorReading,
    /// Bytes consumed from the payload
    pub consumed: usize,
    /// Bytes left over after every enabled field was read
    pub trailing: usize,
    /// Enabled fields the payload was too short to populate
    pub missing: Vec<SensorField>,
}

impl DecodeReport {
    /// Every enabled field was populated
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

impl StreamPacketDecoder {
    pub const fn new(masks: SensorMaskSet) -> Self {
        Self { masks }
    }

    pub const fn masks(&self) -> SensorMaskSet {
        self.masks
    }

    /// Decode one payload
    pub fn decode(&self, payload: &[u8]) -> SensorReading {
        self.decode_with_report(payload).reading
    }

    /// Decode a payload holding several back-to-back frames
    ///
    /// Each frame is `masks.payload_len()` bytes. A short last frame is
    /// decoded like any short payload. Masks without a known field give a
    /// single frame.
    pub fn decode_frames(&self, payload: &[u8]) -> Vec<SensorReading> {
        self.decode_frames_with_report(payload)
            .into_iter()
            .map(|report| report.reading)
            .collect()
    }

    /// [`decode_frames`](Self::decode_frames) with per-frame diagnostics
    pub fn decode_frames_with_report(&self, payload: &[u8]) -> Vec<DecodeReport> {
        let frame_len = self.masks.payload_len();
        if frame_len == 0 || payload.len() <= frame_len {
            return vec![self.decode_with_report(payload)];
        }

        payload
            .chunks(frame_len)
            .map(|frame| self.decode_with_report(frame))
            .collect()
    }

    /// Decode one payload and report unpopulated fields
    pub fn decode_with_report(&self, payload: &[u8]) -> DecodeReport {
        let mut reading = SensorReading::new(self.masks);
        let mut missing = Vec::new();
        let mut cursor = payload;

        let primary = PRIMARY_ORDER
            .iter()
            .filter(|f| self.masks.mask1 & f.bit() != 0);
        let secondary = SECONDARY_ORDER
            .iter()
            .filter(|f| self.masks.mask2 & f.bit() != 0);

        for &field in primary.chain(secondary) {
            if cursor.remaining() < 2 {
                missing.push(field);
                continue;
            }
            // First byte carries the sign, second is the unsigned low byte
            reading.set(field, cursor.get_i16());
        }

        let trailing = cursor.remaining();
        let consumed = payload.len() - trailing;

        if !missing.is_empty() {
            debug!(
                "Short streaming payload: {} bytes, {} field(s) not populated",
                payload.len(),
                missing.len()
            );
        }

        DecodeReport {
            reading,
            consumed,
            trailing,
            missing,
        }
    }
}

/// Decode a streaming payload produced under `mask1` / `mask2`
pub fn decode(mask1: u32, mask2: u32, payload: &[u8]) -> SensorReading {
    StreamPacketDecoder::new(SensorMaskSet::new(mask1, mask2)).decode(payload)
}

/// [`decode`] with diagnostics
pub fn decode_with_report(mask1: u32, mask2: u32, payload: &[u8]) -> DecodeReport {
    StreamPacketDecoder::new(SensorMaskSet::new(mask1, mask2)).decode_with_report(payload)
}

/// Decode every frame of a payload streamed with a frame count above one
pub fn decode_frames(mask1: u32, mask2: u32, payload: &[u8]) -> Vec<SensorReading> {
    StreamPacketDecoder::new(SensorMaskSet::new(mask1, mask2)).decode_frames(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::mask::{mask1, mask2};
    use crate::protocol::reading::{Quaternion, Vector2, Vector3};

    // =========================================================================
    // Single field extraction
    // =========================================================================

    #[test]
    fn test_single_field() {
        let reading = decode(mask1::ACCELEROMETER_X_RAW, 0, &[0x01, 0x2C]);

        assert_eq!(reading.accelerometer_raw.x, 300);
        assert_eq!(
            reading,
            SensorReading {
                mask1: mask1::ACCELEROMETER_X_RAW,
                accelerometer_raw: Vector3::new(300, 0, 0),
                ..SensorReading::default()
            }
        );
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(decode(mask1::GYRO_Z_RAW, 0, &[0xFF, 0x00]).gyro_raw.z, -256);
        assert_eq!(decode(mask1::GYRO_Z_RAW, 0, &[0xFF, 0xFF]).gyro_raw.z, -1);
        assert_eq!(decode(mask1::GYRO_Z_RAW, 0, &[0x80, 0x00]).gyro_raw.z, i16::MIN);
    }

    #[test]
    fn test_low_byte_is_unsigned() {
        // 0x00FF must be 255, not -1
        assert_eq!(decode(mask1::PWM_LEFT_RAW, 0, &[0x00, 0xFF]).pwm_raw.x, 255);
        assert_eq!(decode(mask1::PWM_LEFT_RAW, 0, &[0x01, 0x80]).pwm_raw.x, 384);
        assert_eq!(decode(mask1::PWM_LEFT_RAW, 0, &[0xFE, 0x80]).pwm_raw.x, -384);
    }

    // =========================================================================
    // Field order
    // =========================================================================

    #[test]
    fn test_two_fields_in_payload_order() {
        let masks = mask1::ACCELEROMETER_X_RAW | mask1::ACCELEROMETER_Y_RAW;
        let reading = decode(masks, 0, &[0x00, 0x0A, 0x00, 0x14]);

        assert_eq!(reading.accelerometer_raw.x, 10);
        assert_eq!(reading.accelerometer_raw.y, 20);
    }

    #[test]
    fn test_imu_order_is_pitch_roll_yaw() {
        // Yaw has the highest bit of the three but comes last
        let reading = decode(mask1::IMU_ALL_FILTERED, 0, &[0, 1, 0, 2, 0, 3]);
        assert_eq!(reading.imu_filtered, Vector3::new(1, 2, 3));
    }

    #[test]
    fn test_motor_emf_right_before_left() {
        let reading = decode(mask1::MOTOR_EMF_ALL_RAW, 0, &[0, 7, 0, 9]);
        assert_eq!(reading.motor_emf_raw, Vector2::new(7, 9));
    }

    #[test]
    fn test_secondary_follows_primary() {
        let reading = decode(
            mask1::GYRO_X_FILTERED,
            mask2::QUATERNION_Q1 | mask2::VELOCITY_Y,
            &[0x00, 0x01, 0x00, 0x02, 0xFF, 0xFE],
        );

        assert_eq!(reading.gyro_filtered.x, 1);
        assert_eq!(reading.quaternion.q1, 2);
        assert_eq!(reading.velocity.y, -2);
    }

    #[test]
    fn test_full_payload() {
        let masks = SensorMaskSet::ALL;
        let payload: Vec<u8> = (1..=30i16).flat_map(|v| v.to_be_bytes()).collect();

        let reading = StreamPacketDecoder::new(masks).decode(&payload);

        assert_eq!(reading.accelerometer_raw, Vector3::new(1, 2, 3));
        assert_eq!(reading.gyro_raw, Vector3::new(4, 5, 6));
        assert_eq!(reading.motor_emf_raw, Vector2::new(7, 8));
        assert_eq!(reading.pwm_raw, Vector2::new(9, 10));
        assert_eq!(reading.imu_filtered, Vector3::new(11, 12, 13));
        assert_eq!(reading.accelerometer_filtered, Vector3::new(14, 15, 16));
        assert_eq!(reading.gyro_filtered, Vector3::new(17, 18, 19));
        assert_eq!(reading.motor_emf_filtered, Vector2::new(20, 21));
        assert_eq!(
            reading.quaternion,
            Quaternion {
                q0: 22,
                q1: 23,
                q2: 24,
                q3: 25
            }
        );
        assert_eq!(reading.odometer, Vector2::new(26, 27));
        assert_eq!(reading.accel_one, 28);
        assert_eq!(reading.velocity, Vector2::new(29, 30));
    }

    // =========================================================================
    // Short and oversized payloads
    // =========================================================================

    #[test]
    fn test_one_byte_payload_leaves_field_zero() {
        let report = decode_with_report(mask1::ACCELEROMETER_X_RAW, 0, &[0x01]);

        assert_eq!(report.reading.accelerometer_raw.x, 0);
        assert_eq!(report.consumed, 0);
        assert_eq!(report.trailing, 1);
        assert_eq!(report.missing, vec![SensorField::AccelerometerXRaw]);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_partial_payload() {
        let report = decode_with_report(
            mask1::ACCELEROMETER_ALL_RAW,
            mask2::ACCEL_ONE,
            &[0x00, 0x05, 0x00, 0x06, 0x00],
        );

        assert_eq!(report.reading.accelerometer_raw, Vector3::new(5, 6, 0));
        assert_eq!(report.reading.accel_one, 0);
        assert_eq!(report.consumed, 4);
        assert_eq!(
            report.missing,
            vec![SensorField::AccelerometerZRaw, SensorField::AccelOne]
        );
    }

    #[test]
    fn test_trailing_bytes_are_ignored() {
        let report = decode_with_report(mask1::GYRO_Y_RAW, 0, &[0x00, 0x10, 0xAA, 0xBB, 0xCC]);

        assert_eq!(report.reading.gyro_raw.y, 16);
        assert_eq!(report.consumed, 2);
        assert_eq!(report.trailing, 3);
        assert!(report.is_complete());
    }

    #[test]
    fn test_masks_off() {
        let reading = decode(0, 0, &[0x12, 0x34, 0x56, 0x78]);
        assert_eq!(reading, SensorReading::default());
        assert_eq!(reading.mask1, 0);
        assert_eq!(reading.mask2, 0);
    }

    #[test]
    fn test_empty_payload() {
        let reading = decode(mask1::ALL, mask2::ALL, &[]);
        assert_eq!(reading, SensorReading::new(SensorMaskSet::ALL));
    }

    #[test]
    fn test_unknown_bits_consume_nothing() {
        let reading = decode(
            mask1::ACCELEROMETER_X_RAW | 0x0000_0001,
            0x0000_0001,
            &[0x00, 0x2A],
        );
        assert_eq!(reading.accelerometer_raw.x, 42);
        assert_eq!(reading.mask1, 0x8000_0001);
        assert_eq!(reading.mask2, 0x0000_0001);
    }

    // =========================================================================
    // Multi-frame payloads
    // =========================================================================

    #[test]
    fn test_decode_frames_splits_by_frame_length() {
        let masks = mask1::ACCELEROMETER_X_RAW | mask1::ACCELEROMETER_Y_RAW;
        let payload = [0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04, 0xFF, 0xFF];

        let readings = decode_frames(masks, 0, &payload);

        assert_eq!(readings.len(), 3);
        assert_eq!(readings[0].accelerometer_raw, Vector3::new(1, 2, 0));
        assert_eq!(readings[1].accelerometer_raw, Vector3::new(3, 4, 0));
        assert_eq!(readings[2].accelerometer_raw, Vector3::new(-1, 0, 0));
    }

    #[test]
    fn test_decode_frames_reports_short_last_frame() {
        let decoder = StreamPacketDecoder::new(SensorMaskSet::new(mask1::GYRO_ALL_RAW, 0));
        let payload = [0, 1, 0, 2, 0, 3, 0, 4];

        let reports = decoder.decode_frames_with_report(&payload);

        assert_eq!(reports.len(), 2);
        assert!(reports[0].is_complete());
        assert_eq!(reports[0].trailing, 0);
        assert_eq!(reports[1].reading.gyro_raw, Vector3::new(4, 0, 0));
        assert_eq!(
            reports[1].missing,
            vec![SensorField::GyroYRaw, SensorField::GyroZRaw]
        );
    }

    #[test]
    fn test_decode_frames_single_frame() {
        let readings = decode_frames(mask1::GYRO_X_RAW, 0, &[0x00, 0x07]);
        assert_eq!(readings, vec![decode(mask1::GYRO_X_RAW, 0, &[0x00, 0x07])]);

        // Nothing to split on
        assert_eq!(decode_frames(0, 0, &[1, 2, 3, 4]).len(), 1);
        assert_eq!(decode_frames(mask1::ALL, 0, &[]).len(), 1);
    }
}
