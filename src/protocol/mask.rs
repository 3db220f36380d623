//! Sensor selection masks
//!
//! The device selects streamed sensors through two independent 32-bit masks.
//! Every bit maps to exactly one 16-bit field in the streamed payload.
//! Bit values are fixed by the firmware and must never change.

use super::field::{SensorField, PRIMARY_ORDER, SECONDARY_ORDER};
use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

/// Bits of the first sensor mask (motors, accelerometer, gyro, IMU)
pub mod mask1 {
    /// Streaming disabled
    pub const OFF: u32 = 0;

    // =========================================================================
    // Accelerometer
    // =========================================================================

    pub const ACCELEROMETER_X_RAW: u32 = 0x8000_0000;
    pub const ACCELEROMETER_Y_RAW: u32 = 0x4000_0000;
    pub const ACCELEROMETER_Z_RAW: u32 = 0x2000_0000;
    pub const ACCELEROMETER_X_FILTERED: u32 = 0x0000_8000;
    pub const ACCELEROMETER_Y_FILTERED: u32 = 0x0000_4000;
    pub const ACCELEROMETER_Z_FILTERED: u32 = 0x0000_2000;

    pub const ACCELEROMETER_ALL_RAW: u32 =
        ACCELEROMETER_X_RAW | ACCELEROMETER_Y_RAW | ACCELEROMETER_Z_RAW;
    pub const ACCELEROMETER_ALL_FILTERED: u32 =
        ACCELEROMETER_X_FILTERED | ACCELEROMETER_Y_FILTERED | ACCELEROMETER_Z_FILTERED;

    // =========================================================================
    // Gyro
    // =========================================================================

    pub const GYRO_X_RAW: u32 = 0x1000_0000;
    pub const GYRO_Y_RAW: u32 = 0x0800_0000;
    pub const GYRO_Z_RAW: u32 = 0x0400_0000;
    pub const GYRO_X_FILTERED: u32 = 0x0000_1000;
    pub const GYRO_Y_FILTERED: u32 = 0x0000_0800;
    pub const GYRO_Z_FILTERED: u32 = 0x0000_0400;

    pub const GYRO_ALL_RAW: u32 = GYRO_X_RAW | GYRO_Y_RAW | GYRO_Z_RAW;
    pub const GYRO_ALL_FILTERED: u32 = GYRO_X_FILTERED | GYRO_Y_FILTERED | GYRO_Z_FILTERED;

    // =========================================================================
    // Motor back EMF
    // =========================================================================

    pub const MOTOR_EMF_RIGHT_RAW: u32 = 0x0040_0000;
    pub const MOTOR_EMF_LEFT_RAW: u32 = 0x0020_0000;
    pub const MOTOR_EMF_RIGHT_FILTERED: u32 = 0x0000_0040;
    pub const MOTOR_EMF_LEFT_FILTERED: u32 = 0x0000_0020;

    pub const MOTOR_EMF_ALL_RAW: u32 = MOTOR_EMF_LEFT_RAW | MOTOR_EMF_RIGHT_RAW;
    pub const MOTOR_EMF_ALL_FILTERED: u32 = MOTOR_EMF_LEFT_FILTERED | MOTOR_EMF_RIGHT_FILTERED;

    // =========================================================================
    // Motor PWM
    // =========================================================================

    pub const PWM_LEFT_RAW: u32 = 0x0010_0000;
    pub const PWM_RIGHT_RAW: u32 = 0x0008_0000;

    pub const PWM_ALL_RAW: u32 = PWM_LEFT_RAW | PWM_RIGHT_RAW;

    // =========================================================================
    // IMU
    // =========================================================================

    pub const IMU_PITCH_FILTERED: u32 = 0x0001_0000;
    pub const IMU_ROLL_FILTERED: u32 = 0x0002_0000;
    pub const IMU_YAW_FILTERED: u32 = 0x0004_0000;

    pub const IMU_ALL_FILTERED: u32 = IMU_PITCH_FILTERED | IMU_ROLL_FILTERED | IMU_YAW_FILTERED;

    /// Every field of the first mask
    pub const ALL: u32 = MOTOR_EMF_ALL_FILTERED
        | MOTOR_EMF_ALL_RAW
        | PWM_ALL_RAW
        | ACCELEROMETER_ALL_RAW
        | ACCELEROMETER_ALL_FILTERED
        | GYRO_ALL_RAW
        | GYRO_ALL_FILTERED
        | IMU_ALL_FILTERED;
}

/// Bits of the second sensor mask (quaternion, odometer, velocity)
pub mod mask2 {
    pub const OFF: u32 = 0;

    pub const QUATERNION_Q0: u32 = 0x8000_0000;
    pub const QUATERNION_Q1: u32 = 0x4000_0000;
    pub const QUATERNION_Q2: u32 = 0x2000_0000;
    pub const QUATERNION_Q3: u32 = 0x1000_0000;
    pub const QUATERNION_ALL: u32 = QUATERNION_Q0 | QUATERNION_Q1 | QUATERNION_Q2 | QUATERNION_Q3;

    pub const ODOMETER_X: u32 = 0x0800_0000;
    pub const ODOMETER_Y: u32 = 0x0400_0000;
    pub const ODOMETER_ALL: u32 = ODOMETER_X | ODOMETER_Y;

    pub const ACCEL_ONE: u32 = 0x0200_0000;

    pub const VELOCITY_X: u32 = 0x0100_0000;
    pub const VELOCITY_Y: u32 = 0x0080_0000;
    pub const VELOCITY_ALL: u32 = VELOCITY_X | VELOCITY_Y;

    /// Every field of the second mask
    pub const ALL: u32 = ACCEL_ONE | ODOMETER_ALL | VELOCITY_ALL | QUATERNION_ALL;
}

/// Which of the two masks a bit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskBank {
    Primary,
    Secondary,
}

/// The pair of masks negotiated by a streaming configuration
///
/// Masks are opaque to the decoder: only bit membership matters.
/// Bits without a known field are carried through untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SensorMaskSet {
    pub mask1: u32,
    pub mask2: u32,
}

impl SensorMaskSet {
    pub const OFF: Self = Self::new(mask1::OFF, mask2::OFF);
    pub const ALL: Self = Self::new(mask1::ALL, mask2::ALL);

    pub const fn new(mask1: u32, mask2: u32) -> Self {
        Self { mask1, mask2 }
    }

    /// Mask value for the given bank
    pub const fn bank(&self, bank: MaskBank) -> u32 {
        match bank {
            MaskBank::Primary => self.mask1,
            MaskBank::Secondary => self.mask2,
        }
    }

    /// Enable a single field
    pub fn insert(&mut self, field: SensorField) {
        match field.bank() {
            MaskBank::Primary => self.mask1 |= field.bit(),
            MaskBank::Secondary => self.mask2 |= field.bit(),
        }
    }

    /// Builder variant of [`insert`](Self::insert)
    pub fn with(mut self, field: SensorField) -> Self {
        self.insert(field);
        self
    }

    pub fn contains(&self, field: SensorField) -> bool {
        self.bank(field.bank()) & field.bit() != 0
    }

    pub fn is_off(&self) -> bool {
        self.mask1 == 0 && self.mask2 == 0
    }

    /// Enabled fields in payload order
    pub fn fields(&self) -> impl Iterator<Item = SensorField> + '_ {
        PRIMARY_ORDER
            .iter()
            .chain(SECONDARY_ORDER.iter())
            .copied()
            .filter(move |f| self.contains(*f))
    }

    /// Number of enabled fields with a known slot
    pub fn field_count(&self) -> usize {
        self.fields().count()
    }

    /// Bytes one complete reading occupies in a payload
    pub fn payload_len(&self) -> usize {
        self.field_count() * 2
    }
}

impl BitOr for SensorMaskSet {
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        Self::new(self.mask1 | other.mask1, self.mask2 | other.mask2)
    }
}

impl BitOrAssign for SensorMaskSet {
    fn bitor_assign(&mut self, other: Self) {
        *self = *self | other;
    }
}

impl FromIterator<SensorField> for SensorMaskSet {
    fn from_iter<I: IntoIterator<Item = SensorField>>(iter: I) -> Self {
        iter.into_iter().fold(Self::OFF, Self::with)
    }
}
