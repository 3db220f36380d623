//! Decoded sensor reading
//!
//! One `SensorReading` is produced per streamed payload. Every slot is a
//! signed 16-bit value; slots whose mask bit is unset stay at zero, so
//! presence must be checked against the stored masks.

use super::field::SensorField;
use super::mask::SensorMaskSet;
use serde::{Deserialize, Serialize};
use std::ops::Add;

// =============================================================================
// Vectors
// =============================================================================

/// Two-component value
///
/// Motor EMF uses `x` = right, `y` = left. PWM uses `x` = left, `y` = right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: i16,
    pub y: i16,
}

impl Vector2 {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Multiply each component, saturating at the i16 range
    pub fn scale(self, k: i16) -> Self {
        Self::new(self.x.saturating_mul(k), self.y.saturating_mul(k))
    }

    pub fn dot(self, other: Self) -> i64 {
        i64::from(self.x) * i64::from(other.x) + i64::from(self.y) * i64::from(other.y)
    }

    /// Euclidean norm
    pub fn length(self) -> f64 {
        (self.dot(self) as f64).sqrt()
    }
}

/// Component-wise sum, saturating at the i16 range
impl Add for Vector2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x.saturating_add(other.x), self.y.saturating_add(other.y))
    }
}

/// Three-component value
///
/// IMU angles use `x` = pitch, `y` = roll, `z` = yaw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl Vector3 {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Multiply each component, saturating at the i16 range
    pub fn scale(self, k: i16) -> Self {
        Self::new(
            self.x.saturating_mul(k),
            self.y.saturating_mul(k),
            self.z.saturating_mul(k),
        )
    }

    pub fn dot(self, other: Self) -> i64 {
        i64::from(self.x) * i64::from(other.x)
            + i64::from(self.y) * i64::from(other.y)
            + i64::from(self.z) * i64::from(other.z)
    }

    /// Euclidean norm
    pub fn length(self) -> f64 {
        (self.dot(self) as f64).sqrt()
    }
}

/// Component-wise sum, saturating at the i16 range
impl Add for Vector3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.x.saturating_add(other.x),
            self.y.saturating_add(other.y),
            self.z.saturating_add(other.z),
        )
    }
}

/// Orientation quaternion as reported by the locator subsystem
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quaternion {
    pub q0: i16,
    pub q1: i16,
    pub q2: i16,
    pub q3: i16,
}

// =============================================================================
// Reading
// =============================================================================

/// Structured telemetry decoded from one streaming payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Primary mask active when the payload was produced
    pub mask1: u32,
    /// Secondary mask active when the payload was produced
    pub mask2: u32,
    pub accelerometer_raw: Vector3,
    pub gyro_raw: Vector3,
    pub motor_emf_raw: Vector2,
    pub pwm_raw: Vector2,
    pub imu_filtered: Vector3,
    pub accelerometer_filtered: Vector3,
    pub gyro_filtered: Vector3,
    pub motor_emf_filtered: Vector2,
    pub quaternion: Quaternion,
    pub odometer: Vector2,
    pub accel_one: i16,
    pub velocity: Vector2,
}

impl SensorReading {
    /// Empty reading carrying the given masks
    pub fn new(masks: SensorMaskSet) -> Self {
        Self {
            mask1: masks.mask1,
            mask2: masks.mask2,
            ..Self::default()
        }
    }

    pub fn masks(&self) -> SensorMaskSet {
        SensorMaskSet::new(self.mask1, self.mask2)
    }

    /// Whether the field was selected by the stored masks
    pub fn is_present(&self, field: SensorField) -> bool {
        self.masks().contains(field)
    }

    /// Selected fields with their values, in payload order
    pub fn present_fields(&self) -> impl Iterator<Item = (SensorField, i16)> + '_ {
        SensorField::all()
            .filter(move |f| self.is_present(*f))
            .map(move |f| (f, self.get(f)))
    }

    /// Value stored for a field (zero when absent)
    pub fn get(&self, field: SensorField) -> i16 {
        match field {
            SensorField::AccelerometerXRaw => self.accelerometer_raw.x,
            SensorField::AccelerometerYRaw => self.accelerometer_raw.y,
            SensorField::AccelerometerZRaw => self.accelerometer_raw.z,
            SensorField::GyroXRaw => self.gyro_raw.x,
            SensorField::GyroYRaw => self.gyro_raw.y,
            SensorField::GyroZRaw => self.gyro_raw.z,
            SensorField::MotorEmfRightRaw => self.motor_emf_raw.x,
            SensorField::MotorEmfLeftRaw => self.motor_emf_raw.y,
            SensorField::PwmLeftRaw => self.pwm_raw.x,
            SensorField::PwmRightRaw => self.pwm_raw.y,
            SensorField::ImuPitchFiltered => self.imu_filtered.x,
            SensorField::ImuRollFiltered => self.imu_filtered.y,
            SensorField::ImuYawFiltered => self.imu_filtered.z,
            SensorField::AccelerometerXFiltered => self.accelerometer_filtered.x,
            SensorField::AccelerometerYFiltered => self.accelerometer_filtered.y,
            SensorField::AccelerometerZFiltered => self.accelerometer_filtered.z,
            SensorField::GyroXFiltered => self.gyro_filtered.x,
            SensorField::GyroYFiltered => self.gyro_filtered.y,
            SensorField::GyroZFiltered => self.gyro_filtered.z,
            SensorField::MotorEmfRightFiltered => self.motor_emf_filtered.x,
            SensorField::MotorEmfLeftFiltered => self.motor_emf_filtered.y,
            SensorField::QuaternionQ0 => self.quaternion.q0,
            SensorField::QuaternionQ1 => self.quaternion.q1,
            SensorField::QuaternionQ2 => self.quaternion.q2,
            SensorField::QuaternionQ3 => self.quaternion.q3,
            SensorField::OdometerX => self.odometer.x,
            SensorField::OdometerY => self.odometer.y,
            SensorField::AccelOne => self.accel_one,
            SensorField::VelocityX => self.velocity.x,
            SensorField::VelocityY => self.velocity.y,
        }
    }

    pub(crate) fn set(&mut self, field: SensorField, value: i16) {
        let slot = match field {
            SensorField::AccelerometerXRaw => &mut self.accelerometer_raw.x,
            SensorField::AccelerometerYRaw => &mut self.accelerometer_raw.y,
            SensorField::AccelerometerZRaw => &mut self.accelerometer_raw.z,
            SensorField::GyroXRaw => &mut self.gyro_raw.x,
            SensorField::GyroYRaw => &mut self.gyro_raw.y,
            SensorField::GyroZRaw => &mut self.gyro_raw.z,
            SensorField::MotorEmfRightRaw => &mut self.motor_emf_raw.x,
            SensorField::MotorEmfLeftRaw => &mut self.motor_emf_raw.y,
            SensorField::PwmLeftRaw => &mut self.pwm_raw.x,
            SensorField::PwmRightRaw => &mut self.pwm_raw.y,
            SensorField::ImuPitchFiltered => &mut self.imu_filtered.x,
            SensorField::ImuRollFiltered => &mut self.imu_filtered.y,
            SensorField::ImuYawFiltered => &mut self.imu_filtered.z,
            SensorField::AccelerometerXFiltered => &mut self.accelerometer_filtered.x,
            SensorField::AccelerometerYFiltered => &mut self.accelerometer_filtered.y,
            SensorField::AccelerometerZFiltered => &mut self.accelerometer_filtered.z,
            SensorField::GyroXFiltered => &mut self.gyro_filtered.x,
            SensorField::GyroYFiltered => &mut self.gyro_filtered.y,
            SensorField::GyroZFiltered => &mut self.gyro_filtered.z,
            SensorField::MotorEmfRightFiltered => &mut self.motor_emf_filtered.x,
            SensorField::MotorEmfLeftFiltered => &mut self.motor_emf_filtered.y,
            SensorField::QuaternionQ0 => &mut self.quaternion.q0,
            SensorField::QuaternionQ1 => &mut self.quaternion.q1,
            SensorField::QuaternionQ2 => &mut self.quaternion.q2,
            SensorField::QuaternionQ3 => &mut self.quaternion.q3,
            SensorField::OdometerX => &mut self.odometer.x,
            SensorField::OdometerY => &mut self.odometer.y,
            SensorField::AccelOne => &mut self.accel_one,
            SensorField::VelocityX => &mut self.velocity.x,
            SensorField::VelocityY => &mut self.velocity.y,
        };
        *slot = value;
    }
}
