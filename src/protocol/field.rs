//! Streamed sensor fields and their payload order
//!
//! Fields appear in a payload in the order the device firmware documents,
//! which is NOT the numeric order of their mask bits. The two tables below
//! are the only source of that order; the decoder walks them verbatim.

use super::mask::{mask1, mask2, MaskBank, SensorMaskSet};
use crate::error::StreamError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One signed 16-bit slot of a streamed reading
///
/// Serializes as its dotted name, the same text `FromStr` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorField {
    // Primary mask
    AccelerometerXRaw,
    AccelerometerYRaw,
    AccelerometerZRaw,
    GyroXRaw,
    GyroYRaw,
    GyroZRaw,
    MotorEmfRightRaw,
    MotorEmfLeftRaw,
    PwmLeftRaw,
    PwmRightRaw,
    ImuPitchFiltered,
    ImuRollFiltered,
    ImuYawFiltered,
    AccelerometerXFiltered,
    AccelerometerYFiltered,
    AccelerometerZFiltered,
    GyroXFiltered,
    GyroYFiltered,
    GyroZFiltered,
    MotorEmfRightFiltered,
    MotorEmfLeftFiltered,
    // Secondary mask
    QuaternionQ0,
    QuaternionQ1,
    QuaternionQ2,
    QuaternionQ3,
    OdometerX,
    OdometerY,
    AccelOne,
    VelocityX,
    VelocityY,
}

/// Payload order of fields selected by `mask1`
pub const PRIMARY_ORDER: [SensorField; 21] = [
    SensorField::AccelerometerXRaw,
    SensorField::AccelerometerYRaw,
    SensorField::AccelerometerZRaw,
    SensorField::GyroXRaw,
    SensorField::GyroYRaw,
    SensorField::GyroZRaw,
    SensorField::MotorEmfRightRaw,
    SensorField::MotorEmfLeftRaw,
    SensorField::PwmLeftRaw,
    SensorField::PwmRightRaw,
    SensorField::ImuPitchFiltered,
    SensorField::ImuRollFiltered,
    SensorField::ImuYawFiltered,
    SensorField::AccelerometerXFiltered,
    SensorField::AccelerometerYFiltered,
    SensorField::AccelerometerZFiltered,
    SensorField::GyroXFiltered,
    SensorField::GyroYFiltered,
    SensorField::GyroZFiltered,
    SensorField::MotorEmfRightFiltered,
    SensorField::MotorEmfLeftFiltered,
];

/// Payload order of fields selected by `mask2`, following all `mask1` fields
pub const SECONDARY_ORDER: [SensorField; 9] = [
    SensorField::QuaternionQ0,
    SensorField::QuaternionQ1,
    SensorField::QuaternionQ2,
    SensorField::QuaternionQ3,
    SensorField::OdometerX,
    SensorField::OdometerY,
    SensorField::AccelOne,
    SensorField::VelocityX,
    SensorField::VelocityY,
];

/// Named groups accepted wherever a sensor name is parsed
const GROUPS: &[(&str, SensorMaskSet)] = &[
    ("off", SensorMaskSet::OFF),
    ("all", SensorMaskSet::ALL),
    ("accelerometer.raw", SensorMaskSet::new(mask1::ACCELEROMETER_ALL_RAW, 0)),
    ("accelerometer.filtered", SensorMaskSet::new(mask1::ACCELEROMETER_ALL_FILTERED, 0)),
    ("gyro.raw", SensorMaskSet::new(mask1::GYRO_ALL_RAW, 0)),
    ("gyro.filtered", SensorMaskSet::new(mask1::GYRO_ALL_FILTERED, 0)),
    ("motor_emf.raw", SensorMaskSet::new(mask1::MOTOR_EMF_ALL_RAW, 0)),
    ("motor_emf.filtered", SensorMaskSet::new(mask1::MOTOR_EMF_ALL_FILTERED, 0)),
    ("pwm.raw", SensorMaskSet::new(mask1::PWM_ALL_RAW, 0)),
    ("imu.filtered", SensorMaskSet::new(mask1::IMU_ALL_FILTERED, 0)),
    ("quaternion", SensorMaskSet::new(0, mask2::QUATERNION_ALL)),
    ("odometer", SensorMaskSet::new(0, mask2::ODOMETER_ALL)),
    ("velocity", SensorMaskSet::new(0, mask2::VELOCITY_ALL)),
];

impl SensorField {
    /// Every field, primary then secondary, in payload order
    pub fn all() -> impl Iterator<Item = SensorField> {
        PRIMARY_ORDER.into_iter().chain(SECONDARY_ORDER)
    }

    /// Mask this field is selected by
    pub const fn bank(self) -> MaskBank {
        match self {
            Self::QuaternionQ0
            | Self::QuaternionQ1
            | Self::QuaternionQ2
            | Self::QuaternionQ3
            | Self::OdometerX
            | Self::OdometerY
            | Self::AccelOne
            | Self::VelocityX
            | Self::VelocityY => MaskBank::Secondary,
            _ => MaskBank::Primary,
        }
    }

    /// Mask bit selecting this field within its bank
    pub const fn bit(self) -> u32 {
        match self {
            Self::AccelerometerXRaw => mask1::ACCELEROMETER_X_RAW,
            Self::AccelerometerYRaw => mask1::ACCELEROMETER_Y_RAW,
            Self::AccelerometerZRaw => mask1::ACCELEROMETER_Z_RAW,
            Self::GyroXRaw => mask1::GYRO_X_RAW,
            Self::GyroYRaw => mask1::GYRO_Y_RAW,
            Self::GyroZRaw => mask1::GYRO_Z_RAW,
            Self::MotorEmfRightRaw => mask1::MOTOR_EMF_RIGHT_RAW,
            Self::MotorEmfLeftRaw => mask1::MOTOR_EMF_LEFT_RAW,
            Self::PwmLeftRaw => mask1::PWM_LEFT_RAW,
            Self::PwmRightRaw => mask1::PWM_RIGHT_RAW,
            Self::ImuPitchFiltered => mask1::IMU_PITCH_FILTERED,
            Self::ImuRollFiltered => mask1::IMU_ROLL_FILTERED,
            Self::ImuYawFiltered => mask1::IMU_YAW_FILTERED,
            Self::AccelerometerXFiltered => mask1::ACCELEROMETER_X_FILTERED,
            Self::AccelerometerYFiltered => mask1::ACCELEROMETER_Y_FILTERED,
            Self::AccelerometerZFiltered => mask1::ACCELEROMETER_Z_FILTERED,
            Self::GyroXFiltered => mask1::GYRO_X_FILTERED,
            Self::GyroYFiltered => mask1::GYRO_Y_FILTERED,
            Self::GyroZFiltered => mask1::GYRO_Z_FILTERED,
            Self::MotorEmfRightFiltered => mask1::MOTOR_EMF_RIGHT_FILTERED,
            Self::MotorEmfLeftFiltered => mask1::MOTOR_EMF_LEFT_FILTERED,
            Self::QuaternionQ0 => mask2::QUATERNION_Q0,
            Self::QuaternionQ1 => mask2::QUATERNION_Q1,
            Self::QuaternionQ2 => mask2::QUATERNION_Q2,
            Self::QuaternionQ3 => mask2::QUATERNION_Q3,
            Self::OdometerX => mask2::ODOMETER_X,
            Self::OdometerY => mask2::ODOMETER_Y,
            Self::AccelOne => mask2::ACCEL_ONE,
            Self::VelocityX => mask2::VELOCITY_X,
            Self::VelocityY => mask2::VELOCITY_Y,
        }
    }

    /// Dotted lowercase name, e.g. `accelerometer.x.raw`
    pub const fn name(self) -> &'static str {
        match self {
            Self::AccelerometerXRaw => "accelerometer.x.raw",
            Self::AccelerometerYRaw => "accelerometer.y.raw",
            Self::AccelerometerZRaw => "accelerometer.z.raw",
            Self::GyroXRaw => "gyro.x.raw",
            Self::GyroYRaw => "gyro.y.raw",
            Self::GyroZRaw => "gyro.z.raw",
            Self::MotorEmfRightRaw => "motor_emf.right.raw",
            Self::MotorEmfLeftRaw => "motor_emf.left.raw",
            Self::PwmLeftRaw => "pwm.left.raw",
            Self::PwmRightRaw => "pwm.right.raw",
            Self::ImuPitchFiltered => "imu.pitch.filtered",
            Self::ImuRollFiltered => "imu.roll.filtered",
            Self::ImuYawFiltered => "imu.yaw.filtered",
            Self::AccelerometerXFiltered => "accelerometer.x.filtered",
            Self::AccelerometerYFiltered => "accelerometer.y.filtered",
            Self::AccelerometerZFiltered => "accelerometer.z.filtered",
            Self::GyroXFiltered => "gyro.x.filtered",
            Self::GyroYFiltered => "gyro.y.filtered",
            Self::GyroZFiltered => "gyro.z.filtered",
            Self::MotorEmfRightFiltered => "motor_emf.right.filtered",
            Self::MotorEmfLeftFiltered => "motor_emf.left.filtered",
            Self::QuaternionQ0 => "quaternion.q0",
            Self::QuaternionQ1 => "quaternion.q1",
            Self::QuaternionQ2 => "quaternion.q2",
            Self::QuaternionQ3 => "quaternion.q3",
            Self::OdometerX => "odometer.x",
            Self::OdometerY => "odometer.y",
            Self::AccelOne => "accel_one",
            Self::VelocityX => "velocity.x",
            Self::VelocityY => "velocity.y",
        }
    }
}

impl fmt::Display for SensorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SensorField {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| StreamError::UnknownSensor { name: s.to_string() })
    }
}

impl Serialize for SensorField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for SensorField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}

/// Resolve a field name or group name (`gyro.raw`, `quaternion`, `all`...) to masks
pub fn parse_selector(name: &str) -> Option<SensorMaskSet> {
    if let Ok(field) = name.parse::<SensorField>() {
        return Some(SensorMaskSet::OFF.with(field));
    }

    let wanted = name.trim().to_ascii_lowercase();
    GROUPS
        .iter()
        .find(|(group, _)| *group == wanted)
        .map(|(_, masks)| *masks)
}

/// Union of the masks of several field or group names
pub fn parse_selectors<I, S>(names: I) -> Result<SensorMaskSet, StreamError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names.into_iter().try_fold(SensorMaskSet::OFF, |acc, name| {
        let name = name.as_ref();
        parse_selector(name)
            .map(|masks| acc | masks)
            .ok_or_else(|| StreamError::UnknownSensor {
                name: name.to_string(),
            })
    })
}
