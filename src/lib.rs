//! Sphero sensor data streaming codec
//!
//! Builds set-data-streaming command payloads and decodes the streamed
//! sensor packets the device sends back.
//!
//! ```
//! use sphero_stream::{decode, mask1, StreamConfig};
//!
//! let config = StreamConfig::new(40, 1, 0)
//!     .with_mask1(mask1::ACCELEROMETER_X_RAW | mask1::ACCELEROMETER_Y_RAW);
//! assert_eq!(config.encode().len(), 9);
//!
//! let reading = decode(config.mask1(), config.mask2(), &[0x00, 0x0A, 0x00, 0x14]);
//! assert_eq!(reading.accelerometer_raw.x, 10);
//! assert_eq!(reading.accelerometer_raw.y, 20);
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod hexdump;
pub mod logging;
pub mod protocol;

pub use error::{Result, StreamError};
pub use protocol::{
    decode, decode_frames, decode_with_report, encode, mask1, mask2, DecodeReport,
    LocatorReading, MaskBank, Quaternion, SensorField, SensorMaskSet, SensorReading,
    StreamConfig, StreamPacketDecoder, Vector2, Vector3,
};
