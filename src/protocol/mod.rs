//! Sensor data streaming protocol
//!
//! Pure encode/decode for the streaming feature of the device:
//! - **Encoder**: [`StreamConfig`] → set-data-streaming command payload
//! - **Decoder**: masks + streamed payload → [`SensorReading`]
//!
//! Command framing (header, sequence, checksum) and transport are handled
//! by the surrounding driver. Everything here is stateless and can be called
//! from any thread.

pub mod decoder;
pub mod field;
pub mod locator;
pub mod mask;
pub mod reading;
pub mod streaming;

pub use decoder::{decode, decode_frames, decode_with_report, DecodeReport, StreamPacketDecoder};
pub use field::{parse_selector, parse_selectors, SensorField, PRIMARY_ORDER, SECONDARY_ORDER};
pub use locator::LocatorReading;
pub use mask::{mask1, mask2, MaskBank, SensorMaskSet};
pub use reading::{Quaternion, SensorReading, Vector2, Vector3};
pub use streaming::{encode, StreamConfig};
