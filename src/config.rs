//! Configuration management
//!
//! The stream profile is stored as TOML, by default `sphero-stream.toml`
//! in the working directory. Every section is optional; missing keys take
//! their defaults.

use crate::constants::{DEFAULT_DIVISOR, DEFAULT_FRAME_COUNT, DEFAULT_PACKET_COUNT};
use crate::error::{Result, StreamError};
use crate::protocol::{parse_selectors, SensorMaskSet, StreamConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up when none is given
pub const DEFAULT_CONFIG_FILE: &str = "sphero-stream.toml";

// =============================================================================
// Application Configuration
// =============================================================================

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub stream: StreamSection,
    pub logs: LogsConfig,
}

// =============================================================================
// Stream Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamSection {
    /// Divides the 400 Hz base sample rate
    pub divisor: u16,

    /// Frames per packet
    pub frame_count: u16,

    /// Packets to stream (0 = until reconfigured, max 255)
    pub packet_count: u32,

    /// Sensor or group names, e.g. "accelerometer.x.raw", "quaternion", "all"
    pub sensors: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogsConfig {
    /// Debug-level tracing output
    pub verbose: bool,
}

impl Default for StreamSection {
    fn default() -> Self {
        Self {
            divisor: DEFAULT_DIVISOR,
            frame_count: DEFAULT_FRAME_COUNT,
            packet_count: DEFAULT_PACKET_COUNT,
            sensors: Vec::new(),
        }
    }
}

impl StreamSection {
    /// Resolve sensor names into the two masks
    pub fn masks(&self) -> Result<SensorMaskSet> {
        parse_selectors(&self.sensors)
    }

    /// Packet count as sent on the wire, which holds a single byte
    pub fn checked_packet_count(&self) -> Result<u8> {
        u8::try_from(self.packet_count).map_err(|_| StreamError::ConfigValidation {
            field: "packet_count",
            reason: format!("{} exceeds 255", self.packet_count),
        })
    }

    /// Build the command configuration described by this section
    pub fn to_stream_config(&self) -> Result<StreamConfig> {
        Ok(
            StreamConfig::new(self.divisor, self.frame_count, self.checked_packet_count()?)
                .with_masks(self.masks()?),
        )
    }
}

// =============================================================================
// Load / Save
// =============================================================================

/// Config file path: the explicit one, or the default in the working directory
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Load config, failing on unreadable or invalid files
pub fn load_from(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| StreamError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&content).map_err(|e| StreamError::ConfigParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Save config to file
pub fn save(path: &Path, config: &Config) -> Result<()> {
    let content = toml::to_string_pretty(config).map_err(|e| StreamError::ConfigValidation {
        field: "config",
        reason: e.to_string(),
    })?;
    fs::write(path, content).map_err(|e| StreamError::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{mask1, mask2};

    // =========================================================================
    // Default values tests
    // =========================================================================

    #[test]
    fn test_default_stream_section_values() {
        let section = StreamSection::default();

        assert_eq!(section.divisor, DEFAULT_DIVISOR);
        assert_eq!(section.frame_count, DEFAULT_FRAME_COUNT);
        assert_eq!(section.packet_count, DEFAULT_PACKET_COUNT);
        assert!(section.sensors.is_empty());
    }

    #[test]
    fn test_config_empty_file() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.stream.divisor, DEFAULT_DIVISOR);
        assert!(!config.logs.verbose);
        assert_eq!(
            config.stream.to_stream_config().unwrap().masks(),
            SensorMaskSet::OFF
        );
    }

    #[test]
    fn test_config_partial_stream_section() {
        let partial_toml = r#"
[stream]
divisor = 10
sensors = ["accelerometer.raw", "quaternion.q0"]
"#;

        let config: Config = toml::from_str(partial_toml).unwrap();
        let stream = config.stream.to_stream_config().unwrap();

        assert_eq!(stream.divisor(), 10);
        assert_eq!(stream.frame_count(), DEFAULT_FRAME_COUNT);
        assert_eq!(stream.mask1(), mask1::ACCELEROMETER_ALL_RAW);
        assert_eq!(stream.mask2(), mask2::QUATERNION_Q0);
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn test_unknown_sensor_rejected() {
        let section = StreamSection {
            sensors: vec!["gyro.raw".into(), "barometer".into()],
            ..StreamSection::default()
        };

        match section.to_stream_config() {
            Err(StreamError::UnknownSensor { name }) => assert_eq!(name, "barometer"),
            other => panic!("Expected UnknownSensor, got {:?}", other),
        }
    }

    #[test]
    fn test_packet_count_over_255_rejected() {
        let section = StreamSection {
            packet_count: 300,
            ..StreamSection::default()
        };

        assert!(matches!(
            section.to_stream_config(),
            Err(StreamError::ConfigValidation {
                field: "packet_count",
                ..
            })
        ));

        let at_limit = StreamSection {
            packet_count: 255,
            ..StreamSection::default()
        };
        assert_eq!(at_limit.checked_packet_count().unwrap(), 255);
    }

    // =========================================================================
    // Roundtrip tests
    // =========================================================================

    #[test]
    fn test_config_serialize_deserialize_roundtrip() {
        let config = Config {
            stream: StreamSection {
                divisor: 20,
                frame_count: 2,
                packet_count: 100,
                sensors: vec!["imu.filtered".into(), "velocity".into()],
            },
            logs: LogsConfig { verbose: true },
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let restored: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(restored.stream.divisor, 20);
        assert_eq!(restored.stream.frame_count, 2);
        assert_eq!(restored.stream.packet_count, 100);
        assert_eq!(restored.stream.sensors, vec!["imu.filtered", "velocity"]);
        assert!(restored.logs.verbose);
    }

    #[test]
    fn test_config_path_default() {
        assert_eq!(config_path(None), PathBuf::from(DEFAULT_CONFIG_FILE));
        assert_eq!(
            config_path(Some(Path::new("/tmp/x.toml"))),
            PathBuf::from("/tmp/x.toml")
        );
    }
}
