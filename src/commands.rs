//! Subcommand handlers
//!
//! Each handler writes to the given sink so output can be captured in tests.

use crate::cli::Command;
use anyhow::{bail, Result};
use sphero_stream::config::{self, Config, StreamSection};
use sphero_stream::hexdump::{format_bytes, parse_bytes, parse_mask};
use sphero_stream::protocol::parse_selectors;
use sphero_stream::{
    LocatorReading, MaskBank, SensorField, SensorMaskSet, StreamConfig, StreamPacketDecoder,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

// =============================================================================
// Config loading
// =============================================================================

/// Config file read before logging is up
///
/// Failures are held until [`resolve`](Self::resolve) so a warning about a
/// broken default file goes through the installed subscriber.
#[derive(Debug)]
pub struct ConfigLoad {
    path: PathBuf,
    explicit: bool,
    loaded: Option<sphero_stream::Result<Config>>,
}

impl ConfigLoad {
    /// Read the config the command needs: `--config` or the default file
    pub fn read(explicit: Option<&Path>, command: &Command) -> Self {
        let creating = matches!(command, Command::Init { .. });
        Self::read_from(config::config_path(explicit), explicit.is_some(), creating)
    }

    fn read_from(path: PathBuf, explicit: bool, creating: bool) -> Self {
        // init writes the file, a missing default file just means defaults
        let loaded = if !creating && (explicit || path.exists()) {
            Some(config::load_from(&path))
        } else {
            None
        };

        Self {
            path,
            explicit,
            loaded,
        }
    }

    /// Verbose logging requested by the file
    pub fn verbose(&self) -> bool {
        matches!(&self.loaded, Some(Ok(cfg)) if cfg.logs.verbose)
    }

    /// Config to run with: an explicit file must load, a default one may fall back
    pub fn resolve(self) -> Result<(PathBuf, Config)> {
        let cfg = match self.loaded {
            Some(Ok(cfg)) => cfg,
            Some(Err(e)) if self.explicit => return Err(e.into()),
            Some(Err(e)) => {
                warn!("{}, using defaults", e);
                Config::default()
            }
            None => Config::default(),
        };
        Ok((self.path, cfg))
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Dispatch a parsed subcommand, writing to stdout
pub fn run(command: Command, cfg: &Config, config_path: &Path) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Encode {
            divisor,
            frames,
            packets,
            sensors,
            mask1,
            mask2,
        } => {
            let masks = explicit_masks(&sensors, mask1.as_deref(), mask2.as_deref())?;
            let config = stream_config(&cfg.stream, divisor, frames, packets, masks)?;
            encode(&config, &mut out)
        }
        Command::Decode {
            mask1,
            mask2,
            frames,
            report,
            payloads,
        } => {
            let masks = match explicit_masks(&[], mask1.as_deref(), mask2.as_deref())? {
                Some(masks) => masks,
                None => cfg.stream.masks()?,
            };
            let frames = frames.unwrap_or(cfg.stream.frame_count);
            let decoder = StreamPacketDecoder::new(masks);

            if payloads.is_empty() {
                let stdin = io::stdin();
                decode(&decoder, frames, stdin.lock().lines(), report, &mut out)
            } else {
                decode(&decoder, frames, payloads.into_iter().map(Ok), report, &mut out)
            }
        }
        Command::Sensors => list_sensors(&mut out),
        Command::Init { force } => init(config_path, force, &mut out),
        Command::Locator { payload } => {
            let locator = LocatorReading::decode(&parse_bytes(&payload)?);
            writeln!(out, "{}", serde_json::to_string(&locator)?)?;
            Ok(())
        }
    }
}

/// Masks from command-line flags, `None` when no mask flag was given
fn explicit_masks(
    sensors: &[String],
    mask1: Option<&str>,
    mask2: Option<&str>,
) -> Result<Option<SensorMaskSet>> {
    if sensors.is_empty() && mask1.is_none() && mask2.is_none() {
        return Ok(None);
    }

    let raw = SensorMaskSet::new(
        mask1.map(parse_mask).transpose()?.unwrap_or(0),
        mask2.map(parse_mask).transpose()?.unwrap_or(0),
    );

    Ok(Some(raw | parse_selectors(sensors)?))
}

/// Command-line values over the config section
///
/// Only the config values actually used are validated.
fn stream_config(
    section: &StreamSection,
    divisor: Option<u16>,
    frames: Option<u16>,
    packets: Option<u8>,
    masks: Option<SensorMaskSet>,
) -> Result<StreamConfig> {
    let packets = match packets {
        Some(packets) => packets,
        None => section.checked_packet_count()?,
    };
    let masks = match masks {
        Some(masks) => masks,
        None => section.masks()?,
    };

    Ok(StreamConfig::new(
        divisor.unwrap_or(section.divisor),
        frames.unwrap_or(section.frame_count),
        packets,
    )
    .with_masks(masks))
}

// =============================================================================
// Handlers
// =============================================================================

fn encode(config: &StreamConfig, out: &mut impl Write) -> Result<()> {
    let bytes = config.encode();
    debug!(
        "Encoded streaming config: divisor={} frames={} packets={} mask1={:#010x} mask2={:#010x}",
        config.divisor(),
        config.frame_count(),
        config.packet_count(),
        config.mask1(),
        config.mask2()
    );
    writeln!(out, "{}", format_bytes(&bytes))?;
    Ok(())
}

/// Decode payload lines as they arrive, one JSON line per frame
fn decode<I>(
    decoder: &StreamPacketDecoder,
    frames: u16,
    lines: I,
    report: bool,
    out: &mut impl Write,
) -> Result<()>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    for line in lines {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let payload = parse_bytes(line)?;
        let reports = if frames > 1 {
            decoder.decode_frames_with_report(&payload)
        } else {
            vec![decoder.decode_with_report(&payload)]
        };

        for result in &reports {
            let json = if report {
                serde_json::to_string(result)?
            } else {
                serde_json::to_string(&result.reading)?
            };
            writeln!(out, "{}", json)?;
        }
        out.flush()?;
    }
    Ok(())
}

fn list_sensors(out: &mut impl Write) -> Result<()> {
    for field in SensorField::all() {
        let bank = match field.bank() {
            MaskBank::Primary => "mask1",
            MaskBank::Secondary => "mask2",
        };
        writeln!(out, "{}  {:#010x}  {}", bank, field.bit(), field)?;
    }
    Ok(())
}

fn init(path: &Path, force: bool, out: &mut impl Write) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    config::save(path, &Config::default())?;
    debug!("Wrote default config to {:?}", path);
    writeln!(out, "{}", path.display())?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
