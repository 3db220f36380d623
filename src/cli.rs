//! Command-line interface definition using clap
//!
//! Provides structured argument parsing with automatic help generation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// =============================================================================
// CLI Definition
// =============================================================================

/// Encode streaming commands and decode streamed sensor packets
#[derive(Parser, Debug)]
#[command(name = "sphero-stream")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: ./sphero-stream.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the set-data-streaming payload as hex
    ///
    /// Values not given on the command line come from the config file.
    /// Any --sensor or --mask flag replaces the configured sensors.
    Encode {
        /// Divisor of the 400 Hz base rate
        #[arg(long)]
        divisor: Option<u16>,

        /// Frames per packet
        #[arg(long)]
        frames: Option<u16>,

        /// Packets to stream (0 = unlimited)
        #[arg(long)]
        packets: Option<u8>,

        /// Sensor or group name (repeatable), e.g. gyro.raw
        #[arg(long = "sensor", value_name = "NAME")]
        sensors: Vec<String>,

        /// Raw primary mask in hex
        #[arg(long, value_name = "HEX")]
        mask1: Option<String>,

        /// Raw secondary mask in hex
        #[arg(long, value_name = "HEX")]
        mask2: Option<String>,
    },

    /// Decode streamed payloads to JSON, one reading per line
    ///
    /// Without payload arguments, reads one hex payload per stdin line
    /// and prints each reading as soon as its line arrives.
    /// Payloads carrying several frames print one line per frame.
    /// Without mask flags, uses the masks of the configured sensors.
    Decode {
        /// Primary mask in hex
        #[arg(long, value_name = "HEX")]
        mask1: Option<String>,

        /// Secondary mask in hex
        #[arg(long, value_name = "HEX")]
        mask2: Option<String>,

        /// Frames packed in each payload (default: config frame_count)
        #[arg(long)]
        frames: Option<u16>,

        /// Include consumed/missing field diagnostics
        #[arg(long)]
        report: bool,

        /// Hex payloads
        #[arg(value_name = "PAYLOAD")]
        payloads: Vec<String>,
    },

    /// List streamable sensors in payload order
    Sensors,

    /// Write a starter config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Decode a read-locator response payload to JSON
    Locator {
        /// Hex payload
        #[arg(value_name = "PAYLOAD")]
        payload: String,
    },
}

// =============================================================================
// Tests
// =============================================================================
