//! sphero-stream - streaming codec tool
//!
//! Usage:
//!   sphero-stream encode [--divisor N] [--sensor NAME]...   Build a streaming command
//!   sphero-stream decode --mask1 HEX [PAYLOAD]...           Decode streamed packets
//!   sphero-stream init [--force]                            Write a starter config
//!   sphero-stream sensors                                   List sensors in payload order
//!   sphero-stream locator PAYLOAD                           Decode a locator response

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use commands::ConfigLoad;
use sphero_stream::logging;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let load = ConfigLoad::read(cli.config.as_deref(), &cli.command);
    logging::init_tracing(cli.verbose || load.verbose());

    let (path, cfg) = load.resolve()?;
    commands::run(cli.command, &cfg, &path)
}
