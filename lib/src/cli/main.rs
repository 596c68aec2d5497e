// Copyright (c) 2024-2025 The Sigil Project Authors

//! Sigil host CLI
//!
//! Talks to a signing device over TCP: probe liveness or submit a
//! hex-encoded transaction and print the signed result.

use std::time::Duration;

use clap::{Parser, Subcommand};
use log::{debug, LevelFilter};

use sigil_host::DeviceHandle;

#[derive(Clone, Debug, PartialEq, Parser)]
pub struct Args {
    /// Device address (e.g. a sigil-sim instance)
    #[clap(long, default_value = "127.0.0.1:1715", env = "SIGIL_DEVICE")]
    device: String,

    /// Response timeout in milliseconds, 0 blocks forever
    #[clap(long, default_value_t = 5000)]
    timeout_ms: u64,

    /// Log level
    #[clap(long, default_value = "info")]
    log_level: LevelFilter,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, PartialEq, Subcommand)]
enum Command {
    /// Check device liveness
    Ping,

    /// Submit a transaction for signing, hex encoded
    Sign {
        /// Raw typed transaction, hex with optional 0x prefix
        transaction: String,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let _ = simplelog::SimpleLogger::init(args.log_level, Default::default());

    let timeout = match args.timeout_ms {
        0 => None,
        ms => Some(Duration::from_millis(ms)),
    };

    debug!("connecting to {}", args.device);
    let mut device = DeviceHandle::connect(&args.device, timeout)?;

    match args.command {
        Command::Ping => {
            device.ping()?;
            println!("pong");
        }
        Command::Sign { transaction } => {
            let transaction = hex::decode(transaction.trim_start_matches("0x"))?;
            let signed = device.sign(&transaction)?;
            println!("{}", hex::encode(signed));
        }
    }

    Ok(())
}
