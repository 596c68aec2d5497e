// Copyright (c) 2024-2025 The Sigil Project Authors

//! Sigil device simulator
//!
//! Serves the signing engine over TCP so hosts can exchange frames
//! with a local stand-in for the hardware. Connections are accepted
//! one at a time: the device model is a single point-to-point link
//! with one cycle in flight.

use std::net::TcpListener;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use log::{info, warn, LevelFilter};
use zeroize::Zeroize;

use sigil_core::engine::{Engine, Signer, Verifier};
use sigil_core::wire::IoTransport;

#[derive(Clone, Debug, PartialEq, Parser)]
pub struct Args {
    /// Address to listen on
    #[clap(long, default_value = "127.0.0.1:1715")]
    listen: String,

    /// Signing key, 32 bytes hex
    #[clap(long, env = "SIGIL_KEY", hide_env_values = true)]
    key: String,

    /// Policy: permitted destination contract, hex
    #[clap(long)]
    contract: String,

    /// Policy: permitted chain id, hex
    #[clap(long)]
    chain_id: String,

    /// Per-read timeout in milliseconds, 0 blocks forever
    #[clap(long, default_value_t = 0)]
    timeout_ms: u64,

    /// Log level
    #[clap(long, default_value = "debug")]
    log_level: LevelFilter,
}

/// Decode a hex argument, tolerating a 0x prefix
fn decode_hex(value: &str) -> anyhow::Result<Vec<u8>> {
    hex::decode(value.trim_start_matches("0x")).context("invalid hex")
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let _ = simplelog::SimpleLogger::init(args.log_level, Default::default());

    // Decode startup configuration before touching the network
    let mut key = decode_hex(&args.key).context("signing key")?;
    let raw = <[u8; 32]>::try_from(key.as_slice()).ok();
    key.zeroize();

    let mut raw = raw.context("signing key must be 32 bytes")?;
    let signer = Signer::new(raw).context("signing key rejected")?;
    raw.zeroize();

    let verifier = Verifier::new(
        decode_hex(&args.contract).context("contract address")?,
        decode_hex(&args.chain_id).context("chain id")?,
    );

    info!("signer address 0x{}", hex::encode(signer.address()));

    let timeout = match args.timeout_ms {
        0 => None,
        ms => Some(Duration::from_millis(ms)),
    };

    let listener = TcpListener::bind(&args.listen)
        .with_context(|| format!("bind {}", args.listen))?;
    info!("listening on {}", args.listen);

    // One link at a time, like the device
    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(e) => {
                warn!("accept failed: {e}");
                continue;
            }
        };

        let peer = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        info!("host connected from {peer}");

        stream.set_read_timeout(timeout)?;
        stream.set_nodelay(true)?;

        let mut engine = Engine::new(IoTransport(stream), verifier.clone(), signer.clone());
        let end = engine.run();

        info!("link closed: {end}");
    }

    Ok(())
}
