// Copyright (c) 2024-2025 The Sigil Project Authors

//! Sigil host API library (and CLI)
//!
//! Drives a Sigil signing device from the host side of the link: frame
//! a transaction, send it, and map the device's status codes back into
//! errors. Works over any [`Transport`]; a TCP constructor is provided
//! for talking to `sigil-sim` or a serial-over-network bridge.

use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Re-export `sigil-wire` for consumers
pub use sigil_wire::{self as wire, FrameError, IoTransport, Response, Status, Transport};

use sigil_wire::frame;

mod error;
pub use error::Error;

/// Handle to a connected signing device
///
/// Exchanges are strictly lockstep: one request, one response, matching
/// the device's single-cycle model.
pub struct DeviceHandle<T: Transport> {
    transport: T,
}

impl<T: Transport> DeviceHandle<T> {
    /// Wrap an open transport
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Liveness probe
    ///
    /// Sends an empty payload; the device answers with a pong status
    /// rather than a signing attempt.
    pub fn ping(&mut self) -> Result<(), Error> {
        frame::write_request(&mut self.transport, &[])?;

        match frame::read_response(&mut self.transport)? {
            Response::Status(Status::Pong) => Ok(()),
            _ => Err(Error::UnexpectedResponse),
        }
    }

    /// Submit a raw transaction for signing
    ///
    /// Returns the signed transaction bytes on success; a device
    /// refusal surfaces as [`Error::Device`] carrying the status code.
    pub fn sign(&mut self, transaction: &[u8]) -> Result<Vec<u8>, Error> {
        frame::write_request(&mut self.transport, transaction)?;

        match frame::read_response(&mut self.transport)? {
            Response::Signed(signed) => Ok(signed),
            Response::Status(status) => Err(Error::Device(status)),
        }
    }
}

impl DeviceHandle<IoTransport<TcpStream>> {
    /// Connect to a device served over TCP (e.g. a `sigil-sim` instance)
    ///
    /// `timeout` bounds each read; `None` blocks forever, matching the
    /// dedicated-link default.
    pub fn connect<A: ToSocketAddrs>(addr: A, timeout: Option<Duration>) -> Result<Self, Error> {
        let stream = TcpStream::connect(addr)?;
        stream.set_read_timeout(timeout)?;
        stream.set_nodelay(true)?;

        Ok(Self::new(IoTransport(stream)))
    }
}
