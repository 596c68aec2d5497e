// Copyright (c) 2024-2025 The Sigil Project Authors

//! The [Engine] drives request cycles for a Sigil signing device.
//!
//! Each cycle receives one framed transaction over the [Transport],
//! bounds its size, checks it against the [Verifier] policy, signs it
//! with the [Signer] and answers with a framed response; every protocol
//! or policy failure is reported in-band as a [Status] code and the
//! engine waits for the next frame. See [wire][sigil_wire] for frame
//! layouts and status codes.

use sigil_wire::{frame, FrameError, Status, Transport};

mod error;
pub use error::Error;

mod verifier;
pub use verifier::Verifier;

mod signer;
pub use signer::Signer;

/// EIP-2930 typed transaction marker
pub const EIP2930_TX_TYPE: u8 = 0x01;

/// Inbound transactions above this size are rejected before decoding
pub const MAX_TRANSACTION_LEN: usize = 32768;

/// Signing engine for one point-to-point link
///
/// Owns the transport and the two configuration values (policy and
/// key), which are set at construction and never change. One cycle is
/// in flight at a time; buffers live for a single cycle.
pub struct Engine<T: Transport> {
    transport: T,
    verifier: Verifier,
    signer: Signer,
}

impl<T: Transport> Engine<T> {
    /// Create an engine over a transport with the given policy and key
    pub fn new(transport: T, verifier: Verifier, signer: Signer) -> Self {
        Self {
            transport,
            verifier,
            signer,
        }
    }

    /// Service request cycles until the transport fails
    ///
    /// Protocol and policy failures are answered in-band and do not end
    /// the loop; the returned error is the transport failure that did.
    pub fn run(&mut self) -> FrameError {
        loop {
            if let Err(e) = self.cycle() {
                return e;
            }
        }
    }

    /// Execute one request / response cycle
    ///
    /// `Err` is returned only when the transport itself fails (or a
    /// configured read deadline elapses); a malformed frame is answered
    /// with [`Status::SerialReadFailed`] and the link self-heals on the
    /// next preamble.
    pub fn cycle(&mut self) -> Result<(), FrameError> {
        let transaction = match frame::read_request(&mut self.transport) {
            Ok(payload) => payload,
            Err(FrameError::Preamble | FrameError::Checksum) => {
                return frame::write_status(&mut self.transport, Status::SerialReadFailed);
            }
            Err(e) => return Err(e),
        };

        #[cfg(feature = "log")]
        log::debug!("request: {} byte payload", transaction.len());

        // Empty payload is a liveness probe
        if transaction.is_empty() {
            return frame::write_status(&mut self.transport, Status::Pong);
        }

        if transaction.len() > MAX_TRANSACTION_LEN {
            return frame::write_status(&mut self.transport, Status::TransactionTooBig);
        }

        if let Err(e) = self.verifier.verify(&transaction) {
            #[cfg(feature = "log")]
            log::info!("transaction refused: {:?}", e);

            return frame::write_status(&mut self.transport, e.into());
        }

        // Policy passed; the key is touched from here on only
        let signed = match self.signer.sign(&transaction) {
            Ok(signed) => signed,
            Err(e) => return frame::write_status(&mut self.transport, e.into()),
        };

        #[cfg(feature = "log")]
        log::debug!("signed: {} byte payload", signed.len());

        frame::write_response(&mut self.transport, &signed)
    }
}
