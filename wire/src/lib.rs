// Copyright (c) 2024-2025 The Sigil Project Authors

//! Wire protocol / frame definitions for Sigil signing devices
//!
//! This crate specifies (and implements both ends of) the serial framing
//! used to exchange transactions with a Sigil device. The protocol is a
//! simple length-prefixed, checksummed framing over a reliable in-order
//! byte stream, designed for a dedicated point-to-point link with a
//! trusted host driving it.
//!
//! All multi-byte fields are little-endian, because most of the world is
//! these days.
//!
//! ## Frames
//!
//! ```text
//! request:  5A A5 <len:u16 LE> <payload> <crc32:u32 LE>
//! success:  5A A5 00 <len:u16 LE> <payload> <crc32:u32 LE>
//! error:    5A A5 <status:u8>
//! ```
//!
//! The checksum is CRC-32/ISO-HDLC computed over the payload only.
//! Requests carry no status byte; a zero-length request payload is a
//! liveness probe answered with [`Status::Pong`].
//!
//! Devices resynchronize on the first preamble byte: anything on the
//! line that is not `0x5A` is discarded until a frame start is found.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display, EnumIter};

pub mod frame;
pub use frame::{checksum, Response};

mod transport;
pub use transport::Transport;

#[cfg(feature = "std")]
pub use transport::IoTransport;

/// Frame start marker, first byte doubles as the resync point
pub const PREAMBLE: [u8; 2] = [0x5A, 0xA5];

/// Sigil protocol version
pub const SIGIL_PROTO_VERSION: u8 = 0x01;

/// Response status codes (one byte on the wire)
///
/// `Success` is followed by a framed payload; every other code is the
/// complete response.
#[derive(Copy, Clone, Debug, PartialEq, IntoPrimitive, TryFromPrimitive, Display, EnumIter)]
#[repr(u8)]
pub enum Status {
    /// Request accepted, signed transaction follows
    Success = 0x00,

    /// Frame read or checksum failure
    SerialReadFailed = 0x01,

    /// Transaction exceeds the device size limit
    TransactionTooBig = 0x02,

    /// Leading type byte is not an EIP-2930 marker
    NotEip2930 = 0x11,

    /// Transaction body failed to RLP-decode, or trailing bytes
    RlpDecodeFailed = 0x12,

    /// Decoded RLP shape invalid (wrong arity or field type)
    RlpInvalid = 0x13,

    /// Chain id does not match the configured policy
    ChainIdMismatch = 0x14,

    /// Destination does not match the configured contract
    ContractAddressMismatch = 0x15,

    /// Native value is non-zero
    ValueNotZero = 0x16,

    /// Access list is non-empty
    AccessListNotEmpty = 0x17,

    /// Reserved: data field invalid (not produced by current policy)
    DataInvalid = 0x18,

    /// Liveness pong, answers an empty request payload
    Pong = 0xFE,
}

/// Frame exchange errors
///
/// [`Preamble`][FrameError::Preamble] and [`Checksum`][FrameError::Checksum]
/// are in-band failures a device answers with
/// [`Status::SerialReadFailed`]; the remaining variants indicate the
/// link itself failed and the exchange cannot be answered.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum FrameError {
    /// Second preamble byte mismatch after resync
    #[cfg_attr(feature = "std", error("preamble mismatch"))]
    Preamble,

    /// Payload checksum mismatch
    #[cfg_attr(feature = "std", error("checksum mismatch"))]
    Checksum,

    /// Byte transport failed
    #[cfg_attr(feature = "std", error("transport failed"))]
    Transport,

    /// Read deadline elapsed before the requested bytes arrived
    #[cfg_attr(feature = "std", error("read timed out"))]
    Timeout,

    /// Payload too large for a 16-bit length field
    #[cfg_attr(feature = "std", error("payload exceeds frame length field"))]
    Oversize,

    /// Unknown status code in a response
    #[cfg_attr(feature = "std", error("unknown status code 0x{0:02x}"))]
    Status(u8),
}
