// Copyright (c) 2024-2025 The Sigil Project Authors

//! Frame assembly and parsing for both ends of the link
//!
//! Devices use [`read_request`] / [`write_response`] / [`write_status`],
//! hosts use [`write_request`] / [`read_response`]. All functions stream
//! directly over a [`Transport`]; only payloads are buffered.

use alloc::vec;
use alloc::vec::Vec;

use byteorder::{ByteOrder, LittleEndian};
use crc::{Crc, CRC_32_ISO_HDLC};

use crate::{FrameError, Status, Transport, PREAMBLE};

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// CRC-32/ISO-HDLC over a frame payload
pub fn checksum(data: &[u8]) -> u32 {
    CRC32.checksum(data)
}

/// Decoded device response
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    /// Signed transaction payload from a success frame
    Signed(Vec<u8>),

    /// Single status code without payload
    Status(Status),
}

/// Receive one request frame, blocking until a full frame arrives
///
/// Discards bytes until the first preamble byte is seen, so a device
/// recovers from line noise by waiting for the next frame start. The
/// returned payload has a verified checksum; its length is bounded only
/// by the 16-bit length field, application limits are the caller's.
pub fn read_request<T: Transport>(transport: &mut T) -> Result<Vec<u8>, FrameError> {
    let mut byte = [0u8; 1];

    // Resync: eat anything up to a frame start
    loop {
        transport.read_exact(&mut byte)?;
        if byte[0] == PREAMBLE[0] {
            break;
        }
    }

    transport.read_exact(&mut byte)?;
    if byte[0] != PREAMBLE[1] {
        return Err(FrameError::Preamble);
    }

    let mut len = [0u8; 2];
    transport.read_exact(&mut len)?;
    let len = LittleEndian::read_u16(&len) as usize;

    let mut payload = vec![0u8; len];
    transport.read_exact(&mut payload)?;

    let mut crc = [0u8; 4];
    transport.read_exact(&mut crc)?;

    if LittleEndian::read_u32(&crc) != checksum(&payload) {
        return Err(FrameError::Checksum);
    }

    Ok(payload)
}

/// Send a request frame (host side)
pub fn write_request<T: Transport>(transport: &mut T, payload: &[u8]) -> Result<(), FrameError> {
    if payload.len() > u16::MAX as usize {
        return Err(FrameError::Oversize);
    }

    let mut head = [0u8; 4];
    head[..2].copy_from_slice(&PREAMBLE);
    LittleEndian::write_u16(&mut head[2..], payload.len() as u16);

    transport.write_all(&head)?;
    transport.write_all(payload)?;

    let mut tail = [0u8; 4];
    LittleEndian::write_u32(&mut tail, checksum(payload));
    transport.write_all(&tail)
}

/// Send a success response carrying a signed transaction (device side)
pub fn write_response<T: Transport>(transport: &mut T, payload: &[u8]) -> Result<(), FrameError> {
    if payload.len() > u16::MAX as usize {
        return Err(FrameError::Oversize);
    }

    let mut head = [0u8; 5];
    head[..2].copy_from_slice(&PREAMBLE);
    head[2] = Status::Success.into();
    LittleEndian::write_u16(&mut head[3..], payload.len() as u16);

    transport.write_all(&head)?;
    transport.write_all(payload)?;

    let mut tail = [0u8; 4];
    LittleEndian::write_u32(&mut tail, checksum(payload));
    transport.write_all(&tail)
}

/// Send a bare status response (device side)
///
/// Error responses carry no length, payload or checksum.
pub fn write_status<T: Transport>(transport: &mut T, status: Status) -> Result<(), FrameError> {
    transport.write_all(&[PREAMBLE[0], PREAMBLE[1], status.into()])
}

/// Receive one response frame (host side)
///
/// Responses are expected in lockstep after a request, so the preamble
/// must arrive exactly; there is no host-side resync.
pub fn read_response<T: Transport>(transport: &mut T) -> Result<Response, FrameError> {
    let mut pre = [0u8; 2];
    transport.read_exact(&mut pre)?;
    if pre != PREAMBLE {
        return Err(FrameError::Preamble);
    }

    let mut byte = [0u8; 1];
    transport.read_exact(&mut byte)?;
    let status = Status::try_from(byte[0]).map_err(|_| FrameError::Status(byte[0]))?;

    if status != Status::Success {
        return Ok(Response::Status(status));
    }

    let mut len = [0u8; 2];
    transport.read_exact(&mut len)?;
    let len = LittleEndian::read_u16(&len) as usize;

    let mut payload = vec![0u8; len];
    transport.read_exact(&mut payload)?;

    let mut crc = [0u8; 4];
    transport.read_exact(&mut crc)?;

    if LittleEndian::read_u32(&crc) != checksum(&payload) {
        return Err(FrameError::Checksum);
    }

    Ok(Response::Signed(payload))
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    /// Scripted transport: reads drain `rx`, writes append to `tx`
    struct Pipe {
        rx: Vec<u8>,
        pos: usize,
        tx: Vec<u8>,
    }

    impl Pipe {
        fn new(rx: &[u8]) -> Self {
            Self {
                rx: rx.to_vec(),
                pos: 0,
                tx: Vec::new(),
            }
        }
    }

    impl Transport for Pipe {
        fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), FrameError> {
            if self.pos + buf.len() > self.rx.len() {
                return Err(FrameError::Transport);
            }
            buf.copy_from_slice(&self.rx[self.pos..self.pos + buf.len()]);
            self.pos += buf.len();
            Ok(())
        }

        fn write_all(&mut self, buf: &[u8]) -> Result<(), FrameError> {
            self.tx.extend_from_slice(buf);
            Ok(())
        }
    }

    #[test]
    fn crc32_check_value() {
        // CRC-32/ISO-HDLC check value
        assert_eq!(checksum(b"123456789"), 0xCBF43926);
    }

    #[test]
    fn crc32_detects_single_byte_corruption() {
        let mut data = hex!("01f8488221050483030d4082520894").to_vec();
        let crc = checksum(&data);

        for i in 0..data.len() {
            data[i] ^= 0x20;
            assert_ne!(checksum(&data), crc, "corruption at {i} undetected");
            data[i] ^= 0x20;
        }
    }

    #[test]
    fn request_frame_roundtrip() {
        let payload = hex!("01c0ffee");

        let mut host = Pipe::new(&[]);
        write_request(&mut host, &payload).unwrap();

        let mut device = Pipe::new(&host.tx);
        assert_eq!(read_request(&mut device).unwrap(), payload.to_vec());
    }

    #[test]
    fn request_resyncs_on_noise() {
        let mut host = Pipe::new(&[]);
        write_request(&mut host, &[0xaa, 0xbb]).unwrap();

        // Line noise ahead of the frame is discarded
        let mut line = vec![0x00, 0x13, 0x37, 0x00];
        line.extend_from_slice(&host.tx);

        let mut device = Pipe::new(&line);
        assert_eq!(read_request(&mut device).unwrap(), vec![0xaa, 0xbb]);
    }

    #[test]
    fn request_rejects_second_preamble_byte() {
        let mut device = Pipe::new(&[0x5A, 0x5A]);
        assert_eq!(read_request(&mut device), Err(FrameError::Preamble));
    }

    #[test]
    fn request_rejects_bad_checksum() {
        let mut host = Pipe::new(&[]);
        write_request(&mut host, &[0x01, 0x02, 0x03]).unwrap();

        // Flip one payload byte after the checksum was computed
        let mut line = host.tx.clone();
        line[5] ^= 0x01;

        let mut device = Pipe::new(&line);
        assert_eq!(read_request(&mut device), Err(FrameError::Checksum));
    }

    #[test]
    fn request_empty_payload() {
        let mut host = Pipe::new(&[]);
        write_request(&mut host, &[]).unwrap();

        // preamble + zero length + checksum of nothing
        assert_eq!(host.tx.len(), 2 + 2 + 4);

        let mut device = Pipe::new(&host.tx);
        assert_eq!(read_request(&mut device).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn status_frame_is_three_bytes() {
        let mut device = Pipe::new(&[]);
        write_status(&mut device, Status::Pong).unwrap();
        assert_eq!(device.tx, vec![0x5A, 0xA5, 0xFE]);
    }

    #[test]
    fn response_frame_roundtrip() {
        let payload = hex!("02f86d8221050483030d40");

        let mut device = Pipe::new(&[]);
        write_response(&mut device, &payload).unwrap();

        // status byte sits between preamble and length
        assert_eq!(device.tx[2], 0x00);

        let mut host = Pipe::new(&device.tx);
        assert_eq!(
            read_response(&mut host).unwrap(),
            Response::Signed(payload.to_vec())
        );
    }

    #[test]
    fn response_status_roundtrip() {
        let mut device = Pipe::new(&[]);
        write_status(&mut device, Status::ChainIdMismatch).unwrap();

        let mut host = Pipe::new(&device.tx);
        assert_eq!(
            read_response(&mut host).unwrap(),
            Response::Status(Status::ChainIdMismatch)
        );
    }

    #[test]
    fn response_unknown_status_rejected() {
        let mut host = Pipe::new(&[0x5A, 0xA5, 0x99]);
        assert_eq!(read_response(&mut host), Err(FrameError::Status(0x99)));
    }

    #[test]
    fn oversize_payload_rejected() {
        let payload = vec![0u8; u16::MAX as usize + 1];
        let mut t = Pipe::new(&[]);
        assert_eq!(write_request(&mut t, &payload), Err(FrameError::Oversize));
        assert_eq!(write_response(&mut t, &payload), Err(FrameError::Oversize));
    }
}
