// Copyright (c) 2024-2025 The Sigil Project Authors

//! Byte transport abstraction for framed exchanges

use crate::FrameError;

/// Reliable, in-order byte transport
///
/// Reads block until the buffer is filled. Implementations may enforce
/// a read deadline and report [`FrameError::Timeout`] instead of
/// blocking forever; the device default for a dedicated link is to
/// block indefinitely.
pub trait Transport {
    /// Read exactly `buf.len()` bytes
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), FrameError>;

    /// Write all of `buf`
    fn write_all(&mut self, buf: &[u8]) -> Result<(), FrameError>;
}

impl<T: Transport> Transport for &mut T {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), FrameError> {
        T::read_exact(self, buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<(), FrameError> {
        T::write_all(self, buf)
    }
}

/// [`Transport`] adapter over any [`std::io`] stream
///
/// Deadlines configured on the underlying stream (for example
/// [`std::net::TcpStream::set_read_timeout`]) surface as
/// [`FrameError::Timeout`].
#[cfg(feature = "std")]
pub struct IoTransport<T>(pub T);

#[cfg(feature = "std")]
impl<T: std::io::Read + std::io::Write> Transport for IoTransport<T> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), FrameError> {
        self.0.read_exact(buf).map_err(|e| match e.kind() {
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => FrameError::Timeout,
            _ => FrameError::Transport,
        })
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<(), FrameError> {
        self.0.write_all(buf).map_err(|_| FrameError::Transport)
    }
}
