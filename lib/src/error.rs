// Copyright (c) 2024-2025 The Sigil Project Authors

use sigil_wire::{FrameError, Status};

/// Sigil host API error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Frame exchange failed
    #[error("frame exchange failed: {0}")]
    Frame(#[from] FrameError),

    /// Connection error
    #[error("connection failed: {0}")]
    Io(#[from] std::io::Error),

    /// Device refused the request
    #[error("device reported {0}")]
    Device(Status),

    /// Response did not match the request
    #[error("unexpected device response")]
    UnexpectedResponse,
}
