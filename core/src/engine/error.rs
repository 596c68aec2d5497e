// Copyright (c) 2024-2025 The Sigil Project Authors

use sigil_wire::Status;

use crate::rlp;

/// Engine errors
///
/// Every variant maps onto the wire status code reported to the host;
/// the engine never fails out-of-band on a request.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum Error {
    /// Leading type byte is not the EIP-2930 marker
    #[cfg_attr(feature = "std", error("not an EIP-2930 transaction"))]
    NotEip2930,

    /// Transaction body failed to decode, or trailing bytes
    #[cfg_attr(feature = "std", error("RLP decode failed"))]
    RlpDecodeFailed,

    /// Decoded shape invalid (wrong arity or field type)
    #[cfg_attr(feature = "std", error("invalid RLP shape"))]
    RlpInvalid,

    /// Chain id does not match the policy
    #[cfg_attr(feature = "std", error("chain id mismatch"))]
    ChainIdMismatch,

    /// Destination does not match the policy contract
    #[cfg_attr(feature = "std", error("contract address mismatch"))]
    ContractAddressMismatch,

    /// Native value is non-zero
    #[cfg_attr(feature = "std", error("value is not zero"))]
    ValueNotZero,

    /// Access list is non-empty
    #[cfg_attr(feature = "std", error("access list is not empty"))]
    AccessListNotEmpty,
}

impl From<rlp::Error> for Error {
    fn from(_: rlp::Error) -> Self {
        Error::RlpDecodeFailed
    }
}

impl From<Error> for Status {
    fn from(e: Error) -> Self {
        match e {
            Error::NotEip2930 => Status::NotEip2930,
            Error::RlpDecodeFailed => Status::RlpDecodeFailed,
            Error::RlpInvalid => Status::RlpInvalid,
            Error::ChainIdMismatch => Status::ChainIdMismatch,
            Error::ContractAddressMismatch => Status::ContractAddressMismatch,
            Error::ValueNotZero => Status::ValueNotZero,
            Error::AccessListNotEmpty => Status::AccessListNotEmpty,
        }
    }
}
