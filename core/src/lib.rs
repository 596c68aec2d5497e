// Copyright (c) 2024-2025 The Sigil Project Authors

//! Sigil hardware signer engine
//!
//! This provides the transaction pipeline for a restricted signing
//! device: an isolated microcontroller that receives a raw EIP-2930
//! transaction over a serial link, admits it only when it matches a
//! fixed policy (exact destination contract, exact chain id, zero
//! native value, empty access list) and returns the signed encoding.
//! The device signs transactions of exactly one shape and nothing else.
//!
//! ## Pipeline
//!
//! 1. [`frame::read_request`][sigil_wire::frame::read_request] blocks
//!    until a checksum-valid frame arrives (resyncing past line noise)
//! 2. the payload is bounded to
//!    [`MAX_TRANSACTION_LEN`][engine::MAX_TRANSACTION_LEN]
//! 3. the [`Verifier`][engine::Verifier] checks the decoded transaction
//!    against the policy
//! 4. the [`Signer`][engine::Signer] hashes the payload with
//!    [Keccak-256][keccak::keccak256], obtains a recoverable ECDSA
//!    signature and re-encodes the transaction with
//!    `[recoveryParam, r, s]` appended
//! 5. the signed bytes go back as a framed response
//!
//! [`engine::Engine`] orchestrates the cycle over a
//! [`Transport`][sigil_wire::Transport]; [`rlp`] and [`keccak`] are the
//! pure codec and hash underneath. Failures at any step are reported
//! in-band as [`Status`][sigil_wire::Status] codes and never end the
//! service loop.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use sigil_wire as wire;

pub mod engine;

pub mod keccak;

pub mod rlp;
