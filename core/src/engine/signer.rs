// Copyright (c) 2024-2025 The Sigil Project Authors

//! Transaction signing and re-encoding

use alloc::vec;
use alloc::vec::Vec;

use secp256k1::ecdsa::RecoverableSignature;
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey, SignOnly};
use zeroize::Zeroize;

use crate::engine::Error;
use crate::keccak::keccak256;
use crate::rlp::{self, Node};

/// Width of each signature component on the wire
const COMPONENT_LEN: usize = 32;

/// Transaction signer
///
/// Holds the secp256k1 secret key and a signing-only context. Signing
/// trusts the caller: it runs only after the verifier has admitted the
/// transaction, and re-parses the body without re-validating it.
#[derive(Clone)]
pub struct Signer {
    secp: Secp256k1<SignOnly>,
    key: SecretKey,
}

impl Signer {
    /// Create a signer from a raw 32-byte secret key
    ///
    /// The input buffer is wiped once the key has been loaded into the
    /// backing library.
    pub fn new(mut raw: [u8; 32]) -> Result<Self, secp256k1::Error> {
        let key = SecretKey::from_slice(&raw);
        raw.zeroize();

        Ok(Self {
            secp: Secp256k1::signing_only(),
            key: key?,
        })
    }

    /// EVM address of the held key
    ///
    /// Keccak-256 over the uncompressed public key without its `0x04`
    /// tag, last 20 bytes.
    pub fn address(&self) -> [u8; 20] {
        let public = PublicKey::from_secret_key(&self.secp, &self.key);
        let hash = keccak256(&public.serialize_uncompressed()[1..]);

        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);
        address
    }

    /// Sign a verified transaction and return the signed encoding
    ///
    /// Hashes the entire input (type byte included) with Keccak-256,
    /// obtains a recoverable signature, appends
    /// `[recoveryParam, r, s]` to the decoded field list and re-encodes
    /// it behind the original type byte.
    pub fn sign(&self, transaction: &[u8]) -> Result<Vec<u8>, Error> {
        let digest = keccak256(transaction);
        let message = Message::from_digest(digest);
        let signature = self.secp.sign_ecdsa_recoverable(&message, &self.key);

        let (type_byte, body) = transaction.split_first().ok_or(Error::RlpDecodeFailed)?;
        let (root, _) = rlp::decode(body)?;
        let mut fields = match root {
            Node::List(fields) => fields,
            Node::Bytes(_) => return Err(Error::RlpInvalid),
        };

        let (recovery_param, r, s) = serialize(&signature);
        fields.push(Node::Bytes(recovery_param));
        fields.push(Node::Bytes(r));
        fields.push(Node::Bytes(s));

        let encoded = rlp::encode(&Node::List(fields));
        let mut signed = Vec::with_capacity(1 + encoded.len());
        signed.push(*type_byte);
        signed.extend_from_slice(&encoded);

        Ok(signed)
    }
}

/// Split a recoverable signature into its wire encodings
///
/// `r` and `s` stay at their full 32-byte big-endian width; the
/// recovery parameter takes the canonical minimal integer form, an
/// empty byte string for zero or `[1]` otherwise.
fn serialize(signature: &RecoverableSignature) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let (recovery, compact) = signature.serialize_compact();

    let recovery_param = if recovery.to_i32() == 0 {
        Vec::new()
    } else {
        vec![1]
    };

    (
        recovery_param,
        compact[..COMPONENT_LEN].to_vec(),
        compact[COMPONENT_LEN..].to_vec(),
    )
}
