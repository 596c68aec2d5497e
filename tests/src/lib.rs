// Copyright (c) 2024-2025 The Sigil Project Authors

//! Shared fixtures and harness helpers for Sigil test suites
//!
//! Provides the development key and policy every suite signs against, a
//! captured in-policy transaction, a scripted in-memory [`Transport`]
//! and the signed-transaction assertions used by both the engine and
//! host loopback tests.

use hex_literal::hex;

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{All, Message, Secp256k1};

use sigil_core::engine::{Signer, Verifier, EIP2930_TX_TYPE};
use sigil_core::keccak::keccak256;
use sigil_core::rlp::{self, Node};
use sigil_wire::{FrameError, Transport};

/// Signing key for test devices (a well-known development account)
pub const KEY: [u8; 32] = hex!("ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80");

/// EVM address of [`KEY`]
pub const ADDRESS: [u8; 20] = hex!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");

/// Policy contract every fixture targets
pub const CONTRACT: [u8; 20] = hex!("a7f1b7b98ee6704afb743a0e38c282ca9b850e82");

/// Policy chain id
pub const CHAIN_ID: [u8; 2] = hex!("2105");

/// In-policy transaction captured from a production host driver
pub const CAPTURED_TX: [u8; 139] = hex!(
    "01f88882210504835c84a0825f8d94a7f1b7b98ee6704afb743a0e38c282ca9b85"
    "0e8280b864ec01413d0000000000000000000000000000000000000000000000"
    "0000000000000000200000000000000000000000000000000000000000000000"
    "0000000000000000053132333435000000000000000000000000000000000000"
    "000000000000000000c0"
);

/// Verifier configured with the fixture policy
pub fn verifier() -> Verifier {
    Verifier::new(CONTRACT.to_vec(), CHAIN_ID.to_vec())
}

/// Signer over [`KEY`]
pub fn signer() -> Signer {
    Signer::new(KEY).expect("fixture key is valid")
}

/// Unsigned in-policy field list, free fields filled with small values
pub fn policy_fields() -> Vec<Node> {
    vec![
        Node::Bytes(CHAIN_ID.to_vec()),
        Node::Bytes(vec![0x04]),
        Node::Bytes(hex!("5c84a0").to_vec()),
        Node::Bytes(hex!("5f8d").to_vec()),
        Node::Bytes(CONTRACT.to_vec()),
        Node::Bytes(vec![]),
        Node::Bytes(hex!("ec01413d").to_vec()),
        Node::List(vec![]),
    ]
}

/// Assemble a typed transaction from a field list
pub fn build_transaction(fields: Vec<Node>) -> Vec<u8> {
    let mut tx = vec![EIP2930_TX_TYPE];
    tx.extend_from_slice(&rlp::encode(&Node::List(fields)));
    tx
}

/// Scripted in-memory link
///
/// Reads drain the request script handed to [`new`][ScriptedLink::new];
/// writes gather in [`sent`][ScriptedLink::sent]. Reading past the end
/// of the script fails like a closed transport.
pub struct ScriptedLink {
    script: Vec<u8>,
    pos: usize,
    sent: Vec<u8>,
}

impl ScriptedLink {
    /// Link that will replay `script` to the reader
    pub fn new(script: &[u8]) -> Self {
        Self {
            script: script.to_vec(),
            pos: 0,
            sent: Vec::new(),
        }
    }

    /// Everything written to the link so far
    pub fn sent(&self) -> &[u8] {
        &self.sent
    }
}

impl Transport for ScriptedLink {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), FrameError> {
        if self.pos + buf.len() > self.script.len() {
            return Err(FrameError::Transport);
        }
        buf.copy_from_slice(&self.script[self.pos..self.pos + buf.len()]);
        self.pos += buf.len();
        Ok(())
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<(), FrameError> {
        self.sent.extend_from_slice(buf);
        Ok(())
    }
}

/// Check a signed transaction against its unsigned source
///
/// Asserts the signed encoding is the original eight fields plus a
/// well-formed `[recoveryParam, r, s]` tail, and that the signature
/// recovers to [`ADDRESS`] over the Keccak-256 digest of the unsigned
/// input.
pub fn assert_signed(signed: &[u8], unsigned: &[u8]) {
    assert_eq!(signed[0], EIP2930_TX_TYPE, "type byte");

    let (root, taken) = rlp::decode(&signed[1..]).expect("signed body decodes");
    assert_eq!(taken, signed.len() - 1, "signed body has trailing bytes");

    let fields = root.as_list().expect("signed body is a list");
    assert_eq!(fields.len(), 11, "signed field count");

    let (original, _) = rlp::decode(&unsigned[1..]).expect("unsigned body decodes");
    assert_eq!(
        &fields[..8],
        &original.as_list().expect("unsigned body is a list")[..8],
        "original fields altered"
    );

    let recovery = match fields[8].as_bytes().expect("recovery param is bytes") {
        [] => 0,
        [1] => 1,
        other => panic!("malformed recovery param {other:02x?}"),
    };

    let r = fields[9].as_bytes().expect("r is bytes");
    let s = fields[10].as_bytes().expect("s is bytes");
    assert_eq!(r.len(), 32, "r width");
    assert_eq!(s.len(), 32, "s width");

    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(r);
    compact[32..].copy_from_slice(s);

    let signature =
        RecoverableSignature::from_compact(&compact, RecoveryId::from_i32(recovery).unwrap())
            .expect("signature parses");

    let secp = Secp256k1::<All>::new();
    let message = Message::from_digest(keccak256(unsigned));
    let public = secp
        .recover_ecdsa(&message, &signature)
        .expect("public key recovers");

    let hash = keccak256(&public.serialize_uncompressed()[1..]);
    assert_eq!(&hash[12..], ADDRESS, "recovered signer address");
}
