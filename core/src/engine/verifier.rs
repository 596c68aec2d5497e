// Copyright (c) 2024-2025 The Sigil Project Authors

//! Transaction admission policy

use alloc::vec::Vec;

use crate::engine::{Error, EIP2930_TX_TYPE};
use crate::rlp;

/// Unsigned EIP-2930 field count:
/// `[chainId, nonce, gasPrice, gasLimit, to, value, data, accessList]`
const FIELD_COUNT: usize = 8;

/// Admission policy for inbound transactions
///
/// Holds the byte-exact policy configuration, set once at startup. A
/// transaction is admitted only when it is a well-formed EIP-2930
/// payload whose chain id and destination equal the policy exactly,
/// carries zero native value and declares no access list. Nonce, gas
/// and calldata are deliberately unconstrained.
#[derive(Clone, Debug)]
pub struct Verifier {
    contract_address: Vec<u8>,
    chain_id: Vec<u8>,
}

impl Verifier {
    /// Create a verifier from raw policy bytes
    pub fn new(contract_address: Vec<u8>, chain_id: Vec<u8>) -> Self {
        Self {
            contract_address,
            chain_id,
        }
    }

    /// Check one transaction against the policy
    ///
    /// Short-circuits on the first failure; the returned [`Error`]
    /// identifies exactly which check refused the transaction.
    pub fn verify(&self, transaction: &[u8]) -> Result<(), Error> {
        if transaction.first() != Some(&EIP2930_TX_TYPE) {
            return Err(Error::NotEip2930);
        }

        let body = &transaction[1..];
        let (root, taken) = rlp::decode(body).map_err(|_| Error::RlpDecodeFailed)?;

        // Trailing bytes after the root list are rejected
        if taken != body.len() {
            return Err(Error::RlpDecodeFailed);
        }

        let fields = root.as_list().ok_or(Error::RlpInvalid)?;
        if fields.len() != FIELD_COUNT {
            return Err(Error::RlpInvalid);
        }

        // chain id
        let chain_id = fields[0].as_bytes().ok_or(Error::RlpInvalid)?;
        if chain_id != self.chain_id.as_slice() {
            return Err(Error::ChainIdMismatch);
        }

        // destination
        let to = fields[4].as_bytes().ok_or(Error::RlpInvalid)?;
        if to != self.contract_address.as_slice() {
            return Err(Error::ContractAddressMismatch);
        }

        // native value, integer zero is the empty byte string
        let value = fields[5].as_bytes().ok_or(Error::RlpInvalid)?;
        if !value.is_empty() {
            return Err(Error::ValueNotZero);
        }

        // access list
        let access_list = fields[7].as_list().ok_or(Error::RlpInvalid)?;
        if !access_list.is_empty() {
            return Err(Error::AccessListNotEmpty);
        }

        Ok(())
    }
}
