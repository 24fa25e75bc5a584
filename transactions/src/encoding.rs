//! Canonical RLP layout of a transaction.
//!
//! The signing pre-image is the nine-field list
//! `[nonce, chain_id, gas_price, gas_coin, type, data, payload, service_data,
//! signature_type]`. The wire form appends the signature data as a tenth
//! field. Byte-string fields are length-prefixed strings, integers are
//! minimal big-endian.

use alloy_rlp::{Bytes, RlpEncodable};

use crate::Transaction;

#[derive(RlpEncodable)]
struct SigningPayload {
    nonce: u64,
    chain_id: u8,
    gas_price: u32,
    gas_coin: [u8; 10],
    tx_type: u8,
    data: Bytes,
    payload: Bytes,
    service_data: Bytes,
    signature_type: u8,
}

#[derive(RlpEncodable)]
struct WireTransaction {
    nonce: u64,
    chain_id: u8,
    gas_price: u32,
    gas_coin: [u8; 10],
    tx_type: u8,
    data: Bytes,
    payload: Bytes,
    service_data: Bytes,
    signature_type: u8,
    signature_data: Bytes,
}

/// Bytes whose Keccak-256 hash is signed.
pub fn signing_payload(tx: &Transaction) -> Vec<u8> {
    alloy_rlp::encode(SigningPayload {
        nonce: tx.nonce,
        chain_id: tx.chain_id.as_u8(),
        gas_price: tx.gas_price,
        gas_coin: *tx.gas_coin.as_bytes(),
        tx_type: tx.tx_type() as u8,
        data: Bytes::from(tx.data.encode()),
        payload: Bytes::copy_from_slice(&tx.payload),
        service_data: Bytes::copy_from_slice(&tx.service_data),
        signature_type: tx.signature_type as u8,
    })
}

/// Full wire encoding with the given signature data appended.
pub fn wire_encoding(tx: &Transaction, signature_data: Vec<u8>) -> Vec<u8> {
    alloy_rlp::encode(WireTransaction {
        nonce: tx.nonce,
        chain_id: tx.chain_id.as_u8(),
        gas_price: tx.gas_price,
        gas_coin: *tx.gas_coin.as_bytes(),
        tx_type: tx.tx_type() as u8,
        data: Bytes::from(tx.data.encode()),
        payload: Bytes::copy_from_slice(&tx.payload),
        service_data: Bytes::copy_from_slice(&tx.service_data),
        signature_type: tx.signature_type as u8,
        signature_data: Bytes::from(signature_data),
    })
}
