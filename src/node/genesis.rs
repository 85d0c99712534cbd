//! Genesis block assembly and self-test
//!
//! The genesis fields are historical constants. Assembling the block from
//! them and hashing it must reproduce the published hash exactly, so the
//! host engine runs `verify_genesis` at startup before trusting anything
//! else from the coin.

use tracing::{error, info};

use crate::coin::CoinDefinition;
use crate::consensus::{check_proof_of_work, BlockHeader};
use crate::constants::COIN;
use crate::crypto::{compute_merkle_root, double_sha256, Hash};
use crate::error::{GenesisIntegrityError, Result};
use crate::network::NetworkId;

/// Genesis block version
const GENESIS_VERSION: u32 = 1;

/// Fixed genesis descriptor for one network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenesisBlockInfo {
    /// Coinbase input script (hex)
    pub tx_in_script: &'static str,
    /// Coinbase output script (hex)
    pub tx_out_script: &'static str,
    /// Coinbase value in whole coins
    pub value: u64,
    /// Compact difficulty target
    pub bits: u32,
    pub time: u32,
    pub nonce: u32,
    /// Expected merkle root (display hex)
    pub merkle_root: &'static str,
    /// Expected block hash (display hex)
    pub hash: &'static str,
}

/// Assembled genesis block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisBlock {
    pub header: BlockHeader,
    /// Serialized coinbase transaction
    pub coinbase: Vec<u8>,
}

impl GenesisBlock {
    pub fn coinbase_txid(&self) -> Hash {
        double_sha256(&self.coinbase)
    }
}

fn write_compact_size(out: &mut Vec<u8>, len: usize) {
    match len {
        0..=0xfc => out.push(len as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(len as u16).to_le_bytes());
        }
        _ => {
            out.push(0xfe);
            out.extend_from_slice(&(len as u32).to_le_bytes());
        }
    }
}

fn decode_field(
    hex: &str,
    field: &'static str,
    coin: &str,
    network: NetworkId,
) -> std::result::Result<Vec<u8>, GenesisIntegrityError> {
    hex::decode(hex).map_err(|_| GenesisIntegrityError::MalformedField {
        coin: coin.to_string(),
        network: network.to_string(),
        field,
    })
}

fn decode_hash(
    hex: &str,
    field: &'static str,
    coin: &str,
    network: NetworkId,
) -> std::result::Result<Hash, GenesisIntegrityError> {
    Hash::from_hex(hex).map_err(|_| GenesisIntegrityError::MalformedField {
        coin: coin.to_string(),
        network: network.to_string(),
        field,
    })
}

/// Serialize the genesis coinbase transaction
pub fn coinbase_transaction(
    info: &GenesisBlockInfo,
    coin: &str,
    network: NetworkId,
) -> std::result::Result<Vec<u8>, GenesisIntegrityError> {
    let script_sig = decode_field(info.tx_in_script, "tx_in_script", coin, network)?;
    let script_pubkey = decode_field(info.tx_out_script, "tx_out_script", coin, network)?;

    let mut tx = Vec::with_capacity(64 + script_sig.len() + script_pubkey.len());
    tx.extend_from_slice(&1u32.to_le_bytes());
    write_compact_size(&mut tx, 1);
    // Null outpoint
    tx.extend_from_slice(&[0u8; 32]);
    tx.extend_from_slice(&u32::MAX.to_le_bytes());
    write_compact_size(&mut tx, script_sig.len());
    tx.extend_from_slice(&script_sig);
    tx.extend_from_slice(&u32::MAX.to_le_bytes());
    write_compact_size(&mut tx, 1);
    tx.extend_from_slice(&(info.value * COIN).to_le_bytes());
    write_compact_size(&mut tx, script_pubkey.len());
    tx.extend_from_slice(&script_pubkey);
    // Lock time
    tx.extend_from_slice(&0u32.to_le_bytes());
    Ok(tx)
}

/// Build the genesis block from its descriptor
///
/// The merkle root in the header is computed from the coinbase, not copied
/// from the descriptor.
pub fn assemble_genesis_block(
    info: &GenesisBlockInfo,
    coin: &str,
    network: NetworkId,
) -> std::result::Result<GenesisBlock, GenesisIntegrityError> {
    let coinbase = coinbase_transaction(info, coin, network)?;
    let merkle_root = compute_merkle_root(&[double_sha256(&coinbase)]);
    let header = BlockHeader::new(
        GENESIS_VERSION,
        Hash::zero(), // No previous block
        merkle_root,
        info.time,
        info.bits,
        info.nonce,
    );
    Ok(GenesisBlock { header, coinbase })
}

/// Startup self-test: the assembled genesis block must reproduce the
/// published merkle root and hash and satisfy its own proof of work.
pub fn verify_genesis(coin: &dyn CoinDefinition, network: NetworkId) -> Result<GenesisBlock> {
    let name = coin.name();
    let info = coin.genesis_block_info(network)?;
    let block = assemble_genesis_block(&info, name, network)?;

    let expected_root = decode_hash(info.merkle_root, "merkle_root", name, network)?;
    if block.header.merkle_root != expected_root {
        error!(coin = name, %network, "genesis merkle root mismatch");
        return Err(GenesisIntegrityError::MerkleRoot {
            coin: name.to_string(),
            network: network.to_string(),
            expected: expected_root.to_hex(),
            actual: block.header.merkle_root.to_hex(),
        }
        .into());
    }

    let hasher = coin.block_hasher();
    let expected_hash = decode_hash(info.hash, "hash", name, network)?;
    let actual_hash = hasher.identity_hash(&block.header.to_bytes());
    if actual_hash != expected_hash {
        error!(coin = name, %network, "genesis hash mismatch");
        return Err(GenesisIntegrityError::BlockHash {
            coin: name.to_string(),
            network: network.to_string(),
            expected: expected_hash.to_hex(),
            actual: actual_hash.to_hex(),
        }
        .into());
    }

    let limit = coin.consensus_parameters(network)?.max_target;
    check_proof_of_work(hasher, &block.header, limit).map_err(|e| {
        GenesisIntegrityError::ProofOfWork {
            coin: name.to_string(),
            network: network.to_string(),
            reason: e.to_string(),
        }
    })?;

    info!(coin = name, %network, hash = %actual_hash, "genesis block verified");
    Ok(block)
}
