//! # airdrop-merkle
//!
//! Merkle commitments for token airdrops. A list of `(address, amount)`
//! recipients is reduced to a single root that an airdrop contract stores at
//! deployment and later checks claims against.
//!
//! ## Rules
//!
//! - **Leaves**: `hash(address ‖ uint256 amount)`, the `abi.encodePacked` layout
//! - **Canonical order**: leaves are sorted byte-wise before the tree is built,
//!   so the root does not depend on input order
//! - **Pairing**: each parent hashes its two children smaller-first; an odd
//!   node at the end of a level is paired with itself
//! - **Hash**: keccak256 by default, sha256 on request (see [`HashAlgorithm`])
//!
//! ## Example
//!
//! ```rust
//! use airdrop_merkle::{MerkleTreeOptions, RecipientInput, generate_merkle_tree};
//!
//! let recipients = vec![
//!     RecipientInput::new("0x742d35cc6634c0532925a3b8d4c9db96c4b4bee0", "1000000000000000000"),
//!     RecipientInput::new("0x8ba1f109551bd432803012645ac136ddd64d925d", "500000000000000000"),
//! ];
//! let data = generate_merkle_tree(&recipients, MerkleTreeOptions::default()).unwrap();
//!
//! assert_eq!(data.total_amount.to_string(), "1500000000000000000");
//! assert_eq!(data.leaves.len(), 2);
//! ```

#![deny(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod airdrop;
pub mod bytes;
pub mod core;
pub mod error;
pub mod hashes;
pub mod options;
pub mod parse;
pub mod recipient;

pub use airdrop::{
    AirdropMerkleTree, ClaimProof, MerkleTreeData, MerkleTreeDump, generate_merkle_tree,
    validate_recipients,
};
pub use bytes::{Bytes32, HexString, ToBytes32, bytes32_to_hex, hex_to_bytes32};
pub use crate::core::{build_levels, build_root, get_proof, process_proof, verify_proof};
pub use error::{MerkleTreeError, Result};
pub use hashes::{HashAlgorithm, keccak256, sha256};
pub use options::MerkleTreeOptions;
pub use parse::{example_recipients, parse_recipients};
pub use recipient::{Recipient, RecipientInput, encode_leaf};
