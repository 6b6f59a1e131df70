use crate::bytes::{Bytes32, concat_sorted};
use crate::error::MerkleTreeError;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

#[must_use]
pub fn keccak256(data: &[u8]) -> Bytes32 {
    Keccak256::digest(data).into()
}

#[must_use]
pub fn sha256(data: &[u8]) -> Bytes32 {
    Sha256::digest(data).into()
}

/// Digest used for both leaves and internal nodes.
///
/// `Keccak256` matches what an EVM airdrop contract recomputes on-chain.
/// `Sha256` reproduces roots from generators that hashed with SHA-256; such
/// roots only verify against a verifier that also uses SHA-256.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Keccak256,
    Sha256,
}

impl HashAlgorithm {
    #[must_use]
    pub fn digest(self, data: &[u8]) -> Bytes32 {
        match self {
            HashAlgorithm::Keccak256 => keccak256(data),
            HashAlgorithm::Sha256 => sha256(data),
        }
    }

    /// Parent of two nodes: the digest of the pair, smaller node first.
    #[must_use]
    pub fn node_hash(self, a: &Bytes32, b: &Bytes32) -> Bytes32 {
        self.digest(&concat_sorted(a, b))
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Keccak256 => "keccak256",
            HashAlgorithm::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = MerkleTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keccak256" | "keccak" => Ok(HashAlgorithm::Keccak256),
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            other => Err(MerkleTreeError::UnknownHashAlgorithm(other.to_string())),
        }
    }
}
