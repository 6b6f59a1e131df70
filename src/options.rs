use crate::hashes::HashAlgorithm;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MerkleTreeOptions {
    pub hash: HashAlgorithm,
}

impl MerkleTreeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hash(mut self, hash: HashAlgorithm) -> Self {
        self.hash = hash;
        self
    }
}
