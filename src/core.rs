//! Level-based Merkle tree construction and proof walking.
//!
//! Level 0 holds the leaves in ascending byte order and every following level
//! halves the one below it (rounded up). When a level has an odd length its
//! last node is paired with itself. Parents always hash the smaller child
//! first, so a proof is just the list of siblings with no left/right flags.

use crate::bytes::{Bytes32, ToBytes32, bytes32_to_hex};
use crate::error::{MerkleTreeError, Result, validate_argument};
use crate::hashes::HashAlgorithm;

pub type Level = Vec<Bytes32>;

#[inline]
fn sibling_index(level_len: usize, i: usize) -> usize {
    if i % 2 == 1 {
        i - 1
    } else if i + 1 < level_len {
        i + 1
    } else {
        i
    }
}

fn next_level(level: &[Bytes32], hash: HashAlgorithm) -> Level {
    level
        .chunks(2)
        .map(|pair| {
            let left = &pair[0];
            let right = pair.get(1).unwrap_or(left);
            hash.node_hash(left, right)
        })
        .collect()
}

/// Number of reduction steps for `leaf_count` leaves, `⌈log2 n⌉`.
#[must_use]
pub fn tree_depth(leaf_count: usize) -> usize {
    if leaf_count <= 1 {
        0
    } else {
        (usize::BITS - (leaf_count - 1).leading_zeros()) as usize
    }
}

/// Builds every level from the given leaves, sorting them first.
pub fn build_levels(leaves: &[Bytes32], hash: HashAlgorithm) -> Result<Vec<Level>> {
    if leaves.is_empty() {
        return Err(MerkleTreeError::EmptyInput);
    }

    let mut sorted = leaves.to_vec();
    sorted.sort_unstable();

    let mut levels = Vec::with_capacity(tree_depth(sorted.len()) + 1);
    levels.push(sorted);
    while let Some(top) = levels.last().filter(|level| level.len() > 1) {
        let parent = next_level(top, hash);
        levels.push(parent);
    }

    Ok(levels)
}

pub fn build_root(leaves: &[Bytes32], hash: HashAlgorithm) -> Result<Bytes32> {
    let levels = build_levels(leaves, hash)?;
    root_of(&levels)
}

pub(crate) fn root_of(levels: &[Level]) -> Result<Bytes32> {
    levels
        .last()
        .and_then(|top| top.first())
        .copied()
        .ok_or(MerkleTreeError::EmptyInput)
}

/// Sibling hashes from the leaf at `leaf_index` (position in sorted level 0)
/// up to, but excluding, the root.
pub fn get_proof(levels: &[Level], leaf_index: usize) -> Result<Vec<Bytes32>> {
    let leaves = levels.first().ok_or(MerkleTreeError::EmptyInput)?;
    if leaf_index >= leaves.len() {
        return Err(MerkleTreeError::IndexOutOfBounds);
    }

    let mut proof = Vec::with_capacity(levels.len().saturating_sub(1));
    let mut idx = leaf_index;
    for level in &levels[..levels.len() - 1] {
        proof.push(level[sibling_index(level.len(), idx)]);
        idx /= 2;
    }

    Ok(proof)
}

/// Folds `proof` over `leaf` and returns the resulting root.
pub fn process_proof<L: ToBytes32, P: ToBytes32>(
    leaf: &L,
    proof: &[P],
    hash: HashAlgorithm,
) -> Result<Bytes32> {
    let mut current = leaf.to_bytes32()?;
    for sibling in proof {
        current = hash.node_hash(&current, &sibling.to_bytes32()?);
    }
    Ok(current)
}

#[must_use]
pub fn verify_proof(
    proof: &[Bytes32],
    root: &Bytes32,
    leaf: &Bytes32,
    hash: HashAlgorithm,
) -> bool {
    let computed = proof
        .iter()
        .fold(*leaf, |current, sibling| hash.node_hash(&current, sibling));
    &computed == root
}

/// Checks that `levels` is a well-formed reduction of its own first level.
#[must_use]
pub fn is_valid_merkle_tree(levels: &[Level], hash: HashAlgorithm) -> bool {
    let Some(leaves) = levels.first() else {
        return false;
    };
    if leaves.is_empty() || !leaves.is_sorted() {
        return false;
    }
    if levels.len() != tree_depth(leaves.len()) + 1 {
        return false;
    }
    if levels.last().map(Vec::len) != Some(1) {
        return false;
    }

    levels
        .windows(2)
        .all(|pair| next_level(&pair[0], hash) == pair[1])
}

pub fn render_merkle_tree(levels: &[Level]) -> Result<String> {
    validate_argument(!levels.is_empty(), "Expected non-zero number of levels")?;

    let top = levels.len() - 1;
    let mut lines = Vec::new();
    for (depth, level) in levels.iter().enumerate().rev() {
        let label = match depth {
            0 => "leaves".to_string(),
            d if d == top => "root".to_string(),
            d => format!("level {d}"),
        };
        lines.push(format!("{label} ({})", level.len()));
        let last = level.len().saturating_sub(1);
        for (i, node) in level.iter().enumerate() {
            let branch = if i == last { "└─" } else { "├─" };
            lines.push(format!("  {branch} {i}) {}", bytes32_to_hex(node)));
        }
    }

    Ok(lines.join("\n"))
}
