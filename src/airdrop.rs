use crate::bytes::{Bytes32, HexString, ToBytes32, bytes32_to_hex};
use crate::core::{
    Level, build_levels, get_proof, is_valid_merkle_tree, process_proof, render_merkle_tree,
};
use crate::error::{MerkleTreeError, Result, invariant};
use crate::hashes::HashAlgorithm;
use crate::options::MerkleTreeOptions;
use crate::recipient::{Recipient, RecipientInput};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Result of one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTreeData {
    pub root: Bytes32,
    /// Leaf hashes in ascending byte order.
    pub leaves: Vec<Bytes32>,
    /// Recipients in the order they were supplied.
    pub recipients: Vec<Recipient>,
    pub total_amount: BigUint,
    pub hash: HashAlgorithm,
}

/// Serialized shape of [`MerkleTreeData`]: hex hashes, decimal amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerkleTreeDump {
    pub merkle_root: HexString,
    pub leaves: Vec<HexString>,
    pub recipients: Vec<RecipientInput>,
    pub total_amount: String,
    #[serde(default)]
    pub hash: HashAlgorithm,
}

/// Everything a claimant submits to the airdrop contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimProof {
    pub address: String,
    pub amount: String,
    pub leaf: HexString,
    pub proof: Vec<HexString>,
}

impl ClaimProof {
    /// Recomputes the leaf from `address` and `amount` and walks the proof,
    /// the same checks the contract performs.
    pub fn verify(&self, root: &str, hash: HashAlgorithm) -> Result<bool> {
        let recipient = Recipient::parse(&self.address, &self.amount)?;
        let leaf = recipient.leaf(hash);
        if leaf != self.leaf.to_bytes32()? {
            return Ok(false);
        }
        let computed = process_proof(&leaf, &self.proof, hash)?;
        Ok(computed == root.to_bytes32()?)
    }
}

fn sum_amounts(recipients: &[Recipient]) -> BigUint {
    recipients
        .iter()
        .map(|r| BigUint::from_bytes_be(&r.amount().to_be_bytes::<32>()))
        .sum()
}

/// Validates every input in order, stopping at the first bad one.
pub fn validate_recipients(inputs: &[RecipientInput]) -> Result<Vec<Recipient>> {
    if inputs.is_empty() {
        return Err(MerkleTreeError::EmptyRecipients);
    }
    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            input.validate().map_err(|e| {
                warn!(
                    index,
                    address = %input.address,
                    amount = %input.amount,
                    error = %e,
                    "rejected recipient"
                );
                e.for_recipient(index, &input.address, &input.amount)
            })
        })
        .collect()
}

/// Validates `inputs`, hashes them into leaves and reduces them to a root.
///
/// Nothing is hashed unless every recipient is valid.
pub fn generate_merkle_tree(
    inputs: &[RecipientInput],
    options: MerkleTreeOptions,
) -> Result<MerkleTreeData> {
    let recipients = validate_recipients(inputs)?;
    Ok(AirdropMerkleTree::of(recipients, options)?.into_data())
}

pub struct AirdropMerkleTree {
    levels: Vec<Level>,
    recipients: Vec<Recipient>,
    /// Position of each recipient's leaf in the sorted leaf level.
    leaf_positions: Vec<usize>,
    hash_lookup: HashMap<Bytes32, usize>,
    total_amount: BigUint,
    hash: HashAlgorithm,
}

impl AirdropMerkleTree {
    pub fn of(recipients: Vec<Recipient>, options: MerkleTreeOptions) -> Result<Self> {
        if recipients.is_empty() {
            return Err(MerkleTreeError::EmptyRecipients);
        }
        let hash = options.hash;

        let mut hashed: Vec<(usize, Bytes32)> = recipients
            .iter()
            .enumerate()
            .map(|(i, r)| (i, r.leaf(hash)))
            .collect();
        hashed.sort_by(|a, b| a.1.cmp(&b.1));

        let leaves: Vec<Bytes32> = hashed.iter().map(|(_, leaf)| *leaf).collect();
        let levels = build_levels(&leaves, hash)?;

        let mut leaf_positions = vec![0; recipients.len()];
        for (position, (value_index, _)) in hashed.iter().enumerate() {
            leaf_positions[*value_index] = position;
        }
        let hash_lookup = recipients
            .iter()
            .enumerate()
            .map(|(i, r)| (r.leaf(hash), i))
            .collect();
        let total_amount = sum_amounts(&recipients);

        let tree = Self {
            levels,
            recipients,
            leaf_positions,
            hash_lookup,
            total_amount,
            hash,
        };
        debug!(
            recipients = tree.len(),
            depth = tree.levels.len() - 1,
            root = %tree.root_hex(),
            total = %tree.total_amount,
            %hash,
            "built airdrop merkle tree"
        );
        Ok(tree)
    }

    pub fn from_inputs(inputs: &[RecipientInput], options: MerkleTreeOptions) -> Result<Self> {
        Self::of(validate_recipients(inputs)?, options)
    }

    /// Rebuilds a tree from a dump, rejecting it unless its root, leaves and
    /// total all match what the recipients produce.
    pub fn load(dump: &MerkleTreeDump) -> Result<Self> {
        let options = MerkleTreeOptions::new().with_hash(dump.hash);
        let tree = Self::from_inputs(&dump.recipients, options)?;

        let root_matches = dump.merkle_root.to_bytes32()? == tree.root();
        if !root_matches {
            warn!(expected = %dump.merkle_root, actual = %tree.root_hex(), "dump root mismatch");
        }
        invariant(root_matches, "Merkle root does not match recipients")?;

        let leaves = dump
            .leaves
            .iter()
            .map(ToBytes32::to_bytes32)
            .collect::<Result<Vec<_>>>()?;
        invariant(leaves == tree.levels[0], "Leaves do not match recipients")?;

        let total_matches = dump
            .total_amount
            .trim()
            .parse::<BigUint>()
            .is_ok_and(|total| total == tree.total_amount);
        invariant(total_matches, "Total amount does not match recipients")?;

        Ok(tree)
    }

    pub fn root(&self) -> Bytes32 {
        // levels always holds at least the leaf level
        self.levels[self.levels.len() - 1][0]
    }

    pub fn root_hex(&self) -> HexString {
        bytes32_to_hex(&self.root())
    }

    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn at(&self, index: usize) -> Option<&Recipient> {
        self.recipients.get(index)
    }

    pub fn entries(&self) -> impl Iterator<Item = (usize, &Recipient)> {
        self.recipients.iter().enumerate()
    }

    pub fn leaves(&self) -> &[Bytes32] {
        &self.levels[0]
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn total_amount(&self) -> &BigUint {
        &self.total_amount
    }

    pub fn data(&self) -> MerkleTreeData {
        MerkleTreeData {
            root: self.root(),
            leaves: self.levels[0].clone(),
            recipients: self.recipients.clone(),
            total_amount: self.total_amount.clone(),
            hash: self.hash,
        }
    }

    pub fn into_data(mut self) -> MerkleTreeData {
        let root = self.root();
        MerkleTreeData {
            root,
            leaves: self.levels.swap_remove(0),
            recipients: self.recipients,
            total_amount: self.total_amount,
            hash: self.hash,
        }
    }

    pub fn dump(&self) -> MerkleTreeDump {
        self.data().dump()
    }

    pub fn render(&self) -> Result<String> {
        render_merkle_tree(&self.levels)
    }

    pub fn validate(&self) -> Result<()> {
        for (i, recipient) in self.recipients.iter().enumerate() {
            let stored = self.levels[0][self.leaf_positions[i]];
            invariant(
                recipient.leaf(self.hash) == stored,
                "Merkle tree does not contain the expected recipient",
            )?;
        }
        invariant(
            is_valid_merkle_tree(&self.levels, self.hash),
            "Merkle tree is invalid",
        )
    }

    pub fn leaf_lookup(&self, recipient: &Recipient) -> Result<usize> {
        self.hash_lookup
            .get(&recipient.leaf(self.hash))
            .copied()
            .ok_or(MerkleTreeError::LeafNotInTree)
    }

    pub fn get_proof_by_index(&self, index: usize) -> Result<Vec<Bytes32>> {
        let position = *self
            .leaf_positions
            .get(index)
            .ok_or(MerkleTreeError::IndexOutOfBounds)?;
        let proof = get_proof(&self.levels, position)?;
        invariant(
            self.verify_proof(&self.recipients[index], &proof),
            "Unable to prove recipient",
        )?;
        Ok(proof)
    }

    pub fn get_proof(&self, recipient: &Recipient) -> Result<Vec<Bytes32>> {
        self.get_proof_by_index(self.leaf_lookup(recipient)?)
    }

    pub fn verify_proof(&self, recipient: &Recipient, proof: &[Bytes32]) -> bool {
        crate::core::verify_proof(proof, &self.root(), &recipient.leaf(self.hash), self.hash)
    }

    pub fn claim_proof(&self, index: usize) -> Result<ClaimProof> {
        let proof = self.get_proof_by_index(index)?;
        let recipient = &self.recipients[index];
        Ok(ClaimProof {
            address: recipient.address_hex(),
            amount: recipient.amount().to_string(),
            leaf: bytes32_to_hex(&recipient.leaf(self.hash)),
            proof: proof.iter().map(bytes32_to_hex).collect(),
        })
    }

    pub fn claim_proofs(&self) -> Result<Vec<ClaimProof>> {
        (0..self.len()).map(|i| self.claim_proof(i)).collect()
    }
}

impl MerkleTreeData {
    pub fn merkle_root(&self) -> HexString {
        bytes32_to_hex(&self.root)
    }

    pub fn dump(&self) -> MerkleTreeDump {
        MerkleTreeDump {
            merkle_root: self.merkle_root(),
            leaves: self.leaves.iter().map(bytes32_to_hex).collect(),
            recipients: self.recipients.iter().map(Recipient::to_input).collect(),
            total_amount: self.total_amount.to_string(),
            hash: self.hash,
        }
    }

    pub fn load(dump: &MerkleTreeDump) -> Result<Self> {
        Ok(AirdropMerkleTree::load(dump)?.into_data())
    }

    /// Rebuilds the full tree, e.g. to hand out proofs for a stored root.
    pub fn to_tree(&self) -> Result<AirdropMerkleTree> {
        let tree = AirdropMerkleTree::of(
            self.recipients.clone(),
            MerkleTreeOptions::new().with_hash(self.hash),
        )?;
        invariant(tree.root() == self.root, "Merkle root does not match recipients")?;
        Ok(tree)
    }
}
