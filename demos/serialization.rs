//! Serialization example.
//!
//! Dumps a generated tree to JSON, loads it back and shows that a tampered
//! dump is rejected.
//!
//! Run: `cargo run --example serialization`

use airdrop_merkle::{
    MerkleTreeData, MerkleTreeDump, MerkleTreeOptions, example_recipients, generate_merkle_tree,
};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn main() -> Result<()> {
    let data = generate_merkle_tree(&example_recipients(), MerkleTreeOptions::default())?;
    println!("Original root: {}", data.merkle_root());

    let json_str = serde_json::to_string_pretty(&data.dump())?;
    println!("\nSerialized JSON:\n{}", json_str);

    let dump: MerkleTreeDump = serde_json::from_str(&json_str)?;
    let loaded = MerkleTreeData::load(&dump)?;
    println!("\nLoaded root: {}", loaded.merkle_root());
    println!("Roots match: {}", loaded.root == data.root);

    let tree = loaded.to_tree()?;
    let recipient = &loaded.recipients[0];
    let proof = tree.get_proof(recipient)?;
    println!("Proof verification after load: {}", tree.verify_proof(recipient, &proof));

    let mut tampered = dump.clone();
    tampered.recipients[0].amount = "999000000000000000000".to_string();
    match MerkleTreeData::load(&tampered) {
        Ok(_) => println!("Tampered dump accepted"),
        Err(e) => println!("Tampered dump rejected: {}", e),
    }

    Ok(())
}
