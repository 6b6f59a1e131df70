//! Airdrop root example.
//!
//! Parses a recipient list, generates the Merkle root and prints the JSON
//! bundle handed to the contract deployment step.
//!
//! Run: `cargo run --example airdrop_root [recipients.csv] [keccak256|sha256]`
//!
//! Without a file the built-in example recipients are used.

use airdrop_merkle::{
    HashAlgorithm, MerkleTreeOptions, example_recipients, generate_merkle_tree, parse_recipients,
};
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let recipients = match args.next() {
        Some(path) => parse_recipients(&std::fs::read_to_string(path)?)?,
        None => example_recipients(),
    };
    let hash: HashAlgorithm = match args.next() {
        Some(name) => name.parse()?,
        None => HashAlgorithm::default(),
    };

    let data = generate_merkle_tree(&recipients, MerkleTreeOptions::new().with_hash(hash))?;

    println!("Merkle root: {}", data.merkle_root());
    println!("Recipients: {}", data.recipients.len());
    println!("Total amount: {}\n", data.total_amount);
    println!("{}", serde_json::to_string_pretty(&data.dump())?);

    Ok(())
}
