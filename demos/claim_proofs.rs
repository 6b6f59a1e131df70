//! Claim proof example.
//!
//! Builds a tree, renders its levels and checks every claim the way the
//! airdrop contract would.
//!
//! Run: `RUST_LOG=debug cargo run --example claim_proofs`

use airdrop_merkle::{AirdropMerkleTree, MerkleTreeOptions, example_recipients};
use tracing_subscriber::EnvFilter;

fn main() -> airdrop_merkle::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = MerkleTreeOptions::default();
    let tree = AirdropMerkleTree::from_inputs(&example_recipients(), options)?;

    println!("Root: {}", tree.root_hex());
    println!("Depth: {}\n", tree.depth());
    println!("{}\n", tree.render()?);

    let root = tree.root_hex();
    for claim in tree.claim_proofs()? {
        let valid = claim.verify(&root, tree.hash())?;
        println!("{} claims {}", claim.address, claim.amount);
        println!("  Leaf:  {}", claim.leaf);
        println!("  Proof: {:?}", claim.proof);
        println!("  Valid: {}\n", valid);
    }

    Ok(())
}
