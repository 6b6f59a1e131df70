//! Airdrop recipients and the packed leaf encoding.
//!
//! A leaf is `hash(address ‖ amount)` where the address contributes its 20 raw
//! bytes and the amount its 32-byte big-endian form. This is the
//! `abi.encodePacked(address, uint256)` layout an airdrop contract hashes when
//! it checks a claim.

use crate::bytes::{Bytes32, strip_hex_prefix};
use crate::error::{MerkleTreeError, Result};
use crate::hashes::HashAlgorithm;
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ADDRESS_HEX_LEN: usize = 40;
pub const PACKED_LEAF_LEN: usize = 20 + 32;

/// A recipient exactly as supplied by the caller, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientInput {
    pub address: String,
    pub amount: String,
}

impl RecipientInput {
    pub fn new(address: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            amount: amount.into(),
        }
    }

    pub fn validate(&self) -> Result<Recipient> {
        Recipient::parse(&self.address, &self.amount)
    }
}

/// A validated recipient. Amount is always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Recipient {
    address: Address,
    amount: U256,
}

impl Recipient {
    pub fn new(address: Address, amount: U256) -> Result<Self> {
        if amount.is_zero() {
            return Err(MerkleTreeError::InvalidAmount(
                "amount must be greater than zero".into(),
            ));
        }
        Ok(Self { address, amount })
    }

    pub fn parse(address: &str, amount: &str) -> Result<Self> {
        Self::new(parse_address(address)?, parse_amount(amount)?)
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn amount(&self) -> U256 {
        self.amount
    }

    /// Lowercase, 0x-prefixed, fixed-width form of the address.
    pub fn address_hex(&self) -> String {
        format!("0x{}", hex::encode(self.address.as_slice()))
    }

    pub fn packed(&self) -> [u8; PACKED_LEAF_LEN] {
        let mut out = [0u8; PACKED_LEAF_LEN];
        out[..20].copy_from_slice(self.address.as_slice());
        out[20..].copy_from_slice(&self.amount.to_be_bytes::<32>());
        out
    }

    pub fn leaf(&self, hash: HashAlgorithm) -> Bytes32 {
        hash.digest(&self.packed())
    }

    pub fn to_input(&self) -> RecipientInput {
        RecipientInput::new(self.address_hex(), self.amount.to_string())
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.address_hex(), self.amount)
    }
}

/// Hashes one `(address, amount)` pair into a leaf after validating both.
pub fn encode_leaf(address: &str, amount: &str, hash: HashAlgorithm) -> Result<Bytes32> {
    Ok(Recipient::parse(address, amount)?.leaf(hash))
}

/// Accepts 40 hex digits with an optional `0x` prefix, in any letter case.
///
/// Surrounding whitespace is ignored and a bare address without `0x` is
/// treated the same as its prefixed form.
pub fn parse_address(s: &str) -> Result<Address> {
    let digits = strip_hex_prefix(s.trim());
    if digits.len() != ADDRESS_HEX_LEN {
        return Err(MerkleTreeError::InvalidAddress(format!(
            "expected {} hex characters, got {}",
            ADDRESS_HEX_LEN,
            digits.len()
        )));
    }
    let mut raw = [0u8; 20];
    hex::decode_to_slice(digits, &mut raw)
        .map_err(|e| MerkleTreeError::InvalidAddress(e.to_string()))?;
    Ok(Address::from(raw))
}

/// Accepts a positive integer in decimal or `0x` hex that fits in 256 bits.
pub fn parse_amount(s: &str) -> Result<U256> {
    let s = s.trim();
    if s.is_empty() {
        return Err(MerkleTreeError::InvalidAmount("amount is empty".into()));
    }
    if s.starts_with('-') {
        return Err(MerkleTreeError::InvalidAmount(format!(
            "amount must not be negative: {s}"
        )));
    }

    let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex_digits) => (hex_digits, 16),
        None => (s, 10),
    };
    let well_formed = !digits.is_empty()
        && digits.chars().all(|c| match radix {
            16 => c.is_ascii_hexdigit(),
            _ => c.is_ascii_digit(),
        });
    if !well_formed {
        return Err(MerkleTreeError::InvalidAmount(format!("not a number: {s}")));
    }

    let amount = U256::from_str_radix(digits, radix)
        .map_err(|e| MerkleTreeError::InvalidAmount(format!("{s} exceeds 256 bits: {e}")))?;
    if amount.is_zero() {
        return Err(MerkleTreeError::InvalidAmount(
            "amount must be greater than zero".into(),
        ));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashes::keccak256;

    const ALICE: &str = "0x742d35cc6634c0532925a3b8d4c9db96c4b4bee0";

    #[test]
    fn test_parse_address_case_insensitive() {
        let lower = parse_address(ALICE).unwrap();
        let upper = parse_address("0x742D35CC6634C0532925A3B8D4C9DB96C4B4BEE0").unwrap();
        let bare = parse_address("742d35cc6634c0532925a3b8d4c9db96c4b4bee0").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower, bare);
    }

    #[test]
    fn test_parse_address_rejects_bad_length() {
        assert!(matches!(
            parse_address("0x742d35"),
            Err(MerkleTreeError::InvalidAddress(_))
        ));
        assert!(matches!(
            parse_address("0x742d35cc6634c0532925a3b8d4c9db96c4b4bee000"),
            Err(MerkleTreeError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_parse_address_rejects_non_hex() {
        assert!(matches!(
            parse_address("0x742d35cc6634c0532925a3b8d4c9db96c4b4beeg"),
            Err(MerkleTreeError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_parse_amount_decimal_and_hex() {
        assert_eq!(
            parse_amount("1000000000000000000").unwrap(),
            U256::from(1_000_000_000_000_000_000u64)
        );
        assert_eq!(parse_amount("0xff").unwrap(), U256::from(255u64));
        assert_eq!(parse_amount(" 42 ").unwrap(), U256::from(42u64));
    }

    #[test]
    fn test_parse_amount_max() {
        let max = U256::MAX.to_string();
        assert_eq!(parse_amount(&max).unwrap(), U256::MAX);
    }

    #[test]
    fn test_parse_amount_rejections() {
        let overflow =
            "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        for bad in ["", "0", "0x0", "-5", "1.5", "abc", "1e18", "+7", "0x", overflow] {
            assert!(
                matches!(parse_amount(bad), Err(MerkleTreeError::InvalidAmount(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_new_rejects_zero_amount() {
        let address = parse_address(ALICE).unwrap();
        assert!(matches!(
            Recipient::new(address, U256::ZERO),
            Err(MerkleTreeError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_packed_layout() {
        let recipient = Recipient::parse(ALICE, "1").unwrap();
        let packed = recipient.packed();

        assert_eq!(packed.len(), 52);
        assert_eq!(&packed[..20], recipient.address().as_slice());
        assert_eq!(&packed[20..51], &[0u8; 31]);
        assert_eq!(packed[51], 1);
    }

    #[test]
    fn test_encode_leaf_hashes_packed_bytes() {
        let recipient = Recipient::parse(ALICE, "500").unwrap();
        let leaf = encode_leaf(ALICE, "500", HashAlgorithm::Keccak256).unwrap();
        assert_eq!(leaf, keccak256(&recipient.packed()));
    }

    #[test]
    fn test_encode_leaf_normalizes_case() {
        let upper = ALICE.to_uppercase().replace("0X", "0x");
        let a = encode_leaf(ALICE, "7", HashAlgorithm::Keccak256).unwrap();
        let b = encode_leaf(&upper, "7", HashAlgorithm::Keccak256).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_encode_leaf_errors() {
        assert!(matches!(
            encode_leaf("0x1234", "1", HashAlgorithm::Keccak256),
            Err(MerkleTreeError::InvalidAddress(_))
        ));
        assert!(matches!(
            encode_leaf(ALICE, "0", HashAlgorithm::Keccak256),
            Err(MerkleTreeError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_distinct_pairs_distinct_leaves() {
        let a = encode_leaf(ALICE, "1", HashAlgorithm::Keccak256).unwrap();
        let b = encode_leaf(ALICE, "2", HashAlgorithm::Keccak256).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_and_input_roundtrip() {
        let upper = ALICE.to_uppercase().replace("0X", "0x");
        let recipient = Recipient::parse(&upper, "0x10").unwrap();
        assert_eq!(recipient.to_string(), format!("{ALICE},16"));
        assert_eq!(recipient.to_input().validate().unwrap(), recipient);
    }

    #[test]
    fn test_input_deserializes_from_json() {
        let input: RecipientInput =
            serde_json::from_str(&format!(r#"{{"address":"{ALICE}","amount":"3"}}"#)).unwrap();
        assert_eq!(input.validate().unwrap().amount(), U256::from(3u64));
    }
}
