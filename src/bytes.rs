use crate::error::{MerkleTreeError, Result};

pub type Bytes32 = [u8; 32];
pub type HexString = String;

/// Conversion into a 32-byte tree node, from raw bytes or 0x-prefixed hex.
pub trait ToBytes32 {
    fn to_bytes32(&self) -> Result<Bytes32>;
}

impl ToBytes32 for [u8; 32] {
    fn to_bytes32(&self) -> Result<Bytes32> {
        Ok(*self)
    }
}

impl ToBytes32 for &[u8] {
    fn to_bytes32(&self) -> Result<Bytes32> {
        Bytes32::try_from(*self).map_err(|_| MerkleTreeError::InvalidNodeLength)
    }
}

impl ToBytes32 for Vec<u8> {
    fn to_bytes32(&self) -> Result<Bytes32> {
        self.as_slice().to_bytes32()
    }
}

impl ToBytes32 for &str {
    fn to_bytes32(&self) -> Result<Bytes32> {
        hex_to_bytes32(self)
    }
}

impl ToBytes32 for String {
    fn to_bytes32(&self) -> Result<Bytes32> {
        hex_to_bytes32(self)
    }
}

pub fn hex_to_bytes32(s: &str) -> Result<Bytes32> {
    let digits = strip_hex_prefix(s.trim());
    let bytes = hex::decode(digits).map_err(|e| MerkleTreeError::HexDecode(e.to_string()))?;
    bytes.as_slice().to_bytes32()
}

#[must_use]
pub fn bytes32_to_hex(bytes: &Bytes32) -> HexString {
    format!("0x{}", hex::encode(bytes))
}

pub(crate) fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Concatenates two nodes smaller-first, the pairing rule shared by tree
/// construction and proof verification.
#[must_use]
pub fn concat_sorted(a: &Bytes32, b: &Bytes32) -> [u8; 64] {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    let mut out = [0u8; 64];
    out[..32].copy_from_slice(low);
    out[32..].copy_from_slice(high);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let original = [0xab; 32];
        let hex = bytes32_to_hex(&original);
        assert!(hex.starts_with("0x"));
        assert_eq!(hex_to_bytes32(&hex).unwrap(), original);
    }

    #[test]
    fn test_hex_without_prefix() {
        let hex = "0000000000000000000000000000000000000000000000000000000000000001";
        let bytes = hex_to_bytes32(hex).unwrap();
        assert_eq!(bytes[31], 1);
    }

    #[test]
    fn test_hex_uppercase_prefix() {
        let hex = "0X00000000000000000000000000000000000000000000000000000000000000FF";
        let bytes = hex_to_bytes32(hex).unwrap();
        assert_eq!(bytes[31], 0xff);
    }

    #[test]
    fn test_invalid_hex_length() {
        let result = hex_to_bytes32("0x00");
        assert!(matches!(result, Err(MerkleTreeError::InvalidNodeLength)));
    }

    #[test]
    fn test_invalid_hex_digits() {
        let result = hex_to_bytes32("0xzz");
        assert!(matches!(result, Err(MerkleTreeError::HexDecode(_))));
    }

    #[test]
    fn test_to_bytes32_wrong_length() {
        let slice: &[u8] = &[1u8; 31];
        assert!(matches!(
            slice.to_bytes32(),
            Err(MerkleTreeError::InvalidNodeLength)
        ));
        assert_eq!(vec![2u8; 32].to_bytes32().unwrap(), [2u8; 32]);
    }

    #[test]
    fn test_concat_sorted_orders_pair() {
        let mut low = [0u8; 32];
        let mut high = [0u8; 32];
        low[0] = 1;
        high[0] = 2;

        let forward = concat_sorted(&low, &high);
        let backward = concat_sorted(&high, &low);
        assert_eq!(forward, backward);
        assert_eq!(&forward[..32], &low);
        assert_eq!(&forward[32..], &high);
    }

    #[test]
    fn test_concat_sorted_compares_later_bytes() {
        let a = [0u8; 32];
        let mut b = [0u8; 32];
        b[31] = 1;

        let joined = concat_sorted(&b, &a);
        assert_eq!(&joined[..32], &a);
    }

    #[test]
    fn test_concat_sorted_self_pair() {
        let node = [7u8; 32];
        let joined = concat_sorted(&node, &node);
        assert_eq!(joined, [7u8; 64]);
    }
}
