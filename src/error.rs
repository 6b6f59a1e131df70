use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleTreeError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid recipient #{index} ({address}, {amount}): {source}")]
    InvalidRecipient {
        index: usize,
        address: String,
        amount: String,
        #[source]
        source: Box<MerkleTreeError>,
    },

    #[error("Expected at least one recipient")]
    EmptyRecipients,

    #[error("Expected non-zero number of leaves")]
    EmptyInput,

    #[error("Line {line}: {message}")]
    FormatError { line: usize, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invariant violation: {0}")]
    Invariant(String),

    #[error("Merkle tree nodes must be 32 bytes")]
    InvalidNodeLength,

    #[error("Hex decode error: {0}")]
    HexDecode(String),

    #[error("Leaf is not in tree")]
    LeafNotInTree,

    #[error("Index out of bounds")]
    IndexOutOfBounds,

    #[error("Unknown hash algorithm: {0}")]
    UnknownHashAlgorithm(String),
}

impl MerkleTreeError {
    /// Attaches the position and raw fields of the recipient that failed validation.
    pub(crate) fn for_recipient(self, index: usize, address: &str, amount: &str) -> Self {
        MerkleTreeError::InvalidRecipient {
            index,
            address: address.to_string(),
            amount: amount.to_string(),
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, MerkleTreeError>;

#[inline]
pub fn validate_argument<T: AsRef<str>>(condition: bool, message: T) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(MerkleTreeError::InvalidArgument(
            message.as_ref().to_string(),
        ))
    }
}

#[inline]
pub fn invariant<T: AsRef<str>>(condition: bool, message: T) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(MerkleTreeError::Invariant(message.as_ref().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_recipient_error_keeps_source() {
        let err = MerkleTreeError::InvalidAmount("amount must be positive".into())
            .for_recipient(2, "0xabc", "0");

        assert_eq!(
            err.to_string(),
            "Invalid recipient #2 (0xabc, 0): Invalid amount: amount must be positive"
        );
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "Invalid amount: amount must be positive");
    }

    #[test]
    fn test_format_error_display() {
        let err = MerkleTreeError::FormatError {
            line: 7,
            message: "expected `address,amount`".into(),
        };
        assert_eq!(err.to_string(), "Line 7: expected `address,amount`");
    }

    #[test]
    fn test_guards() {
        assert!(validate_argument(true, "unused").is_ok());
        assert!(matches!(
            validate_argument(false, "bad"),
            Err(MerkleTreeError::InvalidArgument(m)) if m == "bad"
        ));
        assert!(matches!(
            invariant(false, "broken"),
            Err(MerkleTreeError::Invariant(m)) if m == "broken"
        ));
    }
}
