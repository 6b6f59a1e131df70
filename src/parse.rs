//! Free-text recipient lists and fixed demo data.

use crate::error::{MerkleTreeError, Result};
use crate::recipient::{RecipientInput, parse_address, parse_amount};

const EXAMPLE_RECIPIENTS: [(&str, &str); 5] = [
    ("0x742d35Cc6634C0532925a3b8D4C9db96C4b4BEE0", "1000000000000000000"),
    ("0x8ba1f109551bD432803012645Ac136ddd64D925d", "500000000000000000"),
    ("0x2546BcD3c84621e976D8185a91A922aE77ECEc30", "2500000000000000000"),
    ("0xbDA5747bFD65F08deb54cb465eB87D40e51B197E", "750000000000000000"),
    ("0x71bE63f3384f5fb98995898A86B02Fb2426c5788", "100000000000000000"),
];

/// Five well-formed recipients, identical on every call.
pub fn example_recipients() -> Vec<RecipientInput> {
    EXAMPLE_RECIPIENTS
        .iter()
        .map(|(address, amount)| RecipientInput::new(*address, *amount))
        .collect()
}

fn is_header(address: &str, amount: &str) -> bool {
    address.eq_ignore_ascii_case("address") && amount.eq_ignore_ascii_case("amount")
}

fn split_line(line: &str) -> Vec<&str> {
    if line.contains(',') {
        line.split(',').map(str::trim).collect()
    } else {
        line.split_whitespace().collect()
    }
}

/// Parses one recipient per line, as `address,amount` or `address amount`.
///
/// Blank lines are skipped and an `address,amount` header is allowed on the
/// first non-blank line. Every other line must hold a well-formed address and
/// a positive 256-bit amount; the first bad line fails with its 1-based number.
pub fn parse_recipients(text: &str) -> Result<Vec<RecipientInput>> {
    let mut recipients = Vec::new();
    let mut seen_content = false;

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let fields = split_line(line);
        let [address, amount] = fields.as_slice() else {
            return Err(MerkleTreeError::FormatError {
                line: line_no,
                message: format!(
                    "expected `address,amount`, found {} field(s)",
                    fields.len()
                ),
            });
        };
        if address.is_empty() || amount.is_empty() {
            return Err(MerkleTreeError::FormatError {
                line: line_no,
                message: "address and amount must both be present".into(),
            });
        }

        let first = !seen_content;
        seen_content = true;
        if first && is_header(address, amount) {
            continue;
        }
        let invalid = |e: MerkleTreeError| MerkleTreeError::FormatError {
            line: line_no,
            message: e.to_string(),
        };
        parse_address(address).map_err(invalid)?;
        parse_amount(amount).map_err(invalid)?;
        recipients.push(RecipientInput::new(*address, *amount));
    }

    Ok(recipients)
}
