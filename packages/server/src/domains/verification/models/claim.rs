use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domains::verification::VerificationError;

/// A claim submitted for verification. Always trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claim(String);

impl Claim {
    /// Accept the raw request field. Absent or blank input is a missing claim.
    pub fn parse(raw: Option<&str>) -> Result<Self, VerificationError> {
        match raw.map(str::trim) {
            Some(text) if !text.is_empty() => Ok(Self(text.to_string())),
            _ => Err(VerificationError::MissingClaim),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_input() {
        let claim = Claim::parse(Some("  Bridge collapsed in Pune  ")).unwrap();
        assert_eq!(claim.as_str(), "Bridge collapsed in Pune");
    }

    #[test]
    fn test_parse_rejects_missing_and_blank() {
        assert!(matches!(Claim::parse(None), Err(VerificationError::MissingClaim)));
        assert!(matches!(Claim::parse(Some("")), Err(VerificationError::MissingClaim)));
        assert!(matches!(Claim::parse(Some(" \n\t ")), Err(VerificationError::MissingClaim)));
    }
}
