//! Filing authority codes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Filing office / jurisdiction code (e.g. `EP`)
///
/// The code ends up inside a query string literal, so only ASCII
/// alphanumerics are accepted. Stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Authority(String);

impl Authority {
    /// Create a new authority code
    ///
    /// # Errors
    /// Returns error if the code is empty or contains anything but ASCII letters and digits
    pub fn new(value: impl AsRef<str>) -> Result<Self, String> {
        let value = value.as_ref().trim();
        if value.is_empty() {
            return Err("Authority cannot be empty".to_string());
        }
        if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(format!("Invalid authority code: {}", value));
        }
        Ok(Self(value.to_ascii_uppercase()))
    }

    /// The European Patent Office
    pub fn european() -> Self {
        Self("EP".to_string())
    }

    /// Get authority code as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Authority {
    fn default() -> Self {
        Self::european()
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Authority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Authority {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Authority> for String {
    fn from(value: Authority) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authority_is_uppercased() {
        let auth = Authority::new("ep").unwrap();
        assert_eq!(auth.as_str(), "EP");
    }

    #[test]
    fn test_rejects_quotes() {
        assert!(Authority::new("EP\" || true").is_err());
        assert!(Authority::new("").is_err());
        assert!(Authority::new("  ").is_err());
    }

    #[test]
    fn test_default_is_european() {
        assert_eq!(Authority::default(), Authority::new("EP").unwrap());
    }
}
