use std::fmt;

use crate::error::DomainError;

/// A validated external-storage token for an image: the opaque key the
/// storage provider hands back on upload. Non-empty, printable, at most
/// 255 characters; its internal structure is the provider's business.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageToken(String);

impl StorageToken {
    pub const MAX_LEN: usize = 255;

    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(DomainError::Format(
                "storage token must not be empty".into(),
            ));
        }
        if s.chars().any(|c| c.is_control() || c.is_whitespace()) {
            return Err(DomainError::Format(
                "storage token must not contain whitespace or control characters".into(),
            ));
        }
        if s.chars().count() > Self::MAX_LEN {
            return Err(DomainError::Range(format!(
                "storage token must be at most {} characters",
                Self::MAX_LEN
            )));
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StorageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
