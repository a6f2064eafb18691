use std::fmt;

use crate::error::DomainError;

/// A validated Argon2id password hash in PHC string form
/// (`$argon2id$v=…$m=…,t=…,p=…$salt$hash`).
///
/// Only the algorithm tag and the segment structure are checked here;
/// cryptographic verification happens where the hash is used. A profile
/// constructed from a stored row re-validates through this type, so a
/// row with a foreign hash algorithm never becomes a live entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordHashString(String);

impl PasswordHashString {
    pub const MAX_LEN: usize = 255;
    const ALGORITHM_TAG: &'static str = "argon2id";

    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let segments: Vec<&str> = input.split('$').collect();
        // Leading '$' yields an empty first segment.
        if segments.len() != 6 || !segments[0].is_empty() {
            return Err(DomainError::Format(
                "password hash must be a PHC string with five segments".into(),
            ));
        }
        if segments[1] != Self::ALGORITHM_TAG {
            return Err(DomainError::Format(format!(
                "password hash algorithm must be {}, got {:?}",
                Self::ALGORITHM_TAG,
                segments[1]
            )));
        }
        if segments[2..].iter().any(|s| s.is_empty()) {
            return Err(DomainError::Format(
                "password hash segments must not be empty".into(),
            ));
        }
        if input.len() > Self::MAX_LEN {
            return Err(DomainError::Range(format!(
                "password hash must be at most {} characters",
                Self::MAX_LEN
            )));
        }
        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PasswordHashString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the hash material itself.
        f.write_str("PasswordHashString(…)")
    }
}
