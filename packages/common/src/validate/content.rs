use std::fmt;

use crate::error::DomainError;

/// Validated tweet content: 1-140 characters after trimming, no control
/// characters. The bound is enforced once, at construction; a
/// constructed value is always safe to persist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TweetContent(String);

impl TweetContent {
    pub const MAX_LEN: usize = 140;

    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(DomainError::Format(
                "tweet content must not be empty".into(),
            ));
        }
        if s.chars().any(|c| c.is_control() && c != '\n') {
            return Err(DomainError::Format(
                "tweet content must not contain control characters".into(),
            ));
        }
        let len = s.chars().count();
        if len > Self::MAX_LEN {
            return Err(DomainError::Range(format!(
                "tweet content must be at most {} characters, got {len}",
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

impl fmt::Display for TweetContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
