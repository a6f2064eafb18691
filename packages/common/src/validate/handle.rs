use std::fmt;

use crate::error::DomainError;

/// A validated at-handle: `@` followed by letters, digits, or
/// underscores, at most 32 characters in total. Stored trimmed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AtHandle(String);

impl AtHandle {
    pub const MAX_LEN: usize = 32;

    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(DomainError::Format("at-handle must not be empty".into()));
        }
        let rest = s.strip_prefix('@').ok_or_else(|| {
            DomainError::Format("at-handle must start with '@'".into())
        })?;
        if rest.is_empty()
            || !rest
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(DomainError::Format(
                "at-handle may only contain letters, digits, and underscores after '@'".into(),
            ));
        }
        if s.chars().count() > Self::MAX_LEN {
            return Err(DomainError::Range(format!(
                "at-handle must be at most {} characters",
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

impl fmt::Display for AtHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
