use std::fmt;

use crate::error::DomainError;

/// A validated email address: one `@`, a non-empty local part, and a
/// dotted domain; at most 128 characters. Stored trimmed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub const MAX_LEN: usize = 128;

    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(DomainError::Format("email must not be empty".into()));
        }
        if s.chars().any(char::is_whitespace) {
            return Err(DomainError::Format(
                "email must not contain whitespace".into(),
            ));
        }
        let (local, domain) = s.split_once('@').ok_or_else(|| {
            DomainError::Format("email must contain a single '@'".into())
        })?;
        if local.is_empty() || domain.contains('@') {
            return Err(DomainError::Format("email must contain a single '@'".into()));
        }
        if !domain.contains('.') || domain.split('.').any(str::is_empty) {
            return Err(DomainError::Format(
                "email domain must be a dotted name".into(),
            ));
        }
        if s.chars().count() > Self::MAX_LEN {
            return Err(DomainError::Range(format!(
                "email must be at most {} characters",
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

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
