use std::fmt;

use crate::error::DomainError;

/// A validated activation token: exactly 32 lowercase hex characters.
///
/// A profile carries one of these while it is pending activation; the
/// column goes NULL once the activation endpoint consumes it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ActivationToken(String);

impl ActivationToken {
    pub const LEN: usize = 32;

    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let s = input.trim();
        if !s
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            return Err(DomainError::Format(
                "activation token must be lowercase hex".into(),
            ));
        }
        if s.len() != Self::LEN {
            return Err(DomainError::Range(format!(
                "activation token must be exactly {} characters, got {}",
                Self::LEN,
                s.len()
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

impl fmt::Display for ActivationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
