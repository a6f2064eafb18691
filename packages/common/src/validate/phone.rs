use std::fmt;

use crate::error::DomainError;

/// A validated phone number: digits plus `+ - ( )` and spaces, at most
/// 32 characters. The field itself is optional on a profile; this type
/// only exists once a value was supplied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Phone(String);

impl Phone {
    pub const MAX_LEN: usize = 32;

    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(DomainError::Format("phone must not be empty".into()));
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '))
        {
            return Err(DomainError::Format(
                "phone may only contain digits, '+', '-', parentheses, and spaces".into(),
            ));
        }
        if s.chars().count() > Self::MAX_LEN {
            return Err(DomainError::Range(format!(
                "phone must be at most {} characters",
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

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
