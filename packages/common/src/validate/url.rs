use std::fmt;

use crate::error::DomainError;

/// A validated `http(s)` URL, at most 255 characters. Used for avatar
/// and image URLs. The service stores and serves these, it never
/// fetches them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebUrl(String);

impl WebUrl {
    pub const MAX_LEN: usize = 255;

    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(DomainError::Format("url must not be empty".into()));
        }
        let rest = s
            .strip_prefix("https://")
            .or_else(|| s.strip_prefix("http://"))
            .ok_or_else(|| {
                DomainError::Format("url must start with http:// or https://".into())
            })?;
        if rest.is_empty() || s.chars().any(char::is_whitespace) {
            return Err(DomainError::Format("url must not contain whitespace".into()));
        }
        if s.chars().count() > Self::MAX_LEN {
            return Err(DomainError::Range(format!(
                "url must be at most {} characters",
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

impl fmt::Display for WebUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
