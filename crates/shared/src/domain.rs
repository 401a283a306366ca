use std::fmt;

use crate::error::{DomainError, ValidationError};

/// Drafts whose length reaches this value are rejected.
pub const MAX_TWEET_CHARS: usize = 140;

pub const TWEET_TOO_LONG_ALERT: &str = "Please tweet within 140 words!";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Accepts the same shape the server routes on: one or more ASCII word
    /// characters.
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::EmptyUsername);
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(DomainError::InvalidUsername { username: raw });
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftText(String);

impl DraftText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Length in UTF-16 code units, as a browser textarea reports it.
    pub fn char_len(&self) -> usize {
        self.0.encode_utf16().count()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let length = self.char_len();
        if length >= MAX_TWEET_CHARS {
            return Err(ValidationError {
                length,
                limit: MAX_TWEET_CHARS,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_accepts_word_characters() {
        let user = Username::parse("alice_01").expect("valid username");
        assert_eq!(user.as_str(), "alice_01");
        assert_eq!(user.to_string(), "alice_01");
    }

    #[test]
    fn username_rejects_empty_and_path_characters() {
        assert_eq!(Username::parse(""), Err(DomainError::EmptyUsername));
        assert!(matches!(
            Username::parse("bob/../admin"),
            Err(DomainError::InvalidUsername { .. })
        ));
        assert!(matches!(
            Username::parse("carol smith"),
            Err(DomainError::InvalidUsername { .. })
        ));
    }

    #[test]
    fn draft_of_exactly_the_limit_is_rejected() {
        let draft = DraftText::new("a".repeat(MAX_TWEET_CHARS));
        assert_eq!(
            draft.validate(),
            Err(ValidationError {
                length: 140,
                limit: 140
            })
        );
    }

    #[test]
    fn draft_below_the_limit_and_empty_draft_pass() {
        assert!(DraftText::new("a".repeat(MAX_TWEET_CHARS - 1))
            .validate()
            .is_ok());
        assert!(DraftText::default().validate().is_ok());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let draft = DraftText::new("é".repeat(MAX_TWEET_CHARS - 1));
        assert!(draft.as_str().len() > MAX_TWEET_CHARS);
        assert_eq!(draft.char_len(), 139);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn astral_characters_count_as_two_units() {
        let draft = DraftText::new("\u{1F600}".repeat(70));
        assert_eq!(draft.as_str().chars().count(), 70);
        assert_eq!(draft.char_len(), 140);
        assert_eq!(
            draft.validate(),
            Err(ValidationError {
                length: 140,
                limit: 140
            })
        );

        let draft = DraftText::new(format!("{}a", "\u{1F600}".repeat(69)));
        assert_eq!(draft.char_len(), 139);
        assert!(draft.validate().is_ok());
    }
}
