//! Topic identifiers.
//!
//! A topic is a question bank stored in its own SQLite file named
//! `<topic>.db`, so the name doubles as a file stem.

use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

static TOPIC_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-][A-Za-z0-9_.-]*$").expect("valid topic regex"));

/// Validated topic name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TopicName(String);

impl TopicName {
    /// Parses a topic name, trimming surrounding whitespace.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if !TOPIC_NAME_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidTopicName(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the topic store inside the topics directory.
    pub fn file_name(&self) -> String {
        format!("{}.db", self.0)
    }
}

impl Display for TopicName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TopicName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::TopicName;

    #[test]
    fn parse_accepts_file_safe_names() {
        for name in ["tudors", "world_war_2", "cold-war", "v1.2"] {
            assert_eq!(TopicName::parse(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn parse_rejects_paths_and_blanks() {
        for name in ["", "  ", "../main", "a/b", ".hidden", "with space"] {
            assert!(TopicName::parse(name).is_err(), "{name:?} should be rejected");
        }
    }

    #[test]
    fn file_name_appends_db_extension() {
        let topic = TopicName::parse(" romans ").unwrap();
        assert_eq!(topic.file_name(), "romans.db");
    }
}
