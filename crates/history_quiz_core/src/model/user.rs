//! User identity model.

use super::ValidationError;
use serde::Serialize;

/// Row id of a user in the main store.
pub type UserId = i64;

/// Registered quiz taker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

/// Trims a username and rejects empty input.
pub fn normalize_username(username: &str) -> Result<String, ValidationError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUsername);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::normalize_username;
    use crate::model::ValidationError;

    #[test]
    fn normalize_username_trims_whitespace() {
        assert_eq!(normalize_username("  ada \n").unwrap(), "ada");
    }

    #[test]
    fn normalize_username_rejects_blank() {
        assert_eq!(
            normalize_username("   ").unwrap_err(),
            ValidationError::EmptyUsername
        );
    }
}
