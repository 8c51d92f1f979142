//! User registration and lookup use-cases.

use crate::error::{QuizError, QuizResult};
use crate::model::user::{normalize_username, User, UserId};
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;

/// Use-case service wrapper for user identity.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new user.
    ///
    /// # Contract
    /// - Username is trimmed; blank input fails with `EmptyUsername`.
    /// - An existing username fails with `UserExists`.
    pub fn register(&self, username: &str) -> QuizResult<User> {
        let username = normalize_username(username)?;
        match self.repo.create_user(&username) {
            Ok(id) => Ok(User { id, username }),
            Err(RepoError::Conflict(_)) => Err(QuizError::UserExists(username)),
            Err(err) => Err(err.into()),
        }
    }

    /// Resolves a username to its id, failing with `UserNotFound`.
    pub fn require_user_id(&self, username: &str) -> QuizResult<UserId> {
        let username = normalize_username(username)?;
        self.repo
            .find_user_id(&username)?
            .ok_or(QuizError::UserNotFound(username))
    }
}
