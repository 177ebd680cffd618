//! Bcrypt `LoginService` adapter built on a [`UserRepository`].
//!
//! Lookups go through the repository; hash verification runs on the blocking
//! pool because bcrypt is deliberately slow.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{INVALID_CREDENTIALS, LoginService, UserRepository};
use crate::domain::{Error, LoginCredentials, PasswordHash, User};

use super::diesel_user_repository::DieselUserRepository;
use super::user_persistence_error_mapping::map_user_persistence_error;

/// `LoginService` checking credentials against stored bcrypt hashes.
#[derive(Clone)]
pub struct DieselLoginService {
    user_repository: Arc<dyn UserRepository>,
}

impl DieselLoginService {
    /// Create a new service backed by a Diesel user repository.
    pub fn new(user_repository: DieselUserRepository) -> Self {
        Self {
            user_repository: Arc::new(user_repository),
        }
    }

    #[cfg(test)]
    fn from_repository(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }
}

async fn password_matches(password: &str, hash: &PasswordHash) -> Result<bool, Error> {
    let password = zeroize::Zeroizing::new(password.to_owned());
    let hash = hash.as_str().to_owned();
    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password.as_str(), &hash))
        .await
        .map_err(|err| Error::internal(format!("password check did not complete: {err}")))?;

    match outcome {
        Ok(matches) => Ok(matches),
        Err(err) => {
            // A stored hash bcrypt cannot parse never matches anything.
            warn!(error = %err, "stored password hash is unreadable");
            Ok(false)
        }
    }
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let account = self
            .user_repository
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_persistence_error)?;

        let Some(account) = account else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        if password_matches(credentials.password(), &account.password_hash).await? {
            Ok(account.user)
        } else {
            Err(Error::unauthorized(INVALID_CREDENTIALS))
        }
    }
}
