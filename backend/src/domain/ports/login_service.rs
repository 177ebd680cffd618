//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call this port to check credentials without importing
//! the backing store, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User, UserId};

/// Message returned for every failed credential check.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check credentials and return the signed-in user.
    ///
    /// Unknown emails and wrong passwords both yield
    /// [`crate::domain::ErrorCode::Unauthorized`] with [`INVALID_CREDENTIALS`].
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}

/// In-memory authenticator for running the server without a database.
///
/// Accepts the seeded placeholder account `user@nextmail.com` / `123456`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

impl FixtureLoginService {
    const EMAIL: &'static str = "user@nextmail.com";
    const PASSWORD: &'static str = "123456";
    const USER_ID: uuid::Uuid = uuid::uuid!("410544b2-4001-4271-9855-fec4b6a6442a");
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        if credentials.email() == Self::EMAIL && credentials.password() == Self::PASSWORD {
            Ok(User {
                id: UserId::from_uuid(Self::USER_ID),
                name: "User".to_owned(),
                email: Self::EMAIL.to_owned(),
            })
        } else {
            Err(Error::unauthorized(INVALID_CREDENTIALS))
        }
    }
}
