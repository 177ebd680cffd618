//! Mapping from user persistence failures to domain errors.

use crate::domain::Error;
use crate::domain::ports::UserPersistenceError;

/// Connection failures become `service_unavailable`; anything else is an
/// internal error. Neither message names the account being looked up.
pub(super) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
    }
}
