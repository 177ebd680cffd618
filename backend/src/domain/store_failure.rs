//! Translation of driven-port failures into client-facing domain errors.
//!
//! The underlying adapter error is logged with the operation that failed; the
//! client only ever sees the fixed per-operation message.

use std::fmt::Display;

use tracing::error;

use super::Error;

/// Map a failed read to [`Error::fetch_failed`] carrying `message`.
pub(crate) fn fetch_failed<E: Display>(
    operation: &'static str,
    message: &'static str,
) -> impl FnOnce(E) -> Error {
    move |source| {
        error!(error = %source, operation, "read failed");
        Error::fetch_failed(message)
    }
}

/// Map a failed write to [`Error::persistence_failed`] carrying `message`.
pub(crate) fn persistence_failed<E: Display>(
    operation: &'static str,
    message: &'static str,
) -> impl FnOnce(E) -> Error {
    move |source| {
        error!(error = %source, operation, "write failed");
        Error::persistence_failed(message)
    }
}
