pub mod auth;
pub mod boards;
pub mod extract;
pub mod health;
pub mod members;
pub mod tasks;
pub mod workspaces;

use crate::error::Error;

/// Logs a failed handler operation: client errors as warnings, the rest as errors.
pub(crate) fn log_handler_error(operation: &str, e: &Error) {
    if e.is_client_error() {
        tracing::warn!(operation = operation, error = %e, "Handler operation failed");
    } else {
        tracing::error!(operation = operation, error = %e, "Handler operation failed");
    }
}
