//! Errors surfaced by console commands.

use std::io;

use list_view::ListViewError;
use thiserror::Error;

use crate::domain::ports::{ApiError, SessionStorageError};
use crate::domain::{AuthError, FormError, RecordId, Route, UnknownRoute};

/// Why a console command did not complete.
///
/// Every variant renders as the single notice line shown to the operator.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Sign-in or registration failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// The backend rejected a request.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Form input was rejected before any request.
    #[error(transparent)]
    Form(#[from] FormError),
    /// The session entry could not be updated.
    #[error(transparent)]
    Storage(#[from] SessionStorageError),
    /// A table option was rejected.
    #[error(transparent)]
    ListView(#[from] ListViewError),
    /// The requested route does not exist.
    #[error(transparent)]
    UnknownRoute(#[from] UnknownRoute),
    /// The session may not run this command.
    #[error("Access denied; continue at {route}")]
    Forbidden {
        /// Where the session is sent instead.
        route: Route,
    },
    /// No record in the fetched collection has the given identifier.
    #[error("No {entity} with id {id}")]
    NotFound {
        /// Entity label.
        entity: &'static str,
        /// Requested identifier.
        id: RecordId,
    },
    /// A destructive command ran without `--yes`.
    #[error("Are you sure you want to delete this {entity}? Re-run with --yes to confirm.")]
    ConfirmationRequired {
        /// Entity label.
        entity: &'static str,
    },
    /// Writing console output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}
