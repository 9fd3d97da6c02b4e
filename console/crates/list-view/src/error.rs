//! Error types for list view configuration and interaction.

use thiserror::Error;

/// Errors raised when configuring or driving a list view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListViewError {
    /// Page size must be at least one row.
    #[error("page size must be greater than zero")]
    ZeroPageSize,

    /// The requested column has no comparator registered.
    #[error("column '{column}' is not sortable")]
    UnknownSortColumn {
        /// Column key supplied by the caller.
        column: String,
    },
}
