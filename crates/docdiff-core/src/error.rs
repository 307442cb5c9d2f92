//! Error types for the diff engine.

/// Errors that can occur while computing a diff.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// A dynamic-programming table would exceed its configured cell budget.
    ///
    /// Raised before the table is allocated, so the caller can recover by
    /// truncating its inputs or falling back to a coarser comparison instead
    /// of hitting an unbounded allocation.
    #[error("{scope} table of {rows}x{cols} cells exceeds the configured limit of {limit}")]
    TableTooLarge {
        /// Which table hit its budget: "line", "token", or "char".
        scope: &'static str,
        rows: usize,
        cols: usize,
        limit: usize,
    },
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
