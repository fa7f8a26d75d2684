//! Error types for Tessera operations.
//!
//! [`GridError`] covers the grid's own failure modes; the only one a user
//! ever sees is [`GridError::RowFull`], surfaced by the UI as a dismissible
//! warning. [`TesseraError`] is the engine's top-level error wrapping grid,
//! session, I/O, and persistence failures.

use std::io;

use thiserror::Error;

use tessera_core::instance::InstanceId;

use crate::session::SessionError;

/// Failure modes of grid mutations.
///
/// Every grid operation is atomic: when one of these is returned, the grid
/// state is identical to the state before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The target row already holds the maximum number of columns.
    ///
    /// Recovered locally: the gesture fails, the grid is unchanged, and the
    /// caller surfaces a non-fatal warning.
    #[error("row {row} is full ({capacity} columns maximum)")]
    RowFull { row: usize, capacity: usize },

    /// No instance with this id exists in the grid.
    #[error("unknown instance: {0}")]
    UnknownInstance(InstanceId),

    /// A loaded instance list contains the same instance id twice.
    #[error("duplicate instance id: {0}")]
    DuplicateInstanceId(InstanceId),
}

impl GridError {
    /// Returns `true` for the over-capacity rejection, the only variant
    /// that is a normal user-facing outcome rather than API misuse.
    pub fn is_capacity(&self) -> bool {
        matches!(self, GridError::RowFull { .. })
    }
}

/// The main error type for Tessera operations.
#[derive(Debug, Error)]
pub enum TesseraError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Drag session error: {0}")]
    Session(#[from] SessionError),

    #[error("Persistence error: {0}")]
    Persist(String),
}
