//! Error types for pdt-rs.

use thiserror::Error;

use crate::selection::ObjectMode;

/// The main error type for pdt-rs operations.
///
/// Every variant is a local, recoverable failure. The `Display` text is the
/// message shown to the user when a command is rejected.
#[derive(Error, Debug)]
pub enum PdtError {
    /// The command has fewer than three characters.
    #[error("command needs at least an operation letter, a mode letter and a value")]
    TooShortCommand,

    /// The first letter of the command is not a known operation.
    #[error("'{0}' is not a valid operation")]
    UnknownOperation(char),

    /// The second letter of the command is not legal for its operation.
    #[error("'{mode}' is not a valid mode for operation '{operation}'")]
    UnknownMode { operation: char, mode: char },

    /// The command carries the wrong number of comma-separated values.
    #[error("expected {expected} value(s), got {found}")]
    WrongValueCount { expected: usize, found: usize },

    /// The current selection does not match what the command requires.
    #[error("select {expected} (found {found})")]
    SelectionCount { expected: &'static str, found: usize },

    /// The two lines are parallel in the working plane.
    #[error("lines do not intersect in the working plane")]
    NoIntersection,

    /// The three arc points lie on a line (or coincide).
    #[error("points are collinear, no arc centre exists")]
    CollinearPoints,

    /// Two points that must define a direction coincide.
    #[error("points coincide, no line can be formed")]
    CoincidentPoints,

    /// The named working plane is not one of XY, XZ, YZ or LO.
    #[error("'{0}' is not a valid working plane")]
    InvalidPlane(String),

    /// The command needs an active object and there is none.
    #[error("no active object")]
    NoActiveObject,

    /// The active object is in the wrong mode for the command.
    #[error("active object must be in {required} mode")]
    WrongObjectMode { required: ObjectMode },

    /// A maths expression failed to evaluate.
    #[error("maths expression error: {0}")]
    MathsExpression(String),

    /// The host refused to apply a computed mutation.
    #[error("mutation rejected: {0}")]
    Sink(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for pdt-rs operations.
pub type Result<T> = std::result::Result<T, PdtError>;
