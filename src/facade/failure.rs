use std::any::Any;
use thiserror::Error;

/// Line or column used when the parser engine could not tell where it failed.
pub const UNKNOWN_POSITION: usize = 0;

/// A failure as seen by the facade: a message and a 1-based source position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{line}:{column}: {message}")]
pub struct ParseFailure {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl ParseFailure {
    pub fn new<M: Into<String>>(message: M, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }

    pub fn without_position<M: Into<String>>(message: M) -> Self {
        Self::new(message, UNKNOWN_POSITION, UNKNOWN_POSITION)
    }

    /// Extracts the reportable fields from whatever the engine failed with.
    /// Missing coordinates fall back to `UNKNOWN_POSITION`.
    pub fn from_failure<F: Failure + ?Sized>(failure: &F) -> Self {
        Self::new(
            failure.message(),
            failure.line().unwrap_or(UNKNOWN_POSITION),
            failure.column().unwrap_or(UNKNOWN_POSITION),
        )
    }

    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            format!("parser engine panicked: {}", s)
        } else if let Some(s) = payload.downcast_ref::<String>() {
            format!("parser engine panicked: {}", s)
        } else {
            "parser engine panicked".to_string()
        };

        Self::without_position(message)
    }

    /// Both coordinates are known.
    pub fn has_position(&self) -> bool {
        self.line != UNKNOWN_POSITION && self.column != UNKNOWN_POSITION
    }
}

/// The shape every engine error has to expose so the facade can report it.
pub trait Failure {
    fn message(&self) -> String;

    fn line(&self) -> Option<usize> {
        None
    }

    fn column(&self) -> Option<usize> {
        None
    }
}

impl Failure for ParseFailure {
    fn message(&self) -> String {
        self.message.clone()
    }

    fn line(&self) -> Option<usize> {
        Some(self.line)
    }

    fn column(&self) -> Option<usize> {
        Some(self.column)
    }
}

impl Failure for String {
    fn message(&self) -> String {
        self.clone()
    }
}
