// Parse facade
//
// Runs a parser engine on a source text. Failures never leave this layer: they are
// handed to an error reporter bound to the same source and the caller gets `None`.

pub mod engine;
pub mod failure;

pub use engine::ParserEngine;
pub use failure::{Failure, ParseFailure, UNKNOWN_POSITION};

use crate::reporting::{Reporter, ReporterFactory};
use std::panic::{self, AssertUnwindSafe};

#[derive(Debug, Clone)]
pub struct ParseFacade<E, F> {
    engine: E,
    reporters: F,
}

impl<E, F> ParseFacade<E, F>
where
    E: ParserEngine,
    F: ReporterFactory,
{
    pub fn new(engine: E, reporters: F) -> Self {
        Self { engine, reporters }
    }

    /// Parse `source`, returning the engine's tree on success.
    ///
    /// Any failure of the engine, including a panic, is reported exactly once
    /// through a reporter created for `source` and results in `None`.
    pub fn parse(&self, source: &str) -> Option<E::Tree> {
        log::trace!("parsing source of {} bytes", source.len());

        match self.run_engine(source) {
            Ok(tree) => {
                log::debug!("parse succeeded");
                Some(tree)
            }
            Err(failure) => {
                log::debug!("parse failed: {}", failure);
                self.report(source, &failure);
                None
            }
        }
    }

    fn run_engine(&self, source: &str) -> Result<E::Tree, ParseFailure> {
        let engine = &self.engine;

        match panic::catch_unwind(AssertUnwindSafe(|| engine.parse(source))) {
            Ok(Ok(tree)) => Ok(tree),
            Ok(Err(e)) => Err(ParseFailure::from_failure(&e)),
            Err(payload) => {
                log::warn!("parser engine panicked");
                Err(ParseFailure::from_panic(payload))
            }
        }
    }

    fn report(&self, source: &str, failure: &ParseFailure) {
        let mut reporter = self.reporters.for_source(source);
        reporter.report_error(&failure.message, failure.line, failure.column);
    }
}
