// Grammar context
//
// The scaffold a parser engine hands to its grammar rules: live position accessors,
// the error kind to build failures from and `normalize` for matched fragments.

pub mod matched;

pub use matched::Matched;

use crate::facade::ParseFailure;

/// Builds the error values a grammar raises on a local failure.
pub trait ErrorKind {
    type Error;

    fn construct(&self, message: String, line: usize, column: usize) -> Self::Error;
}

/// The default error kind: a plain `ParseFailure` at the given position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyntaxError;

impl ErrorKind for SyntaxError {
    type Error = ParseFailure;

    fn construct(&self, message: String, line: usize, column: usize) -> ParseFailure {
        ParseFailure::new(message, line, column)
    }
}

/// Turn a matched fragment into its canonical string form.
pub fn normalize<'a, M: Into<Matched<'a>>>(input: M) -> String {
    input.into().into_string()
}

pub struct GrammarContext<'p, P: ?Sized, K> {
    parser: &'p P,
    line_number: Box<dyn Fn() -> usize + 'p>,
    column_number: Box<dyn Fn() -> usize + 'p>,
    error_kind: K,
}

impl<'p, P: ?Sized, K: ErrorKind> GrammarContext<'p, P, K> {
    pub fn new<L, C>(parser: &'p P, line_number: L, column_number: C, error_kind: K) -> Self
    where
        L: Fn() -> usize + 'p,
        C: Fn() -> usize + 'p,
    {
        Self {
            parser,
            line_number: Box::new(line_number),
            column_number: Box::new(column_number),
            error_kind,
        }
    }

    /// Like `new`, but resolves the error kind by calling `factory` once, right here.
    pub fn with_error_factory<L, C, F>(
        parser: &'p P,
        line_number: L,
        column_number: C,
        factory: F,
    ) -> Self
    where
        L: Fn() -> usize + 'p,
        C: Fn() -> usize + 'p,
        F: FnOnce() -> K,
    {
        Self::new(parser, line_number, column_number, factory())
    }

    pub fn parser(&self) -> &'p P {
        self.parser
    }

    /// The line the engine is at right now. Never cached.
    pub fn line_number(&self) -> usize {
        (self.line_number)()
    }

    /// The column the engine is at right now. Never cached.
    pub fn column_number(&self) -> usize {
        (self.column_number)()
    }

    pub fn error_kind(&self) -> &K {
        &self.error_kind
    }

    /// Build (not raise) an error of this context's kind at the live position.
    pub fn error<M: Into<String>>(&self, message: M) -> K::Error {
        self.error_kind
            .construct(message.into(), self.line_number(), self.column_number())
    }

    pub fn normalize<'a, M: Into<Matched<'a>>>(&self, input: M) -> String {
        normalize(input)
    }
}

impl<'p, P: ?Sized, K: std::fmt::Debug> std::fmt::Debug for GrammarContext<'p, P, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrammarContext")
            .field("error_kind", &self.error_kind)
            .finish_non_exhaustive()
    }
}
