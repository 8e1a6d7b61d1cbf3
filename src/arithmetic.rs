// Arithmetic expression engine
//
// A small nom grammar over `+ - * /`, parentheses, numbers and identifiers. It is
// the engine the command line front end drives through the parse facade.

pub mod ast;
pub(crate) mod parser;

pub use ast::{Expr, Operator, Position};

use crate::facade::{ParseFailure, ParserEngine};
use crate::grammar::{GrammarContext, SyntaxError};

pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Upper bound for any requested nesting limit. The grammar recurses once per level,
/// so deeper limits would run out of stack before reporting "nesting too deep".
pub const MAX_DEPTH_CEILING: usize = 128;

/// Grammar context as seen by the arithmetic rules.
pub type ArithmeticContext<'p> = GrammarContext<'p, ArithmeticParser, SyntaxError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArithmeticParser {
    max_depth: usize,
}

impl ArithmeticParser {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Limit how deeply parentheses and negations may nest, at most `MAX_DEPTH_CEILING`.
    pub fn with_max_depth(max_depth: usize) -> Self {
        if max_depth > MAX_DEPTH_CEILING {
            log::warn!(
                "nesting limit {} lowered to {}",
                max_depth,
                MAX_DEPTH_CEILING
            );
        }

        Self {
            max_depth: max_depth.min(MAX_DEPTH_CEILING),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for ArithmeticParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserEngine for ArithmeticParser {
    type Tree = Expr;
    type Error = ParseFailure;

    fn parse(&self, source: &str) -> Result<Expr, ParseFailure> {
        parser::parse(self, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_depth_is_capped() {
        assert_eq!(ArithmeticParser::new().max_depth(), DEFAULT_MAX_DEPTH);
        assert_eq!(ArithmeticParser::with_max_depth(3).max_depth(), 3);
        assert_eq!(
            ArithmeticParser::with_max_depth(10_000).max_depth(),
            MAX_DEPTH_CEILING
        );
        assert_eq!(
            ArithmeticParser::with_max_depth(usize::MAX).max_depth(),
            MAX_DEPTH_CEILING
        );
    }

    #[test]
    fn test_deep_nesting_with_huge_limit_is_rejected() {
        let source = format!("{}1{}", "(".repeat(2000), ")".repeat(2000));
        let result = ArithmeticParser::with_max_depth(1_000_000).parse(&source);

        assert_matches!(result, Err(ParseFailure { ref message, .. }) if message == "nesting too deep");
    }
}
