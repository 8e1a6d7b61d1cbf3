use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, alphanumeric1, char, digit1, multispace0};
use nom::combinator::{map, map_res, opt, recognize, value};
use nom::error::{Error, ErrorKind};
use nom::multi::{fold_many0, many0};
use nom::sequence::{pair, terminated};
use nom::{Err, IResult};
use nom_locate::LocatedSpan;
use std::cell::Cell;

use super::ast::{Expr, Operator, Position};
use super::{ArithmeticContext, ArithmeticParser};
use crate::facade::ParseFailure;
use crate::grammar::{GrammarContext, SyntaxError};

pub(crate) type Input<'a> = LocatedSpan<&'a str, State<'a>>;

pub(crate) type ParseResult<'a, T> = IResult<Input<'a>, T, Error<Input<'a>>>;

/// What every rule can see while parsing: the grammar context and the cursor
/// that backs the context's position accessors.
#[derive(Debug, Clone, Copy)]
pub(crate) struct State<'a> {
    context: &'a ArithmeticContext<'a>,
    cursor: &'a Cursor,
}

/// The furthest position any rule has looked at.
#[derive(Debug)]
pub(crate) struct Cursor {
    offset: Cell<usize>,
    line: Cell<usize>,
    column: Cell<usize>,
}

impl Cursor {
    fn new() -> Self {
        Self {
            offset: Cell::new(0),
            line: Cell::new(1),
            column: Cell::new(1),
        }
    }

    fn advance_to(&self, input: &Input) {
        if input.location_offset() >= self.offset.get() {
            self.offset.set(input.location_offset());
            self.line.set(input.location_line() as usize);
            self.column.set(input.get_utf8_column());
        }
    }

    fn offset(&self) -> usize {
        self.offset.get()
    }

    fn line(&self) -> usize {
        self.line.get()
    }

    fn column(&self) -> usize {
        self.column.get()
    }
}

pub(crate) fn parse(parser: &ArithmeticParser, source: &str) -> Result<Expr, ParseFailure> {
    let cursor = Cursor::new();
    let context: ArithmeticContext<'_> =
        GrammarContext::new(parser, || cursor.line(), || cursor.column(), SyntaxError);

    if is_blank(source) {
        return Err(context.error("empty input"));
    }

    let state = State {
        context: &context,
        cursor: &cursor,
    };

    match program(Input::new_extra(source, state)) {
        Ok((rest, tree)) if rest.fragment().is_empty() => {
            log::trace!("parsed expression: {}", tree);
            Ok(tree)
        }
        Ok((rest, _)) => {
            cursor.advance_to(&rest);
            Err(unexpected_input(&context, &cursor, source))
        }
        Err(Err::Failure(e)) if e.code == ErrorKind::TooLarge => {
            Err(context.error("nesting too deep"))
        }
        Err(_) => Err(unexpected_input(&context, &cursor, source)),
    }
}

// The same characters `multispace0` skips between tokens.
fn is_blank(source: &str) -> bool {
    source.chars().all(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

fn unexpected_input(context: &ArithmeticContext, cursor: &Cursor, source: &str) -> ParseFailure {
    if cursor.offset() >= source.len() {
        context.error("unexpected end of input")
    } else {
        context.error("unexpected token")
    }
}

fn program<'a>(input: Input<'a>) -> ParseResult<'a, Expr> {
    terminated(|i: Input<'a>| expression(i, 0), multispace0)(input)
}

/// ```grammar
/// <expression> -> <term> (("+" | "-") <term>)*
/// ```
fn expression<'a>(input: Input<'a>, depth: usize) -> ParseResult<'a, Expr> {
    let (input, first) = term(input, depth)?;

    fold_many0(
        pair(token(additive), move |i: Input<'a>| term(i, depth)),
        first,
        |lhs, ((_, operator), rhs)| Expr::binary(operator, lhs, rhs),
    )(input)
}

/// ```grammar
/// <term> -> <factor> (("*" | "/") <factor>)*
/// ```
fn term<'a>(input: Input<'a>, depth: usize) -> ParseResult<'a, Expr> {
    let (input, first) = factor(input, depth)?;

    fold_many0(
        pair(token(multiplicative), move |i: Input<'a>| factor(i, depth)),
        first,
        |lhs, ((_, operator), rhs)| Expr::binary(operator, lhs, rhs),
    )(input)
}

/// ```grammar
/// <factor> -> "-" <factor> | <number> | <identifier> | "(" <expression> ")"
/// ```
fn factor<'a>(input: Input<'a>, depth: usize) -> ParseResult<'a, Expr> {
    alt((
        move |i: Input<'a>| negation(i, depth),
        map(token(number), |(position, n)| Expr::number(n, position)),
        map(token(identifier), |(position, name)| {
            Expr::identifier(name, position)
        }),
        move |i: Input<'a>| parenthesized(i, depth),
    ))(input)
}

fn negation<'a>(input: Input<'a>, depth: usize) -> ParseResult<'a, Expr> {
    let (rest, (position, _)) = token(char('-'))(input)?;
    let depth = descend(&rest, depth)?;
    let (rest, operand) = factor(rest, depth)?;

    Ok((rest, Expr::negate(operand, position)))
}

fn parenthesized<'a>(input: Input<'a>, depth: usize) -> ParseResult<'a, Expr> {
    let (rest, _) = token(char('('))(input)?;
    let depth = descend(&rest, depth)?;
    let (rest, inner) = expression(rest, depth)?;
    let (rest, _) = token(char(')'))(rest)?;

    Ok((rest, inner))
}

// Nesting beyond the parser's limit is a hard failure, alt must not try the next branch.
fn descend<'a>(input: &Input<'a>, depth: usize) -> Result<usize, Err<Error<Input<'a>>>> {
    if depth >= input.extra.context.parser().max_depth() {
        Err(Err::Failure(Error::new(input.clone(), ErrorKind::TooLarge)))
    } else {
        Ok(depth + 1)
    }
}

#[inline]
fn additive(input: Input) -> ParseResult<Operator> {
    alt((value(Operator::Add, char('+')), value(Operator::Sub, char('-'))))(input)
}

#[inline]
fn multiplicative(input: Input) -> ParseResult<Operator> {
    alt((value(Operator::Mul, char('*')), value(Operator::Div, char('/'))))(input)
}

/// ```grammar
/// <number> -> <digit>+ ("." <digit>+)?
/// ```
fn number<'a>(input: Input<'a>) -> ParseResult<'a, f64> {
    let digits = recognize(pair(digit1, opt(pair(char('.'), digit1))));

    map_res(digits, |text: Input<'a>| text.fragment().parse::<f64>())(input)
}

/// ```grammar
/// <identifier> -> (<letter> | "_") (<letter> | <digit> | "_")*
/// ```
fn identifier<'a>(input: Input<'a>) -> ParseResult<'a, String> {
    let context = input.extra.context;
    let head = alt((alpha1, tag("_")));
    let tail = many0(alt((alphanumeric1, tag("_"))));

    let parsed: ParseResult<'a, (Input<'a>, Vec<Input<'a>>)> = pair(head, tail)(input);
    let (rest, (first, others)) = parsed?;
    let fragments: Vec<&str> = std::iter::once(first)
        .chain(others)
        .map(|fragment| *fragment.fragment())
        .collect();

    Ok((rest, context.normalize(fragments)))
}

// Skips leading whitespace, records how far parsing got and remembers where the token starts.
fn token<'a, O, F>(mut parser: F) -> impl FnMut(Input<'a>) -> ParseResult<'a, (Position, O)>
where
    F: FnMut(Input<'a>) -> ParseResult<'a, O>,
{
    move |input: Input<'a>| {
        let (input, _) = multispace0::<_, Error<Input<'a>>>(input)?;
        input.extra.cursor.advance_to(&input);

        let position = Position::new(input.location_line() as usize, input.get_utf8_column());
        let (rest, output) = parser(input)?;

        Ok((rest, (position, output)))
    }
}

#[cfg(test)]
mod tests {
    use crate::arithmetic::{ArithmeticParser, Expr, Position, MAX_DEPTH_CEILING};
    use crate::facade::{ParseFailure, ParserEngine};

    fn parse(source: &str) -> Result<Expr, ParseFailure> {
        ArithmeticParser::new().parse(source)
    }

    fn assert_parse_as(source: &str, expected: &str) {
        assert_eq!(parse(source).unwrap().to_string(), expected)
    }

    fn assert_fails_with(source: &str, message: &str, line: usize, column: usize) {
        assert_eq!(
            parse(source),
            Err(ParseFailure::new(message, line, column)),
            "source: {:?}",
            source
        )
    }

    #[test]
    fn test_parse_literals() {
        assert_parse_as("42", "42");
        assert_parse_as("3.25", "3.25");
        assert_parse_as("foo_bar2", "foo_bar2");
        assert_parse_as("_tmp", "_tmp");
    }

    #[test]
    fn test_parse_binary() {
        assert_parse_as("1 + 2", "(+ 1 2)");
        assert_parse_as("1+2*3", "(+ 1 (* 2 3))");
        assert_parse_as("8 - 4 - 2", "(- (- 8 4) 2)");
        assert_parse_as("(1 + 2) * 3", "(* (+ 1 2) 3)");
        assert_parse_as("x / y / z", "(/ (/ x y) z)");
    }

    #[test]
    fn test_parse_negation() {
        assert_parse_as("-x * 2", "(* (- x) 2)");
        assert_parse_as("--1", "(- (- 1))");
        assert_parse_as("3 - -1", "(- 3 (- 1))");
    }

    #[test]
    fn test_positions_span_lines() {
        let tree = parse("1 +\n  foo").unwrap();

        match tree {
            Expr::Binary(_, lhs, rhs, position) => {
                assert_eq!(position, Position::new(1, 1));
                assert_eq!(lhs.position(), Position::new(1, 1));
                assert_eq!(rhs.position(), Position::new(2, 3));
            }
            other => panic!("expected binary expression, got {:?}", other),
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_parse_as("\n  (a)  \n", "a");
    }

    #[test]
    fn test_unexpected_token() {
        assert_fails_with("1 + )", "unexpected token", 1, 5);
        assert_fails_with("1 2", "unexpected token", 1, 3);
        assert_fails_with("1 $ 2", "unexpected token", 1, 3);
        assert_fails_with("3.", "unexpected token", 1, 2);
        assert_fails_with("(1 +\n  x y)", "unexpected token", 2, 5);
    }

    #[test]
    fn test_unexpected_end_of_input() {
        assert_fails_with("1 +", "unexpected end of input", 1, 4);
        assert_fails_with("(1 +\n  2\n", "unexpected end of input", 3, 1);
    }

    #[test]
    fn test_empty_input() {
        assert_fails_with("", "empty input", 1, 1);
        assert_fails_with("  \n\t", "empty input", 1, 1);
    }

    #[test]
    fn test_non_ascii_whitespace_is_not_blank() {
        assert_fails_with("\x0c", "unexpected token", 1, 1);
        assert_fails_with("1\x0c", "unexpected token", 1, 2);
        assert_fails_with("\u{a0}", "unexpected token", 1, 1);
    }

    #[test]
    fn test_nesting_limit_ceiling() {
        let parser = ArithmeticParser::with_max_depth(10_000);
        let nested = |depth: usize| format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

        assert!(parser.parse(&nested(MAX_DEPTH_CEILING)).is_ok());
        assert_eq!(
            parser.parse(&nested(MAX_DEPTH_CEILING + 1)),
            Err(ParseFailure::new("nesting too deep", 1, MAX_DEPTH_CEILING + 1))
        );
    }

    #[test]
    fn test_nesting_limit() {
        let parser = ArithmeticParser::with_max_depth(2);

        assert!(parser.parse("((1))").is_ok());
        assert_eq!(
            parser.parse("((( 1 )))"),
            Err(ParseFailure::new("nesting too deep", 1, 3))
        );
        assert_eq!(
            parser.parse("1 + --(2)"),
            Err(ParseFailure::new("nesting too deep", 1, 7))
        );
    }

    #[quickcheck]
    fn test_parse_never_panics(source: String) -> bool {
        let _ = parse(&source);
        true
    }
}
