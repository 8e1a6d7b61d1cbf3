use std::borrow::Cow;

/// A fragment matched by a grammar rule.
///
/// Rules either match a single token or an ordered run of tokens. Anything else
/// a rule might produce (numbers, unit, ...) is `Unrecognized`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matched<'a> {
    Token(Cow<'a, str>),
    Sequence(Vec<Cow<'a, str>>),
    Unrecognized,
}

impl<'a> Matched<'a> {
    pub fn token<T: Into<Cow<'a, str>>>(token: T) -> Self {
        Matched::Token(token.into())
    }

    pub fn sequence<I>(tokens: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Cow<'a, str>>,
    {
        Matched::Sequence(tokens.into_iter().map(Into::into).collect())
    }

    /// Tokens are returned as they are, sequences are concatenated without a
    /// separator and unrecognized fragments become the empty string.
    pub fn into_string(self) -> String {
        match self {
            Matched::Token(token) => token.into_owned(),
            Matched::Sequence(tokens) => tokens.concat(),
            Matched::Unrecognized => String::new(),
        }
    }
}

impl<'a> From<&'a str> for Matched<'a> {
    fn from(token: &'a str) -> Self {
        Matched::token(token)
    }
}

impl<'a> From<String> for Matched<'a> {
    fn from(token: String) -> Self {
        Matched::token(token)
    }
}

impl<'a> From<&'a String> for Matched<'a> {
    fn from(token: &'a String) -> Self {
        Matched::token(token.as_str())
    }
}

impl<'a> From<char> for Matched<'a> {
    fn from(c: char) -> Self {
        Matched::token(c.to_string())
    }
}

impl<'a> From<Vec<&'a str>> for Matched<'a> {
    fn from(tokens: Vec<&'a str>) -> Self {
        Matched::sequence(tokens)
    }
}

impl<'a> From<Vec<String>> for Matched<'a> {
    fn from(tokens: Vec<String>) -> Self {
        Matched::sequence(tokens)
    }
}

impl<'a> From<Vec<char>> for Matched<'a> {
    fn from(chars: Vec<char>) -> Self {
        Matched::sequence(chars.into_iter().map(String::from))
    }
}

impl<'a> From<&'a [&'a str]> for Matched<'a> {
    fn from(tokens: &'a [&'a str]) -> Self {
        Matched::sequence(tokens.iter().copied())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for Matched<'a> {
    fn from(tokens: [&'a str; N]) -> Self {
        Matched::sequence(tokens)
    }
}

macro_rules! unrecognized_fragment {
    ($($t:ty),*) => {
        $(
            impl<'a> From<$t> for Matched<'a> {
                fn from(_: $t) -> Self {
                    Matched::Unrecognized
                }
            }
        )*
    };
}

unrecognized_fragment!((), bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
