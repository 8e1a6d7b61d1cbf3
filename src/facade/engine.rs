use super::failure::Failure;

/// The parser engine the facade drives.
///
/// The facade treats the engine as a black box: it hands over the complete
/// source and gets back either a tree or something it can turn into a
/// `ParseFailure`.
pub trait ParserEngine {
    type Tree;
    type Error: Failure;

    fn parse(&self, source: &str) -> Result<Self::Tree, Self::Error>;
}

impl<E: ParserEngine + ?Sized> ParserEngine for &E {
    type Tree = E::Tree;
    type Error = E::Error;

    fn parse(&self, source: &str) -> Result<Self::Tree, Self::Error> {
        (**self).parse(source)
    }
}

impl<E: ParserEngine + ?Sized> ParserEngine for Box<E> {
    type Tree = E::Tree;
    type Error = E::Error;

    fn parse(&self, source: &str) -> Result<Self::Tree, Self::Error> {
        (**self).parse(source)
    }
}
