#![forbid(unsafe_code)]

//! Predictive recursive-descent parser producing a Java 8 concrete syntax
//! tree.

mod error;
mod parser;

use jcst_lex::Lexer;
use jcst_syntax::Node;

pub use error::{ParseError, SyntaxErrorKind};
pub use parser::Parser;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseConfig {
    /// Deepest nesting of expressions, statements, types and bodies before
    /// the parse is abandoned with `TooDeeplyNested`.
    pub max_depth: usize,
    /// Single-token recovery. When off, the first syntax error ends the parse.
    pub recovery: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_depth: 96,
            recovery: true,
        }
    }
}

impl ParseConfig {
    pub fn strict() -> Self {
        Self {
            recovery: false,
            ..Self::default()
        }
    }
}

/// A finished parse: the tree plus every error recorded along the way.
#[derive(Debug)]
pub struct Parse<'src> {
    pub root: Node<'src>,
    pub errors: Vec<ParseError>,
}

impl<'src> Parse<'src> {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The tree when the parse was clean, otherwise the first error.
    pub fn into_result(self) -> Result<Node<'src>, ParseError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.root),
        }
    }
}

pub fn parse_source(src: &str) -> miette::Result<Parse<'_>> {
    parse_source_with_config(src, &ParseConfig::default())
}

pub fn parse_source_with_config<'src>(src: &'src str, config: &ParseConfig) -> miette::Result<Parse<'src>> {
    let tokens = Lexer::new(src).lex()?;
    let mut parser = Parser::with_config(&tokens, config);
    Ok(parser.parse_compilation_unit())
}

/// Parses a single expression followed by end of input.
pub fn parse_expression_source(src: &str) -> miette::Result<Parse<'_>> {
    let tokens = Lexer::new(src).lex()?;
    let mut parser = Parser::new(&tokens);
    Ok(parser.parse_expression())
}

/// Parses without recovery; the first syntax error becomes the `Err`.
pub fn parse_source_strict(src: &str) -> miette::Result<Node<'_>> {
    let parse = parse_source_with_config(src, &ParseConfig::strict())?;
    Ok(parse.into_result()?)
}
