#![forbid(unsafe_code)]
#![allow(unused_assignments)]

use jcst_syntax::{Span, TokenKind};
use miette::Diagnostic;
use thiserror::Error;

/// What went wrong at a syntax error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("no viable alternative for {rule} at {found}")]
    NoViableAlternative { rule: &'static str, found: TokenKind },
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: TokenKind, found: TokenKind },
    #[error("not a statement")]
    NotAStatement,
    #[error("'try' without 'catch' or 'finally'")]
    MissingCatchOrFinally,
    #[error("nesting deeper than {limit} levels")]
    TooDeeplyNested { limit: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, Error, Diagnostic)]
#[error("parse error: {kind}")]
#[diagnostic(code(jcst::parse))]
#[allow(unused_assignments)]
pub struct ParseError {
    pub kind: SyntaxErrorKind,
    #[label("{kind}")]
    pub span: Span,
}

impl ParseError {
    pub fn new(kind: SyntaxErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Fatal errors abandon the parse instead of being recovered from.
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind, SyntaxErrorKind::TooDeeplyNested { .. })
    }

    pub fn offset(&self) -> usize {
        self.span.offset()
    }
}
