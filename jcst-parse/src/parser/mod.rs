#![forbid(unsafe_code)]

mod decision;
mod decl;
mod expr;
mod primary;
mod stmt;
mod types;

use std::mem;

use jcst_syntax::{span, Element, Node, NodeKind, Span, Token, TokenKind, TokenSet};
use tracing::debug;

use crate::error::{ParseError, SyntaxErrorKind};
use crate::{Parse, ParseConfig};

use decision::SYNC;

pub(crate) type PResult<T> = Result<T, ParseError>;

/// Java 8 parser over a lexed token slice.
///
/// The slice is expected to end with an `Eof` token; one is synthesized at
/// the end of the last token otherwise.
pub struct Parser<'t, 'src> {
    tokens: &'t [Token<'src>],
    idx: usize,
    eof: Token<'src>,
    errors: Vec<ParseError>,
    depth: usize,
    speculating: u32,
    config: ParseConfig,
}

impl<'t, 'src> Parser<'t, 'src> {
    pub fn new(tokens: &'t [Token<'src>]) -> Self {
        Self::with_config(tokens, &ParseConfig::default())
    }

    pub fn with_config(tokens: &'t [Token<'src>], config: &ParseConfig) -> Self {
        let eof = match tokens.last() {
            Some(tok) if tok.kind == TokenKind::Eof => *tok,
            Some(tok) => Token::new(TokenKind::Eof, "", span(tok.end(), 0)),
            None => Token::new(TokenKind::Eof, "", span(0, 0)),
        };
        Self {
            tokens,
            idx: 0,
            eof,
            errors: Vec::new(),
            depth: 0,
            speculating: 0,
            config: config.clone(),
        }
    }

    /// Parses a whole source file. The root is a `CompilationUnit` whose last
    /// child is the `Eof` token.
    pub fn parse_compilation_unit(&mut self) -> Parse<'src> {
        let root = self.compilation_unit();
        Parse {
            root,
            errors: mem::take(&mut self.errors),
        }
    }

    /// Parses one expression followed by end of input. The root is an
    /// `ExpressionRoot` holding the expression and the `Eof` token.
    pub fn parse_expression(&mut self) -> Parse<'src> {
        let mut children = Vec::new();
        match self.expression() {
            Ok(expr) => {
                children.push(expr.into());
                if !self.at(TokenKind::Eof) {
                    let found = self.peek();
                    let err = ParseError::new(
                        SyntaxErrorKind::UnexpectedToken {
                            expected: TokenKind::Eof,
                            found: found.kind,
                        },
                        found.span,
                    );
                    if let Err(err) = self.report(err) {
                        self.errors.push(err);
                    }
                    self.sweep_rest(&mut children);
                }
            }
            Err(err) => self.abandon(0, 0, err, &mut children),
        }
        children.push(self.bump().into());
        let root = self.finish(NodeKind::ExpressionRoot, children);
        Parse {
            root,
            errors: mem::take(&mut self.errors),
        }
    }

    // ---------------------------------------------------------------------
    // Cursor
    // ---------------------------------------------------------------------

    fn token(&self, i: usize) -> Token<'src> {
        self.tokens.get(i).copied().unwrap_or(self.eof)
    }

    pub(super) fn peek(&self) -> Token<'src> {
        self.token(self.idx)
    }

    /// Kind of the token `k` positions ahead of the cursor.
    pub(super) fn nth(&self, k: usize) -> TokenKind {
        self.token(self.idx + k).kind
    }

    pub(super) fn at(&self, kind: TokenKind) -> bool {
        self.nth(0) == kind
    }

    pub(super) fn at_any(&self, set: TokenSet) -> bool {
        set.contains(self.nth(0))
    }

    /// Whether the tokens at `k` and `k + 1` touch with no gap between them.
    pub(super) fn adjacent(&self, k: usize) -> bool {
        self.token(self.idx + k).end() == self.token(self.idx + k + 1).start()
    }

    pub(super) fn bump(&mut self) -> Token<'src> {
        let tok = self.peek();
        if self.idx < self.tokens.len() {
            self.idx += 1;
        }
        tok
    }

    pub(super) fn eat(&mut self, kind: TokenKind) -> Option<Token<'src>> {
        if self.at(kind) { Some(self.bump()) } else { None }
    }

    pub(super) fn mark(&self) -> usize {
        self.idx
    }

    pub(super) fn reset(&mut self, mark: usize) {
        self.idx = mark;
    }

    // ---------------------------------------------------------------------
    // Node building
    // ---------------------------------------------------------------------

    /// Zero-length span at the end of the last consumed token.
    fn here(&self) -> Span {
        let at = match self.idx.checked_sub(1) {
            Some(prev) => self.token(prev).end(),
            None => self.peek().start(),
        };
        span(at, 0)
    }

    pub(super) fn finish(&self, kind: NodeKind, children: Vec<Element<'src>>) -> Node<'src> {
        Node::spanning(kind, children, self.here())
    }

    /// `lead` followed by `node`, wrapped in an `Error` node. Used when a
    /// prefix was consumed before a decision found no viable alternative.
    pub(super) fn error_after(&self, lead: Option<Node<'src>>, node: Node<'src>) -> Node<'src> {
        match lead {
            Some(lead) => self.finish(NodeKind::Error, vec![lead.into(), node.into()]),
            None => node,
        }
    }

    // ---------------------------------------------------------------------
    // Errors and recovery
    // ---------------------------------------------------------------------

    fn recovering(&self) -> bool {
        self.config.recovery && self.speculating == 0
    }

    /// Records a recoverable error. With recovery off, or inside a trial
    /// parse, the error is handed back instead.
    ///
    /// A second error at the same token offset as the previous one is a
    /// cascade of the first and is dropped.
    pub(super) fn report(&mut self, err: ParseError) -> PResult<()> {
        if !self.recovering() {
            return Err(err);
        }
        if self.errors.last().is_some_and(|last| last.offset() == err.offset()) {
            debug!(error = %err.kind, offset = err.offset(), "suppressed cascading error");
            return Ok(());
        }
        debug!(error = %err.kind, offset = err.offset(), "recovered");
        self.errors.push(err);
        Ok(())
    }

    /// Consumes a required token into `out`.
    ///
    /// On a mismatch, if the token after the current one is the expected
    /// kind the current token is skipped into an `Error` node; otherwise a
    /// `Missing` element is synthesized and nothing is consumed.
    pub(super) fn expect(&mut self, kind: TokenKind, out: &mut Vec<Element<'src>>) -> PResult<()> {
        if self.at(kind) {
            out.push(self.bump().into());
            return Ok(());
        }
        let found = self.peek();
        self.report(ParseError::new(
            SyntaxErrorKind::UnexpectedToken {
                expected: kind,
                found: found.kind,
            },
            found.span,
        ))?;
        if found.kind != TokenKind::Eof && self.nth(1) == kind {
            let skipped = self.bump();
            out.push(Node::spanning(NodeKind::Error, vec![skipped.into()], skipped.span).into());
            out.push(self.bump().into());
        } else {
            out.push(Element::Missing {
                expected: kind,
                span: self.here(),
            });
        }
        Ok(())
    }

    /// The error raised when a decision point matches no alternative.
    pub(super) fn reject(&self, rule: &'static str) -> ParseError {
        let found = self.peek();
        ParseError::new(
            SyntaxErrorKind::NoViableAlternative {
                rule,
                found: found.kind,
            },
            found.span,
        )
    }

    /// Records a `NoViableAlternative` and yields an `Error` node holding the
    /// offending token, unless that token is a synchronization point.
    pub(super) fn no_viable(&mut self, rule: &'static str) -> PResult<Node<'src>> {
        let err = self.reject(rule);
        self.report(err)?;
        let mut children = Vec::new();
        if !self.at_any(SYNC) {
            children.push(self.bump().into());
        }
        Ok(self.finish(NodeKind::Error, children))
    }

    /// Keeps list loops moving: when `node` consumed nothing since `before`,
    /// the current token is swallowed into an `Error` node.
    pub(super) fn ensure_progress(&mut self, before: usize, node: Node<'src>) -> Node<'src> {
        if self.idx != before || self.at(TokenKind::Eof) {
            return node;
        }
        let tok = self.bump();
        let mut children = Vec::new();
        if node.kind() != NodeKind::Error || !node.children().is_empty() {
            children.push(node.into());
        }
        children.push(tok.into());
        self.finish(NodeKind::Error, children)
    }

    /// Runs a recursive rule one nesting level deeper. Passing
    /// `ParseConfig::max_depth` is fatal.
    pub(super) fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= self.config.max_depth {
            let at = self.peek();
            debug!(limit = self.config.max_depth, offset = at.start(), "nesting limit reached");
            return Err(ParseError::new(
                SyntaxErrorKind::TooDeeplyNested {
                    limit: self.config.max_depth,
                },
                at.span,
            ));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// Gives up on the item that started at `mark`: errors recorded since
    /// `error_mark` are dropped in favour of `err`, and every token up to
    /// `Eof` lands in one trailing `Error` node.
    pub(super) fn abandon(
        &mut self,
        mark: usize,
        error_mark: usize,
        err: ParseError,
        out: &mut Vec<Element<'src>>,
    ) {
        debug!(error = %err.kind, offset = err.offset(), "abandoning parse");
        self.reset(mark);
        self.errors.truncate(error_mark);
        self.errors.push(err);
        self.sweep_rest(out);
    }

    fn sweep_rest(&mut self, out: &mut Vec<Element<'src>>) {
        let mut rest = Vec::new();
        while !self.at(TokenKind::Eof) {
            rest.push(self.bump().into());
        }
        if !rest.is_empty() {
            out.push(self.finish(NodeKind::Error, rest).into());
        }
    }
}
