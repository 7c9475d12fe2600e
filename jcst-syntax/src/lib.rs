#![forbid(unsafe_code)]

//! Shared syntax model: spans, tokens, token sets, node kinds and the
//! concrete syntax tree.

mod dump;
mod kind;
mod node;
mod token;
mod token_set;
mod walk;

use miette::SourceSpan;

pub use dump::dump;
pub use kind::{NodeCategory, NodeKind};
pub use node::{Descendants, Element, Node, Tokens};
pub use token::{Token, TokenKind};
pub use token_set::TokenSet;
pub use walk::{walk, Listener};

pub type Span = SourceSpan;

pub fn span(start: usize, len: usize) -> Span {
    SourceSpan::new(start.into(), len)
}

pub fn span_between(start: usize, end: usize) -> Span {
    debug_assert!(end >= start);
    span(start, end - start)
}

/// Smallest span covering both arguments.
pub fn join(a: Span, b: Span) -> Span {
    let start = a.offset().min(b.offset());
    let end = (a.offset() + a.len()).max(b.offset() + b.len());
    span_between(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(kind: TokenKind, text: &str, start: usize) -> Token<'_> {
        Token::new(kind, text, span(start, text.len()))
    }

    #[test]
    fn join_covers_both_spans_in_any_order() {
        let a = span(4, 2);
        let b = span(10, 3);
        assert_eq!(join(a, b), span_between(4, 13));
        assert_eq!(join(b, a), span_between(4, 13));
    }

    #[test]
    fn token_sets_are_const_and_disjoint_by_kind() {
        const OPEN: TokenSet = TokenSet::new(&[TokenKind::LParen, TokenKind::LBracket]);
        assert!(OPEN.contains(TokenKind::LParen));
        assert!(!OPEN.contains(TokenKind::RParen));
        assert!(OPEN.union(TokenSet::new(&[TokenKind::Eof])).contains(TokenKind::Eof));
        assert!(TokenSet::EMPTY.is_empty());
    }

    #[test]
    fn keyword_classification() {
        assert!(TokenKind::KwNull.is_keyword());
        assert!(TokenKind::KwNull.is_literal());
        assert!(!TokenKind::LParen.is_keyword());
        assert_eq!(TokenKind::Semi.to_string(), "';'");
        assert_eq!(TokenKind::Identifier.to_string(), "identifier");
    }

    #[test]
    fn node_span_is_union_of_children() {
        let node = Node::spanning(
            NodeKind::AdditiveExpression,
            vec![
                tok(TokenKind::Identifier, "a", 0).into(),
                Element::Absent,
                tok(TokenKind::Plus, "+", 2).into(),
                tok(TokenKind::Identifier, "b", 4).into(),
            ],
            span(0, 0),
        );
        assert_eq!(node.span(), span_between(0, 5));
        assert_eq!(node.text(), "a + b");
        assert!(!node.has_errors());
    }

    #[test]
    fn missing_children_mark_errors() {
        let node = Node::spanning(
            NodeKind::ExpressionStatement,
            vec![Element::Missing { expected: TokenKind::Semi, span: span(3, 0) }],
            span(3, 0),
        );
        assert!(node.has_errors());
        assert_eq!(dump(&node), "(ExpressionStatement <missing ;>)");
    }

    #[test]
    fn categories_cover_every_kind() {
        for kind in NodeKind::ALL {
            let _ = kind.category();
            assert!(!kind.name().is_empty());
        }
        assert_eq!(NodeKind::CastExpression.category(), NodeCategory::Expression);
        assert_eq!(NodeKind::Literal.category(), NodeCategory::Literal);
    }

    #[test]
    fn deep_chains_drop_without_recursion() {
        let mut node = Node::spanning(
            NodeKind::Literal,
            vec![tok(TokenKind::IntegerLiteral, "1", 0).into()],
            span(0, 0),
        );
        for _ in 0..200_000 {
            node = Node::spanning(NodeKind::AdditiveExpression, vec![node.into()], span(0, 0));
        }
        assert_eq!(node.tokens().count(), 1);
        assert_eq!(node.descendants().count(), 200_001);
        drop(node);
    }
}
