#![forbid(unsafe_code)]

use std::slice;

use crate::{Element, Node, Span, Token, TokenKind};

/// Streaming consumer of a tree. All methods default to no-ops.
pub trait Listener<'src> {
    fn enter(&mut self, _node: &Node<'src>) {}
    fn exit(&mut self, _node: &Node<'src>) {}
    fn token(&mut self, _token: &Token<'src>) {}
    fn missing(&mut self, _expected: TokenKind, _span: Span) {}
}

/// Depth-first, source-order traversal. Uses an explicit stack, so tree
/// depth does not consume host stack.
pub fn walk<'src, L: Listener<'src> + ?Sized>(root: &Node<'src>, listener: &mut L) {
    let mut stack: Vec<(&Node<'src>, slice::Iter<'_, Element<'src>>)> = Vec::new();
    listener.enter(root);
    stack.push((root, root.children().iter()));

    while let Some((node, iter)) = stack.last_mut() {
        match iter.next() {
            Some(Element::Node(child)) => {
                listener.enter(child);
                stack.push((child, child.children().iter()));
            }
            Some(Element::Token(tok)) => listener.token(tok),
            Some(Element::Missing { expected, span }) => listener.missing(*expected, *span),
            Some(Element::Absent) => {}
            None => {
                listener.exit(*node);
                stack.pop();
            }
        }
    }
}
