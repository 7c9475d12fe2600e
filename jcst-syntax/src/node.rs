#![forbid(unsafe_code)]

use std::mem;
use std::slice;

use crate::{join, NodeKind, Span, Token, TokenKind};

/// One child slot of a [`Node`].
#[derive(Clone, Debug, PartialEq)]
pub enum Element<'src> {
    Node(Node<'src>),
    Token(Token<'src>),
    /// A required token that was not in the input and was synthesized by
    /// single-token recovery.
    Missing { expected: TokenKind, span: Span },
    /// An optional child that is not present.
    Absent,
}

impl<'src> Element<'src> {
    pub fn span(&self) -> Option<Span> {
        match self {
            Element::Node(n) => Some(n.span),
            Element::Token(t) => Some(t.span),
            Element::Missing { span, .. } => Some(*span),
            Element::Absent => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node<'src>> {
        match self {
            Element::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token<'src>> {
        match self {
            Element::Token(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Element::Absent)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Element::Missing { .. })
    }

    /// Kind of the node in this slot, if it holds one.
    pub fn node_kind(&self) -> Option<NodeKind> {
        self.as_node().map(Node::kind)
    }

    /// Kind of the token in this slot, if it holds one.
    pub fn token_kind(&self) -> Option<TokenKind> {
        self.as_token().map(|t| t.kind)
    }
}

impl<'src> From<Node<'src>> for Element<'src> {
    fn from(node: Node<'src>) -> Self {
        Element::Node(node)
    }
}

impl<'src> From<Token<'src>> for Element<'src> {
    fn from(token: Token<'src>) -> Self {
        Element::Token(token)
    }
}

impl<'src> From<Option<Node<'src>>> for Element<'src> {
    fn from(node: Option<Node<'src>>) -> Self {
        node.map_or(Element::Absent, Element::Node)
    }
}

impl<'src> From<Option<Token<'src>>> for Element<'src> {
    fn from(token: Option<Token<'src>>) -> Self {
        token.map_or(Element::Absent, Element::Token)
    }
}

/// A concrete syntax tree node. Owns its children exclusively.
#[derive(Clone, Debug, PartialEq)]
pub struct Node<'src> {
    kind: NodeKind,
    span: Span,
    children: Vec<Element<'src>>,
}

impl<'src> Node<'src> {
    /// Builds a node whose span is the union of its children's spans, or
    /// `fallback` when no child carries one.
    pub fn spanning(kind: NodeKind, children: Vec<Element<'src>>, fallback: Span) -> Self {
        let first = children.iter().find_map(Element::span);
        let last = children.iter().rev().find_map(Element::span);
        let span = match (first, last) {
            (Some(a), Some(b)) => join(a, b),
            _ => fallback,
        };
        Self { kind, span, children }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn children(&self) -> &[Element<'src>] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Element<'src>> {
        self.children.get(index)
    }

    pub fn child_nodes(&self) -> impl Iterator<Item = &Node<'src>> {
        self.children.iter().filter_map(Element::as_node)
    }

    pub fn child_tokens(&self) -> impl Iterator<Item = &Token<'src>> {
        self.children.iter().filter_map(Element::as_token)
    }

    /// First direct child node of the given kind.
    pub fn child_of(&self, kind: NodeKind) -> Option<&Node<'src>> {
        self.child_nodes().find(|n| n.kind == kind)
    }

    /// All terminal tokens below this node, in source order.
    pub fn tokens(&self) -> Tokens<'_, 'src> {
        Tokens {
            stack: vec![self.children.iter()],
        }
    }

    /// This node and every node below it, in pre-order.
    pub fn descendants(&self) -> Descendants<'_, 'src> {
        Descendants { stack: vec![self] }
    }

    pub fn find_all(&self, kind: NodeKind) -> impl Iterator<Item = &Node<'src>> {
        self.descendants().filter(move |n| n.kind == kind)
    }

    pub fn first(&self, kind: NodeKind) -> Option<&Node<'src>> {
        self.descendants().find(|n| n.kind == kind)
    }

    /// Whether recovery left an `Error` node or a synthesized token anywhere
    /// in this subtree.
    pub fn has_errors(&self) -> bool {
        self.descendants().any(|n| {
            n.kind == NodeKind::Error || n.children.iter().any(Element::is_missing)
        })
    }

    /// Token texts joined by single spaces.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for tok in self.tokens() {
            if tok.kind == TokenKind::Eof {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(tok.text);
        }
        out
    }
}

// Deep left-nested chains (`a + b + c + ...`) would otherwise recurse once per
// level when dropped.
impl Drop for Node<'_> {
    fn drop(&mut self) {
        let mut stack = mem::take(&mut self.children);
        while let Some(el) = stack.pop() {
            if let Element::Node(mut n) = el {
                stack.append(&mut n.children);
            }
        }
    }
}

pub struct Tokens<'a, 'src> {
    stack: Vec<slice::Iter<'a, Element<'src>>>,
}

impl<'a, 'src> Iterator for Tokens<'a, 'src> {
    type Item = &'a Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(Element::Token(t)) => return Some(t),
                Some(Element::Node(n)) => self.stack.push(n.children.iter()),
                Some(_) => {}
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

pub struct Descendants<'a, 'src> {
    stack: Vec<&'a Node<'src>>,
}

impl<'a, 'src> Iterator for Descendants<'a, 'src> {
    type Item = &'a Node<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().filter_map(Element::as_node));
        Some(node)
    }
}
