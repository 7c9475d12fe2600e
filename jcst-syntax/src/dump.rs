#![forbid(unsafe_code)]

use crate::{walk, Listener, Node, Span, Token, TokenKind};

/// Renders a tree as a compact S-expression.
///
/// Nodes print as `(Kind children...)`, tokens as their text, synthesized
/// tokens as `<missing X>`. Absent optional slots and the end-of-input token
/// are omitted. For example `1 - 2 - 3` dumps as
/// `(AdditiveExpression (AdditiveExpression (Literal 1) - (Literal 2)) - (Literal 3))`.
pub fn dump(root: &Node<'_>) -> String {
    let mut printer = SexprPrinter::default();
    walk(root, &mut printer);
    printer.out
}

#[derive(Default)]
struct SexprPrinter {
    out: String,
}

impl SexprPrinter {
    fn space(&mut self) {
        if !self.out.is_empty() {
            self.out.push(' ');
        }
    }
}

impl<'src> Listener<'src> for SexprPrinter {
    fn enter(&mut self, node: &Node<'src>) {
        self.space();
        self.out.push('(');
        self.out.push_str(node.kind().name());
    }

    fn exit(&mut self, _node: &Node<'src>) {
        self.out.push(')');
    }

    fn token(&mut self, token: &Token<'src>) {
        if token.kind == TokenKind::Eof {
            return;
        }
        self.space();
        self.out.push_str(token.text);
    }

    fn missing(&mut self, expected: TokenKind, _span: Span) {
        self.space();
        self.out.push_str("<missing ");
        self.out.push_str(expected.describe());
        self.out.push('>');
    }
}
