#![forbid(unsafe_code)]

//! Primaries and their suffix chains.
//!
//! Each suffix rule takes the already-built prefix as `Option<Element>`:
//! with `Some` it parses only the trailing tokens and wraps the prefix, with
//! `None` it parses the standalone form that starts an expression (`m(x)`,
//! `super.f`, `new T()`, `a[i]`). `primary` parses one head and then loops
//! over suffixes, so a chain like `a.b[0].c()` never recurses on its left.

use jcst_syntax::{Element, Node, NodeKind, TokenKind};

use super::decision::{Decision, PrimaryAlt, SuffixAlt, EXPRESSION_START, PRIMITIVE_TYPES};
use super::decl::BodyKind;
use super::{PResult, Parser};

impl<'t, 'src> Parser<'t, 'src> {
    /// A head followed by any number of suffixes. The chain is wrapped in a
    /// `Primary` node when at least one suffix applied.
    pub(super) fn primary(&mut self) -> PResult<Node<'src>> {
        let mut node = match self.decide_primary() {
            Decision::Alt(alt) => self.primary_head(alt)?,
            Decision::NoViable => return self.no_viable("primary"),
        };
        let mut suffixes = 0usize;
        while let Some(alt) = self.decide_suffix(&node) {
            node = self.suffix(alt, node)?;
            suffixes += 1;
        }
        if suffixes == 0 {
            return Ok(node);
        }
        Ok(self.finish(NodeKind::Primary, vec![node.into()]))
    }

    fn primary_head(&mut self, alt: PrimaryAlt) -> PResult<Node<'src>> {
        match alt {
            PrimaryAlt::Literal => {
                let literal = self.bump();
                Ok(self.finish(NodeKind::Literal, vec![literal.into()]))
            }
            PrimaryAlt::This => {
                let this = self.bump();
                Ok(self.finish(NodeKind::ThisExpression, vec![this.into()]))
            }
            PrimaryAlt::Parenthesized => {
                let mut children = vec![self.bump().into()];
                children.push(self.expression()?.into());
                self.expect(TokenKind::RParen, &mut children)?;
                Ok(self.finish(NodeKind::ParenthesizedExpression, children))
            }
            PrimaryAlt::Name => {
                let name = self.bump();
                Ok(self.finish(NodeKind::ExpressionName, vec![name.into()]))
            }
            PrimaryAlt::Call | PrimaryAlt::SuperCall => self.method_invocation(None),
            PrimaryAlt::IndexedName => self.array_access(None),
            PrimaryAlt::SuperField => self.field_access(None),
            PrimaryAlt::SuperReference => self.method_reference(None),
            PrimaryAlt::InstanceCreation => self.class_instance_creation(None),
            PrimaryAlt::ArrayCreation => self.array_creation(),
            PrimaryAlt::TypeLiteral => {
                let ty: Element<'src> = match self.eat(TokenKind::KwVoid) {
                    Some(void) => void.into(),
                    None => self.primitive_type_after(None).into(),
                };
                if self.at(TokenKind::ColonColon) || self.dims_lead_to_reference() {
                    self.method_reference(Some(ty))
                } else {
                    self.class_literal(ty)
                }
            }
        }
    }

    fn suffix(&mut self, alt: SuffixAlt, prefix: Node<'src>) -> PResult<Node<'src>> {
        let prefix = Element::from(prefix);
        match alt {
            SuffixAlt::FieldAccess => self.field_access(Some(prefix)),
            SuffixAlt::MethodInvocation => self.method_invocation(Some(prefix)),
            SuffixAlt::ClassInstanceCreation => self.class_instance_creation(Some(prefix)),
            SuffixAlt::QualifiedThis => {
                let dot = self.bump();
                let this = self.bump();
                Ok(self.finish(NodeKind::QualifiedThis, vec![prefix, dot.into(), this.into()]))
            }
            SuffixAlt::ClassLiteral => self.class_literal(prefix),
            SuffixAlt::ArrayAccess => self.array_access(Some(prefix)),
            SuffixAlt::MethodReference => self.method_reference(Some(prefix)),
            SuffixAlt::ParenthesizedCall => {
                let arguments = self.arguments()?;
                Ok(self.finish(NodeKind::MethodInvocation, vec![prefix, arguments.into()]))
            }
        }
    }

    /// `Primary . Identifier`, `Primary . super . Identifier` or
    /// `super . Identifier`.
    fn field_access(&mut self, prefix: Option<Element<'src>>) -> PResult<Node<'src>> {
        let mut children = Vec::new();
        match prefix {
            Some(prefix) => {
                children.push(prefix);
                children.push(self.bump().into());
                if let Some(keyword) = self.eat(TokenKind::KwSuper) {
                    children.push(keyword.into());
                    self.expect(TokenKind::Dot, &mut children)?;
                }
            }
            None => {
                children.push(self.bump().into());
                self.expect(TokenKind::Dot, &mut children)?;
            }
        }
        self.expect(TokenKind::Identifier, &mut children)?;
        Ok(self.finish(NodeKind::FieldAccess, children))
    }

    /// `Identifier Arguments`, or a qualified call
    /// `( Primary . | super . | Primary . super . ) TypeArguments? Identifier Arguments`.
    fn method_invocation(&mut self, prefix: Option<Element<'src>>) -> PResult<Node<'src>> {
        let mut children = Vec::new();
        match prefix {
            Some(prefix) => {
                children.push(prefix);
                children.push(self.bump().into());
                if let Some(keyword) = self.eat(TokenKind::KwSuper) {
                    children.push(keyword.into());
                    self.expect(TokenKind::Dot, &mut children)?;
                }
            }
            None if self.at(TokenKind::KwSuper) => {
                children.push(self.bump().into());
                self.expect(TokenKind::Dot, &mut children)?;
            }
            None => {
                children.push(self.bump().into());
                children.push(self.arguments()?.into());
                return Ok(self.finish(NodeKind::MethodInvocation, children));
            }
        }
        let arguments = if self.at(TokenKind::Lt) {
            Some(self.type_arguments(false)?)
        } else {
            None
        };
        children.push(arguments.into());
        self.expect(TokenKind::Identifier, &mut children)?;
        children.push(self.arguments()?.into());
        Ok(self.finish(NodeKind::MethodInvocation, children))
    }

    /// `Prefix ( . super | TypeArguments ( . Identifier TypeArguments? )* )? Dims? :: TypeArguments? ( Identifier | new )`
    /// or `super :: TypeArguments? Identifier`.
    fn method_reference(&mut self, prefix: Option<Element<'src>>) -> PResult<Node<'src>> {
        let mut children = Vec::new();
        match prefix {
            Some(prefix) => {
                children.push(prefix);
                match self.nth(0) {
                    TokenKind::Dot => {
                        children.push(self.bump().into());
                        self.expect(TokenKind::KwSuper, &mut children)?;
                    }
                    TokenKind::Lt => {
                        children.push(self.type_arguments(false)?.into());
                        while self.at(TokenKind::Dot) && self.nth(1) == TokenKind::Identifier {
                            children.push(self.bump().into());
                            children.push(self.bump().into());
                            if self.at(TokenKind::Lt) {
                                children.push(self.type_arguments(false)?.into());
                            }
                        }
                    }
                    _ => {}
                }
                children.push(self.dims()?.into());
            }
            None => children.push(self.bump().into()),
        }
        self.expect(TokenKind::ColonColon, &mut children)?;
        let arguments = if self.at(TokenKind::Lt) {
            Some(self.type_arguments(false)?)
        } else {
            None
        };
        children.push(arguments.into());
        match self.eat(TokenKind::KwNew) {
            Some(new) => children.push(new.into()),
            None => self.expect(TokenKind::Identifier, &mut children)?,
        }
        Ok(self.finish(NodeKind::MethodReference, children))
    }

    /// `( Primary . )? new TypeArguments? ClassType Arguments ClassBody?`,
    /// where the class type may use the diamond. An unqualified creation
    /// keeps `Absent` qualifier and dot slots.
    fn class_instance_creation(&mut self, qualifier: Option<Element<'src>>) -> PResult<Node<'src>> {
        let mut children = Vec::new();
        match qualifier {
            Some(qualifier) => {
                children.push(qualifier);
                children.push(self.bump().into());
            }
            None => {
                children.push(Element::Absent);
                children.push(Element::Absent);
            }
        }
        self.expect(TokenKind::KwNew, &mut children)?;
        let arguments = if self.at(TokenKind::Lt) {
            Some(self.type_arguments(false)?)
        } else {
            None
        };
        children.push(arguments.into());
        children.push(self.class_type(true)?.into());
        children.push(self.arguments()?.into());
        let body = if self.at(TokenKind::LBrace) {
            Some(self.class_body(BodyKind::Class)?)
        } else {
            None
        };
        children.push(body.into());
        Ok(self.finish(NodeKind::ClassInstanceCreationExpression, children))
    }

    /// `new ( PrimitiveType | ClassType ) DimExprs Dims?` or
    /// `new ( PrimitiveType | ClassType ) Dims ArrayInitializer`.
    fn array_creation(&mut self) -> PResult<Node<'src>> {
        let mut children = vec![self.bump().into()];
        let annotations = self.annotations()?;
        let element = if self.at_any(PRIMITIVE_TYPES) {
            self.primitive_type_after(annotations)
        } else {
            self.class_type_after(annotations, false)?
        };
        children.push(element.into());

        if self.at(TokenKind::LBracket) && self.nth(1) != TokenKind::RBracket {
            let mut exprs = Vec::new();
            while self.at(TokenKind::LBracket) && self.nth(1) != TokenKind::RBracket {
                let mut dim = vec![self.bump().into()];
                dim.push(self.expression()?.into());
                self.expect(TokenKind::RBracket, &mut dim)?;
                exprs.push(self.finish(NodeKind::DimExpr, dim).into());
            }
            children.push(self.finish(NodeKind::DimExprs, exprs).into());
            children.push(self.dims()?.into());
        } else {
            children.push(self.dims()?.into());
            children.push(self.array_initializer()?.into());
        }
        Ok(self.finish(NodeKind::ArrayCreationExpression, children))
    }

    /// `Primary [ Expression ]`, or `Identifier [ Expression ]` at the head.
    fn array_access(&mut self, prefix: Option<Element<'src>>) -> PResult<Node<'src>> {
        let prefix = match prefix {
            Some(prefix) => prefix,
            None => {
                let name = self.bump();
                self.finish(NodeKind::ExpressionName, vec![name.into()]).into()
            }
        };
        let mut children = vec![prefix, self.bump().into()];
        children.push(self.expression()?.into());
        self.expect(TokenKind::RBracket, &mut children)?;
        Ok(self.finish(NodeKind::ArrayAccess, children))
    }

    /// `Type Dims? . class`, where `Type` is a name chain, a primitive or
    /// `void`.
    fn class_literal(&mut self, ty: Element<'src>) -> PResult<Node<'src>> {
        let mut children = vec![ty, self.dims()?.into()];
        self.expect(TokenKind::Dot, &mut children)?;
        self.expect(TokenKind::KwClass, &mut children)?;
        Ok(self.finish(NodeKind::ClassLiteral, children))
    }

    /// `( ArgumentList? )`
    pub(super) fn arguments(&mut self) -> PResult<Node<'src>> {
        let mut children = Vec::new();
        self.expect(TokenKind::LParen, &mut children)?;
        let list = if self.at_any(EXPRESSION_START) {
            Some(self.argument_list()?)
        } else {
            None
        };
        children.push(list.into());
        self.expect(TokenKind::RParen, &mut children)?;
        Ok(self.finish(NodeKind::Arguments, children))
    }

    fn argument_list(&mut self) -> PResult<Node<'src>> {
        let mut children = vec![self.expression()?.into()];
        while let Some(comma) = self.eat(TokenKind::Comma) {
            children.push(comma.into());
            children.push(self.expression()?.into());
        }
        Ok(self.finish(NodeKind::ArgumentList, children))
    }
}
