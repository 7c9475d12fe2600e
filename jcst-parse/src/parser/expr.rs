#![forbid(unsafe_code)]

//! Expressions from assignment down to postfix operators.
//!
//! Binary operators are folded by one operator-precedence loop with an
//! explicit stack, so `a + b + ... + z` costs no recursion per operand.

use jcst_syntax::{Element, Node, NodeKind, Token, TokenKind};

use super::decision::ASSIGNMENT_OPERATORS;
use super::{PResult, Parser};

/// Binary precedence levels, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Level {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
}

impl Level {
    fn node_kind(self) -> NodeKind {
        match self {
            Level::Or => NodeKind::ConditionalOrExpression,
            Level::And => NodeKind::ConditionalAndExpression,
            Level::BitOr => NodeKind::InclusiveOrExpression,
            Level::BitXor => NodeKind::ExclusiveOrExpression,
            Level::BitAnd => NodeKind::AndExpression,
            Level::Equality => NodeKind::EqualityExpression,
            Level::Relational => NodeKind::RelationalExpression,
            Level::Shift => NodeKind::ShiftExpression,
            Level::Additive => NodeKind::AdditiveExpression,
            Level::Multiplicative => NodeKind::MultiplicativeExpression,
        }
    }
}

/// A left operand waiting for its right-hand side.
struct Pending<'src> {
    lhs: Node<'src>,
    level: Level,
    /// One token, or two or three adjacent angle tokens for a shift.
    operator: Vec<Element<'src>>,
}

enum Prefix<'src> {
    Operator(NodeKind, Token<'src>),
    /// `( Type AdditionalBound* )`, awaiting its operand.
    Cast(Vec<Element<'src>>),
}

impl<'t, 'src> Parser<'t, 'src> {
    pub(super) fn expression(&mut self) -> PResult<Node<'src>> {
        self.nested(|p| {
            if p.at_lambda_start() {
                p.lambda()
            } else {
                p.assignment()
            }
        })
    }

    /// `ConditionalExpression ( AssignmentOperator Expression )?`
    fn assignment(&mut self) -> PResult<Node<'src>> {
        let target = self.conditional()?;
        if !self.at_any(ASSIGNMENT_OPERATORS) {
            return Ok(target);
        }
        let operator = self.bump();
        let value = self.expression()?;
        Ok(self.finish(
            NodeKind::Assignment,
            vec![target.into(), operator.into(), value.into()],
        ))
    }

    /// Used where Java allows only a constant-like expression: switch labels
    /// and annotation element values.
    pub(super) fn conditional_expression(&mut self) -> PResult<Node<'src>> {
        self.nested(Self::conditional)
    }

    /// `Binary ( ? Expression : ( Lambda | Conditional ) )?`
    fn conditional(&mut self) -> PResult<Node<'src>> {
        let condition = self.binary()?;
        let Some(question) = self.eat(TokenKind::Question) else {
            return Ok(condition);
        };
        let mut children = vec![condition.into(), question.into(), self.expression()?.into()];
        self.expect(TokenKind::Colon, &mut children)?;
        let otherwise = if self.at_lambda_start() {
            self.nested(Self::lambda)?
        } else {
            self.nested(Self::conditional)?
        };
        children.push(otherwise.into());
        Ok(self.finish(NodeKind::ConditionalExpression, children))
    }

    /// The binary operator at the cursor, with the number of tokens it spans.
    fn binary_operator(&self) -> Option<(Level, usize)> {
        let level = match self.nth(0) {
            TokenKind::OrOr => Level::Or,
            TokenKind::AndAnd => Level::And,
            TokenKind::Pipe => Level::BitOr,
            TokenKind::Caret => Level::BitXor,
            TokenKind::Amp => Level::BitAnd,
            TokenKind::EqEq | TokenKind::Ne => Level::Equality,
            TokenKind::Lt if self.nth(1) == TokenKind::Lt && self.adjacent(0) => return Some((Level::Shift, 2)),
            TokenKind::Gt if self.nth(1) == TokenKind::Gt && self.adjacent(0) => {
                let width = if self.nth(2) == TokenKind::Gt && self.adjacent(1) { 3 } else { 2 };
                return Some((Level::Shift, width));
            }
            TokenKind::Lt | TokenKind::Gt | TokenKind::Le | TokenKind::Ge | TokenKind::KwInstanceof => {
                Level::Relational
            }
            TokenKind::Plus | TokenKind::Minus => Level::Additive,
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Level::Multiplicative,
            _ => return None,
        };
        Some((level, 1))
    }

    /// `||` down to multiplicative operators.
    fn binary(&mut self) -> PResult<Node<'src>> {
        let mut stack: Vec<Pending<'src>> = Vec::new();
        let mut lhs = self.unary()?;
        while let Some((level, width)) = self.binary_operator() {
            lhs = self.reduce(&mut stack, lhs, level);
            if let Some(keyword) = self.eat(TokenKind::KwInstanceof) {
                let ty = self.type_()?;
                lhs = self.finish(
                    NodeKind::InstanceofExpression,
                    vec![lhs.into(), keyword.into(), ty.into()],
                );
                continue;
            }
            let operator: Vec<Element<'src>> = (0..width).map(|_| self.bump().into()).collect();
            stack.push(Pending { lhs, level, operator });
            lhs = self.unary()?;
        }
        Ok(self.reduce(&mut stack, lhs, Level::Or))
    }

    /// Folds every stacked operator at or above `floor` into `rhs`, innermost
    /// first, which keeps equal-precedence chains left-associative.
    fn reduce(&self, stack: &mut Vec<Pending<'src>>, mut rhs: Node<'src>, floor: Level) -> Node<'src> {
        while stack.last().is_some_and(|top| top.level >= floor) {
            let Some(Pending { lhs, level, operator }) = stack.pop() else {
                break;
            };
            let mut children = Vec::with_capacity(operator.len() + 2);
            children.push(lhs.into());
            children.extend(operator);
            children.push(rhs.into());
            rhs = self.finish(level.node_kind(), children);
        }
        rhs
    }

    /// Prefix operators and casts, then a postfix expression. Prefixes are
    /// collected in a loop and applied innermost first.
    fn unary(&mut self) -> PResult<Node<'src>> {
        let mut prefixes = Vec::new();
        loop {
            let kind = match self.nth(0) {
                TokenKind::PlusPlus => NodeKind::PreIncrementExpression,
                TokenKind::MinusMinus => NodeKind::PreDecrementExpression,
                TokenKind::Plus | TokenKind::Minus | TokenKind::Bang | TokenKind::Tilde => NodeKind::UnaryExpression,
                TokenKind::LParen => match self.cast_prefix() {
                    Some(head) => {
                        prefixes.push(Prefix::Cast(head));
                        continue;
                    }
                    None => break,
                },
                _ => break,
            };
            prefixes.push(Prefix::Operator(kind, self.bump()));
        }

        let mut node = if matches!(prefixes.last(), Some(Prefix::Cast(_))) && self.at_lambda_start() {
            self.nested(Self::lambda)?
        } else {
            self.postfix()?
        };
        while let Some(prefix) = prefixes.pop() {
            node = match prefix {
                Prefix::Operator(kind, operator) => self.finish(kind, vec![operator.into(), node.into()]),
                Prefix::Cast(mut head) => {
                    head.push(node.into());
                    self.finish(NodeKind::CastExpression, head)
                }
            };
        }
        Ok(node)
    }

    /// Trial `( Type AdditionalBound* )`; kept only when what follows makes
    /// it a cast.
    fn cast_prefix(&mut self) -> Option<Vec<Element<'src>>> {
        let start = self.mark();
        let head = self.speculate("cast", |p| {
            let mut head: Vec<Element<'src>> = vec![p.bump().into(), p.type_()?.into()];
            while p.at(TokenKind::Amp) {
                head.push(p.additional_bound()?.into());
            }
            p.expect(TokenKind::RParen, &mut head)?;
            Ok(head)
        })?;
        if self.commits_to_cast(&head) {
            Some(head)
        } else {
            self.reset(start);
            None
        }
    }

    /// `Primary ( ++ | -- )*`
    fn postfix(&mut self) -> PResult<Node<'src>> {
        let mut node = self.primary()?;
        loop {
            let kind = match self.nth(0) {
                TokenKind::PlusPlus => NodeKind::PostIncrementExpression,
                TokenKind::MinusMinus => NodeKind::PostDecrementExpression,
                _ => return Ok(node),
            };
            let operator = self.bump();
            node = self.finish(kind, vec![node.into(), operator.into()]);
        }
    }

    /// `LambdaParameters -> ( Expression | Block )`
    fn lambda(&mut self) -> PResult<Node<'src>> {
        let mut children = vec![self.lambda_parameters()?.into()];
        self.expect(TokenKind::Arrow, &mut children)?;
        let body = if self.at(TokenKind::LBrace) {
            self.block()?
        } else {
            self.expression()?
        };
        children.push(body.into());
        Ok(self.finish(NodeKind::LambdaExpression, children))
    }

    /// `Identifier`, or `( ( InferredFormalParameterList | FormalParameterList )? )`.
    pub(super) fn lambda_parameters(&mut self) -> PResult<Node<'src>> {
        if let Some(name) = self.eat(TokenKind::Identifier) {
            return Ok(self.finish(NodeKind::LambdaParameters, vec![name.into()]));
        }
        let mut children = Vec::new();
        self.expect(TokenKind::LParen, &mut children)?;
        let list = match (self.nth(0), self.nth(1)) {
            (TokenKind::RParen, _) => None,
            (TokenKind::Identifier, TokenKind::Comma | TokenKind::RParen) => Some(self.inferred_parameters()?),
            _ => Some(self.formal_parameter_list()?),
        };
        children.push(list.into());
        self.expect(TokenKind::RParen, &mut children)?;
        Ok(self.finish(NodeKind::LambdaParameters, children))
    }

    fn inferred_parameters(&mut self) -> PResult<Node<'src>> {
        let mut children = Vec::new();
        loop {
            self.expect(TokenKind::Identifier, &mut children)?;
            match self.eat(TokenKind::Comma) {
                Some(comma) => children.push(comma.into()),
                None => break,
            }
        }
        Ok(self.finish(NodeKind::InferredFormalParameterList, children))
    }
}
