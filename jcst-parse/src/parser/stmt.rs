#![forbid(unsafe_code)]

use jcst_syntax::{Element, Node, NodeKind, TokenKind};

use super::decision::{BlockStatementAlt, Decision, StatementAlt, LOCAL_CLASS_MODIFIERS, VARIABLE_MODIFIERS};
use super::{PResult, Parser};
use crate::error::{ParseError, SyntaxErrorKind};

impl<'t, 'src> Parser<'t, 'src> {
    /// `{ BlockStatement* }`
    pub(super) fn block(&mut self) -> PResult<Node<'src>> {
        self.nested(|p| {
            let mut children = Vec::new();
            p.expect(TokenKind::LBrace, &mut children)?;
            p.block_statements(&mut children)?;
            p.expect(TokenKind::RBrace, &mut children)?;
            Ok(p.finish(NodeKind::Block, children))
        })
    }

    /// Block statements up to `}`, a switch label or end of input.
    pub(super) fn block_statements(&mut self, out: &mut Vec<Element<'src>>) -> PResult<()> {
        while !matches!(
            self.nth(0),
            TokenKind::RBrace | TokenKind::Eof | TokenKind::KwCase | TokenKind::KwDefault
        ) {
            let before = self.mark();
            let statement = self.block_statement()?;
            out.push(self.ensure_progress(before, statement).into());
        }
        Ok(())
    }

    fn block_statement(&mut self) -> PResult<Node<'src>> {
        match self.decide_block_statement() {
            BlockStatementAlt::LocalClass => {
                let modifiers = self.modifiers(LOCAL_CLASS_MODIFIERS)?;
                self.type_declaration_after(modifiers)
            }
            BlockStatementAlt::LocalVariable => {
                let mut children = vec![self.local_variable_declaration()?.into()];
                self.expect(TokenKind::Semi, &mut children)?;
                Ok(self.finish(NodeKind::LocalVariableDeclarationStatement, children))
            }
            BlockStatementAlt::Statement => self.statement(),
        }
    }

    /// `VariableModifier* UnannType VariableDeclaratorList`
    fn local_variable_declaration(&mut self) -> PResult<Node<'src>> {
        let modifiers = self.modifiers(VARIABLE_MODIFIERS)?;
        let ty = self.type_()?;
        let declarators = self.variable_declarators()?;
        Ok(self.finish(
            NodeKind::LocalVariableDeclaration,
            vec![modifiers.into(), ty.into(), declarators.into()],
        ))
    }

    pub(super) fn statement(&mut self) -> PResult<Node<'src>> {
        self.nested(|p| match p.decide_statement() {
            Decision::Alt(alt) => p.statement_alt(alt),
            Decision::NoViable => p.no_viable("statement"),
        })
    }

    fn statement_alt(&mut self, alt: StatementAlt) -> PResult<Node<'src>> {
        match alt {
            StatementAlt::Block => self.block(),
            StatementAlt::Empty => {
                let semi = self.bump();
                Ok(self.finish(NodeKind::EmptyStatement, vec![semi.into()]))
            }
            StatementAlt::If => self.if_statement(),
            StatementAlt::Assert => self.assert_statement(),
            StatementAlt::Switch => self.switch_statement(),
            StatementAlt::While => {
                let mut children = Vec::new();
                self.expect(TokenKind::KwWhile, &mut children)?;
                self.parenthesized_condition(&mut children)?;
                children.push(self.statement()?.into());
                Ok(self.finish(NodeKind::WhileStatement, children))
            }
            StatementAlt::Do => {
                let mut children = Vec::new();
                self.expect(TokenKind::KwDo, &mut children)?;
                children.push(self.statement()?.into());
                self.expect(TokenKind::KwWhile, &mut children)?;
                self.parenthesized_condition(&mut children)?;
                self.expect(TokenKind::Semi, &mut children)?;
                Ok(self.finish(NodeKind::DoStatement, children))
            }
            StatementAlt::For => self.for_statement(),
            StatementAlt::Jump => {
                let keyword = self.bump();
                let kind = if keyword.kind == TokenKind::KwBreak {
                    NodeKind::BreakStatement
                } else {
                    NodeKind::ContinueStatement
                };
                let mut children = vec![keyword.into(), self.eat(TokenKind::Identifier).into()];
                self.expect(TokenKind::Semi, &mut children)?;
                Ok(self.finish(kind, children))
            }
            StatementAlt::Return => {
                let mut children = vec![self.bump().into()];
                let value = if self.at(TokenKind::Semi) {
                    None
                } else {
                    Some(self.expression()?)
                };
                children.push(value.into());
                self.expect(TokenKind::Semi, &mut children)?;
                Ok(self.finish(NodeKind::ReturnStatement, children))
            }
            StatementAlt::Throw => {
                let mut children = vec![self.bump().into()];
                children.push(self.expression()?.into());
                self.expect(TokenKind::Semi, &mut children)?;
                Ok(self.finish(NodeKind::ThrowStatement, children))
            }
            StatementAlt::Synchronized => {
                let mut children = vec![self.bump().into()];
                self.parenthesized_condition(&mut children)?;
                children.push(self.block()?.into());
                Ok(self.finish(NodeKind::SynchronizedStatement, children))
            }
            StatementAlt::Try => self.try_statement(),
            StatementAlt::Labeled => {
                let mut children = vec![self.bump().into(), self.bump().into()];
                children.push(self.statement()?.into());
                Ok(self.finish(NodeKind::LabeledStatement, children))
            }
            StatementAlt::Expression => {
                let expr = self.expression()?;
                self.require_statement_expression(&expr)?;
                let mut children = vec![expr.into()];
                self.expect(TokenKind::Semi, &mut children)?;
                Ok(self.finish(NodeKind::ExpressionStatement, children))
            }
        }
    }

    /// `( Expression )` into `out`.
    fn parenthesized_condition(&mut self, out: &mut Vec<Element<'src>>) -> PResult<()> {
        self.expect(TokenKind::LParen, out)?;
        out.push(self.expression()?.into());
        self.expect(TokenKind::RParen, out)
    }

    /// Only assignments, increments, decrements, method invocations and
    /// instance creations may stand alone as statements.
    fn require_statement_expression(&mut self, expr: &Node<'src>) -> PResult<()> {
        if is_statement_expression(expr) || expr.has_errors() {
            return Ok(());
        }
        self.report(ParseError::new(SyntaxErrorKind::NotAStatement, expr.span()))
    }

    /// `if ( Expression ) Statement ( else Statement )?`
    ///
    /// `else if` chains are collected flat and nested afterwards, so a long
    /// chain costs no nesting depth.
    fn if_statement(&mut self) -> PResult<Node<'src>> {
        let mut outer: Vec<Vec<Element<'src>>> = Vec::new();
        let mut children = self.if_head()?;
        loop {
            match self.eat(TokenKind::KwElse) {
                None => {
                    children.push(Element::Absent);
                    children.push(Element::Absent);
                    break;
                }
                Some(keyword) => {
                    children.push(keyword.into());
                    if !self.at(TokenKind::KwIf) {
                        children.push(self.statement()?.into());
                        break;
                    }
                    outer.push(children);
                    children = self.if_head()?;
                }
            }
        }
        let mut node = self.finish(NodeKind::IfStatement, children);
        while let Some(mut children) = outer.pop() {
            children.push(node.into());
            node = self.finish(NodeKind::IfStatement, children);
        }
        Ok(node)
    }

    fn if_head(&mut self) -> PResult<Vec<Element<'src>>> {
        let mut children = Vec::new();
        self.expect(TokenKind::KwIf, &mut children)?;
        self.parenthesized_condition(&mut children)?;
        children.push(self.statement()?.into());
        Ok(children)
    }

    /// `assert Expression ( : Expression )? ;`
    fn assert_statement(&mut self) -> PResult<Node<'src>> {
        let mut children = vec![self.bump().into()];
        children.push(self.expression()?.into());
        match self.eat(TokenKind::Colon) {
            Some(colon) => {
                children.push(colon.into());
                children.push(self.expression()?.into());
            }
            None => {
                children.push(Element::Absent);
                children.push(Element::Absent);
            }
        }
        self.expect(TokenKind::Semi, &mut children)?;
        Ok(self.finish(NodeKind::AssertStatement, children))
    }

    fn switch_statement(&mut self) -> PResult<Node<'src>> {
        let mut children = vec![self.bump().into()];
        self.parenthesized_condition(&mut children)?;
        children.push(self.switch_block()?.into());
        Ok(self.finish(NodeKind::SwitchStatement, children))
    }

    /// `{ SwitchBlockStatementGroup* SwitchLabel* }`
    fn switch_block(&mut self) -> PResult<Node<'src>> {
        self.nested(|p| {
            let mut children = Vec::new();
            p.expect(TokenKind::LBrace, &mut children)?;
            while !p.at(TokenKind::RBrace) && !p.at(TokenKind::Eof) {
                if !matches!(p.nth(0), TokenKind::KwCase | TokenKind::KwDefault) {
                    let before = p.mark();
                    let stray = p.no_viable("switch label")?;
                    children.push(p.ensure_progress(before, stray).into());
                    continue;
                }
                let mut labels = Vec::new();
                while matches!(p.nth(0), TokenKind::KwCase | TokenKind::KwDefault) {
                    labels.push(p.switch_label()?.into());
                }
                if p.at(TokenKind::RBrace) || p.at(TokenKind::Eof) {
                    children.extend(labels);
                    break;
                }
                let mut group = labels;
                p.block_statements(&mut group)?;
                children.push(p.finish(NodeKind::SwitchBlockStatementGroup, group).into());
            }
            p.expect(TokenKind::RBrace, &mut children)?;
            Ok(p.finish(NodeKind::SwitchBlock, children))
        })
    }

    /// `case ConstantExpression :` or `default :`
    fn switch_label(&mut self) -> PResult<Node<'src>> {
        let keyword = self.bump();
        let mut children = vec![keyword.into()];
        if keyword.kind == TokenKind::KwCase {
            children.push(self.conditional_expression()?.into());
        }
        self.expect(TokenKind::Colon, &mut children)?;
        Ok(self.finish(NodeKind::SwitchLabel, children))
    }

    fn for_statement(&mut self) -> PResult<Node<'src>> {
        let mut children = Vec::new();
        self.expect(TokenKind::KwFor, &mut children)?;
        self.expect(TokenKind::LParen, &mut children)?;

        if self.is_enhanced_for() {
            children.push(self.modifiers(VARIABLE_MODIFIERS)?.into());
            children.push(self.type_()?.into());
            children.push(self.variable_declarator_id()?.into());
            self.expect(TokenKind::Colon, &mut children)?;
            children.push(self.expression()?.into());
            self.expect(TokenKind::RParen, &mut children)?;
            children.push(self.statement()?.into());
            return Ok(self.finish(NodeKind::EnhancedForStatement, children));
        }

        let init = if self.at(TokenKind::Semi) {
            None
        } else if self.starts_for_declaration() {
            let declaration = self.local_variable_declaration()?;
            Some(self.finish(NodeKind::ForInit, vec![declaration.into()]))
        } else {
            let list = self.statement_expression_list()?;
            Some(self.finish(NodeKind::ForInit, vec![list.into()]))
        };
        children.push(init.into());
        self.expect(TokenKind::Semi, &mut children)?;

        let condition = if self.at(TokenKind::Semi) {
            None
        } else {
            Some(self.expression()?)
        };
        children.push(condition.into());
        self.expect(TokenKind::Semi, &mut children)?;

        let update = if self.at(TokenKind::RParen) {
            None
        } else {
            let list = self.statement_expression_list()?;
            Some(self.finish(NodeKind::ForUpdate, vec![list.into()]))
        };
        children.push(update.into());
        self.expect(TokenKind::RParen, &mut children)?;
        children.push(self.statement()?.into());
        Ok(self.finish(NodeKind::BasicForStatement, children))
    }

    fn statement_expression_list(&mut self) -> PResult<Node<'src>> {
        let mut children = Vec::new();
        loop {
            let expr = self.expression()?;
            self.require_statement_expression(&expr)?;
            children.push(expr.into());
            match self.eat(TokenKind::Comma) {
                Some(comma) => children.push(comma.into()),
                None => break,
            }
        }
        Ok(self.finish(NodeKind::StatementExpressionList, children))
    }

    /// `try Block Catches? Finally?` or
    /// `try ResourceSpecification Block Catches? Finally?`
    fn try_statement(&mut self) -> PResult<Node<'src>> {
        let keyword = self.bump();
        let mut children = vec![keyword.into()];
        let with_resources = self.at(TokenKind::LParen);
        if with_resources {
            children.push(self.resource_specification()?.into());
        }
        children.push(self.block()?.into());

        let catches = self.catches()?;
        let finally = match self.eat(TokenKind::KwFinally) {
            Some(finally) => {
                let block = self.block()?;
                Some(self.finish(NodeKind::Finally, vec![finally.into(), block.into()]))
            }
            None => None,
        };
        if !with_resources && catches.is_none() && finally.is_none() {
            self.report(ParseError::new(SyntaxErrorKind::MissingCatchOrFinally, keyword.span))?;
        }
        children.push(catches.into());
        children.push(finally.into());
        let kind = if with_resources {
            NodeKind::TryWithResourcesStatement
        } else {
            NodeKind::TryStatement
        };
        Ok(self.finish(kind, children))
    }

    /// `( Resource ( ; Resource )* ;? )`
    fn resource_specification(&mut self) -> PResult<Node<'src>> {
        let mut children = vec![self.bump().into()];
        loop {
            children.push(self.resource()?.into());
            match self.eat(TokenKind::Semi) {
                Some(semi) => {
                    children.push(semi.into());
                    if self.at(TokenKind::RParen) {
                        break;
                    }
                }
                None => break,
            }
        }
        self.expect(TokenKind::RParen, &mut children)?;
        Ok(self.finish(NodeKind::ResourceSpecification, children))
    }

    /// `VariableModifier* UnannType VariableDeclaratorId = Expression`
    fn resource(&mut self) -> PResult<Node<'src>> {
        let modifiers = self.modifiers(VARIABLE_MODIFIERS)?;
        let mut children: Vec<Element<'src>> = vec![modifiers.into(), self.type_()?.into()];
        children.push(self.variable_declarator_id()?.into());
        self.expect(TokenKind::Assign, &mut children)?;
        children.push(self.expression()?.into());
        Ok(self.finish(NodeKind::Resource, children))
    }

    fn catches(&mut self) -> PResult<Option<Node<'src>>> {
        let mut clauses = Vec::new();
        while self.at(TokenKind::KwCatch) {
            clauses.push(self.catch_clause()?.into());
        }
        if clauses.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.finish(NodeKind::Catches, clauses)))
    }

    /// `catch ( CatchFormalParameter ) Block`
    fn catch_clause(&mut self) -> PResult<Node<'src>> {
        let mut children = vec![self.bump().into()];
        self.expect(TokenKind::LParen, &mut children)?;

        let modifiers = self.modifiers(VARIABLE_MODIFIERS)?;
        let mut alternatives = vec![self.class_type(false)?.into()];
        while let Some(pipe) = self.eat(TokenKind::Pipe) {
            alternatives.push(pipe.into());
            alternatives.push(self.class_type(false)?.into());
        }
        let catch_type = self.finish(NodeKind::CatchType, alternatives);
        let id = self.variable_declarator_id()?;
        let parameter = self.finish(
            NodeKind::CatchFormalParameter,
            vec![modifiers.into(), catch_type.into(), id.into()],
        );
        children.push(parameter.into());

        self.expect(TokenKind::RParen, &mut children)?;
        children.push(self.block()?.into());
        Ok(self.finish(NodeKind::CatchClause, children))
    }
}

fn is_statement_expression(expr: &Node<'_>) -> bool {
    let inner = match expr.kind() {
        NodeKind::Primary => match expr.child_nodes().next() {
            Some(inner) => inner,
            None => return false,
        },
        _ => expr,
    };
    matches!(
        inner.kind(),
        NodeKind::Assignment
            | NodeKind::PreIncrementExpression
            | NodeKind::PreDecrementExpression
            | NodeKind::PostIncrementExpression
            | NodeKind::PostDecrementExpression
            | NodeKind::MethodInvocation
            | NodeKind::ClassInstanceCreationExpression
    )
}
