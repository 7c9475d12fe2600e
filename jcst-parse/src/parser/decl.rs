#![forbid(unsafe_code)]

use jcst_syntax::{Element, Node, NodeKind, TokenKind, TokenSet};

use super::decision::{Decision, MemberAlt, TypeDeclarationAlt, MODIFIERS, VARIABLE_MODIFIERS};
use super::{PResult, Parser};

/// Which kind of body a member list belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum BodyKind {
    Class,
    Interface,
    Annotation,
}

impl BodyKind {
    fn node_kind(self) -> NodeKind {
        match self {
            BodyKind::Class => NodeKind::ClassBody,
            BodyKind::Interface => NodeKind::InterfaceBody,
            BodyKind::Annotation => NodeKind::AnnotationTypeBody,
        }
    }
}

impl<'t, 'src> Parser<'t, 'src> {
    // ---------------------------------------------------------------------
    // Compilation unit
    // ---------------------------------------------------------------------

    pub(super) fn compilation_unit(&mut self) -> Node<'src> {
        let mut children = Vec::new();
        let mut alive = self.top_level(&mut children, Self::package_declaration);
        while alive && self.at(TokenKind::KwImport) {
            alive = self.top_level(&mut children, |p| Ok(p.import_declaration()?.into()));
        }
        while alive && !self.at(TokenKind::Eof) {
            alive = self.top_level(&mut children, |p| {
                let before = p.mark();
                let decl = p.type_declaration()?;
                Ok(p.ensure_progress(before, decl).into())
            });
        }
        children.push(self.bump().into());
        self.finish(NodeKind::CompilationUnit, children)
    }

    /// Runs one top-level item. An error that reaches this level abandons
    /// the item and everything after it; returns whether parsing continues.
    fn top_level(
        &mut self,
        out: &mut Vec<Element<'src>>,
        item: impl FnOnce(&mut Self) -> PResult<Element<'src>>,
    ) -> bool {
        let mark = self.mark();
        let error_mark = self.errors.len();
        match item(self) {
            Ok(element) => {
                out.push(element);
                true
            }
            Err(err) => {
                self.abandon(mark, error_mark, err, out);
                false
            }
        }
    }

    /// `Annotation* package QualifiedName ;`, or `Absent`.
    fn package_declaration(&mut self) -> PResult<Element<'src>> {
        let is_package = self.at(TokenKind::KwPackage)
            || (self.at_annotation()
                && self.lookahead("package annotations", |p| {
                    p.annotations()?;
                    Ok(p.at(TokenKind::KwPackage))
                }));
        if !is_package {
            return Ok(Element::Absent);
        }
        let mut children: Vec<Element<'src>> = vec![self.annotations()?.into()];
        self.expect(TokenKind::KwPackage, &mut children)?;
        children.push(self.qualified_name()?.into());
        self.expect(TokenKind::Semi, &mut children)?;
        Ok(self.finish(NodeKind::PackageDeclaration, children).into())
    }

    fn import_declaration(&mut self) -> PResult<Node<'src>> {
        let mut children = Vec::new();
        self.expect(TokenKind::KwImport, &mut children)?;
        let is_static = match self.eat(TokenKind::KwStatic) {
            Some(tok) => {
                children.push(tok.into());
                true
            }
            None => false,
        };
        children.push(self.qualified_name()?.into());
        let on_demand = self.at(TokenKind::Dot) && self.nth(1) == TokenKind::Star;
        if on_demand {
            children.push(self.bump().into());
            children.push(self.bump().into());
        }
        self.expect(TokenKind::Semi, &mut children)?;
        let kind = match (is_static, on_demand) {
            (false, false) => NodeKind::SingleTypeImportDeclaration,
            (false, true) => NodeKind::TypeImportOnDemandDeclaration,
            (true, false) => NodeKind::SingleStaticImportDeclaration,
            (true, true) => NodeKind::StaticImportOnDemandDeclaration,
        };
        Ok(self.finish(kind, children))
    }

    fn type_declaration(&mut self) -> PResult<Node<'src>> {
        if self.at(TokenKind::Semi) {
            let semi = self.bump();
            return Ok(self.finish(NodeKind::EmptyDeclaration, vec![semi.into()]));
        }
        let modifiers = self.modifiers(MODIFIERS)?;
        self.type_declaration_after(modifiers)
    }

    pub(super) fn type_declaration_after(&mut self, modifiers: Option<Node<'src>>) -> PResult<Node<'src>> {
        match self.decide_type_declaration() {
            Decision::Alt(TypeDeclarationAlt::Class) => self.class_declaration(modifiers),
            Decision::Alt(TypeDeclarationAlt::Enum) => self.enum_declaration(modifiers),
            Decision::Alt(TypeDeclarationAlt::Interface) => self.interface_declaration(modifiers),
            Decision::Alt(TypeDeclarationAlt::AnnotationType) => self.annotation_type_declaration(modifiers),
            Decision::NoViable => {
                let err = self.no_viable("type declaration")?;
                Ok(self.error_after(modifiers, err))
            }
        }
    }

    // ---------------------------------------------------------------------
    // Annotations and modifiers
    // ---------------------------------------------------------------------

    /// Zero or more annotations; `@interface` is not one.
    pub(super) fn annotations(&mut self) -> PResult<Option<Node<'src>>> {
        let mut children = Vec::new();
        while self.at_annotation() {
            children.push(self.annotation()?.into());
        }
        if children.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.finish(NodeKind::Annotations, children)))
    }

    /// Annotations mixed with modifier keywords from `keywords`.
    pub(super) fn modifiers(&mut self, keywords: TokenSet) -> PResult<Option<Node<'src>>> {
        let mut children = Vec::new();
        loop {
            if self.at_annotation() {
                children.push(self.annotation()?.into());
            } else if self.at_any(keywords) {
                children.push(self.bump().into());
            } else {
                break;
            }
        }
        if children.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.finish(NodeKind::Modifiers, children)))
    }

    fn annotation(&mut self) -> PResult<Node<'src>> {
        let mut children = Vec::new();
        self.expect(TokenKind::At, &mut children)?;
        children.push(self.qualified_name()?.into());
        if !self.at(TokenKind::LParen) {
            return Ok(self.finish(NodeKind::MarkerAnnotation, children));
        }
        let normal = self.nth(1) == TokenKind::RParen
            || (self.nth(1) == TokenKind::Identifier && self.nth(2) == TokenKind::Assign);
        children.push(self.bump().into());
        let kind = if normal {
            if !self.at(TokenKind::RParen) {
                loop {
                    children.push(self.element_value_pair()?.into());
                    match self.eat(TokenKind::Comma) {
                        Some(comma) => children.push(comma.into()),
                        None => break,
                    }
                }
            }
            NodeKind::NormalAnnotation
        } else {
            children.push(self.element_value()?.into());
            NodeKind::SingleElementAnnotation
        };
        self.expect(TokenKind::RParen, &mut children)?;
        Ok(self.finish(kind, children))
    }

    fn element_value_pair(&mut self) -> PResult<Node<'src>> {
        let mut children = Vec::new();
        self.expect(TokenKind::Identifier, &mut children)?;
        self.expect(TokenKind::Assign, &mut children)?;
        children.push(self.element_value()?.into());
        Ok(self.finish(NodeKind::ElementValuePair, children))
    }

    fn element_value(&mut self) -> PResult<Node<'src>> {
        self.nested(|p| match p.nth(0) {
            TokenKind::LBrace => p.element_value_array_initializer(),
            TokenKind::At => p.annotation(),
            _ => p.conditional_expression(),
        })
    }

    fn element_value_array_initializer(&mut self) -> PResult<Node<'src>> {
        let mut children = Vec::new();
        self.expect(TokenKind::LBrace, &mut children)?;
        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::Comma) && !self.at(TokenKind::Eof) {
            children.push(self.element_value()?.into());
            match self.eat(TokenKind::Comma) {
                Some(comma) => children.push(comma.into()),
                None => break,
            }
        }
        if let Some(comma) = self.eat(TokenKind::Comma) {
            children.push(comma.into());
        }
        self.expect(TokenKind::RBrace, &mut children)?;
        Ok(self.finish(NodeKind::ElementValueArrayInitializer, children))
    }

    // ---------------------------------------------------------------------
    // Type declarations
    // ---------------------------------------------------------------------

    fn class_declaration(&mut self, modifiers: Option<Node<'src>>) -> PResult<Node<'src>> {
        let mut children: Vec<Element<'src>> = vec![modifiers.into()];
        self.expect(TokenKind::KwClass, &mut children)?;
        self.expect(TokenKind::Identifier, &mut children)?;
        children.push(self.optional_type_parameters()?.into());
        let superclass = match self.eat(TokenKind::KwExtends) {
            Some(extends) => {
                let ty = self.class_type(false)?;
                Some(self.finish(NodeKind::Superclass, vec![extends.into(), ty.into()]))
            }
            None => None,
        };
        children.push(superclass.into());
        children.push(self.superinterfaces()?.into());
        children.push(self.class_body(BodyKind::Class)?.into());
        Ok(self.finish(NodeKind::NormalClassDeclaration, children))
    }

    fn optional_type_parameters(&mut self) -> PResult<Option<Node<'src>>> {
        if self.at(TokenKind::Lt) {
            Ok(Some(self.type_parameters()?))
        } else {
            Ok(None)
        }
    }

    fn superinterfaces(&mut self) -> PResult<Option<Node<'src>>> {
        let Some(implements) = self.eat(TokenKind::KwImplements) else {
            return Ok(None);
        };
        let list = self.class_type_list(NodeKind::InterfaceTypeList)?;
        Ok(Some(self.finish(NodeKind::Superinterfaces, vec![implements.into(), list.into()])))
    }

    fn enum_declaration(&mut self, modifiers: Option<Node<'src>>) -> PResult<Node<'src>> {
        let mut children: Vec<Element<'src>> = vec![modifiers.into()];
        self.expect(TokenKind::KwEnum, &mut children)?;
        self.expect(TokenKind::Identifier, &mut children)?;
        children.push(self.superinterfaces()?.into());
        children.push(self.enum_body()?.into());
        Ok(self.finish(NodeKind::EnumDeclaration, children))
    }

    /// `{ EnumConstant ( , EnumConstant )* ,? EnumBodyDeclarations? }`
    fn enum_body(&mut self) -> PResult<Node<'src>> {
        self.nested(|p| {
            let mut children = Vec::new();
            p.expect(TokenKind::LBrace, &mut children)?;
            while p.at(TokenKind::Identifier) || p.at_annotation() {
                children.push(p.enum_constant()?.into());
                match p.eat(TokenKind::Comma) {
                    Some(comma) => children.push(comma.into()),
                    None => break,
                }
            }
            if let Some(semi) = p.eat(TokenKind::Semi) {
                let mut declarations = vec![semi.into()];
                p.members(BodyKind::Class, &mut declarations)?;
                children.push(p.finish(NodeKind::EnumBodyDeclarations, declarations).into());
            }
            p.expect(TokenKind::RBrace, &mut children)?;
            Ok(p.finish(NodeKind::EnumBody, children))
        })
    }

    fn enum_constant(&mut self) -> PResult<Node<'src>> {
        let mut children: Vec<Element<'src>> = vec![self.annotations()?.into()];
        self.expect(TokenKind::Identifier, &mut children)?;
        let arguments = if self.at(TokenKind::LParen) {
            Some(self.arguments()?)
        } else {
            None
        };
        children.push(arguments.into());
        let body = if self.at(TokenKind::LBrace) {
            Some(self.class_body(BodyKind::Class)?)
        } else {
            None
        };
        children.push(body.into());
        Ok(self.finish(NodeKind::EnumConstant, children))
    }

    fn interface_declaration(&mut self, modifiers: Option<Node<'src>>) -> PResult<Node<'src>> {
        let mut children: Vec<Element<'src>> = vec![modifiers.into()];
        self.expect(TokenKind::KwInterface, &mut children)?;
        self.expect(TokenKind::Identifier, &mut children)?;
        children.push(self.optional_type_parameters()?.into());
        let extends = match self.eat(TokenKind::KwExtends) {
            Some(extends) => {
                let list = self.class_type_list(NodeKind::InterfaceTypeList)?;
                Some(self.finish(NodeKind::ExtendsInterfaces, vec![extends.into(), list.into()]))
            }
            None => None,
        };
        children.push(extends.into());
        children.push(self.class_body(BodyKind::Interface)?.into());
        Ok(self.finish(NodeKind::NormalInterfaceDeclaration, children))
    }

    fn annotation_type_declaration(&mut self, modifiers: Option<Node<'src>>) -> PResult<Node<'src>> {
        let mut children: Vec<Element<'src>> = vec![modifiers.into()];
        self.expect(TokenKind::At, &mut children)?;
        self.expect(TokenKind::KwInterface, &mut children)?;
        self.expect(TokenKind::Identifier, &mut children)?;
        children.push(self.class_body(BodyKind::Annotation)?.into());
        Ok(self.finish(NodeKind::AnnotationTypeDeclaration, children))
    }

    // ---------------------------------------------------------------------
    // Bodies and members
    // ---------------------------------------------------------------------

    /// `{ member* }` for class, interface and annotation-type bodies.
    pub(super) fn class_body(&mut self, body: BodyKind) -> PResult<Node<'src>> {
        self.nested(|p| {
            let mut children = Vec::new();
            p.expect(TokenKind::LBrace, &mut children)?;
            p.members(body, &mut children)?;
            p.expect(TokenKind::RBrace, &mut children)?;
            Ok(p.finish(body.node_kind(), children))
        })
    }

    fn members(&mut self, body: BodyKind, out: &mut Vec<Element<'src>>) -> PResult<()> {
        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::Eof) {
            let before = self.mark();
            let member = self.member(body)?;
            out.push(self.ensure_progress(before, member).into());
        }
        Ok(())
    }

    fn member(&mut self, body: BodyKind) -> PResult<Node<'src>> {
        match self.nth(0) {
            TokenKind::Semi => {
                let semi = self.bump();
                return Ok(self.finish(NodeKind::EmptyDeclaration, vec![semi.into()]));
            }
            TokenKind::LBrace => {
                let block = self.block()?;
                return Ok(self.finish(NodeKind::InstanceInitializer, vec![block.into()]));
            }
            TokenKind::KwStatic if self.nth(1) == TokenKind::LBrace => {
                let keyword = self.bump();
                let block = self.block()?;
                return Ok(self.finish(NodeKind::StaticInitializer, vec![keyword.into(), block.into()]));
            }
            _ => {}
        }

        let modifiers = self.modifiers(MODIFIERS)?;
        match self.decide_member() {
            Decision::Alt(MemberAlt::TypeDeclaration) => self.type_declaration_after(modifiers),
            Decision::Alt(MemberAlt::Constructor) => self.constructor_declaration(modifiers, None),
            Decision::Alt(MemberAlt::Generic) => {
                let type_parameters = self.type_parameters()?;
                if self.at(TokenKind::Identifier) && self.nth(1) == TokenKind::LParen {
                    return self.constructor_declaration(modifiers, Some(type_parameters));
                }
                let result: Element<'src> = match self.eat(TokenKind::KwVoid) {
                    Some(void) => void.into(),
                    None => self.type_()?.into(),
                };
                self.method_declaration(modifiers, Some(type_parameters), result, body)
            }
            Decision::Alt(MemberAlt::VoidMethod) => {
                let void = self.bump();
                self.method_declaration(modifiers, None, void.into(), body)
            }
            Decision::Alt(MemberAlt::Typed) => {
                let ty = self.type_()?;
                if self.at(TokenKind::Identifier) && self.nth(1) == TokenKind::LParen {
                    if body == BodyKind::Annotation {
                        return self.annotation_element(modifiers, ty);
                    }
                    return self.method_declaration(modifiers, None, ty.into(), body);
                }
                self.field_declaration(modifiers, ty, body)
            }
            Decision::NoViable => {
                let err = self.no_viable("member")?;
                Ok(self.error_after(modifiers, err))
            }
        }
    }

    fn field_declaration(
        &mut self,
        modifiers: Option<Node<'src>>,
        ty: Node<'src>,
        body: BodyKind,
    ) -> PResult<Node<'src>> {
        let mut children: Vec<Element<'src>> = vec![modifiers.into(), ty.into()];
        children.push(self.variable_declarators()?.into());
        self.expect(TokenKind::Semi, &mut children)?;
        let kind = match body {
            BodyKind::Class => NodeKind::FieldDeclaration,
            BodyKind::Interface | BodyKind::Annotation => NodeKind::ConstantDeclaration,
        };
        Ok(self.finish(kind, children))
    }

    /// `Type Identifier ( ) Dims? ( default ElementValue )? ;`
    fn annotation_element(&mut self, modifiers: Option<Node<'src>>, ty: Node<'src>) -> PResult<Node<'src>> {
        let mut children: Vec<Element<'src>> = vec![modifiers.into(), ty.into()];
        self.expect(TokenKind::Identifier, &mut children)?;
        self.expect(TokenKind::LParen, &mut children)?;
        self.expect(TokenKind::RParen, &mut children)?;
        children.push(self.dims()?.into());
        let default = match self.eat(TokenKind::KwDefault) {
            Some(keyword) => {
                let value = self.element_value()?;
                Some(self.finish(NodeKind::DefaultValue, vec![keyword.into(), value.into()]))
            }
            None => None,
        };
        children.push(default.into());
        self.expect(TokenKind::Semi, &mut children)?;
        Ok(self.finish(NodeKind::AnnotationTypeElementDeclaration, children))
    }

    fn method_declaration(
        &mut self,
        modifiers: Option<Node<'src>>,
        type_parameters: Option<Node<'src>>,
        result: Element<'src>,
        body: BodyKind,
    ) -> PResult<Node<'src>> {
        let mut header: Vec<Element<'src>> = vec![type_parameters.into(), result];
        header.push(self.method_declarator()?.into());
        header.push(self.throws()?.into());
        let header = self.finish(NodeKind::MethodHeader, header);

        let mut children: Vec<Element<'src>> = vec![modifiers.into(), header.into()];
        let mut method_body = Vec::new();
        if self.at(TokenKind::LBrace) {
            method_body.push(self.block()?.into());
        } else {
            self.expect(TokenKind::Semi, &mut method_body)?;
        }
        children.push(self.finish(NodeKind::MethodBody, method_body).into());
        let kind = match body {
            BodyKind::Class => NodeKind::MethodDeclaration,
            BodyKind::Interface | BodyKind::Annotation => NodeKind::InterfaceMethodDeclaration,
        };
        Ok(self.finish(kind, children))
    }

    /// `Identifier ( FormalParameterList? ) Dims?`
    fn method_declarator(&mut self) -> PResult<Node<'src>> {
        let mut children = Vec::new();
        self.expect(TokenKind::Identifier, &mut children)?;
        self.parameter_list(&mut children)?;
        children.push(self.dims()?.into());
        Ok(self.finish(NodeKind::MethodDeclarator, children))
    }

    /// `( FormalParameterList? )` into `out`.
    fn parameter_list(&mut self, out: &mut Vec<Element<'src>>) -> PResult<()> {
        self.expect(TokenKind::LParen, out)?;
        let list = if self.at(TokenKind::RParen) {
            None
        } else {
            Some(self.formal_parameter_list()?)
        };
        out.push(list.into());
        self.expect(TokenKind::RParen, out)
    }

    fn throws(&mut self) -> PResult<Option<Node<'src>>> {
        let Some(throws) = self.eat(TokenKind::KwThrows) else {
            return Ok(None);
        };
        let list = self.class_type_list(NodeKind::ExceptionTypeList)?;
        Ok(Some(self.finish(NodeKind::Throws, vec![throws.into(), list.into()])))
    }

    fn constructor_declaration(
        &mut self,
        modifiers: Option<Node<'src>>,
        type_parameters: Option<Node<'src>>,
    ) -> PResult<Node<'src>> {
        let mut declarator: Vec<Element<'src>> = vec![type_parameters.into()];
        self.expect(TokenKind::Identifier, &mut declarator)?;
        self.parameter_list(&mut declarator)?;
        let declarator = self.finish(NodeKind::ConstructorDeclarator, declarator);

        let mut children: Vec<Element<'src>> = vec![modifiers.into(), declarator.into()];
        children.push(self.throws()?.into());
        children.push(self.constructor_body()?.into());
        Ok(self.finish(NodeKind::ConstructorDeclaration, children))
    }

    /// `{ ExplicitConstructorInvocation? BlockStatement* }`
    fn constructor_body(&mut self) -> PResult<Node<'src>> {
        self.nested(|p| {
            let mut children = Vec::new();
            p.expect(TokenKind::LBrace, &mut children)?;
            children.push(p.explicit_constructor_invocation()?.into());
            p.block_statements(&mut children)?;
            p.expect(TokenKind::RBrace, &mut children)?;
            Ok(p.finish(NodeKind::ConstructorBody, children))
        })
    }

    /// `TypeArguments? ( this | super ) Arguments ;` or
    /// `Primary . TypeArguments? super Arguments ;`.
    fn explicit_constructor_invocation(&mut self) -> PResult<Option<Node<'src>>> {
        let mut children = Vec::new();
        match (self.nth(0), self.nth(1)) {
            (TokenKind::KwThis | TokenKind::KwSuper, TokenKind::LParen) => {
                children.push(Element::Absent);
                children.push(self.bump().into());
            }
            (TokenKind::Lt, _) => {
                children.push(self.type_arguments(false)?.into());
                match self.eat(TokenKind::KwThis) {
                    Some(this) => children.push(this.into()),
                    None => self.expect(TokenKind::KwSuper, &mut children)?,
                }
            }
            _ => {
                let qualifier = self.speculate("qualified constructor invocation", |p| {
                    let outer = p.primary()?;
                    if p.at(TokenKind::Dot) && matches!(p.nth(1), TokenKind::KwSuper | TokenKind::Lt) {
                        Ok(outer)
                    } else {
                        Err(p.reject("qualified constructor invocation"))
                    }
                });
                let Some(outer) = qualifier else {
                    return Ok(None);
                };
                children.push(outer.into());
                children.push(self.bump().into());
                let arguments = if self.at(TokenKind::Lt) {
                    Some(self.type_arguments(false)?)
                } else {
                    None
                };
                children.push(arguments.into());
                self.expect(TokenKind::KwSuper, &mut children)?;
            }
        }
        children.push(self.arguments()?.into());
        self.expect(TokenKind::Semi, &mut children)?;
        Ok(Some(self.finish(NodeKind::ExplicitConstructorInvocation, children)))
    }

    // ---------------------------------------------------------------------
    // Parameters and variables
    // ---------------------------------------------------------------------

    pub(super) fn formal_parameter_list(&mut self) -> PResult<Node<'src>> {
        let mut children = vec![self.formal_parameter()?.into()];
        while let Some(comma) = self.eat(TokenKind::Comma) {
            children.push(comma.into());
            children.push(self.formal_parameter()?.into());
        }
        Ok(self.finish(NodeKind::FormalParameterList, children))
    }

    fn formal_parameter(&mut self) -> PResult<Node<'src>> {
        let modifiers = self.modifiers(VARIABLE_MODIFIERS)?;
        let ty = self.type_()?;
        let mut children: Vec<Element<'src>> = vec![modifiers.into(), ty.into()];
        let kind = match (self.nth(0), self.nth(1)) {
            (TokenKind::Ellipsis | TokenKind::At, _) => {
                children.push(self.annotations()?.into());
                self.expect(TokenKind::Ellipsis, &mut children)?;
                children.push(self.variable_declarator_id()?.into());
                NodeKind::LastFormalParameter
            }
            (TokenKind::KwThis, _) => {
                children.push(self.bump().into());
                NodeKind::ReceiverParameter
            }
            (TokenKind::Identifier, TokenKind::Dot) if self.nth(2) == TokenKind::KwThis => {
                for _ in 0..3 {
                    children.push(self.bump().into());
                }
                NodeKind::ReceiverParameter
            }
            _ => {
                children.push(self.variable_declarator_id()?.into());
                NodeKind::FormalParameter
            }
        };
        Ok(self.finish(kind, children))
    }

    /// `Identifier Dims?`
    pub(super) fn variable_declarator_id(&mut self) -> PResult<Node<'src>> {
        let mut children = Vec::new();
        self.expect(TokenKind::Identifier, &mut children)?;
        children.push(self.dims()?.into());
        Ok(self.finish(NodeKind::VariableDeclaratorId, children))
    }

    pub(super) fn variable_declarators(&mut self) -> PResult<Node<'src>> {
        let mut children = vec![self.variable_declarator()?.into()];
        while let Some(comma) = self.eat(TokenKind::Comma) {
            children.push(comma.into());
            children.push(self.variable_declarator()?.into());
        }
        Ok(self.finish(NodeKind::VariableDeclaratorList, children))
    }

    /// `VariableDeclaratorId ( = VariableInitializer )?`
    fn variable_declarator(&mut self) -> PResult<Node<'src>> {
        let mut children = vec![self.variable_declarator_id()?.into()];
        match self.eat(TokenKind::Assign) {
            Some(assign) => {
                children.push(assign.into());
                children.push(self.variable_initializer()?.into());
            }
            None => {
                children.push(Element::Absent);
                children.push(Element::Absent);
            }
        }
        Ok(self.finish(NodeKind::VariableDeclarator, children))
    }

    fn variable_initializer(&mut self) -> PResult<Node<'src>> {
        if self.at(TokenKind::LBrace) {
            self.array_initializer()
        } else {
            self.expression()
        }
    }

    /// `{ ( VariableInitializer ( , VariableInitializer )* )? ,? }`
    pub(super) fn array_initializer(&mut self) -> PResult<Node<'src>> {
        self.nested(|p| {
            let mut children = Vec::new();
            p.expect(TokenKind::LBrace, &mut children)?;
            while !p.at(TokenKind::RBrace) && !p.at(TokenKind::Comma) && !p.at(TokenKind::Eof) {
                children.push(p.variable_initializer()?.into());
                match p.eat(TokenKind::Comma) {
                    Some(comma) => children.push(comma.into()),
                    None => break,
                }
            }
            if let Some(comma) = p.eat(TokenKind::Comma) {
                children.push(comma.into());
            }
            p.expect(TokenKind::RBrace, &mut children)?;
            Ok(p.finish(NodeKind::ArrayInitializer, children))
        })
    }
}
