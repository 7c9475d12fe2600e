#![forbid(unsafe_code)]

use jcst_syntax::{Element, Node, NodeKind, TokenKind};

use super::decision::PRIMITIVE_TYPES;
use super::{PResult, Parser};

impl<'t, 'src> Parser<'t, 'src> {
    /// `Identifier ( . Identifier )*`, stopping before `. *`.
    pub(super) fn qualified_name(&mut self) -> PResult<Node<'src>> {
        let mut children = Vec::new();
        self.expect(TokenKind::Identifier, &mut children)?;
        while self.at(TokenKind::Dot) && self.nth(1) == TokenKind::Identifier {
            children.push(self.bump().into());
            children.push(self.bump().into());
        }
        Ok(self.finish(NodeKind::QualifiedName, children))
    }

    /// `Annotation* ( PrimitiveType | ClassType ) Dims?`
    pub(super) fn type_(&mut self) -> PResult<Node<'src>> {
        let annotations = self.annotations()?;
        self.type_after(annotations)
    }

    /// A type whose leading annotations were already parsed.
    pub(super) fn type_after(&mut self, annotations: Option<Node<'src>>) -> PResult<Node<'src>> {
        self.nested(|p| {
            let base = match p.nth(0) {
                kind if PRIMITIVE_TYPES.contains(kind) => p.primitive_type_after(annotations),
                TokenKind::Identifier => p.class_type_after(annotations, false)?,
                _ => {
                    let err = p.no_viable("type")?;
                    return Ok(p.error_after(annotations, err));
                }
            };
            p.with_dims(base)
        })
    }

    pub(super) fn primitive_type_after(&mut self, annotations: Option<Node<'src>>) -> Node<'src> {
        let keyword = self.bump();
        self.finish(NodeKind::PrimitiveType, vec![annotations.into(), keyword.into()])
    }

    /// Wraps `base` in an `ArrayType` when dims follow.
    pub(super) fn with_dims(&mut self, base: Node<'src>) -> PResult<Node<'src>> {
        match self.dims()? {
            Some(dims) => Ok(self.finish(NodeKind::ArrayType, vec![base.into(), dims.into()])),
            None => Ok(base),
        }
    }

    /// `ClassTypeSegment ( . ClassTypeSegment )*`. With `diamond`, `<>` is
    /// accepted as type arguments.
    pub(super) fn class_type(&mut self, diamond: bool) -> PResult<Node<'src>> {
        let annotations = self.annotations()?;
        self.class_type_after(annotations, diamond)
    }

    pub(super) fn class_type_after(
        &mut self,
        annotations: Option<Node<'src>>,
        diamond: bool,
    ) -> PResult<Node<'src>> {
        let mut children = vec![self.class_type_segment(annotations, diamond)?.into()];
        // `.class`, `.this`, `.*` and friends end the type.
        while self.at(TokenKind::Dot) && matches!(self.nth(1), TokenKind::Identifier | TokenKind::At) {
            children.push(self.bump().into());
            let annotations = self.annotations()?;
            children.push(self.class_type_segment(annotations, diamond)?.into());
        }
        Ok(self.finish(NodeKind::ClassType, children))
    }

    fn class_type_segment(&mut self, annotations: Option<Node<'src>>, diamond: bool) -> PResult<Node<'src>> {
        let mut children: Vec<Element<'src>> = vec![annotations.into()];
        self.expect(TokenKind::Identifier, &mut children)?;
        let arguments = if self.at(TokenKind::Lt) {
            Some(self.type_arguments(diamond)?)
        } else {
            None
        };
        children.push(arguments.into());
        Ok(self.finish(NodeKind::ClassTypeSegment, children))
    }

    /// `Dim+` where the cursor is at one, each `Annotation* [ ]`.
    pub(super) fn dims(&mut self) -> PResult<Option<Node<'src>>> {
        let mut children = Vec::new();
        while self.at_dim() {
            let mut dim: Vec<Element<'src>> = vec![self.annotations()?.into()];
            self.expect(TokenKind::LBracket, &mut dim)?;
            self.expect(TokenKind::RBracket, &mut dim)?;
            children.push(self.finish(NodeKind::Dim, dim).into());
        }
        if children.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.finish(NodeKind::Dims, children)))
    }

    fn at_dim(&mut self) -> bool {
        match self.nth(0) {
            TokenKind::LBracket => self.nth(1) == TokenKind::RBracket,
            TokenKind::At if self.nth(1) != TokenKind::KwInterface => self.lookahead("annotated dims", |p| {
                p.annotations()?;
                Ok(p.at(TokenKind::LBracket) && p.nth(1) == TokenKind::RBracket)
            }),
            _ => false,
        }
    }

    /// `< TypeArgument ( , TypeArgument )* >`, or `<>` when `diamond`.
    pub(super) fn type_arguments(&mut self, diamond: bool) -> PResult<Node<'src>> {
        self.nested(|p| {
            let mut children = Vec::new();
            p.expect(TokenKind::Lt, &mut children)?;
            if !(diamond && p.at(TokenKind::Gt)) {
                loop {
                    children.push(p.type_argument()?.into());
                    match p.eat(TokenKind::Comma) {
                        Some(comma) => children.push(comma.into()),
                        None => break,
                    }
                }
            }
            p.expect(TokenKind::Gt, &mut children)?;
            Ok(p.finish(NodeKind::TypeArguments, children))
        })
    }

    fn type_argument(&mut self) -> PResult<Node<'src>> {
        let annotations = self.annotations()?;
        if !self.at(TokenKind::Question) {
            return self.type_after(annotations);
        }
        let mut children: Vec<Element<'src>> = vec![annotations.into(), self.bump().into()];
        let bounds = match self.nth(0) {
            TokenKind::KwExtends | TokenKind::KwSuper => {
                let keyword = self.bump();
                let bound = self.type_()?;
                Some(self.finish(NodeKind::WildcardBounds, vec![keyword.into(), bound.into()]))
            }
            _ => None,
        };
        children.push(bounds.into());
        Ok(self.finish(NodeKind::Wildcard, children))
    }

    /// `< TypeParameter ( , TypeParameter )* >`
    pub(super) fn type_parameters(&mut self) -> PResult<Node<'src>> {
        let mut children = Vec::new();
        self.expect(TokenKind::Lt, &mut children)?;
        loop {
            children.push(self.type_parameter()?.into());
            match self.eat(TokenKind::Comma) {
                Some(comma) => children.push(comma.into()),
                None => break,
            }
        }
        self.expect(TokenKind::Gt, &mut children)?;
        Ok(self.finish(NodeKind::TypeParameters, children))
    }

    fn type_parameter(&mut self) -> PResult<Node<'src>> {
        let mut children: Vec<Element<'src>> = vec![self.annotations()?.into()];
        self.expect(TokenKind::Identifier, &mut children)?;
        let bound = match self.eat(TokenKind::KwExtends) {
            Some(extends) => {
                let mut bound: Vec<Element<'src>> = vec![extends.into(), self.class_type(false)?.into()];
                while self.at(TokenKind::Amp) {
                    bound.push(self.additional_bound()?.into());
                }
                Some(self.finish(NodeKind::TypeBound, bound))
            }
            None => None,
        };
        children.push(bound.into());
        Ok(self.finish(NodeKind::TypeParameter, children))
    }

    /// `& ClassType`, in type bounds and intersection casts.
    pub(super) fn additional_bound(&mut self) -> PResult<Node<'src>> {
        let amp = self.bump();
        let ty = self.class_type(false)?;
        Ok(self.finish(NodeKind::AdditionalBound, vec![amp.into(), ty.into()]))
    }

    /// `ClassType ( , ClassType )*`
    pub(super) fn class_type_list(&mut self, kind: NodeKind) -> PResult<Node<'src>> {
        let mut children = vec![self.class_type(false)?.into()];
        while let Some(comma) = self.eat(TokenKind::Comma) {
            children.push(comma.into());
            children.push(self.class_type(false)?.into());
        }
        Ok(self.finish(kind, children))
    }
}
