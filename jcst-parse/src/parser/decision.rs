#![forbid(unsafe_code)]

//! Alternative selection: first-set dispatch, fixed k-token lookahead, and
//! the speculative trial parses used where neither is enough.

use jcst_syntax::{Element, Node, NodeKind, TokenKind, TokenSet};
use tracing::trace;

use super::{PResult, Parser};

pub(super) const PRIMITIVE_TYPES: TokenSet = TokenSet::new(&[
    TokenKind::KwBoolean,
    TokenKind::KwByte,
    TokenKind::KwShort,
    TokenKind::KwInt,
    TokenKind::KwLong,
    TokenKind::KwChar,
    TokenKind::KwFloat,
    TokenKind::KwDouble,
]);

pub(super) const LITERALS: TokenSet = TokenSet::new(&[
    TokenKind::IntegerLiteral,
    TokenKind::FloatingPointLiteral,
    TokenKind::CharacterLiteral,
    TokenKind::StringLiteral,
    TokenKind::KwTrue,
    TokenKind::KwFalse,
    TokenKind::KwNull,
]);

/// Class, interface and member modifiers. `default` only appears here for
/// interface default methods.
pub(super) const MODIFIERS: TokenSet = TokenSet::new(&[
    TokenKind::KwPublic,
    TokenKind::KwProtected,
    TokenKind::KwPrivate,
    TokenKind::KwAbstract,
    TokenKind::KwStatic,
    TokenKind::KwFinal,
    TokenKind::KwSynchronized,
    TokenKind::KwNative,
    TokenKind::KwTransient,
    TokenKind::KwVolatile,
    TokenKind::KwStrictfp,
    TokenKind::KwDefault,
]);

pub(super) const VARIABLE_MODIFIERS: TokenSet = TokenSet::new(&[TokenKind::KwFinal]);

pub(super) const LOCAL_CLASS_MODIFIERS: TokenSet = TokenSet::new(&[
    TokenKind::KwAbstract,
    TokenKind::KwFinal,
    TokenKind::KwStatic,
    TokenKind::KwStrictfp,
]);

pub(super) const ASSIGNMENT_OPERATORS: TokenSet = TokenSet::new(&[
    TokenKind::Assign,
    TokenKind::PlusAssign,
    TokenKind::MinusAssign,
    TokenKind::StarAssign,
    TokenKind::SlashAssign,
    TokenKind::AmpAssign,
    TokenKind::PipeAssign,
    TokenKind::CaretAssign,
    TokenKind::PercentAssign,
    TokenKind::ShlAssign,
    TokenKind::ShrAssign,
    TokenKind::UshrAssign,
]);

/// Tokens that can begin `UnaryExpressionNotPlusMinus`, which decides whether
/// a parenthesized reference type is a cast.
const UNARY_NOT_PLUS_MINUS_START: TokenSet = LITERALS.union(PRIMITIVE_TYPES).union(TokenSet::new(&[
    TokenKind::Tilde,
    TokenKind::Bang,
    TokenKind::LParen,
    TokenKind::Identifier,
    TokenKind::KwThis,
    TokenKind::KwSuper,
    TokenKind::KwNew,
    TokenKind::KwVoid,
]));

pub(super) const EXPRESSION_START: TokenSet = UNARY_NOT_PLUS_MINUS_START.union(TokenSet::new(&[
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::PlusPlus,
    TokenKind::MinusMinus,
]));

/// Tokens a failed decision never consumes; an enclosing rule owns them.
pub(super) const SYNC: TokenSet = TokenSet::new(&[
    TokenKind::Semi,
    TokenKind::RBrace,
    TokenKind::RParen,
    TokenKind::RBracket,
    TokenKind::Comma,
    TokenKind::Eof,
]);

/// Outcome of a decision point. Consumed immediately by the rule that asked.
pub(super) enum Decision<A> {
    Alt(A),
    NoViable,
}

pub(super) enum TypeDeclarationAlt {
    Class,
    Enum,
    Interface,
    AnnotationType,
}

pub(super) enum MemberAlt {
    TypeDeclaration,
    Constructor,
    Generic,
    VoidMethod,
    Typed,
}

pub(super) enum BlockStatementAlt {
    LocalClass,
    LocalVariable,
    Statement,
}

pub(super) enum StatementAlt {
    Block,
    Empty,
    If,
    Assert,
    Switch,
    While,
    Do,
    For,
    Jump,
    Return,
    Throw,
    Synchronized,
    Try,
    Labeled,
    Expression,
}

pub(super) enum PrimaryAlt {
    Literal,
    This,
    Parenthesized,
    Name,
    Call,
    IndexedName,
    SuperField,
    SuperCall,
    SuperReference,
    InstanceCreation,
    ArrayCreation,
    TypeLiteral,
}

pub(super) enum SuffixAlt {
    FieldAccess,
    MethodInvocation,
    ClassInstanceCreation,
    QualifiedThis,
    ClassLiteral,
    ArrayAccess,
    MethodReference,
    ParenthesizedCall,
}

impl<'t, 'src> Parser<'t, 'src> {
    /// Runs `rule` as a trial parse. On success the cursor stays after the
    /// trial and its result is returned; on any failure, hitting the nesting
    /// limit included, the cursor and the error list are restored and `None`
    /// is returned. Input that really nests too deep fails again on the
    /// committed path.
    pub(super) fn speculate<T>(
        &mut self,
        trial: &'static str,
        rule: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> Option<T> {
        let mark = self.mark();
        let error_mark = self.errors.len();
        let offset = self.peek().start();
        self.speculating += 1;
        let result = rule(self);
        self.speculating -= 1;
        match result {
            Ok(value) => {
                trace!(trial, offset, "trial parse matched");
                Some(value)
            }
            Err(err) => {
                self.reset(mark);
                self.errors.truncate(error_mark);
                trace!(trial, offset, error = %err.kind, "trial parse failed");
                None
            }
        }
    }

    /// A trial parse used only as a predicate; the cursor is always restored.
    pub(super) fn lookahead(
        &mut self,
        trial: &'static str,
        rule: impl FnOnce(&mut Self) -> PResult<bool>,
    ) -> bool {
        let mark = self.mark();
        let matched = self.speculate(trial, rule).unwrap_or(false);
        self.reset(mark);
        matched
    }

    pub(super) fn at_annotation(&self) -> bool {
        self.at(TokenKind::At) && self.nth(1) != TokenKind::KwInterface
    }

    /// Follows `Modifiers` at the top level or in a member list.
    pub(super) fn decide_type_declaration(&self) -> Decision<TypeDeclarationAlt> {
        let alt = match self.nth(0) {
            TokenKind::KwClass => TypeDeclarationAlt::Class,
            TokenKind::KwEnum => TypeDeclarationAlt::Enum,
            TokenKind::KwInterface => TypeDeclarationAlt::Interface,
            TokenKind::At if self.nth(1) == TokenKind::KwInterface => TypeDeclarationAlt::AnnotationType,
            _ => return Decision::NoViable,
        };
        Decision::Alt(alt)
    }

    /// Follows `Modifiers` inside a class, interface or annotation body.
    /// Fields and methods share a type prefix and are told apart once it is
    /// parsed (`Typed`).
    pub(super) fn decide_member(&self) -> Decision<MemberAlt> {
        let alt = match self.nth(0) {
            TokenKind::KwClass | TokenKind::KwEnum | TokenKind::KwInterface => MemberAlt::TypeDeclaration,
            TokenKind::At if self.nth(1) == TokenKind::KwInterface => MemberAlt::TypeDeclaration,
            TokenKind::Lt => MemberAlt::Generic,
            TokenKind::Identifier if self.nth(1) == TokenKind::LParen => MemberAlt::Constructor,
            TokenKind::KwVoid => MemberAlt::VoidMethod,
            kind if kind == TokenKind::Identifier || PRIMITIVE_TYPES.contains(kind) => MemberAlt::Typed,
            _ => return Decision::NoViable,
        };
        Decision::Alt(alt)
    }

    pub(super) fn decide_block_statement(&mut self) -> BlockStatementAlt {
        let alt = match self.nth(0) {
            TokenKind::KwClass
            | TokenKind::KwInterface
            | TokenKind::KwEnum
            | TokenKind::KwAbstract
            | TokenKind::KwStrictfp
            | TokenKind::KwStatic => BlockStatementAlt::LocalClass,
            TokenKind::KwFinal | TokenKind::At => {
                let class = self.lookahead("local class", |p| {
                    p.modifiers(LOCAL_CLASS_MODIFIERS)?;
                    Ok(matches!(
                        p.nth(0),
                        TokenKind::KwClass | TokenKind::KwInterface | TokenKind::KwEnum
                    ))
                });
                if class {
                    BlockStatementAlt::LocalClass
                } else {
                    BlockStatementAlt::LocalVariable
                }
            }
            kind if kind == TokenKind::Identifier || PRIMITIVE_TYPES.contains(kind) => {
                if self.starts_local_variable() {
                    BlockStatementAlt::LocalVariable
                } else {
                    BlockStatementAlt::Statement
                }
            }
            _ => BlockStatementAlt::Statement,
        };
        alt
    }

    /// Trial `UnannType Identifier`: `List<String> l` declares, `a < b` and
    /// `a[i] = 1` do not.
    pub(super) fn starts_local_variable(&mut self) -> bool {
        self.lookahead("local variable declaration", |p| {
            p.type_()?;
            Ok(p.at(TokenKind::Identifier))
        })
    }

    /// Whether a `for` header (cursor after `(`) begins with a declaration.
    pub(super) fn starts_for_declaration(&mut self) -> bool {
        match self.nth(0) {
            TokenKind::KwFinal | TokenKind::At => true,
            kind if kind == TokenKind::Identifier || PRIMITIVE_TYPES.contains(kind) => {
                self.starts_local_variable()
            }
            _ => false,
        }
    }

    /// Trial `VariableModifier* UnannType VariableDeclaratorId :`.
    pub(super) fn is_enhanced_for(&mut self) -> bool {
        self.lookahead("enhanced for", |p| {
            p.modifiers(VARIABLE_MODIFIERS)?;
            p.type_()?;
            p.variable_declarator_id()?;
            Ok(p.at(TokenKind::Colon))
        })
    }

    pub(super) fn decide_statement(&self) -> Decision<StatementAlt> {
        let alt = match self.nth(0) {
            TokenKind::LBrace => StatementAlt::Block,
            TokenKind::Semi => StatementAlt::Empty,
            TokenKind::KwIf => StatementAlt::If,
            TokenKind::KwAssert => StatementAlt::Assert,
            TokenKind::KwSwitch => StatementAlt::Switch,
            TokenKind::KwWhile => StatementAlt::While,
            TokenKind::KwDo => StatementAlt::Do,
            TokenKind::KwFor => StatementAlt::For,
            TokenKind::KwBreak | TokenKind::KwContinue => StatementAlt::Jump,
            TokenKind::KwReturn => StatementAlt::Return,
            TokenKind::KwThrow => StatementAlt::Throw,
            TokenKind::KwSynchronized => StatementAlt::Synchronized,
            TokenKind::KwTry => StatementAlt::Try,
            TokenKind::Identifier if self.nth(1) == TokenKind::Colon => StatementAlt::Labeled,
            kind if EXPRESSION_START.contains(kind) => StatementAlt::Expression,
            _ => return Decision::NoViable,
        };
        Decision::Alt(alt)
    }

    /// `Identifier ->`, or a trial `( LambdaParameters ) ->`.
    pub(super) fn at_lambda_start(&mut self) -> bool {
        match self.nth(0) {
            TokenKind::Identifier => self.nth(1) == TokenKind::Arrow,
            TokenKind::LParen => self.lookahead("lambda parameters", |p| {
                p.lambda_parameters()?;
                Ok(p.at(TokenKind::Arrow))
            }),
            _ => false,
        }
    }

    /// Given a successfully trial-parsed `( Type AdditionalBound* )`, decides
    /// from the next token whether it is a cast.
    ///
    /// A primitive type is always a cast. A reference type is a cast when an
    /// operand that is not `+`/`-` prefixed follows. For `( Name ) (` the
    /// name decides: a type-like capitalized last segment makes a cast,
    /// anything else a parenthesized expression followed by a call.
    pub(super) fn commits_to_cast(&self, head: &[Element<'src>]) -> bool {
        let Some(ty) = head.get(1).and_then(Element::as_node) else {
            return false;
        };
        if ty.kind() == NodeKind::PrimitiveType && head.len() == 3 {
            return true;
        }
        match self.nth(0) {
            TokenKind::LParen if is_plain_name(ty) => ty
                .tokens()
                .filter(|t| t.kind == TokenKind::Identifier)
                .last()
                .is_some_and(|t| t.text.chars().next().is_some_and(char::is_uppercase)),
            kind => UNARY_NOT_PLUS_MINUS_START.contains(kind),
        }
    }

    pub(super) fn decide_primary(&mut self) -> Decision<PrimaryAlt> {
        let alt = match self.nth(0) {
            kind if LITERALS.contains(kind) => PrimaryAlt::Literal,
            TokenKind::KwThis => PrimaryAlt::This,
            TokenKind::LParen => PrimaryAlt::Parenthesized,
            TokenKind::Identifier => match self.nth(1) {
                TokenKind::LParen => PrimaryAlt::Call,
                TokenKind::LBracket if self.nth(2) != TokenKind::RBracket => PrimaryAlt::IndexedName,
                _ => PrimaryAlt::Name,
            },
            TokenKind::KwSuper => match (self.nth(1), self.nth(2)) {
                (TokenKind::Dot, TokenKind::Lt) => PrimaryAlt::SuperCall,
                (TokenKind::Dot, TokenKind::Identifier) if self.nth(3) == TokenKind::LParen => {
                    PrimaryAlt::SuperCall
                }
                (TokenKind::Dot, TokenKind::Identifier) => PrimaryAlt::SuperField,
                (TokenKind::ColonColon, _) => PrimaryAlt::SuperReference,
                _ => return Decision::NoViable,
            },
            TokenKind::KwNew => {
                if self.is_array_creation() {
                    PrimaryAlt::ArrayCreation
                } else {
                    PrimaryAlt::InstanceCreation
                }
            }
            kind if kind == TokenKind::KwVoid || PRIMITIVE_TYPES.contains(kind) => PrimaryAlt::TypeLiteral,
            _ => return Decision::NoViable,
        };
        Decision::Alt(alt)
    }

    /// `new Annotation* ClassType [`, or `new` and a primitive type. Type
    /// arguments after `new` always mean a constructor call.
    fn is_array_creation(&mut self) -> bool {
        self.lookahead("array creation", |p| {
            p.bump();
            p.annotations()?;
            if p.at_any(PRIMITIVE_TYPES) {
                return Ok(true);
            }
            p.class_type(true)?;
            Ok(p.at(TokenKind::LBracket))
        })
    }

    /// Picks the next suffix for the chain ending in `prefix`, or `None`
    /// when the chain is complete.
    pub(super) fn decide_suffix(&mut self, prefix: &Node<'src>) -> Option<SuffixAlt> {
        let alt = match self.nth(0) {
            TokenKind::Dot => match self.nth(1) {
                TokenKind::Identifier if self.nth(2) == TokenKind::LParen => SuffixAlt::MethodInvocation,
                TokenKind::Identifier => SuffixAlt::FieldAccess,
                TokenKind::Lt => {
                    // `.<T>super(...)` belongs to a qualified constructor call.
                    let super_call = self.lookahead("qualified super call", |p| {
                        p.bump();
                        p.type_arguments(false)?;
                        Ok(p.at(TokenKind::KwSuper))
                    });
                    if super_call {
                        return None;
                    }
                    SuffixAlt::MethodInvocation
                }
                TokenKind::KwNew => SuffixAlt::ClassInstanceCreation,
                TokenKind::KwThis => SuffixAlt::QualifiedThis,
                TokenKind::KwClass => SuffixAlt::ClassLiteral,
                TokenKind::KwSuper => match self.nth(2) {
                    TokenKind::ColonColon => SuffixAlt::MethodReference,
                    TokenKind::Dot if self.nth(3) == TokenKind::Lt => SuffixAlt::MethodInvocation,
                    TokenKind::Dot if self.nth(4) == TokenKind::LParen => SuffixAlt::MethodInvocation,
                    TokenKind::Dot => SuffixAlt::FieldAccess,
                    _ => return None,
                },
                _ => return None,
            },
            TokenKind::LBracket if self.nth(1) == TokenKind::RBracket => {
                if self.dims_lead_to_reference() {
                    SuffixAlt::MethodReference
                } else {
                    SuffixAlt::ClassLiteral
                }
            }
            TokenKind::LBracket => SuffixAlt::ArrayAccess,
            TokenKind::ColonColon => SuffixAlt::MethodReference,
            TokenKind::Lt if is_name_chain(prefix) => {
                if self.is_generic_method_reference() {
                    SuffixAlt::MethodReference
                } else {
                    return None;
                }
            }
            TokenKind::LParen if prefix.kind() == NodeKind::ParenthesizedExpression => {
                SuffixAlt::ParenthesizedCall
            }
            _ => return None,
        };
        Some(alt)
    }

    /// Whether the `[ ]` pairs at the cursor end in `::`, as in `int[]::new`.
    pub(super) fn dims_lead_to_reference(&self) -> bool {
        let mut k = 0;
        while self.nth(k) == TokenKind::LBracket && self.nth(k + 1) == TokenKind::RBracket {
            k += 2;
        }
        self.nth(k) == TokenKind::ColonColon
    }

    /// Trial `TypeArguments ( . Identifier TypeArguments? )* Dims? ::` after a
    /// name, as in `List<String>::new`. Otherwise `<` is less-than.
    fn is_generic_method_reference(&mut self) -> bool {
        self.lookahead("generic method reference", |p| {
            p.type_arguments(false)?;
            while p.at(TokenKind::Dot) && p.nth(1) == TokenKind::Identifier {
                p.bump();
                p.bump();
                if p.at(TokenKind::Lt) {
                    p.type_arguments(false)?;
                }
            }
            p.dims()?;
            Ok(p.at(TokenKind::ColonColon))
        })
    }
}

/// A `ClassType` with no type arguments or annotations anywhere.
fn is_plain_name(ty: &Node<'_>) -> bool {
    ty.kind() == NodeKind::ClassType
        && ty
            .descendants()
            .all(|n| !matches!(n.kind(), NodeKind::TypeArguments | NodeKind::Annotations))
}

/// `a`, `a.b`, `a.b.c`: an expression name followed only by plain field
/// accesses.
fn is_name_chain(node: &Node<'_>) -> bool {
    let mut node = node;
    loop {
        match node.kind() {
            NodeKind::ExpressionName => return true,
            NodeKind::FieldAccess if node.children().len() == 3 => match node.child(0).and_then(Element::as_node) {
                Some(inner) => node = inner,
                None => return false,
            },
            _ => return false,
        }
    }
}
