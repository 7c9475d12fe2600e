#![forbid(unsafe_code)]

use std::fmt;

use crate::Span;

/// A lexed token. The text borrows from the source buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, text: &'src str, span: Span) -> Self {
        Self { kind, text, span }
    }

    pub fn start(&self) -> usize {
        self.span.offset()
    }

    pub fn end(&self) -> usize {
        self.span.offset() + self.span.len()
    }
}

/// Java 8 token kinds.
///
/// `<` and `>` are never fused by the lexer; shift operators are recognized by
/// the parser as adjacent angle tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenKind {
    // Reserved words
    KwAbstract,
    KwAssert,
    KwBoolean,
    KwBreak,
    KwByte,
    KwCase,
    KwCatch,
    KwChar,
    KwClass,
    KwConst,
    KwContinue,
    KwDefault,
    KwDo,
    KwDouble,
    KwElse,
    KwEnum,
    KwExtends,
    KwFinal,
    KwFinally,
    KwFloat,
    KwFor,
    KwIf,
    KwGoto,
    KwImplements,
    KwImport,
    KwInstanceof,
    KwInt,
    KwInterface,
    KwLong,
    KwNative,
    KwNew,
    KwPackage,
    KwPrivate,
    KwProtected,
    KwPublic,
    KwReturn,
    KwShort,
    KwStatic,
    KwStrictfp,
    KwSuper,
    KwSwitch,
    KwSynchronized,
    KwThis,
    KwThrow,
    KwThrows,
    KwTransient,
    KwTry,
    KwVoid,
    KwVolatile,
    KwWhile,
    KwTrue,
    KwFalse,
    KwNull,

    // Separators
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semi,
    Comma,
    Dot,
    Ellipsis,
    At,
    ColonColon,

    // Operators
    Assign,
    Gt,
    Lt,
    Bang,
    Tilde,
    Question,
    Colon,
    Arrow,
    EqEq,
    Le,
    Ge,
    Ne,
    AndAnd,
    OrOr,
    PlusPlus,
    MinusMinus,
    Plus,
    Minus,
    Star,
    Slash,
    Amp,
    Pipe,
    Caret,
    Percent,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    AmpAssign,
    PipeAssign,
    CaretAssign,
    PercentAssign,
    ShlAssign,
    ShrAssign,
    UshrAssign,

    // Literals / identifiers
    IntegerLiteral,
    FloatingPointLiteral,
    CharacterLiteral,
    StringLiteral,
    Identifier,

    Eof,
}

impl TokenKind {
    /// Number of distinct kinds; every discriminant is below this.
    pub const COUNT: usize = TokenKind::Eof as usize + 1;

    /// Fixed spelling for keywords and punctuation, or a description for
    /// token kinds whose text varies.
    pub fn describe(self) -> &'static str {
        use TokenKind::*;
        match self {
            KwAbstract => "abstract",
            KwAssert => "assert",
            KwBoolean => "boolean",
            KwBreak => "break",
            KwByte => "byte",
            KwCase => "case",
            KwCatch => "catch",
            KwChar => "char",
            KwClass => "class",
            KwConst => "const",
            KwContinue => "continue",
            KwDefault => "default",
            KwDo => "do",
            KwDouble => "double",
            KwElse => "else",
            KwEnum => "enum",
            KwExtends => "extends",
            KwFinal => "final",
            KwFinally => "finally",
            KwFloat => "float",
            KwFor => "for",
            KwIf => "if",
            KwGoto => "goto",
            KwImplements => "implements",
            KwImport => "import",
            KwInstanceof => "instanceof",
            KwInt => "int",
            KwInterface => "interface",
            KwLong => "long",
            KwNative => "native",
            KwNew => "new",
            KwPackage => "package",
            KwPrivate => "private",
            KwProtected => "protected",
            KwPublic => "public",
            KwReturn => "return",
            KwShort => "short",
            KwStatic => "static",
            KwStrictfp => "strictfp",
            KwSuper => "super",
            KwSwitch => "switch",
            KwSynchronized => "synchronized",
            KwThis => "this",
            KwThrow => "throw",
            KwThrows => "throws",
            KwTransient => "transient",
            KwTry => "try",
            KwVoid => "void",
            KwVolatile => "volatile",
            KwWhile => "while",
            KwTrue => "true",
            KwFalse => "false",
            KwNull => "null",

            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            LBracket => "[",
            RBracket => "]",
            Semi => ";",
            Comma => ",",
            Dot => ".",
            Ellipsis => "...",
            At => "@",
            ColonColon => "::",

            Assign => "=",
            Gt => ">",
            Lt => "<",
            Bang => "!",
            Tilde => "~",
            Question => "?",
            Colon => ":",
            Arrow => "->",
            EqEq => "==",
            Le => "<=",
            Ge => ">=",
            Ne => "!=",
            AndAnd => "&&",
            OrOr => "||",
            PlusPlus => "++",
            MinusMinus => "--",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Amp => "&",
            Pipe => "|",
            Caret => "^",
            Percent => "%",
            PlusAssign => "+=",
            MinusAssign => "-=",
            StarAssign => "*=",
            SlashAssign => "/=",
            AmpAssign => "&=",
            PipeAssign => "|=",
            CaretAssign => "^=",
            PercentAssign => "%=",
            ShlAssign => "<<=",
            ShrAssign => ">>=",
            UshrAssign => ">>>=",

            IntegerLiteral => "integer literal",
            FloatingPointLiteral => "floating-point literal",
            CharacterLiteral => "character literal",
            StringLiteral => "string literal",
            Identifier => "identifier",
            Eof => "end of input",
        }
    }

    pub fn is_keyword(self) -> bool {
        (self as u8) <= (TokenKind::KwNull as u8)
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntegerLiteral
                | TokenKind::FloatingPointLiteral
                | TokenKind::CharacterLiteral
                | TokenKind::StringLiteral
                | TokenKind::KwTrue
                | TokenKind::KwFalse
                | TokenKind::KwNull
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_keyword() || (*self as u8) < (TokenKind::IntegerLiteral as u8) {
            write!(f, "'{}'", self.describe())
        } else {
            f.write_str(self.describe())
        }
    }
}
