#![forbid(unsafe_code)]
#![allow(unused_assignments)]

use jcst_syntax::{span_between, Span, Token, TokenKind};
use logos::Logos;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
#[error("lex error: {message}")]
#[diagnostic(code(jcst::lex))]
#[allow(unused_assignments)]
pub struct LexError {
    pub message: String,
    #[label]
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum NumberKind {
    Integer,
    Float,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\r\n]*")]
enum RawToken {
    #[token("abstract")]
    KwAbstract,
    #[token("assert")]
    KwAssert,
    #[token("boolean")]
    KwBoolean,
    #[token("break")]
    KwBreak,
    #[token("byte")]
    KwByte,
    #[token("case")]
    KwCase,
    #[token("catch")]
    KwCatch,
    #[token("char")]
    KwChar,
    #[token("class")]
    KwClass,
    #[token("const")]
    KwConst,
    #[token("continue")]
    KwContinue,
    #[token("default")]
    KwDefault,
    #[token("do")]
    KwDo,
    #[token("double")]
    KwDouble,
    #[token("else")]
    KwElse,
    #[token("enum")]
    KwEnum,
    #[token("extends")]
    KwExtends,
    #[token("final")]
    KwFinal,
    #[token("finally")]
    KwFinally,
    #[token("float")]
    KwFloat,
    #[token("for")]
    KwFor,
    #[token("if")]
    KwIf,
    #[token("goto")]
    KwGoto,
    #[token("implements")]
    KwImplements,
    #[token("import")]
    KwImport,
    #[token("instanceof")]
    KwInstanceof,
    #[token("int")]
    KwInt,
    #[token("interface")]
    KwInterface,
    #[token("long")]
    KwLong,
    #[token("native")]
    KwNative,
    #[token("new")]
    KwNew,
    #[token("package")]
    KwPackage,
    #[token("private")]
    KwPrivate,
    #[token("protected")]
    KwProtected,
    #[token("public")]
    KwPublic,
    #[token("return")]
    KwReturn,
    #[token("short")]
    KwShort,
    #[token("static")]
    KwStatic,
    #[token("strictfp")]
    KwStrictfp,
    #[token("super")]
    KwSuper,
    #[token("switch")]
    KwSwitch,
    #[token("synchronized")]
    KwSynchronized,
    #[token("this")]
    KwThis,
    #[token("throw")]
    KwThrow,
    #[token("throws")]
    KwThrows,
    #[token("transient")]
    KwTransient,
    #[token("try")]
    KwTry,
    #[token("void")]
    KwVoid,
    #[token("volatile")]
    KwVolatile,
    #[token("while")]
    KwWhile,
    #[token("true")]
    KwTrue,
    #[token("false")]
    KwFalse,
    #[token("null")]
    KwNull,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("@")]
    At,
    #[token("::")]
    ColonColon,
    #[token("=")]
    Assign,
    #[token(">")]
    Gt,
    #[token("<")]
    Lt,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token("->")]
    Arrow,
    #[token("==")]
    EqEq,
    #[token("<=")]
    Le,
    #[token(">=")]
    Ge,
    #[token("!=")]
    Ne,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("%")]
    Percent,
    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("/=")]
    SlashAssign,
    #[token("&=")]
    AmpAssign,
    #[token("|=")]
    PipeAssign,
    #[token("^=")]
    CaretAssign,
    #[token("%=")]
    PercentAssign,
    #[token("<<=")]
    ShlAssign,
    #[token(">>=")]
    ShrAssign,
    #[token(">>>=")]
    UshrAssign,

    #[regex(r"[0-9]", number)]
    #[regex(r"\.[0-9]", number)]
    Number(NumberKind),

    #[regex(r#"'([^'\\\r\n]|\\([btnfr"'\\]|[0-7]{1,3}|u+[0-9a-fA-F]{4}))'"#)]
    CharacterLiteral,

    #[regex(r#""([^"\\\r\n]|\\([btnfr"'\\]|[0-7]{1,3}|u+[0-9a-fA-F]{4}))*""#)]
    StringLiteral,

    #[regex(r"[\p{L}_$][\p{L}\p{Nd}_$]*")]
    Identifier,

    #[token("/*", block_comment)]
    BlockComment,
}

/// Token kind for `raw`, or `None` for trivia.
fn kind_of(raw: RawToken) -> Option<TokenKind> {
    let kind = match raw {
        RawToken::KwAbstract => TokenKind::KwAbstract,
        RawToken::KwAssert => TokenKind::KwAssert,
        RawToken::KwBoolean => TokenKind::KwBoolean,
        RawToken::KwBreak => TokenKind::KwBreak,
        RawToken::KwByte => TokenKind::KwByte,
        RawToken::KwCase => TokenKind::KwCase,
        RawToken::KwCatch => TokenKind::KwCatch,
        RawToken::KwChar => TokenKind::KwChar,
        RawToken::KwClass => TokenKind::KwClass,
        RawToken::KwConst => TokenKind::KwConst,
        RawToken::KwContinue => TokenKind::KwContinue,
        RawToken::KwDefault => TokenKind::KwDefault,
        RawToken::KwDo => TokenKind::KwDo,
        RawToken::KwDouble => TokenKind::KwDouble,
        RawToken::KwElse => TokenKind::KwElse,
        RawToken::KwEnum => TokenKind::KwEnum,
        RawToken::KwExtends => TokenKind::KwExtends,
        RawToken::KwFinal => TokenKind::KwFinal,
        RawToken::KwFinally => TokenKind::KwFinally,
        RawToken::KwFloat => TokenKind::KwFloat,
        RawToken::KwFor => TokenKind::KwFor,
        RawToken::KwIf => TokenKind::KwIf,
        RawToken::KwGoto => TokenKind::KwGoto,
        RawToken::KwImplements => TokenKind::KwImplements,
        RawToken::KwImport => TokenKind::KwImport,
        RawToken::KwInstanceof => TokenKind::KwInstanceof,
        RawToken::KwInt => TokenKind::KwInt,
        RawToken::KwInterface => TokenKind::KwInterface,
        RawToken::KwLong => TokenKind::KwLong,
        RawToken::KwNative => TokenKind::KwNative,
        RawToken::KwNew => TokenKind::KwNew,
        RawToken::KwPackage => TokenKind::KwPackage,
        RawToken::KwPrivate => TokenKind::KwPrivate,
        RawToken::KwProtected => TokenKind::KwProtected,
        RawToken::KwPublic => TokenKind::KwPublic,
        RawToken::KwReturn => TokenKind::KwReturn,
        RawToken::KwShort => TokenKind::KwShort,
        RawToken::KwStatic => TokenKind::KwStatic,
        RawToken::KwStrictfp => TokenKind::KwStrictfp,
        RawToken::KwSuper => TokenKind::KwSuper,
        RawToken::KwSwitch => TokenKind::KwSwitch,
        RawToken::KwSynchronized => TokenKind::KwSynchronized,
        RawToken::KwThis => TokenKind::KwThis,
        RawToken::KwThrow => TokenKind::KwThrow,
        RawToken::KwThrows => TokenKind::KwThrows,
        RawToken::KwTransient => TokenKind::KwTransient,
        RawToken::KwTry => TokenKind::KwTry,
        RawToken::KwVoid => TokenKind::KwVoid,
        RawToken::KwVolatile => TokenKind::KwVolatile,
        RawToken::KwWhile => TokenKind::KwWhile,
        RawToken::KwTrue => TokenKind::KwTrue,
        RawToken::KwFalse => TokenKind::KwFalse,
        RawToken::KwNull => TokenKind::KwNull,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Semi => TokenKind::Semi,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::At => TokenKind::At,
        RawToken::ColonColon => TokenKind::ColonColon,
        RawToken::Assign => TokenKind::Assign,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Tilde => TokenKind::Tilde,
        RawToken::Question => TokenKind::Question,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Arrow => TokenKind::Arrow,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::Le => TokenKind::Le,
        RawToken::Ge => TokenKind::Ge,
        RawToken::Ne => TokenKind::Ne,
        RawToken::AndAnd => TokenKind::AndAnd,
        RawToken::OrOr => TokenKind::OrOr,
        RawToken::PlusPlus => TokenKind::PlusPlus,
        RawToken::MinusMinus => TokenKind::MinusMinus,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Percent => TokenKind::Percent,
        RawToken::PlusAssign => TokenKind::PlusAssign,
        RawToken::MinusAssign => TokenKind::MinusAssign,
        RawToken::StarAssign => TokenKind::StarAssign,
        RawToken::SlashAssign => TokenKind::SlashAssign,
        RawToken::AmpAssign => TokenKind::AmpAssign,
        RawToken::PipeAssign => TokenKind::PipeAssign,
        RawToken::CaretAssign => TokenKind::CaretAssign,
        RawToken::PercentAssign => TokenKind::PercentAssign,
        RawToken::ShlAssign => TokenKind::ShlAssign,
        RawToken::ShrAssign => TokenKind::ShrAssign,
        RawToken::UshrAssign => TokenKind::UshrAssign,

        RawToken::Number(NumberKind::Integer) => TokenKind::IntegerLiteral,
        RawToken::Number(NumberKind::Float) => TokenKind::FloatingPointLiteral,
        RawToken::CharacterLiteral => TokenKind::CharacterLiteral,
        RawToken::StringLiteral => TokenKind::StringLiteral,
        RawToken::Identifier => TokenKind::Identifier,

        RawToken::BlockComment => return None,
    };
    Some(kind)
}

/// Consumes a block or doc comment through its closing `*/`. Fails when the
/// comment is never closed.
fn block_comment(lex: &mut logos::Lexer<RawToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

/// Scans the whole numeric literal that begins at the matched digit (or
/// `.digit`). On a malformed literal the rest of the word is consumed so the
/// error covers all of it.
fn number(lex: &mut logos::Lexer<RawToken>) -> Option<NumberKind> {
    let rest = &lex.source()[lex.span().start..];
    let scanned = scan_number(rest.as_bytes());
    let len = match scanned {
        Some((len, _)) => len,
        None => rest
            .bytes()
            .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, b'_' | b'.' | b'$'))
            .count(),
    };
    lex.bump(len.saturating_sub(lex.slice().len()));
    scanned.map(|(_, kind)| kind)
}

/// Decimal, hex, octal and binary integers with `_` separators and an
/// optional `L`; decimal and hex floats with exponents and `f`/`d` suffixes.
fn scan_number(b: &[u8]) -> Option<(usize, NumberKind)> {
    let at = |i: usize| b.get(i).copied().unwrap_or(0);
    let mut i = 0;
    let mut float = false;
    let mut decimal = false;

    match (at(0), at(1).to_ascii_lowercase()) {
        (b'0', b'x') => {
            i = 2;
            let whole = digits(b, &mut i, |c| c.is_ascii_hexdigit())?;
            let mut fraction = 0;
            if at(i) == b'.' {
                i += 1;
                fraction = digits(b, &mut i, |c| c.is_ascii_hexdigit())?;
                float = true;
            }
            if whole + fraction == 0 {
                return None;
            }
            if at(i).to_ascii_lowercase() == b'p' {
                i += 1;
                exponent(b, &mut i)?;
                float = true;
            } else if float {
                // Hex floats need a binary exponent.
                return None;
            }
        }
        (b'0', b'b') => {
            i = 2;
            if digits(b, &mut i, |c| matches!(c, b'0' | b'1'))? == 0 {
                return None;
            }
        }
        _ => {
            decimal = true;
            digits(b, &mut i, |c| c.is_ascii_digit())?;
            if at(i) == b'.' {
                i += 1;
                digits(b, &mut i, |c| c.is_ascii_digit())?;
                float = true;
            }
            if at(i).to_ascii_lowercase() == b'e' {
                i += 1;
                exponent(b, &mut i)?;
                float = true;
            }
        }
    }

    let kind = match at(i).to_ascii_lowercase() {
        b'l' if !float => {
            i += 1;
            NumberKind::Integer
        }
        b'f' | b'd' if decimal || float => {
            i += 1;
            NumberKind::Float
        }
        _ if float => NumberKind::Float,
        _ => NumberKind::Integer,
    };
    let next = at(i);
    if next.is_ascii_alphanumeric() || matches!(next, b'_' | b'$') {
        return None;
    }
    Some((i, kind))
}

/// Digits matching `is_digit` with `_` between them; returns how many digits
/// were read, or `None` when the run ends in `_`.
fn digits(b: &[u8], i: &mut usize, is_digit: impl Fn(u8) -> bool) -> Option<usize> {
    let start = *i;
    let mut count = 0;
    while let Some(&c) = b.get(*i) {
        if is_digit(c) {
            count += 1;
        } else if c != b'_' {
            break;
        }
        *i += 1;
    }
    if *i > start && b[*i - 1] == b'_' {
        return None;
    }
    Some(count)
}

fn exponent(b: &[u8], i: &mut usize) -> Option<()> {
    if matches!(b.get(*i), Some(b'+' | b'-')) {
        *i += 1;
    }
    match digits(b, i, |c| c.is_ascii_digit())? {
        0 => None,
        _ => Some(()),
    }
}

fn describe_garbage(slice: &str) -> &'static str {
    if slice.starts_with("/*") {
        return "unterminated block comment";
    }
    match slice.chars().next() {
        Some('"') => "invalid or unterminated string literal",
        Some('\'') => "invalid or unterminated character literal",
        Some(c) if c.is_ascii_digit() || c == '.' => "invalid numeric literal",
        _ => "unexpected character",
    }
}

pub struct Lexer<'src> {
    src: &'src str,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self { src }
    }

    /// Lexes the whole buffer. The result always ends with an `Eof` token.
    pub fn lex(&self) -> Result<Vec<Token<'src>>, LexError> {
        let mut tokens = Vec::new();
        let mut lex = RawToken::lexer(self.src);

        while let Some(raw) = lex.next() {
            let range = lex.span();
            let span = span_between(range.start, range.end);
            let text = lex.slice();

            let kind = match raw {
                Ok(raw) => match kind_of(raw) {
                    Some(kind) => kind,
                    None => continue,
                },
                Err(()) => {
                    return Err(LexError {
                        message: describe_garbage(text).to_string(),
                        span,
                    });
                }
            };

            tokens.push(Token::new(kind, text, span));
        }

        let end = self.src.len();
        tokens.push(Token::new(TokenKind::Eof, &self.src[end..], span_between(end, end)));

        Ok(tokens)
    }
}
