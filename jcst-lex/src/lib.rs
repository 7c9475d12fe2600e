#![forbid(unsafe_code)]

mod lexer;

pub use jcst_syntax::{Token, TokenKind};
pub use lexer::{LexError, Lexer};

/// Lexes `src` into a token vector terminated by `Eof`.
pub fn lex(src: &str) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::new(src).lex()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        lex(src).unwrap().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn keywords_win_over_identifiers() {
        assert_eq!(
            kinds("class classy instanceof _x $y"),
            vec![
                TokenKind::KwClass,
                TokenKind::Identifier,
                TokenKind::KwInstanceof,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_numeric_literals() {
        let tokens = lex("0 42L 0x1F 0b1010 1_000 3.14 .5 1e10 2f 1.5e-3d 0x1.8p1").unwrap();
        let got: Vec<(TokenKind, &str)> = tokens.iter().map(|t| (t.kind, t.text)).collect();
        assert_eq!(
            got,
            vec![
                (TokenKind::IntegerLiteral, "0"),
                (TokenKind::IntegerLiteral, "42L"),
                (TokenKind::IntegerLiteral, "0x1F"),
                (TokenKind::IntegerLiteral, "0b1010"),
                (TokenKind::IntegerLiteral, "1_000"),
                (TokenKind::FloatingPointLiteral, "3.14"),
                (TokenKind::FloatingPointLiteral, ".5"),
                (TokenKind::FloatingPointLiteral, "1e10"),
                (TokenKind::FloatingPointLiteral, "2f"),
                (TokenKind::FloatingPointLiteral, "1.5e-3d"),
                (TokenKind::FloatingPointLiteral, "0x1.8p1"),
                (TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn lex_string_and_char_literals_keep_raw_text() {
        let tokens = lex(r#""a\n\"bA" 'c' '\'' 'é'"#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].text, r#""a\n\"bA""#);
        assert_eq!(tokens[1].kind, TokenKind::CharacterLiteral);
        assert_eq!(tokens[2].text, r"'\''");
        assert_eq!(tokens[3].kind, TokenKind::CharacterLiteral);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            kinds("a // line\n/* block * / */ b /** doc */"),
            vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn lex_binary_and_suffixed_integers() {
        let tokens = lex("0b1010 0B11L 0_7 0xCAFE_BABEl 1.f 0x.8p-2").unwrap();
        let got: Vec<(TokenKind, &str)> = tokens.iter().map(|t| (t.kind, t.text)).collect();
        assert_eq!(
            got,
            vec![
                (TokenKind::IntegerLiteral, "0b1010"),
                (TokenKind::IntegerLiteral, "0B11L"),
                (TokenKind::IntegerLiteral, "0_7"),
                (TokenKind::IntegerLiteral, "0xCAFE_BABEl"),
                (TokenKind::FloatingPointLiteral, "1.f"),
                (TokenKind::FloatingPointLiteral, "0x.8p-2"),
                (TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn lex_rejects_malformed_numbers() {
        for src in ["0b102", "1_", "0x", "1e", "0x1.8", "12abc"] {
            let err = lex(src).unwrap_err();
            assert_eq!(err.message, "invalid numeric literal", "{src}");
            assert_eq!(err.span.len(), src.len(), "{src}");
        }
    }

    #[test]
    fn block_and_doc_comments_are_skipped() {
        for src in ["/* c */ x", "/** Javadoc. */ x", "/* a * b */ x", "/* x **/ x", "/***/ x", "/**/ x"] {
            assert_eq!(kinds(src), vec![TokenKind::Identifier, TokenKind::Eof], "{src}");
        }
        assert_eq!(
            kinds("a /* one */ / /* two */ b"),
            vec![TokenKind::Identifier, TokenKind::Slash, TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn angle_brackets_are_never_fused() {
        assert_eq!(
            kinds("List<List<T>> a >>> b >>= c"),
            vec![
                TokenKind::Identifier,
                TokenKind::Lt,
                TokenKind::Identifier,
                TokenKind::Lt,
                TokenKind::Identifier,
                TokenKind::Gt,
                TokenKind::Gt,
                TokenKind::Identifier,
                TokenKind::Gt,
                TokenKind::Gt,
                TokenKind::Gt,
                TokenKind::Identifier,
                TokenKind::ShrAssign,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lambda_and_method_reference_punctuation() {
        assert_eq!(
            kinds("x -> x :: y ... @"),
            vec![
                TokenKind::Identifier,
                TokenKind::Arrow,
                TokenKind::Identifier,
                TokenKind::ColonColon,
                TokenKind::Identifier,
                TokenKind::Ellipsis,
                TokenKind::At,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn spans_point_into_source() {
        let src = "int  x;";
        let tokens = lex(src).unwrap();
        assert_eq!(tokens[1].start(), 5);
        assert_eq!(&src[tokens[1].start()..tokens[1].end()], "x");
        assert_eq!(tokens.last().unwrap().start(), src.len());
    }

    #[test]
    fn lex_rejects_unterminated_string() {
        let err = lex("String s = \"oops;\n").unwrap_err();
        assert!(err.message.contains("string literal"), "{}", err.message);
    }

    #[test]
    fn lex_rejects_unterminated_comment() {
        let err = lex("int x; /* never closed").unwrap_err();
        assert!(err.message.contains("unterminated block comment"), "{}", err.message);
        assert_eq!(err.span.offset(), 7);
    }

    #[test]
    fn lex_rejects_stray_character() {
        let err = lex("int # x;").unwrap_err();
        assert_eq!(err.message, "unexpected character");
    }
}
