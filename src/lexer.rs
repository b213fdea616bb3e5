//! Tokenizer for the PHP subset the package manifest is written in.
//!
//! The manifest (`controller.php`) is ordinary PHP source, but pkgship never
//! executes it: the handle and version are pulled out of the raw text by
//! scanning a flat token stream. Tokenization uses the Logos library.
//! Whitespace and comments are skipped; only the token kinds the extractor
//! cares about are distinguished, and any stray character that starts no
//! other token lexes as a generic symbol so position-sensitive rules still
//! see it. A sequence that starts a token but cannot finish it (an
//! unterminated string literal) is a lexing error.

use crate::error::{PkgshipError, Result};
use logos::Logos;
use std::ops::Range;

/// Token kinds recognized by the manifest lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Logos)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"#[^\n]*")]
#[logos(skip r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
pub enum TokenKind {
    /// The `class` keyword (case-insensitive, as in PHP).
    #[token("class", ignore(ascii_case))]
    Class,

    /// The `::` scope-resolution operator.
    #[token("::")]
    DoubleColon,

    /// `{`
    #[token("{")]
    OpenBrace,

    /// `}`
    #[token("}")]
    CloseBrace,

    /// The `=` assignment operator.
    #[token("=")]
    Assign,

    /// `;`
    #[token(";")]
    Semicolon,

    /// A variable or property name, e.g. `$pkgHandle`.
    #[regex(r"\$[A-Za-z_][A-Za-z0-9_]*")]
    Variable,

    /// A bare identifier or keyword other than `class`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    /// A numeric literal.
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    /// A double-quoted string literal, delimiters included.
    #[regex(r#""([^"\\]|\\.)*""#)]
    DoubleQuoted,

    /// A single-quoted string literal, delimiters included.
    #[regex(r"'([^'\\]|\\.)*'")]
    SingleQuoted,

    /// Any other single character.
    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true for either string-literal kind.
    #[must_use]
    pub fn is_string_literal(self) -> bool {
        matches!(self, Self::DoubleQuoted | Self::SingleQuoted)
    }
}

/// A token with its kind, source span, and raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token kind.
    pub kind: TokenKind,
    /// Byte range of the token in the source text.
    pub span: Range<usize>,
    /// The raw token text, delimiters and escapes intact.
    pub text: String,
}

/// Lexes manifest source text into a flat token sequence.
///
/// # Errors
///
/// Returns [`PkgshipError::ManifestFormat`] if a character sequence cannot
/// be tokenized, i.e. an unterminated string literal: the quote commits the
/// lexer to the literal pattern, so no catch-all applies.
pub fn lex(source: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = result.map_err(|()| PkgshipError::ManifestFormat {
            reason: format!("unexpected character at byte {}", span.start),
        })?;

        tokens.push(Token {
            kind,
            span: span.clone(),
            text: source[span].to_owned(),
        });
    }

    Ok(tokens)
}

/// Decodes a quoted PHP string literal to its runtime value.
///
/// Single-quoted strings resolve only `\'` and `\\`; every other backslash
/// is kept verbatim. Double-quoted strings additionally resolve the common
/// escapes (`\n`, `\t`, `\r`, `\v`, `\f`, `\0`, `\"`, `\$`); an unknown
/// escape passes through with its backslash, matching PHP.
///
/// # Examples
///
/// ```
/// use pkgship::lexer::decode_string_literal;
///
/// assert_eq!(decode_string_literal(r"'it\'s'"), "it's");
/// assert_eq!(decode_string_literal(r#""1.0\n""#), "1.0\n");
/// ```
#[must_use]
pub fn decode_string_literal(raw: &str) -> String {
    if raw.len() < 2 {
        return String::new();
    }
    let double_quoted = raw.starts_with('"');
    let body = &raw[1..raw.len() - 1];

    let mut decoded = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            decoded.push(ch);
            continue;
        }
        let Some(escaped) = chars.next() else {
            decoded.push('\\');
            break;
        };
        decoded.push_str(&resolve_escape(escaped, double_quoted));
    }
    decoded
}

fn resolve_escape(escaped: char, double_quoted: bool) -> String {
    if !double_quoted {
        return match escaped {
            '\'' | '\\' => escaped.to_string(),
            other => format!("\\{other}"),
        };
    }
    match escaped {
        'n' => "\n".to_owned(),
        't' => "\t".to_owned(),
        'r' => "\r".to_owned(),
        'v' => "\u{0B}".to_owned(),
        'f' => "\u{0C}".to_owned(),
        '0' => "\0".to_owned(),
        '"' | '\\' | '$' => escaped.to_string(),
        other => format!("\\{other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source)
            .expect("lexing should succeed")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_property_assignment() {
        let tokens = lex(r#"protected $pkgHandle = "my_package";"#).expect("valid source");
        let expected = [
            (TokenKind::Ident, "protected"),
            (TokenKind::Variable, "$pkgHandle"),
            (TokenKind::Assign, "="),
            (TokenKind::DoubleQuoted, "\"my_package\""),
            (TokenKind::Semicolon, ";"),
        ];
        assert_eq!(tokens.len(), expected.len());
        for (token, (kind, text)) in tokens.iter().zip(expected) {
            assert_eq!(token.kind, kind);
            assert_eq!(token.text, text);
        }
    }

    #[test]
    fn class_keyword_is_distinguished_from_identifiers() {
        assert_eq!(
            kinds("class Controller"),
            vec![TokenKind::Class, TokenKind::Ident]
        );
        // A longer identifier containing the keyword is not the keyword.
        assert_eq!(kinds("classes"), vec![TokenKind::Ident]);
    }

    #[test]
    fn class_keyword_matches_case_insensitively() {
        assert_eq!(kinds("Class"), vec![TokenKind::Class]);
        assert_eq!(kinds("CLASS"), vec![TokenKind::Class]);
    }

    #[test]
    fn double_colon_lexes_as_one_token() {
        assert_eq!(
            kinds("Package::class"),
            vec![TokenKind::Ident, TokenKind::DoubleColon, TokenKind::Class]
        );
        // A lone colon falls through to the symbol catch-all.
        assert_eq!(kinds(":"), vec![TokenKind::Symbol]);
    }

    #[rstest]
    #[case::line("// class Hidden\n$x")]
    #[case::hash("# class Hidden\n$x")]
    #[case::block("/* class Hidden */ $x")]
    #[case::block_with_stars("/** class Hidden **/ $x")]
    fn comments_are_skipped(#[case] source: &str) {
        assert_eq!(kinds(source), vec![TokenKind::Variable]);
    }

    #[test]
    fn braces_inside_strings_are_not_brace_tokens() {
        assert_eq!(kinds(r#""{not a brace}""#), vec![TokenKind::DoubleQuoted]);
    }

    #[test]
    fn php_open_tag_lexes_as_symbols() {
        assert_eq!(
            kinds("<?php"),
            vec![TokenKind::Symbol, TokenKind::Symbol, TokenKind::Ident]
        );
    }

    #[rstest]
    #[case::double_quoted(r#"$x = "oops"#)]
    #[case::single_quoted("$x = 'oops")]
    fn unterminated_string_is_a_lexing_error(#[case] source: &str) {
        // The opening quote commits the lexer to the literal pattern; it
        // does not fall back to the symbol catch-all.
        let err = lex(source).expect_err("unterminated literal must not lex");
        match err {
            PkgshipError::ManifestFormat { reason } => {
                assert!(
                    reason.contains("unexpected character at byte 5"),
                    "unexpected reason: {reason:?}"
                );
            }
            other => panic!("expected ManifestFormat, got {other:?}"),
        }
    }

    #[test]
    fn spans_index_the_source() {
        let source = r#"$pkgVersion = '1.2.3';"#;
        let tokens = lex(source).expect("valid source");
        let literal = tokens
            .iter()
            .find(|t| t.kind == TokenKind::SingleQuoted)
            .expect("literal token");
        assert_eq!(&source[literal.span.clone()], "'1.2.3'");
    }

    #[rstest]
    #[case::plain("'my_package'", "my_package")]
    #[case::escaped_quote(r"'it\'s'", "it's")]
    #[case::escaped_backslash(r"'a\\b'", r"a\b")]
    #[case::newline_stays_literal(r"'a\nb'", r"a\nb")]
    fn decodes_single_quoted_literals(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(decode_string_literal(raw), expected);
    }

    #[rstest]
    #[case::plain(r#""1.2.3""#, "1.2.3")]
    #[case::newline(r#""a\nb""#, "a\nb")]
    #[case::tab(r#""a\tb""#, "a\tb")]
    #[case::dollar(r#""\$x""#, "$x")]
    #[case::escaped_quote(r#""say \"hi\"""#, "say \"hi\"")]
    #[case::unknown_escape_passes_through(r#""a\qb""#, r"a\qb")]
    fn decodes_double_quoted_literals(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(decode_string_literal(raw), expected);
    }
}
