//! Package metadata extraction from the manifest file.
//!
//! The manifest is the package's `controller.php`: a PHP source file whose
//! single class declaration carries the package handle and version as
//! string-literal property defaults. This module locates the class body in
//! the token stream and pulls the two literals out without evaluating any
//! PHP, producing the immutable [`PackageInfo`] the rest of the run works
//! from.

use crate::error::{PkgshipError, Result};
use crate::lexer::{Token, TokenKind, decode_string_literal, lex};
use camino::Utf8Path;

/// File name of the package manifest inside the package root.
pub const MANIFEST_FILE: &str = "controller.php";

/// Name of the property holding the package handle.
const HANDLE_PROPERTY: &str = "pkgHandle";

/// Name of the property holding the package version.
const VERSION_PROPERTY: &str = "pkgVersion";

/// Package identity extracted from the manifest.
///
/// Constructed once per run and never mutated; the handle doubles as the
/// archive's internal root folder and part of the output file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    handle: String,
    version: String,
}

impl PackageInfo {
    /// Creates package info, rejecting empty components.
    ///
    /// # Errors
    ///
    /// Returns [`PkgshipError::ManifestFormat`] if the handle or version is
    /// empty; either would produce a malformed archive name.
    pub fn new(handle: String, version: String) -> Result<Self> {
        if handle.is_empty() {
            return Err(format_error("package handle is empty"));
        }
        if version.is_empty() {
            return Err(format_error("package version is empty"));
        }
        Ok(Self { handle, version })
    }

    /// The package handle.
    #[must_use]
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// The package version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Token-index range of a class body, exclusive of the enclosing braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BodyRange {
    start: usize,
    end: usize,
}

/// Reads and parses the manifest under the given package root.
///
/// # Errors
///
/// Returns [`PkgshipError::ManifestNotFound`] if the manifest file is
/// absent, [`PkgshipError::ManifestRead`] if it is unreadable or empty, and
/// [`PkgshipError::ManifestFormat`] if its token shape is not the expected
/// single class with string-literal handle and version properties.
pub fn read_package_info(root: &Utf8Path) -> Result<PackageInfo> {
    let path = root.join(MANIFEST_FILE);
    if !path.is_file() {
        return Err(PkgshipError::ManifestNotFound { path });
    }

    let source = std::fs::read_to_string(&path).map_err(|err| PkgshipError::ManifestRead {
        path: path.clone(),
        reason: err.to_string(),
    })?;
    if source.is_empty() {
        return Err(PkgshipError::ManifestRead {
            path,
            reason: "file is empty".to_owned(),
        });
    }

    parse_package_info(&source)
}

/// Parses manifest source text into [`PackageInfo`].
///
/// # Errors
///
/// Returns [`PkgshipError::ManifestFormat`] for any deviation from the
/// expected shape: zero or multiple class declarations, unbalanced braces,
/// a missing property, or a property not assigned a bare string literal.
pub fn parse_package_info(source: &str) -> Result<PackageInfo> {
    let tokens = lex(source)?;
    let body = locate_class_body(&tokens)?;

    let handle = extract_string_property(&tokens, body, HANDLE_PROPERTY)?;
    let version = extract_string_property(&tokens, body, VERSION_PROPERTY)?;
    PackageInfo::new(handle, version)
}

/// Finds the body of the manifest's single class declaration.
///
/// A `class` token immediately preceded by `::` is a scope-resolution
/// reference (`Something::class`), not a declaration, and does not count.
fn locate_class_body(tokens: &[Token]) -> Result<BodyRange> {
    let declaration = find_sole_class_declaration(tokens)?;

    let mut depth = 0usize;
    let mut open_at: Option<usize> = None;
    let mut body: Option<BodyRange> = None;

    for (index, token) in tokens.iter().enumerate().skip(declaration + 1) {
        match token.kind {
            TokenKind::OpenBrace => {
                if depth == 0 {
                    if body.is_some() {
                        return Err(format_error(
                            "more than one top-level brace group follows the class declaration",
                        ));
                    }
                    open_at = Some(index);
                }
                depth += 1;
            }
            TokenKind::CloseBrace => {
                let Some(remaining) = depth.checked_sub(1) else {
                    return Err(format_error("unmatched `}` before the class body opens"));
                };
                depth = remaining;
                if depth == 0 {
                    if let Some(open) = open_at.take() {
                        body = Some(BodyRange {
                            start: open + 1,
                            end: index,
                        });
                    }
                }
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(format_error("class body is not closed before end of file"));
    }
    body.ok_or_else(|| format_error("class declaration has no body"))
}

/// Returns the index of the sole qualifying `class` token.
fn find_sole_class_declaration(tokens: &[Token]) -> Result<usize> {
    let mut declaration: Option<usize> = None;

    for (index, token) in tokens.iter().enumerate() {
        if token.kind != TokenKind::Class {
            continue;
        }
        let preceded_by_scope = index
            .checked_sub(1)
            .is_some_and(|prev| tokens[prev].kind == TokenKind::DoubleColon);
        if preceded_by_scope {
            continue;
        }
        if declaration.is_some() {
            return Err(format_error("more than one class declaration found"));
        }
        declaration = Some(index);
    }

    declaration.ok_or_else(|| format_error("no class declaration found"))
}

/// Extracts the decoded value of `$<name> = "<literal>"` from the class
/// body, scanning at brace depth zero only.
///
/// Nested brace groups (method bodies, closures) are skipped over, not
/// descended into, so a property shadowed inside a method is never matched.
fn extract_string_property(tokens: &[Token], body: BodyRange, name: &str) -> Result<String> {
    let wanted = format!("${name}");
    let mut depth = 0usize;

    for index in body.start..body.end {
        let token = &tokens[index];
        match token.kind {
            TokenKind::OpenBrace => depth += 1,
            TokenKind::CloseBrace => depth = depth.saturating_sub(1),
            TokenKind::Variable if depth == 0 && token.text == wanted => {
                return literal_assigned_to(tokens, body, index, name);
            }
            _ => {}
        }
    }

    Err(format_error(format!(
        "property ${name} not found in the class body"
    )))
}

/// Requires `= "<literal>"` to follow the matched property token and
/// returns the decoded literal.
fn literal_assigned_to(
    tokens: &[Token],
    body: BodyRange,
    property_index: usize,
    name: &str,
) -> Result<String> {
    let token_at = |index: usize| (index < body.end).then(|| &tokens[index]);

    let assign = token_at(property_index + 1);
    if assign.is_none_or(|t| t.kind != TokenKind::Assign) {
        return Err(format_error(format!(
            "property ${name} is not a simple assignment"
        )));
    }

    let literal = match token_at(property_index + 2) {
        Some(token) if token.kind.is_string_literal() => token,
        _ => {
            return Err(format_error(format!(
                "property ${name} is not assigned a bare string literal"
            )));
        }
    };

    // A trailing `.`, `,` or anything but `;` means the value is computed
    // (concatenation, arithmetic), which the scanner must reject.
    let terminator = token_at(property_index + 3);
    if terminator.is_none_or(|t| t.kind != TokenKind::Semicolon) {
        return Err(format_error(format!(
            "property ${name} is not a single string literal assignment"
        )));
    }

    Ok(decode_string_literal(&literal.text))
}

fn format_error(reason: impl Into<String>) -> PkgshipError {
    PkgshipError::ManifestFormat {
        reason: reason.into(),
    }
}
