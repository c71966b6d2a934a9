//! Country code normalization.
//!
//! Folds caller-supplied codes (any casing, stray whitespace) into the
//! lower-case ISO 3166-1 alpha-2 form the flag CDN expects. Anything that is
//! not two ASCII letters becomes the placeholder code.

use std::fmt;

/// Code requested from the CDN when the input cannot be resolved.
pub const PLACEHOLDER_CODE: &str = "xx";

/// Two lower-case ASCII letters. Only [`normalize`] can build one.
///
/// ```compile_fail
/// use flagkit::flags::{Alpha2, NormalizedCountryCode};
///
/// let code = NormalizedCountryCode::Known(Alpha2(*b"1!"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alpha2([u8; 2]);

impl Alpha2 {
    pub fn as_str(&self) -> &str {
        // Only ever built from ASCII letters in `normalize`.
        std::str::from_utf8(&self.0).unwrap_or(PLACEHOLDER_CODE)
    }
}

/// A country code ready to be put into a CDN path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalizedCountryCode {
    Known(Alpha2),
    Placeholder,
}

impl NormalizedCountryCode {
    /// Lower-case form used in CDN paths.
    pub fn as_str(&self) -> &str {
        match self {
            NormalizedCountryCode::Known(code) => code.as_str(),
            NormalizedCountryCode::Placeholder => PLACEHOLDER_CODE,
        }
    }

    /// Upper-case form for people to read (e.g. "GH").
    pub fn display_code(&self) -> String {
        self.as_str().to_ascii_uppercase()
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, NormalizedCountryCode::Placeholder)
    }
}

impl fmt::Display for NormalizedCountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize an arbitrary country code.
///
/// Handles:
/// - Any casing: "GH", "gh", "Gh" -> `gh`
/// - Surrounding whitespace: " ng " -> `ng`
///
/// Returns the placeholder for empty input, wrong length, non-ASCII or
/// non-alphabetic characters, and for the placeholder code itself.
pub fn normalize(code: &str) -> NormalizedCountryCode {
    let trimmed = code.trim();

    let [first, second] = match trimmed.as_bytes() {
        [a, b] if a.is_ascii_alphabetic() && b.is_ascii_alphabetic() => {
            [a.to_ascii_lowercase(), b.to_ascii_lowercase()]
        }
        _ => return NormalizedCountryCode::Placeholder,
    };

    if [first, second] == *b"xx" {
        return NormalizedCountryCode::Placeholder;
    }

    NormalizedCountryCode::Known(Alpha2([first, second]))
}
