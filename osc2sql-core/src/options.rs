//! Emission options: literal quoting and identifier strictness.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::document::RawId;

/// Delimiter placed around every emitted SQL literal.
///
/// `Double` produces MySQL-style `"value"` literals and is the default;
/// `Single` produces standard `'value'` literals. Escaping is the same for
/// both and only rewrites `"`, so under `Single` a value containing `'`
/// yields an unterminated literal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum QuoteStyle {
    /// Wrap literals in `"`.
    #[default]
    Double,
    /// Wrap literals in `'`. Apostrophes inside values are not escaped,
    /// so `McDonald's` renders as the invalid literal `'McDonald's'`.
    Single,
}

impl QuoteStyle {
    /// The delimiter character.
    #[must_use]
    pub const fn delimiter(self) -> char {
        match self {
            Self::Double => '"',
            Self::Single => '\'',
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Double => "double",
            Self::Single => "single",
        }
    }
}

impl fmt::Display for QuoteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QuoteStyle {
    type Err = OptionParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "double" => Ok(Self::Double),
            "single" => Ok(Self::Single),
            _ => Err(OptionParseError::QuoteStyle(value.to_owned())),
        }
    }
}

/// How entity `id` attributes become integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum IdPolicy {
    /// The trimmed attribute must be a complete signed 64-bit integer.
    /// Entities failing this are skipped and reported.
    #[default]
    Strict,
    /// C `atoi` semantics: leading digits are used and anything
    /// unparseable, including a missing attribute, becomes zero. Every
    /// coercion is reported.
    Lenient,
}

impl IdPolicy {
    /// Resolve a raw identifier under this policy.
    ///
    /// # Examples
    /// ```
    /// use osc2sql_core::{IdPolicy, IdResolution, RawId};
    ///
    /// let raw = RawId::from("42abc");
    /// assert_eq!(IdPolicy::Strict.resolve(&raw), IdResolution::Invalid);
    /// assert_eq!(IdPolicy::Lenient.resolve(&raw), IdResolution::Coerced(42));
    /// ```
    #[must_use]
    pub fn resolve(self, raw: &RawId) -> IdResolution {
        let exact = raw
            .as_text()
            .and_then(|text| text.trim().parse::<i64>().ok());
        match (exact, self) {
            (Some(id), _) => IdResolution::Exact(id),
            (None, Self::Strict) => IdResolution::Invalid,
            (None, Self::Lenient) => {
                IdResolution::Coerced(raw.as_text().map_or(0, leading_integer))
            }
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }
}

impl fmt::Display for IdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IdPolicy {
    type Err = OptionParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            _ => Err(OptionParseError::IdPolicy(value.to_owned())),
        }
    }
}

/// Outcome of [`IdPolicy::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdResolution {
    /// The text was a well-formed integer.
    Exact(i64),
    /// The text was coerced under [`IdPolicy::Lenient`].
    Coerced(i64),
    /// The text was rejected under [`IdPolicy::Strict`].
    Invalid,
}

/// Errors from parsing option names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionParseError {
    /// Not `double` or `single`.
    #[error("unknown quote style {0:?} (expected \"double\" or \"single\")")]
    QuoteStyle(String),
    /// Not `strict` or `lenient`.
    #[error("unknown id policy {0:?} (expected \"strict\" or \"lenient\")")]
    IdPolicy(String),
}

/// Options controlling statement rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmitOptions {
    /// Literal delimiter.
    pub quote_style: QuoteStyle,
    /// Identifier strictness.
    pub id_policy: IdPolicy,
}

/// `atoi`: skip leading whitespace, accept one sign, read decimal digits
/// until the first non-digit. Saturates instead of overflowing.
fn leading_integer(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let magnitude = digits
        .chars()
        .map_while(|ch| ch.to_digit(10))
        .fold(0_i64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(i64::from(digit))
        });
    if negative {
        magnitude.saturating_neg()
    } else {
        magnitude
    }
}
