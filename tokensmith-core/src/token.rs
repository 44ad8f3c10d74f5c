//! Token model
//!
//! A [`Token`] is an atomic design value: a hierarchical name (its path), a type tag and a
//! resolved string value. Tokens are produced once from [`TokenRecord`]s and never change
//! afterwards, every field is read through accessors.

use crate::error::{TokenError, TokenLocation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

/// Type tag of a token.
///
/// Tags outside the known set are kept as [`TokenType::Unknown`] so new token types can be
/// added to sources without breaking builds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenType {
    Color,
    FontSize,
    FontFamily,
    LineHeight,
    LetterSpacing,
    BorderRadius,
    BoxShadow,
    Animation,
    Dimension,
    Spacing,
    Breakpoint,
    MaxWidth,
    Unknown(String),
}

impl TokenType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "color" => TokenType::Color,
            "fontSize" => TokenType::FontSize,
            "fontFamily" => TokenType::FontFamily,
            "lineHeight" => TokenType::LineHeight,
            "letterSpacing" => TokenType::LetterSpacing,
            "borderRadius" => TokenType::BorderRadius,
            "boxShadow" => TokenType::BoxShadow,
            "animation" => TokenType::Animation,
            "dimension" => TokenType::Dimension,
            "spacing" => TokenType::Spacing,
            "breakpoint" => TokenType::Breakpoint,
            "maxWidth" => TokenType::MaxWidth,
            other => TokenType::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TokenType::Color => "color",
            TokenType::FontSize => "fontSize",
            TokenType::FontFamily => "fontFamily",
            TokenType::LineHeight => "lineHeight",
            TokenType::LetterSpacing => "letterSpacing",
            TokenType::BorderRadius => "borderRadius",
            TokenType::BoxShadow => "boxShadow",
            TokenType::Animation => "animation",
            TokenType::Dimension => "dimension",
            TokenType::Spacing => "spacing",
            TokenType::Breakpoint => "breakpoint",
            TokenType::MaxWidth => "maxWidth",
            TokenType::Unknown(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TokenType::Unknown(_))
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for TokenType {
    fn from(tag: &str) -> Self {
        TokenType::from_tag(tag)
    }
}

/// A resolved design token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    path: Vec<String>,
    token_type: TokenType,
    value: String,
    location: TokenLocation,
}

impl Token {
    /// Builds a token directly, located at index 0 with no origin.
    ///
    /// Records coming from sources should go through [`Token::from_record`], which checks
    /// the path and type.
    pub fn new<I, S>(path: I, token_type: impl Into<TokenType>, value: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            token_type: token_type.into(),
            value: value.into(),
            location: TokenLocation::new(0, None),
        }
    }

    pub fn with_location(mut self, location: TokenLocation) -> Self {
        self.location = location;
        self
    }

    /// Validates a raw record found at `position` in the input sequence.
    pub fn from_record(position: usize, record: TokenRecord) -> Result<Self, TokenError> {
        let at = TokenLocation::new(position, record.origin);

        let path = match record.path {
            Some(path) if !path.is_empty() => path,
            _ => return Err(TokenError::MissingPath { at }),
        };
        let dotted = path.join(".");
        if path.iter().any(|segment| segment.is_empty()) {
            return Err(TokenError::EmptySegment { at, path: dotted });
        }

        let token_type = match record.token_type.as_deref() {
            Some(tag) if !tag.is_empty() => TokenType::from_tag(tag),
            _ => return Err(TokenError::MissingType { at, path: dotted }),
        };

        let value = match record.value {
            None | Some(Value::Null) => return Err(TokenError::MissingValue { at, path: dotted }),
            Some(value) => match value_to_string(value) {
                Ok(value) => value,
                Err(kind) => return Err(TokenError::UnsupportedValue { at, path: dotted, kind }),
            },
        };

        Ok(Self {
            path,
            token_type,
            value,
            location: at,
        })
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn token_type(&self) -> &TokenType {
        &self.token_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn location(&self) -> &TokenLocation {
        &self.location
    }

    pub fn position(&self) -> usize {
        self.location.position
    }

    /// Path segments joined with `sep`, e.g. `color-brand-500` for `-`.
    pub fn name(&self, sep: &str) -> String {
        self.path.join(sep)
    }

    pub fn dotted_path(&self) -> String {
        self.name(".")
    }
}

/// An unvalidated token as found in a source file or a flat feed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenRecord {
    #[serde(default)]
    pub path: Option<Vec<String>>,
    #[serde(default, rename = "type", alias = "$type")]
    pub token_type: Option<String>,
    #[serde(default, alias = "$value")]
    pub value: Option<Value>,
    #[serde(skip)]
    pub origin: Option<PathBuf>,
}

impl TokenRecord {
    pub fn new<I, S>(path: I, token_type: &str, value: impl Into<Value>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: Some(path.into_iter().map(Into::into).collect()),
            token_type: Some(token_type.to_string()),
            value: Some(value.into()),
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: impl Into<PathBuf>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

/// Strings pass through, numbers and booleans keep their JSON text, arrays of scalars
/// (font stacks) are joined with `", "`.
fn value_to_string(value: Value) -> Result<String, &'static str> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Array(items) => {
            let parts = items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    Value::Number(n) => Ok(n.to_string()),
                    Value::Bool(b) => Ok(b.to_string()),
                    _ => Err("array"),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(parts.join(", "))
        }
        Value::Object(_) => Err("object"),
        Value::Null => Err("null"),
    }
}
