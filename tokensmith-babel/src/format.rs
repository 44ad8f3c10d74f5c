//! Format trait definition
//!
//! Every renderer implements [`Format`]. A format gets a [`RenderContext`] holding the flat
//! token list, the theme built from it and the options of the file being rendered, and
//! returns the complete text of the artifact.

use crate::error::FormatError;
use serde::{Deserialize, Serialize};
use tokensmith_core::{Theme, Token, TokenBuild, TokenType};

/// Trait for output formats
///
/// # Examples
///
/// ```ignore
/// struct Count;
///
/// impl Format for Count {
///     fn name(&self) -> &str {
///         "text/count"
///     }
///
///     fn render(&self, ctx: &RenderContext<'_>) -> Result<String, FormatError> {
///         Ok(format!("{}\n", ctx.tokens.len()))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "css/variables", "tailwind/preset")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions artifacts of this format usually carry
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Render the artifact text
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, FormatError>;
}

/// Per-file knobs. Formats read the fields that concern them and ignore the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Selector wrapping CSS declarations
    pub selector: String,
    /// Kotlin object name for compose output
    pub object_name: String,
    /// Kotlin package for compose output
    pub package: String,
    /// Token type tags to include. Empty means the format's own default set.
    pub types: Vec<String>,
    /// Pixels per rem when converting dimensions for native platforms
    pub rem_base: f64,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            selector: ":root".to_string(),
            object_name: "Tokens".to_string(),
            package: "com.example.designsystem.tokens".to_string(),
            types: Vec::new(),
            rem_base: 16.0,
        }
    }
}

impl FormatOptions {
    /// Whether `token_type` passes the `types` filter, falling back to `default` when the
    /// filter is empty.
    pub fn includes(&self, token_type: &TokenType, default: impl Fn(&TokenType) -> bool) -> bool {
        if self.types.is_empty() {
            default(token_type)
        } else {
            self.types.iter().any(|tag| tag == token_type.as_str())
        }
    }
}

/// Everything a format may read while rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Tokens in input order
    pub tokens: &'a [Token],
    pub theme: &'a Theme,
    pub options: &'a FormatOptions,
}

impl<'a> RenderContext<'a> {
    pub fn new(build: &'a TokenBuild, options: &'a FormatOptions) -> Self {
        Self {
            tokens: &build.tokens,
            theme: &build.theme,
            options,
        }
    }

    /// Tokens passing the `types` filter, in input order.
    pub fn filtered_tokens(
        &self,
        default: impl Fn(&TokenType) -> bool + Copy + 'a,
    ) -> impl Iterator<Item = &'a Token> + '_ {
        self.tokens
            .iter()
            .filter(move |token| self.options.includes(token.token_type(), default))
    }
}
