//! Android XML resources
//!
//! `android/colors` writes every `color` token as `#aarrggbb`, `android/dimens` writes size
//! tokens in `dp`, or `sp` for typography sizes:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <!-- Do not edit directly, this file was auto-generated. -->
//! <resources>
//!   <color name="color_brand_500">#ff9e77ed</color>
//!   <dimen name="radius_md">8dp</dimen>
//! </resources>
//! ```
//!
//! Resource names are the token path joined with `_` and reduced to `[a-z0-9_]`. Two paths
//! reducing to the same name share one entry: it keeps the first position and the later
//! value, with a warning. Values that cannot be expressed as a resource (`calc()`, `var()`,
//! percentages) are skipped with a warning; the file is still written.

use crate::common::naming::android_name;
use crate::common::values::{format_number, Dimension, Rgba};
use crate::common::GENERATED_BANNER;
use crate::error::FormatError;
use crate::format::{Format, RenderContext};
use indexmap::IndexMap;
use tokensmith_core::{Token, TokenType};

fn is_color(token_type: &TokenType) -> bool {
    *token_type == TokenType::Color
}

fn is_dimension(token_type: &TokenType) -> bool {
    matches!(
        token_type,
        TokenType::Dimension
            | TokenType::Spacing
            | TokenType::BorderRadius
            | TokenType::Breakpoint
            | TokenType::MaxWidth
            | TokenType::FontSize
            | TokenType::LineHeight
            | TokenType::LetterSpacing
    )
}

/// Whether sizes of this type scale with the user's font size.
pub(crate) fn is_scaled(token_type: &TokenType) -> bool {
    matches!(
        token_type,
        TokenType::FontSize | TokenType::LineHeight | TokenType::LetterSpacing
    )
}

struct Resources<'f> {
    format: &'f str,
    kind: &'static str,
    entries: IndexMap<String, String>,
}

impl<'f> Resources<'f> {
    fn new(format: &'f str, kind: &'static str) -> Self {
        Self {
            format,
            kind,
            entries: IndexMap::new(),
        }
    }

    fn push(&mut self, token: &Token, value: String) {
        let name = android_name(token.path());
        if let Some(previous) = self.entries.insert(name.clone(), value) {
            tracing::warn!(
                "{}: `{}` redefines `{name}` (was {previous})",
                self.format,
                token.dotted_path()
            );
        }
    }

    fn finish(self) -> String {
        let kind = self.kind;
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        xml.push_str(&format!("<!-- {GENERATED_BANNER} -->\n"));
        xml.push_str("<resources>\n");
        for (name, value) in &self.entries {
            xml.push_str(&format!(
                "  <{kind} name=\"{}\">{}</{kind}>\n",
                escape_xml(name),
                escape_xml(value)
            ));
        }
        xml.push_str("</resources>\n");
        xml
    }
}

fn skip(format: &str, token: &Token, what: &str) {
    tracing::warn!(
        position = token.position(),
        "{format}: skipping `{}`, `{}` is not a {what}",
        token.dotted_path(),
        token.value()
    );
}

pub struct AndroidColorsFormat;

impl Format for AndroidColorsFormat {
    fn name(&self) -> &str {
        "android/colors"
    }

    fn description(&self) -> &str {
        "Android color resources (#aarrggbb)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["xml"]
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, FormatError> {
        let mut resources = Resources::new(self.name(), "color");
        for token in ctx.filtered_tokens(is_color) {
            match Rgba::parse(token.value()) {
                Some(color) => resources.push(token, color.to_android_hex()),
                None => skip(self.name(), token, "color"),
            }
        }
        Ok(resources.finish())
    }
}

pub struct AndroidDimensFormat;

impl Format for AndroidDimensFormat {
    fn name(&self) -> &str {
        "android/dimens"
    }

    fn description(&self) -> &str {
        "Android dimension resources (dp, sp for type sizes)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["xml"]
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, FormatError> {
        let mut resources = Resources::new(self.name(), "dimen");
        for token in ctx.filtered_tokens(is_dimension) {
            match Dimension::parse(token.value()) {
                Some(dimension) => {
                    let unit = if is_scaled(token.token_type()) {
                        "sp"
                    } else {
                        "dp"
                    };
                    let amount = format_number(dimension.to_points(ctx.options.rem_base));
                    resources.push(token, format!("{amount}{unit}"));
                }
                None => skip(self.name(), token, "px or rem dimension"),
            }
        }
        Ok(resources.finish())
    }
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
