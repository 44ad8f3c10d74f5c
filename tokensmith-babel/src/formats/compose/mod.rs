//! Kotlin objects for Jetpack Compose
//!
//! Every token becomes a `val` of a single Kotlin object:
//!
//! ```kotlin
//! object Tokens {
//!   val colorBrand500 = Color(0xFF9E77ED)
//!   val radiusMd = 8.dp
//!   val textMd = 16.sp
//!   val shadowXs = "0px 1px 2px rgba(10, 13, 18, 0.05)"
//! }
//! ```
//!
//! Colors and px/rem sizes are converted, anything else is kept as a string literal. The
//! object name, package and the token types to include come from the file options, which
//! is how one token set is split into `AppDimensions`, `AppShadows` and so on.

use crate::common::naming::camel_name;
use crate::common::values::{format_number, Dimension, Rgba};
use crate::common::GENERATED_BANNER;
use crate::error::FormatError;
use crate::format::{Format, RenderContext};
use crate::formats::android::is_scaled;
use indexmap::IndexMap;
use tokensmith_core::{Token, TokenType};

pub struct ComposeObjectFormat;

impl Format for ComposeObjectFormat {
    fn name(&self) -> &str {
        "compose/object"
    }

    fn description(&self) -> &str {
        "Kotlin object of Compose values (Color, dp, sp)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["kt"]
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, FormatError> {
        let options = ctx.options;
        if !is_identifier(&options.object_name) {
            return Err(FormatError::Render {
                format: self.name().to_string(),
                message: format!("`{}` is not a valid object name", options.object_name),
            });
        }

        let mut members: IndexMap<String, String> = IndexMap::new();
        for token in ctx.filtered_tokens(|_| true) {
            let name = camel_name(token.path());
            let expr = kotlin_value(token, options.rem_base);
            if let Some(previous) = members.insert(name.clone(), expr) {
                tracing::warn!(
                    "{}: `{}` redefines `{name}` (was {previous})",
                    self.name(),
                    token.dotted_path()
                );
            }
        }

        let mut kotlin = format!("// {GENERATED_BANNER}\n\n");
        if !options.package.is_empty() {
            kotlin.push_str(&format!("package {}\n\n", options.package));
        }
        kotlin.push_str("import androidx.compose.ui.graphics.Color\n");
        kotlin.push_str("import androidx.compose.ui.unit.*\n\n");
        kotlin.push_str(&format!("object {} {{\n", options.object_name));
        for (name, expr) in &members {
            kotlin.push_str(&format!("  val {name} = {expr}\n"));
        }
        kotlin.push_str("}\n");
        Ok(kotlin)
    }
}

fn kotlin_value(token: &Token, rem_base: f64) -> String {
    let value = token.value();
    match token.token_type() {
        TokenType::Color => {
            if let Some(color) = Rgba::parse(value) {
                return format!("Color({})", color.to_argb_literal());
            }
        }
        TokenType::Dimension
        | TokenType::Spacing
        | TokenType::BorderRadius
        | TokenType::Breakpoint
        | TokenType::MaxWidth
        | TokenType::FontSize
        | TokenType::LineHeight
        | TokenType::LetterSpacing => {
            if let Some(dimension) = Dimension::parse(value) {
                let unit = if is_scaled(token.token_type()) {
                    "sp"
                } else {
                    "dp"
                };
                return format!("{}.{unit}", format_number(dimension.to_points(rem_base)));
            }
        }
        _ => {}
    }
    string_literal(value)
}

fn string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '\\' => literal.push_str("\\\\"),
            '"' => literal.push_str("\\\""),
            '$' => literal.push_str("\\$"),
            '\n' => literal.push_str("\\n"),
            _ => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatOptions;
    use tokensmith_core::{build, BuildOptions, TokenBuild, TokenRecord};

    fn sample() -> TokenBuild {
        build(
            vec![
                TokenRecord::new(["color", "brand", "500"], "color", "#9e77ed"),
                TokenRecord::new(["radius", "2xl"], "borderRadius", "1rem"),
                TokenRecord::new(["text", "display-2xl", "letterSpacing"], "letterSpacing", "-1.44px"),
                TokenRecord::new(["text", "display-2xl"], "fontSize", "calc(var(--spacing) * 18)"),
                TokenRecord::new(
                    ["font", "body"],
                    "fontFamily",
                    "var(--font-inter, \"Inter\"), sans-serif",
                ),
            ],
            &BuildOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_object() {
        let build = sample();
        let options = FormatOptions::default();
        let kotlin = ComposeObjectFormat
            .render(&RenderContext::new(&build, &options))
            .unwrap();
        insta::assert_snapshot!(kotlin, @r#"
        // Do not edit directly, this file was auto-generated.

        package com.example.designsystem.tokens

        import androidx.compose.ui.graphics.Color
        import androidx.compose.ui.unit.*

        object Tokens {
          val colorBrand500 = Color(0xFF9E77ED)
          val radius2xl = 16.dp
          val textDisplay2xlLetterSpacing = -1.44.sp
          val textDisplay2xl = "calc(var(--spacing) * 18)"
          val fontBody = "var(--font-inter, \"Inter\"), sans-serif"
        }
        "#);
    }

    #[test]
    fn test_object_name_and_types() {
        let build = sample();
        let options = FormatOptions {
            object_name: "AppDimensions".to_string(),
            types: vec!["borderRadius".to_string()],
            ..Default::default()
        };
        let kotlin = ComposeObjectFormat
            .render(&RenderContext::new(&build, &options))
            .unwrap();
        assert!(kotlin.contains("object AppDimensions {\n  val radius2xl = 16.dp\n}\n"));
        assert!(!kotlin.contains("colorBrand500"));
    }

    #[test]
    fn test_invalid_object_name() {
        let build = sample();
        let options = FormatOptions {
            object_name: "App Tokens".to_string(),
            ..Default::default()
        };
        let err = ComposeObjectFormat
            .render(&RenderContext::new(&build, &options))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "compose/object: `App Tokens` is not a valid object name"
        );
    }

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(string_literal(r#"a\b"c$d"#), r#""a\\b\"c\$d""#);
    }
}
