//! CSS custom properties
//!
//! Emits one declaration per token, in input order, inside a single selector block:
//!
//! ```text
//! :root {
//!   --color-gray-50: #f7f7f7;
//!   --spacing-max-container: 1280px;
//! }
//! ```
//!
//! Names are the full token path joined with `-`. Values are written as they appear in the
//! sources. Tokens of every type are included, unknown ones too, unless the file's `types`
//! option narrows the set.

use crate::common::naming::kebab_name;
use crate::error::FormatError;
use crate::format::{Format, RenderContext};

pub struct CssVariablesFormat;

impl Format for CssVariablesFormat {
    fn name(&self) -> &str {
        "css/variables"
    }

    fn description(&self) -> &str {
        "CSS custom properties in a single :root block"
    }

    fn file_extensions(&self) -> &[&str] {
        &["css"]
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, FormatError> {
        let mut css = format!("{} {{\n", ctx.options.selector);
        for token in ctx.filtered_tokens(|_| true) {
            css.push_str(&format!(
                "  --{}: {};\n",
                kebab_name(token.path()),
                token.value()
            ));
        }
        css.push_str("}\n");
        Ok(css)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatOptions;
    use tokensmith_core::{build, BuildOptions, TokenRecord};

    fn render(records: Vec<TokenRecord>, options: &FormatOptions) -> String {
        let build = build(records, &BuildOptions::default()).unwrap();
        CssVariablesFormat
            .render(&RenderContext::new(&build, options))
            .unwrap()
    }

    #[test]
    fn test_declarations_follow_input_order() {
        let css = render(
            vec![
                TokenRecord::new(["color", "gray", "50"], "color", "#f7f7f7"),
                TokenRecord::new(["spacing", "max", "container"], "spacing", "1280px"),
            ],
            &FormatOptions::default(),
        );
        assert_eq!(
            css,
            ":root {\n  --color-gray-50: #f7f7f7;\n  --spacing-max-container: 1280px;\n}\n"
        );
    }

    #[test]
    fn test_unknown_types_are_included() {
        let css = render(
            vec![TokenRecord::new(["opacity", "50"], "opacity", 0.5)],
            &FormatOptions::default(),
        );
        assert!(css.contains("  --opacity-50: 0.5;\n"));
    }

    #[test]
    fn test_selector_and_types_options() {
        let options = FormatOptions {
            selector: "[data-theme=\"dark\"]".to_string(),
            types: vec!["color".to_string()],
            ..Default::default()
        };
        let css = render(
            vec![
                TokenRecord::new(["color", "bg"], "color", "#0c0e12"),
                TokenRecord::new(["radius", "md"], "borderRadius", "8px"),
            ],
            &options,
        );
        insta::assert_snapshot!(css, @r#"
        [data-theme="dark"] {
          --color-bg: #0c0e12;
        }
        "#);
    }

    #[test]
    fn test_empty_build_renders_empty_block() {
        assert_eq!(render(Vec::new(), &FormatOptions::default()), ":root {\n}\n");
    }
}
