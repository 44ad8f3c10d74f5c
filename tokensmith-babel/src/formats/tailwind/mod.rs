//! Tailwind CSS preset
//!
//! Serializes the theme under `theme.extend` as a CommonJS module:
//!
//! ```text
//! /** @type {import('tailwindcss').Config} */
//! module.exports = {
//!   "theme": {
//!     "extend": {
//!       "colors": { ... },
//!       ...
//!       "spacing": { ... }
//!     }
//!   }
//! };
//! ```
//!
//! All ten categories are always present, empty ones as `{}`, in a fixed order.

use crate::error::FormatError;
use crate::format::{Format, RenderContext};
use serde::Serialize;
use tokensmith_core::Theme;

const TYPE_ANNOTATION: &str = "/** @type {import('tailwindcss').Config} */";

#[derive(Serialize)]
struct Preset<'a> {
    theme: Extend<'a>,
}

#[derive(Serialize)]
struct Extend<'a> {
    extend: &'a Theme,
}

pub struct TailwindPresetFormat;

impl Format for TailwindPresetFormat {
    fn name(&self) -> &str {
        "tailwind/preset"
    }

    fn description(&self) -> &str {
        "Tailwind CSS preset exporting the theme under theme.extend"
    }

    fn file_extensions(&self) -> &[&str] {
        &["js", "cjs"]
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, FormatError> {
        let preset = Preset {
            theme: Extend { extend: ctx.theme },
        };
        let body = serde_json::to_string_pretty(&preset).map_err(|source| FormatError::Json {
            format: self.name().to_string(),
            source,
        })?;
        Ok(format!("{TYPE_ANNOTATION}\nmodule.exports = {body};\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatOptions;
    use tokensmith_core::{build, BuildOptions, TokenRecord};

    #[test]
    fn test_preset_wraps_theme() {
        let build = build(
            vec![
                TokenRecord::new(["color", "brand", "500"], "color", "#9e77ed"),
                TokenRecord::new(["fontSize", "display", "2xl"], "fontSize", "4.5rem"),
                TokenRecord::new(["breakpoint", "md"], "dimension", "768px"),
            ],
            &BuildOptions::default(),
        )
        .unwrap();
        let options = FormatOptions::default();
        let preset = TailwindPresetFormat
            .render(&RenderContext::new(&build, &options))
            .unwrap();

        assert!(preset.starts_with("/** @type {import('tailwindcss').Config} */\nmodule.exports = {\n"));
        assert!(preset.ends_with("};\n"));
        insta::assert_snapshot!(preset, @r##"
        /** @type {import('tailwindcss').Config} */
        module.exports = {
          "theme": {
            "extend": {
              "colors": {
                "brand": {
                  "500": "#9e77ed"
                }
              },
              "fontFamily": {},
              "fontSize": {
                "display-2xl": "4.5rem"
              },
              "lineHeight": {},
              "letterSpacing": {},
              "borderRadius": {},
              "boxShadow": {},
              "animation": {},
              "screens": {
                "md": "768px"
              },
              "spacing": {}
            }
          }
        };
        "##);
    }
}
