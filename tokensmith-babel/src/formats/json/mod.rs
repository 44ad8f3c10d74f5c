//! JSON outputs
//!
//! - `json/nested`: the theme as a plain object, category trees included as built.
//! - `json/flat`: `{ "<path-joined-by-dashes>": "<value>" }` in input order. When two tokens
//!   end up with the same name the later value wins but keeps the first one's position.

use crate::common::naming::kebab_name;
use crate::error::FormatError;
use crate::format::{Format, RenderContext};
use serde::Serialize;
use serde_json::{Map, Value};

fn to_json(format: &dyn Format, value: &impl Serialize) -> Result<String, FormatError> {
    serde_json::to_string_pretty(value)
        .map(|mut json| {
            json.push('\n');
            json
        })
        .map_err(|source| FormatError::Json {
            format: format.name().to_string(),
            source,
        })
}

pub struct JsonNestedFormat;

impl Format for JsonNestedFormat {
    fn name(&self) -> &str {
        "json/nested"
    }

    fn description(&self) -> &str {
        "Theme category trees as a JSON object"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, FormatError> {
        to_json(self, ctx.theme)
    }
}

pub struct JsonFlatFormat;

impl Format for JsonFlatFormat {
    fn name(&self) -> &str {
        "json/flat"
    }

    fn description(&self) -> &str {
        "Flat JSON object of dash-joined token names"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, FormatError> {
        let mut flat = Map::new();
        for token in ctx.filtered_tokens(|_| true) {
            flat.insert(
                kebab_name(token.path()),
                Value::String(token.value().to_string()),
            );
        }
        to_json(self, &flat)
    }
}
