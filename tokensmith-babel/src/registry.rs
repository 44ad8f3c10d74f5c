//! Format registry for format discovery and selection
//!
//! A registry is an ordinary value: build one, register formats on it and hand it to
//! whatever renders. Two registries never share state, so a test or an embedding tool can
//! add or replace formats without affecting anyone else.

use crate::error::FormatError;
use crate::format::{Format, RenderContext};
use std::collections::HashMap;

/// Registry of output formats
///
/// # Examples
///
/// ```ignore
/// let mut registry = FormatRegistry::with_defaults();
/// registry.register_fn("text/count", "Token count", |ctx| Ok(format!("{}\n", ctx.tokens.len())));
///
/// let css = registry.render("css/variables", &ctx)?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Register a plain function or closure as a format
    pub fn register_fn<F>(&mut self, name: &str, description: &str, render: F)
    where
        F: Fn(&RenderContext<'_>) -> Result<String, FormatError> + Send + Sync + 'static,
    {
        self.register(FnFormat {
            name: name.to_string(),
            description: description.to_string(),
            render,
        });
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Render using the specified format
    pub fn render(&self, format: &str, ctx: &RenderContext<'_>) -> Result<String, FormatError> {
        self.get(format)?.render(ctx)
    }

    /// Create a registry with the built-in formats
    pub fn with_defaults() -> Self {
        use crate::formats::*;

        let mut registry = Self::new();
        registry.register(CssVariablesFormat);
        registry.register(TailwindPresetFormat);
        registry.register(JsonNestedFormat);
        registry.register(JsonFlatFormat);
        registry.register(AndroidColorsFormat);
        registry.register(AndroidDimensFormat);
        registry.register(ComposeObjectFormat);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

struct FnFormat<F> {
    name: String,
    description: String,
    render: F,
}

impl<F> Format for FnFormat<F>
where
    F: Fn(&RenderContext<'_>) -> Result<String, FormatError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, FormatError> {
        (self.render)(ctx)
    }
}
