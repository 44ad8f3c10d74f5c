//! Helpers shared by several formats

pub mod naming;
pub mod values;

/// Banner placed at the top of generated native sources.
pub const GENERATED_BANNER: &str = "Do not edit directly, this file was auto-generated.";
