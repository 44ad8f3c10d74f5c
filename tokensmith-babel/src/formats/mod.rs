//! Format implementations
//!
//! Each submodule renders a [`TokenBuild`](tokensmith_core::TokenBuild) into one kind of
//! platform artifact. Web formats pass values through untouched, native formats convert
//! colors and dimensions into what Android and Compose expect.

pub mod android;
pub mod compose;
pub mod css;
pub mod json;
pub mod tailwind;

pub use android::{AndroidColorsFormat, AndroidDimensFormat};
pub use compose::ComposeObjectFormat;
pub use css::CssVariablesFormat;
pub use json::{JsonFlatFormat, JsonNestedFormat};
pub use tailwind::TailwindPresetFormat;
