//! Output formats for tokensmith
//!
//!     This crate renders a [`TokenBuild`](tokensmith_core::TokenBuild) into the text of
//!     platform artifacts: CSS custom properties, a Tailwind preset, JSON, Android XML
//!     resources and Kotlin objects for Jetpack Compose.
//!
//! Architecture
//!
//!     - Format trait: uniform interface for every renderer, see [./format.rs]
//!     - FormatRegistry: name → format mapping. There is no global registry; callers build
//!       one (usually [`FormatRegistry::with_defaults`]) and pass it to
//!       [`publish::render_platforms`], which is how custom formats are plugged in.
//!     - publish: renders the configured platform files and writes them to disk.
//!
//!     This is a pure lib, it powers tokensmith-cli but is shell agnostic: nothing here
//!     prints, reads env vars or decides where outputs go.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait, RenderContext, FormatOptions
//!     ├── registry.rs             # FormatRegistry
//!     ├── publish.rs              # platform rendering and artifact writing
//!     ├── common
//!     │   ├── naming.rs           # kebab / snake / camel names from token paths
//!     │   └── values.rs           # color and dimension parsing
//!     ├── formats
//!     │   ├── css                 # css/variables
//!     │   ├── tailwind            # tailwind/preset
//!     │   ├── json                # json/nested, json/flat
//!     │   ├── android             # android/colors, android/dimens
//!     │   └── compose             # compose/object
//!     ├── lib.rs
//!
//! Two kinds of renderers
//!
//!     Flat renderers (CSS, json/flat, Android, Compose) walk the token list in input order
//!     and name each token from its full path. Nested renderers (Tailwind, json/nested)
//!     serialize the category trees of the theme. Both receive the same [`RenderContext`].

pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod publish;
pub mod registry;

pub use error::FormatError;
pub use format::{Format, FormatOptions, RenderContext};
pub use publish::{render_platforms, write_artifacts, Artifact, FileSpec, PlatformSpec};
pub use registry::FormatRegistry;
