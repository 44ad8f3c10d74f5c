//! Core of the tokensmith design-token pipeline
//!
//!     This crate turns token definitions into the nested, per-category trees that the
//!     renderers in `tokensmith-babel` serialize. It is a pure lib: it reads source files
//!     when asked to through [`loader`], but never prints, never inspects env vars and never
//!     writes outputs.
//!
//! Pipeline
//!
//!     source files ──loader──▶ TokenRecord* ──prepare──▶ Token* ──build_theme──▶ Theme
//!
//!     - loader: expands glob patterns, flattens nested token groups into ordered records.
//!     - prepare: validates records into immutable tokens (strict or lenient).
//!     - build_theme: classifies each token into a [`Category`] and inserts it at its
//!       category-relative key into that category's [`OutputTree`].
//!
//!     The flat token list survives next to the theme, since some outputs (CSS variables,
//!     flat JSON) iterate tokens in input order instead of walking trees.
//!
//! The file structure:
//!     .
//!     ├── error.rs        # TokenError, TreeConflict, BuildError, LoadError
//!     ├── token.rs        # Token, TokenType, TokenRecord
//!     ├── loader.rs       # glob expansion, JSON/YAML flattening, flat feeds
//!     ├── classify.rs     # Category and the classification rules
//!     ├── tree.rs         # OutputTree and insert-at-path
//!     └── building.rs     # prepare_tokens, build_theme, Theme, BuildReport

pub mod building;
pub mod classify;
pub mod error;
pub mod loader;
pub mod token;
pub mod tree;

pub use building::{
    build, build_theme, prepare_tokens, BuildOptions, BuildReport, CollisionPolicy, Prepared,
    Strictness, Theme, TokenBuild,
};
pub use classify::{classify, key_for, Category};
pub use error::{BuildError, KeyOwner, LoadError, TokenError, TokenLocation, TreeConflict};
pub use loader::{load_flat_feed, TokenLoader};
pub use token::{Token, TokenRecord, TokenType};
pub use tree::{Node, OutputTree};
