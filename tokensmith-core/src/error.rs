//! Error types for loading, validating and building tokens

use crate::classify::Category;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Where a token record sits in the input sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenLocation {
    /// 0-based index in the record sequence handed to the builder
    pub position: usize,
    /// Source file the record was read from, when known
    pub origin: Option<PathBuf>,
}

impl TokenLocation {
    pub fn new(position: usize, origin: Option<PathBuf>) -> Self {
        Self { position, origin }
    }
}

impl fmt::Display for TokenLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "token at index {}", self.position)?;
        if let Some(origin) = &self.origin {
            write!(f, " ({})", origin.display())?;
        }
        Ok(())
    }
}

/// A raw record that cannot become a [`Token`](crate::Token).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("{at}: missing path")]
    MissingPath { at: TokenLocation },

    #[error("{at}: path `{path}` contains an empty segment")]
    EmptySegment { at: TokenLocation, path: String },

    #[error("{at}: `{path}` has no type")]
    MissingType { at: TokenLocation, path: String },

    #[error("{at}: `{path}` has no value")]
    MissingValue { at: TokenLocation, path: String },

    #[error("{at}: `{path}` has an unsupported {kind} value")]
    UnsupportedValue {
        at: TokenLocation,
        path: String,
        kind: &'static str,
    },
}

impl TokenError {
    pub fn location(&self) -> &TokenLocation {
        match self {
            TokenError::MissingPath { at }
            | TokenError::EmptySegment { at, .. }
            | TokenError::MissingType { at, .. }
            | TokenError::MissingValue { at, .. }
            | TokenError::UnsupportedValue { at, .. } => at,
        }
    }
}

/// Why a key path cannot be inserted into an [`OutputTree`](crate::OutputTree).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeConflict {
    #[error("the token maps to an empty key")]
    EmptyKey,

    #[error("`{key}` is already set to `{existing}`")]
    DuplicateLeaf { key: String, existing: String },

    #[error("`{key}` holds a value and cannot also be a group")]
    BranchOverLeaf { key: String },

    #[error("`{key}` is a group and cannot also hold a value")]
    LeafOverBranch { key: String },
}

/// The token already holding a contested key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOwner {
    pub at: TokenLocation,
    pub path: String,
}

impl fmt::Display for KeyOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`, {}", self.path, self.at)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("{at} (`{path}`) cannot be placed in {category}: {conflict}{}", owned_by(.owner))]
    Conflict {
        at: TokenLocation,
        path: String,
        category: Category,
        conflict: TreeConflict,
        /// Earlier token the conflicting key belongs to; `None` for empty keys
        owner: Option<KeyOwner>,
    },
}

fn owned_by(owner: &Option<KeyOwner>) -> String {
    owner
        .as_ref()
        .map(|owner| format!(" (owned by {owner})"))
        .unwrap_or_default()
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid source pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("{}: unsupported token source, expected .json, .yaml or .yml", path.display())]
    UnsupportedExtension { path: PathBuf },

    #[error("{}: the top level of a token source must be an object", path.display())]
    NotAnObject { path: PathBuf },

    #[error("no token sources matched {}", patterns.join(", "))]
    NoSources { patterns: Vec<String> },

    #[error("invalid token feed: {0}")]
    Feed(#[source] serde_json::Error),
}
