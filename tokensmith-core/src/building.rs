//! Building category trees from tokens
//!
//!     records ──prepare_tokens──▶ tokens ──build_theme──▶ Theme + BuildReport
//!
//! Both steps are pure: the same input in the same order always yields the same tokens,
//! the same trees and the same report. Nothing is shared between builds.
//!
//! Strictness
//!
//!     Strict (default) aborts on the first malformed record, empty key or tree conflict.
//!     Lenient skips each of those with a warning and counts it in the report, so the
//!     outputs are produced from whatever could be placed.
//!
//! Collisions
//!
//!     Two tokens landing on the same leaf is a conflict under [`CollisionPolicy::Error`]
//!     (default). Under [`CollisionPolicy::Warn`] the later token wins and every overwrite
//!     is logged and counted.
//!
//! Tokens whose type tag is unknown, or whose type has no category rule, are left out of
//! every tree. They still reach renderers that work on the flat token list.

use crate::classify::{classify, key_for, Category};
use crate::error::{BuildError, KeyOwner, TokenError, TreeConflict};
use crate::token::{Token, TokenRecord, TokenType};
use crate::tree::{Inserted, OutputTree, Rejected};
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

pub use crate::tree::CollisionPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strictness {
    #[default]
    Strict,
    Lenient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildOptions {
    pub strictness: Strictness,
    pub collisions: CollisionPolicy,
}

/// Tokens that passed validation, plus the records a lenient run skipped.
#[derive(Debug, Clone, Default)]
pub struct Prepared {
    pub tokens: Vec<Token>,
    pub rejected: Vec<TokenError>,
}

/// Validates raw records in order.
pub fn prepare_tokens<I>(records: I, strictness: Strictness) -> Result<Prepared, TokenError>
where
    I: IntoIterator<Item = TokenRecord>,
{
    let mut prepared = Prepared::default();
    for (position, record) in records.into_iter().enumerate() {
        match Token::from_record(position, record) {
            Ok(token) => prepared.tokens.push(token),
            Err(err) if strictness == Strictness::Lenient => {
                tracing::warn!("skipping malformed {err}");
                prepared.rejected.push(err);
            }
            Err(err) => return Err(err),
        }
    }
    Ok(prepared)
}

/// The category trees of one build, always all ten in [`Category::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    trees: IndexMap<Category, OutputTree>,
}

impl Theme {
    pub fn new() -> Self {
        Self {
            trees: Category::ALL
                .into_iter()
                .map(|category| (category, OutputTree::new()))
                .collect(),
        }
    }

    pub fn tree(&self, category: Category) -> &OutputTree {
        // every category is present from construction
        &self.trees[&category]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &OutputTree)> {
        self.trees.iter().map(|(category, tree)| (*category, tree))
    }

    fn take(&mut self, category: Category) -> OutputTree {
        self.trees
            .get_mut(&category)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    fn put(&mut self, category: Category, tree: OutputTree) {
        self.trees.insert(category, tree);
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for Theme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.trees.len()))?;
        for (category, tree) in &self.trees {
            map.serialize_entry(category.key(), tree)?;
        }
        map.end()
    }
}

/// Counts of what happened to every token of a build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Records seen, including skipped ones.
    pub total: usize,
    pub placed: BTreeMap<Category, usize>,
    /// Known type, but no category rule matched.
    pub ignored: usize,
    /// Tokens with an unrecognised type tag, per tag.
    pub unknown_types: BTreeMap<String, usize>,
    /// Records or tokens a lenient build left out.
    pub skipped: usize,
    /// Leaves replaced under [`CollisionPolicy::Warn`].
    pub overwritten: usize,
}

impl BuildReport {
    pub fn placed_total(&self) -> usize {
        self.placed.values().sum()
    }

    pub fn unknown_total(&self) -> usize {
        self.unknown_types.values().sum()
    }
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tokens:      {}", self.total)?;
        writeln!(f, "placed:      {}", self.placed_total())?;
        for category in Category::ALL {
            if let Some(count) = self.placed.get(&category) {
                writeln!(f, "  {:<14}{}", category.key(), count)?;
            }
        }
        writeln!(f, "ignored:     {}", self.ignored)?;
        writeln!(f, "unknown:     {}", self.unknown_total())?;
        for (tag, count) in &self.unknown_types {
            writeln!(f, "  {tag:<14}{count}")?;
        }
        writeln!(f, "skipped:     {}", self.skipped)?;
        write!(f, "overwritten: {}", self.overwritten)
    }
}

/// First token to create each node of every tree, so conflicts can name who holds a key.
#[derive(Default)]
struct KeyOwners {
    owners: HashMap<(Category, Vec<String>), KeyOwner>,
}

impl KeyOwners {
    fn record(&mut self, category: Category, key: &[String], token: &Token, replaced: bool) {
        for len in 1..=key.len() {
            let owner = KeyOwner {
                at: token.location().clone(),
                path: token.dotted_path(),
            };
            let slot = (category, key[..len].to_vec());
            if replaced && len == key.len() {
                self.owners.insert(slot, owner);
            } else {
                self.owners.entry(slot).or_insert(owner);
            }
        }
    }

    fn holder(&self, category: Category, key: &[String], conflict: &TreeConflict) -> Option<KeyOwner> {
        let held = match conflict {
            TreeConflict::EmptyKey => return None,
            TreeConflict::DuplicateLeaf { key: held, .. }
            | TreeConflict::BranchOverLeaf { key: held }
            | TreeConflict::LeafOverBranch { key: held } => held,
        };
        (1..=key.len())
            .map(|len| &key[..len])
            .find(|prefix| prefix.join(".") == *held)
            .and_then(|prefix| self.owners.get(&(category, prefix.to_vec())))
            .cloned()
    }
}

/// Classifies every token and inserts it into its category tree.
pub fn build_theme(
    tokens: &[Token],
    options: &BuildOptions,
) -> Result<(Theme, BuildReport), BuildError> {
    let mut theme = Theme::new();
    let mut report = BuildReport {
        total: tokens.len(),
        ..Default::default()
    };
    let mut owners = KeyOwners::default();

    for token in tokens {
        let Some(category) = classify(token) else {
            match token.token_type() {
                TokenType::Unknown(tag) => {
                    tracing::debug!(
                        position = token.position(),
                        path = %token.dotted_path(),
                        "unknown token type `{tag}`"
                    );
                    *report.unknown_types.entry(tag.clone()).or_default() += 1;
                }
                _ => {
                    tracing::debug!(
                        position = token.position(),
                        path = %token.dotted_path(),
                        "no category for {} token",
                        token.token_type()
                    );
                    report.ignored += 1;
                }
            }
            continue;
        };

        let (conflict, owner) = match key_for(category, token) {
            Ok(key) => {
                let tree = theme.take(category);
                match tree.insert_nested(&key, token.value(), options.collisions) {
                    Ok(Inserted { tree, replaced }) => {
                        theme.put(category, tree);
                        owners.record(category, &key, token, replaced.is_some());
                        if let Some(previous) = replaced {
                            tracing::warn!(
                                "{category}.{} overwritten by `{}` (was `{previous}`)",
                                key.join("."),
                                token.dotted_path()
                            );
                            report.overwritten += 1;
                        }
                        *report.placed.entry(category).or_default() += 1;
                        continue;
                    }
                    Err(Rejected { tree, conflict }) => {
                        theme.put(category, tree);
                        let owner = owners.holder(category, &key, &conflict);
                        (conflict, owner)
                    }
                }
            }
            Err(conflict) => (conflict, None),
        };

        let err = BuildError::Conflict {
            at: token.location().clone(),
            path: token.dotted_path(),
            category,
            conflict,
            owner,
        };
        if options.strictness == Strictness::Lenient {
            tracing::warn!("skipping {err}");
            report.skipped += 1;
        } else {
            return Err(err);
        }
    }

    for (tag, count) in &report.unknown_types {
        tracing::warn!("{count} token(s) with unknown type `{tag}` left out of every category");
    }
    tracing::info!(
        placed = report.placed_total(),
        ignored = report.ignored,
        unknown = report.unknown_total(),
        skipped = report.skipped,
        "built theme from {} tokens",
        report.total
    );

    Ok((theme, report))
}

/// Everything a renderer needs: the flat token list in input order and the theme.
#[derive(Debug, Clone)]
pub struct TokenBuild {
    pub tokens: Vec<Token>,
    pub theme: Theme,
    pub report: BuildReport,
}

/// Runs [`prepare_tokens`] then [`build_theme`].
pub fn build<I>(records: I, options: &BuildOptions) -> Result<TokenBuild, BuildError>
where
    I: IntoIterator<Item = TokenRecord>,
{
    let prepared = prepare_tokens(records, options.strictness)?;
    let (theme, mut report) = build_theme(&prepared.tokens, options)?;
    report.total += prepared.rejected.len();
    report.skipped += prepared.rejected.len();

    Ok(TokenBuild {
        tokens: prepared.tokens,
        theme,
        report,
    })
}
