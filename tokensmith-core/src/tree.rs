//! Nested output trees
//!
//! An [`OutputTree`] maps string keys to either a leaf value or another level of nesting.
//! Keys keep the position of their first insertion, so a tree built from an ordered token
//! list serializes in that same order.
//!
//! Insertion works on an owned tree and hands it back. A rejected insertion returns the
//! untouched tree inside [`Rejected`], which lets a lenient build skip the token and keep
//! going with everything inserted so far.
//!
//! # Conflicts
//!
//! - a key path that runs through an existing leaf (`brand` is a value, `brand.500` asked
//!   for a group): [`TreeConflict::BranchOverLeaf`]
//! - a key path that ends on an existing group: [`TreeConflict::LeafOverBranch`]
//! - a key path that ends on an existing leaf: [`TreeConflict::DuplicateLeaf`], unless the
//!   [`CollisionPolicy`] allows overwriting
//!
//! Shape conflicts are never overwritten.

use crate::error::TreeConflict;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// What to do when two tokens map to the same leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Reject the later token.
    #[default]
    Error,
    /// Keep the later token's value (last token wins); the caller is told what was replaced.
    Warn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Leaf(String),
    Branch(IndexMap<String, Node>),
}

impl Node {
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&IndexMap<String, Node>> {
        match self {
            Node::Leaf(_) => None,
            Node::Branch(children) => Some(children),
        }
    }
}

/// Root level of a nested tree. The root is always a group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct OutputTree {
    root: IndexMap<String, Node>,
}

/// A successful insertion.
#[derive(Debug)]
pub struct Inserted {
    pub tree: OutputTree,
    /// Previous leaf value, when a collision was overwritten.
    pub replaced: Option<String>,
}

/// A refused insertion. `tree` is unchanged.
#[derive(Debug)]
pub struct Rejected {
    pub tree: OutputTree,
    pub conflict: TreeConflict,
}

impl OutputTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Node> {
        self.root.iter()
    }

    pub fn get(&self, key_path: &[&str]) -> Option<&Node> {
        let (first, rest) = key_path.split_first()?;
        let mut node = self.root.get(*first)?;
        for segment in rest {
            node = node.as_branch()?.get(*segment)?;
        }
        Some(node)
    }

    pub fn leaf(&self, key_path: &[&str]) -> Option<&str> {
        self.get(key_path).and_then(Node::as_leaf)
    }

    /// Sets `value` at `key_path`, creating intermediate groups as needed.
    pub fn insert_nested(
        self,
        key_path: &[String],
        value: impl Into<String>,
        policy: CollisionPolicy,
    ) -> Result<Inserted, Rejected> {
        let replaced = match self.check(key_path, policy) {
            Ok(replaced) => replaced,
            Err(conflict) => {
                return Err(Rejected {
                    tree: self,
                    conflict,
                })
            }
        };

        let root = insert_at(self.root, key_path, value.into());
        Ok(Inserted {
            tree: OutputTree { root },
            replaced,
        })
    }

    /// Walks `key_path` without touching the tree and reports what an insertion would do.
    fn check(
        &self,
        key_path: &[String],
        policy: CollisionPolicy,
    ) -> Result<Option<String>, TreeConflict> {
        let (last, parents) = key_path.split_last().ok_or(TreeConflict::EmptyKey)?;

        let mut level = &self.root;
        for (depth, segment) in parents.iter().enumerate() {
            match level.get(segment) {
                None => return Ok(None),
                Some(Node::Branch(children)) => level = children,
                Some(Node::Leaf(_)) => {
                    return Err(TreeConflict::BranchOverLeaf {
                        key: key_path[..=depth].join("."),
                    })
                }
            }
        }

        match level.get(last) {
            None => Ok(None),
            Some(Node::Branch(_)) => Err(TreeConflict::LeafOverBranch {
                key: key_path.join("."),
            }),
            Some(Node::Leaf(existing)) => match policy {
                CollisionPolicy::Error => Err(TreeConflict::DuplicateLeaf {
                    key: key_path.join("."),
                    existing: existing.clone(),
                }),
                CollisionPolicy::Warn => Ok(Some(existing.clone())),
            },
        }
    }
}

fn insert_at(
    mut level: IndexMap<String, Node>,
    key_path: &[String],
    value: String,
) -> IndexMap<String, Node> {
    match key_path {
        [] => level,
        [last] => {
            level.insert(last.clone(), Node::Leaf(value));
            level
        }
        [head, rest @ ..] => {
            let children = match level.get_mut(head) {
                Some(Node::Branch(children)) => std::mem::take(children),
                _ => IndexMap::new(),
            };
            let children = insert_at(children, rest, value);
            level.insert(head.clone(), Node::Branch(children));
            level
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(path: &str) -> Vec<String> {
        path.split('.').map(String::from).collect()
    }

    fn insert(tree: OutputTree, path: &str, value: &str) -> OutputTree {
        tree.insert_nested(&key(path), value, CollisionPolicy::Error)
            .unwrap()
            .tree
    }

    #[test]
    fn test_insert_creates_intermediate_levels() {
        let tree = insert(OutputTree::new(), "brand.500", "#9e77ed");
        assert_eq!(tree.leaf(&["brand", "500"]), Some("#9e77ed"));
        assert!(tree.get(&["brand"]).unwrap().as_branch().is_some());
    }

    #[test]
    fn test_siblings_share_a_branch() {
        let tree = insert(OutputTree::new(), "brand.500", "#9e77ed");
        let tree = insert(tree, "brand.600", "#7f56d9");
        let brand = tree.get(&["brand"]).unwrap().as_branch().unwrap();
        assert_eq!(brand.keys().collect::<Vec<_>>(), ["500", "600"]);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut tree = OutputTree::new();
        for name in ["white", "black", "alpha.white", "brand.25"] {
            tree = insert(tree, name, "#000");
        }
        let keys: Vec<_> = tree.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["white", "black", "alpha", "brand"]);
    }

    #[test]
    fn test_branch_over_leaf_is_rejected() {
        let tree = insert(OutputTree::new(), "brand", "#9e77ed");
        let rejected = tree
            .insert_nested(&key("brand.500"), "#000", CollisionPolicy::Warn)
            .unwrap_err();
        assert_eq!(
            rejected.conflict,
            TreeConflict::BranchOverLeaf {
                key: "brand".to_string()
            }
        );
        assert_eq!(rejected.tree.leaf(&["brand"]), Some("#9e77ed"));
    }

    #[test]
    fn test_leaf_over_branch_is_rejected() {
        let tree = insert(OutputTree::new(), "brand.500", "#9e77ed");
        let rejected = tree
            .insert_nested(&key("brand"), "#000", CollisionPolicy::Warn)
            .unwrap_err();
        assert_eq!(
            rejected.conflict,
            TreeConflict::LeafOverBranch {
                key: "brand".to_string()
            }
        );
        assert_eq!(rejected.tree.leaf(&["brand", "500"]), Some("#9e77ed"));
    }

    #[test]
    fn test_duplicate_leaf_errors_by_default() {
        let tree = insert(OutputTree::new(), "gray.50", "#f7f7f7");
        let rejected = tree
            .insert_nested(&key("gray.50"), "#fafafa", CollisionPolicy::Error)
            .unwrap_err();
        assert_eq!(
            rejected.conflict,
            TreeConflict::DuplicateLeaf {
                key: "gray.50".to_string(),
                existing: "#f7f7f7".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_leaf_overwrites_when_allowed() {
        let tree = insert(OutputTree::new(), "gray.50", "#f7f7f7");
        let tree = insert(tree, "gray.100", "#f0f0f0");
        let inserted = tree
            .insert_nested(&key("gray.50"), "#fafafa", CollisionPolicy::Warn)
            .unwrap();
        assert_eq!(inserted.replaced.as_deref(), Some("#f7f7f7"));
        assert_eq!(inserted.tree.leaf(&["gray", "50"]), Some("#fafafa"));

        let gray = inserted.tree.get(&["gray"]).unwrap().as_branch().unwrap();
        assert_eq!(gray.keys().collect::<Vec<_>>(), ["50", "100"]);
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let rejected = OutputTree::new()
            .insert_nested(&[], "x", CollisionPolicy::Error)
            .unwrap_err();
        assert_eq!(rejected.conflict, TreeConflict::EmptyKey);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let tree = insert(OutputTree::new(), "brand.500", "#9e77ed");
        let tree = insert(tree, "white", "#ffffff");
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, r##"{"brand":{"500":"#9e77ed"},"white":"#ffffff"}"##);
    }
}
