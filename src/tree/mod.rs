//! Nested asset tree built from the flat list of scanned records.
//!
//! Records are folded in sorted `relative_path` order so the tree (and the
//! module emitted from it) does not depend on directory enumeration order.
//! When two records land on the same identifier path the later one wins and
//! a [`Collision`] is reported.

use std::fmt;
use std::path::PathBuf;

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::discovery::{AssetCategory, AssetRecord};
use crate::output::Logger;

/// Children of one tree level, in insertion order.
pub type Children = IndexMap<String, AssetNode>;

/// How a leaf is exposed in the generated module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    /// A URL string pointing at the file.
    Path,
    /// An SVG imported as a component through the bundler transform.
    Component,
}

/// A single asset in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLeaf {
    /// Relative path of the source file within the asset root.
    pub source: String,
    pub absolute_path: PathBuf,
    pub category: AssetCategory,
    pub kind: LeafKind,
}

impl AssetLeaf {
    fn from_record(record: &AssetRecord, svg_as_component: bool) -> Self {
        let kind = if svg_as_component && record.category == AssetCategory::Svg {
            LeafKind::Component
        } else {
            LeafKind::Path
        };

        Self {
            source: record.relative_path.clone(),
            absolute_path: record.absolute_path.clone(),
            category: record.category,
            kind,
        }
    }
}

/// A directory level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetBranch {
    /// Relative path of the record that first created this level.
    pub origin: String,
    pub children: Children,
}

impl AssetBranch {
    fn new(origin: &str) -> Self {
        Self {
            origin: origin.to_string(),
            children: Children::new(),
        }
    }
}

/// A tree entry: either a nested level or a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetNode {
    Branch(AssetBranch),
    Leaf(AssetLeaf),
}

impl AssetNode {
    pub fn as_leaf(&self) -> Option<&AssetLeaf> {
        match self {
            AssetNode::Leaf(leaf) => Some(leaf),
            AssetNode::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&AssetBranch> {
        match self {
            AssetNode::Branch(branch) => Some(branch),
            AssetNode::Leaf(_) => None,
        }
    }
}

/// Two source files competing for the same identifier path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    /// Identifier path where the clash happened.
    pub key_path: Vec<String>,
    /// Source that was displaced.
    pub replaced: String,
    /// Source that now occupies the path.
    pub winner: String,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Identifier collision at `{}`: {} replaces {}",
            self.key_path.join("."),
            self.winner,
            self.replaced
        )
    }
}

/// Root of the nested asset mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetTree {
    root: Children,
}

impl AssetTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &Children {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Look up a node by identifier path.
    pub fn get(&self, path: &[&str]) -> Option<&AssetNode> {
        let (last, parents) = path.split_last()?;
        let mut level = &self.root;
        for segment in parents {
            level = &level.get(*segment)?.as_branch()?.children;
        }
        level.get(*last)
    }

    /// Count leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Children> = vec![&self.root];
        while let Some(level) = stack.pop() {
            for node in level.values() {
                match node {
                    AssetNode::Leaf(_) => count += 1,
                    AssetNode::Branch(branch) => stack.push(&branch.children),
                }
            }
        }
        count
    }
}

/// Folds records into an [`AssetTree`] one at a time.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: AssetTree,
    svg_as_component: bool,
}

impl TreeBuilder {
    pub fn new(svg_as_component: bool) -> Self {
        Self {
            tree: AssetTree::new(),
            svg_as_component,
        }
    }

    /// Insert a record at its identifier path.
    ///
    /// A leaf and a level (or two different sources) competing for one key
    /// resolve in favour of the record inserted last.
    pub fn insert(&mut self, record: &AssetRecord) -> Option<Collision> {
        let (leaf_key, dirs) = record.path_segments.split_last()?;
        let mut collision = None;
        let mut level = &mut self.tree.root;

        for (depth, segment) in dirs.iter().enumerate() {
            let slot = level
                .entry(segment.clone())
                .or_insert_with(|| AssetNode::Branch(AssetBranch::new(&record.relative_path)));

            if let AssetNode::Leaf(leaf) = &*slot {
                collision = Some(Collision {
                    key_path: record.path_segments[..=depth].to_vec(),
                    replaced: leaf.source.clone(),
                    winner: record.relative_path.clone(),
                });
                *slot = AssetNode::Branch(AssetBranch::new(&record.relative_path));
            }

            let AssetNode::Branch(branch) = slot else {
                return collision;
            };
            level = &mut branch.children;
        }

        let leaf = AssetNode::Leaf(AssetLeaf::from_record(record, self.svg_as_component));

        match level.entry(leaf_key.clone()) {
            Entry::Vacant(vacant) => {
                vacant.insert(leaf);
            }
            Entry::Occupied(mut occupied) => {
                let replaced = match occupied.get() {
                    AssetNode::Leaf(existing) if existing.source == record.relative_path => None,
                    AssetNode::Leaf(existing) => Some(existing.source.clone()),
                    AssetNode::Branch(branch) => Some(branch.origin.clone()),
                };
                if let Some(replaced) = replaced {
                    collision = Some(Collision {
                        key_path: record.path_segments.clone(),
                        replaced,
                        winner: record.relative_path.clone(),
                    });
                }
                occupied.insert(leaf);
            }
        }

        collision
    }

    pub fn build(self) -> AssetTree {
        self.tree
    }
}

/// Result of folding a full record set.
#[derive(Debug, Clone, Default)]
pub struct TreeBuild {
    pub tree: AssetTree,
    pub collisions: Vec<Collision>,
}

/// Build a tree from every record of one generation cycle.
///
/// Records are sorted by relative path first; each collision is logged as a
/// warning and returned alongside the tree.
pub fn build_tree(
    records: &[AssetRecord],
    svg_as_component: bool,
    logger: &dyn Logger,
) -> TreeBuild {
    let mut sorted: Vec<&AssetRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    let mut builder = TreeBuilder::new(svg_as_component);
    let mut collisions = Vec::new();

    for record in sorted {
        if let Some(collision) = builder.insert(record) {
            logger.warn(&collision.to_string());
            collisions.push(collision);
        }
    }

    TreeBuild {
        tree: builder.build(),
        collisions,
    }
}
