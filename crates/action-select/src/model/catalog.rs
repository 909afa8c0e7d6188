//! Action catalog tree and the index over it.
//!
//! The catalog is supplied by the service and never mutated here. Paths are
//! carried as segment lists while walking the tree and only joined with `.`
//! at the boundary (entry keys, wire messages).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One node of the action catalog.
///
/// A node may be invocable, a group (non-empty `actions`), or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_short: Option<String>,
    #[serde(default)]
    pub is_invocable: bool,
    #[serde(default)]
    pub actions: IndexMap<String, ActionNode>,
}

impl ActionNode {
    /// Name shown in the palette: the abbreviated name when present.
    pub fn display_name(&self) -> &str {
        self.name_short.as_deref().unwrap_or(&self.name)
    }
}

/// Dot-delimited identity of a catalog node, e.g. `group.subgroup.action`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ActionPath {
    segments: Vec<String>,
}

impl ActionPath {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Split a dotted key into segments. The empty string is the empty path.
    pub fn parse(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::default();
        }
        Self {
            segments: dotted.split('.').map(str::to_string).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for ActionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// The full action catalog: top-level keys mapped to nodes, in service order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    actions: IndexMap<String, ActionNode>,
}

impl Catalog {
    pub fn new(actions: IndexMap<String, ActionNode>) -> Self {
        Self { actions }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn actions(&self) -> &IndexMap<String, ActionNode> {
        &self.actions
    }

    /// All invocable paths, depth-first in catalog order.
    ///
    /// A node's own path comes before the paths of its children, and the
    /// traversal continues below invocable nodes.
    pub fn flatten(&self) -> Vec<ActionPath> {
        let mut paths = Vec::new();
        let mut prefix = Vec::new();
        collect_invocable(&self.actions, &mut prefix, &mut paths);
        paths
    }

    /// Descend one segment at a time; `None` as soon as a segment is missing.
    pub fn resolve(&self, path: &ActionPath) -> Option<&ActionNode> {
        let (first, rest) = path.segments().split_first()?;
        rest.iter()
            .try_fold(self.actions.get(first)?, |node, segment| {
                node.actions.get(segment)
            })
    }

    /// [`Catalog::resolve`] for a dotted key.
    pub fn resolve_key(&self, key: &str) -> Option<&ActionNode> {
        self.resolve(&ActionPath::parse(key))
    }
}

fn collect_invocable(
    actions: &IndexMap<String, ActionNode>,
    prefix: &mut Vec<String>,
    paths: &mut Vec<ActionPath>,
) {
    for (key, node) in actions {
        prefix.push(key.clone());
        if node.is_invocable {
            paths.push(ActionPath::new(prefix.clone()));
        }
        collect_invocable(&node.actions, prefix, paths);
        prefix.pop();
    }
}
