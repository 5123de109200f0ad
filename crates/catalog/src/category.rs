//! Category tree helpers for the admin category picker and storefront filters.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use maison_core::CategoryId;

/// Prefix repeated once per depth level in [`FlatCategory::label`].
pub const INDENT: &str = "— ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub parent_id: Option<CategoryId>,
}

/// A category positioned in a depth-first listing of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatCategory {
    pub id: CategoryId,
    pub name: String,
    pub depth: usize,
    pub label: String,
}

fn children_index(categories: &[Category]) -> (Vec<usize>, HashMap<CategoryId, Vec<usize>>) {
    let known: HashSet<CategoryId> = categories.iter().map(|c| c.id).collect();
    let mut roots = Vec::new();
    let mut children: HashMap<CategoryId, Vec<usize>> = HashMap::new();

    for (i, c) in categories.iter().enumerate() {
        match c.parent_id {
            Some(parent) if known.contains(&parent) && parent != c.id => {
                children.entry(parent).or_default().push(i);
            }
            // Unknown or self-referencing parents are treated as roots.
            _ => roots.push(i),
        }
    }
    (roots, children)
}

/// Flatten the tree depth-first: roots in input order, each followed by its
/// subtree, siblings in input order.
///
/// Every category is emitted exactly once. Nodes caught in a parent cycle that
/// no root reaches are appended as roots of their own.
pub fn flatten_tree(categories: &[Category]) -> Vec<FlatCategory> {
    let (roots, children) = children_index(categories);
    let mut out = Vec::with_capacity(categories.len());
    let mut seen = vec![false; categories.len()];

    let mut stack: Vec<(usize, usize)> = roots.iter().rev().map(|&i| (i, 0)).collect();
    loop {
        while let Some((i, depth)) = stack.pop() {
            if seen[i] {
                continue;
            }
            seen[i] = true;

            let c = &categories[i];
            out.push(FlatCategory {
                id: c.id,
                name: c.name.clone(),
                depth,
                label: format!("{}{}", INDENT.repeat(depth), c.name),
            });

            if let Some(kids) = children.get(&c.id) {
                stack.extend(kids.iter().rev().map(|&k| (k, depth + 1)));
            }
        }

        match seen.iter().position(|s| !s) {
            Some(orphan) => stack.push((orphan, 0)),
            None => break,
        }
    }

    out
}

/// `root` followed by every category beneath it (depth-first).
///
/// Returns an empty vector when `root` is unknown.
pub fn descendants(categories: &[Category], root: CategoryId) -> Vec<CategoryId> {
    if !categories.iter().any(|c| c.id == root) {
        return Vec::new();
    }

    let (_, children) = children_index(categories);
    let mut out = Vec::new();
    let mut visited = HashSet::new();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        out.push(id);
        if let Some(kids) = children.get(&id) {
            stack.extend(kids.iter().rev().map(|&k| categories[k].id));
        }
    }
    out
}
