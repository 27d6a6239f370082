//! Inline time per tracked key-prefix category.
//!
//! A single depth-first walk from the roots carries an "active" category.
//! A node whose key starts with `<category>.` switches the active category
//! for itself and everything below it; other nodes inherit it. Every node's
//! inline time is counted once, against whichever category was active on
//! the first path that reached it.

use crate::callgraph::graph::CallGraph;
use crate::utils::config::OTHER_CATEGORY;
use log::{debug, warn};
use petgraph::stable_graph::NodeIndex;
use std::collections::{BTreeMap, HashSet};

/// Total inline time per category, `"Other"` included
pub type CategoryTimes = BTreeMap<String, f64>;

/// Sum inline time per category over the graph reachable from `roots`
///
/// **Public** - main entry point for category aggregation
///
/// # Arguments
/// * `full` - The baseline graph; pruned views lose time
/// * `roots` - Traversal seeds, walked in order
/// * `categories` - Key prefixes, tested in the given order
///
/// # Returns
/// `None` when no categories are tracked. Otherwise every category (0.0 when
/// nothing matched) plus `"Other"`.
pub fn time_per_category(
    full: &CallGraph,
    roots: &[String],
    categories: &[String],
) -> Option<CategoryTimes> {
    if categories.is_empty() {
        return None;
    }

    let prefixes: Vec<String> = categories.iter().map(|c| format!("{}.", c)).collect();

    let mut totals: CategoryTimes = categories.iter().map(|c| (c.clone(), 0.0)).collect();
    totals.insert(OTHER_CATEGORY.to_string(), 0.0);

    let mut visited: HashSet<NodeIndex> = HashSet::with_capacity(full.node_count());

    for root in roots {
        let Some(start) = full.node_index(root) else {
            warn!("Root `{}` is not in the graph; skipping", root);
            continue;
        };

        // (node, category index inherited from the caller)
        let mut stack: Vec<(NodeIndex, Option<usize>)> = vec![(start, None)];

        while let Some((ix, inherited)) = stack.pop() {
            if !visited.insert(ix) {
                continue;
            }

            let node = full.node_at(ix);
            let active = prefixes
                .iter()
                .position(|prefix| node.key.starts_with(prefix.as_str()))
                .or(inherited);

            let bucket = match active {
                Some(i) => categories[i].as_str(),
                None => OTHER_CATEGORY,
            };
            if let Some(total) = totals.get_mut(bucket) {
                *total += node.metrics.inlinetime;
            }

            for callee in full.callee_indices(ix).into_iter().rev() {
                if !visited.contains(&callee) {
                    stack.push((callee, active));
                }
            }
        }
    }

    debug_assert!(totals.values().all(|t| *t >= 0.0));
    debug!(
        "Aggregated {} nodes into {} categories",
        visited.len(),
        totals.len()
    );

    Some(totals)
}

/// Clean up a category list for matching
///
/// Trims names, drops empty ones and duplicates, and orders them reverse
/// lexically so `a.b` is tested before `a`.
pub fn normalize_categories(categories: &[String]) -> Vec<String> {
    let mut out: Vec<String> = categories
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out.reverse();
    out
}
