//! Broad-phase tree statistics
//!
//! The engine keeps every collider in a bounding-volume tree. The testbed only
//! reads that tree: how tall it is, how many proxies it holds, and how tall
//! it would have to be at best.

use serde::{Deserialize, Serialize};

/// Branching factor of the engine's scene-query tree
pub const ENGINE_TREE_ARITY: u32 = 4;

/// Snapshot of the broad-phase tree shape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Node levels from the root to the deepest leaf (0 for an empty tree)
    pub height: u32,
    /// Number of proxies (one per fixture)
    pub proxy_count: u32,
    /// Children per internal node
    pub arity: u32,
}

/// Smallest number of node levels a tree with `arity` children per node
/// needs to hold `proxy_count` proxies.
pub fn minimum_height(proxy_count: u32, arity: u32) -> u32 {
    if proxy_count == 0 {
        return 0;
    }
    let arity = u64::from(arity.max(2));
    let mut levels = 1;
    let mut capacity = arity;
    while capacity < u64::from(proxy_count) {
        capacity *= arity;
        levels += 1;
    }
    levels
}

/// Minimum height for the tree described by `stats`
pub fn stats_minimum_height(stats: &TreeStats) -> u32 {
    minimum_height(stats.proxy_count, stats.arity)
}

/// Walk a flat node array down from `root` and return the number of levels
/// on the longest root-to-leaf path.
///
/// `children` yields the child indices of an internal node and `None` for a
/// leaf; indices outside the array are skipped.
pub fn tree_height<N, F, I>(nodes: &[N], root: usize, children: F) -> u32
where
    F: Fn(&N) -> Option<I>,
    I: IntoIterator<Item = usize>,
{
    let mut height = 0;
    let mut stack = vec![(root, 1u32)];
    while let Some((index, depth)) = stack.pop() {
        let Some(node) = nodes.get(index) else {
            continue;
        };
        height = height.max(depth);
        if let Some(kids) = children(node) {
            stack.extend(kids.into_iter().map(|child| (child, depth + 1)));
        }
    }
    height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_height_empty() {
        assert_eq!(minimum_height(0, 4), 0);
        assert_eq!(minimum_height(0, 2), 0);
    }

    #[test]
    fn test_minimum_height_binary() {
        assert_eq!(minimum_height(1, 2), 1);
        assert_eq!(minimum_height(2, 2), 1);
        assert_eq!(minimum_height(3, 2), 2);
        assert_eq!(minimum_height(1024, 2), 10);
        assert_eq!(minimum_height(1025, 2), 11);
    }

    #[test]
    fn test_minimum_height_quad() {
        assert_eq!(minimum_height(4, 4), 1);
        assert_eq!(minimum_height(5, 4), 2);
        assert_eq!(minimum_height(16, 4), 2);
        // Full floor plus one piece
        assert_eq!(minimum_height(2004, 4), 6);
    }

    #[test]
    fn test_degenerate_arity_is_binary() {
        assert_eq!(minimum_height(8, 0), minimum_height(8, 2));
        assert_eq!(minimum_height(8, 1), 3);
    }

    // Children of node i listed explicitly; empty list means leaf.
    fn height_of(nodes: &[Vec<usize>]) -> u32 {
        height_from(nodes, 0)
    }

    fn height_from(nodes: &[Vec<usize>], root: usize) -> u32 {
        tree_height(nodes, root, |kids| {
            if kids.is_empty() {
                None
            } else {
                Some(kids.clone())
            }
        })
    }

    #[test]
    fn test_tree_height() {
        assert_eq!(height_of(&[]), 0);
        assert_eq!(height_of(&[vec![]]), 1);
        assert_eq!(height_of(&[vec![1, 2], vec![], vec![3], vec![]]), 3);
    }

    #[test]
    fn test_tree_height_from_inner_root() {
        // Node 0 only forwards to node 1, the real root
        let nodes = [vec![1], vec![2, 3], vec![], vec![]];
        assert_eq!(height_of(&nodes), 3);
        assert_eq!(height_from(&nodes, 1), 2);
        assert_eq!(height_from(&nodes, 7), 0);
    }

    #[test]
    fn test_tree_height_skips_dangling_children() {
        assert_eq!(height_of(&[vec![1, 99], vec![]]), 2);
    }

    #[test]
    fn test_stats_minimum_height() {
        let stats = TreeStats {
            height: 5,
            proxy_count: 64,
            arity: 4,
        };
        assert_eq!(stats_minimum_height(&stats), 3);
    }
}
