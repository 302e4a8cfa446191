//! A brute-force reference for the incremental commitment tree

use pool_common::{backends::SpongeBackend, field::Scalar};
use pool_core::crypto::merkle::empty_subtree_root;

/// A commitment tree that recomputes every node from its leaves on query.
///
/// A non-empty node is the sponge of its two children and of the last leaf
/// beneath it, an empty subtree takes the default root for its level.
pub struct ReferenceTree {
    /// The height of the tree
    height: usize,
    /// The leaves of the tree, in insertion order
    leaves: Vec<Scalar>,
    /// The empty subtree root at each level
    zeros: Vec<Scalar>,
}

impl ReferenceTree {
    /// Create a new tree over the given leaves
    pub fn new(height: usize, leaves: Vec<Scalar>) -> Self {
        let zeros = (0..=height).map(|h| empty_subtree_root(h).unwrap_or_default()).collect();
        Self { height, leaves, zeros }
    }

    /// Append a leaf
    pub fn push(&mut self, leaf: Scalar) {
        self.leaves.push(leaf);
    }

    /// Get the root of the tree
    pub fn root<S: SpongeBackend>(&self, sponge: &S) -> Scalar {
        self.get_node(sponge, self.height, 0 /* idx */)
    }

    /// Get the node at the given height and index
    fn get_node<S: SpongeBackend>(&self, sponge: &S, height: usize, idx: usize) -> Scalar {
        assert!(height <= self.height, "Height out of bounds");
        assert!(idx < 1 << (self.height - height), "Index out of bounds");

        let first_leaf = idx << height;
        if first_leaf >= self.leaves.len() {
            return self.zeros[height];
        }

        if height == 0 {
            return self.leaves[idx];
        }

        // The last leaf inserted beneath this node
        let last_leaf = (first_leaf + (1 << height)).min(self.leaves.len()) - 1;

        let left = self.get_node(sponge, height - 1, 2 * idx);
        let right = self.get_node(sponge, height - 1, 2 * idx + 1);
        sponge.hash([left, right, self.leaves[last_leaf]])
    }
}
