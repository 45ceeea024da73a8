//! Huffman tree construction.
//!
//! The tree is built with the classic greedy merge: the two lightest active
//! nodes are repeatedly joined under a new internal node until one root is
//! left.
//!
//! # Tie-breaking
//!
//! The active nodes are kept in a list ordered by weight, and among equal
//! weights by insertion order. Leaves are inserted in ascending symbol order
//! and a merged node is inserted after every node of equal weight, so the
//! earliest-inserted node always wins a tie. The first node taken becomes the
//! `0` (left) child and the second the `1` (right) child. This makes the
//! derived codes, and therefore the container bytes, reproducible.

use crate::frequency::Histogram;
use tracing::debug;

/// A node of a Huffman tree.
///
/// Every internal node owns exactly two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A symbol and its occurrence count.
    Leaf {
        /// Byte value.
        symbol: u8,
        /// Occurrence count.
        weight: u64,
    },
    /// A merge of two subtrees.
    Internal {
        /// Sum of the children's weights.
        weight: u64,
        /// Subtree reached with a `0` bit.
        left: Box<HuffmanNode>,
        /// Subtree reached with a `1` bit.
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Weight of the subtree rooted at this node.
    pub fn weight(&self) -> u64 {
        match self {
            Self::Leaf { weight, .. } | Self::Internal { weight, .. } => *weight,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Length of the longest root-to-leaf path below this node.
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Number of leaves below this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

/// A Huffman tree over the distinct symbols of an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Build the tree for a histogram.
    ///
    /// Returns `None` when the histogram is empty. A histogram with a single
    /// symbol yields a tree whose root is a leaf.
    pub fn from_histogram(histogram: &Histogram) -> Option<Self> {
        let mut nodes: Vec<HuffmanNode> = histogram
            .iter()
            .map(|(symbol, weight)| HuffmanNode::Leaf { symbol, weight })
            .collect();

        // Stable: equal weights keep ascending symbol order
        nodes.sort_by_key(HuffmanNode::weight);

        while nodes.len() > 1 {
            let left = nodes.remove(0);
            let right = nodes.remove(0);
            let weight = left.weight() + right.weight();

            let pos = nodes
                .iter()
                .position(|n| n.weight() > weight)
                .unwrap_or(nodes.len());
            nodes.insert(
                pos,
                HuffmanNode::Internal {
                    weight,
                    left: Box::new(left),
                    right: Box::new(right),
                },
            );
        }

        let root = nodes.pop()?;
        debug!(
            leaves = root.leaf_count(),
            depth = root.depth(),
            weight = root.weight(),
            "built Huffman tree"
        );
        Some(Self { root })
    }

    /// The root node.
    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Consume the tree and return its root.
    pub fn into_root(self) -> HuffmanNode {
        self.root
    }

    /// Total weight (the number of input bytes).
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Number of leaves (distinct symbols).
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(symbol: u8, weight: u64) -> Box<HuffmanNode> {
        Box::new(HuffmanNode::Leaf { symbol, weight })
    }

    #[test]
    fn test_empty_histogram() {
        assert!(HuffmanTree::from_histogram(&Histogram::new()).is_none());
    }

    #[test]
    fn test_single_symbol_root_is_leaf() {
        let tree = HuffmanTree::from_histogram(&Histogram::from_bytes(b"zzzz")).unwrap();
        assert_eq!(
            tree.root(),
            &HuffmanNode::Leaf {
                symbol: b'z',
                weight: 4
            }
        );
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn test_lighter_node_goes_left() {
        let tree = HuffmanTree::from_histogram(&Histogram::from_bytes(b"aaab")).unwrap();
        assert_eq!(
            tree.into_root(),
            HuffmanNode::Internal {
                weight: 4,
                left: leaf(b'b', 1),
                right: leaf(b'a', 3),
            }
        );
    }

    #[test]
    fn test_equal_weights_prefer_smaller_symbol() {
        let tree = HuffmanTree::from_histogram(&Histogram::from_bytes(b"bbaa")).unwrap();
        assert_eq!(
            tree.into_root(),
            HuffmanNode::Internal {
                weight: 4,
                left: leaf(b'a', 2),
                right: leaf(b'b', 2),
            }
        );
    }

    #[test]
    fn test_merged_node_loses_ties() {
        // a=1, b=1 merge into a weight-2 node that queues behind c=2
        let tree = HuffmanTree::from_histogram(&Histogram::from_bytes(b"abcc")).unwrap();
        assert_eq!(
            tree.into_root(),
            HuffmanNode::Internal {
                weight: 4,
                left: leaf(b'c', 2),
                right: Box::new(HuffmanNode::Internal {
                    weight: 2,
                    left: leaf(b'a', 1),
                    right: leaf(b'b', 1),
                }),
            }
        );
    }

    #[test]
    fn test_balanced_tree() {
        let tree = HuffmanTree::from_histogram(&Histogram::from_bytes(b"abcd")).unwrap();
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.leaf_count(), 4);
        assert_eq!(tree.weight(), 4);
    }

    #[test]
    fn test_every_internal_node_is_binary() {
        fn check(node: &HuffmanNode) -> u64 {
            match node {
                HuffmanNode::Leaf { weight, .. } => {
                    assert!(*weight > 0);
                    *weight
                }
                HuffmanNode::Internal {
                    weight,
                    left,
                    right,
                } => {
                    assert_eq!(*weight, check(left) + check(right));
                    *weight
                }
            }
        }

        let data = b"the quick brown fox jumps over the lazy dog";
        let tree = HuffmanTree::from_histogram(&Histogram::from_bytes(data)).unwrap();
        assert_eq!(check(tree.root()), data.len() as u64);
        assert_eq!(tree.leaf_count(), Histogram::from_bytes(data).distinct());
    }
}
