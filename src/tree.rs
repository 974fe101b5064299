use derivative::Derivative;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::frequency::FrequencyMap;

/// A node of a Huffman tree. Internal nodes own both children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<Symbol> {
    Leaf {
        symbol: Symbol,
        frequency: usize,
    },
    Internal {
        frequency: usize,
        left: Box<Node<Symbol>>,
        right: Box<Node<Symbol>>,
    },
}

impl<Symbol> Node<Symbol> {
    fn new(symbol: Symbol, frequency: usize) -> Self {
        Node::Leaf { symbol, frequency }
    }

    fn from_children(left: Node<Symbol>, right: Node<Symbol>) -> Self {
        Node::Internal {
            frequency: left.frequency() + right.frequency(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn frequency(&self) -> usize {
        match self {
            Node::Leaf { frequency, .. } | Node::Internal { frequency, .. } => *frequency,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { .. } => count += 1,
                Node::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }

        count
    }
}

/// Heap entry. Ordered by frequency, then by the order entries were created,
/// so equal frequencies always pop in the same sequence.
#[derive(Debug, Derivative)]
#[derivative(PartialEq, Eq, PartialOrd, Ord)]
struct Pending<Symbol> {
    frequency: usize,
    sequence: usize,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    node: Node<Symbol>,
}

/// Builds the Huffman tree for `freq`, or `None` when there is nothing to code.
///
/// Leaves are seeded in symbol order. The two lightest entries are merged
/// repeatedly, the first one popped becoming the left child. A map with a
/// single symbol yields that leaf as the root.
pub fn huffman<Symbol: Ord + Clone>(freq: &FrequencyMap<Symbol>) -> Option<Node<Symbol>> {
    let mut pq: BinaryHeap<_> = freq
        .iter()
        .enumerate()
        .map(|(sequence, (s, count))| {
            Reverse(Pending {
                frequency: count,
                sequence,
                node: Node::new(s.clone(), count),
            })
        })
        .collect();

    let mut sequence = pq.len();
    loop {
        let Reverse(left) = pq.pop()?;
        let Some(Reverse(right)) = pq.pop() else {
            return Some(left.node);
        };

        tracing::trace!(
            left = left.frequency,
            right = right.frequency,
            "merging huffman nodes"
        );

        let node = Node::from_children(left.node, right.node);
        pq.push(Reverse(Pending {
            frequency: node.frequency(),
            sequence,
            node,
        }));
        sequence += 1;
    }
}
