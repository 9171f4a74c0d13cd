use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use log::{debug, trace};

pub type Symbol = u8;
pub type CodeTable = BTreeMap<Symbol, String>;
pub type FreqTable = BTreeMap<Symbol, u64>;

#[derive(Debug, Eq, PartialEq)]
pub enum Node {
    Leaf {
        byte: Symbol,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Internal { freq, .. } => *freq,
        }
    }
}

/// A Huffman tree, or the explicit empty tree built from empty input.
#[derive(Debug, Default, Eq, PartialEq)]
pub struct HuffmanTree {
    root: Option<Box<Node>>,
}

impl HuffmanTree {
    pub fn empty() -> Self {
        HuffmanTree { root: None }
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Sum of all leaf frequencies, i.e. the length of the text the tree was built from.
    pub fn weight(&self) -> u64 {
        self.root().map_or(0, Node::freq)
    }

    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Node> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { .. } => count += 1,
                Node::Internal { left, right, .. } => {
                    stack.push(left);
                    stack.push(right);
                }
            }
        }
        count
    }
}

struct HeapNode {
    freq: u64,
    seq: usize,
    node: Box<Node>,
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for Min-Heap behavior in BinaryHeap (which is max-heap by default).
        // Equal frequencies pop in insertion order.
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapNode {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq && self.seq == other.seq
    }
}

impl Eq for HeapNode {}

pub fn count_frequencies(text: &[Symbol]) -> FreqTable {
    let mut freq = FreqTable::new();
    for &byte in text {
        *freq.entry(byte).or_insert(0) += 1;
    }
    debug!(
        "Counted {} unique symbols over {} bytes",
        freq.len(),
        text.len()
    );
    freq
}

pub fn entropy_from_freq(freq: &FreqTable) -> f64 {
    let total: u64 = freq.values().sum();
    if total == 0 {
        return 0.0;
    }
    let total_f = total as f64;

    let entropy: f64 = freq
        .values()
        .map(|&count| {
            let p = count as f64 / total_f;
            p * (1.0 / p).log2()
        })
        .sum();

    trace!(
        "Calculated entropy: {:.4} bits/symbol (Total samples: {})",
        entropy, total
    );
    entropy
}

pub fn build_huffman_tree(frequencies: &FreqTable) -> HuffmanTree {
    debug!(
        "Building Huffman Tree from {} unique symbols",
        frequencies.len()
    );

    let mut heap = BinaryHeap::with_capacity(frequencies.len());
    let mut seq = 0;

    for (&byte, &freq) in frequencies {
        heap.push(HeapNode {
            freq,
            seq,
            node: Box::new(Node::Leaf { byte, freq }),
        });
        seq += 1;
    }
    trace!("Initial heap size: {}", heap.len());

    loop {
        let Some(left) = heap.pop() else {
            debug!("Empty frequency table, tree is empty.");
            return HuffmanTree::empty();
        };
        let Some(right) = heap.pop() else {
            debug!("Tree construction complete.");
            return HuffmanTree {
                root: Some(left.node),
            };
        };

        let freq = left.freq + right.freq;
        let new_node = Node::Internal {
            freq,
            left: left.node,
            right: right.node,
        };
        heap.push(HeapNode {
            freq,
            seq,
            node: Box::new(new_node),
        });
        seq += 1;
    }
}

/// Walks the tree depth-first, appending `0` for left and `1` for right.
///
/// A tree holding a single leaf assigns that symbol the code `"0"`.
pub fn build_code_table(tree: &HuffmanTree) -> CodeTable {
    let mut table = CodeTable::new();
    let Some(root) = tree.root() else {
        return table;
    };

    if let Node::Leaf { byte, .. } = root {
        trace!(
            "Single-symbol alphabet, assigning '0' to byte {:#04x}",
            byte
        );
        table.insert(*byte, String::from("0"));
        return table;
    }

    // Explicit stack: skewed trees can be as deep as the alphabet is wide.
    let mut stack = vec![(root, String::new())];
    while let Some((node, prefix)) = stack.pop() {
        match node {
            Node::Leaf { byte, .. } => {
                trace!(
                    "Assigning code to byte {:#04x} ('{}') : '{}'",
                    byte,
                    (*byte) as char,
                    prefix
                );
                table.insert(*byte, prefix);
            }
            Node::Internal { left, right, .. } => {
                stack.push((right.as_ref(), format!("{}1", prefix)));
                stack.push((left.as_ref(), format!("{}0", prefix)));
            }
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_every_byte() {
        let freq = count_frequencies(b"abacabad");
        assert_eq!(
            freq.into_iter().collect::<Vec<_>>(),
            vec![(b'a', 4), (b'b', 2), (b'c', 1), (b'd', 1)]
        );
    }

    #[test]
    fn empty_text_has_empty_table() {
        assert!(count_frequencies(b"").is_empty());
        let tree = build_huffman_tree(&FreqTable::new());
        assert!(tree.is_empty());
        assert_eq!(tree.weight(), 0);
        assert!(build_code_table(&tree).is_empty());
    }

    #[test]
    fn single_symbol_is_a_lone_leaf() {
        let tree = build_huffman_tree(&count_frequencies(b"aaaa"));
        let leaf = Node::Leaf {
            byte: b'a',
            freq: 4,
        };
        assert_eq!(tree.root(), Some(&leaf));
        let table = build_code_table(&tree);
        assert_eq!(table.get(&b'a').map(String::as_str), Some("0"));
    }

    #[test]
    fn equal_frequencies_pop_in_symbol_order() {
        let table = build_code_table(&build_huffman_tree(&count_frequencies(b"ba")));
        assert_eq!(table[&b'a'], "0");
        assert_eq!(table[&b'b'], "1");
    }

    #[test]
    fn reference_shape_for_mixed_text() {
        let tree = build_huffman_tree(&count_frequencies(b"abacabad"));
        assert_eq!(tree.weight(), 8);
        assert_eq!(tree.leaf_count(), 4);

        let table = build_code_table(&tree);
        assert_eq!(table[&b'a'], "0");
        assert_eq!(table[&b'b'], "10");
        assert_eq!(table[&b'c'], "110");
        assert_eq!(table[&b'd'], "111");
    }

    #[test]
    fn internal_frequency_is_sum_of_children() {
        fn check(node: &Node) {
            if let Node::Internal { freq, left, right } = node {
                assert_eq!(*freq, left.freq() + right.freq());
                check(left);
                check(right);
            }
        }
        let tree = build_huffman_tree(&count_frequencies(
            b"the quick brown fox jumps over the lazy dog",
        ));
        check(tree.root().unwrap());
    }

    #[test]
    fn skewed_tree_depth_follows_alphabet() {
        // Fibonacci-weighted frequencies give a maximally skewed tree.
        let mut freq = FreqTable::new();
        let (mut a, mut b) = (1u64, 1u64);
        for symbol in 0..40u8 {
            freq.insert(symbol, a);
            (a, b) = (b, a + b);
        }
        let table = build_code_table(&build_huffman_tree(&freq));
        assert_eq!(table.len(), 40);
        let longest = table.values().map(String::len).max().unwrap();
        assert_eq!(longest, 39);
    }

    #[test]
    fn entropy_of_uniform_and_empty() {
        assert_eq!(entropy_from_freq(&FreqTable::new()), 0.0);
        let single = entropy_from_freq(&count_frequencies(b"aaaa"));
        assert_eq!(single, 0.0);
        assert!(!single.is_sign_negative());
        let e = entropy_from_freq(&count_frequencies(b"abcd"));
        assert!((e - 2.0).abs() < 1e-12);
    }
}
