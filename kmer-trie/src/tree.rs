//! An in-memory radix tree that drives a [RadixOperatorClass] the way an SP-GiST index does.

use crate::interface::{
    ChooseInput, Choice, InnerConsistentInput, LeafConsistentInput, PickSplitInput,
    RadixOperatorClass,
};

/// Options of a [RadixTree].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TreeOptions {
    /// The number of leaf tuples a leaf node holds before it gets split.
    pub leaf_capacity: usize,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self { leaf_capacity: 64 }
    }
}

type NodeIndex = usize;

#[derive(Debug, Clone)]
struct LeafTuple<Value, Item> {
    value: Value,
    item: Item,
}

#[derive(Debug, Clone)]
enum Node<Value, Label, Item> {
    Inner {
        prefix: Option<Value>,
        all_the_same: bool,
        labels: Vec<Label>,
        children: Vec<NodeIndex>,
    },
    Leaf(Vec<LeafTuple<Value, Item>>),
}

/// A radix tree mapping keys to items.
///
/// Nodes are stored in an arena, the root is always the first node.
/// Keys may be inserted multiple times, each insertion stores a separate item.
#[derive(Debug, Clone)]
pub struct RadixTree<Ops: RadixOperatorClass, Item> {
    ops: Ops,
    options: TreeOptions,
    nodes: Vec<Node<Ops::Value, Ops::Label, Item>>,
    len: usize,
}

impl<Ops: RadixOperatorClass, Item> RadixTree<Ops, Item> {
    /// Creates an empty tree with default options.
    pub fn new(ops: Ops) -> Self {
        Self::with_options(ops, TreeOptions::default())
    }

    /// Creates an empty tree.
    /// A leaf capacity of zero is raised to one.
    pub fn with_options(ops: Ops, options: TreeOptions) -> Self {
        let options = TreeOptions {
            leaf_capacity: options.leaf_capacity.max(1),
        };
        let config = ops.configure();
        debug!("Creating radix tree with {:?} and {:?}", config, options);
        Self {
            ops,
            options,
            nodes: vec![Node::Leaf(Vec::new())],
            len: 0,
        }
    }

    /// Returns the operator class of this tree.
    pub fn ops(&self) -> &Ops {
        &self.ops
    }

    /// Returns the number of stored items.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no items are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of inner and leaf nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Inserts the given key with the given item.
    pub fn insert(&mut self, key: Ops::Value, item: Item) {
        let mut current = 0;
        let mut level = 0;
        let mut leaf_value = key.clone();

        loop {
            let choice = match &self.nodes[current] {
                Node::Leaf(_) => break,
                Node::Inner {
                    prefix,
                    all_the_same,
                    labels,
                    ..
                } => self.ops.choose(&ChooseInput {
                    datum: &key,
                    level,
                    all_the_same: *all_the_same,
                    prefix: prefix.as_ref(),
                    labels,
                }),
            };

            match choice {
                Choice::MatchNode {
                    node_index,
                    level_add,
                    rest,
                } => {
                    current = self.children(current)[node_index];
                    level += level_add;
                    leaf_value = rest;
                }
                Choice::AddNode { label, node_index } => {
                    let child = self.push_node(Node::Leaf(Vec::new()));
                    if let Node::Inner {
                        labels, children, ..
                    } = &mut self.nodes[current]
                    {
                        labels.insert(node_index, label);
                        children.insert(node_index, child);
                    }
                    debug!("Added child {} to node {}", child, current);
                }
                Choice::SplitTuple {
                    prefix_prefix,
                    prefix_labels,
                    child_node_index,
                    postfix_prefix,
                } => self.split_tuple(
                    current,
                    prefix_prefix,
                    prefix_labels,
                    child_node_index,
                    postfix_prefix,
                ),
            }
        }

        self.len += 1;
        let capacity = self.options.leaf_capacity;
        if let Node::Leaf(tuples) = &mut self.nodes[current] {
            tuples.push(LeafTuple {
                value: leaf_value,
                item,
            });
            if tuples.len() <= capacity {
                return;
            }
            if tuples.windows(2).all(|pair| pair[0].value == pair[1].value) {
                if tuples.len() == capacity + 1 {
                    warn!(
                        "Leaf node {} exceeds its capacity of {} with copies of the same value",
                        current, capacity
                    );
                }
                return;
            }
        }
        self.pick_split(current, level);
    }

    fn children(&self, node: NodeIndex) -> &[NodeIndex] {
        match &self.nodes[node] {
            Node::Inner { children, .. } => children,
            Node::Leaf(_) => panic!("leaf node {} has no children", node),
        }
    }

    fn push_node(&mut self, node: Node<Ops::Value, Ops::Label, Item>) -> NodeIndex {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Replaces the given inner node by an upper node with the given prefix and labels,
    /// whose link `child_node_index` points to a lower node with the old labels and children.
    fn split_tuple(
        &mut self,
        current: NodeIndex,
        prefix_prefix: Option<Ops::Value>,
        prefix_labels: Vec<Ops::Label>,
        child_node_index: usize,
        postfix_prefix: Option<Ops::Value>,
    ) {
        let (all_the_same, labels, children) = match &mut self.nodes[current] {
            Node::Inner {
                all_the_same,
                labels,
                children,
                ..
            } => (
                *all_the_same,
                std::mem::take(labels),
                std::mem::take(children),
            ),
            Node::Leaf(_) => panic!("split of leaf node {}", current),
        };
        let lower = self.push_node(Node::Inner {
            prefix: postfix_prefix,
            all_the_same,
            labels,
            children,
        });

        let upper_children: Vec<NodeIndex> = (0..prefix_labels.len())
            .map(|index| {
                if index == child_node_index {
                    lower
                } else {
                    self.push_node(Node::Leaf(Vec::new()))
                }
            })
            .collect();
        debug!(
            "Split node {} into upper labels {:?} and lower node {}",
            current, prefix_labels, lower
        );
        self.nodes[current] = Node::Inner {
            prefix: prefix_prefix,
            all_the_same: false,
            labels: prefix_labels,
            children: upper_children,
        };
    }

    /// Replaces the given leaf node by the inner node computed by the operator class.
    fn pick_split(&mut self, current: NodeIndex, level: usize) {
        let tuples = match std::mem::replace(&mut self.nodes[current], Node::Leaf(Vec::new())) {
            Node::Leaf(tuples) => tuples,
            Node::Inner { .. } => panic!("pick-split of inner node {}", current),
        };
        let values: Vec<Ops::Value> = tuples.iter().map(|tuple| tuple.value.clone()).collect();
        let output = self.ops.pick_split(&PickSplitInput {
            leaf_values: &values,
            level,
        });
        debug_assert_eq!(output.leaf_node.len(), tuples.len());
        debug_assert_eq!(output.leaf_values.len(), tuples.len());

        let mut child_tuples: Vec<_> = (0..output.labels.len()).map(|_| Vec::new()).collect();
        for ((tuple, node), value) in tuples
            .into_iter()
            .zip(output.leaf_node)
            .zip(output.leaf_values)
        {
            child_tuples[node].push(LeafTuple {
                value,
                item: tuple.item,
            });
        }
        let children: Vec<NodeIndex> = child_tuples
            .into_iter()
            .map(|tuples| self.push_node(Node::Leaf(tuples)))
            .collect();

        let all_the_same = output.labels.windows(2).all(|pair| pair[0] == pair[1]);
        debug!(
            "Split leaf node {} at level {} into {} children",
            current,
            level,
            output.labels.len()
        );
        self.nodes[current] = Node::Inner {
            prefix: output.prefix,
            all_the_same,
            labels: output.labels,
            children,
        };
    }

    /// Returns the full keys and items of all entries that satisfy all given scan keys.
    /// The order of the results is unspecified.
    pub fn search(&self, scan_keys: &[Ops::ScanKey]) -> Vec<(Ops::Value, &Item)>
    where
        Ops::Value: Default,
    {
        let mut result = Vec::new();
        let mut stack = vec![(0, 0, Ops::Value::default())];

        while let Some((current, level, reconstructed)) = stack.pop() {
            match &self.nodes[current] {
                Node::Inner {
                    prefix,
                    all_the_same,
                    labels,
                    children,
                } => {
                    let output = self.ops.inner_consistent(&InnerConsistentInput {
                        scan_keys,
                        reconstructed: &reconstructed,
                        level,
                        all_the_same: *all_the_same,
                        prefix: prefix.as_ref(),
                        labels,
                    });
                    for node in output.nodes {
                        stack.push((
                            children[node.node_index],
                            level + node.level_add,
                            node.reconstructed,
                        ));
                    }
                }
                Node::Leaf(tuples) => {
                    for tuple in tuples {
                        let output = self.ops.leaf_consistent(&LeafConsistentInput {
                            scan_keys,
                            reconstructed: &reconstructed,
                            level,
                            leaf_value: &tuple.value,
                        });
                        if output.matches {
                            result.push((output.leaf_value, &tuple.item));
                        }
                    }
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use crate::kmer_ops::KmerRadixOps;
    use crate::strategy::ScanKey;
    use crate::tree::{RadixTree, TreeOptions};
    use compact_kmer::KmerKey;

    fn kmer(text: &str) -> KmerKey {
        text.parse().unwrap()
    }

    fn tree(keys: &[&str], leaf_capacity: usize) -> RadixTree<KmerRadixOps, usize> {
        let mut tree = RadixTree::with_options(KmerRadixOps::default(), TreeOptions { leaf_capacity });
        for (index, key) in keys.iter().enumerate() {
            tree.insert(kmer(key), index);
        }
        tree
    }

    fn search(tree: &RadixTree<KmerRadixOps, usize>, scan_keys: &[ScanKey]) -> Vec<(String, usize)> {
        let mut result: Vec<_> = tree
            .search(scan_keys)
            .into_iter()
            .map(|(key, &item)| (key.to_string(), item))
            .collect();
        result.sort();
        result
    }

    #[test]
    fn test_empty() {
        let tree = tree(&[], 1);
        assert!(tree.is_empty());
        assert!(search(&tree, &[ScanKey::StartsWith(KmerKey::empty())]).is_empty());
    }

    #[test]
    fn test_single_leaf() {
        let tree = tree(&["ACGT", "ACG", "TT"], 4);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(
            search(&tree, &[ScanKey::Equal(kmer("ACG"))]),
            vec![("ACG".to_string(), 1)]
        );
        assert_eq!(
            search(&tree, &[ScanKey::StartsWith(kmer("AC"))]),
            vec![("ACG".to_string(), 1), ("ACGT".to_string(), 0)]
        );
    }

    #[test]
    fn test_split_and_search() {
        let keys = ["AAAA", "AAAT", "AATT", "AATC", "CATG", "AA", "GATTACA", "AAAA"];
        let tree = tree(&keys, 2);
        assert_eq!(tree.len(), keys.len());
        assert!(tree.node_count() > 1);

        assert_eq!(
            search(&tree, &[ScanKey::Equal(kmer("AAAA"))]),
            vec![("AAAA".to_string(), 0), ("AAAA".to_string(), 7)]
        );
        assert_eq!(
            search(&tree, &[ScanKey::Equal(kmer("AA"))]),
            vec![("AA".to_string(), 5)]
        );
        assert!(search(&tree, &[ScanKey::Equal(kmer("AAA"))]).is_empty());
        assert_eq!(
            search(&tree, &[ScanKey::StartsWith(kmer("AAT"))]),
            vec![("AATC".to_string(), 3), ("AATT".to_string(), 2)]
        );
        assert_eq!(
            search(&tree, &[ScanKey::Matches("NATN".parse().unwrap())]),
            vec![("AATC".to_string(), 3), ("AATT".to_string(), 2), ("CATG".to_string(), 4)]
        );
        assert_eq!(search(&tree, &[ScanKey::StartsWith(KmerKey::empty())]).len(), keys.len());
    }

    #[test]
    fn test_all_the_same_split() {
        // With a prefix length of one, the first split puts all keys below a single label.
        let mut tree = RadixTree::with_options(KmerRadixOps::new(1), TreeOptions { leaf_capacity: 2 });
        for (index, key) in ["ACGT", "ACGA", "ACTT", "TTTT", "AGGG"].iter().enumerate() {
            tree.insert(kmer(key), index);
        }
        assert_eq!(
            search(&tree, &[ScanKey::StartsWith(kmer("AC"))]),
            vec![("ACGA".to_string(), 1), ("ACGT".to_string(), 0), ("ACTT".to_string(), 2)]
        );
        assert_eq!(
            search(&tree, &[ScanKey::Equal(kmer("TTTT"))]),
            vec![("TTTT".to_string(), 3)]
        );
        assert_eq!(
            search(&tree, &[ScanKey::Equal(kmer("AGGG"))]),
            vec![("AGGG".to_string(), 4)]
        );
    }

    #[test]
    fn test_duplicates_beyond_capacity() {
        let tree = tree(&["ACGT"; 10], 3);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(search(&tree, &[ScanKey::Equal(kmer("ACGT"))]).len(), 10);
    }
}
