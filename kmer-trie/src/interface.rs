//! The operator class interface of a radix tree, modelled after the SP-GiST access method.
//!
//! An index host stores inner tuples, consisting of an optional prefix and a sorted list of labelled child links,
//! and leaf tuples, consisting of the part of a key that is not represented by the path from the root.
//! The operator class decides how keys are routed and split during insertion, and which subtrees are visited during a search.
//! All operations are pure functions of their input.

use std::fmt::Debug;

/// The label of a child link of an inner tuple.
///
/// Labels are ordered `Placeholder < End < Symbol`, and symbols by their own order.
/// The labels of an inner tuple are sorted, so they can be binary searched.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum NodeLabel<Character> {
    /// The dummy label of the link to a tuple that was split off an all-the-same tuple.
    /// It does not contribute to the reconstructed key.
    Placeholder,
    /// The key ends at this tuple.
    End,
    /// The next character of the key.
    Symbol(Character),
}

/// The static properties of an operator class.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OperatorClassConfig {
    /// The name of the type of the prefixes of inner tuples.
    pub prefix_type: &'static str,
    /// The name of the type of the labels of child links.
    pub label_type: &'static str,
    /// The name of the type of the values of leaf tuples.
    pub leaf_type: &'static str,
    /// True if the operator class reconstructs full keys during a search, such that the host does not need to fetch them.
    pub can_return_data: bool,
    /// True if keys may be too long to fit a single leaf tuple.
    pub long_values_ok: bool,
}

/// The input of [RadixOperatorClass::choose].
#[derive(Debug, Clone)]
pub struct ChooseInput<'a, Value, Label> {
    /// The full key that is inserted.
    pub datum: &'a Value,
    /// The number of characters of the key represented by the path to the current inner tuple.
    pub level: usize,
    /// True if all child links of the current inner tuple have the same label.
    pub all_the_same: bool,
    /// The prefix of the current inner tuple.
    pub prefix: Option<&'a Value>,
    /// The sorted labels of the child links of the current inner tuple.
    pub labels: &'a [Label],
}

/// The decision of [RadixOperatorClass::choose].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Choice<Value, Label> {
    /// Descend into an existing child.
    MatchNode {
        /// The index of the child link to follow.
        node_index: usize,
        /// The number of characters of the key consumed by the current inner tuple.
        level_add: usize,
        /// The part of the key that is not consumed yet, to be stored in a leaf tuple.
        rest: Value,
    },
    /// Add a new child link to the current inner tuple, then choose again.
    AddNode {
        /// The label of the new link.
        label: Label,
        /// The position of the new link, such that the labels stay sorted.
        node_index: usize,
    },
    /// Replace the current inner tuple by two inner tuples, then choose again.
    SplitTuple {
        /// The prefix of the upper tuple.
        prefix_prefix: Option<Value>,
        /// The labels of the upper tuple.
        prefix_labels: Vec<Label>,
        /// The index of the link of the upper tuple that points to the lower tuple.
        child_node_index: usize,
        /// The prefix of the lower tuple, which keeps all links of the current tuple.
        postfix_prefix: Option<Value>,
    },
}

/// The input of [RadixOperatorClass::pick_split].
#[derive(Debug, Clone)]
pub struct PickSplitInput<'a, Value> {
    /// The values of the leaf tuples to be split.
    pub leaf_values: &'a [Value],
    /// The number of characters represented by the path to the leaf tuples.
    pub level: usize,
}

/// The result of [RadixOperatorClass::pick_split].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PickSplitOutput<Value, Label> {
    /// The prefix of the new inner tuple.
    pub prefix: Option<Value>,
    /// The sorted labels of the child links of the new inner tuple.
    pub labels: Vec<Label>,
    /// For each input value, the index of the child link its leaf tuple goes to.
    pub leaf_node: Vec<usize>,
    /// For each input value, the value of its new leaf tuple.
    pub leaf_values: Vec<Value>,
}

/// The input of [RadixOperatorClass::inner_consistent].
#[derive(Debug, Clone)]
pub struct InnerConsistentInput<'a, Value, Label, ScanKey> {
    /// The search predicates, which all have to be satisfied.
    pub scan_keys: &'a [ScanKey],
    /// The key represented by the path to the current inner tuple.
    pub reconstructed: &'a Value,
    /// The number of characters of `reconstructed`.
    pub level: usize,
    /// True if all child links of the current inner tuple have the same label.
    pub all_the_same: bool,
    /// The prefix of the current inner tuple.
    pub prefix: Option<&'a Value>,
    /// The sorted labels of the child links of the current inner tuple.
    pub labels: &'a [Label],
}

/// A child link that needs to be visited.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ConsistentNode<Value> {
    /// The index of the child link.
    pub node_index: usize,
    /// The number of characters added to the reconstructed key by the current inner tuple and the link.
    pub level_add: usize,
    /// The key represented by the path to the child.
    pub reconstructed: Value,
}

/// The result of [RadixOperatorClass::inner_consistent].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InnerConsistentOutput<Value> {
    /// The child links to visit.
    pub nodes: Vec<ConsistentNode<Value>>,
}

/// The input of [RadixOperatorClass::leaf_consistent].
#[derive(Debug, Clone)]
pub struct LeafConsistentInput<'a, Value, ScanKey> {
    /// The search predicates, which all have to be satisfied.
    pub scan_keys: &'a [ScanKey],
    /// The key represented by the path to the leaf tuple.
    pub reconstructed: &'a Value,
    /// The number of characters of `reconstructed`.
    pub level: usize,
    /// The value of the leaf tuple.
    pub leaf_value: &'a Value,
}

/// The result of [RadixOperatorClass::leaf_consistent].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LeafConsistentOutput<Value> {
    /// True if the key satisfies all search predicates.
    pub matches: bool,
    /// True if the host needs to check the predicates against the indexed row again.
    pub recheck: bool,
    /// The full key of the leaf tuple.
    pub leaf_value: Value,
}

/// The five operations a radix tree host calls to build and search an index.
pub trait RadixOperatorClass {
    /// The type of keys, prefixes and leaf values.
    type Value: Clone + Eq + Debug;
    /// The type of labels of child links.
    type Label: Clone + Ord + Debug;
    /// The type of search predicates.
    type ScanKey: Debug;

    /// Returns the static properties of this operator class.
    fn configure(&self) -> OperatorClassConfig;

    /// Decides how to insert a key at an inner tuple.
    fn choose(&self, input: &ChooseInput<Self::Value, Self::Label>) -> Choice<Self::Value, Self::Label>;

    /// Splits a set of leaf values into a new inner tuple with child links.
    /// The input must not be empty.
    fn pick_split(
        &self,
        input: &PickSplitInput<Self::Value>,
    ) -> PickSplitOutput<Self::Value, Self::Label>;

    /// Returns the child links of an inner tuple that may lead to keys satisfying the search predicates.
    fn inner_consistent(
        &self,
        input: &InnerConsistentInput<Self::Value, Self::Label, Self::ScanKey>,
    ) -> InnerConsistentOutput<Self::Value>;

    /// Evaluates the search predicates on the full key of a leaf tuple.
    fn leaf_consistent(
        &self,
        input: &LeafConsistentInput<Self::Value, Self::ScanKey>,
    ) -> LeafConsistentOutput<Self::Value>;
}
