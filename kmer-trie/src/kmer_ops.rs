//! The radix tree operator class for k-mer keys.

use crate::interface::{
    ChooseInput, Choice, ConsistentNode, InnerConsistentInput, InnerConsistentOutput,
    LeafConsistentInput, LeafConsistentOutput, NodeLabel, OperatorClassConfig, PickSplitInput,
    PickSplitOutput, RadixOperatorClass,
};
use crate::strategy::ScanKey;
use compact_kmer::interface::alphabet::dna_alphabet::DnaCharacter;
use compact_kmer::interface::MAX_KMER_LENGTH;
use compact_kmer::{KmerKey, PackedSequence};
use itertools::Itertools;

/// The label type of [KmerRadixOps].
pub type KmerLabel = NodeLabel<DnaCharacter>;

/// A radix tree operator class over [KmerKey]s.
///
/// Inner tuples carry the longest common prefix of the keys below them, and are labelled by the next character of a key.
/// Leaf tuples store the rest of a key after the path from the root.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct KmerRadixOps {
    max_prefix_length: usize,
}

impl Default for KmerRadixOps {
    fn default() -> Self {
        Self {
            max_prefix_length: MAX_KMER_LENGTH,
        }
    }
}

impl KmerRadixOps {
    /// Creates an operator class whose pick-split computes prefixes of at most the given length.
    /// The length is clamped to `1..=32`.
    pub fn new(max_prefix_length: usize) -> Self {
        Self {
            max_prefix_length: max_prefix_length.clamp(1, MAX_KMER_LENGTH),
        }
    }

    /// Returns the maximum length of a prefix created by pick-split.
    pub fn max_prefix_length(&self) -> usize {
        self.max_prefix_length
    }
}

/// Returns the label of the character at the given index, or `End` if the key is not longer than the index.
fn label_at(key: &KmerKey, index: usize) -> KmerLabel {
    if index < key.len() {
        NodeLabel::Symbol(key.character(index))
    } else {
        NodeLabel::End
    }
}

impl RadixOperatorClass for KmerRadixOps {
    type Value = KmerKey;
    type Label = KmerLabel;
    type ScanKey = ScanKey;

    fn configure(&self) -> OperatorClassConfig {
        OperatorClassConfig {
            prefix_type: "kmer",
            label_type: "char",
            leaf_type: "kmer",
            can_return_data: true,
            long_values_ok: false,
        }
    }

    fn choose(&self, input: &ChooseInput<KmerKey, KmerLabel>) -> Choice<KmerKey, KmerLabel> {
        let rest = input.datum.suffix_from(input.level);

        let common_len = if let Some(prefix) = input.prefix {
            let common_len = rest.common_prefix_len(prefix);
            if common_len < prefix.len() {
                // The key diverges inside the prefix, split it at the first mismatch.
                let choice = Choice::SplitTuple {
                    prefix_prefix: if common_len == 0 {
                        None
                    } else {
                        Some(prefix.prefix(common_len))
                    },
                    prefix_labels: vec![NodeLabel::Symbol(prefix.character(common_len))],
                    child_node_index: 0,
                    postfix_prefix: if prefix.len() - common_len == 1 {
                        None
                    } else {
                        Some(prefix.suffix_from(common_len + 1))
                    },
                };
                trace!("Choose {} at level {}: {:?}", input.datum, input.level, choice);
                return choice;
            }
            common_len
        } else {
            0
        };

        let label = label_at(&rest, common_len);
        let choice = match input.labels.binary_search(&label) {
            Ok(node_index) => {
                let level_add = if label == NodeLabel::End {
                    common_len
                } else {
                    common_len + 1
                };
                Choice::MatchNode {
                    node_index,
                    level_add,
                    rest: rest.suffix_from(level_add),
                }
            }
            Err(_) if input.all_the_same => Choice::SplitTuple {
                prefix_prefix: input.prefix.copied(),
                prefix_labels: vec![NodeLabel::Placeholder],
                child_node_index: 0,
                postfix_prefix: None,
            },
            Err(node_index) => Choice::AddNode { label, node_index },
        };
        trace!("Choose {} at level {}: {:?}", input.datum, input.level, choice);
        choice
    }

    fn pick_split(&self, input: &PickSplitInput<KmerKey>) -> PickSplitOutput<KmerKey, KmerLabel> {
        let values = input.leaf_values;
        assert!(!values.is_empty(), "pick-split of an empty set of leaf values");

        let common_len = values[1..]
            .iter()
            .fold(values[0].len(), |common_len, value| {
                common_len.min(values[0].common_prefix_len(value))
            })
            .min(self.max_prefix_length);
        let prefix = if common_len == 0 {
            None
        } else {
            Some(values[0].prefix(common_len))
        };

        let value_labels: Vec<KmerLabel> = values
            .iter()
            .map(|value| label_at(value, common_len))
            .collect();
        // Stable, so values with the same label keep their order.
        let sorted_indices: Vec<usize> = (0..values.len())
            .sorted_by_key(|&index| value_labels[index])
            .collect();

        let mut labels = Vec::new();
        let mut leaf_node = vec![0; values.len()];
        for (label, group) in &sorted_indices
            .into_iter()
            .group_by(|&index| value_labels[index])
        {
            for index in group {
                leaf_node[index] = labels.len();
            }
            labels.push(label);
        }

        let leaf_values = values
            .iter()
            .zip(value_labels.iter())
            .map(|(value, label)| match label {
                NodeLabel::Symbol(_) => value.suffix_from(common_len + 1),
                _ => KmerKey::empty(),
            })
            .collect();

        let output = PickSplitOutput {
            prefix,
            labels,
            leaf_node,
            leaf_values,
        };
        debug!(
            "Split {} leaf values at level {} into prefix {:?} with labels {:?}",
            values.len(),
            input.level,
            output.prefix,
            output.labels
        );
        output
    }

    fn inner_consistent(
        &self,
        input: &InnerConsistentInput<KmerKey, KmerLabel, ScanKey>,
    ) -> InnerConsistentOutput<KmerKey> {
        let base = match input.prefix {
            Some(prefix) => input.reconstructed.concat(prefix),
            None => *input.reconstructed,
        };

        let nodes = input
            .labels
            .iter()
            .enumerate()
            .filter_map(|(node_index, label)| {
                let (reconstructed, exhausted) = match label {
                    NodeLabel::Symbol(character) => (base.push(*character), false),
                    NodeLabel::End => (base, true),
                    NodeLabel::Placeholder => (base, false),
                };
                if input
                    .scan_keys
                    .iter()
                    .all(|scan_key| scan_key.is_consistent_with_path(&reconstructed, exhausted))
                {
                    Some(ConsistentNode {
                        node_index,
                        level_add: reconstructed.len() - input.level,
                        reconstructed,
                    })
                } else {
                    None
                }
            })
            .collect();

        InnerConsistentOutput { nodes }
    }

    fn leaf_consistent(
        &self,
        input: &LeafConsistentInput<KmerKey, ScanKey>,
    ) -> LeafConsistentOutput<KmerKey> {
        let key = input.reconstructed.concat(input.leaf_value);
        let matches = input
            .scan_keys
            .iter()
            .all(|scan_key| scan_key.is_satisfied_by(&key, input.level));

        LeafConsistentOutput {
            matches,
            recheck: false,
            leaf_value: key,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::interface::{
        ChooseInput, Choice, InnerConsistentInput, LeafConsistentInput, NodeLabel,
        PickSplitInput, RadixOperatorClass,
    };
    use crate::kmer_ops::{KmerLabel, KmerRadixOps};
    use crate::strategy::ScanKey;
    use compact_kmer::{KmerKey, PackedSequence};

    fn kmer(text: &str) -> KmerKey {
        if text.is_empty() {
            KmerKey::empty()
        } else {
            text.parse().unwrap()
        }
    }

    fn symbol(text: &str) -> KmerLabel {
        NodeLabel::Symbol(kmer(text).character(0))
    }

    fn choose(
        datum: &str,
        level: usize,
        all_the_same: bool,
        prefix: Option<&str>,
        labels: &[KmerLabel],
    ) -> Choice<KmerKey, KmerLabel> {
        let datum = kmer(datum);
        let prefix = prefix.map(kmer);
        KmerRadixOps::default().choose(&ChooseInput {
            datum: &datum,
            level,
            all_the_same,
            prefix: prefix.as_ref(),
            labels,
        })
    }

    #[test]
    fn test_config() {
        let config = KmerRadixOps::default().configure();
        assert!(config.can_return_data);
        assert!(!config.long_values_ok);
        assert_eq!(config.prefix_type, config.leaf_type);
        assert_eq!(KmerRadixOps::new(0).max_prefix_length(), 1);
        assert_eq!(KmerRadixOps::new(100).max_prefix_length(), 32);
    }

    #[test]
    fn test_label_order() {
        let mut labels = vec![symbol("T"), NodeLabel::End, symbol("C"), NodeLabel::Placeholder, symbol("A"), symbol("G")];
        labels.sort();
        assert_eq!(
            labels,
            vec![NodeLabel::Placeholder, NodeLabel::End, symbol("A"), symbol("C"), symbol("G"), symbol("T")]
        );
    }

    #[test]
    fn test_choose_match_node() {
        assert_eq!(
            choose("AATTC", 1, false, Some("AT"), &[symbol("A"), symbol("T")]),
            Choice::MatchNode {
                node_index: 1,
                level_add: 3,
                rest: kmer("C"),
            }
        );
        assert_eq!(
            choose("ACG", 0, false, None, &[symbol("A"), symbol("C")]),
            Choice::MatchNode {
                node_index: 0,
                level_add: 1,
                rest: kmer("CG"),
            }
        );
    }

    #[test]
    fn test_choose_match_end() {
        assert_eq!(
            choose("GGAT", 2, false, Some("AT"), &[NodeLabel::End, symbol("C")]),
            Choice::MatchNode {
                node_index: 0,
                level_add: 2,
                rest: KmerKey::empty(),
            }
        );
    }

    #[test]
    fn test_choose_add_node() {
        assert_eq!(
            choose("AAG", 0, false, Some("AA"), &[symbol("A"), symbol("T")]),
            Choice::AddNode {
                label: symbol("G"),
                node_index: 1,
            }
        );
        assert_eq!(
            choose("AA", 0, false, Some("AA"), &[symbol("A"), symbol("T")]),
            Choice::AddNode {
                label: NodeLabel::End,
                node_index: 0,
            }
        );
    }

    #[test]
    fn test_choose_split_prefix() {
        assert_eq!(
            choose("ACGA", 0, false, Some("ACTTG"), &[symbol("A")]),
            Choice::SplitTuple {
                prefix_prefix: Some(kmer("AC")),
                prefix_labels: vec![symbol("T")],
                child_node_index: 0,
                postfix_prefix: Some(kmer("TG")),
            }
        );
        assert_eq!(
            choose("GA", 0, false, Some("T"), &[symbol("A")]),
            Choice::SplitTuple {
                prefix_prefix: None,
                prefix_labels: vec![symbol("T")],
                child_node_index: 0,
                postfix_prefix: None,
            }
        );
        // A key that ends inside the prefix also splits it.
        assert_eq!(
            choose("AC", 0, false, Some("ACT"), &[symbol("A")]),
            Choice::SplitTuple {
                prefix_prefix: Some(kmer("AC")),
                prefix_labels: vec![symbol("T")],
                child_node_index: 0,
                postfix_prefix: None,
            }
        );
    }

    #[test]
    fn test_choose_all_the_same() {
        assert_eq!(
            choose("AAG", 0, true, Some("AA"), &[symbol("T")]),
            Choice::SplitTuple {
                prefix_prefix: Some(kmer("AA")),
                prefix_labels: vec![NodeLabel::Placeholder],
                child_node_index: 0,
                postfix_prefix: None,
            }
        );
        assert_eq!(
            choose("AAT", 0, true, Some("AA"), &[symbol("T")]),
            Choice::MatchNode {
                node_index: 0,
                level_add: 3,
                rest: KmerKey::empty(),
            }
        );
    }

    #[test]
    fn test_pick_split_common_prefix() {
        let values = vec![kmer("AAAA"), kmer("AAAT"), kmer("AATT")];
        let output = KmerRadixOps::default().pick_split(&PickSplitInput {
            leaf_values: &values,
            level: 0,
        });
        assert_eq!(output.prefix, Some(kmer("AA")));
        assert_eq!(output.labels, vec![symbol("A"), symbol("T")]);
        assert_eq!(output.leaf_node, vec![0, 0, 1]);
        assert_eq!(output.leaf_values, vec![kmer("A"), kmer("T"), kmer("T")]);
    }

    #[test]
    fn test_pick_split_without_prefix() {
        let values = vec![kmer("TA"), kmer("C"), kmer("GGG"), kmer("TC"), kmer("A")];
        let output = KmerRadixOps::default().pick_split(&PickSplitInput {
            leaf_values: &values,
            level: 3,
        });
        assert_eq!(output.prefix, None);
        assert_eq!(
            output.labels,
            vec![symbol("A"), symbol("C"), symbol("G"), symbol("T")]
        );
        assert_eq!(output.leaf_node, vec![3, 1, 2, 3, 0]);
        assert_eq!(
            output.leaf_values,
            vec![kmer("A"), kmer(""), kmer("GG"), kmer("C"), kmer("")]
        );
    }

    #[test]
    fn test_pick_split_end_label() {
        let values = vec![kmer("ACG"), kmer("AC"), kmer("ACT")];
        let output = KmerRadixOps::default().pick_split(&PickSplitInput {
            leaf_values: &values,
            level: 0,
        });
        assert_eq!(output.prefix, Some(kmer("AC")));
        assert_eq!(output.labels, vec![NodeLabel::End, symbol("G"), symbol("T")]);
        assert_eq!(output.leaf_node, vec![1, 0, 2]);
        assert_eq!(output.leaf_values, vec![kmer(""); 3]);
    }

    #[test]
    fn test_pick_split_capped_prefix() {
        let values = vec![kmer("ACGTA"), kmer("ACGTC")];
        let output = KmerRadixOps::new(2).pick_split(&PickSplitInput {
            leaf_values: &values,
            level: 0,
        });
        assert_eq!(output.prefix, Some(kmer("AC")));
        assert_eq!(output.labels, vec![symbol("G")]);
        assert_eq!(output.leaf_node, vec![0, 0]);
        assert_eq!(output.leaf_values, vec![kmer("TA"), kmer("TC")]);
    }

    fn inner_consistent(
        scan_key: ScanKey,
        reconstructed: &str,
        prefix: Option<&str>,
        labels: &[KmerLabel],
    ) -> Vec<(usize, usize, String)> {
        let reconstructed = kmer(reconstructed);
        let prefix = prefix.map(kmer);
        KmerRadixOps::default()
            .inner_consistent(&InnerConsistentInput {
                scan_keys: &[scan_key],
                reconstructed: &reconstructed,
                level: reconstructed.len(),
                all_the_same: false,
                prefix: prefix.as_ref(),
                labels,
            })
            .nodes
            .into_iter()
            .map(|node| (node.node_index, node.level_add, node.reconstructed.as_string()))
            .collect()
    }

    #[test]
    fn test_inner_consistent_equal() {
        let labels = [NodeLabel::End, symbol("A"), symbol("G"), symbol("T")];
        assert_eq!(
            inner_consistent(ScanKey::Equal(kmer("CAGG")), "C", Some("A"), &labels),
            vec![(2, 2, "CAG".to_string())]
        );
        assert_eq!(
            inner_consistent(ScanKey::Equal(kmer("CA")), "C", Some("A"), &labels),
            vec![(0, 1, "CA".to_string())]
        );
        assert!(inner_consistent(ScanKey::Equal(kmer("CT")), "C", Some("A"), &labels).is_empty());
    }

    #[test]
    fn test_inner_consistent_starts_with() {
        let labels = [NodeLabel::End, symbol("A"), symbol("G")];
        assert_eq!(
            inner_consistent(ScanKey::StartsWith(kmer("C")), "C", Some("A"), &labels),
            vec![
                (0, 1, "CA".to_string()),
                (1, 2, "CAA".to_string()),
                (2, 2, "CAG".to_string())
            ]
        );
        assert_eq!(
            inner_consistent(ScanKey::StartsWith(kmer("CAG")), "", Some("CA"), &labels),
            vec![(2, 3, "CAG".to_string())]
        );
    }

    #[test]
    fn test_inner_consistent_placeholder() {
        let labels = [NodeLabel::Placeholder, symbol("G")];
        assert_eq!(
            inner_consistent(ScanKey::StartsWith(kmer("AT")), "A", None, &labels),
            vec![(0, 0, "A".to_string())]
        );
    }

    #[test]
    fn test_inner_consistent_matches() {
        let labels = [NodeLabel::End, symbol("A"), symbol("C"), symbol("G"), symbol("T")];
        assert_eq!(
            inner_consistent(ScanKey::Matches("AWN".parse().unwrap()), "", Some("A"), &labels),
            vec![(1, 2, "AA".to_string()), (4, 2, "AT".to_string())]
        );
    }

    #[test]
    fn test_leaf_consistent() {
        let ops = KmerRadixOps::default();
        let reconstructed = kmer("AC");
        let leaf_value = kmer("GT");
        let check = |scan_key: ScanKey, level: usize| {
            ops.leaf_consistent(&LeafConsistentInput {
                scan_keys: &[scan_key],
                reconstructed: &reconstructed,
                level,
                leaf_value: &leaf_value,
            })
        };

        let output = check(ScanKey::Equal(kmer("ACGT")), 2);
        assert!(output.matches);
        assert!(!output.recheck);
        assert_eq!(output.leaf_value, kmer("ACGT"));

        assert!(!check(ScanKey::Equal(kmer("ACG")), 2).matches);
        assert!(check(ScanKey::StartsWith(kmer("ACG")), 2).matches);
        assert!(!check(ScanKey::StartsWith(kmer("ACGA")), 2).matches);
        assert!(check(ScanKey::StartsWith(kmer("AC")), 2).matches);
        assert!(check(ScanKey::Matches("MSKW".parse().unwrap()), 2).matches);
        assert!(!check(ScanKey::Matches("MSK".parse().unwrap()), 2).matches);
    }

    #[test]
    fn test_leaf_consistent_conjunction() {
        let ops = KmerRadixOps::default();
        let reconstructed = KmerKey::empty();
        let leaf_value = kmer("ACGT");
        let output = ops.leaf_consistent(&LeafConsistentInput {
            scan_keys: &[ScanKey::StartsWith(kmer("AC")), ScanKey::Matches("NNNA".parse().unwrap())],
            reconstructed: &reconstructed,
            level: 0,
            leaf_value: &leaf_value,
        });
        assert!(!output.matches);
    }
}
