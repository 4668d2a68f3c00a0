use kmer_trie::compact_kmer::{KmerKey, PackedSequence, QueryPattern, Sequence};
use kmer_trie::{KmerRadixOps, RadixTree, ScanKey, TreeOptions};
use proptest::prelude::*;
use simplelog::{Config, LevelFilter, TestLogger};

fn init_logging() {
    // Fails if another test initialised the logger already.
    TestLogger::init(LevelFilter::Trace, Config::default()).ok();
}

fn build_tree(keys: &[KmerKey], ops: KmerRadixOps, leaf_capacity: usize) -> RadixTree<KmerRadixOps, usize> {
    let mut tree = RadixTree::with_options(ops, TreeOptions { leaf_capacity });
    for (index, key) in keys.iter().enumerate() {
        tree.insert(*key, index);
    }
    tree
}

fn search(tree: &RadixTree<KmerRadixOps, usize>, scan_keys: &[ScanKey]) -> Vec<(KmerKey, usize)> {
    let mut result: Vec<_> = tree
        .search(scan_keys)
        .into_iter()
        .map(|(key, &item)| (key, item))
        .collect();
    result.sort();
    result
}

fn brute_force(keys: &[KmerKey], predicate: impl Fn(&KmerKey) -> bool) -> Vec<(KmerKey, usize)> {
    let mut result: Vec<_> = keys
        .iter()
        .enumerate()
        .filter(|(_, key)| predicate(key))
        .map(|(index, key)| (*key, index))
        .collect();
    result.sort();
    result
}

fn keys_strategy() -> impl Strategy<Value = Vec<KmerKey>> {
    prop::collection::vec("[ACGT]{1,12}", 0..80).prop_map(|texts| {
        texts
            .iter()
            .map(|text| text.parse().unwrap())
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_search_equals_brute_force(
        keys in keys_strategy(),
        query in "[ACGT]{1,6}",
        pattern in "[ACGTWSMKRYBDHVN]{1,8}",
        leaf_capacity in 1usize..6,
        max_prefix_length in 1usize..40,
    ) {
        let tree = build_tree(&keys, KmerRadixOps::new(max_prefix_length), leaf_capacity);
        prop_assert_eq!(tree.len(), keys.len());
        let query: KmerKey = query.parse().unwrap();
        let pattern: QueryPattern = pattern.parse().unwrap();

        prop_assert_eq!(
            search(&tree, &[ScanKey::Equal(query)]),
            brute_force(&keys, |key| key == &query)
        );
        prop_assert_eq!(
            search(&tree, &[ScanKey::StartsWith(query)]),
            brute_force(&keys, |key| key.has_prefix(&query))
        );
        prop_assert_eq!(
            search(&tree, &[ScanKey::Matches(pattern)]),
            brute_force(&keys, |key| matches!(pattern.matches(key), Ok(true)))
        );
        prop_assert_eq!(
            search(&tree, &[ScanKey::StartsWith(query), ScanKey::Matches(pattern)]),
            brute_force(&keys, |key| key.has_prefix(&query) && matches!(pattern.matches(key), Ok(true)))
        );
        prop_assert_eq!(search(&tree, &[]).len(), keys.len());
    }

    #[test]
    fn prop_every_key_is_found(keys in keys_strategy(), leaf_capacity in 1usize..4) {
        let tree = build_tree(&keys, KmerRadixOps::default(), leaf_capacity);
        for (index, key) in keys.iter().enumerate() {
            let found = search(&tree, &[ScanKey::Equal(*key)]);
            prop_assert!(found.contains(&(*key, index)));
        }
    }
}

#[test]
fn test_index_kmers_of_sequence() {
    init_logging();
    let sequence: Sequence = "GATTACAGATTACACATTAG".parse().unwrap();
    let keys: Vec<KmerKey> = sequence.kmers(5).unwrap().collect();
    let tree = build_tree(&keys, KmerRadixOps::default(), 2);

    let found: Vec<(String, usize)> = search(&tree, &[ScanKey::from_text(3, "GATTA").unwrap()])
        .into_iter()
        .map(|(key, position)| (key.as_string(), position))
        .collect();
    assert_eq!(found, vec![("GATTA".to_string(), 0), ("GATTA".to_string(), 7)]);

    let mut positions: Vec<usize> = search(&tree, &[ScanKey::from_text(7, "NATTA").unwrap()])
        .into_iter()
        .map(|(_, position)| position)
        .collect();
    positions.sort_unstable();
    assert_eq!(positions, vec![0, 7, 14]);
    assert_eq!(
        positions.len(),
        sequence.count_matches(&"NATTA".parse().unwrap())
    );

    assert!(search(&tree, &[ScanKey::from_text(28, "CC").unwrap()]).is_empty());
}

#[test]
fn test_full_length_keys() {
    init_logging();
    let keys: Vec<KmerKey> = ["A", "C", "G", "T"]
        .iter()
        .flat_map(|first| {
            ["AC", "GT"]
                .iter()
                .map(move |second| format!("{}{}", first, second.repeat(16)))
        })
        .map(|text| text[..32].parse().unwrap())
        .collect();
    let tree = build_tree(&keys, KmerRadixOps::default(), 1);

    for (index, key) in keys.iter().enumerate() {
        assert_eq!(search(&tree, &[ScanKey::Equal(*key)]), vec![(*key, index)]);
    }
    assert_eq!(
        search(&tree, &[ScanKey::StartsWith(keys[0])]),
        vec![(keys[0], 0)]
    );
}
