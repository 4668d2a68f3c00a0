//! Position-wise matching of IUPAC query patterns against k-mer keys.

use crate::error::{ErrorKind, Result};
use crate::implementation::kmer::KmerKey;
use crate::implementation::query_pattern::QueryPattern;
use crate::interface::PackedSequence;

/// Returns true if every character of the key is in the base set of the pattern character at the same position.
/// Fails with `LengthMismatch` if pattern and key have different lengths.
pub fn matches(pattern: &QueryPattern, key: &KmerKey) -> Result<bool> {
    if pattern.len() != key.len() {
        return Err(ErrorKind::LengthMismatch(pattern.len(), key.len()).into());
    }
    Ok(matches_prefix(pattern, key))
}

/// Returns true if the first `key.len()` characters of the pattern match the key.
/// Stops at the first mismatch.
/// Panics if the key is longer than the pattern.
pub fn matches_prefix(pattern: &QueryPattern, key: &KmerKey) -> bool {
    assert!(
        key.len() <= pattern.len(),
        "key {} is longer than pattern {}",
        key,
        pattern
    );
    key.characters()
        .zip(pattern.characters())
        .all(|(nucleotide, symbol)| symbol.matches(nucleotide))
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::implementation::kmer::KmerKey;
    use crate::implementation::pattern_matcher::matches;
    use crate::implementation::query_pattern::QueryPattern;

    fn check(pattern: &str, key: &str) -> bool {
        let pattern: QueryPattern = pattern.parse().unwrap();
        let key: KmerKey = key.parse().unwrap();
        matches(&pattern, &key).unwrap()
    }

    #[test]
    fn test_ambiguity_codes() {
        assert!(check("WAT", "AAT"));
        assert!(check("WAT", "TAT"));
        assert!(!check("WAT", "CAT"));
        assert!(check("NAT", "CAT"));
        assert!(check("NAT", "GAT"));
        assert!(!check("NAT", "CAG"));
        assert!(check("SKRY", "CGAT"));
        assert!(!check("SKRY", "AGAT"));
        assert!(check("BDHV", "TAAA"));
        assert!(!check("BDHV", "ACAA"));
    }

    #[test]
    fn test_uracil_matches_thymine() {
        assert!(check("UU", "TT"));
        assert!(!check("U", "A"));
        assert!(!check("U", "C"));
    }

    #[test]
    fn test_exact_symbols() {
        assert!(check("ACGT", "ACGT"));
        assert!(!check("ACGT", "ACGA"));
        assert!(check(&"N".repeat(32), &"G".repeat(32)));
    }

    #[test]
    fn test_length_mismatch() {
        let pattern: QueryPattern = "NNN".parse().unwrap();
        let key: KmerKey = "AC".parse().unwrap();
        assert!(matches!(
            matches(&pattern, &key).unwrap_err().kind(),
            ErrorKind::LengthMismatch(3, 2)
        ));
    }
}
