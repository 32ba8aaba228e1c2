//! Nucleotide utilities
//!
//! Detecting allele pairs that a strand flip cannot tell apart.

/// Complement a single nucleotide
///
/// Supports standard bases in either case. Returns the same byte for anything
/// else (indel markers, `N`, ...).
#[inline]
pub fn complement_base(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'G' => b'C',
        b'C' => b'G',
        b'a' => b't',
        b't' => b'a',
        b'g' => b'c',
        b'c' => b'g',
        _ => base,
    }
}

/// Check whether two alleles cannot be told apart from a strand flip
///
/// True for the pairs {A,T} and {C,G}, ignoring case.
///
/// # Examples
/// ```
/// use genoconv::core::dna::is_strand_ambiguous;
///
/// assert!(is_strand_ambiguous("A", "T"));
/// assert!(is_strand_ambiguous("g", "C"));
/// assert!(!is_strand_ambiguous("A", "G"));
/// assert!(!is_strand_ambiguous("A", "A"));
/// ```
pub fn is_strand_ambiguous(a: &str, b: &str) -> bool {
    match (a.as_bytes(), b.as_bytes()) {
        ([x], [y]) => {
            let x = x.to_ascii_uppercase();
            let y = y.to_ascii_uppercase();
            x != y && matches!(x, b'A' | b'C' | b'G' | b'T') && complement_base(x) == y
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complement_base_standard() {
        assert_eq!(complement_base(b'A'), b'T');
        assert_eq!(complement_base(b'T'), b'A');
        assert_eq!(complement_base(b'G'), b'C');
        assert_eq!(complement_base(b'C'), b'G');
        assert_eq!(complement_base(b'N'), b'N');
    }

    #[test]
    fn test_complement_base_lowercase() {
        assert_eq!(complement_base(b'a'), b't');
        assert_eq!(complement_base(b'g'), b'c');
    }

    #[test]
    fn test_ambiguous_pairs() {
        assert!(is_strand_ambiguous("A", "T"));
        assert!(is_strand_ambiguous("T", "A"));
        assert!(is_strand_ambiguous("C", "G"));
        assert!(is_strand_ambiguous("G", "C"));
        assert!(!is_strand_ambiguous("A", "C"));
        assert!(!is_strand_ambiguous("T", "G"));
        assert!(!is_strand_ambiguous("AT", "TA"));
        assert!(!is_strand_ambiguous("N", "N"));
    }
}
