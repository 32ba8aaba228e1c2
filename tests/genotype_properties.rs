//! Property-based tests for SNP and genotype identity
//!
//! SNP identity is the locus alone; genotype equality ignores allele order
//! but not strand.

use genoconv::core::{Genotype, GenotypeError, Locus, Snp, Strand};
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Generate a valid chromosome name
fn arb_chrom_name() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u8..=22).prop_map(|n| format!("chr{}", n)),
        Just("chrX".to_string()),
        Just("chrY".to_string()),
    ]
}

/// Generate a SNP name
fn arb_snp_name() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u32..10_000_000).prop_map(|n| format!("rs{}", n)),
        "SNP_A-[0-9]{5,8}",
    ]
}

fn arb_allele() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["A", "C", "G", "T", "AT", "ACG", "I", "D", "<DEL>"])
        .prop_map(str::to_string)
}

fn arb_strand() -> impl Strategy<Value = Strand> {
    prop::sample::select(vec![Strand::Top, Strand::Bot, Strand::Plus, Strand::Minus])
}

proptest! {
    /// Different names at the same locus are the same SNP
    #[test]
    fn prop_snp_identity_by_locus(
        a in arb_snp_name(),
        b in arb_snp_name(),
        chrom in arb_chrom_name(),
        pos in 0i64..250_000_000,
    ) {
        let x = Snp::new(&a, &chrom, pos).unwrap();
        let y = Snp::new(&b, &chrom, pos).unwrap();
        prop_assert_eq!(&x, &y);
        prop_assert_eq!(hash_of(&x), hash_of(&y));
    }

    /// Negative positions are always rejected
    #[test]
    fn prop_negative_position_rejected(pos in i64::MIN..0) {
        prop_assert_eq!(Locus::new("chr1", pos), Err(GenotypeError::InvalidPosition(pos)));
        prop_assert!(Snp::new("rs1", "chr1", pos).is_err());
    }

    /// Genotype equality and hashing ignore allele order
    #[test]
    fn prop_genotype_order_insensitive(
        a1 in arb_allele(),
        a2 in arb_allele(),
        strand in arb_strand(),
    ) {
        let snp = Snp::new("rs1", "chr1", 5).unwrap();
        let g = Genotype::new(snp.clone(), Some(a1.as_str()), Some(a2.as_str()), Some(strand)).unwrap();
        let h = Genotype::new(snp, Some(a2.as_str()), Some(a1.as_str()), Some(strand)).unwrap();
        prop_assert_eq!(&g, &h);
        prop_assert_eq!(hash_of(&g), hash_of(&h));
    }

    /// Genotypes differing only in strand are different
    #[test]
    fn prop_genotype_strand_sensitive(
        a1 in arb_allele(),
        a2 in arb_allele(),
        strand in arb_strand(),
        other in arb_strand(),
    ) {
        prop_assume!(strand != other);
        let snp = Snp::new("rs1", "chr1", 5).unwrap();
        let g = Genotype::new(snp.clone(), Some(a1.as_str()), Some(a2.as_str()), Some(strand)).unwrap();
        let h = Genotype::new(snp, Some(a1.as_str()), Some(a2.as_str()), Some(other)).unwrap();
        prop_assert_ne!(g, h);
    }

    /// Exactly one missing allele is rejected
    #[test]
    fn prop_half_missing_rejected(a in arb_allele(), first in any::<bool>()) {
        let snp = Snp::new("rs1", "chr1", 5).unwrap();
        let (a1, a2) = if first { (Some(a.as_str()), None) } else { (None, Some(a.as_str())) };
        let rejected = matches!(
            Genotype::new(snp, a1, a2, Some(Strand::Top)),
            Err(GenotypeError::HalfMissing { .. })
        );
        prop_assert!(rejected);
    }
}

#[cfg(test)]
mod edge_cases {
    use super::*;

    #[test]
    fn test_named_examples() {
        let snp = Snp::new("rs1", "chr1", 5).unwrap();
        let ag_top = Genotype::new(snp.clone(), Some("A"), Some("G"), Some(Strand::Top)).unwrap();
        let ga_top = Genotype::new(snp.clone(), Some("G"), Some("A"), Some(Strand::Top)).unwrap();
        let ag_bot = Genotype::new(snp, Some("A"), Some("G"), Some(Strand::Bot)).unwrap();
        assert_eq!(ag_top, ga_top);
        assert_ne!(ag_top, ag_bot);
    }

    #[test]
    fn test_unwritable_alleles_rejected() {
        let snp = Snp::new("rs1", "chr1", 5).unwrap();
        for bad in ["-", "", "A G"] {
            let rejected = matches!(
                Genotype::new(snp.clone(), Some(bad), Some("A"), Some(Strand::Top)),
                Err(GenotypeError::InvalidAllele { .. })
            );
            assert!(rejected, "allele {:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_same_call_different_snp() {
        let a = Snp::new("rs1", "chr1", 5).unwrap();
        let b = Snp::new("rs1", "chr1", 6).unwrap();
        let g = Genotype::new(a, Some("A"), Some("A"), Some(Strand::Plus)).unwrap();
        let h = Genotype::new(b, Some("A"), Some("A"), Some(Strand::Plus)).unwrap();
        assert_ne!(g, h);
    }
}
