//! Scoped genotype interning
//!
//! Large panels repeat the same few calls at every SNP. A [`GenotypeArena`]
//! hands out shared handles for equal calls so a builder stores each distinct
//! call once. Every builder owns its own arena; nothing is process-wide.

use crate::core::Genotype;
use std::collections::HashSet;
use std::sync::Arc;

/// Deduplicating store of genotype calls
#[derive(Debug, Default)]
pub struct GenotypeArena {
    pool: HashSet<Arc<Genotype>>,
    hits: usize,
}

impl GenotypeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a shared handle for `genotype`
    ///
    /// Equal calls with a different allele order or a different SNP name are
    /// not merged, so call order and the caller's SNP name survive interning.
    pub fn intern(&mut self, genotype: Genotype) -> Arc<Genotype> {
        if let Some(existing) = self.pool.get(&genotype) {
            if existing.allele1() == genotype.allele1()
                && existing.snp().name() == genotype.snp().name()
            {
                self.hits += 1;
                return Arc::clone(existing);
            }
            return Arc::new(genotype);
        }
        let handle = Arc::new(genotype);
        self.pool.insert(Arc::clone(&handle));
        handle
    }

    /// Number of distinct calls stored
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Number of `intern` calls answered with an existing handle
    pub fn hits(&self) -> usize {
        self.hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Snp, Strand};

    fn call(a1: &str, a2: &str) -> Genotype {
        let snp = Snp::new("rs1", "chr1", 10).unwrap();
        Genotype::new(snp, Some(a1), Some(a2), Some(Strand::Plus)).unwrap()
    }

    #[test]
    fn test_equal_calls_share_storage() {
        let mut arena = GenotypeArena::new();
        let a = arena.intern(call("A", "G"));
        let b = arena.intern(call("A", "G"));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.hits(), 1);
    }

    #[test]
    fn test_call_order_preserved() {
        let mut arena = GenotypeArena::new();
        let ag = arena.intern(call("A", "G"));
        let ga = arena.intern(call("G", "A"));
        assert_eq!(ag, ga);
        assert!(!Arc::ptr_eq(&ag, &ga));
        assert_eq!(ga.allele1(), Some("G"));
    }

    #[test]
    fn test_separate_arenas_are_independent() {
        let mut first = GenotypeArena::new();
        let mut second = GenotypeArena::new();
        let a = first.intern(call("C", "C"));
        let b = second.intern(call("C", "C"));
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_snp_name_preserved() {
        let mut arena = GenotypeArena::new();
        let rs = arena.intern(call("A", "G"));
        let affy = Snp::new("SNP_A-1", "chr1", 10).unwrap();
        let other = arena.intern(Genotype::new(affy, Some("A"), Some("G"), Some(Strand::Plus)).unwrap());
        assert_eq!(rs, other);
        assert!(!Arc::ptr_eq(&rs, &other));
        assert_eq!(other.snp().name(), "SNP_A-1");
        assert_eq!(arena.hits(), 0);
    }
}
