//! Per-locus allele tallies
//!
//! An [`AlleleCounter`] is built by scanning the genotypes observed at one
//! locus. It classifies the locus (monomorphic, biallelic, strand-ambiguous)
//! and identifies the minor allele when one is defined.

use crate::core::dna;
use crate::core::error::{QueryError, QueryResult};
use std::collections::BTreeMap;

/// Allele frequencies and missing-value count at one locus
///
/// Alleles are kept in lexicographic order so every query is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlleleCounter {
    counts: BTreeMap<String, usize>,
    missing: usize,
}

impl AlleleCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one allele observation; `None` is a missing value
    pub fn add_allele(&mut self, allele: Option<&str>) {
        match allele {
            Some(allele) => match self.counts.get_mut(allele) {
                Some(count) => *count += 1,
                None => {
                    self.counts.insert(allele.to_string(), 1);
                }
            },
            None => self.missing += 1,
        }
    }

    /// Add every tally of another counter to this one
    pub fn merge(&mut self, other: &AlleleCounter) {
        for (allele, count) in &other.counts {
            *self.counts.entry(allele.clone()).or_insert(0) += count;
        }
        self.missing += other.missing;
    }

    /// Number of times `allele` was counted
    pub fn frequency(&self, allele: &str) -> QueryResult<usize> {
        self.counts
            .get(allele)
            .copied()
            .ok_or_else(|| QueryError::UnknownAllele(allele.to_string()))
    }

    /// Frequency of `allele` among all non-missing observations
    ///
    /// # Examples
    /// ```
    /// use genoconv::core::AlleleCounter;
    ///
    /// let mut counter = AlleleCounter::new();
    /// for allele in ["A", "A", "A", "B", "B"] {
    ///     counter.add_allele(Some(allele));
    /// }
    /// counter.add_allele(None);
    /// assert_eq!(counter.relative_frequency("B").unwrap(), 0.4);
    /// ```
    pub fn relative_frequency(&self, allele: &str) -> QueryResult<f64> {
        let frequency = self.frequency(allele)?;
        Ok(frequency as f64 / self.total_count() as f64)
    }

    /// Number of missing observations
    pub fn missing_count(&self) -> usize {
        self.missing
    }

    /// Number of non-missing observations
    pub fn total_count(&self) -> usize {
        self.counts.values().sum()
    }

    /// Distinct alleles in lexicographic order
    pub fn alleles(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Alleles with their counts, in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(a, c)| (a.as_str(), *c))
    }

    pub fn contains(&self, allele: &str) -> bool {
        self.counts.contains_key(allele)
    }

    pub fn distinct_alleles(&self) -> usize {
        self.counts.len()
    }

    /// True if no allele has been counted
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// True iff at least two alleles were counted and one has a strictly
    /// lower frequency than every other
    pub fn exists_minor_allele(&self) -> bool {
        self.find_minor_allele().is_some()
    }

    /// The unique minimum-frequency allele
    ///
    /// # Examples
    /// ```
    /// use genoconv::core::AlleleCounter;
    ///
    /// let mut counter = AlleleCounter::new();
    /// for allele in ["A", "A", "B", "B"] {
    ///     counter.add_allele(Some(allele));
    /// }
    /// assert!(!counter.exists_minor_allele());
    /// assert!(counter.minor_allele().is_err());
    /// ```
    pub fn minor_allele(&self) -> QueryResult<&str> {
        self.find_minor_allele().ok_or(QueryError::NoMinorAllele)
    }

    /// The most frequent allele
    ///
    /// Ties are broken in favour of the lexicographically smallest allele.
    pub fn major_allele(&self) -> QueryResult<&str> {
        let mut best: Option<(&str, usize)> = None;
        for (allele, count) in self.iter() {
            match best {
                Some((_, c)) if c >= count => {}
                _ => best = Some((allele, count)),
            }
        }
        best.map(|(allele, _)| allele).ok_or(QueryError::NoAlleles)
    }

    pub fn is_monomorphic(&self) -> bool {
        self.counts.len() == 1
    }

    pub fn is_biallelic(&self) -> bool {
        self.counts.len() == 2
    }

    /// True for a biallelic locus whose alleles are {A,T} or {C,G}
    pub fn is_ambiguous(&self) -> bool {
        if !self.is_biallelic() {
            return false;
        }
        let mut alleles = self.alleles();
        match (alleles.next(), alleles.next()) {
            (Some(a), Some(b)) => dna::is_strand_ambiguous(a, b),
            _ => false,
        }
    }

    fn find_minor_allele(&self) -> Option<&str> {
        if self.counts.len() < 2 {
            return None;
        }
        let min = self.counts.values().copied().min()?;
        let mut at_min = self.iter().filter(|(_, count)| *count == min);
        match (at_min.next(), at_min.next()) {
            (Some((allele, _)), None) => Some(allele),
            _ => None,
        }
    }
}

impl<'a> FromIterator<Option<&'a str>> for AlleleCounter {
    fn from_iter<I: IntoIterator<Item = Option<&'a str>>>(iter: I) -> Self {
        let mut counter = AlleleCounter::new();
        for allele in iter {
            counter.add_allele(allele);
        }
        counter
    }
}
