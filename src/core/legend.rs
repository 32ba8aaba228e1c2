//! Allele recoding legends
//!
//! A [`Legend`] maps each SNP to an `(allele0, allele1)` pair so haplotype
//! writers can emit `0`/`1` codes. Legends are built in two steps:
//!
//! 1. A [`LegendBuilder`] streams allele observations into one
//!    [`AlleleCounter`] per SNP. A SNP that shows more than two distinct
//!    alleles is moved to a bad set the moment it crosses the threshold and
//!    stays there.
//! 2. [`LegendBuilder::build`] consumes the builder and asks a
//!    [`RecodingStrategy`] for the pair of every SNP still in the good set.
//!
//! The finished legend owns its entries and is independent of the data it was
//! counted from.

use crate::core::error::{GenotypeResult, QueryError, QueryResult};
use crate::core::{AlleleCounter, Genotype, Locus, Population, Sample, Snp};
use crate::core::sample::tally;
use crate::formats::legend::LegendRecord;
use rayon::prelude::*;
use std::collections::HashMap;
use std::io::{self, Write};

/// The two alleles a legend assigns to codes `0` and `1`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllelePair {
    pub allele0: Option<String>,
    pub allele1: Option<String>,
}

impl AllelePair {
    pub fn new(allele0: Option<&str>, allele1: Option<&str>) -> Self {
        Self {
            allele0: allele0.map(str::to_string),
            allele1: allele1.map(str::to_string),
        }
    }

    /// True when both codes are assigned
    pub fn is_codable(&self) -> bool {
        self.allele0.is_some() && self.allele1.is_some()
    }
}

/// Turns the tally of one good SNP into a legend entry
///
/// Returning `None` leaves the SNP out of the legend.
pub trait RecodingStrategy {
    fn recode(&self, snp: &Snp, counter: &AlleleCounter) -> Option<AllelePair>;
}

/// Major allele as `0`, minor allele as `1`
///
/// - no alleles observed: no entry
/// - monomorphic: `(allele, -)`
/// - biallelic with a minor allele: `(major, minor)`
/// - biallelic tie: `(smaller allele, -)`; the SNP is not `0`/`1` codable
#[derive(Debug, Clone, Copy, Default)]
pub struct MinorAlleleStrategy;

impl RecodingStrategy for MinorAlleleStrategy {
    fn recode(&self, _snp: &Snp, counter: &AlleleCounter) -> Option<AllelePair> {
        if counter.is_empty() || counter.distinct_alleles() > 2 {
            return None;
        }
        let major = counter.major_allele().ok();
        let minor = counter.minor_allele().ok();
        Some(AllelePair::new(major, minor))
    }
}

/// Reference sample's first-haplotype allele as `1`, the other allele as `0`
///
/// Input is assumed to be phased; this is not checked. SNPs where the
/// reference sample has no call, or calls an allele the counter never saw,
/// are left out.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceSampleStrategy<'a> {
    sample: &'a Sample,
}

impl<'a> ReferenceSampleStrategy<'a> {
    pub fn new(sample: &'a Sample) -> Self {
        Self { sample }
    }

    pub fn sample(&self) -> &Sample {
        self.sample
    }

    /// The reference sample's first-haplotype allele at `snp`
    pub fn reference_allele(&self, snp: &Snp) -> QueryResult<&'a str> {
        self.sample
            .genotype(snp)
            .and_then(Genotype::allele1)
            .ok_or_else(|| QueryError::NoReferenceCall {
                sample: self.sample.name().to_string(),
                snp: snp.to_string(),
            })
    }
}

impl RecodingStrategy for ReferenceSampleStrategy<'_> {
    fn recode(&self, snp: &Snp, counter: &AlleleCounter) -> Option<AllelePair> {
        let reference = self.reference_allele(snp).ok()?;
        if !counter.contains(reference) {
            log::warn!(
                "Reference allele {} at {} was not observed in the counted samples",
                reference,
                snp
            );
            return None;
        }
        match counter.distinct_alleles() {
            1 => Some(AllelePair::new(None, Some(reference))),
            2 => {
                let other = counter.alleles().find(|a| *a != reference);
                Some(AllelePair::new(other, Some(reference)))
            }
            _ => None,
        }
    }
}

/// Streaming allele counts with multi-allelic quarantine
///
/// ```
/// use genoconv::core::{Legend, LegendBuilder, Snp};
///
/// let snp = Snp::new("rs1", "chr1", 100).unwrap();
/// let mut builder = LegendBuilder::new();
/// for allele in ["G", "A", "C", "C"] {
///     builder.count_allele(&snp, Some(allele));
/// }
/// let legend = Legend::minor_allele(builder);
/// assert!(!legend.contains(&snp));
/// assert_eq!(legend.alleles_for_bad_snp(&snp).unwrap().len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct LegendBuilder {
    order: Vec<Snp>,
    good: HashMap<Snp, AlleleCounter>,
    bad: HashMap<Snp, AlleleCounter>,
}

impl LegendBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every call of the given samples at the given SNPs
    ///
    /// A sample without a call at a SNP counts as two missing values.
    pub fn from_samples<'a, I>(samples: I, snps: &[Snp]) -> Self
    where
        I: IntoIterator<Item = &'a Sample>,
    {
        let samples: Vec<&Sample> = samples.into_iter().collect();
        let tallies: Vec<AlleleCounter> = snps
            .par_iter()
            .map(|snp| tally(samples.iter().copied(), snp))
            .collect();
        let mut builder = Self::new();
        for (snp, counts) in snps.iter().zip(&tallies) {
            builder.count_tally(snp, counts);
        }
        builder
    }

    /// Count every call in the population, SNPs in first-seen order
    pub fn from_population(population: &Population) -> Self {
        Self::from_samples(population.samples(), population.snps())
    }

    /// Count one allele observation at `snp`
    ///
    /// Never fails: a SNP that reaches a third distinct allele is moved to
    /// the bad set, and all later counts for it land there.
    pub fn count_allele(&mut self, snp: &Snp, allele: Option<&str>) {
        if let Some(counter) = self.bad.get_mut(snp) {
            counter.add_allele(allele);
            return;
        }
        self.good_counter(snp).add_allele(allele);
        self.quarantine_if_multiallelic(snp);
    }

    /// Fold a whole tally for `snp` into its counter
    ///
    /// Same quarantine rule as [`count_allele`](Self::count_allele).
    pub fn count_tally(&mut self, snp: &Snp, counts: &AlleleCounter) {
        if let Some(counter) = self.bad.get_mut(snp) {
            counter.merge(counts);
            return;
        }
        self.good_counter(snp).merge(counts);
        self.quarantine_if_multiallelic(snp);
    }

    fn good_counter(&mut self, snp: &Snp) -> &mut AlleleCounter {
        if !self.good.contains_key(snp) {
            self.order.push(snp.clone());
        }
        self.good.entry(snp.clone()).or_default()
    }

    fn quarantine_if_multiallelic(&mut self, snp: &Snp) {
        let multiallelic = self
            .good
            .get(snp)
            .is_some_and(|counter| counter.distinct_alleles() > 2);
        if !multiallelic {
            return;
        }
        if let Some(counter) = self.good.remove(snp) {
            log::debug!(
                "Quarantining {}: {} distinct alleles",
                snp,
                counter.distinct_alleles()
            );
            self.bad.insert(snp.clone(), counter);
        }
    }

    /// Count both alleles of a call
    pub fn count_genotype(&mut self, genotype: &Genotype) {
        self.count_allele(genotype.snp(), genotype.allele1());
        self.count_allele(genotype.snp(), genotype.allele2());
    }

    /// SNPs with at most two distinct alleles, in first-counted order
    pub fn good_snps(&self) -> impl Iterator<Item = &Snp> {
        self.order.iter().filter(|snp| self.good.contains_key(*snp))
    }

    /// Quarantined SNPs, in first-counted order
    pub fn bad_snps(&self) -> impl Iterator<Item = &Snp> {
        self.order.iter().filter(|snp| self.bad.contains_key(*snp))
    }

    pub fn is_bad(&self, snp: &Snp) -> bool {
        self.bad.contains_key(snp)
    }

    /// The counter of a SNP, good or bad
    pub fn counter(&self, snp: &Snp) -> Option<&AlleleCounter> {
        self.good.get(snp).or_else(|| self.bad.get(snp))
    }

    /// Number of SNPs seen
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Seal the builder into a legend
    pub fn build<S: RecodingStrategy + ?Sized>(self, strategy: &S) -> Legend {
        let mut legend = Legend::default();
        for snp in self.order {
            if let Some(counter) = self.good.get(&snp) {
                if let Some(pair) = strategy.recode(&snp, counter) {
                    legend.insert(snp, pair);
                }
            } else if let Some(counter) = self.bad.get(&snp) {
                let alleles = counter.alleles().map(str::to_string).collect();
                legend.bad.insert(snp.clone(), alleles);
                legend.bad_order.push(snp);
            }
        }
        log::debug!(
            "Legend built: {} SNPs, {} quarantined",
            legend.len(),
            legend.bad_order.len()
        );
        legend
    }
}

/// Per-SNP recoding of alleles to `0`/`1`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Legend {
    order: Vec<Snp>,
    entries: HashMap<Snp, AllelePair>,
    bad_order: Vec<Snp>,
    bad: HashMap<Snp, Vec<String>>,
}

impl Legend {
    /// Build with [`MinorAlleleStrategy`]
    pub fn minor_allele(builder: LegendBuilder) -> Self {
        builder.build(&MinorAlleleStrategy)
    }

    /// Build with [`ReferenceSampleStrategy`]
    pub fn reference_sample(builder: LegendBuilder, reference: &Sample) -> Self {
        builder.build(&ReferenceSampleStrategy::new(reference))
    }

    /// Rebuild a legend from parsed legend text
    ///
    /// Legend files carry no chromosome, so the caller supplies it and every
    /// record is placed on it; a file must therefore hold a single chromosome,
    /// as [`write_legend`](crate::formats::legend::write_legend) guarantees. A
    /// record repeating an earlier position replaces it.
    pub fn from_records<I>(chromosome: &str, records: I) -> GenotypeResult<Self>
    where
        I: IntoIterator<Item = LegendRecord>,
    {
        let mut legend = Legend::default();
        for record in records {
            let snp = Snp::at(&record.name, Locus::from_unsigned(chromosome, record.position)?)?;
            legend.insert(
                snp,
                AllelePair {
                    allele0: record.allele0,
                    allele1: record.allele1,
                },
            );
        }
        Ok(legend)
    }

    fn insert(&mut self, snp: Snp, pair: AllelePair) {
        if self.entries.insert(snp.clone(), pair).is_none() {
            self.order.push(snp);
        }
    }

    /// SNPs with an entry, in insertion order
    pub fn snps(&self) -> &[Snp] {
        &self.order
    }

    pub fn contains(&self, snp: &Snp) -> bool {
        self.entries.contains_key(snp)
    }

    pub fn entry(&self, snp: &Snp) -> Option<&AllelePair> {
        self.entries.get(snp)
    }

    /// Allele coded as `0`
    pub fn allele0(&self, snp: &Snp) -> QueryResult<Option<&str>> {
        Ok(self.require(snp)?.allele0.as_deref())
    }

    /// Allele coded as `1`
    pub fn allele1(&self, snp: &Snp) -> QueryResult<Option<&str>> {
        Ok(self.require(snp)?.allele1.as_deref())
    }

    /// Code of `allele` at `snp`: `'0'`, `'1'`, or `None` if it has no code
    ///
    /// # Examples
    /// ```
    /// use genoconv::core::{Legend, LegendBuilder, Snp};
    ///
    /// let snp = Snp::new("rs1", "chr1", 100).unwrap();
    /// let mut builder = LegendBuilder::new();
    /// for allele in ["A", "A", "A", "G"] {
    ///     builder.count_allele(&snp, Some(allele));
    /// }
    /// let legend = Legend::minor_allele(builder);
    /// assert_eq!(legend.encode(&snp, "A"), Some('0'));
    /// assert_eq!(legend.encode(&snp, "G"), Some('1'));
    /// assert_eq!(legend.encode(&snp, "T"), None);
    /// ```
    pub fn encode(&self, snp: &Snp, allele: &str) -> Option<char> {
        let pair = self.entries.get(snp)?;
        if pair.allele0.as_deref() == Some(allele) {
            Some('0')
        } else if pair.allele1.as_deref() == Some(allele) {
            Some('1')
        } else {
            None
        }
    }

    /// Quarantined SNPs, in first-counted order
    pub fn bad_snps(&self) -> &[Snp] {
        &self.bad_order
    }

    /// Every allele observed at a quarantined SNP, sorted
    pub fn alleles_for_bad_snp(&self, snp: &Snp) -> QueryResult<&[String]> {
        self.bad
            .get(snp)
            .map(Vec::as_slice)
            .ok_or_else(|| QueryError::NotQuarantined(snp.to_string()))
    }

    /// Number of SNPs with an entry
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Write the legend text format
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        crate::formats::legend::write_legend(self, writer)
    }

    fn require(&self, snp: &Snp) -> QueryResult<&AllelePair> {
        self.entries
            .get(snp)
            .ok_or_else(|| QueryError::SnpNotInLegend(snp.to_string()))
    }
}
