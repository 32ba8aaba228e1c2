//! Populations of samples
//!
//! A [`PopulationBuilder`] receives calls from an ingestion adapter one at a
//! time. Sealing it yields a read-only [`Population`] that derives per-locus
//! statistics on demand.

use crate::core::arena::GenotypeArena;
use crate::core::error::{GenotypeError, GenotypeResult};
use crate::core::sample::{make_call, tally};
use crate::core::{AlleleCounter, Sample, Snp, Strand};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

/// A named set of samples and the union of their SNPs
#[derive(Debug, Clone)]
pub struct Population {
    name: String,
    samples: Vec<Sample>,
    sample_index: HashMap<String, usize>,
    snps: Vec<Snp>,
}

impl Population {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Samples in the order they were first referenced
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn sample(&self, name: &str) -> Option<&Sample> {
        self.sample_index.get(name).map(|&i| &self.samples[i])
    }

    /// Every SNP with a call in any sample, in first-seen order
    pub fn snps(&self) -> &[Snp] {
        &self.snps
    }

    /// Every SNP, sorted by locus
    pub fn sorted_snps(&self) -> Vec<Snp> {
        let mut snps = self.snps.clone();
        snps.sort();
        snps
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Tally both alleles of every sample at `snp`
    ///
    /// Samples without a call contribute two missing values. The scan is
    /// fresh every time; nothing is cached.
    ///
    /// # Examples
    /// ```
    /// use genoconv::core::{PopulationBuilder, Snp, Strand};
    ///
    /// let snp = Snp::new("rs1", "chr1", 100).unwrap();
    /// let mut builder = PopulationBuilder::new("CEU");
    /// builder.set_genotype("s1", &snp, Some("A"), Some("A"), Some(Strand::Plus)).unwrap();
    /// builder.set_genotype("s2", &snp, Some("A"), Some("G"), Some(Strand::Plus)).unwrap();
    /// let population = builder.build();
    ///
    /// let stats = population.statistics(&snp);
    /// assert_eq!(stats.minor_allele().unwrap(), "G");
    /// ```
    pub fn statistics(&self, snp: &Snp) -> AlleleCounter {
        tally(&self.samples, snp)
    }

    /// Statistics for every SNP, in [`snps`](Self::snps) order
    ///
    /// Loci are independent, so the scan runs in parallel.
    pub fn all_statistics(&self) -> Vec<(Snp, AlleleCounter)> {
        self.snps
            .par_iter()
            .map(|snp| (snp.clone(), self.statistics(snp)))
            .collect()
    }
}

/// Incremental construction of a [`Population`]
///
/// `build` consumes the builder, so a sealed builder cannot be mutated:
///
/// ```compile_fail
/// use genoconv::core::PopulationBuilder;
///
/// let mut builder = PopulationBuilder::new("CEU");
/// let population = builder.build();
/// builder.add_sample("NA12878");
/// ```
#[derive(Debug)]
pub struct PopulationBuilder {
    name: String,
    samples: Vec<Sample>,
    sample_index: HashMap<String, usize>,
    snps: Vec<Snp>,
    seen: HashSet<Snp>,
    arena: GenotypeArena,
    overwrites: usize,
}

impl PopulationBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            samples: Vec::new(),
            sample_index: HashMap::new(),
            snps: Vec::new(),
            seen: HashSet::new(),
            arena: GenotypeArena::new(),
            overwrites: 0,
        }
    }

    /// Register a sample, keeping its position even if it never gets a call
    pub fn add_sample(&mut self, name: &str) -> GenotypeResult<()> {
        if name.is_empty() {
            return Err(GenotypeError::EmptyName("sample name"));
        }
        self.sample_mut(name);
        Ok(())
    }

    /// Record one call
    ///
    /// The sample is created on first reference. A second call for the same
    /// (sample, SNP) pair replaces the first.
    pub fn set_genotype(
        &mut self,
        sample: &str,
        snp: &Snp,
        allele1: Option<&str>,
        allele2: Option<&str>,
        strand: Option<Strand>,
    ) -> GenotypeResult<()> {
        let genotype = make_call(sample, snp, allele1, allele2, strand)?;
        let handle = self.arena.intern(genotype);
        if self.seen.insert(snp.clone()) {
            self.snps.push(snp.clone());
        }
        if self.sample_mut(sample).insert(snp, handle).is_some() {
            log::debug!("Sample {} overwrites its call at {}", sample, snp);
            self.overwrites += 1;
        }
        Ok(())
    }

    /// Number of calls that replaced an earlier call
    pub fn overwrites(&self) -> usize {
        self.overwrites
    }

    /// Number of calls stored as a handle to an equal earlier call
    pub fn shared_calls(&self) -> usize {
        self.arena.hits()
    }

    /// Seal the builder
    pub fn build(self) -> Population {
        log::debug!(
            "Population {}: {} samples, {} SNPs, {} distinct calls, {} shared",
            self.name,
            self.samples.len(),
            self.snps.len(),
            self.arena.len(),
            self.arena.hits()
        );
        Population {
            name: self.name,
            samples: self.samples,
            sample_index: self.sample_index,
            snps: self.snps,
        }
    }

    fn sample_mut(&mut self, name: &str) -> &mut Sample {
        let index = match self.sample_index.get(name) {
            Some(&i) => i,
            None => {
                self.samples.push(Sample::empty(name));
                self.sample_index.insert(name.to_string(), self.samples.len() - 1);
                self.samples.len() - 1
            }
        };
        &mut self.samples[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snp(pos: i64) -> Snp {
        Snp::new(&format!("rs{}", pos), "chr1", pos).unwrap()
    }

    fn example() -> Population {
        let mut builder = PopulationBuilder::new("test");
        builder
            .set_genotype("s1", &snp(20), Some("A"), Some("G"), Some(Strand::Top))
            .unwrap();
        builder
            .set_genotype("s1", &snp(10), Some("C"), Some("C"), Some(Strand::Top))
            .unwrap();
        builder
            .set_genotype("s2", &snp(20), Some("A"), Some("A"), Some(Strand::Top))
            .unwrap();
        builder.set_genotype("s3", &snp(10), None, None, None).unwrap();
        builder.build()
    }

    #[test]
    fn test_samples_and_snps() {
        let population = example();
        assert_eq!(population.name(), "test");
        assert_eq!(population.len(), 3);
        let names: Vec<_> = population.samples().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["s1", "s2", "s3"]);
        assert_eq!(population.snps(), &[snp(20), snp(10)]);
        assert_eq!(population.sorted_snps(), vec![snp(10), snp(20)]);
        assert!(population.sample("s4").is_none());
    }

    #[test]
    fn test_statistics_counts_absent_calls_as_missing() {
        let population = example();
        let stats = population.statistics(&snp(20));
        assert_eq!(stats.frequency("A").unwrap(), 3);
        assert_eq!(stats.frequency("G").unwrap(), 1);
        // s3 has no call at rs20
        assert_eq!(stats.missing_count(), 2);
        assert_eq!(stats.minor_allele().unwrap(), "G");

        let stats = population.statistics(&snp(10));
        assert!(stats.is_monomorphic());
        // s2 absent, s3 missing
        assert_eq!(stats.missing_count(), 4);
    }

    #[test]
    fn test_all_statistics_order() {
        let population = example();
        let all = population.all_statistics();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].0, snp(20));
        assert_eq!(all[0].1, population.statistics(&snp(20)));
    }

    #[test]
    fn test_overwrite_counts() {
        let mut builder = PopulationBuilder::new("p");
        builder
            .set_genotype("s1", &snp(1), Some("A"), Some("A"), Some(Strand::Plus))
            .unwrap();
        builder
            .set_genotype("s1", &snp(1), Some("G"), Some("G"), Some(Strand::Plus))
            .unwrap();
        assert_eq!(builder.overwrites(), 1);
        let population = builder.build();
        let g = population.sample("s1").unwrap().genotype(&snp(1)).unwrap();
        assert_eq!(g.allele1(), Some("G"));
        assert_eq!(population.snps().len(), 1);
    }

    #[test]
    fn test_rejected_call_leaves_builder_unchanged() {
        let mut builder = PopulationBuilder::new("p");
        assert!(builder
            .set_genotype("s1", &snp(1), Some("A"), Some("A"), None)
            .is_err());
        let population = builder.build();
        assert!(population.is_empty());
        assert!(population.snps().is_empty());
    }

    #[test]
    fn test_add_sample_without_calls() {
        let mut builder = PopulationBuilder::new("p");
        builder.add_sample("empty").unwrap();
        assert!(builder.add_sample("").is_err());
        let population = builder.build();
        assert!(population.sample("empty").unwrap().is_empty());
    }

    #[test]
    fn test_snp_names_kept_per_sample() {
        let s = Some(Strand::Plus);
        let rs = Snp::new("rs20", "chr1", 20).unwrap();
        let affy = Snp::new("SNP_A-20", "chr1", 20).unwrap();
        let mut builder = PopulationBuilder::new("mixed");
        builder.set_genotype("a", &rs, Some("A"), Some("G"), s).unwrap();
        builder.set_genotype("b", &affy, Some("A"), Some("G"), s).unwrap();
        assert_eq!(builder.shared_calls(), 0);
        let population = builder.build();

        let b = population.sample("b").unwrap();
        assert_eq!(b.genotype(&rs).unwrap().snp().name(), "SNP_A-20");
        let names: Vec<_> = b.snps().map(|snp| snp.name()).collect();
        assert_eq!(names, vec!["SNP_A-20"]);
        assert_eq!(population.snps().len(), 1);
    }

    #[test]
    fn test_shared_calls() {
        let s = Some(Strand::Plus);
        let rs = Snp::new("rs20", "chr1", 20).unwrap();
        let mut builder = PopulationBuilder::new("p");
        for sample in ["a", "b", "c"] {
            builder.set_genotype(sample, &rs, Some("A"), Some("A"), s).unwrap();
        }
        assert_eq!(builder.shared_calls(), 2);
    }
}
