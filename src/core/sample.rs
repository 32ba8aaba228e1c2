//! Samples and their genotype calls

use crate::core::arena::GenotypeArena;
use crate::core::error::{GenotypeError, GenotypeResult};
use crate::core::{AlleleCounter, Genotype, Snp, Strand};
use std::collections::HashMap;
use std::sync::Arc;

/// One individual's calls, keyed by SNP
///
/// Read-only once built; see [`SampleBuilder`] and
/// [`PopulationBuilder`](crate::core::PopulationBuilder).
#[derive(Debug, Clone)]
pub struct Sample {
    name: String,
    genotypes: HashMap<Snp, Arc<Genotype>>,
}

impl Sample {
    pub(crate) fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            genotypes: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn genotype(&self, snp: &Snp) -> Option<&Genotype> {
        self.genotypes.get(snp).map(|g| g.as_ref())
    }

    pub fn exists_genotype(&self, snp: &Snp) -> bool {
        self.genotypes.contains_key(snp)
    }

    /// SNPs with a call (missing calls included), in no particular order
    pub fn snps(&self) -> impl Iterator<Item = &Snp> {
        self.genotypes.keys()
    }

    pub fn genotypes(&self) -> impl Iterator<Item = &Genotype> {
        self.genotypes.values().map(|g| g.as_ref())
    }

    /// Number of SNPs with a call
    pub fn len(&self) -> usize {
        self.genotypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genotypes.is_empty()
    }

    /// Store a call under the caller's SNP, replacing any call at that locus
    pub(crate) fn insert(&mut self, snp: &Snp, genotype: Arc<Genotype>) -> Option<Arc<Genotype>> {
        let previous = self.genotypes.remove(snp);
        self.genotypes.insert(snp.clone(), genotype);
        previous
    }
}

/// Validate one call pushed by an ingestion adapter
///
/// Called alleles need a strand; a fully missing call must not report one.
pub(crate) fn make_call(
    sample: &str,
    snp: &Snp,
    allele1: Option<&str>,
    allele2: Option<&str>,
    strand: Option<Strand>,
) -> GenotypeResult<Genotype> {
    if sample.is_empty() {
        return Err(GenotypeError::EmptyName("sample name"));
    }
    let called = allele1.is_some() || allele2.is_some();
    if called && strand.is_none() {
        return Err(GenotypeError::MissingStrand {
            sample: sample.to_string(),
            snp: snp.to_string(),
        });
    }
    if !called && strand.is_some() {
        return Err(GenotypeError::StrandOnMissingCall {
            sample: sample.to_string(),
            snp: snp.to_string(),
        });
    }
    Genotype::new(snp.clone(), allele1, allele2, strand)
}

/// Tally both alleles of every sample at `snp`
///
/// A sample without a call contributes two missing values.
pub(crate) fn tally<'a, I>(samples: I, snp: &Snp) -> AlleleCounter
where
    I: IntoIterator<Item = &'a Sample>,
{
    let mut counter = AlleleCounter::new();
    for sample in samples {
        match sample.genotype(snp) {
            Some(genotype) => {
                counter.add_allele(genotype.allele1());
                counter.add_allele(genotype.allele2());
            }
            None => {
                counter.add_allele(None);
                counter.add_allele(None);
            }
        }
    }
    counter
}

/// Incremental construction of a standalone [`Sample`]
///
/// `build` consumes the builder, so a sealed builder cannot be mutated:
///
/// ```compile_fail
/// use genoconv::core::SampleBuilder;
///
/// let mut builder = SampleBuilder::new("NA12878").unwrap();
/// let sample = builder.build();
/// builder.add_missing(genoconv::core::Snp::new("rs1", "chr1", 1).unwrap());
/// ```
#[derive(Debug)]
pub struct SampleBuilder {
    sample: Sample,
    arena: GenotypeArena,
}

impl SampleBuilder {
    pub fn new(name: &str) -> GenotypeResult<Self> {
        if name.is_empty() {
            return Err(GenotypeError::EmptyName("sample name"));
        }
        Ok(Self {
            sample: Sample::empty(name),
            arena: GenotypeArena::new(),
        })
    }

    /// Record a call; a second call for the same SNP replaces the first
    pub fn set_genotype(
        &mut self,
        snp: &Snp,
        allele1: Option<&str>,
        allele2: Option<&str>,
        strand: Option<Strand>,
    ) -> GenotypeResult<&mut Self> {
        let genotype = make_call(&self.sample.name, snp, allele1, allele2, strand)?;
        self.sample.insert(snp, self.arena.intern(genotype));
        Ok(self)
    }

    /// Record a missing call
    pub fn add_missing(&mut self, snp: Snp) -> &mut Self {
        let genotype = Genotype::missing(snp.clone(), None);
        self.sample.insert(&snp, self.arena.intern(genotype));
        self
    }

    /// Seal the builder
    pub fn build(self) -> Sample {
        self.sample
    }
}
