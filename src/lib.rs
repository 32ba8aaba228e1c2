//! Genoconv - genotype data model and allele recoding engine
//!
//! Ingests genotype tables, computes per-locus allele statistics and recodes
//! alleles to `0`/`1` for haplotype-oriented output formats.
//!
//! # Features
//!
//! - SNP identity by locus, so differently named sources join on position
//! - Unphased genotype equality with strand sensitivity
//! - Minor-allele and reference-sample legends
//! - Streaming legend construction that quarantines multi-allelic SNPs
//!
//! # Example
//!
//! ```
//! use genoconv::{Legend, LegendBuilder, PopulationBuilder, Snp, Strand};
//!
//! let snp = Snp::new("rs1", "chr1", 100)?;
//! let mut builder = PopulationBuilder::new("CEU");
//! builder.set_genotype("NA06985", &snp, Some("A"), Some("G"), Some(Strand::Top))?;
//! builder.set_genotype("NA06991", &snp, Some("A"), Some("A"), Some(Strand::Top))?;
//! let population = builder.build();
//!
//! let legend = Legend::minor_allele(LegendBuilder::from_population(&population));
//! assert_eq!(legend.allele1(&snp)?, Some("G"));
//! # Ok::<(), genoconv::GenoconvError>(())
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use core::{
    AlleleCounter, AllelePair, GenoconvError, Genotype, GenotypeError, Legend, LegendBuilder,
    Locus, MinorAlleleStrategy, Population, PopulationBuilder, QueryError, RecodingStrategy,
    ReferenceSampleStrategy, Sample, SampleBuilder, Snp, Strand,
};
pub use formats::{hapmap, haps, legend};
