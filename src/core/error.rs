//! Error types for genoconv
//!
//! Defines all error types used throughout the library.

use thiserror::Error;

/// Main error type for genoconv operations
#[derive(Debug, Error)]
pub enum GenoconvError {
    /// Invalid construction input
    #[error("Genotype error: {0}")]
    Genotype(#[from] GenotypeError),

    /// Undefined query against a counter or legend
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// Legend text parsing errors
    #[error("Legend parse error: {0}")]
    LegendParse(#[from] crate::formats::legend::LegendParseError),

    /// HapMap parsing errors
    #[error("HapMap parse error: {0}")]
    HapMapParse(#[from] crate::formats::hapmap::HapMapParseError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while constructing loci, SNPs, genotypes and samples
///
/// These are programmer errors at the ingestion boundary: the caller handed
/// the core a value it cannot represent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenotypeError {
    /// Negative genomic position
    #[error("Invalid position {0}: positions must be >= 0")]
    InvalidPosition(i64),

    /// Empty SNP name, chromosome or sample name
    #[error("Empty {0}")]
    EmptyName(&'static str),

    /// Exactly one of the two alleles is missing
    #[error("Half-missing genotype at {snp}: both alleles must be present or both missing")]
    HalfMissing { snp: String },

    /// Allele that cannot be written back unchanged (empty, `-`, whitespace)
    #[error("Invalid allele '{allele}' at {snp}")]
    InvalidAllele { snp: String, allele: String },

    /// A called genotype without a strand
    #[error("Genotype at {snp} for sample {sample} has alleles but no strand")]
    MissingStrand { sample: String, snp: String },

    /// A fully missing call that still reports a strand
    #[error("Missing genotype at {snp} for sample {sample} must not carry a strand")]
    StrandOnMissingCall { sample: String, snp: String },

    /// Unrecognized strand token
    #[error("Unknown strand '{0}'")]
    UnknownStrand(String),
}

/// Errors raised by queries that are undefined for the current data
///
/// Callers are expected to check the matching existence predicate first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Allele was never counted
    #[error("Allele '{0}' was never counted")]
    UnknownAllele(String),

    /// No unique strict minimum frequency
    #[error("No minor allele defined")]
    NoMinorAllele,

    /// No allele counted at all
    #[error("No alleles counted")]
    NoAlleles,

    /// SNP has no legend entry
    #[error("SNP {0} is not in the legend")]
    SnpNotInLegend(String),

    /// SNP is not in the bad set
    #[error("SNP {0} is not quarantined")]
    NotQuarantined(String),

    /// Reference sample has no call at the SNP
    #[error("Reference sample {sample} has no genotype at {snp}")]
    NoReferenceCall { sample: String, snp: String },
}

/// Result type alias for genoconv operations
pub type Result<T> = std::result::Result<T, GenoconvError>;

/// Result type alias for construction operations
pub type GenotypeResult<T> = std::result::Result<T, GenotypeError>;

/// Result type alias for query operations
pub type QueryResult<T> = std::result::Result<T, QueryError>;
