//! Genotype data model and allele recoding engine
//!
//! This module contains the SNP and genotype value types, the sample and
//! population aggregates, per-locus allele statistics and legend building.

mod arena;
mod counter;
pub mod dna;
mod error;
mod genotype;
pub mod io;
mod legend;
mod locus;
mod population;
mod sample;

pub use arena::GenotypeArena;
pub use counter::AlleleCounter;
pub use error::{
    GenoconvError, GenotypeError, GenotypeResult, QueryError, QueryResult, Result,
};
pub use genotype::{is_valid_allele, Genotype, Strand};
pub use io::{create_output, detect_compression, open_input, CompressionFormat};
pub use legend::{
    AllelePair, Legend, LegendBuilder, MinorAlleleStrategy, RecodingStrategy,
    ReferenceSampleStrategy,
};
pub use locus::{Locus, Snp};
pub use population::{Population, PopulationBuilder};
pub use sample::{Sample, SampleBuilder};
