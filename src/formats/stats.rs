//! Per-locus allele statistics report

use crate::core::{AlleleCounter, Population};
use std::io::{self, Write};

/// Header line of the statistics report
pub const STATS_HEADER: &str = "rs chrom position alleles missing minor maf class";

/// Classification of a locus by its distinct alleles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocusClass {
    Empty,
    Monomorphic,
    Biallelic,
    /// Biallelic {A,T} or {C,G}
    Ambiguous,
    Multiallelic,
}

impl LocusClass {
    pub fn of(counter: &AlleleCounter) -> Self {
        if counter.is_empty() {
            LocusClass::Empty
        } else if counter.is_monomorphic() {
            LocusClass::Monomorphic
        } else if counter.is_ambiguous() {
            LocusClass::Ambiguous
        } else if counter.is_biallelic() {
            LocusClass::Biallelic
        } else {
            LocusClass::Multiallelic
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LocusClass::Empty => "empty",
            LocusClass::Monomorphic => "monomorphic",
            LocusClass::Biallelic => "biallelic",
            LocusClass::Ambiguous => "ambiguous",
            LocusClass::Multiallelic => "multiallelic",
        }
    }
}

/// Write one report line per SNP, in locus order
///
/// `alleles` lists `allele:count` pairs; `minor` and `maf` are `-` when no
/// minor allele is defined.
pub fn write_stats<W: Write>(population: &Population, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}", STATS_HEADER)?;
    let mut all = population.all_statistics();
    all.sort_by(|a, b| a.0.cmp(&b.0));

    for (snp, counter) in &all {
        let alleles = if counter.is_empty() {
            "-".to_string()
        } else {
            counter
                .iter()
                .map(|(allele, count)| format!("{}:{}", allele, count))
                .collect::<Vec<_>>()
                .join(",")
        };
        let (minor, maf) = match counter.minor_allele() {
            Ok(minor) => {
                let maf = counter.relative_frequency(minor).unwrap_or(0.0);
                (minor.to_string(), format!("{:.4}", maf))
            }
            Err(_) => ("-".to_string(), "-".to_string()),
        };
        writeln!(
            writer,
            "{} {} {} {} {} {} {} {}",
            snp.name(),
            snp.chromosome(),
            snp.position(),
            alleles,
            counter.missing_count(),
            minor,
            maf,
            LocusClass::of(counter).as_str()
        )?;
    }
    Ok(())
}
