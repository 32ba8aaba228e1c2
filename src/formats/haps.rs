//! HapGen / IMPUTE haplotype writer
//!
//! One line per legend SNP, two codes per sample (first then second
//! haplotype), `-` where a call is missing or an allele has no code.

use crate::core::{Legend, Population};
use std::io::{self, Write};

/// Code written for a missing or uncodable allele
pub const MISSING_CODE: char = '-';

/// Haplotype writing statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HapsStats {
    pub snps: usize,
    pub coded: usize,
    pub missing: usize,
}

/// Write the `.haps` matrix for every SNP in `legend`
///
/// # Examples
/// ```
/// use genoconv::core::{Legend, LegendBuilder, PopulationBuilder, Snp, Strand};
/// use genoconv::formats::haps::write_haps;
///
/// let snp = Snp::new("rs1", "chr1", 100).unwrap();
/// let mut builder = PopulationBuilder::new("CEU");
/// builder.set_genotype("s1", &snp, Some("A"), Some("G"), Some(Strand::Plus)).unwrap();
/// builder.set_genotype("s2", &snp, Some("A"), Some("A"), Some(Strand::Plus)).unwrap();
/// let population = builder.build();
/// let legend = Legend::minor_allele(LegendBuilder::from_population(&population));
///
/// let mut out = Vec::new();
/// write_haps(&population, &legend, &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "0 1 0 0\n");
/// ```
pub fn write_haps<W: Write>(
    population: &Population,
    legend: &Legend,
    writer: &mut W,
) -> io::Result<HapsStats> {
    let mut stats = HapsStats::default();
    let mut line = String::with_capacity(population.len() * 4);

    for snp in legend.snps() {
        line.clear();
        for sample in population.samples() {
            let alleles = match sample.genotype(snp) {
                Some(genotype) => genotype.alleles(),
                None => [None, None],
            };
            for allele in alleles {
                let code = allele
                    .and_then(|a| legend.encode(snp, a))
                    .unwrap_or(MISSING_CODE);
                if code == MISSING_CODE {
                    stats.missing += 1;
                } else {
                    stats.coded += 1;
                }
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push(code);
            }
        }
        writeln!(writer, "{}", line)?;
        stats.snps += 1;
    }

    Ok(stats)
}

/// Write sample names, one per line, in haplotype column order
pub fn write_samples<W: Write>(population: &Population, writer: &mut W) -> io::Result<()> {
    for sample in population.samples() {
        writeln!(writer, "{}", sample.name())?;
    }
    Ok(())
}
