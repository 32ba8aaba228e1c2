//! HapMap genotype format adapter
//!
//! Whitespace-delimited table with eleven fixed columns followed by one
//! column per sample. Calls are two characters, `NN` marks a missing call:
//!
//! ```text
//! rs# alleles chrom pos strand assembly# center protLSID assayLSID panelLSID QCcode NA06985 NA06991
//! rs10399749 C/T chr1 45162 + ncbi_b36 perlegen urn:lsid urn:lsid urn:lsid QC+ CC CT
//! ```

use crate::core::{is_valid_allele, GenotypeError, Population, PopulationBuilder, Snp, Strand};
use std::io::{self, BufRead};

/// Number of columns before the first sample column
pub const FIXED_COLUMNS: usize = 11;

/// Character marking a missing allele in a call
pub const MISSING_ALLELE: char = 'N';

/// One parsed HapMap data row
#[derive(Debug, Clone, PartialEq)]
pub struct HapMapRecord {
    pub snp: Snp,
    /// Declared alleles, e.g. `A/G`
    pub alleles: String,
    pub strand: Strand,
    /// One call per sample, in header order; `None` is missing
    pub calls: Vec<Option<(String, String)>>,
}

impl HapMapRecord {
    /// Parse a data row expecting `samples` call columns
    pub fn parse(line: &str, samples: usize) -> Result<Self, HapMapParseError> {
        let fields: Vec<&str> = line.split_ascii_whitespace().collect();
        if fields.is_empty() {
            return Err(HapMapParseError::EmptyLine);
        }
        if fields.len() != FIXED_COLUMNS + samples {
            return Err(HapMapParseError::FieldCount {
                expected: FIXED_COLUMNS + samples,
                found: fields.len(),
            });
        }

        let position: i64 = fields[3]
            .parse()
            .map_err(|_| HapMapParseError::InvalidNumber("pos", fields[3].to_string()))?;
        let snp = Snp::new(fields[0], fields[2], position)?;
        let strand = Strand::parse(fields[4])?;
        let calls = fields[FIXED_COLUMNS..]
            .iter()
            .map(|call| parse_call(call))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            snp,
            alleles: fields[1].to_string(),
            strand,
            calls,
        })
    }
}

/// Parse a two-character call
///
/// Deletion calls such as `-A` are rejected: `-` is the legend null marker and
/// could not be written back.
///
/// # Examples
/// ```
/// use genoconv::formats::hapmap::parse_call;
///
/// assert_eq!(parse_call("AG").unwrap(), Some(("A".to_string(), "G".to_string())));
/// assert_eq!(parse_call("NN").unwrap(), None);
/// assert!(parse_call("AN").is_err());
/// assert!(parse_call("-A").is_err());
/// ```
pub fn parse_call(call: &str) -> Result<Option<(String, String)>, HapMapParseError> {
    let mut chars = call.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(MISSING_ALLELE), Some(MISSING_ALLELE), None) => Ok(None),
        (Some(a), Some(b), None) if a != MISSING_ALLELE && b != MISSING_ALLELE => {
            let (a, b) = (a.to_string(), b.to_string());
            if is_valid_allele(&a) && is_valid_allele(&b) {
                Ok(Some((a, b)))
            } else {
                Err(HapMapParseError::InvalidCall(call.to_string()))
            }
        }
        _ => Err(HapMapParseError::InvalidCall(call.to_string())),
    }
}

/// HapMap parsing error
#[derive(Debug, thiserror::Error)]
pub enum HapMapParseError {
    #[error("Empty line")]
    EmptyLine,

    #[error("Missing HapMap header")]
    MissingHeader,

    #[error("Invalid HapMap header: expected at least 11 columns starting with 'rs#'")]
    InvalidHeader,

    #[error("Wrong number of fields: expected {expected}, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("Invalid number in field {0}: {1}")]
    InvalidNumber(&'static str, String),

    #[error("Invalid call '{0}'")]
    InvalidCall(String),

    #[error("Invalid genotype: {0}")]
    Genotype(#[from] GenotypeError),

    #[error("Line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<HapMapParseError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Iterator over HapMap data rows
///
/// The header is read on construction. A malformed row yields an error and
/// reading resumes with the next row; an I/O error ends the iteration.
pub struct HapMapReader<R: BufRead> {
    reader: R,
    samples: Vec<String>,
    buffer: String,
    line_number: usize,
    done: bool,
}

impl<R: BufRead> HapMapReader<R> {
    pub fn new(mut reader: R) -> Result<Self, HapMapParseError> {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 {
            return Err(HapMapParseError::MissingHeader);
        }
        let columns: Vec<&str> = header.split_ascii_whitespace().collect();
        if columns.len() < FIXED_COLUMNS || columns[0] != "rs#" {
            return Err(HapMapParseError::InvalidHeader);
        }
        let samples = columns[FIXED_COLUMNS..]
            .iter()
            .map(|s| s.to_string())
            .collect();

        Ok(Self {
            reader,
            samples,
            buffer: String::with_capacity(1024),
            line_number: 1,
            done: false,
        })
    }

    /// Sample names from the header, in column order
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for HapMapReader<R> {
    type Item = Result<HapMapRecord, HapMapParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buffer.clear();
            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line_number += 1;
                    let line = self.buffer.trim_end();
                    if line.is_empty() {
                        continue;
                    }
                    return Some(HapMapRecord::parse(line, self.samples.len()).map_err(|e| {
                        HapMapParseError::AtLine {
                            line: self.line_number,
                            source: Box::new(e),
                        }
                    }));
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
        None
    }
}

/// Conversion statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConversionStats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

/// Load a HapMap table into a population
///
/// Malformed rows are logged, counted as failed and skipped.
pub fn load_population<R: BufRead>(
    reader: R,
    name: &str,
) -> Result<(Population, ConversionStats), HapMapParseError> {
    let reader = HapMapReader::new(reader)?;
    let samples = reader.samples().to_vec();
    let mut builder = PopulationBuilder::new(name);
    for sample in &samples {
        builder.add_sample(sample)?;
    }

    let mut stats = ConversionStats::default();
    for result in reader {
        stats.total += 1;
        let record = match result {
            Ok(record) => record,
            Err(HapMapParseError::Io(e)) => return Err(e.into()),
            Err(e) => {
                log::warn!("Skipping HapMap row: {}", e);
                stats.failed += 1;
                continue;
            }
        };

        for (sample, call) in samples.iter().zip(&record.calls) {
            match call {
                Some((a1, a2)) => builder.set_genotype(
                    sample,
                    &record.snp,
                    Some(a1.as_str()),
                    Some(a2.as_str()),
                    Some(record.strand),
                )?,
                None => builder.set_genotype(sample, &record.snp, None, None, None)?,
            }
        }
        stats.success += 1;
    }

    log::info!(
        "Loaded {} rows for {} samples ({} skipped, {} calls shared)",
        stats.success,
        samples.len(),
        stats.failed,
        builder.shared_calls()
    );
    Ok((builder.build(), stats))
}
