//! Legend text format
//!
//! Space-delimited, one SNP per line, `-` for an unassigned allele:
//!
//! ```text
//! rs position a0 a1
//! rs123 10045 A G
//! rs456 10100 C -
//! ```

use crate::core::{is_valid_allele, open_input, GenoconvError, Legend};
use memchr::memchr;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Header line of every legend file
pub const LEGEND_HEADER: &str = "rs position a0 a1";

/// Placeholder for an unassigned allele
pub const NULL_ALLELE: &str = "-";

/// One parsed legend line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendRecord {
    pub name: String,
    pub position: u64,
    pub allele0: Option<String>,
    pub allele1: Option<String>,
}

impl LegendRecord {
    /// Parse a data line
    ///
    /// # Examples
    /// ```
    /// use genoconv::formats::legend::LegendRecord;
    ///
    /// let record = LegendRecord::parse(b"rs1 100 A -").unwrap();
    /// assert_eq!(record.position, 100);
    /// assert_eq!(record.allele0.as_deref(), Some("A"));
    /// assert_eq!(record.allele1, None);
    /// ```
    pub fn parse(line: &[u8]) -> Result<Self, LegendParseError> {
        if line.is_empty() {
            return Err(LegendParseError::EmptyLine);
        }

        // Find field boundaries using memchr for space characters
        let mut fields = Vec::with_capacity(4);
        let mut start = 0;
        loop {
            match memchr(b' ', &line[start..]) {
                Some(offset) => {
                    fields.push(&line[start..start + offset]);
                    start += offset + 1;
                }
                None => {
                    fields.push(&line[start..]);
                    break;
                }
            }
        }

        if fields.len() != 4 {
            return Err(LegendParseError::FieldCount {
                expected: 4,
                found: fields.len(),
            });
        }

        let field = |i: usize, name: &'static str| {
            std::str::from_utf8(fields[i]).map_err(|_| LegendParseError::InvalidUtf8(name))
        };

        let name = field(0, "rs")?;
        if name.is_empty() {
            return Err(LegendParseError::EmptyField("rs"));
        }
        let position_str = field(1, "position")?;
        let position: u64 = position_str
            .parse()
            .map_err(|_| LegendParseError::InvalidNumber("position", position_str.to_string()))?;
        let allele0 = parse_allele(field(2, "a0")?, "a0")?;
        let allele1 = parse_allele(field(3, "a1")?, "a1")?;

        Ok(Self {
            name: name.to_string(),
            position,
            allele0,
            allele1,
        })
    }
}

fn parse_allele(value: &str, name: &'static str) -> Result<Option<String>, LegendParseError> {
    match value {
        "" => Err(LegendParseError::EmptyField(name)),
        NULL_ALLELE => Ok(None),
        allele => Ok(Some(allele.to_string())),
    }
}

/// Legend parsing error
#[derive(Debug, thiserror::Error)]
pub enum LegendParseError {
    #[error("Empty line")]
    EmptyLine,

    #[error("Missing legend header")]
    MissingHeader,

    #[error("Invalid legend header: '{0}'")]
    InvalidHeader(String),

    #[error("Wrong number of fields: expected {expected}, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("Empty field: {0}")]
    EmptyField(&'static str),

    #[error("Invalid UTF-8 in field: {0}")]
    InvalidUtf8(&'static str),

    #[error("Invalid number in field {0}: {1}")]
    InvalidNumber(&'static str, String),

    #[error("Line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<LegendParseError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Iterator over the records of a legend file
///
/// A malformed line yields an error and reading resumes with the next line.
/// An I/O error ends the iteration.
pub struct LegendReader<R: BufRead> {
    reader: R,
    buffer: Vec<u8>,
    line_number: usize,
    header_checked: bool,
    done: bool,
}

impl<R: BufRead> LegendReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::with_capacity(256),
            line_number: 0,
            header_checked: false,
            done: false,
        }
    }

    /// Lines consumed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn read_line(&mut self) -> Option<io::Result<()>> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                if self.buffer.last() == Some(&b'\n') {
                    self.buffer.pop();
                    if self.buffer.last() == Some(&b'\r') {
                        self.buffer.pop();
                    }
                }
                self.line_number += 1;
                Some(Ok(()))
            }
            Err(e) => Some(Err(e)),
        }
    }

    fn at_line(&self, error: LegendParseError) -> LegendParseError {
        LegendParseError::AtLine {
            line: self.line_number,
            source: Box::new(error),
        }
    }
}

impl<R: BufRead> Iterator for LegendReader<R> {
    type Item = Result<LegendRecord, LegendParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.read_line() {
                None => {
                    self.done = true;
                    if !self.header_checked {
                        self.header_checked = true;
                        return Some(Err(LegendParseError::MissingHeader));
                    }
                    return None;
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
                Some(Ok(())) => {}
            }

            if !self.header_checked {
                self.header_checked = true;
                if self.buffer != LEGEND_HEADER.as_bytes() {
                    let header = String::from_utf8_lossy(&self.buffer).into_owned();
                    return Some(Err(self.at_line(LegendParseError::InvalidHeader(header))));
                }
                continue;
            }

            if self.buffer.is_empty() {
                continue;
            }

            return Some(
                LegendRecord::parse(&self.buffer).map_err(|e| self.at_line(e)),
            );
        }
    }
}

/// Write a legend in legend text format
///
/// The format has no chromosome column, so every SNP must lie on one
/// chromosome. Alleles must pass [`is_valid_allele`]. Either violation is an
/// [`io::ErrorKind::InvalidData`] error raised before the offending line is
/// written.
pub fn write_legend<W: Write>(legend: &Legend, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}", LEGEND_HEADER)?;
    let chromosome = legend.snps().first().map(|snp| snp.chromosome());
    for snp in legend.snps() {
        let pair = match legend.entry(snp) {
            Some(pair) => pair,
            None => continue,
        };
        if Some(snp.chromosome()) != chromosome {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "legend spans several chromosomes ({} and {})",
                    chromosome.unwrap_or_default(),
                    snp.chromosome()
                ),
            ));
        }
        if let Some(bad) = [&pair.allele0, &pair.allele1]
            .into_iter()
            .flatten()
            .find(|a| !is_valid_allele(a))
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("allele '{}' at {} cannot be written to a legend", bad, snp),
            ));
        }
        writeln!(
            writer,
            "{} {} {} {}",
            snp.name(),
            snp.position(),
            pair.allele0.as_deref().unwrap_or(NULL_ALLELE),
            pair.allele1.as_deref().unwrap_or(NULL_ALLELE)
        )?;
    }
    Ok(())
}

/// Parse legend text into records, failing on the first bad line
pub fn parse_legend<R: BufRead>(reader: R) -> Result<Vec<LegendRecord>, LegendParseError> {
    LegendReader::new(reader).collect()
}

/// Load a legend file (plain, gzip or bzip2) for one chromosome
pub fn read_legend(path: &Path, chromosome: &str) -> Result<Legend, GenoconvError> {
    let records = parse_legend(open_input(path)?)?;
    log::info!("Read {} legend records from {:?}", records.len(), path);
    Ok(Legend::from_records(chromosome, records)?)
}
