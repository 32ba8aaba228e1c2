//! Genomic loci and SNP identity
//!
//! A [`Snp`] is a named [`Locus`]. Different data sources assign different
//! names to the same physical site, so SNP identity is the locus alone:
//! equality, hashing and ordering never look at the name.

use crate::core::error::{GenotypeError, GenotypeResult};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A genomic site: chromosome name and 0-or-greater position
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locus {
    chromosome: Arc<str>,
    position: u64,
}

impl Locus {
    /// Create a locus, rejecting negative positions and empty chromosome names
    ///
    /// # Examples
    /// ```
    /// use genoconv::core::Locus;
    ///
    /// let locus = Locus::new("chr1", 5).unwrap();
    /// assert_eq!(locus.chromosome(), "chr1");
    /// assert_eq!(locus.position(), 5);
    /// assert!(Locus::new("chr1", -1).is_err());
    /// assert!(Locus::new("", 5).is_err());
    /// ```
    pub fn new(chromosome: &str, position: i64) -> GenotypeResult<Self> {
        if chromosome.is_empty() {
            return Err(GenotypeError::EmptyName("chromosome"));
        }
        let position = u64::try_from(position).map_err(|_| GenotypeError::InvalidPosition(position))?;
        Ok(Self {
            chromosome: Arc::from(chromosome),
            position,
        })
    }

    /// Create a locus from an already unsigned position
    pub fn from_unsigned(chromosome: &str, position: u64) -> GenotypeResult<Self> {
        if chromosome.is_empty() {
            return Err(GenotypeError::EmptyName("chromosome"));
        }
        Ok(Self {
            chromosome: Arc::from(chromosome),
            position,
        })
    }

    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    pub fn position(&self) -> u64 {
        self.position
    }
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chromosome, self.position)
    }
}

/// A named locus
///
/// Cloning is cheap: name and chromosome are shared.
#[derive(Debug, Clone)]
pub struct Snp {
    name: Arc<str>,
    locus: Locus,
}

impl Snp {
    /// Create a SNP
    ///
    /// # Examples
    /// ```
    /// use genoconv::core::Snp;
    ///
    /// let a = Snp::new("rs1", "chr1", 5).unwrap();
    /// let b = Snp::new("SNP_A-1", "chr1", 5).unwrap();
    /// assert_eq!(a, b); // same site, different names
    /// ```
    pub fn new(name: &str, chromosome: &str, position: i64) -> GenotypeResult<Self> {
        if name.is_empty() {
            return Err(GenotypeError::EmptyName("SNP name"));
        }
        Ok(Self {
            name: Arc::from(name),
            locus: Locus::new(chromosome, position)?,
        })
    }

    /// Create a SNP at an existing locus
    pub fn at(name: &str, locus: Locus) -> GenotypeResult<Self> {
        if name.is_empty() {
            return Err(GenotypeError::EmptyName("SNP name"));
        }
        Ok(Self {
            name: Arc::from(name),
            locus,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locus(&self) -> &Locus {
        &self.locus
    }

    pub fn chromosome(&self) -> &str {
        self.locus.chromosome()
    }

    pub fn position(&self) -> u64 {
        self.locus.position()
    }
}

impl PartialEq for Snp {
    fn eq(&self, other: &Self) -> bool {
        self.locus == other.locus
    }
}

impl Eq for Snp {}

impl Hash for Snp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.locus.hash(state);
    }
}

impl PartialOrd for Snp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Snp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.locus.cmp(&other.locus)
    }
}

impl fmt::Display for Snp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.locus)
    }
}
