//! Diploid genotype calls
//!
//! A [`Genotype`] is an unphased pair of alleles observed at a [`Snp`], plus
//! the [`Strand`] the calls were read from.

use crate::core::error::{GenotypeError, GenotypeResult};
use crate::core::Snp;
use crate::formats::legend::NULL_ALLELE;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Orientation under which allele calls were made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    /// Illumina TOP strand
    Top,
    /// Illumina BOT strand
    Bot,
    /// Forward strand of the reference assembly
    Plus,
    /// Reverse strand of the reference assembly
    Minus,
}

impl Strand {
    /// Parse a strand token
    ///
    /// # Examples
    /// ```
    /// use genoconv::core::Strand;
    /// assert_eq!(Strand::parse("TOP").unwrap(), Strand::Top);
    /// assert_eq!(Strand::parse("bot").unwrap(), Strand::Bot);
    /// assert_eq!(Strand::parse("+").unwrap(), Strand::Plus);
    /// assert!(Strand::parse("?").is_err());
    /// ```
    pub fn parse(s: &str) -> GenotypeResult<Self> {
        match s {
            "+" => Ok(Strand::Plus),
            "-" => Ok(Strand::Minus),
            _ if s.eq_ignore_ascii_case("top") => Ok(Strand::Top),
            _ if s.eq_ignore_ascii_case("bot") => Ok(Strand::Bot),
            _ => Err(GenotypeError::UnknownStrand(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strand::Top => "TOP",
            Strand::Bot => "BOT",
            Strand::Plus => "+",
            Strand::Minus => "-",
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check that an allele survives the legend text format unchanged
///
/// Empty alleles, the null marker `-` and alleles containing whitespace are
/// rejected.
///
/// # Examples
/// ```
/// use genoconv::core::is_valid_allele;
///
/// assert!(is_valid_allele("A"));
/// assert!(is_valid_allele("ACG"));
/// assert!(!is_valid_allele("-"));
/// assert!(!is_valid_allele(""));
/// assert!(!is_valid_allele("A G"));
/// ```
pub fn is_valid_allele(allele: &str) -> bool {
    !allele.is_empty() && allele != NULL_ALLELE && !allele.contains(char::is_whitespace)
}

/// A diploid call at a SNP
///
/// Equality is order-insensitive over the allele pair, so `(A,G)` equals
/// `(G,A)`, but two calls that differ only in strand are different. The call
/// order is still kept: for phased input `allele1` is the first haplotype.
#[derive(Debug, Clone)]
pub struct Genotype {
    snp: Snp,
    allele1: Option<String>,
    allele2: Option<String>,
    strand: Option<Strand>,
}

impl Genotype {
    /// Create a genotype
    ///
    /// Either both alleles are present or both are missing. A missing call may
    /// still record the strand that was attempted. Present alleles must pass
    /// [`is_valid_allele`].
    ///
    /// # Examples
    /// ```
    /// use genoconv::core::{Genotype, Snp, Strand};
    ///
    /// let snp = Snp::new("rs1", "chr1", 100).unwrap();
    /// let ag = Genotype::new(snp.clone(), Some("A"), Some("G"), Some(Strand::Top)).unwrap();
    /// let ga = Genotype::new(snp.clone(), Some("G"), Some("A"), Some(Strand::Top)).unwrap();
    /// assert_eq!(ag, ga);
    /// assert!(Genotype::new(snp, Some("A"), None, Some(Strand::Top)).is_err());
    /// ```
    pub fn new(
        snp: Snp,
        allele1: Option<&str>,
        allele2: Option<&str>,
        strand: Option<Strand>,
    ) -> GenotypeResult<Self> {
        if allele1.is_some() != allele2.is_some() {
            return Err(GenotypeError::HalfMissing {
                snp: snp.to_string(),
            });
        }
        if let Some(bad) = [allele1, allele2]
            .into_iter()
            .flatten()
            .find(|a| !is_valid_allele(a))
        {
            return Err(GenotypeError::InvalidAllele {
                snp: snp.to_string(),
                allele: bad.to_string(),
            });
        }
        Ok(Self {
            snp,
            allele1: allele1.map(str::to_string),
            allele2: allele2.map(str::to_string),
            strand,
        })
    }

    /// Create a missing call
    pub fn missing(snp: Snp, strand: Option<Strand>) -> Self {
        Self {
            snp,
            allele1: None,
            allele2: None,
            strand,
        }
    }

    pub fn snp(&self) -> &Snp {
        &self.snp
    }

    pub fn allele1(&self) -> Option<&str> {
        self.allele1.as_deref()
    }

    pub fn allele2(&self) -> Option<&str> {
        self.allele2.as_deref()
    }

    pub fn strand(&self) -> Option<Strand> {
        self.strand
    }

    pub fn is_missing(&self) -> bool {
        self.allele1.is_none()
    }

    pub fn is_homozygous(&self) -> bool {
        !self.is_missing() && self.allele1 == self.allele2
    }

    pub fn is_heterozygous(&self) -> bool {
        !self.is_missing() && self.allele1 != self.allele2
    }

    /// Both alleles in call order, `None` for a missing call
    pub fn alleles(&self) -> [Option<&str>; 2] {
        [self.allele1(), self.allele2()]
    }

    /// Allele pair in lexicographic order, the basis of equality and hashing
    fn ordered_alleles(&self) -> (Option<&str>, Option<&str>) {
        let (a, b) = (self.allele1(), self.allele2());
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl PartialEq for Genotype {
    fn eq(&self, other: &Self) -> bool {
        self.snp == other.snp
            && self.strand == other.strand
            && self.ordered_alleles() == other.ordered_alleles()
    }
}

impl Eq for Genotype {}

impl Hash for Genotype {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.snp.hash(state);
        self.strand.hash(state);
        self.ordered_alleles().hash(state);
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a1 = self.allele1().unwrap_or("-");
        let a2 = self.allele2().unwrap_or("-");
        match self.strand {
            Some(strand) => write!(f, "{}{} ({})", a1, a2, strand),
            None => write!(f, "{}{}", a1, a2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn snp() -> Snp {
        Snp::new("rs1", "chr1", 100).unwrap()
    }

    fn hash_of(g: &Genotype) -> u64 {
        let mut h = DefaultHasher::new();
        g.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_unordered_equality() {
        let ag = Genotype::new(snp(), Some("A"), Some("G"), Some(Strand::Top)).unwrap();
        let ga = Genotype::new(snp(), Some("G"), Some("A"), Some(Strand::Top)).unwrap();
        assert_eq!(ag, ga);
        assert_eq!(hash_of(&ag), hash_of(&ga));
        // call order is preserved
        assert_eq!(ga.allele1(), Some("G"));
    }

    #[test]
    fn test_strand_sensitive() {
        let top = Genotype::new(snp(), Some("A"), Some("G"), Some(Strand::Top)).unwrap();
        let bot = Genotype::new(snp(), Some("A"), Some("G"), Some(Strand::Bot)).unwrap();
        assert_ne!(top, bot);
    }

    #[test]
    fn test_half_missing_rejected() {
        assert!(matches!(
            Genotype::new(snp(), Some("A"), None, Some(Strand::Top)),
            Err(GenotypeError::HalfMissing { .. })
        ));
        assert!(matches!(
            Genotype::new(snp(), None, Some("A"), None),
            Err(GenotypeError::HalfMissing { .. })
        ));
    }

    #[test]
    fn test_unwritable_alleles_rejected() {
        for bad in ["-", "", "A G", "A\t"] {
            assert_eq!(
                Genotype::new(snp(), Some("A"), Some(bad), Some(Strand::Top)),
                Err(GenotypeError::InvalidAllele {
                    snp: snp().to_string(),
                    allele: bad.to_string(),
                })
            );
        }
        assert!(Genotype::new(snp(), Some("AT"), Some("<DEL>"), Some(Strand::Top)).is_ok());
    }

    #[test]
    fn test_missing_call() {
        let g = Genotype::new(snp(), None, None, None).unwrap();
        assert!(g.is_missing());
        assert!(!g.is_homozygous());
        assert!(!g.is_heterozygous());
        let attempted = Genotype::missing(snp(), Some(Strand::Plus));
        assert_eq!(attempted.strand(), Some(Strand::Plus));
        assert_ne!(g, attempted);
    }

    #[test]
    fn test_zygosity() {
        let hom = Genotype::new(snp(), Some("C"), Some("C"), Some(Strand::Plus)).unwrap();
        let het = Genotype::new(snp(), Some("C"), Some("T"), Some(Strand::Plus)).unwrap();
        assert!(hom.is_homozygous());
        assert!(het.is_heterozygous());
    }

    #[test]
    fn test_strand_roundtrip() {
        for strand in [Strand::Top, Strand::Bot, Strand::Plus, Strand::Minus] {
            assert_eq!(Strand::parse(strand.as_str()).unwrap(), strand);
        }
    }

    #[test]
    fn test_display() {
        let g = Genotype::new(snp(), Some("A"), Some("G"), Some(Strand::Top)).unwrap();
        assert_eq!(g.to_string(), "AG (TOP)");
        assert_eq!(Genotype::missing(snp(), None).to_string(), "--");
    }
}
