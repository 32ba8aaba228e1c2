//! File format adapters
//!
//! Adapters between text formats and the genotype core (legend, HapMap, haps, statistics report).

pub mod hapmap;
pub mod haps;
pub mod legend;
pub mod stats;

pub use hapmap::{load_population, HapMapParseError, HapMapReader, HapMapRecord, ConversionStats as HapMapConversionStats};
pub use haps::{write_haps, write_samples, HapsStats};
pub use legend::{parse_legend, read_legend, write_legend, LegendParseError, LegendReader, LegendRecord};
pub use stats::{write_stats, LocusClass};
