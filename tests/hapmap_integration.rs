//! End-to-end conversion tests
//!
//! HapMap table in, legend and haplotype files out, through real files in a
//! temporary directory.

use genoconv::core::{create_output, open_input, Snp, Strand};
use genoconv::formats::{load_population, read_legend, write_haps, write_legend, write_samples};
use genoconv::{Legend, LegendBuilder, ReferenceSampleStrategy};
use std::io::{Read, Write};
use tempfile::TempDir;

const HAPMAP: &str = "\
rs# alleles chrom pos strand assembly# center protLSID assayLSID panelLSID QCcode NA1 NA2 NA3
rs100 A/G chr22 100 + ncbi_b36 perlegen urn:a urn:b urn:c QC+ AG AA AA
rs200 C/T chr22 200 + ncbi_b36 perlegen urn:a urn:b urn:c QC+ CC NN CT
rs300 A/C/G chr22 300 + ncbi_b36 perlegen urn:a urn:b urn:c QC+ AC GG AA
rs400 A/G chr22 400 + ncbi_b36 perlegen urn:a urn:b urn:c QC+ AG
rs500 G/T chr22 500 - ncbi_b36 perlegen urn:a urn:b urn:c QC+ GG GG GG
";

fn write_file(dir: &TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut out = create_output(&path).unwrap();
    out.write_all(text.as_bytes()).unwrap();
    out.flush().unwrap();
    path
}

fn read_text(path: &std::path::Path) -> String {
    let mut text = String::new();
    open_input(path).unwrap().read_to_string(&mut text).unwrap();
    text
}

#[test]
fn test_hapmap_to_haps() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "chr22.txt", HAPMAP);

    let (population, stats) = load_population(open_input(&input).unwrap(), "CEU").unwrap();
    assert_eq!(stats.total, 5);
    assert_eq!(stats.success, 4);
    assert_eq!(stats.failed, 1);
    assert_eq!(population.len(), 3);

    let legend = Legend::minor_allele(LegendBuilder::from_population(&population));
    let rs300 = Snp::new("rs300", "chr22", 300).unwrap();
    assert!(legend.bad_snps().contains(&rs300));
    assert_eq!(legend.len(), 3);

    let haps_path = dir.path().join("out.haps");
    let mut out = create_output(&haps_path).unwrap();
    let haps = write_haps(&population, &legend, &mut out).unwrap();
    out.flush().unwrap();
    drop(out);

    let text = read_text(&haps_path);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), legend.len());
    assert_eq!(haps.snps, legend.len());
    for line in &lines {
        assert_eq!(line.split(' ').count(), 2 * population.len());
    }
    // rs100: A major, G minor; rs200: C major, T minor, NA2 missing; rs500 monomorphic
    assert_eq!(lines, vec!["0 1 0 0 0 0", "0 0 - - 0 1", "0 0 0 0 0 0"]);

    let samples_path = dir.path().join("out.samples");
    let mut out = create_output(&samples_path).unwrap();
    write_samples(&population, &mut out).unwrap();
    out.flush().unwrap();
    drop(out);
    assert_eq!(read_text(&samples_path), "NA1\nNA2\nNA3\n");
}

#[test]
fn test_gzip_legend_reads_like_plain() {
    let dir = TempDir::new().unwrap();
    let text = "rs position a0 a1\nrs1 10 A G\nrs2 20 C -\nrs3 30 - -\n";
    let plain = write_file(&dir, "chr1.legend", text);
    let gzipped = write_file(&dir, "chr1.legend.gz", text);

    let mut magic = [0u8; 2];
    std::fs::File::open(&gzipped)
        .unwrap()
        .read_exact(&mut magic)
        .unwrap();
    assert_eq!(magic, [0x1f, 0x8b]);

    let a = read_legend(&plain, "chr1").unwrap();
    let b = read_legend(&gzipped, "chr1").unwrap();
    assert_eq!(a.snps(), b.snps());
    for snp in a.snps() {
        assert_eq!(a.entry(snp), b.entry(snp));
    }

    let mut out = Vec::new();
    write_legend(&b, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), text);
}

#[test]
fn test_reference_sample_legend() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "chr22.txt", HAPMAP);
    let (population, _) = load_population(open_input(&input).unwrap(), "CEU").unwrap();
    let reference = population.sample("NA3").unwrap();

    let strategy = ReferenceSampleStrategy::new(reference);
    let rs200 = Snp::new("rs200", "chr22", 200).unwrap();
    assert_eq!(strategy.reference_allele(&rs200).unwrap(), "C");

    let legend = Legend::reference_sample(LegendBuilder::from_population(&population), reference);
    // Reference allele is coded as 1
    assert_eq!(legend.encode(&rs200, "C"), Some('1'));
    assert_eq!(legend.encode(&rs200, "T"), Some('0'));

    let rs500 = Snp::new("rs500", "chr22", 500).unwrap();
    assert_eq!(legend.allele0(&rs500).unwrap(), None);
    assert_eq!(legend.allele1(&rs500).unwrap(), Some("G"));
    let call = reference.genotype(&rs500).unwrap();
    assert_eq!(call.strand(), Some(Strand::Minus));
}
