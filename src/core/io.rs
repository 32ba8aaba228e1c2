//! Input/output plumbing
//!
//! Opens plain, gzip or bzip2 input transparently and creates buffered
//! (optionally gzip-compressed) output. `-` stands for stdin/stdout.

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Default buffer size for readers and writers (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Compression format of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

impl CompressionFormat {
    /// Detect format from the first bytes of a file
    pub fn from_magic(magic: &[u8]) -> Self {
        if magic.len() >= 2 && magic[0] == 0x1f && magic[1] == 0x8b {
            CompressionFormat::Gzip
        } else if magic.len() >= 3 && magic[..3] == *b"BZh" {
            CompressionFormat::Bzip2
        } else {
            CompressionFormat::Plain
        }
    }
}

/// Detect compression format from file path and/or content
pub fn detect_compression(path: &Path) -> io::Result<CompressionFormat> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    // First check by extension
    if extension == "gz" {
        return Ok(CompressionFormat::Gzip);
    }
    if extension == "bz2" {
        return Ok(CompressionFormat::Bzip2);
    }

    // Then check by magic bytes
    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;
    Ok(CompressionFormat::from_magic(&magic[..bytes_read]))
}

/// Open a possibly compressed text input
pub fn open_input(path: &Path) -> io::Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            io::stdin(),
        )));
    }

    let format = detect_compression(path)?;
    let file = File::open(path)?;
    log::debug!("Opening {:?} as {:?}", path, format);

    Ok(match format {
        CompressionFormat::Gzip => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            GzDecoder::new(file),
        )),
        CompressionFormat::Bzip2 => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            bzip2::read::BzDecoder::new(file),
        )),
        CompressionFormat::Plain => Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file)),
    })
}

/// Create a buffered output, gzip-compressed when the path ends in `.gz`
pub fn create_output(path: &Path) -> io::Result<Box<dyn Write>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufWriter::with_capacity(
            DEFAULT_BUFFER_SIZE,
            io::stdout(),
        )));
    }

    let file = File::create(path)?;
    if path.extension().is_some_and(|e| e == "gz") {
        Ok(Box::new(BufWriter::with_capacity(
            DEFAULT_BUFFER_SIZE,
            GzEncoder::new(file, Compression::default()),
        )))
    } else {
        Ok(Box::new(BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file)))
    }
}
