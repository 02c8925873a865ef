use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"))
        || path.extension() == Some(OsStr::new("bgz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    let reader = BufReader::new(file);

    Ok(reader)
}

///
/// Read a whole (possibly gzip'd) file into memory. The analysis pipeline
/// works on one complete buffer per request.
///
pub fn read_to_buffer(path: &Path) -> Result<Vec<u8>> {
    let mut reader = get_dynamic_reader(path)?;
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .with_context(|| format!("Failed to read file: {:?}", path))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use pretty_assertions::assert_eq;
    use rstest::*;

    const CONTENT: &str = "##fileformat=VCFv4.2\n#CHROM\tPOS\n";

    #[rstest]
    fn test_read_plain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.vcf");
        std::fs::write(&path, CONTENT).unwrap();

        assert_eq!(read_to_buffer(&path).unwrap(), CONTENT.as_bytes());
    }

    #[rstest]
    fn test_read_gzipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.vcf.gz");
        let file = File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(CONTENT.as_bytes()).unwrap();
        encoder.finish().unwrap();

        assert_eq!(read_to_buffer(&path).unwrap(), CONTENT.as_bytes());
    }

    #[rstest]
    fn test_missing_file() {
        assert!(read_to_buffer(Path::new("/no/such/file.vcf")).is_err());
    }
}
