use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

///
/// Open a text input that may or may not be gzipped. Compression is detected from the first two
/// bytes, so a `.gz` extension is not required and a mislabelled plain file still opens.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader<T: AsRef<Path>>(path: T) -> Result<BufReader<Box<dyn Read>>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut raw = BufReader::new(file);
    let is_gzipped = raw
        .fill_buf()
        .with_context(|| format!("Failed to read file: {}", path.display()))?
        .starts_with(&GZIP_MAGIC);

    let inner: Box<dyn Read> = if is_gzipped {
        Box::new(MultiGzDecoder::new(raw))
    } else {
        Box::new(raw)
    };

    Ok(BufReader::new(inner))
}

/// Lines that carry no data: blank lines, `#` comments and `track`/`browser` headers.
pub fn is_header_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("track")
        || trimmed.starts_with("browser")
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::Compression;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_read_plain_and_gzipped() {
        let tempdir = tempfile::tempdir().unwrap();

        let plain = tempdir.path().join("contigs.txt");
        std::fs::write(&plain, "chr1\t100\nchr2\t200\n").unwrap();

        let gzipped = tempdir.path().join("contigs.txt.gz");
        let mut encoder = GzEncoder::new(File::create(&gzipped).unwrap(), Compression::default());
        encoder.write_all(b"chr1\t100\nchr2\t200\n").unwrap();
        encoder.finish().unwrap();

        let plain_lines: Vec<String> = get_dynamic_reader(&plain)
            .unwrap()
            .lines()
            .map(|l| l.unwrap())
            .collect();
        let gz_lines: Vec<String> = get_dynamic_reader(&gzipped)
            .unwrap()
            .lines()
            .map(|l| l.unwrap())
            .collect();

        assert_eq!(plain_lines, gz_lines);
        assert_eq!(plain_lines.len(), 2);
    }

    #[rstest]
    fn test_gzip_without_extension() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("contigs.fai");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b"chr1\t100\n").unwrap();
        encoder.finish().unwrap();

        let mut content = String::new();
        get_dynamic_reader(&path).unwrap().read_to_string(&mut content).unwrap();

        assert_eq!(content, "chr1\t100\n");
    }

    #[rstest]
    fn test_empty_file() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("empty.tsv");
        std::fs::write(&path, "").unwrap();

        assert_eq!(get_dynamic_reader(&path).unwrap().lines().count(), 0);
    }

    #[rstest]
    fn test_missing_file_is_error() {
        assert!(get_dynamic_reader(Path::new("/definitely/not/here.bed")).is_err());
    }

    #[rstest]
    #[case("", true)]
    #[case("# comment", true)]
    #[case("track name=hotspots", true)]
    #[case("browser position chr1:1-100", true)]
    #[case("chr1\t100\t200", false)]
    fn test_is_header_line(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_header_line(line), expected);
    }
}
