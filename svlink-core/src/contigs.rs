use std::cmp::Ordering;
use std::io::BufRead;
use std::path::Path;

use fxhash::FxHashMap as HashMap;

use crate::errors::ContigOrderError;
use crate::utils::{get_dynamic_reader, is_header_line};

///
/// Contig ordering used to canonicalise breakpoints. Either the order contigs appear in a
/// chrom-sizes/`.fai` file, or natural karyotype order (`1..22, X, Y, MT`, with or without a
/// `chr` prefix). Contigs without a rank sort after ranked ones, lexicographically.
///
#[derive(Debug, Clone, Default)]
pub struct ContigOrder {
    ranks: Option<HashMap<String, usize>>,
}

impl ContigOrder {
    pub fn from_contigs<I, S>(contigs: I) -> ContigOrder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ranks: HashMap<String, usize> = HashMap::default();
        for contig in contigs {
            let next = ranks.len();
            ranks.entry(contig.into()).or_insert(next);
        }
        ContigOrder { ranks: Some(ranks) }
    }

    ///
    /// Read the contig order from the first column of a chrom-sizes or `.fai` file.
    ///
    /// # Arguments
    /// - path: path to the file, optionally gzipped
    pub fn from_file<T: AsRef<Path>>(path: T) -> Result<ContigOrder, ContigOrderError> {
        let path = path.as_ref();
        let reader = get_dynamic_reader(path)
            .map_err(|e| ContigOrderError::FileReadError(format!("{:?}: {e}", path)))?;

        let mut contigs = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if is_header_line(&line) {
                continue;
            }
            let contig = line
                .split_whitespace()
                .next()
                .ok_or_else(|| ContigOrderError::ContigParseError(line.clone()))?;
            contigs.push(contig.to_string());
        }

        if contigs.is_empty() {
            return Err(ContigOrderError::EmptyContigFile(format!("{:?}", path)));
        }

        Ok(ContigOrder::from_contigs(contigs))
    }

    pub fn rank(&self, contig: &str) -> Option<usize> {
        match &self.ranks {
            Some(ranks) => ranks.get(contig).copied(),
            None => natural_rank(contig),
        }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match (self.rank(a), self.rank(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    }
}

fn natural_rank(contig: &str) -> Option<usize> {
    let name = contig.strip_prefix("chr").unwrap_or(contig);
    match name {
        "X" => Some(23),
        "Y" => Some(24),
        "M" | "MT" => Some(25),
        _ => name.parse::<usize>().ok().filter(|n| (1..=22).contains(n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("chr1", "chr2", Ordering::Less)]
    #[case("chr2", "chr10", Ordering::Less)]
    #[case("10", "X", Ordering::Less)]
    #[case("chrY", "chrX", Ordering::Greater)]
    #[case("chrM", "chr1_KI270706v1_random", Ordering::Less)]
    #[case("GL000220.1", "GL000194.1", Ordering::Greater)]
    #[case("chr3", "chr3", Ordering::Equal)]
    fn test_natural_order(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(ContigOrder::default().compare(a, b), expected);
    }

    #[rstest]
    fn test_explicit_order() {
        let order = ContigOrder::from_contigs(["chrX", "chr2", "chr1"]);
        assert_eq!(order.compare("chrX", "chr1"), Ordering::Less);
        assert_eq!(order.rank("chr2"), Some(1));
        assert_eq!(order.compare("chr3", "chr1"), Ordering::Greater);
    }

    #[rstest]
    fn test_from_file() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("ref.fa.fai");
        std::fs::write(&path, "chrB\t100\t6\t60\t61\nchrA\t200\t120\t60\t61\n").unwrap();

        let order = ContigOrder::from_file(&path).unwrap();
        assert_eq!(order.compare("chrB", "chrA"), Ordering::Less);
    }

    #[rstest]
    fn test_from_empty_file() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("empty.sizes");
        std::fs::write(&path, "# nothing here\n").unwrap();

        assert!(matches!(
            ContigOrder::from_file(&path),
            Err(ContigOrderError::EmptyContigFile(_))
        ));
    }
}
