use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use fxhash::FxHashMap as HashMap;

use svlink_core::consts::PASS;
use svlink_filter::PipelineOutput;
use svlink_index::VariantIndex;
use svlink_links::AlternatePath;

pub const RESULTS_HEADER: &str = "#id\tfilters\tlocal_links\talternate_path";

pub trait ResultsWrite {
    ///
    /// Write one line per variant, in index order: id, filters (`PASS` when none), local link
    /// labels and the alternate path explaining the variant. Missing values are written as `.`.
    /// A `.gz` extension gzips the output.
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    /// - index: the variants the results were computed for
    fn write_results<T: AsRef<Path>>(&self, path: T, index: &VariantIndex) -> std::io::Result<()>;
}

fn or_missing(values: Vec<&str>, separator: &str) -> String {
    if values.is_empty() {
        ".".to_string()
    } else {
        values.join(separator)
    }
}

fn write_rows<W: Write>(
    writer: &mut W,
    output: &PipelineOutput,
    index: &VariantIndex,
) -> std::io::Result<()> {
    let mut paths: HashMap<&str, &AlternatePath> = HashMap::default();
    for path in &output.alternate_paths {
        paths.entry(path.variant_id.as_str()).or_insert(path);
    }

    writeln!(writer, "{RESULTS_HEADER}")?;
    for variant in index.iter() {
        let filters: Vec<&str> = output.filters.filters(&variant.id).collect();
        let filters = if filters.is_empty() {
            PASS.to_string()
        } else {
            filters.join(";")
        };
        let links = or_missing(output.links.local_link_labels(&variant.id), ",");
        let path = paths
            .get(variant.id.as_str())
            .map_or_else(|| ".".to_string(), |path| path.to_string());

        writeln!(writer, "{}\t{}\t{}\t{}", variant.id, filters, links, path)?;
    }
    Ok(())
}

impl ResultsWrite for PipelineOutput {
    fn write_results<T: AsRef<Path>>(&self, path: T, index: &VariantIndex) -> std::io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;

        if path.extension() == Some(OsStr::new("gz")) {
            let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::best());
            write_rows(&mut encoder, self, index)?;
            encoder.finish()?;
        } else {
            let mut writer = BufWriter::new(file);
            write_rows(&mut writer, self, index)?;
            writer.flush()?;
        }

        Ok(())
    }
}
