use std::io::BufRead;
use std::path::Path;

use log::info;

use svlink_core::consts::PASS;
use svlink_core::models::{Orientation, VariantRecord};
use svlink_core::utils::get_dynamic_reader;
use svlink_filter::SoftFilterStore;

use crate::error::{Result, SvIoError};

///
/// A loaded batch: the records plus the soft filters the caller evaluated for them.
///
#[derive(Debug, Clone)]
pub struct VariantTable {
    pub variants: Vec<VariantRecord>,
    pub filters: SoftFilterStore,
}

///
/// Column positions resolved from the header. Only `id`, `contig`, `start` and `orientation`
/// are required; every other column may be left out.
///
#[derive(Debug)]
struct Columns {
    id: usize,
    contig: usize,
    start: usize,
    orientation: usize,
    mate: Option<usize>,
    cipos: Option<usize>,
    imprecise: Option<usize>,
    too_short: Option<usize>,
    insert_length: Option<usize>,
    dup_length: Option<usize>,
    tumor_qual: Option<usize>,
    beid: Option<usize>,
    beidl: Option<usize>,
    filters: Option<usize>,
    repeat_class: Option<usize>,
    repeat_type: Option<usize>,
}

impl Columns {
    fn from_header(header: &str) -> Result<Columns> {
        let names: Vec<&str> = header
            .trim_start_matches('#')
            .split('\t')
            .map(str::trim)
            .collect();
        let find = |name: &str| names.iter().position(|column| column.eq_ignore_ascii_case(name));
        let require = |name: &'static str| find(name).ok_or(SvIoError::MissingColumn(name));

        Ok(Columns {
            id: require("id")?,
            contig: require("contig")?,
            start: require("start")?,
            orientation: require("orientation")?,
            mate: find("mate"),
            cipos: find("cipos"),
            imprecise: find("imprecise"),
            too_short: find("too_short"),
            insert_length: find("insert_length"),
            dup_length: find("dup_length"),
            tumor_qual: find("tumor_qual"),
            beid: find("beid"),
            beidl: find("beidl"),
            filters: find("filters"),
            repeat_class: find("repeat_class"),
            repeat_type: find("repeat_type"),
        })
    }
}

struct Line<'a> {
    number: usize,
    fields: Vec<&'a str>,
}

impl<'a> Line<'a> {
    fn error(&self, reason: impl Into<String>) -> SvIoError {
        SvIoError::VariantParseError {
            line: self.number,
            reason: reason.into(),
        }
    }

    /// The value at `column`, with `.` and empty fields read as missing.
    fn get(&self, column: Option<usize>) -> Option<&'a str> {
        column
            .and_then(|i| self.fields.get(i))
            .copied()
            .map(str::trim)
            .filter(|field| !field.is_empty() && *field != ".")
    }

    fn required(&self, column: usize, name: &str) -> Result<&'a str> {
        self.get(Some(column))
            .ok_or_else(|| self.error(format!("missing {name}")))
    }

    fn number<T: std::str::FromStr>(&self, column: Option<usize>, name: &str) -> Result<Option<T>> {
        self.get(column)
            .map(|field| {
                field
                    .parse::<T>()
                    .map_err(|_| self.error(format!("{name} is not a number: {field}")))
            })
            .transpose()
    }

    fn flag(&self, column: Option<usize>, name: &str) -> Result<bool> {
        match self.get(column) {
            None => Ok(false),
            Some(field) => match field.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                _ => Err(self.error(format!("{name} is not a flag: {field}"))),
            },
        }
    }
}

/// `-left,right` as written in a VCF `CIPOS`.
fn parse_cipos(line: &Line, field: &str) -> Result<(u32, u32)> {
    let (left, right) = field
        .split_once(',')
        .ok_or_else(|| line.error(format!("cipos needs two values: {field}")))?;
    let left: i64 = left
        .trim()
        .parse()
        .map_err(|_| line.error(format!("bad cipos: {field}")))?;
    let right: i64 = right
        .trim()
        .parse()
        .map_err(|_| line.error(format!("bad cipos: {field}")))?;
    if left > 0 || right < 0 {
        return Err(line.error(format!("cipos must bracket zero: {field}")));
    }
    let to_u32 = |value: i64| u32::try_from(value).map_err(|_| line.error(format!("bad cipos: {field}")));
    Ok((to_u32(-left)?, to_u32(right)?))
}

/// Assembly names from `beid`, suffixed with the matching `beidl` length when given.
fn parse_assemblies(line: &Line, columns: &Columns) -> Result<Vec<String>> {
    let Some(names) = line.get(columns.beid) else {
        return Ok(Vec::new());
    };
    let names: Vec<&str> = names.split(',').collect();

    match line.get(columns.beidl) {
        None => Ok(names.into_iter().map(String::from).collect()),
        Some(lengths) => {
            let lengths: Vec<&str> = lengths.split(',').collect();
            if lengths.len() != names.len() {
                return Err(line.error(format!(
                    "{} assemblies but {} assembly lengths",
                    names.len(),
                    lengths.len()
                )));
            }
            Ok(names
                .into_iter()
                .zip(lengths)
                .map(|(name, length)| format!("{name}/{length}"))
                .collect())
        }
    }
}

fn parse_filters<'a>(line: &Line<'a>, columns: &Columns) -> Vec<&'a str> {
    match line.get(columns.filters) {
        None => Vec::new(),
        Some(field) if field == PASS => Vec::new(),
        Some(field) => field
            .split(';')
            .map(str::trim)
            .filter(|reason| !reason.is_empty() && *reason != PASS)
            .collect(),
    }
}

fn parse_variant(line: &Line, columns: &Columns) -> Result<VariantRecord> {
    let id = line.required(columns.id, "id")?;
    let contig = line.required(columns.contig, "contig")?;
    let start = line
        .number::<u32>(Some(columns.start), "start")?
        .ok_or_else(|| line.error("missing start"))?;
    let orientation = line
        .required(columns.orientation, "orientation")?
        .parse::<Orientation>()
        .map_err(|e| line.error(e.to_string()))?;

    let mut record = VariantRecord::new(id, contig, start, orientation)
        .with_imprecise(line.flag(columns.imprecise, "imprecise")?)
        .with_too_short_to_rescue(line.flag(columns.too_short, "too_short")?)
        .with_insert_sequence_length(line.number(columns.insert_length, "insert_length")?.unwrap_or(0))
        .with_duplication_length(line.number(columns.dup_length, "dup_length")?.unwrap_or(0))
        .with_tumor_qual(line.number(columns.tumor_qual, "tumor_qual")?.unwrap_or(0.0))
        .with_assemblies(parse_assemblies(line, columns)?);

    if let Some(mate) = line.get(columns.mate) {
        record = record.with_mate(mate);
    }
    if let Some(cipos) = line.get(columns.cipos) {
        let (left, right) = parse_cipos(line, cipos)?;
        record = record.with_confidence_interval(left, right);
    }
    record.insert_repeat_class = line.get(columns.repeat_class).map(String::from);
    record.insert_repeat_type = line.get(columns.repeat_type).map(String::from);

    Ok(record)
}

///
/// Load a tab-separated variant table, plain or gzipped.
///
/// The first line that is not a `##` comment is the header; a leading `#` on it is ignored.
/// Recognised columns: `id`, `mate`, `contig`, `start`, `orientation`, `cipos`, `imprecise`,
/// `too_short`, `insert_length`, `dup_length`, `tumor_qual`, `beid`, `beidl`, `filters`,
/// `repeat_class`, `repeat_type`. `.` marks a missing value and `filters` is `PASS` or a `;`
/// separated list.
///
/// # Arguments
/// - path: path to the table
pub fn read_variants<T: AsRef<Path>>(path: T) -> Result<VariantTable> {
    let reader = get_dynamic_reader(path.as_ref())?;
    let mut lines = reader
        .lines()
        .enumerate()
        .filter(|(_, text)| {
            text.as_ref()
                .map_or(true, |text| !text.trim().is_empty() && !text.starts_with("##"))
        });

    let columns = match lines.next() {
        Some((_, header)) => Columns::from_header(&header?)?,
        None => return Err(SvIoError::MissingHeader),
    };

    let mut variants = Vec::new();
    let mut filters = Vec::new();

    for (i, text) in lines {
        let text = text?;
        let line = Line {
            number: i + 1,
            fields: text.split('\t').collect(),
        };
        let record = parse_variant(&line, &columns)?;
        let reasons: Vec<String> = parse_filters(&line, &columns)
            .into_iter()
            .map(String::from)
            .collect();
        filters.push((record.id.clone(), reasons));
        variants.push(record);
    }

    info!(
        "Read {} variants from {}",
        variants.len(),
        path.as_ref().display()
    );

    Ok(VariantTable {
        variants,
        filters: SoftFilterStore::from_iter(filters),
    })
}
