use std::io::BufRead;
use std::path::Path;

use log::info;

use svlink_core::models::{Breakend, Breakpoint, Orientation};
use svlink_core::utils::{get_dynamic_reader, is_header_line};

use crate::error::{Result, SvIoError};

fn parse_error(line: usize, reason: impl Into<String>) -> SvIoError {
    SvIoError::HotspotParseError {
        line,
        reason: reason.into(),
    }
}

fn parse_position(field: Option<&str>, line: usize, name: &str) -> Result<u32> {
    let field = field.ok_or_else(|| parse_error(line, format!("missing {name}")))?;
    field
        .trim()
        .parse::<u32>()
        .map_err(|_| parse_error(line, format!("{name} is not a position: {field}")))
}

/// `+`/`-` map to one orientation, `.` to both.
fn parse_strand(field: Option<&str>, line: usize) -> Result<Vec<Orientation>> {
    match field.map(str::trim) {
        None | Some(".") => Ok(vec![Orientation::Forward, Orientation::Reverse]),
        Some(strand) => strand
            .parse::<Orientation>()
            .map(|orientation| vec![orientation])
            .map_err(|e| parse_error(line, e.to_string())),
    }
}

///
/// Parse one BED-style triple starting at `fields`, converting the zero-based half-open BED
/// interval to one-based closed coordinates.
///
fn parse_interval<'a, I>(fields: &mut I, line: usize) -> Result<(String, u32, u32)>
where
    I: Iterator<Item = &'a str>,
{
    let contig = fields
        .next()
        .filter(|contig| !contig.is_empty())
        .ok_or_else(|| parse_error(line, "missing contig"))?;
    let start = parse_position(fields.next(), line, "start")?;
    let end = parse_position(fields.next(), line, "end")?;
    if end < start {
        return Err(parse_error(line, format!("end {end} before start {start}")));
    }
    Ok((contig.to_string(), start + 1, end.max(start + 1)))
}

///
/// Read single-breakend hotspots from a BED file (plain or gzipped). The sixth column, when
/// present, gives the orientation; `.` or no strand registers the region for both.
///
/// # Arguments
/// - path: path to the BED file
pub fn read_hotspot_breakends<T: AsRef<Path>>(path: T) -> Result<Vec<Breakend>> {
    let reader = get_dynamic_reader(path.as_ref())?;
    let mut breakends = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if is_header_line(&line) {
            continue;
        }
        let line_number = i + 1;
        let mut fields = line.split('\t');
        let (contig, start, end) = parse_interval(&mut fields, line_number)?;
        let strand = fields.nth(2);

        for orientation in parse_strand(strand, line_number)? {
            breakends.push(Breakend {
                contig: contig.clone(),
                start,
                end,
                orientation,
            });
        }
    }

    info!(
        "Read {} hotspot breakends from {}",
        breakends.len(),
        path.as_ref().display()
    );

    Ok(breakends)
}

///
/// Read paired hotspots from a BEDPE file (plain or gzipped): two intervals, name, score, then
/// one strand column per side.
///
/// # Arguments
/// - path: path to the BEDPE file
pub fn read_hotspot_breakpoints<T: AsRef<Path>>(path: T) -> Result<Vec<Breakpoint>> {
    let reader = get_dynamic_reader(path.as_ref())?;
    let mut breakpoints = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if is_header_line(&line) {
            continue;
        }
        let line_number = i + 1;
        let mut fields = line.split('\t');
        let (start_contig, start_begin, start_end) = parse_interval(&mut fields, line_number)?;
        let (end_contig, end_begin, end_end) = parse_interval(&mut fields, line_number)?;
        let start_strands = parse_strand(fields.nth(2), line_number)?;
        let end_strands = parse_strand(fields.next(), line_number)?;

        for start_orientation in &start_strands {
            for end_orientation in &end_strands {
                breakpoints.push(Breakpoint {
                    start: Breakend {
                        contig: start_contig.clone(),
                        start: start_begin,
                        end: start_end,
                        orientation: *start_orientation,
                    },
                    end: Breakend {
                        contig: end_contig.clone(),
                        start: end_begin,
                        end: end_end,
                        orientation: *end_orientation,
                    },
                });
            }
        }
    }

    info!(
        "Read {} hotspot breakpoints from {}",
        breakpoints.len(),
        path.as_ref().display()
    );

    Ok(breakpoints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[rstest]
    fn test_read_breakends() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "hotspots.bed",
            "track name=hotspots\nchr3\t999\t1010\tfra3b\t0\t+\nchr5\t100\t200\n",
        );

        let breakends = read_hotspot_breakends(&path).unwrap();

        assert_eq!(breakends.len(), 3);
        assert_eq!(
            breakends[0],
            Breakend {
                contig: "chr3".to_string(),
                start: 1000,
                end: 1010,
                orientation: Orientation::Forward,
            }
        );
        assert_eq!(breakends[1].orientation, Orientation::Forward);
        assert_eq!(breakends[2].orientation, Orientation::Reverse);
    }

    #[rstest]
    fn test_read_breakpoints() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "fusions.bedpe",
            "#chrom1\tstart1\tend1\tchrom2\tstart2\tend2\tname\tscore\tstrand1\tstrand2\n\
             chr22\t23289999\t23290100\tchr9\t130713999\t130714100\tbcr_abl\t0\t+\t-\n",
        );

        let breakpoints = read_hotspot_breakpoints(&path).unwrap();

        assert_eq!(breakpoints.len(), 1);
        assert_eq!(breakpoints[0].start.contig, "chr22");
        assert_eq!(breakpoints[0].start.start, 23_290_000);
        assert_eq!(breakpoints[0].start.orientation, Orientation::Forward);
        assert_eq!(breakpoints[0].end.contig, "chr9");
        assert_eq!(breakpoints[0].end.orientation, Orientation::Reverse);
    }

    #[rstest]
    #[case("chr1\tabc\t100\n")]
    #[case("chr1\t200\t100\n")]
    #[case("chr1\t100\t200\tname\t0\tx\n")]
    fn test_malformed_breakend(#[case] content: &str) {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "bad.bed", content);
        assert!(matches!(
            read_hotspot_breakends(&path),
            Err(SvIoError::HotspotParseError { line: 1, .. })
        ));
    }

    #[rstest]
    fn test_missing_file() {
        assert!(matches!(
            read_hotspot_breakends("does/not/exist.bed"),
            Err(SvIoError::Open(_))
        ));
    }
}
