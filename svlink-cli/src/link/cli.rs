use clap::{Arg, Command, arg, value_parser};

pub const LINK_CMD: &str = "link";
pub const DEFAULT_OUT: &str = "svlink.tsv";

pub fn create_link_cli() -> Command {
    Command::new(LINK_CMD)
        .about("Build assembly, DSB and transitive links, mark duplicates and rescue linked variants.")
        .arg(
            arg!(--variants <variants>)
                .required(true)
                .help("Tab-separated variant table, plain or gzipped"),
        )
        .arg(
            Arg::new("hotspots-bed")
                .long("hotspots-bed")
                .help("BED file of single breakend hotspots"),
        )
        .arg(
            Arg::new("hotspots-bedpe")
                .long("hotspots-bedpe")
                .help("BEDPE file of breakpoint hotspots"),
        )
        .arg(
            arg!(--contigs <contigs>)
                .help("Contig order as a chrom.sizes or .fai file; natural order when omitted"),
        )
        .arg(arg!(--config <config>).help("TOML file of linkage thresholds"))
        .arg(arg!(--output <output>).help("Results table; gzipped when it ends in .gz"))
        .arg(arg!(--summary <summary>).help("Write run counts as JSON"))
        .arg(
            Arg::new("max-variants-for-transitive")
                .long("max-variants-for-transitive")
                .value_parser(value_parser!(usize))
                .help("Skip transitive links for batches larger than this"),
        )
        .arg(
            Arg::new("single-dedup-distance")
                .long("single-dedup-distance")
                .value_parser(value_parser!(u32))
                .help("Extra distance when looking for calls that duplicate a single breakend"),
        )
}
