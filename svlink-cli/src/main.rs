mod link;

use anyhow::Result;
use clap::{Arg, ArgMatches, Command};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "svlink";
    pub const BIN_NAME: &str = "svlink";
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Link, rescue and deduplicate structural variant breakends called by an upstream SV caller.")
        .subcommand_required(true)
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("Log filter, e.g. 'debug' or 'svlink_links=debug'. Overrides RUST_LOG."),
        )
        .subcommand(link::cli::create_link_cli())
}

fn init_logging(matches: &ArgMatches) {
    let mut log_builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(consts::DEFAULT_LOG_LEVEL),
    );
    if let Some(level) = matches.get_one::<String>("log-level") {
        log_builder.parse_filters(level);
    }
    log_builder.format_module_path(false).init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(&matches);

    match matches.subcommand() {
        //
        // LINK
        //
        Some((link::cli::LINK_CMD, matches)) => {
            link::handlers::run_link(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
