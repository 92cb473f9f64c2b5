use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use serde::Serialize;

use svlink_core::{ContigOrder, LinkageConfig};
use svlink_filter::{LinkagePipeline, PipelineOutput};
use svlink_index::{LocationIndex, VariantIndex};
use svlink_io::{ResultsWrite, read_hotspot_breakends, read_hotspot_breakpoints, read_variants};

use super::cli::DEFAULT_OUT;
use crate::consts::{PKG_NAME, VERSION};

/// Counts written by `--summary`.
#[derive(Serialize, Debug, PartialEq)]
pub struct LinkageSummary {
    pub tool: String,
    pub version: String,
    pub variants: usize,
    pub passing: usize,
    pub filtered: usize,
    pub duplicates: usize,
    pub rescued: usize,
    pub links: usize,
    pub alternate_paths: usize,
}

impl LinkageSummary {
    pub fn new(index: &VariantIndex, output: &PipelineOutput) -> LinkageSummary {
        let filtered = index
            .iter()
            .filter(|variant| output.filters.is_filtered(&variant.id))
            .count();
        LinkageSummary {
            tool: PKG_NAME.to_string(),
            version: VERSION.to_string(),
            variants: index.len(),
            passing: index.len() - filtered,
            filtered,
            duplicates: output.duplicates.len(),
            rescued: output.rescued.len(),
            // each link is stored once per direction
            links: output.links.len() / 2,
            alternate_paths: output.alternate_paths.len(),
        }
    }
}

///
/// Read linkage thresholds from a TOML file. Keys left out keep their defaults.
///
pub fn load_config(path: Option<&String>) -> Result<LinkageConfig> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {path}"))?;
            toml::from_str::<LinkageConfig>(&text)
                .with_context(|| format!("Failed to parse config file: {path}"))?
        }
        None => LinkageConfig::default(),
    };
    Ok(config)
}

fn apply_overrides(mut config: LinkageConfig, matches: &ArgMatches) -> Result<LinkageConfig> {
    if let Some(max) = matches.get_one::<usize>("max-variants-for-transitive") {
        config.max_variants_for_transitive = *max;
    }
    if let Some(distance) = matches.get_one::<u32>("single-dedup-distance") {
        config.single_dedup_distance = *distance;
    }
    config.validate()?;
    Ok(config)
}

fn spinner() -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    Ok(pb)
}

pub fn run_link(matches: &ArgMatches) -> Result<()> {
    // get arguments from CLI
    let variants = matches
        .get_one::<String>("variants")
        .context("A path to a variant table is required.")?;

    let default_out = DEFAULT_OUT.to_string();
    let output_path = matches.get_one::<String>("output").unwrap_or(&default_out);

    let config = load_config(matches.get_one::<String>("config"))?;
    let config = apply_overrides(config, matches)?;

    let order = match matches.get_one::<String>("contigs") {
        Some(path) => ContigOrder::from_file(path)
            .with_context(|| format!("Failed to read contig order: {path}"))?,
        None => ContigOrder::default(),
    };

    let pb = spinner()?;

    pb.set_message(format!("Reading variants from {variants}"));
    let table = read_variants(variants)
        .with_context(|| format!("Failed to read variant table: {variants}"))?;

    pb.set_message("Reading hotspots");
    let breakends = match matches.get_one::<String>("hotspots-bed") {
        Some(path) => read_hotspot_breakends(path)
            .with_context(|| format!("Failed to read hotspot BED: {path}"))?,
        None => Vec::new(),
    };
    let breakpoints = match matches.get_one::<String>("hotspots-bedpe") {
        Some(path) => read_hotspot_breakpoints(path)
            .with_context(|| format!("Failed to read hotspot BEDPE: {path}"))?,
        None => Vec::new(),
    };
    let hotspots = LocationIndex::new(breakends, breakpoints, order.clone(), config.hotspot_buffer);

    pb.set_message("Indexing variants");
    let index = VariantIndex::with_contig_order(table.variants, &order)?;

    pb.set_message("Linking variants");
    let output = LinkagePipeline::new(&index, &hotspots, &config).run(table.filters)?;
    pb.finish_and_clear();

    output
        .write_results(output_path, &index)
        .with_context(|| format!("Failed to write results: {output_path}"))?;

    let summary = LinkageSummary::new(&index, &output);
    info!(
        "{} variants: {} passing, {} duplicates, {} rescued, {} links",
        summary.variants, summary.passing, summary.duplicates, summary.rescued, summary.links
    );

    if let Some(path) = matches.get_one::<String>("summary") {
        write_summary(&summary, Path::new(path))?;
    }

    Ok(())
}

fn write_summary(summary: &LinkageSummary, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write summary: {}", path.display()))?;
    Ok(())
}
