use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use rstest::*;
use tempfile::tempdir;

use svlink::core::models::{Orientation, VariantRecord};
use svlink::core::{ContigOrder, LinkageConfig};
use svlink::filter::{LinkagePipeline, PipelineOutput, SoftFilterStore};
use svlink::index::{LocationIndex, VariantIndex};
use svlink::io::{ResultsWrite, read_hotspot_breakpoints, read_variants};
use svlink::links::LinkStore;

#[fixture]
fn path_to_variants() -> &'static str {
    "tests/data/variants.tsv"
}

#[fixture]
fn path_to_hotspots() -> &'static str {
    "tests/data/hotspots.bedpe"
}

#[fixture]
fn path_to_contigs() -> &'static str {
    "tests/data/contigs.fai"
}

fn run(variants: Vec<VariantRecord>, filters: SoftFilterStore) -> (VariantIndex, PipelineOutput) {
    let index = VariantIndex::new(variants).unwrap();
    let config = LinkageConfig::default();
    let output = LinkagePipeline::new(&index, &LocationIndex::default(), &config)
        .run(filters)
        .unwrap();
    (index, output)
}

/// Distinct link labels, each link being stored once per direction.
fn labels(links: &LinkStore) -> BTreeSet<&str> {
    links.iter().map(|link| link.label.as_str()).collect()
}

fn assert_symmetric(links: &LinkStore) {
    for link in links.iter() {
        assert!(
            links
                .links_from(&link.target_id)
                .iter()
                .any(|back| back.target_id == link.source_id && back.label == link.label),
            "{link} has no reverse"
        );
    }
}

mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    fn test_assembly_pair_and_dsb_third() {
        let variants = vec![
            VariantRecord::new("a", "chr1", 1000, Orientation::Forward)
                .with_mate("a_mate")
                .with_assemblies(["asm1/325"]),
            VariantRecord::new("a_mate", "chr2", 100, Orientation::Reverse).with_mate("a"),
            VariantRecord::new("b", "chr1", 1200, Orientation::Reverse)
                .with_mate("b_mate")
                .with_assemblies(["asm1/325"]),
            VariantRecord::new("b_mate", "chr3", 100, Orientation::Forward).with_mate("b"),
            VariantRecord::new("c", "chr2", 120, Orientation::Forward),
        ];

        let (_, output) = run(variants, SoftFilterStore::new());

        assert_eq!(labels(&output.links), BTreeSet::from(["asm1/325", "dsb1"]));
        assert_eq!(output.links.len(), 4);
        assert!(output.links.are_linked("a", "b"));
        assert!(output.links.are_linked("c", "a_mate"));
        assert_symmetric(&output.links);
    }

    #[rstest]
    fn test_assembly_pair_keeps_close_single_unlinked() {
        let variants = vec![
            VariantRecord::new("a", "chr1", 1000, Orientation::Forward)
                .with_mate("a_mate")
                .with_assemblies(["asm1/325"]),
            VariantRecord::new("a_mate", "chr2", 5000, Orientation::Reverse).with_mate("a"),
            VariantRecord::new("b", "chr1", 1010, Orientation::Reverse)
                .with_mate("b_mate")
                .with_assemblies(["asm1/325"]),
            VariantRecord::new("b_mate", "chr3", 8000, Orientation::Forward).with_mate("b"),
            VariantRecord::new("c", "chr1", 1020, Orientation::Forward),
        ];

        let (_, output) = run(variants, SoftFilterStore::new());

        assert_eq!(labels(&output.links), BTreeSet::from(["asm1/325"]));
        assert_eq!(output.links.len(), 2);
        assert!(output.links.are_linked("a", "b"));
        assert!(!output.links.is_linked("c"));
        assert_symmetric(&output.links);
    }

    #[rstest]
    fn test_three_close_singles_are_not_linked() {
        let variants = vec![
            VariantRecord::new("x", "chr1", 1000, Orientation::Forward),
            VariantRecord::new("y", "chr1", 1010, Orientation::Reverse),
            VariantRecord::new("z", "chr1", 1020, Orientation::Reverse),
        ];

        let (_, output) = run(variants, SoftFilterStore::new());

        assert!(output.links.is_empty());
    }

    #[rstest]
    fn test_rescue_follows_links_and_mates() {
        let variants = vec![
            VariantRecord::new("a", "chr1", 1000, Orientation::Forward).with_mate("a_mate"),
            VariantRecord::new("a_mate", "chr4", 5000, Orientation::Reverse).with_mate("a"),
            VariantRecord::new("b", "chr4", 5010, Orientation::Forward),
        ];
        let filters =
            SoftFilterStore::from_iter([("a", vec!["minQual"]), ("a_mate", vec!["minQual"])]);

        let (_, output) = run(variants.clone(), filters.clone());
        let mut rescued: Vec<&str> = output.rescued.iter().map(String::as_str).collect();
        rescued.sort_unstable();
        assert_eq!(rescued, vec!["a", "a_mate"]);

        // rerunning on the rescued filters changes nothing
        let (_, again) = run(variants, output.filters.clone());
        assert!(again.rescued.is_empty());
        assert_eq!(again.filters, output.filters);
    }

    #[rstest]
    fn test_link_files_end_to_end(
        path_to_variants: &str,
        path_to_hotspots: &str,
        path_to_contigs: &str,
    ) {
        let table = read_variants(path_to_variants).unwrap();
        let order = ContigOrder::from_file(path_to_contigs).unwrap();
        let config = LinkageConfig::default();
        let hotspots = LocationIndex::new(
            vec![],
            read_hotspot_breakpoints(path_to_hotspots).unwrap(),
            order.clone(),
            config.hotspot_buffer,
        );
        let index = VariantIndex::with_contig_order(table.variants, &order).unwrap();

        let output = LinkagePipeline::new(&index, &hotspots, &config)
            .run(table.filters)
            .unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("results.tsv");
        output.write_results(&path, &index).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();

        let expected = "#id\tfilters\tlocal_links\talternate_path\n\
            asm_a\tPASS\tasm1/325\t.\n\
            asm_b\tPASS\tasm1/325\t.\n\
            asm_a_mate\tPASS\t.\t.\n\
            asm_b_mate\tPASS\t.\t.\n\
            imp\tDEDUP\t.\tprecise\n\
            precise\tPASS\t.\t.\n\
            imp_mate\tDEDUP\t.\tprecise_mate\n\
            precise_mate\tPASS\t.\t.\n\
            sgl_weak\tPASS\tdsb1\t.\n\
            sgl_strong\tPASS\tdsb1\t.\n\
            lonely\tPON\t.\t.\n\
            abl\tPASS\t.\t.\n\
            bcr\tPASS\t.\t.\n";
        assert_eq!(written, expected);
        assert_symmetric(&output.links);
    }
}
