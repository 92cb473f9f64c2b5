use fxhash::FxHashSet as HashSet;
use log::{debug, info};

use svlink_core::models::VariantRecord;
use svlink_core::LinkageConfig;
use svlink_index::{IndexError, VariantIndex};

use crate::link::Link;
use crate::store::LinkStore;

///
/// Pair up unlinked breakends that look like the two ends of one double-strand break.
///
/// Every variant that is not assembly linked, not excluded and not already paired looks for
/// opposite-facing neighbours within `dsb_additional_distance`. A pair is only accepted when
/// each side is the other's only candidate and the two are not already assembly linked. Pairs
/// are labelled `dsb1`, `dsb2`, ... in index order.
///
/// # Arguments
/// - index: the variant index of the batch
/// - assembly_links: links from [`assembly_links`](crate::assembly_links)
/// - excluded: ids that take no part, typically duplicates
/// - config: distance thresholds
pub fn dsb_links(
    index: &VariantIndex,
    assembly_links: &LinkStore,
    excluded: &HashSet<String>,
    config: &LinkageConfig,
) -> Result<LinkStore, IndexError> {
    let mut linked: HashSet<&str> = HashSet::default();
    let mut links = Vec::new();

    for variant in index.iter() {
        if linked.contains(variant.id.as_str())
            || excluded.contains(&variant.id)
            || assembly_links.is_linked(&variant.id)
        {
            continue;
        }

        let Some(other) = unique_partner(index, variant, excluded, config)? else {
            continue;
        };

        let confirmed = match unique_partner(index, other, excluded, config)? {
            Some(back) => back.id == variant.id,
            None => false,
        };
        if !confirmed {
            debug!("{} has a one-sided dsb candidate {}", variant.id, other.id);
            continue;
        }

        if assembly_links.are_linked(&variant.id, &other.id) {
            continue;
        }

        let label = format!("dsb{}", links.len() + 1);
        links.push(Link::new(&label, variant, other));
        linked.insert(variant.id.as_str());
        linked.insert(other.id.as_str());
    }

    info!("Found {} dsb links", links.len());

    Ok(LinkStore::from_undirected(links))
}

fn unique_partner<'a>(
    index: &'a VariantIndex,
    variant: &VariantRecord,
    excluded: &HashSet<String>,
    config: &LinkageConfig,
) -> Result<Option<&'a VariantRecord>, IndexError> {
    let nearby = index.neighbors(
        variant,
        config.dsb_additional_distance,
        config.dsb_seek_distance,
        |other| other.orientation != variant.orientation && !excluded.contains(&other.id),
    )?;

    match nearby.as_slice() {
        [only] => Ok(Some(*only)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use svlink_core::models::Orientation;

    fn single(id: &str, start: u32, orientation: Orientation) -> VariantRecord {
        VariantRecord::new(id, "chr1", start, orientation)
    }

    fn build(variants: Vec<VariantRecord>, excluded: &[&str]) -> LinkStore {
        let index = VariantIndex::new(variants).unwrap();
        let assembly = crate::assembly_links(index.iter());
        let excluded: HashSet<String> = excluded.iter().map(|s| s.to_string()).collect();
        dsb_links(&index, &assembly, &excluded, &LinkageConfig::default()).unwrap()
    }

    #[rstest]
    fn test_simple_dsb() {
        let store = build(
            vec![
                single("a", 1000, Orientation::Forward),
                single("b", 1010, Orientation::Reverse),
            ],
            &[],
        );

        assert_eq!(store.len(), 2);
        let link = &store.links_from("a")[0];
        assert_eq!(link.label, "dsb1");
        assert_eq!(link.target_id, "b");
        assert_eq!(store.links_from("b")[0], link.reverse());
    }

    #[rstest]
    fn test_same_orientation_is_not_dsb() {
        let store = build(
            vec![
                single("a", 1000, Orientation::Forward),
                single("b", 1010, Orientation::Forward),
            ],
            &[],
        );
        assert!(store.is_empty());
    }

    #[rstest]
    fn test_too_far_apart() {
        let store = build(
            vec![
                single("a", 1000, Orientation::Forward),
                single("b", 1031, Orientation::Reverse),
            ],
            &[],
        );
        assert!(store.is_empty());
    }

    #[rstest]
    fn test_too_many_close_by_links() {
        let store = build(
            vec![
                single("a", 1000, Orientation::Forward),
                single("b", 1010, Orientation::Reverse),
                single("c", 1020, Orientation::Forward),
            ],
            &[],
        );
        assert!(store.is_empty());
    }

    #[rstest]
    fn test_one_sided_candidate_is_rejected() {
        // a only sees b, but b sees both a and c
        let store = build(
            vec![
                single("a", 1000, Orientation::Forward),
                single("b", 1025, Orientation::Reverse),
                single("c", 1050, Orientation::Forward),
            ],
            &[],
        );
        assert!(store.is_empty());
    }

    #[rstest]
    fn test_excluded_variants_do_not_compete() {
        let store = build(
            vec![
                single("a", 1000, Orientation::Forward),
                single("b", 1010, Orientation::Reverse),
                single("c", 1020, Orientation::Forward),
            ],
            &["c"],
        );
        assert!(store.are_linked("a", "b"));
        assert!(!store.is_linked("c"));
    }

    #[rstest]
    fn test_labels_follow_discovery_order() {
        let store = build(
            vec![
                single("a", 1000, Orientation::Forward),
                single("b", 1010, Orientation::Reverse),
                single("c", 50_000, Orientation::Reverse),
                single("d", 50_005, Orientation::Forward),
            ],
            &[],
        );
        assert_eq!(store.local_link_labels("a"), vec!["dsb1"]);
        assert_eq!(store.local_link_labels("d"), vec!["dsb2"]);
    }

    #[rstest]
    fn test_assembly_linked_variants_are_skipped() {
        let store = build(
            vec![
                VariantRecord::new("a", "chr1", 1000, Orientation::Forward)
                    .with_mate("a_mate")
                    .with_assemblies(["asm1/1"]),
                VariantRecord::new("a_mate", "chr2", 1000, Orientation::Reverse).with_mate("a"),
                VariantRecord::new("b", "chr1", 1010, Orientation::Reverse)
                    .with_mate("b_mate")
                    .with_assemblies(["asm1/1"]),
                VariantRecord::new("b_mate", "chr3", 1000, Orientation::Forward).with_mate("b"),
            ],
            &[],
        );
        assert!(store.is_empty());
    }
}
