//! Helpers shared by every search that tries to explain a breakpoint through other calls.
use log::debug;

use svlink_core::models::VariantRecord;
use svlink_core::LinkageConfig;
use svlink_index::{IndexError, VariantIndex};

///
/// Precise paired breakends close to `variant` that face the same way: each of them could be
/// the same break called more precisely. The search window is widened by the variant's inserted
/// sequence.
///
/// Returns `None` when there are more than `max_alternatives` candidates, which marks a region
/// too busy to reason about.
///
pub fn alternative_starts<'a>(
    index: &'a VariantIndex,
    variant: &VariantRecord,
    config: &LinkageConfig,
) -> Result<Option<Vec<&'a VariantRecord>>, IndexError> {
    let additional = config
        .alternative_additional_distance
        .saturating_add(variant.insert_sequence_length);
    let seek = config
        .alternative_seek_distance
        .saturating_add(variant.insert_sequence_length);

    let candidates = index.neighbors(variant, additional, seek, |other| {
        other.orientation == variant.orientation && other.is_precise() && !other.is_single()
    })?;

    if candidates.len() > config.max_alternatives {
        debug!(
            "{} has {} alternative starts, skipping",
            variant.id,
            candidates.len()
        );
        return Ok(None);
    }

    Ok(Some(candidates))
}

/// A breakend stands in for `target` when it is a different call at the same oriented position.
pub fn matches_target(candidate: &VariantRecord, target: &VariantRecord) -> bool {
    candidate.id != target.id && candidate.is_equivalent_breakend(target)
}

///
/// A precise target pins down how much sequence sits between the two sides of the break, so a
/// chain only explains it if the chain's distance bounds contain that length.
///
pub fn is_distance_consistent(target: &VariantRecord, min_distance: u32, max_distance: u32) -> bool {
    if target.is_imprecise() {
        return true;
    }
    let expected = target.inserted_and_duplicated_length();
    min_distance <= expected && expected <= max_distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use svlink_core::models::Orientation;

    fn pair(id: &str, start: u32, orientation: Orientation) -> [VariantRecord; 2] {
        let mate_id = format!("{id}_mate");
        [
            VariantRecord::new(id, "chr1", start, orientation).with_mate(&mate_id),
            VariantRecord::new(&mate_id, "chr8", start, orientation).with_mate(id),
        ]
    }

    #[rstest]
    fn test_alternative_starts() {
        let mut variants = Vec::new();
        variants.extend(pair("imprecise", 10_000, Orientation::Forward));
        variants.extend(pair("alt", 10_500, Orientation::Forward));
        variants.extend(pair("wrong_way", 10_200, Orientation::Reverse));
        variants.extend(pair("too_far", 12_000, Orientation::Forward));
        variants.push(VariantRecord::new("single", "chr1", 10_100, Orientation::Forward));
        let [fuzzy, fuzzy_mate] = pair("fuzzy", 9_900, Orientation::Forward);
        variants.push(fuzzy.with_imprecise(true));
        variants.push(fuzzy_mate.with_imprecise(true));

        let index = VariantIndex::new(variants).unwrap();
        let variant = index.by_id("imprecise").unwrap();

        let alternatives = alternative_starts(&index, variant, &LinkageConfig::default())
            .unwrap()
            .unwrap();
        let ids: Vec<&str> = alternatives.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["alt"]);
    }

    #[rstest]
    fn test_inserted_sequence_widens_window() {
        let mut variants = Vec::new();
        variants.extend(pair("imprecise", 10_000, Orientation::Forward));
        variants.extend(pair("alt", 11_400, Orientation::Forward));
        let index = VariantIndex::new(variants.clone()).unwrap();
        let variant = index.by_id("imprecise").unwrap();
        let config = LinkageConfig::default();
        assert!(alternative_starts(&index, variant, &config).unwrap().unwrap().is_empty());

        variants[0] = variants[0].clone().with_insert_sequence_length(500);
        let index = VariantIndex::new(variants).unwrap();
        let variant = index.by_id("imprecise").unwrap();
        assert_eq!(alternative_starts(&index, variant, &config).unwrap().unwrap().len(), 1);
    }

    #[rstest]
    fn test_too_many_alternatives() {
        let mut variants = Vec::new();
        variants.extend(pair("imprecise", 10_000, Orientation::Forward));
        for i in 0..4 {
            variants.extend(pair(&format!("alt{i}"), 10_010 + i, Orientation::Forward));
        }
        let index = VariantIndex::new(variants).unwrap();
        let variant = index.by_id("imprecise").unwrap();
        let config = LinkageConfig {
            max_alternatives: 3,
            ..Default::default()
        };
        assert!(alternative_starts(&index, variant, &config).unwrap().is_none());
    }

    #[rstest]
    fn test_matches_target() {
        let target = VariantRecord::new("t", "chr2", 500, Orientation::Reverse).with_confidence_interval(20, 20);
        let near = VariantRecord::new("n", "chr2", 515, Orientation::Reverse);
        let flipped = VariantRecord::new("f", "chr2", 515, Orientation::Forward);
        assert!(matches_target(&near, &target));
        assert!(!matches_target(&flipped, &target));
        assert!(!matches_target(&target, &target));
    }

    #[rstest]
    #[case(false, 100, 100, 120, true)]
    #[case(false, 100, 101, 120, false)]
    #[case(false, 100, 80, 99, false)]
    #[case(true, 100, 0, 0, true)]
    fn test_distance_consistency(
        #[case] imprecise: bool,
        #[case] inserted: u32,
        #[case] min: u32,
        #[case] max: u32,
        #[case] expected: bool,
    ) {
        let target = VariantRecord::new("t", "chr2", 500, Orientation::Reverse)
            .with_imprecise(imprecise)
            .with_insert_sequence_length(inserted);
        assert_eq!(is_distance_consistent(&target, min, max), expected);
    }
}
