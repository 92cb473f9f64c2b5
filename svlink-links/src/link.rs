use std::fmt::{self, Display};

use svlink_core::models::VariantRecord;

///
/// An edge between two breakends. The direction only records which endpoint the edge is
/// stored under; [`reverse`](Link::reverse) describes the same relationship.
///
/// `min_distance`/`max_distance` bound the physical separation of the two breakends given
/// their confidence intervals.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Link {
    pub label: String,
    pub source_id: String,
    pub target_id: String,
    pub min_distance: u32,
    pub max_distance: u32,
}

impl Link {
    /// Breakends on different contigs get the unbounded `[0, u32::MAX]` distance.
    pub fn new(label: &str, source: &VariantRecord, target: &VariantRecord) -> Link {
        if source.contig != target.contig {
            return Link {
                label: label.to_string(),
                source_id: source.id.clone(),
                target_id: target.id.clone(),
                min_distance: 0,
                max_distance: u32::MAX,
            };
        }

        let min_distance = if source.overlaps_window(target.min_start, target.max_start) {
            0
        } else if target.min_start > source.max_start {
            target.min_start - source.max_start
        } else {
            source.min_start - target.max_start
        };
        let max_distance = target
            .max_start
            .abs_diff(source.min_start)
            .max(source.max_start.abs_diff(target.min_start));

        Link {
            label: label.to_string(),
            source_id: source.id.clone(),
            target_id: target.id.clone(),
            min_distance,
            max_distance,
        }
    }

    pub fn reverse(&self) -> Link {
        Link {
            label: self.label.clone(),
            source_id: self.target_id.clone(),
            target_id: self.source_id.clone(),
            min_distance: self.min_distance,
            max_distance: self.max_distance,
        }
    }

    /// Same label and distances, with endpoints in either order.
    pub fn is_same_relationship(&self, other: &Link) -> bool {
        *self == *other || *self == other.reverse()
    }
}

impl Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}<{}-{}>{}",
            self.label, self.source_id, self.min_distance, self.max_distance, self.target_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use svlink_core::models::Orientation;

    #[rstest]
    fn test_distances_precise() {
        let a = VariantRecord::new("a", "chr1", 1000, Orientation::Reverse);
        let b = VariantRecord::new("b", "chr1", 1200, Orientation::Forward);
        let link = Link::new("asm1", &a, &b);
        assert_eq!(link.min_distance, 200);
        assert_eq!(link.max_distance, 200);
    }

    #[rstest]
    fn test_distances_with_confidence_intervals() {
        let a = VariantRecord::new("a", "chr1", 1000, Orientation::Reverse).with_confidence_interval(10, 10);
        let b = VariantRecord::new("b", "chr1", 1200, Orientation::Forward).with_confidence_interval(5, 0);
        let link = Link::new("asm1", &a, &b);
        assert_eq!(link.min_distance, 185);
        assert_eq!(link.max_distance, 210);

        let reverse = Link::new("asm1", &b, &a);
        assert_eq!(reverse.min_distance, 185);
        assert_eq!(reverse.max_distance, 210);
    }

    #[rstest]
    fn test_overlapping_intervals_have_zero_min() {
        let a = VariantRecord::new("a", "chr1", 1000, Orientation::Reverse).with_confidence_interval(50, 50);
        let b = VariantRecord::new("b", "chr1", 1020, Orientation::Forward);
        assert_eq!(Link::new("dsb1", &a, &b).min_distance, 0);
    }

    #[rstest]
    fn test_distances_across_contigs() {
        let a = VariantRecord::new("a", "chr1", 1000, Orientation::Reverse);
        let b = VariantRecord::new("b", "chr2", 1000, Orientation::Forward);
        let link = Link::new("asm1", &a, &b);
        assert_eq!(link.min_distance, 0);
        assert_eq!(link.max_distance, u32::MAX);
    }

    #[rstest]
    fn test_reverse() {
        let a = VariantRecord::new("a", "chr1", 1000, Orientation::Reverse);
        let b = VariantRecord::new("b", "chr1", 1200, Orientation::Forward);
        let link = Link::new("dsb1", &a, &b);
        let reverse = link.reverse();

        assert_eq!(reverse.source_id, "b");
        assert_eq!(reverse.target_id, "a");
        assert_eq!(reverse.label, link.label);
        assert_eq!(reverse.reverse(), link);
        assert!(link.is_same_relationship(&reverse));
    }
}
