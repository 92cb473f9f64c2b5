use fxhash::FxHashMap as HashMap;

use svlink_core::models::{Breakend, Breakpoint, Orientation, VariantRecord};
use svlink_core::ContigOrder;

const BUCKET_SIZE: u32 = 1_000_000;

type BucketKey = (String, Orientation, u32);

fn bucket_keys(breakend: &Breakend) -> Vec<BucketKey> {
    (breakend.start / BUCKET_SIZE..=breakend.end / BUCKET_SIZE)
        .map(|bucket| (breakend.contig.clone(), breakend.orientation, bucket))
        .collect()
}

///
/// Known hotspot breakends and breakpoints, widened by a fixed buffer and bucketed by
/// `contig:orientation:megabase`. A breakpoint lands in every combination of its two ends'
/// buckets, so a lookup only scans the entries sharing the query's buckets.
///
#[derive(Debug, Clone, Default)]
pub struct LocationIndex {
    breakends: HashMap<BucketKey, Vec<Breakend>>,
    breakpoints: HashMap<(BucketKey, BucketKey), Vec<Breakpoint>>,
    order: ContigOrder,
}

impl LocationIndex {
    ///
    /// Build the index from hotspot lists.
    ///
    /// # Arguments
    /// - breakends: single-ended hotspots
    /// - breakpoints: paired hotspots, in any end order
    /// - order: contig order used to canonicalise breakpoints
    /// - buffer: bases added on both sides of every hotspot
    pub fn new(
        breakends: Vec<Breakend>,
        breakpoints: Vec<Breakpoint>,
        order: ContigOrder,
        buffer: u32,
    ) -> LocationIndex {
        let mut index = LocationIndex {
            breakends: HashMap::default(),
            breakpoints: HashMap::default(),
            order,
        };

        for breakend in breakends {
            let expanded = breakend.expand(buffer);
            for key in bucket_keys(&expanded) {
                index.breakends.entry(key).or_default().push(expanded.clone());
            }
        }

        for breakpoint in breakpoints {
            let expanded = breakpoint.canonical(&index.order).expand(buffer);
            let start_keys = bucket_keys(&expanded.start);
            let end_keys = bucket_keys(&expanded.end);
            for start_key in &start_keys {
                for end_key in &end_keys {
                    index
                        .breakpoints
                        .entry((start_key.clone(), end_key.clone()))
                        .or_default()
                        .push(expanded.clone());
                }
            }
        }

        index
    }

    pub fn is_empty(&self) -> bool {
        self.breakends.is_empty() && self.breakpoints.is_empty()
    }

    pub fn contains_breakend(&self, breakend: &Breakend) -> bool {
        bucket_keys(breakend).iter().any(|key| {
            self.breakends
                .get(key)
                .is_some_and(|entries| entries.iter().any(|entry| entry.contains(breakend)))
        })
    }

    pub fn contains_breakpoint(&self, breakpoint: &Breakpoint) -> bool {
        let canonical = breakpoint.clone().canonical(&self.order);
        let swapped = Breakpoint {
            start: canonical.end.clone(),
            end: canonical.start.clone(),
        };
        self.lookup_breakpoint(&canonical) || self.lookup_breakpoint(&swapped)
    }

    fn lookup_breakpoint(&self, breakpoint: &Breakpoint) -> bool {
        let start_keys = bucket_keys(&breakpoint.start);
        let end_keys = bucket_keys(&breakpoint.end);
        start_keys.iter().any(|start_key| {
            end_keys.iter().any(|end_key| {
                self.breakpoints
                    .get(&(start_key.clone(), end_key.clone()))
                    .is_some_and(|entries| entries.iter().any(|entry| entry.contains(breakpoint)))
            })
        })
    }

    ///
    /// Is the variant at a hotspot. Singles are looked up as breakends, paired variants as the
    /// breakpoint formed with their mate. Lookups use the raw call position.
    ///
    pub fn contains_variant(&self, variant: &VariantRecord, mate: Option<&VariantRecord>) -> bool {
        match mate {
            None => self.contains_breakend(&point(variant)),
            Some(mate) => self.contains_breakpoint(&Breakpoint {
                start: point(variant),
                end: point(mate),
            }),
        }
    }
}

fn point(variant: &VariantRecord) -> Breakend {
    Breakend {
        contig: variant.contig.clone(),
        start: variant.start,
        end: variant.start,
        orientation: variant.orientation,
    }
}
