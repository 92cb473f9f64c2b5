use std::ops::Range;

use fxhash::FxHashMap as HashMap;
use log::debug;

use svlink_core::models::{Mate, VariantRecord};
use svlink_core::ContigOrder;

use crate::errors::IndexError;

///
/// All variant records of one batch, sorted by contig and then by `min_start`/`start`, with an
/// id lookup built once.
///
/// Proximity queries ([`neighbors`](VariantIndex::neighbors)) scan outwards from the variant's
/// own slot and stop as soon as the sort order guarantees nothing further can overlap, so they
/// never touch the whole contig.
///
#[derive(Debug, Clone)]
pub struct VariantIndex {
    variants: Vec<VariantRecord>,
    contigs: HashMap<String, Range<usize>>,
    ids: HashMap<String, usize>,
}

impl VariantIndex {
    pub fn new(variants: Vec<VariantRecord>) -> Result<VariantIndex, IndexError> {
        VariantIndex::with_contig_order(variants, &ContigOrder::default())
    }

    ///
    /// Build the index, checking ids are unique and every mate reference is mutual.
    ///
    /// # Arguments
    /// - variants: every record in the batch
    /// - order: contig order used to lay out the records
    pub fn with_contig_order(
        mut variants: Vec<VariantRecord>,
        order: &ContigOrder,
    ) -> Result<VariantIndex, IndexError> {
        variants.sort_by(|a, b| {
            order
                .compare(&a.contig, &b.contig)
                .then(a.min_start.cmp(&b.min_start))
                .then(a.start.cmp(&b.start))
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut ids: HashMap<String, usize> = HashMap::default();
        ids.reserve(variants.len());
        let mut contigs: HashMap<String, Range<usize>> = HashMap::default();

        for (i, variant) in variants.iter().enumerate() {
            variant
                .validate()
                .map_err(|e| IndexError::InvalidRecord(e.to_string()))?;

            if ids.insert(variant.id.clone(), i).is_some() {
                return Err(IndexError::DuplicateId(variant.id.clone()));
            }

            contigs
                .entry(variant.contig.clone())
                .and_modify(|range| range.end = i + 1)
                .or_insert(i..i + 1);
        }

        let index = VariantIndex {
            variants,
            contigs,
            ids,
        };
        index.check_mates()?;

        debug!(
            "Indexed {} variants over {} contigs",
            index.variants.len(),
            index.contigs.len()
        );

        Ok(index)
    }

    fn check_mates(&self) -> Result<(), IndexError> {
        for variant in &self.variants {
            if let Mate::Paired(mate_id) = &variant.mate {
                let mate = self.by_id(mate_id)?;
                if !mate.is_mate_of(variant) || mate.id == variant.id {
                    return Err(IndexError::MateMismatch {
                        id: variant.id.clone(),
                        mate_id: mate_id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Records in index order: contig, then position.
    pub fn iter(&self) -> impl Iterator<Item = &VariantRecord> {
        self.variants.iter()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    pub fn by_id(&self, id: &str) -> Result<&VariantRecord, IndexError> {
        self.ids
            .get(id)
            .map(|&i| &self.variants[i])
            .ok_or_else(|| IndexError::NotFound(id.to_string()))
    }

    /// The other breakend of `variant`, `None` for singles.
    pub fn mate(&self, variant: &VariantRecord) -> Result<Option<&VariantRecord>, IndexError> {
        match &variant.mate {
            Mate::Single => Ok(None),
            Mate::Paired(mate_id) => self.by_id(mate_id).map(Some),
        }
    }

    ///
    /// Find the other variants on the same contig whose `[min_start, max_start]` overlaps
    /// `[variant.min_start - additional_distance, variant.max_start + additional_distance]`.
    /// The variant itself and its mate are never returned. Results come back in index order.
    ///
    /// # Arguments
    /// - variant: the record to search around, must be part of this index
    /// - additional_distance: how much to widen the variant's window
    /// - seek_distance: how far to scan before stopping; the scan relies on the sort order so
    ///   this should be at least `additional_distance`
    /// - predicate: extra condition every returned candidate must satisfy
    pub fn neighbors<F>(
        &self,
        variant: &VariantRecord,
        additional_distance: u32,
        seek_distance: u32,
        predicate: F,
    ) -> Result<Vec<&VariantRecord>, IndexError>
    where
        F: Fn(&VariantRecord) -> bool,
    {
        let position = *self
            .ids
            .get(&variant.id)
            .ok_or_else(|| IndexError::NotFound(variant.id.clone()))?;
        let range = self
            .contigs
            .get(&variant.contig)
            .ok_or_else(|| IndexError::NotFound(variant.id.clone()))?;

        let window_start = variant.min_start.saturating_sub(additional_distance);
        let window_end = variant.max_start.saturating_add(additional_distance);
        let seek_start = variant.min_start.saturating_sub(seek_distance);
        let seek_end = variant.max_start.saturating_add(seek_distance);

        let is_candidate = |other: &VariantRecord| {
            other.id != variant.id
                && !variant.is_mate_of(other)
                && other.overlaps_window(window_start, window_end)
                && predicate(other)
        };

        let mut result = Vec::new();
        for other in self.variants[range.start..position].iter().rev() {
            if other.max_start < seek_start {
                break;
            }
            if is_candidate(other) {
                result.push(other);
            }
        }
        result.reverse();

        for other in &self.variants[position + 1..range.end] {
            if other.min_start > seek_end {
                break;
            }
            if is_candidate(other) {
                result.push(other);
            }
        }

        Ok(result)
    }
}
