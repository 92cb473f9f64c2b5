use std::collections::VecDeque;

use fxhash::FxHashSet as HashSet;
use log::debug;

use svlink_core::models::VariantRecord;
use svlink_core::LinkageConfig;
use svlink_index::{IndexError, VariantIndex};
use svlink_links::alternatives::{alternative_starts, is_distance_consistent, matches_target};
use svlink_links::{AlternatePath, Link, LinkStore, TransitiveLinkResolver};

use crate::soft_filter::SoftFilterStore;

///
/// Finds calls that repeat a better call of the same event.
///
/// An imprecise breakpoint is a duplicate when a precise breakpoint starts where it starts and,
/// possibly through a chain of other breakpoints, ends where its mate ends. A single breakend is
/// a duplicate when a preferred call sits on top of it.
///
pub struct DedupEngine<'a> {
    index: &'a VariantIndex,
    assembly_links: &'a LinkStore,
    config: &'a LinkageConfig,
    resolver: TransitiveLinkResolver<'a>,
}

impl<'a> DedupEngine<'a> {
    pub fn new(
        index: &'a VariantIndex,
        assembly_links: &'a LinkStore,
        config: &'a LinkageConfig,
    ) -> DedupEngine<'a> {
        DedupEngine {
            index,
            assembly_links,
            config,
            resolver: TransitiveLinkResolver::new(index, assembly_links, config),
        }
    }

    ///
    /// The path that makes `variant` redundant, if any. Only imprecise paired variants can be
    /// duplicates this way.
    ///
    /// Assembly links are followed first without any jump limit. Failing that, the transitive
    /// search runs with the configured budgets.
    ///
    pub fn duplicate_path(
        &self,
        variant: &VariantRecord,
    ) -> Result<Option<AlternatePath>, IndexError> {
        if !variant.is_imprecise() || variant.is_single() {
            return Ok(None);
        }

        if let Some(path) = self.assembly_path(variant)? {
            debug!("{} duplicates {} through assembly", variant.id, path.alternative_id);
            return Ok(Some(path));
        }

        let path = self.resolver.find_path(
            variant,
            self.config.max_assembly_jumps,
            self.config.max_transitive_jumps,
        )?;
        if let Some(path) = &path {
            debug!("{} duplicates {} through {}", variant.id, path.alternative_id, path);
        }
        Ok(path)
    }

    pub fn is_duplicate(&self, variant: &VariantRecord) -> Result<bool, IndexError> {
        Ok(self.duplicate_path(variant)?.is_some())
    }

    fn assembly_path(&self, variant: &VariantRecord) -> Result<Option<AlternatePath>, IndexError> {
        let Some(target) = self.index.mate(variant)? else {
            return Ok(None);
        };
        let Some(alternatives) = alternative_starts(self.index, variant, self.config)? else {
            return Ok(None);
        };

        for alternative in alternatives {
            let Some(start) = self.index.mate(alternative)? else {
                continue;
            };

            let mut visited: HashSet<&str> = HashSet::default();
            visited.extend([
                variant.id.as_str(),
                target.id.as_str(),
                alternative.id.as_str(),
                start.id.as_str(),
            ]);

            let mut queue: VecDeque<(&VariantRecord, Vec<Link>)> = VecDeque::new();
            queue.push_back((start, Vec::new()));

            while let Some((endpoint, links)) = queue.pop_front() {
                if matches_target(endpoint, target) {
                    let path = AlternatePath {
                        variant_id: variant.id.clone(),
                        alternative_id: alternative.id.clone(),
                        links,
                    };
                    if is_distance_consistent(target, path.min_distance(), path.max_distance()) {
                        return Ok(Some(path));
                    }
                    continue;
                }

                for link in self.assembly_links.links_from(&endpoint.id) {
                    let next = self.index.by_id(&link.target_id)?;
                    let Some(next_endpoint) = self.index.mate(next)? else {
                        continue;
                    };
                    if !visited.insert(next.id.as_str()) || !visited.insert(next_endpoint.id.as_str())
                    {
                        continue;
                    }
                    let mut chain = links.clone();
                    chain.push(link.clone());
                    queue.push_back((next_endpoint, chain));
                }
            }
        }

        Ok(None)
    }

    ///
    /// Is the single breakend `variant` covered by a preferred call facing the same way within
    /// its confidence interval, widened by `single_dedup_distance`. Passing calls are preferred
    /// over filtered ones, then paired over single, then higher tumor quality.
    ///
    pub fn is_single_duplicate(
        &self,
        variant: &VariantRecord,
        filters: &SoftFilterStore,
    ) -> Result<bool, IndexError> {
        if !variant.is_single() {
            return Ok(false);
        }

        let distance = self.config.single_dedup_distance;
        let others = self.index.neighbors(
            variant,
            distance,
            distance.saturating_add(self.config.alternative_seek_distance),
            |other| other.orientation == variant.orientation,
        )?;

        let own = preference(variant, filters);
        Ok(others
            .into_iter()
            .any(|other| preference(other, filters) > own))
    }
}

fn preference(variant: &VariantRecord, filters: &SoftFilterStore) -> (bool, bool, f64) {
    (
        filters.is_passing(&variant.id),
        !variant.is_single(),
        variant.tumor_qual,
    )
}
