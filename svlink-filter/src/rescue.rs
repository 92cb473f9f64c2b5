use std::collections::VecDeque;

use fxhash::FxHashSet as HashSet;
use log::{debug, info};

use svlink_core::consts::PON_FILTER;
use svlink_core::models::VariantRecord;
use svlink_index::{IndexError, VariantIndex};
use svlink_links::LinkStore;

use crate::soft_filter::SoftFilterStore;

///
/// Decides whether a passing variant may vouch for a filtered one reachable from it.
///
pub trait RescuePolicy {
    fn can_rescue(
        &self,
        filtered: &VariantRecord,
        rescuer: &VariantRecord,
        filters: &SoftFilterStore,
    ) -> bool;
}

///
/// The usual rule: duplicates neither rescue nor get rescued, and short variants are only
/// rescued when `rescue_short` is set. Any other filter, panel of normals hits included, is
/// lifted by a passing linked partner.
///
#[derive(Debug, Clone, Copy)]
pub struct GeneralRescue {
    pub rescue_short: bool,
}

impl RescuePolicy for GeneralRescue {
    fn can_rescue(
        &self,
        filtered: &VariantRecord,
        rescuer: &VariantRecord,
        filters: &SoftFilterStore,
    ) -> bool {
        !filters.is_duplicate(&filtered.id)
            && !filters.is_duplicate(&rescuer.id)
            && (self.rescue_short || !filtered.is_too_short_to_rescue())
    }
}

///
/// Mobile element insertions often surface as a weak breakend next to a strong one. The pair
/// is rescued when their combined quality clears `min_qual`, neither side is a panel of normals
/// hit and at least one side inserts a mobile element.
///
#[derive(Debug, Clone, Copy)]
pub struct MobileElementRescue {
    pub min_qual: f64,
}

impl RescuePolicy for MobileElementRescue {
    fn can_rescue(
        &self,
        filtered: &VariantRecord,
        rescuer: &VariantRecord,
        filters: &SoftFilterStore,
    ) -> bool {
        filtered.tumor_qual + rescuer.tumor_qual > self.min_qual
            && !filters.has_filter(&filtered.id, PON_FILTER)
            && !filters.has_filter(&rescuer.id, PON_FILTER)
            && (filtered.is_mobile_element_insertion() || rescuer.is_mobile_element_insertion())
    }
}

///
/// Every variant reachable from `start` through links and mate pairs, `start` included.
///
fn closure<'a>(
    start: &'a VariantRecord,
    links: &LinkStore,
    index: &'a VariantIndex,
) -> Result<Vec<&'a VariantRecord>, IndexError> {
    let mut visited: HashSet<&str> = HashSet::default();
    let mut queue: VecDeque<&VariantRecord> = VecDeque::new();
    let mut members = Vec::new();

    visited.insert(start.id.as_str());
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        members.push(current);

        let linked = links
            .links_from(&current.id)
            .iter()
            .map(|link| link.target_id.as_str());
        let neighbours = linked.chain(current.mate_id());

        for id in neighbours {
            if visited.contains(id) {
                continue;
            }
            let next = index.by_id(id)?;
            visited.insert(next.id.as_str());
            queue.push_back(next);
        }
    }

    Ok(members)
}

///
/// Find the filtered variants that a passing variant vouches for.
///
/// Variants are grouped by their closure over `links` and mate pairs; groups without a single
/// link are left alone. Within a group every filtered member is rescued when some passing or
/// already rescued member may vouch for it under `policy`. The search runs to a fixed point, so feeding the result back through
/// [`SoftFilterStore::update`] and rescuing again finds nothing new.
///
/// # Arguments
/// - links: the link graph to walk
/// - filters: current soft filters
/// - index: the variant index of the batch
/// - policy: who may rescue whom
pub fn rescue<P: RescuePolicy>(
    links: &LinkStore,
    filters: &SoftFilterStore,
    index: &VariantIndex,
    policy: &P,
) -> Result<HashSet<String>, IndexError> {
    let mut rescued: HashSet<String> = HashSet::default();
    let mut seen: HashSet<&str> = HashSet::default();

    for variant in index.iter() {
        if seen.contains(variant.id.as_str()) || filters.is_passing(&variant.id) {
            continue;
        }

        let members = closure(variant, links, index)?;
        seen.extend(members.iter().map(|member| member.id.as_str()));
        // a mate pair on its own is not evidence
        if !members.iter().any(|member| links.is_linked(&member.id)) {
            continue;
        }

        let mut rescuers: Vec<&VariantRecord> = members
            .iter()
            .copied()
            .filter(|member| filters.is_passing(&member.id))
            .collect();
        let mut pending: Vec<&VariantRecord> = members
            .iter()
            .copied()
            .filter(|member| filters.is_filtered(&member.id))
            .collect();

        loop {
            let (saved, still_filtered): (Vec<&VariantRecord>, Vec<&VariantRecord>) =
                pending.into_iter().partition(|filtered| {
                    rescuers
                        .iter()
                        .any(|rescuer| policy.can_rescue(filtered, rescuer, filters))
                });
            pending = still_filtered;
            if saved.is_empty() {
                break;
            }
            for filtered in saved {
                debug!("Rescued {}", filtered.id);
                rescued.insert(filtered.id.clone());
                rescuers.push(filtered);
            }
        }
    }

    info!("Rescued {} variants", rescued.len());

    Ok(rescued)
}
