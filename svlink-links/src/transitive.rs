use std::collections::VecDeque;

use log::debug;

use svlink_core::models::{Orientation, VariantRecord};
use svlink_core::LinkageConfig;
use svlink_index::{IndexError, VariantIndex};

use crate::alternatives::{alternative_starts, is_distance_consistent, matches_target};
use crate::link::Link;
use crate::path::AlternatePath;
use crate::store::LinkStore;

///
/// Searches for a short chain of breakpoints that explains a paired variant.
///
/// The search starts from every precise breakend sitting where the variant sits (see
/// [`alternative_starts`]), jumps to that breakend's mate and then keeps walking: along
/// assembly links when the current breakend has any, otherwise to the nearest precise
/// breakend facing the other way (an inferred transitive link). A branch succeeds once it lands
/// on a breakend equivalent to the variant's mate.
///
/// The walk is breadth first with assembly-supported branches always expanded before
/// transitive-only ones. Starts whose mate carries assembly links count as assembly supported;
/// the remaining starts only get expanded once no assembly branch is left. Jump budgets bound the depth. If two transitive-only branches are ever
/// alive at once the search gives up, since there is no way to tell which one is real.
///
pub struct TransitiveLinkResolver<'a> {
    index: &'a VariantIndex,
    assembly_links: &'a LinkStore,
    config: &'a LinkageConfig,
}

struct Node<'a> {
    alternative: &'a VariantRecord,
    endpoint: &'a VariantRecord,
    assembly_jumps: u32,
    transitive_jumps: u32,
    links: Vec<Link>,
    inferred_links: usize,
    visited: Vec<&'a str>,
    min_distance: u32,
    max_distance: u32,
    assembly_supported: bool,
}

impl<'a> Node<'a> {
    fn extend(
        &self,
        link: Link,
        next: &'a VariantRecord,
        endpoint: &'a VariantRecord,
        via_assembly: bool,
    ) -> Node<'a> {
        let mut visited = self.visited.clone();
        visited.push(next.id.as_str());
        visited.push(endpoint.id.as_str());

        Node {
            alternative: self.alternative,
            endpoint,
            assembly_jumps: self.assembly_jumps - u32::from(via_assembly),
            transitive_jumps: self.transitive_jumps - u32::from(!via_assembly),
            min_distance: self.min_distance.saturating_add(link.min_distance),
            max_distance: self.max_distance.saturating_add(link.max_distance),
            links: self.links.iter().cloned().chain([link]).collect(),
            inferred_links: self.inferred_links + usize::from(!via_assembly),
            visited,
            assembly_supported: self.assembly_supported || via_assembly,
        }
    }

    fn has_visited(&self, variant: &VariantRecord) -> bool {
        self.visited.contains(&variant.id.as_str())
    }

    fn is_transitive_only(&self) -> bool {
        !self.assembly_supported && !self.links.is_empty()
    }

    fn into_path(self, variant: &VariantRecord) -> AlternatePath {
        AlternatePath {
            variant_id: variant.id.clone(),
            alternative_id: self.alternative.id.clone(),
            links: self.links,
        }
    }
}

enum Reach {
    Target,
    Rejected,
    Continue,
}

impl<'a> TransitiveLinkResolver<'a> {
    pub fn new(
        index: &'a VariantIndex,
        assembly_links: &'a LinkStore,
        config: &'a LinkageConfig,
    ) -> TransitiveLinkResolver<'a> {
        TransitiveLinkResolver {
            index,
            assembly_links,
            config,
        }
    }

    ///
    /// Find a chain of links connecting `variant` to its mate through other breakpoints, using
    /// the configured jump budgets. Only chains with at least one link are returned, since an
    /// empty chain adds nothing to the link graph.
    ///
    pub fn resolve(&self, variant: &VariantRecord) -> Result<Option<AlternatePath>, IndexError> {
        let path = self.find_path(
            variant,
            self.config.max_assembly_jumps,
            self.config.max_transitive_jumps,
        )?;
        Ok(path.filter(|p| !p.is_direct()))
    }

    ///
    /// The underlying search. An alternative start whose own mate already matches the target
    /// is returned as a direct (empty) path.
    ///
    /// # Arguments
    /// - variant: a paired variant; singles have no target and yield `None`
    /// - max_assembly_jumps: assembly links a branch may follow
    /// - max_transitive_jumps: transitive links a branch may infer
    pub fn find_path(
        &self,
        variant: &VariantRecord,
        max_assembly_jumps: u32,
        max_transitive_jumps: u32,
    ) -> Result<Option<AlternatePath>, IndexError> {
        let variant = self.index.by_id(&variant.id)?;
        let Some(target) = self.index.mate(variant)? else {
            return Ok(None);
        };
        let Some(alternatives) = alternative_starts(self.index, variant, self.config)? else {
            return Ok(None);
        };

        let mut assembly_queue: VecDeque<Node<'a>> = VecDeque::new();
        let mut transitive_queue: VecDeque<Node<'a>> = VecDeque::new();
        let mut unassembled_starts: VecDeque<Node<'a>> = VecDeque::new();

        for alternative in alternatives {
            let Some(endpoint) = self.index.mate(alternative)? else {
                continue;
            };
            let node = Node {
                alternative,
                endpoint,
                assembly_jumps: max_assembly_jumps,
                transitive_jumps: max_transitive_jumps,
                links: Vec::new(),
                inferred_links: 0,
                visited: vec![
                    variant.id.as_str(),
                    target.id.as_str(),
                    alternative.id.as_str(),
                    endpoint.id.as_str(),
                ],
                min_distance: 0,
                max_distance: 0,
                assembly_supported: false,
            };
            match self.reach(&node, target) {
                Reach::Target => return Ok(Some(node.into_path(variant))),
                Reach::Rejected => continue,
                Reach::Continue if self.assembly_links.is_linked(&endpoint.id) => {
                    assembly_queue.push_back(node)
                }
                Reach::Continue => unassembled_starts.push_back(node),
            }
        }

        let mut transitive_success: Option<Node<'a>> = None;

        loop {
            let next = assembly_queue
                .pop_front()
                .or_else(|| unassembled_starts.pop_front())
                .or_else(|| transitive_queue.pop_front());
            let Some(node) = next else {
                break;
            };

            for child in self.expand(&node, variant)? {
                match self.reach(&child, target) {
                    Reach::Target if child.assembly_supported => {
                        return Ok(Some(child.into_path(variant)));
                    }
                    Reach::Target => {
                        if transitive_success.is_some() {
                            debug!("{} has more than one transitive path", variant.id);
                            return Ok(None);
                        }
                        transitive_success = Some(child);
                    }
                    Reach::Rejected => {}
                    Reach::Continue if child.is_transitive_only() => {
                        transitive_queue.push_back(child)
                    }
                    Reach::Continue => assembly_queue.push_back(child),
                }
            }

            let live_transitive = transitive_queue.len() + usize::from(transitive_success.is_some());
            if live_transitive > 1 {
                debug!("{} has competing transitive branches", variant.id);
                return Ok(None);
            }
        }

        Ok(transitive_success.map(|node| node.into_path(variant)))
    }

    fn reach(&self, node: &Node<'a>, target: &VariantRecord) -> Reach {
        if !matches_target(node.endpoint, target) {
            return Reach::Continue;
        }
        if is_distance_consistent(target, node.min_distance, node.max_distance) {
            Reach::Target
        } else {
            Reach::Rejected
        }
    }

    fn expand(
        &self,
        node: &Node<'a>,
        variant: &VariantRecord,
    ) -> Result<Vec<Node<'a>>, IndexError> {
        let mut children = Vec::new();
        let assembly = self.assembly_links.links_from(&node.endpoint.id);

        if !assembly.is_empty() {
            if node.assembly_jumps == 0 {
                return Ok(children);
            }
            for link in assembly {
                let next = self.index.by_id(&link.target_id)?;
                let Some(endpoint) = self.index.mate(next)? else {
                    continue;
                };
                if node.has_visited(next) || node.has_visited(endpoint) {
                    continue;
                }
                children.push(node.extend(link.clone(), next, endpoint, true));
            }
        } else if node.transitive_jumps > 0 {
            for next in self.nearest_transitive(node.endpoint)? {
                let Some(endpoint) = self.index.mate(next)? else {
                    continue;
                };
                if node.has_visited(next) || node.has_visited(endpoint) {
                    continue;
                }
                let label = format!("trs_{}_{}", variant.id, node.inferred_links + 1);
                let link = Link::new(&label, node.endpoint, next);
                children.push(node.extend(link, next, endpoint, false));
            }
        }

        Ok(children)
    }

    ///
    /// The closest precise paired breakends that could close the reference segment leaving
    /// `endpoint`: facing the other way, on the side the segment runs to, and at least
    /// `min_transitive_distance` away. Ties are all returned.
    ///
    fn nearest_transitive(
        &self,
        endpoint: &VariantRecord,
    ) -> Result<Vec<&'a VariantRecord>, IndexError> {
        let min_distance = self.config.min_transitive_distance;
        let candidates = self.index.neighbors(
            endpoint,
            self.config.transitive_additional_distance,
            self.config.transitive_seek_distance,
            |other| {
                other.orientation != endpoint.orientation
                    && other.is_precise()
                    && !other.is_single()
                    && match endpoint.orientation {
                        Orientation::Reverse => {
                            other.start >= endpoint.start.saturating_add(min_distance)
                        }
                        Orientation::Forward => {
                            other.start.saturating_add(min_distance) <= endpoint.start
                        }
                    }
            },
        )?;

        let nearest = candidates
            .iter()
            .map(|other| other.start.abs_diff(endpoint.start))
            .min();

        Ok(candidates
            .into_iter()
            .filter(|other| Some(other.start.abs_diff(endpoint.start)) == nearest)
            .collect())
    }
}
