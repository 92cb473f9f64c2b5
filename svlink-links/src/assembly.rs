use std::collections::BTreeMap;

use fxhash::FxHashMap as HashMap;
use log::info;

use svlink_core::models::VariantRecord;

use crate::link::Link;
use crate::store::LinkStore;

///
/// Link breakends that were built from the same local assembly.
///
/// Paired variants are grouped by every assembly id they carry. A group of two is linked under
/// the bare assembly id; larger groups are sorted by position and adjacent pairs are linked as
/// `<assembly>-<k>`, with `k` only advancing when a link is made. Two breakends that are mates
/// of each other are never linked.
///
/// # Arguments
/// - variants: every record of the batch; contigs are ordered as they first appear, so passing
///   [`VariantIndex::iter`](svlink_index::VariantIndex::iter) keeps the index's contig order
pub fn assembly_links<'a, I>(variants: I) -> LinkStore
where
    I: IntoIterator<Item = &'a VariantRecord>,
{
    let mut groups: BTreeMap<&str, Vec<&VariantRecord>> = BTreeMap::new();
    let mut contig_ranks: HashMap<&str, usize> = HashMap::default();
    for variant in variants {
        let next = contig_ranks.len();
        contig_ranks.entry(variant.contig.as_str()).or_insert(next);
        if variant.is_single() {
            continue;
        }
        for assembly in &variant.assembly_ids {
            groups.entry(assembly.as_str()).or_default().push(variant);
        }
    }

    let mut links = Vec::new();
    for (assembly, mut group) in groups {
        if group.len() < 2 {
            continue;
        }

        group.sort_by(|a, b| {
            contig_ranks[a.contig.as_str()]
                .cmp(&contig_ranks[b.contig.as_str()])
                .then(a.start.cmp(&b.start))
                .then_with(|| a.id.cmp(&b.id))
        });

        if group.len() == 2 {
            if is_linkable(group[0], group[1]) {
                links.push(Link::new(assembly, group[0], group[1]));
            }
            continue;
        }

        let mut link_number = 1;
        for pair in group.windows(2) {
            if is_linkable(pair[0], pair[1]) {
                let label = format!("{}-{}", assembly, link_number);
                links.push(Link::new(&label, pair[0], pair[1]));
                link_number += 1;
            }
        }
    }

    info!("Found {} assembly links", links.len());

    LinkStore::from_undirected(links)
}

fn is_linkable(a: &VariantRecord, b: &VariantRecord) -> bool {
    !a.is_mate_of(b)
}
