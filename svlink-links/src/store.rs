use fxhash::FxHashMap as HashMap;

use crate::link::Link;

///
/// Immutable map from a variant id to the links stored under it.
///
/// Builders push both directions of every link, so a store answers from either endpoint.
/// Stores merge by concatenating edge lists; repeated edges do not change reachability.
///
#[derive(Debug, Clone, Default)]
pub struct LinkStore {
    links: HashMap<String, Vec<Link>>,
}

impl LinkStore {
    pub fn from_links(links: Vec<Link>) -> LinkStore {
        let mut store: HashMap<String, Vec<Link>> = HashMap::default();
        for link in links {
            store.entry(link.source_id.clone()).or_default().push(link);
        }
        LinkStore { links: store }
    }

    /// Index `links` together with their reverses.
    pub fn from_undirected(links: Vec<Link>) -> LinkStore {
        let both = links
            .into_iter()
            .flat_map(|link| {
                let reverse = link.reverse();
                [link, reverse]
            })
            .collect();
        LinkStore::from_links(both)
    }

    pub fn merge(stores: &[&LinkStore]) -> LinkStore {
        let mut merged: HashMap<String, Vec<Link>> = HashMap::default();
        for store in stores {
            for (id, links) in &store.links {
                merged
                    .entry(id.clone())
                    .or_default()
                    .extend(links.iter().cloned());
            }
        }
        LinkStore { links: merged }
    }

    pub fn links_from(&self, id: &str) -> &[Link] {
        self.links.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_linked(&self, id: &str) -> bool {
        !self.links_from(id).is_empty()
    }

    pub fn are_linked(&self, a: &str, b: &str) -> bool {
        self.links_from(a).iter().any(|link| link.target_id == b)
    }

    pub fn linked_ids(&self) -> impl Iterator<Item = &str> {
        self.links
            .iter()
            .filter(|(_, links)| !links.is_empty())
            .map(|(id, _)| id.as_str())
    }

    /// All stored edges, one per direction.
    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.links.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.links.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    ///
    /// Sorted, de-duplicated labels of the links stored under `id`. This is what gets written
    /// out as the local link annotation of a variant.
    ///
    pub fn local_link_labels(&self, id: &str) -> Vec<&str> {
        let mut labels: Vec<&str> = self
            .links_from(id)
            .iter()
            .map(|link| link.label.as_str())
            .collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn link(label: &str, source: &str, target: &str) -> Link {
        Link {
            label: label.to_string(),
            source_id: source.to_string(),
            target_id: target.to_string(),
            min_distance: 0,
            max_distance: 10,
        }
    }

    #[fixture]
    fn store() -> LinkStore {
        LinkStore::from_undirected(vec![link("asm1-1", "a", "b"), link("asm1-2", "b", "c")])
    }

    #[rstest]
    fn test_queryable_from_both_ends(store: LinkStore) {
        let forward = &store.links_from("a")[0];
        let backward = store
            .links_from("b")
            .iter()
            .find(|l| l.target_id == "a")
            .unwrap();
        assert_eq!(*backward, forward.reverse());
        assert!(store.are_linked("a", "b"));
        assert!(store.are_linked("b", "a"));
        assert!(!store.are_linked("a", "c"));
    }

    #[rstest]
    fn test_missing_id_is_empty(store: LinkStore) {
        assert!(store.links_from("zzz").is_empty());
        assert!(!store.is_linked("zzz"));
    }

    #[rstest]
    fn test_merge(store: LinkStore) {
        let dsb = LinkStore::from_undirected(vec![link("dsb1", "c", "d")]);
        let merged = LinkStore::merge(&[&store, &dsb, &store]);

        assert_eq!(merged.len(), 2 * store.len() + dsb.len());
        assert_eq!(merged.local_link_labels("c"), vec!["asm1-2", "dsb1"]);

        let mut linked: Vec<&str> = merged.linked_ids().collect();
        linked.sort();
        assert_eq!(linked, vec!["a", "b", "c", "d"]);
    }

    #[rstest]
    fn test_local_link_labels(store: LinkStore) {
        assert_eq!(store.local_link_labels("b"), vec!["asm1-1", "asm1-2"]);
        assert!(store.local_link_labels("zzz").is_empty());
    }

    #[rstest]
    fn test_empty() {
        let store = LinkStore::default();
        assert!(store.is_empty());
        assert_eq!(store.iter().count(), 0);
    }
}
