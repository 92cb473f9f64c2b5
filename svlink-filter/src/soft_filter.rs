use std::collections::BTreeSet;

use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

use svlink_core::consts::{DEDUP_FILTER, PON_FILTER};

///
/// Filter reasons per variant id. A variant without reasons passes.
///
/// The store is never changed in place: [`update`](SoftFilterStore::update) and
/// [`exempt`](SoftFilterStore::exempt) hand back a new store, so every pass sees the filters
/// exactly as the previous pass left them.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoftFilterStore {
    filters: HashMap<String, BTreeSet<String>>,
}

impl SoftFilterStore {
    pub fn new() -> SoftFilterStore {
        SoftFilterStore::default()
    }

    /// The reasons filtering `id`; empty when it passes or is unknown.
    pub fn filters(&self, id: &str) -> impl Iterator<Item = &str> {
        self.filters.get(id).into_iter().flatten().map(String::as_str)
    }

    pub fn is_filtered(&self, id: &str) -> bool {
        self.filters.get(id).is_some_and(|reasons| !reasons.is_empty())
    }

    pub fn is_passing(&self, id: &str) -> bool {
        !self.is_filtered(id)
    }

    pub fn is_duplicate(&self, id: &str) -> bool {
        self.has_filter(id, DEDUP_FILTER)
    }

    pub fn has_filter(&self, id: &str, filter: &str) -> bool {
        self.filters
            .get(id)
            .is_some_and(|reasons| reasons.contains(filter))
    }

    /// Ids carrying at least one filter reason, in no particular order.
    pub fn filtered_ids(&self) -> impl Iterator<Item = &str> {
        self.filters
            .iter()
            .filter(|(_, reasons)| !reasons.is_empty())
            .map(|(id, _)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.filtered_ids().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    ///
    /// Produce the store that follows a pass: rescued ids lose every filter reason, then
    /// duplicate ids gain `DEDUP`.
    ///
    pub fn update(
        &self,
        duplicates: &HashSet<String>,
        rescued: &HashSet<String>,
    ) -> SoftFilterStore {
        let mut filters = self.filters.clone();

        for id in rescued {
            filters.remove(id);
        }

        for id in duplicates {
            filters
                .entry(id.clone())
                .or_default()
                .insert(DEDUP_FILTER.to_string());
        }

        SoftFilterStore { filters }
    }

    ///
    /// Clear the filters of hotspot variants. Panel-of-normals hits stay, since a hotspot
    /// seen in normals is still germline.
    ///
    pub fn exempt(&self, hotspots: &HashSet<String>) -> SoftFilterStore {
        let mut filters = self.filters.clone();

        for id in hotspots {
            if let Some(reasons) = filters.get_mut(id) {
                reasons.retain(|reason| reason == PON_FILTER);
                if reasons.is_empty() {
                    filters.remove(id);
                }
            }
        }

        SoftFilterStore { filters }
    }
}

impl<S, I, R> FromIterator<(S, I)> for SoftFilterStore
where
    S: Into<String>,
    I: IntoIterator<Item = R>,
    R: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (S, I)>>(iter: T) -> Self {
        let mut filters: HashMap<String, BTreeSet<String>> = HashMap::default();
        for (id, reasons) in iter {
            let reasons: BTreeSet<String> = reasons.into_iter().map(Into::into).collect();
            if !reasons.is_empty() {
                filters.entry(id.into()).or_default().extend(reasons);
            }
        }
        SoftFilterStore { filters }
    }
}
