use fxhash::FxHashSet as HashSet;
use log::{info, warn};

use svlink_core::LinkageConfig;
use svlink_index::{LocationIndex, VariantIndex};
use svlink_links::{AlternatePath, LinkStore, TransitiveLinkResolver, assembly_links, dsb_links};

use crate::dedup::DedupEngine;
use crate::errors::LinkageError;
use crate::rescue::{GeneralRescue, MobileElementRescue, rescue};
use crate::soft_filter::SoftFilterStore;

///
/// Everything a linkage run produces.
///
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Soft filters after hotspot exemption, dedup and rescue.
    pub filters: SoftFilterStore,
    pub duplicates: HashSet<String>,
    pub rescued: HashSet<String>,
    /// Assembly, DSB and transitive links together.
    pub links: LinkStore,
    /// Paths behind each duplicate and each transitive link, in index order.
    pub alternate_paths: Vec<AlternatePath>,
}

///
/// Runs the linkage passes over one batch of variants. Each pass reads the stores the previous
/// passes produced and hands back new ones:
///
/// 1. hotspot variants lose their filters, `PON` excepted
/// 2. assembly links
/// 3. dedup of imprecise breakpoints, then of single breakends
/// 4. DSB links between the remaining variants
/// 5. transitive links for whatever is still unlinked, unless the batch is too large
/// 6. rescue over assembly and DSB links, over transitive links (short variants excluded) and
///    of mobile element insertions over DSB links
///
pub struct LinkagePipeline<'a> {
    index: &'a VariantIndex,
    hotspots: &'a LocationIndex,
    config: &'a LinkageConfig,
}

impl<'a> LinkagePipeline<'a> {
    pub fn new(
        index: &'a VariantIndex,
        hotspots: &'a LocationIndex,
        config: &'a LinkageConfig,
    ) -> LinkagePipeline<'a> {
        LinkagePipeline {
            index,
            hotspots,
            config,
        }
    }

    pub fn run(&self, filters: SoftFilterStore) -> Result<PipelineOutput, LinkageError> {
        self.config.validate()?;
        if let Some(unknown) = filters.filtered_ids().find(|id| !self.index.contains(id)) {
            return Err(LinkageError::UnknownVariant(unknown.to_string()));
        }

        let hotspots = self.hotspot_ids()?;
        let filters = filters.exempt(&hotspots);
        info!("{} variants at hotspots", hotspots.len());

        let assembly = assembly_links(self.index.iter());

        let mut alternate_paths = Vec::new();
        let duplicates = self.find_duplicates(&assembly, &filters, &hotspots, &mut alternate_paths)?;

        let dsb = dsb_links(self.index, &assembly, &duplicates, self.config)?;
        let linked = LinkStore::merge(&[&assembly, &dsb]);

        let transitive = self.transitive_links(&assembly, &linked, &duplicates, &mut alternate_paths)?;

        let filters = filters.update(&duplicates, &HashSet::default());

        let mut rescued = rescue(&linked, &filters, self.index, &GeneralRescue { rescue_short: true })?;
        rescued.extend(rescue(
            &transitive,
            &filters,
            self.index,
            &GeneralRescue {
                rescue_short: false,
            },
        )?);
        rescued.extend(rescue(
            &dsb,
            &filters,
            self.index,
            &MobileElementRescue {
                min_qual: self.config.min_mei_rescue_qual,
            },
        )?);

        let filters = filters.update(&duplicates, &rescued);

        Ok(PipelineOutput {
            filters,
            duplicates,
            rescued,
            links: LinkStore::merge(&[&assembly, &dsb, &transitive]),
            alternate_paths,
        })
    }

    fn hotspot_ids(&self) -> Result<HashSet<String>, LinkageError> {
        let mut hotspots = HashSet::default();
        if self.hotspots.is_empty() {
            return Ok(hotspots);
        }
        for variant in self.index.iter() {
            let mate = self.index.mate(variant)?;
            if self.hotspots.contains_variant(variant, mate) {
                hotspots.insert(variant.id.clone());
            }
        }
        Ok(hotspots)
    }

    fn find_duplicates(
        &self,
        assembly: &LinkStore,
        filters: &SoftFilterStore,
        hotspots: &HashSet<String>,
        alternate_paths: &mut Vec<AlternatePath>,
    ) -> Result<HashSet<String>, LinkageError> {
        let engine = DedupEngine::new(self.index, assembly, self.config);
        let mut duplicates: HashSet<String> = HashSet::default();

        for variant in self.index.iter() {
            if hotspots.contains(&variant.id) {
                continue;
            }
            if let Some(path) = engine.duplicate_path(variant)? {
                duplicates.insert(variant.id.clone());
                alternate_paths.push(path);
            }
        }
        let paired = duplicates.len();

        for variant in self.index.iter().filter(|v| v.is_single()) {
            if !hotspots.contains(&variant.id) && engine.is_single_duplicate(variant, filters)? {
                duplicates.insert(variant.id.clone());
            }
        }

        info!(
            "Found {} duplicate breakpoints and {} duplicate single breakends",
            paired,
            duplicates.len() - paired
        );

        Ok(duplicates)
    }

    fn transitive_links(
        &self,
        assembly: &LinkStore,
        linked: &LinkStore,
        duplicates: &HashSet<String>,
        alternate_paths: &mut Vec<AlternatePath>,
    ) -> Result<LinkStore, LinkageError> {
        if self.index.len() > self.config.max_variants_for_transitive {
            warn!(
                "Skipping transitive links: {} variants exceeds the limit of {}",
                self.index.len(),
                self.config.max_variants_for_transitive
            );
            return Ok(LinkStore::default());
        }

        let resolver = TransitiveLinkResolver::new(self.index, assembly, self.config);
        let mut links = Vec::new();

        for variant in self.index.iter() {
            if variant.is_single() || linked.is_linked(&variant.id) || duplicates.contains(&variant.id)
            {
                continue;
            }
            if let Some(path) = resolver.resolve(variant)? {
                // assembly hops along the path are already in the assembly store
                links.extend(
                    path.links
                        .iter()
                        .filter(|link| !assembly.links_from(&link.source_id).contains(link))
                        .cloned(),
                );
                alternate_paths.push(path);
            }
        }

        let transitive = LinkStore::from_undirected(links);
        info!("Built {} transitive links", transitive.len() / 2);

        Ok(transitive)
    }
}
