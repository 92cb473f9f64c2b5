//! Soft filters, rescue and deduplication of structural variant breakends.
//!
//! Filter reasons are evaluated upstream and arrive here as a [`SoftFilterStore`]. The passes in
//! this crate only ever move variants between "filtered" and "passing":
//!
//! - [`dedup`]: marks calls that repeat a better call with `DEDUP`,
//! - [`rescue`]: clears the filters of variants linked to a passing partner,
//! - [`pipeline`]: runs every linking, dedup and rescue pass in order.
//!
//! ```rust
//! use svlink_core::models::{Orientation, VariantRecord};
//! use svlink_core::LinkageConfig;
//! use svlink_filter::{LinkagePipeline, SoftFilterStore};
//! use svlink_index::{LocationIndex, VariantIndex};
//!
//! let index = VariantIndex::new(vec![
//!     VariantRecord::new("weak", "chr1", 1000, Orientation::Forward),
//!     VariantRecord::new("strong", "chr1", 1010, Orientation::Reverse),
//! ])
//! .unwrap();
//! let hotspots = LocationIndex::default();
//! let config = LinkageConfig::default();
//!
//! let filters = SoftFilterStore::from_iter([("weak", vec!["minQual"])]);
//! let output = LinkagePipeline::new(&index, &hotspots, &config)
//!     .run(filters)
//!     .unwrap();
//!
//! assert!(output.filters.is_passing("weak"));
//! ```
pub mod dedup;
pub mod errors;
pub mod pipeline;
pub mod rescue;
pub mod soft_filter;

// re-exports
pub use self::dedup::DedupEngine;
pub use self::errors::LinkageError;
pub use self::pipeline::{LinkagePipeline, PipelineOutput};
pub use self::rescue::{GeneralRescue, MobileElementRescue, RescuePolicy, rescue};
pub use self::soft_filter::SoftFilterStore;
