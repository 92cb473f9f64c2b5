//! Core data model for svlink.
//!
//! This crate holds the types every other svlink crate agrees on: the immutable
//! [`VariantRecord`](models::VariantRecord) describing one called breakend, the
//! [`Breakend`](models::Breakend)/[`Breakpoint`](models::Breakpoint) location types used for
//! hotspots, the [`ContigOrder`](contigs::ContigOrder) comparator and the
//! [`LinkageConfig`](config::LinkageConfig) thresholds.
//!
//! ```rust
//! use svlink_core::models::{Mate, Orientation, VariantRecord};
//!
//! let left = VariantRecord::new("gridss1o", "chr1", 1000, Orientation::Forward)
//!     .with_mate("gridss1h");
//! let right = VariantRecord::new("gridss1h", "chr1", 5000, Orientation::Reverse)
//!     .with_mate("gridss1o");
//!
//! assert!(left.is_mate_of(&right));
//! assert_eq!(left.mate, Mate::Paired("gridss1h".to_string()));
//! ```
pub mod config;
pub mod contigs;
pub mod errors;
pub mod models;
pub mod utils;

// re-exports
pub use config::LinkageConfig;
pub use contigs::ContigOrder;
pub use models::{Breakend, Breakpoint, Mate, Orientation, VariantRecord};

pub mod consts {
    /// Filter reason added to variants found to duplicate another call.
    pub const DEDUP_FILTER: &str = "DEDUP";
    /// Filter reason for variants found in the panel of normals.
    pub const PON_FILTER: &str = "PON";
    /// Filter value written for variants that carry no soft filter.
    pub const PASS: &str = "PASS";
}
