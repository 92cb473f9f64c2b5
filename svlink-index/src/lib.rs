//! Positional indexes over structural variant breakends.
//!
//! Two read-only structures are built once per run and shared by every linking pass:
//!
//! - [`VariantIndex`]: all variant records of a batch, sorted by position within each contig,
//!   with id lookup and bounded proximity queries ([`VariantIndex::neighbors`]).
//! - [`LocationIndex`]: hotspot breakends and breakpoints bucketed by contig, orientation and
//!   megabase so membership tests only touch a handful of entries.
//!
//! ```rust
//! use svlink_core::models::{Orientation, VariantRecord};
//! use svlink_index::VariantIndex;
//!
//! let index = VariantIndex::new(vec![
//!     VariantRecord::new("a", "chr1", 1000, Orientation::Forward),
//!     VariantRecord::new("b", "chr1", 1010, Orientation::Reverse),
//!     VariantRecord::new("c", "chr1", 9000, Orientation::Reverse),
//! ])
//! .unwrap();
//!
//! let a = index.by_id("a").unwrap();
//! let nearby = index
//!     .neighbors(a, 30, 1000, |other| other.orientation != a.orientation)
//!     .unwrap();
//! assert_eq!(nearby.len(), 1);
//! assert_eq!(nearby[0].id, "b");
//! ```
pub mod errors;
pub mod location_index;
pub mod variant_index;

// re-exports
pub use self::errors::IndexError;
pub use self::location_index::LocationIndex;
pub use self::variant_index::VariantIndex;
