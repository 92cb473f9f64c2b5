//! File formats around the svlink passes.
//!
//! - [`variants`]: the tab-separated variant table a run starts from, with its soft filters,
//! - [`hotspots`]: known fusion and fragile-site hotspots as BED (single breakends) or BEDPE
//!   (breakpoints),
//! - [`results`]: the per-variant filters, local links and alternate paths a run produces.
//!
//! Every reader accepts plain or gzipped input.
pub mod error;
pub mod hotspots;
pub mod results;
pub mod variants;

// re-exports
pub use self::error::SvIoError;
pub use self::hotspots::{read_hotspot_breakends, read_hotspot_breakpoints};
pub use self::results::ResultsWrite;
pub use self::variants::{VariantTable, read_variants};
