//! Links between structural variant breakends.
//!
//! A [`Link`] says two breakends are part of the same rearrangement. Links come from three
//! sources, each built by a stateless pass over the [`VariantIndex`](svlink_index::VariantIndex):
//!
//! - [`assembly`]: breakends sharing a local assembly,
//! - [`dsb`]: mutually unique, opposite-facing neighbours that look like the two ends of one
//!   double-strand break,
//! - [`transitive`]: short chains through intermediate breakpoints that connect an imprecise
//!   call to its mate.
//!
//! All of them land in a [`LinkStore`], which the rescue and dedup passes walk.
pub mod alternatives;
pub mod assembly;
pub mod dsb;
pub mod link;
pub mod path;
pub mod store;
pub mod transitive;

// re-exports
pub use self::assembly::assembly_links;
pub use self::dsb::dsb_links;
pub use self::link::Link;
pub use self::path::AlternatePath;
pub use self::store::LinkStore;
pub use self::transitive::TransitiveLinkResolver;
