#[cfg(feature = "core")]
#[doc(inline)]
pub use svlink_core as core;

#[cfg(feature = "index")]
#[doc(inline)]
pub use svlink_index as index;

#[cfg(feature = "links")]
#[doc(inline)]
pub use svlink_links as links;

#[cfg(feature = "filter")]
#[doc(inline)]
pub use svlink_filter as filter;

#[cfg(feature = "io")]
#[doc(inline)]
pub use svlink_io as io;
