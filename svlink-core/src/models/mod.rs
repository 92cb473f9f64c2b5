pub mod location;
pub mod orientation;
pub mod variant;

// re-export for cleaner imports
pub use self::location::{Breakend, Breakpoint};
pub use self::orientation::Orientation;
pub use self::variant::{Mate, VariantRecord};
