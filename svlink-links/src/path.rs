use std::fmt::{self, Display};

use crate::link::Link;

///
/// A chain of links that explains `variant_id` through other breakpoints. The chain starts at
/// the mate of `alternative_id`, a precise breakend in the same place as the variant, and ends
/// next to the variant's own mate.
///
/// An empty chain means the alternative's mate already sits on the variant's mate.
///
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AlternatePath {
    pub variant_id: String,
    pub alternative_id: String,
    pub links: Vec<Link>,
}

impl AlternatePath {
    pub fn min_distance(&self) -> u32 {
        self.links
            .iter()
            .fold(0u32, |total, link| total.saturating_add(link.min_distance))
    }

    pub fn max_distance(&self) -> u32 {
        self.links
            .iter()
            .fold(0u32, |total, link| total.saturating_add(link.max_distance))
    }

    pub fn is_direct(&self) -> bool {
        self.links.is_empty()
    }
}

impl Display for AlternatePath {
    ///
    /// Compact form used in output: `alt<min-max>id<min-max>id...`.
    ///
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.alternative_id)?;
        for link in &self.links {
            write!(
                f,
                "<{}-{}>{}",
                link.min_distance, link.max_distance, link.target_id
            )?;
        }
        Ok(())
    }
}
