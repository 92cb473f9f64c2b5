use std::cmp::Ordering;
use std::fmt::{self, Display};

use crate::contigs::ContigOrder;
use crate::models::Orientation;

///
/// Breakend struct, one oriented side of a break spanning `[start, end]` (both inclusive).
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Breakend {
    pub contig: String,
    pub start: u32,
    pub end: u32,
    pub orientation: Orientation,
}

impl Breakend {
    ///
    /// Widen the breakend by `buffer` bases on both sides.
    ///
    pub fn expand(&self, buffer: u32) -> Breakend {
        Breakend {
            contig: self.contig.clone(),
            start: self.start.saturating_sub(buffer),
            end: self.end.saturating_add(buffer),
            orientation: self.orientation,
        }
    }

    /// Does this breakend cover `other` completely, with matching contig and orientation.
    pub fn contains(&self, other: &Breakend) -> bool {
        self.contig == other.contig
            && self.orientation == other.orientation
            && self.start <= other.start
            && self.end >= other.end
    }

    fn cmp_position(&self, other: &Breakend, order: &ContigOrder) -> Ordering {
        order
            .compare(&self.contig, &other.contig)
            .then(self.start.cmp(&other.start))
            .then(self.end.cmp(&other.end))
    }
}

impl Display for Breakend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.contig, self.start, self.end, self.orientation
        )
    }
}

///
/// Breakpoint struct, an ordered pair of breakends.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Breakpoint {
    pub start: Breakend,
    pub end: Breakend,
}

impl Breakpoint {
    ///
    /// Put the smaller contig first (lower position first on the same contig) so that the two
    /// ways of writing a breakpoint compare equal.
    ///
    pub fn canonical(self, order: &ContigOrder) -> Breakpoint {
        match self.start.cmp_position(&self.end, order) {
            Ordering::Greater => Breakpoint {
                start: self.end,
                end: self.start,
            },
            _ => self,
        }
    }

    pub fn expand(&self, buffer: u32) -> Breakpoint {
        Breakpoint {
            start: self.start.expand(buffer),
            end: self.end.expand(buffer),
        }
    }

    /// Both ends contained, in this order.
    pub fn contains(&self, other: &Breakpoint) -> bool {
        self.start.contains(&other.start) && self.end.contains(&other.end)
    }
}

impl Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.start, self.end)
    }
}
