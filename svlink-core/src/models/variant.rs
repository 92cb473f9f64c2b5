use std::collections::BTreeSet;
use std::fmt::{self, Display};

use crate::errors::ModelError;
use crate::models::{Breakend, Orientation};

/// Repeat-masker class prefixes treated as mobile elements.
const MOBILE_ELEMENT_CLASSES: [&str; 3] = ["LINE", "SINE", "Retroposon"];

///
/// The partner of a breakend. Single breakends have no mate at all, which is a different
/// situation from a paired breakend whose mate is missing from the batch.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub enum Mate {
    Single,
    Paired(String),
}

///
/// One called breakend, as handed over by the variant loader. Records are never mutated once
/// loaded; filters and links live in their own stores keyed by `id`.
///
#[derive(PartialEq, Debug, Clone)]
pub struct VariantRecord {
    pub id: String,
    pub mate: Mate,
    pub contig: String,
    pub orientation: Orientation,
    pub start: u32,
    pub min_start: u32,
    pub max_start: u32,
    pub imprecise: bool,
    pub too_short_to_rescue: bool,
    pub insert_sequence_length: u32,
    pub duplication_length: u32,
    pub tumor_qual: f64,
    pub assembly_ids: BTreeSet<String>,
    pub insert_repeat_class: Option<String>,
    pub insert_repeat_type: Option<String>,
}

impl VariantRecord {
    ///
    /// Create a precise single breakend with no confidence interval. Use the `with_*` methods
    /// to fill in the rest.
    ///
    pub fn new(id: &str, contig: &str, start: u32, orientation: Orientation) -> VariantRecord {
        VariantRecord {
            id: id.to_string(),
            mate: Mate::Single,
            contig: contig.to_string(),
            orientation,
            start,
            min_start: start,
            max_start: start,
            imprecise: false,
            too_short_to_rescue: false,
            insert_sequence_length: 0,
            duplication_length: 0,
            tumor_qual: 0.0,
            assembly_ids: BTreeSet::new(),
            insert_repeat_class: None,
            insert_repeat_type: None,
        }
    }

    pub fn with_mate(mut self, mate_id: &str) -> VariantRecord {
        self.mate = Mate::Paired(mate_id.to_string());
        self
    }

    /// Expand the position by a confidence interval `[start - left, start + right]`.
    pub fn with_confidence_interval(mut self, left: u32, right: u32) -> VariantRecord {
        self.min_start = self.start.saturating_sub(left);
        self.max_start = self.start.saturating_add(right);
        self
    }

    pub fn with_imprecise(mut self, imprecise: bool) -> VariantRecord {
        self.imprecise = imprecise;
        self
    }

    pub fn with_too_short_to_rescue(mut self, too_short: bool) -> VariantRecord {
        self.too_short_to_rescue = too_short;
        self
    }

    pub fn with_insert_sequence_length(mut self, length: u32) -> VariantRecord {
        self.insert_sequence_length = length;
        self
    }

    pub fn with_duplication_length(mut self, length: u32) -> VariantRecord {
        self.duplication_length = length;
        self
    }

    pub fn with_tumor_qual(mut self, qual: f64) -> VariantRecord {
        self.tumor_qual = qual;
        self
    }

    pub fn with_assemblies<I, S>(mut self, assemblies: I) -> VariantRecord
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assembly_ids.extend(assemblies.into_iter().map(Into::into));
        self
    }

    pub fn with_insert_repeat(mut self, class: &str, repeat_type: &str) -> VariantRecord {
        self.insert_repeat_class = Some(class.to_string());
        self.insert_repeat_type = Some(repeat_type.to_string());
        self
    }

    pub fn mate_id(&self) -> Option<&str> {
        match &self.mate {
            Mate::Single => None,
            Mate::Paired(mate_id) => Some(mate_id.as_str()),
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self.mate, Mate::Single)
    }

    pub fn is_imprecise(&self) -> bool {
        self.imprecise
    }

    pub fn is_precise(&self) -> bool {
        !self.imprecise
    }

    pub fn is_too_short_to_rescue(&self) -> bool {
        self.too_short_to_rescue
    }

    /// True when `other` is the other breakend of this call.
    pub fn is_mate_of(&self, other: &VariantRecord) -> bool {
        self.mate_id() == Some(other.id.as_str())
    }

    /// Length of sequence between the two sides of the break that the call itself explains.
    pub fn inserted_and_duplicated_length(&self) -> u32 {
        self.insert_sequence_length
            .saturating_add(self.duplication_length)
    }

    /// Does `[min_start, max_start]` overlap the closed window `[start, end]`.
    pub fn overlaps_window(&self, start: u32, end: u32) -> bool {
        self.min_start <= end && self.max_start >= start
    }

    /// Same contig, same orientation and overlapping confidence intervals.
    pub fn is_equivalent_breakend(&self, other: &VariantRecord) -> bool {
        self.contig == other.contig
            && self.orientation == other.orientation
            && self.overlaps_window(other.min_start, other.max_start)
    }

    ///
    /// Classify the inserted sequence as a mobile element: LINE, SINE, SVA or ERV repeat
    /// families, or a poly-A/poly-T tail.
    ///
    pub fn is_mobile_element_insertion(&self) -> bool {
        let class_match = self.insert_repeat_class.as_deref().is_some_and(|class| {
            MOBILE_ELEMENT_CLASSES
                .iter()
                .any(|prefix| class.starts_with(prefix))
                || class.contains("ERV")
                || class.contains("SVA")
        });
        let poly_a = matches!(self.insert_repeat_type.as_deref(), Some("(A)n") | Some("(T)n"));

        class_match || poly_a
    }

    ///
    /// Check the confidence interval brackets the raw position.
    ///
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.min_start > self.start || self.max_start < self.start {
            return Err(ModelError::InvalidConfidenceInterval {
                id: self.id.clone(),
                start: self.start,
                min: self.min_start,
                max: self.max_start,
            });
        }
        Ok(())
    }

    pub fn breakend(&self) -> Breakend {
        Breakend {
            contig: self.contig.clone(),
            start: self.min_start,
            end: self.max_start,
            orientation: self.orientation,
        }
    }
}

impl Display for VariantRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}:{}[{}-{}]:{}",
            self.id, self.contig, self.start, self.min_start, self.max_start, self.orientation
        )
    }
}
