//! Thresholds for the linking, dedup and rescue passes.
//!
//! Every value has a default that matches long-standing pipeline behaviour. None of them is
//! claimed to be biologically optimal; they are exposed so runs can be tuned.
#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::errors::ConfigError;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct LinkageConfig {
    /// Window widening applied to both sides of a DSB candidate.
    pub dsb_additional_distance: u32,
    /// How far the DSB neighbour scan looks before giving up.
    pub dsb_seek_distance: u32,
    pub max_assembly_jumps: u32,
    pub max_transitive_jumps: u32,
    /// More alternative starts than this and the region is considered unresolvable.
    pub max_alternatives: usize,
    pub alternative_additional_distance: u32,
    pub alternative_seek_distance: u32,
    pub transitive_additional_distance: u32,
    pub transitive_seek_distance: u32,
    /// Transitive links shorter than this are not inferred.
    pub min_transitive_distance: u32,
    /// Batches larger than this skip transitive resolution entirely.
    pub max_variants_for_transitive: usize,
    pub hotspot_buffer: u32,
    pub single_dedup_distance: u32,
    pub min_mei_rescue_qual: f64,
}

impl Default for LinkageConfig {
    fn default() -> Self {
        LinkageConfig {
            dsb_additional_distance: 30,
            dsb_seek_distance: 1000,
            max_assembly_jumps: 5,
            max_transitive_jumps: 2,
            max_alternatives: 25,
            alternative_additional_distance: 1000,
            alternative_seek_distance: 1000,
            transitive_additional_distance: 1000,
            transitive_seek_distance: 2000,
            min_transitive_distance: 30,
            max_variants_for_transitive: 1_000_000,
            hotspot_buffer: 50,
            single_dedup_distance: 0,
            min_mei_rescue_qual: 1000.0,
        }
    }
}

impl LinkageConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dsb_seek_distance < self.dsb_additional_distance {
            return Err(ConfigError::InvalidValue {
                key: "dsb_seek_distance",
                reason: format!(
                    "must be at least dsb_additional_distance ({})",
                    self.dsb_additional_distance
                ),
            });
        }
        if self.transitive_seek_distance < self.transitive_additional_distance {
            return Err(ConfigError::InvalidValue {
                key: "transitive_seek_distance",
                reason: format!(
                    "must be at least transitive_additional_distance ({})",
                    self.transitive_additional_distance
                ),
            });
        }
        if self.max_alternatives == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_alternatives",
                reason: "must be greater than zero".to_string(),
            });
        }
        if !self.min_mei_rescue_qual.is_finite() || self.min_mei_rescue_qual < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "min_mei_rescue_qual",
                reason: format!("{} is not a non-negative number", self.min_mei_rescue_qual),
            });
        }
        Ok(())
    }
}
