//! Layout configuration
//!
//! Spacing constants and the relaxation budget. Every field has a default, so
//! a config file only needs to name what it changes.

use serde::{Deserialize, Serialize};

use super::LineageError;

/// Default horizontal distance between neighbours in a generation
pub const DEFAULT_HORIZONTAL_SPACING: f64 = 250.0;

/// Default vertical distance between generation rows
pub const DEFAULT_VERTICAL_SPACING: f64 = 200.0;

/// Default relaxation budget per person
pub const DEFAULT_MAX_RELAXATION_FACTOR: usize = 8;

/// Layout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal slot width `H`
    pub horizontal_spacing: f64,
    /// Row height `V`
    pub vertical_spacing: f64,
    /// Relaxation steps allowed per person before propagation gives up
    pub max_relaxation_factor: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: DEFAULT_HORIZONTAL_SPACING,
            vertical_spacing: DEFAULT_VERTICAL_SPACING,
            max_relaxation_factor: DEFAULT_MAX_RELAXATION_FACTOR,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_horizontal_spacing(mut self, spacing: f64) -> Self {
        self.horizontal_spacing = spacing;
        self
    }

    pub fn with_vertical_spacing(mut self, spacing: f64) -> Self {
        self.vertical_spacing = spacing;
        self
    }

    pub fn with_max_relaxation_factor(mut self, factor: usize) -> Self {
        self.max_relaxation_factor = factor;
        self
    }

    /// Total relaxation steps allowed for `person_count` people
    pub fn step_cap(&self, person_count: usize) -> usize {
        self.max_relaxation_factor
            .max(1)
            .saturating_mul(person_count.max(1))
    }

    /// Reject spacings that cannot produce a readable diagram
    pub fn validate(&self) -> Result<(), LineageError> {
        for (name, value) in [
            ("horizontal_spacing", self.horizontal_spacing),
            ("vertical_spacing", self.vertical_spacing),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LineageError::config_error(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if self.max_relaxation_factor == 0 {
            return Err(LineageError::config_error(
                "max_relaxation_factor must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
