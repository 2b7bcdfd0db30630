//! Tunable parameters shared by generation, layout and rendering.
//!
//! Every field has a default; a TOML document may override any subset:
//!
//! ```toml
//! items_min = 6
//! items_max = 8
//! weight_mode = "continuous"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::labels::ALPHABET;

/// How edge weights are drawn from `[w_min, w_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightMode {
    /// Rounded to the nearest integer inside the bounds.
    #[default]
    Integer,
    /// Un-rounded uniform sample.
    Continuous,
}

/// Flat set of named numeric options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lower edge weight bound.
    pub w_min: f64,
    /// Upper edge weight bound.
    pub w_max: f64,
    /// Integer or continuous weights.
    pub weight_mode: WeightMode,
    /// Minimum gap between two circle rims.
    pub separation: f64,
    /// Budget of rejected layout candidates across all nodes.
    pub max_iterations: usize,
    /// Smallest node count a generated graph may have.
    pub items_min: usize,
    /// Largest node count a generated graph may have.
    pub items_max: usize,
    /// Horizontal layout margin.
    pub x_offset: f64,
    /// Vertical layout margin.
    pub y_offset: f64,
    /// Gap between a circle rim and the end of an edge line.
    pub draw_adjust: f64,
    /// Density tuning factor for the edge count.
    pub edge_density: f64,
    /// Circle radius.
    pub radius: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            w_min: 1.0,
            w_max: 100.0,
            weight_mode: WeightMode::Integer,
            separation: 100.0,
            max_iterations: 10_000,
            items_min: 10,
            items_max: 22,
            x_offset: 50.0,
            y_offset: 50.0,
            draw_adjust: 2.0,
            edge_density: 1.3,
            radius: 25.0,
        }
    }
}

/// Reasons a [`Config`] cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("weight bounds must satisfy 0 < w_min <= w_max (got {w_min}..{w_max})")]
    WeightBounds { w_min: f64, w_max: f64 },

    #[error("integer weights need a whole number inside {w_min}..{w_max}")]
    NoIntegerWeight { w_min: f64, w_max: f64 },

    #[error("node count bounds must satisfy 1 <= items_min <= items_max (got {min}..{max})")]
    NodeBounds { min: usize, max: usize },

    #[error("items_max {max} exceeds the {available}-label alphabet")]
    AlphabetTooSmall { max: usize, available: usize },

    #[error("{field} must be a finite number >= 0 (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("radius must be a finite number > 0 (got {0})")]
    Radius(f64),

    #[error("edge_density must be finite (got {0})")]
    Density(f64),
}

impl Config {
    /// Parse a TOML document; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str::<Self>(raw)?)
    }

    /// Load and validate a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every cross-field constraint.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights_ok = self.w_min.is_finite()
            && self.w_max.is_finite()
            && self.w_min > 0.0
            && self.w_min <= self.w_max;
        if !weights_ok {
            return Err(ConfigError::WeightBounds {
                w_min: self.w_min,
                w_max: self.w_max,
            });
        }
        if self.weight_mode == WeightMode::Integer && self.w_min.ceil() > self.w_max.floor() {
            return Err(ConfigError::NoIntegerWeight {
                w_min: self.w_min,
                w_max: self.w_max,
            });
        }
        if self.items_min == 0 || self.items_min > self.items_max {
            return Err(ConfigError::NodeBounds {
                min: self.items_min,
                max: self.items_max,
            });
        }
        if self.items_max > ALPHABET.len() {
            return Err(ConfigError::AlphabetTooSmall {
                max: self.items_max,
                available: ALPHABET.len(),
            });
        }
        for (field, value) in [
            ("separation", self.separation),
            ("x_offset", self.x_offset),
            ("y_offset", self.y_offset),
            ("draw_adjust", self.draw_adjust),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ConfigError::Radius(self.radius));
        }
        if !self.edge_density.is_finite() {
            return Err(ConfigError::Density(self.edge_density));
        }
        Ok(())
    }
}
