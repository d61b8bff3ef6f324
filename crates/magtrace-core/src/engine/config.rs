use crate::core::scan::decoder::RecordDecoder;
use crate::core::scan::presets::{self, BlockPreset};
use thiserror::Error;

pub const DEFAULT_MIN_FIELDS: usize = 5;
pub const DEFAULT_VALUE_FIELD_INDEX: usize = 4;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Unknown block preset: '{0}'")]
    UnknownPreset(String),
}

/// Describes which block to extract and how its lines are laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Case-sensitive substring that marks the start of a block.
    pub marker: String,
    /// Lines between the marker line and the first data line.
    pub header_skip: usize,
    /// Number of entities (ions); every accepted record has exactly this many values.
    pub entity_count: usize,
    /// Minimum whitespace-separated fields for a line to count as data.
    pub min_fields: usize,
    /// Zero-based index of the scalar within a data line.
    pub value_field_index: usize,
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.entity_count == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "entity_count",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.marker.is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "marker",
                reason: "must not be empty".to_string(),
            });
        }
        if self.value_field_index >= self.min_fields {
            return Err(ConfigError::InvalidParameter {
                name: "value_field_index",
                reason: format!(
                    "{} lies outside the {} fields a data line is required to have",
                    self.value_field_index, self.min_fields
                ),
            });
        }
        Ok(())
    }

    pub fn decoder(&self) -> RecordDecoder {
        RecordDecoder::new(self.entity_count, self.min_fields, self.value_field_index)
    }
}

/// Builds a [`ScanConfig`] from a block preset plus individual overrides.
///
/// Without an explicit preset the default (`magnetization-x`) supplies marker and header skip.
#[derive(Default)]
pub struct ScanConfigBuilder {
    preset: Option<String>,
    marker: Option<String>,
    header_skip: Option<usize>,
    entity_count: Option<usize>,
    min_fields: Option<usize>,
    value_field_index: Option<usize>,
}

impl ScanConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preset(mut self, name: impl Into<String>) -> Self {
        self.preset = Some(name.into());
        self
    }
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }
    pub fn header_skip(mut self, lines: usize) -> Self {
        self.header_skip = Some(lines);
        self
    }
    pub fn entity_count(mut self, n: usize) -> Self {
        self.entity_count = Some(n);
        self
    }
    pub fn min_fields(mut self, n: usize) -> Self {
        self.min_fields = Some(n);
        self
    }
    pub fn value_field_index(mut self, index: usize) -> Self {
        self.value_field_index = Some(index);
        self
    }

    pub fn build(self) -> Result<ScanConfig, ConfigError> {
        let preset: &BlockPreset = match &self.preset {
            Some(name) => {
                presets::lookup(name).ok_or_else(|| ConfigError::UnknownPreset(name.clone()))?
            }
            None => presets::default_preset(),
        };

        let config = ScanConfig {
            marker: self.marker.unwrap_or_else(|| preset.marker.to_string()),
            header_skip: self.header_skip.unwrap_or(preset.header_skip),
            entity_count: self
                .entity_count
                .ok_or(ConfigError::MissingParameter("entity_count"))?,
            min_fields: self.min_fields.unwrap_or(DEFAULT_MIN_FIELDS),
            value_field_index: self
                .value_field_index
                .unwrap_or(DEFAULT_VALUE_FIELD_INDEX),
        };
        config.validate()?;
        Ok(config)
    }
}
