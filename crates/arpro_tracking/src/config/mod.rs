//! TrackingConfig — templates + indicator table + debug флаг
//!
//! Задаётся один раз на старте (в коде или JSON), дальше immutable.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ConfigError;
use crate::scene::MarkerTemplate;

/// Привязка marker → indicator slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorBinding {
    pub marker: String,
    pub slot: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Templates в порядке поиска (при коллизии имён выигрывает первый)
    pub templates: Vec<MarkerTemplate>,
    /// Whitelist маркеров с indicator slot
    pub indicators: Vec<IndicatorBinding>,
    /// Verbose лог каждого tracking state
    pub debug: bool,
}

impl TrackingConfig {
    pub fn new(templates: Vec<MarkerTemplate>) -> Self {
        Self {
            templates,
            ..Default::default()
        }
    }

    pub fn with_indicator(mut self, marker: impl Into<String>, slot: usize) -> Self {
        self.indicators.push(IndicatorBinding {
            marker: marker.into(),
            slot,
        });
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(index) = self.templates.iter().position(|t| t.name.is_empty()) {
            return Err(ConfigError::EmptyTemplateName { index });
        }
        if let Some(index) = self.indicators.iter().position(|b| b.marker.is_empty()) {
            return Err(ConfigError::EmptyIndicatorMarker { index });
        }
        Ok(())
    }

    /// Количество indicator slots (max slot + 1)
    pub fn indicator_slot_count(&self) -> usize {
        self.indicators
            .iter()
            .map(|binding| binding.slot + 1)
            .max()
            .unwrap_or(0)
    }

    /// marker → slot; дубликат marker — выигрывает первая привязка
    pub fn indicator_table(&self) -> HashMap<String, usize> {
        let mut table = HashMap::with_capacity(self.indicators.len());
        for binding in &self.indicators {
            table.entry(binding.marker.clone()).or_insert(binding.slot);
        }
        table
    }
}
