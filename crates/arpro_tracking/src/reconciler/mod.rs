//! Marker lifecycle reconciliation
//!
//! Поток added/updated/removed событий → стабильная таблица instance'ов:
//! - Added: lazy create по template (first match, ordinal compare)
//! - Updated: visibility = (state == Tracking), + indicator slot если есть
//! - Removed: destroy + erase entry
//!
//! Updated/Removed без entry — recoverable ошибка (log + skip), batch
//! продолжает применяться.

use std::collections::HashMap;

use crate::config::TrackingConfig;
use crate::error::ReconcileError;
use crate::logger;
use crate::scene::{MarkerTemplate, SceneGraph};
use crate::tracking::{MarkerBatch, MarkerChange, TrackedMarker};

pub mod registry;


pub use registry::InstanceRegistry;

/// Итог применения одного batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub created: usize,
    pub destroyed: usize,
    /// set_visible вызовы для instance'ов
    pub visibility_changes: usize,
    /// set_visible вызовы для indicator slots
    pub indicator_changes: usize,
    /// No-op события (нет template / instance уже есть)
    pub ignored: usize,
    pub errors: Vec<ReconcileError>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct MarkerInstanceReconciler<I> {
    templates: Vec<MarkerTemplate>,
    template_index: HashMap<String, usize>,
    indicator_table: HashMap<String, usize>,
    indicators: Vec<I>,
    registry: InstanceRegistry<I>,
}

impl<I> MarkerInstanceReconciler<I> {
    pub fn new(config: &TrackingConfig) -> Self {
        let mut template_index = HashMap::with_capacity(config.templates.len());
        for (index, template) in config.templates.iter().enumerate() {
            // Коллизия имён — выигрывает первый template в списке
            template_index.entry(template.name.clone()).or_insert(index);
        }

        Self {
            templates: config.templates.clone(),
            template_index,
            indicator_table: config.indicator_table(),
            indicators: Vec::new(),
            registry: InstanceRegistry::new(),
        }
    }

    /// Handles indicator slots (index = slot из config)
    pub fn attach_indicators(&mut self, indicators: Vec<I>) {
        self.indicators = indicators;
    }

    pub fn indicators(&self) -> &[I] {
        &self.indicators
    }

    /// Все indicators стартуют скрытыми
    pub fn hide_indicators<S>(&self, scene: &mut S)
    where
        S: SceneGraph<Instance = I>,
    {
        for indicator in &self.indicators {
            scene.set_visible(indicator, false);
        }
    }

    pub fn template(&self, marker: &str) -> Option<&MarkerTemplate> {
        self.template_index
            .get(marker)
            .and_then(|&index| self.templates.get(index))
    }

    pub fn templates(&self) -> &[MarkerTemplate] {
        &self.templates
    }

    pub fn instance(&self, marker: &str) -> Option<&I> {
        self.registry.get(marker)
    }

    pub fn is_registered(&self, marker: &str) -> bool {
        self.registry.contains(marker)
    }

    pub fn registered_markers(&self) -> Vec<&str> {
        self.registry.markers()
    }

    pub fn registry(&self) -> &InstanceRegistry<I> {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Применяет batch: added → updated → removed (порядок фиксирован)
    pub fn apply<S>(&mut self, batch: &MarkerBatch<S::Anchor>, scene: &mut S) -> BatchReport
    where
        S: SceneGraph<Instance = I>,
    {
        let mut report = BatchReport::default();

        for marker in &batch.added {
            self.on_added(marker, scene, &mut report);
        }
        for marker in &batch.updated {
            if let Err(err) = self.on_updated(marker, scene, &mut report) {
                logger::log_warning(&format!("Skipping tracking update: {}", err));
                report.errors.push(err);
            }
        }
        for marker in &batch.removed {
            if let Err(err) = self.on_removed(marker, scene, &mut report) {
                logger::log_warning(&format!("Skipping tracking removal: {}", err));
                report.errors.push(err);
            }
        }

        report
    }

    fn on_added<S>(&mut self, marker: &TrackedMarker<S::Anchor>, scene: &mut S, report: &mut BatchReport)
    where
        S: SceneGraph<Instance = I>,
    {
        let Some(&index) = self.template_index.get(marker.name.as_str()) else {
            logger::log(&format!("No template for tracked image '{}'", marker.name));
            report.ignored += 1;
            return;
        };

        // Повторный Added — no-op, create вызывается только для пустого slot
        let template = &self.templates[index];
        let created = self
            .registry
            .insert_with(&marker.name, || scene.create(template, &marker.anchor));
        if !created {
            report.ignored += 1;
            return;
        }

        logger::log(&format!(
            "Instantiated '{}' for tracked image '{}'",
            template.prefab, marker.name
        ));
        report.created += 1;
    }

    fn on_updated<S>(
        &mut self,
        marker: &TrackedMarker<S::Anchor>,
        scene: &mut S,
        report: &mut BatchReport,
    ) -> Result<(), ReconcileError>
    where
        S: SceneGraph<Instance = I>,
    {
        let instance = self
            .registry
            .get(&marker.name)
            .ok_or_else(|| ReconcileError::NotRegistered {
                marker: marker.name.clone(),
                kind: MarkerChange::Updated,
            })?;

        logger::log(&format!(
            "trackingState {} (name: {})",
            marker.tracking_state.as_str(),
            marker.name
        ));

        let visible = marker.tracking_state.is_visible();
        scene.set_visible(instance, visible);
        report.visibility_changes += 1;

        let Some(&slot) = self.indicator_table.get(marker.name.as_str()) else {
            logger::log(&format!("No indicator slot for '{}'", marker.name));
            return Ok(());
        };
        let indicator = self
            .indicators
            .get(slot)
            .ok_or_else(|| ReconcileError::MissingIndicator {
                marker: marker.name.clone(),
                slot,
            })?;
        scene.set_visible(indicator, visible);
        report.indicator_changes += 1;

        Ok(())
    }

    fn on_removed<S>(
        &mut self,
        marker: &TrackedMarker<S::Anchor>,
        scene: &mut S,
        report: &mut BatchReport,
    ) -> Result<(), ReconcileError>
    where
        S: SceneGraph<Instance = I>,
    {
        let instance = self
            .registry
            .remove(&marker.name)
            .ok_or_else(|| ReconcileError::NotRegistered {
                marker: marker.name.clone(),
                kind: MarkerChange::Removed,
            })?;

        scene.destroy(instance);
        report.destroyed += 1;
        logger::log_info(&format!("REMOVED (name: {})", marker.name));

        Ok(())
    }
}
