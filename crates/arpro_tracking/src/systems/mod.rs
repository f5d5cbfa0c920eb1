//! ECS systems: TrackedImagesChanged → reconciler → EcsScene
//!
//! Reconciler живёт в `MarkerReconciler` resource; мутирует его только
//! `reconcile_tracked_images` (ResMut = эксклюзивный доступ, без lock).

use bevy::prelude::*;

use crate::config::TrackingConfig;
use crate::reconciler::{BatchReport, MarkerInstanceReconciler};
use crate::scene::{EcsScene, TrackingIndicator};
use crate::tracking::TrackedImagesChanged;

pub mod billboard;
pub mod reveal;

#[cfg(test)]
mod systems_tests;

pub use billboard::{face_away_from_camera, FaceAwayFromCamera, MainCamera};
pub use reveal::{hide_revealables, reveal_on_request, RevealOnRequest, RevealRequested};

/// Накопленная статистика по всем batch'ам
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub batches: usize,
    pub created: usize,
    pub destroyed: usize,
    pub visibility_changes: usize,
    pub indicator_changes: usize,
    pub ignored: usize,
    pub errors: usize,
}

impl ReconcileStats {
    pub fn record(&mut self, report: &BatchReport) {
        self.batches += 1;
        self.created += report.created;
        self.destroyed += report.destroyed;
        self.visibility_changes += report.visibility_changes;
        self.indicator_changes += report.indicator_changes;
        self.ignored += report.ignored;
        self.errors += report.errors.len();
    }
}

#[derive(Resource)]
pub struct MarkerReconciler {
    pub reconciler: MarkerInstanceReconciler<Entity>,
    pub stats: ReconcileStats,
    /// Сколько indicator entities спавнить на Startup
    pub indicator_slots: usize,
}

impl MarkerReconciler {
    pub fn new(config: &TrackingConfig) -> Self {
        Self {
            reconciler: MarkerInstanceReconciler::new(config),
            stats: ReconcileStats::default(),
            indicator_slots: config.indicator_slot_count(),
        }
    }
}

/// Startup: один indicator entity на slot, все скрыты
pub fn spawn_tracking_indicators(mut commands: Commands, mut tracking: ResMut<MarkerReconciler>) {
    let indicators: Vec<Entity> = (0..tracking.indicator_slots)
        .map(|slot| commands.spawn((TrackingIndicator { slot }, Transform::default())).id())
        .collect();

    tracking.reconciler.attach_indicators(indicators);
    tracking.reconciler.hide_indicators(&mut EcsScene::new(&mut commands));
}

/// Применяет все TrackedImagesChanged за кадр (в порядке отправки)
pub fn reconcile_tracked_images(
    mut events: EventReader<TrackedImagesChanged>,
    mut tracking: ResMut<MarkerReconciler>,
    mut commands: Commands,
) {
    let tracking = &mut *tracking;
    let mut scene = EcsScene::new(&mut commands);

    for TrackedImagesChanged(batch) in events.read() {
        let report = tracking.reconciler.apply(batch, &mut scene);
        tracking.stats.record(&report);
    }
}
