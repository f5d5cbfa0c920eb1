//! ARPRO marker tracking core
//!
//! AR runtime (image recognition + pose) — внешний: мы только получаем
//! batch added/updated/removed за кадр и держим таблицу marker → instance.
//!
//! Слои:
//! - `reconciler` — engine-agnostic логика (SceneGraph trait)
//! - `systems` / `scene::ecs` — Bevy ECS интеграция (headless)
//! - `simulation` — seeded симуляция runtime для демо и тестов

use bevy::prelude::*;
use bevy::transform::TransformPlugin;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod config;
pub mod error;
pub mod logger;
pub mod reconciler;
pub mod scene;
pub mod simulation;
pub mod systems;
pub mod tracking;

pub use config::{IndicatorBinding, TrackingConfig};
pub use error::{ConfigError, ReconcileError};
pub use reconciler::{BatchReport, InstanceRegistry, MarkerInstanceReconciler};
pub use scene::{EcsScene, MarkerInstance, MarkerTemplate, PrefabPath, SceneGraph, Shown, TrackingIndicator};
pub use simulation::{MarkerAnchor, SessionOdds, SimulatedRuntime, SimulatedRuntimePlugin};
pub use systems::{
    FaceAwayFromCamera, MainCamera, MarkerReconciler, ReconcileStats, RevealOnRequest, RevealRequested,
};
pub use tracking::{MarkerBatch, MarkerChange, TrackedImagesChanged, TrackedMarker, TrackingState};

/// Порядок в Update: всё, что шлёт TrackedImagesChanged, идёт до Reconcile
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrackingSet {
    Reconcile,
}

/// Главный plugin: events + reconciler resource + systems
pub struct MarkerTrackingPlugin {
    pub config: TrackingConfig,
}

impl MarkerTrackingPlugin {
    pub fn new(config: TrackingConfig) -> Self {
        Self { config }
    }
}

impl Plugin for MarkerTrackingPlugin {
    fn build(&self, app: &mut App) {
        logger::init_logger();
        logger::set_log_level(logger::LogLevel::for_debug_flag(self.config.debug));

        app.add_event::<TrackedImagesChanged>()
            .add_event::<RevealRequested>()
            .insert_resource(MarkerReconciler::new(&self.config))
            .add_systems(Startup, systems::spawn_tracking_indicators)
            .add_systems(
                Update,
                (
                    systems::reconcile_tracked_images.in_set(TrackingSet::Reconcile),
                    systems::face_away_from_camera,
                    (systems::hide_revealables, systems::reveal_on_request).chain(),
                ),
            );
    }
}

/// Seeded RNG для симулированного runtime
///
/// Один resource на App: одинаковый seed → одинаковая последовательность batch'ей.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Headless App: MinimalPlugins + TransformPlugin (GlobalTransform под anchors) + RNG
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins((MinimalPlugins, TransformPlugin))
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Одна строка snapshot: marker, index instance entity, Shown (None — entity пропал)
pub type MarkerSnapshot = (String, u32, Option<bool>);

/// Snapshot registry для сравнения прогонов (отсортирован по имени маркера)
///
/// Entity index детерминирован для одинаковой последовательности spawn'ов.
pub fn tracking_snapshot(world: &World) -> Vec<MarkerSnapshot> {
    let Some(tracking) = world.get_resource::<MarkerReconciler>() else {
        return Vec::new();
    };

    let mut snapshot: Vec<MarkerSnapshot> = tracking
        .reconciler
        .registry()
        .iter()
        .map(|(marker, &instance)| {
            let shown = world.get::<Shown>(instance).map(|shown| shown.0);
            (marker.to_string(), instance.index(), shown)
        })
        .collect();
    snapshot.sort_unstable_by(|a, b| a.0.cmp(&b.0));

    snapshot
}
