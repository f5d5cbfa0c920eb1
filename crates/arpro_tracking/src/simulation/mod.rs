//! Симулированный AR runtime (headless демо + тесты детерминизма)
//!
//! Каждый кадр бросает кубики по списку маркеров и шлёт TrackedImagesChanged,
//! соблюдая контракт настоящего runtime: Updated/Removed только для уже
//! обнаруженных маркеров. Маркеры без template тоже обнаруживаются — их
//! Updated превращаются в skip-ошибки reconciler'а.

use bevy::prelude::*;
use rand::Rng;
use std::collections::HashMap;

use crate::tracking::{MarkerBatch, MarkerChange, TrackedImagesChanged, TrackedMarker, TrackingState};
use crate::{DeterministicRng, TrackingSet};

/// Вероятности переходов за один кадр
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOdds {
    /// Не обнаруженный marker → Added
    pub detect: f64,
    /// Обнаруженный marker → Updated
    pub update: f64,
    /// Обнаруженный marker → Removed
    pub lose: f64,
}

impl Default for SessionOdds {
    fn default() -> Self {
        Self {
            detect: 0.2,
            update: 0.5,
            lose: 0.05,
        }
    }
}

/// Anchor entity маркера (Transform двигает runtime)
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct MarkerAnchor {
    pub marker: String,
}

#[derive(Resource, Debug)]
pub struct SimulatedRuntime {
    markers: Vec<String>,
    odds: SessionOdds,
    /// Anchors переиспользуются при повторном обнаружении
    anchors: HashMap<String, Entity>,
    detected: HashMap<String, TrackingState>,
}

impl SimulatedRuntime {
    pub fn new(markers: Vec<String>, odds: SessionOdds) -> Self {
        Self {
            markers,
            odds,
            anchors: HashMap::new(),
            detected: HashMap::new(),
        }
    }

    pub fn detected_count(&self) -> usize {
        self.detected.len()
    }

    pub fn is_detected(&self, marker: &str) -> bool {
        self.detected.contains_key(marker)
    }

    /// Один кадр runtime; новые anchors спавнятся через `spawn_anchor`
    pub fn step<R: Rng>(
        &mut self,
        rng: &mut R,
        mut spawn_anchor: impl FnMut(&str) -> Entity,
    ) -> MarkerBatch<Entity> {
        let mut batch = MarkerBatch::new();

        for marker in &self.markers {
            match self.detected.get(marker).copied() {
                None => {
                    if !rng.gen_bool(self.odds.detect) {
                        continue;
                    }
                    let anchor = *self
                        .anchors
                        .entry(marker.clone())
                        .or_insert_with(|| spawn_anchor(marker));
                    self.detected.insert(marker.clone(), TrackingState::Tracking);
                    batch.push(MarkerChange::Added, TrackedMarker::anchored(
                        marker.clone(),
                        TrackingState::Tracking,
                        anchor,
                    ));
                }
                Some(_) => {
                    let Some(&anchor) = self.anchors.get(marker) else {
                        continue;
                    };
                    if rng.gen_bool(self.odds.lose) {
                        self.detected.remove(marker);
                        batch.push(MarkerChange::Removed, TrackedMarker::anchored(
                            marker.clone(),
                            TrackingState::None,
                            anchor,
                        ));
                    } else if rng.gen_bool(self.odds.update) {
                        let state = random_state(rng);
                        self.detected.insert(marker.clone(), state);
                        batch.push(
                            MarkerChange::Updated,
                            TrackedMarker::anchored(marker.clone(), state, anchor),
                        );
                    }
                }
            }
        }

        batch
    }
}

fn random_state<R: Rng>(rng: &mut R) -> TrackingState {
    match rng.gen_range(0..3) {
        0 => TrackingState::None,
        1 => TrackingState::Limited,
        _ => TrackingState::Tracking,
    }
}

/// Каждый кадр: runtime step → TrackedImagesChanged (пустые batch не шлём)
pub fn simulate_tracking_frame(
    mut runtime: ResMut<SimulatedRuntime>,
    mut rng: ResMut<DeterministicRng>,
    mut events: EventWriter<TrackedImagesChanged>,
    mut commands: Commands,
) {
    let batch = runtime.step(&mut rng.rng, |marker| {
        commands
            .spawn((
                MarkerAnchor {
                    marker: marker.to_string(),
                },
                Transform::default(),
            ))
            .id()
    });

    if !batch.is_empty() {
        events.write(TrackedImagesChanged(batch));
    }
}

/// Подключает симулированный runtime перед reconcile
pub struct SimulatedRuntimePlugin {
    pub markers: Vec<String>,
    pub odds: SessionOdds,
}

impl SimulatedRuntimePlugin {
    pub fn new(markers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
            odds: SessionOdds::default(),
        }
    }
}

impl Plugin for SimulatedRuntimePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimulatedRuntime::new(self.markers.clone(), self.odds))
            .add_systems(Update, simulate_tracking_frame.before(TrackingSet::Reconcile));
    }
}
