//! Tracking events — то, что присылает AR runtime
//!
//! Runtime группирует изменения за кадр в три partition (added/updated/removed).
//! `A` — anchor (live transform маркера): `Entity` в ECS, `()` для хостов без него.

use bevy::prelude::*;
use std::fmt;

/// Уверенность runtime в pose маркера
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrackingState {
    #[default]
    None,
    Limited,
    Tracking,
}

impl TrackingState {
    /// Instance видим только при полном tracking (Limited → скрыт)
    pub fn is_visible(self) -> bool {
        matches!(self, TrackingState::Tracking)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrackingState::None => "NONE",
            TrackingState::Limited => "LIMITED",
            TrackingState::Tracking => "TRACKING",
        }
    }
}

/// Вид изменения (в каком partition пришёл marker)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerChange {
    Added,
    Updated,
    Removed,
}

impl fmt::Display for MarkerChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MarkerChange::Added => "Added",
            MarkerChange::Updated => "Updated",
            MarkerChange::Removed => "Removed",
        };
        f.write_str(name)
    }
}

/// Один tracked marker (reference image name + state + anchor)
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedMarker<A = ()> {
    pub name: String,
    pub tracking_state: TrackingState,
    pub anchor: A,
}

impl TrackedMarker<()> {
    pub fn new(name: impl Into<String>, tracking_state: TrackingState) -> Self {
        Self::anchored(name, tracking_state, ())
    }
}

impl<A> TrackedMarker<A> {
    pub fn anchored(name: impl Into<String>, tracking_state: TrackingState, anchor: A) -> Self {
        Self {
            name: name.into(),
            tracking_state,
            anchor,
        }
    }
}

/// Batch изменений за один кадр
///
/// Порядок обработки фиксирован: added → updated → removed.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerBatch<A = ()> {
    pub added: Vec<TrackedMarker<A>>,
    pub updated: Vec<TrackedMarker<A>>,
    pub removed: Vec<TrackedMarker<A>>,
}

impl<A> Default for MarkerBatch<A> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            updated: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl<A> MarkerBatch<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_added(mut self, marker: TrackedMarker<A>) -> Self {
        self.added.push(marker);
        self
    }

    pub fn with_updated(mut self, marker: TrackedMarker<A>) -> Self {
        self.updated.push(marker);
        self
    }

    pub fn with_removed(mut self, marker: TrackedMarker<A>) -> Self {
        self.removed.push(marker);
        self
    }

    pub fn push(&mut self, change: MarkerChange, marker: TrackedMarker<A>) {
        match change {
            MarkerChange::Added => self.added.push(marker),
            MarkerChange::Updated => self.updated.push(marker),
            MarkerChange::Removed => self.removed.push(marker),
        }
    }

    pub fn len(&self) -> usize {
        self.added.len() + self.updated.len() + self.removed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// ECS событие: AR runtime прислал изменения tracked images за кадр
///
/// Anchor = Entity, чей Transform двигает runtime.
#[derive(Event, Debug, Clone, Default)]
pub struct TrackedImagesChanged(pub MarkerBatch<Entity>);
