//! ECS реализация SceneGraph поверх Commands
//!
//! Instance = child entity anchor'а (ChildOf), поэтому pose маркера
//! применяется автоматически. Despawn трогает только instance, anchor
//! принадлежит AR runtime.

use bevy::prelude::*;

use super::{MarkerTemplate, SceneGraph};

/// Visible/hidden флаг scene-объекта (аналог active/inactive)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shown(pub bool);

impl Default for Shown {
    fn default() -> Self {
        Self(true)
    }
}

/// Instance, созданный для tracked marker
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct MarkerInstance {
    /// Имя маркера (= имя template)
    pub marker: String,
}

/// Asset path template'а (host грузит prefab сам)
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct PrefabPath {
    pub path: String,
}

/// Indicator slot (оверлей "этот маркер сейчас в tracking")
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackingIndicator {
    pub slot: usize,
}

pub struct EcsScene<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
}

impl<'a, 'w, 's> EcsScene<'a, 'w, 's> {
    pub fn new(commands: &'a mut Commands<'w, 's>) -> Self {
        Self { commands }
    }
}

impl SceneGraph for EcsScene<'_, '_, '_> {
    type Anchor = Entity;
    type Instance = Entity;

    fn create(&mut self, template: &MarkerTemplate, anchor: &Entity) -> Entity {
        self.commands
            .spawn((
                MarkerInstance {
                    marker: template.name.clone(),
                },
                PrefabPath {
                    path: template.prefab.clone(),
                },
                Transform::default(),
                Shown(true),
                ChildOf(*anchor),
            ))
            .id()
    }

    fn set_visible(&mut self, instance: &Entity, visible: bool) {
        // try_insert: instance мог быть удалён извне (например, вместе с anchor)
        self.commands.entity(*instance).try_insert(Shown(visible));
    }

    fn destroy(&mut self, instance: Entity) {
        self.commands.entity(instance).try_despawn();
    }
}
