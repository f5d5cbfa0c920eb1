//! Reveal-on-request: объект скрыт до явного запроса (кнопка UI и т.п.)

use bevy::prelude::*;

use crate::logger;
use crate::scene::Shown;

#[derive(Component, Debug, Default, Clone, Copy)]
pub struct RevealOnRequest;

/// Запрос показать entity с RevealOnRequest
#[derive(Event, Debug, Clone, Copy)]
pub struct RevealRequested(pub Entity);

/// Новые RevealOnRequest entities стартуют скрытыми
pub fn hide_revealables(query: Query<Entity, Added<RevealOnRequest>>, mut commands: Commands) {
    for entity in query.iter() {
        commands.entity(entity).insert(Shown(false));
    }
}

pub fn reveal_on_request(
    mut requests: EventReader<RevealRequested>,
    revealables: Query<(), With<RevealOnRequest>>,
    mut commands: Commands,
) {
    for RevealRequested(target) in requests.read() {
        if !revealables.contains(*target) {
            logger::log(&format!("Reveal requested for {:?} without RevealOnRequest", target));
            continue;
        }
        commands.entity(*target).insert(Shown(true));
    }
}
