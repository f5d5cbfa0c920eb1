//! Billboard: объект всегда развёрнут от камеры (контент читается с её стороны)
//!
//! Считаем в world space (GlobalTransform): billboard обычно child anchor'а
//! маркера, поэтому local translation ≠ позиция в мире.

use bevy::prelude::*;

/// Камера, относительно которой ориентируются billboards
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct MainCamera;

#[derive(Component, Debug, Default, Clone, Copy)]
pub struct FaceAwayFromCamera;

/// World forward смотрит на 2·position − camera (строго от камеры)
///
/// Local rotation = parent_rotation⁻¹ · world_rotation. GlobalTransform
/// пропагируется в PostUpdate (TransformPlugin), т.е. берём позиции прошлого кадра.
pub fn face_away_from_camera(
    camera: Query<&GlobalTransform, With<MainCamera>>,
    mut billboards: Query<(&mut Transform, &GlobalTransform, Option<&ChildOf>), With<FaceAwayFromCamera>>,
    parents: Query<&GlobalTransform>,
) {
    let Ok(camera) = camera.single() else {
        return;
    };
    let camera_position = camera.translation();

    for (mut transform, global, child_of) in billboards.iter_mut() {
        let position = global.translation();
        let target = 2.0 * position - camera_position;
        // Billboard в точке камеры — направление не определено
        if (target - position).length_squared() < f32::EPSILON {
            continue;
        }

        let world_rotation = Transform::from_translation(position)
            .looking_at(target, Vec3::Y)
            .rotation;

        let parent_rotation = child_of
            .and_then(|child_of| parents.get(child_of.parent()).ok())
            .map(|parent| parent.compute_transform().rotation)
            .unwrap_or(Quat::IDENTITY);

        transform.rotation = parent_rotation.inverse() * world_rotation;
    }
}
