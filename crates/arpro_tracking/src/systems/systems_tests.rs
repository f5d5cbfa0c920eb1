//! Tests for ECS helper systems (billboard, reveal, stats).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use bevy::transform::TransformPlugin;

    use super::super::{
        face_away_from_camera, hide_revealables, reveal_on_request, FaceAwayFromCamera, MainCamera,
        ReconcileStats, RevealOnRequest, RevealRequested,
    };
    use crate::error::ReconcileError;
    use crate::reconciler::BatchReport;
    use crate::scene::Shown;
    use crate::tracking::MarkerChange;

    fn billboard_app() -> App {
        let mut app = App::new();
        app.add_plugins(TransformPlugin)
            .add_systems(Update, face_away_from_camera);
        app
    }

    /// GlobalTransform пропагируется в PostUpdate → billboard видит его со второго кадра
    fn settle(app: &mut App) {
        app.update();
        app.update();
    }

    fn world_forward(app: &App, entity: Entity) -> Vec3 {
        app.world().get::<GlobalTransform>(entity).unwrap().forward().as_vec3()
    }

    fn reveal_app() -> App {
        let mut app = App::new();
        app.add_event::<RevealRequested>()
            .add_systems(Update, (hide_revealables, reveal_on_request).chain());
        app
    }

    #[test]
    fn test_billboard_faces_away_from_camera() {
        let mut app = billboard_app();
        app.world_mut().spawn((MainCamera, Transform::from_xyz(0.0, 0.0, 0.0)));
        let billboard = app
            .world_mut()
            .spawn((FaceAwayFromCamera, Transform::from_xyz(5.0, 0.0, 0.0)))
            .id();

        settle(&mut app);

        let forward = world_forward(&app, billboard);
        assert!((forward - Vec3::X).length() < 1e-4, "forward = {:?}", forward);
        // Позицию не трогаем
        let transform = app.world().get::<Transform>(billboard).unwrap();
        assert_eq!(transform.translation, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_billboard_under_translated_anchor_uses_world_position() {
        let mut app = billboard_app();
        app.world_mut().spawn((MainCamera, Transform::from_xyz(0.0, 0.0, 0.0)));
        let anchor = app.world_mut().spawn(Transform::from_xyz(10.0, 0.0, 0.0)).id();
        let billboard = app
            .world_mut()
            .spawn((FaceAwayFromCamera, Transform::default(), ChildOf(anchor)))
            .id();

        settle(&mut app);

        let forward = world_forward(&app, billboard);
        assert!((forward - Vec3::X).length() < 1e-4, "forward = {:?}", forward);
    }

    #[test]
    fn test_billboard_under_rotated_anchor_compensates_parent_rotation() {
        let mut app = billboard_app();
        app.world_mut().spawn((MainCamera, Transform::from_xyz(0.0, 0.0, 0.0)));
        let anchor = app
            .world_mut()
            .spawn(
                Transform::from_xyz(0.0, 0.0, -10.0)
                    .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)),
            )
            .id();
        let billboard = app
            .world_mut()
            .spawn((FaceAwayFromCamera, Transform::default(), ChildOf(anchor)))
            .id();

        settle(&mut app);
        // Ещё кадр: rotation, записанный в Update, попадает в GlobalTransform в PostUpdate
        app.update();

        let forward = world_forward(&app, billboard);
        assert!((forward - Vec3::NEG_Z).length() < 1e-4, "forward = {:?}", forward);
    }

    #[test]
    fn test_billboard_without_camera_untouched() {
        let mut app = billboard_app();
        let billboard = app
            .world_mut()
            .spawn((FaceAwayFromCamera, Transform::from_xyz(1.0, 2.0, 3.0)))
            .id();

        settle(&mut app);

        let transform = app.world().get::<Transform>(billboard).unwrap();
        assert_eq!(transform.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_revealable_hidden_until_requested() {
        let mut app = reveal_app();
        let text = app.world_mut().spawn(RevealOnRequest).id();

        app.update();
        assert_eq!(app.world().get::<Shown>(text), Some(&Shown(false)));

        app.world_mut().send_event(RevealRequested(text));
        app.update();
        assert_eq!(app.world().get::<Shown>(text), Some(&Shown(true)));
    }

    #[test]
    fn test_reveal_ignores_plain_entities() {
        let mut app = reveal_app();
        let plain = app.world_mut().spawn(Transform::default()).id();

        app.world_mut().send_event(RevealRequested(plain));
        app.update();

        assert!(app.world().get::<Shown>(plain).is_none());
    }

    #[test]
    fn test_stats_accumulate_reports() {
        let mut stats = ReconcileStats::default();
        stats.record(&BatchReport {
            created: 2,
            visibility_changes: 1,
            ..Default::default()
        });
        stats.record(&BatchReport {
            destroyed: 1,
            ignored: 1,
            errors: vec![ReconcileError::NotRegistered {
                marker: "X".into(),
                kind: MarkerChange::Removed,
            }],
            ..Default::default()
        });

        assert_eq!(
            stats,
            ReconcileStats {
                batches: 2,
                created: 2,
                destroyed: 1,
                visibility_changes: 1,
                indicator_changes: 0,
                ignored: 1,
                errors: 1,
            }
        );
    }
}
