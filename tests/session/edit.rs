use splat_edit::{
    ColorAdjustment, EditSession, Error, PaintColor, Scene, SelectOp, Transform, glam::*,
};

use crate::common::given;

#[test]
fn test_edit_session_when_no_target_should_return_no_edit_target() {
    let (mut scene, _) = given::scene_with_splats(2);
    let mut session = EditSession::new();

    assert!(matches!(
        session.add_select_all_op(&mut scene),
        Err(Error::NoEditTarget)
    ));
    assert!(matches!(
        session.add_paint_op(&mut scene, PaintColor::default(), |_| true),
        Err(Error::NoEditTarget)
    ));
    assert!(matches!(
        session.start_transform_op(&mut scene),
        Err(Error::NoEditTarget)
    ));
    assert!(!session.has_selection(&scene));
    assert!(!session.can_undo());
}

#[test]
fn test_edit_session_when_target_destroyed_should_return_stale_entity() {
    let (mut session, mut scene, id) = given::session_with_splats(2);
    scene.destroy(id);

    assert!(matches!(
        session.add_selection_op(&mut scene, SelectOp::Add, |_| true),
        Err(Error::StaleEntity(stale)) if stale == id
    ));
    assert!(matches!(
        session.add_color_adjustment_op(
            &mut scene,
            ColorAdjustment::default(),
            ColorAdjustment::default()
        ),
        Err(Error::StaleEntity(_))
    ));
    assert!(session.history().is_empty());
}

#[test]
fn test_edit_session_when_no_gesture_should_return_no_transform_gesture() {
    let (mut session, mut scene, _) = given::session_with_splats(2);

    assert!(matches!(
        session.update_transform_op(&mut scene, &Transform::IDENTITY, &Transform::IDENTITY),
        Err(Error::NoTransformGesture)
    ));
    assert!(matches!(
        session.end_transform_op(&mut scene, Transform::IDENTITY, Transform::IDENTITY),
        Err(Error::NoTransformGesture)
    ));
}

#[test]
fn test_edit_session_set_target_should_cancel_gesture() {
    let (mut session, mut scene, id) = given::session_with_splats(3);
    given::select(&mut session, &mut scene, &[1]);
    session.start_transform_op(&mut scene).expect("start");
    session
        .update_transform_op(
            &mut scene,
            &Transform::IDENTITY,
            &Transform::from_pos(Vec3::X * 5.0),
        )
        .expect("update");

    session.set_target(&mut scene, Some(id));

    let splats = given::splats_of(&scene, id);
    assert_eq!(session.target(), Some(id));
    assert_eq!(splats.transform_index(), [0, 0, 0]);
    assert_eq!(splats.palette.get(1), Some(Mat4::IDENTITY));
    assert_eq!(session.history().len(), 1);
    assert!(matches!(
        session.end_transform_op(&mut scene, Transform::IDENTITY, Transform::IDENTITY),
        Err(Error::NoTransformGesture)
    ));
}

#[test]
fn test_edit_session_has_selection_should_follow_selection_ops() {
    let (mut session, mut scene, _) = given::session_with_splats(4);
    assert!(!session.has_selection(&scene));

    given::select(&mut session, &mut scene, &[2]);
    assert!(session.has_selection(&scene));

    session.add_select_none_op(&mut scene).expect("select none");
    assert!(!session.has_selection(&scene));

    session.undo(&mut scene);
    assert!(session.has_selection(&scene));
}

#[test]
fn test_edit_session_separate_selection_should_move_selection_to_new_entity() {
    let (mut session, mut scene, id) = given::session_with_splats(5);
    given::select(&mut session, &mut scene, &[1, 3]);

    session
        .add_separate_selection_op(&mut scene)
        .expect("separate");

    assert_eq!(scene.len(), 2);
    let (copy_id, copy) = scene
        .iter()
        .find(|(other, _)| *other != id)
        .expect("created entity");
    assert_eq!(copy.splats.len(), 2);
    assert_eq!(copy.splats.num_selected(), 2);
    assert_eq!(given::state_bits(&scene, id), [0, 4, 0, 4, 0]);
    assert_eq!(given::splats_of(&scene, id).num_deleted(), 2);

    session.undo(&mut scene);
    assert!(!scene.valid(copy_id));
    assert_eq!(given::state_bits(&scene, id), [0, 1, 0, 1, 0]);

    session.redo(&mut scene);
    assert_eq!(scene.len(), 2);
    assert_eq!(given::state_bits(&scene, id), [0, 4, 0, 4, 0]);
}

#[test]
fn test_edit_session_place_pivot_should_be_undoable() {
    let (mut session, mut scene, _) = given::session_with_splats(1);
    let new = Transform::from_pos(Vec3::new(0.0, 0.0, 2.0));

    session
        .add_place_pivot_op(&mut scene, Transform::IDENTITY, new)
        .expect("place pivot");
    assert_eq!(scene.pivot.transform, new);

    session.undo(&mut scene);
    assert_eq!(scene.pivot.transform, Transform::IDENTITY);
}

#[test]
fn test_edit_session_when_target_in_other_scene_should_return_stale_entity() {
    let (mut session, _, _) = given::session_with_splats(1);
    let mut other = Scene::new();

    assert!(matches!(
        session.add_delete_op(&mut other),
        Err(Error::StaleEntity(_))
    ));
}
