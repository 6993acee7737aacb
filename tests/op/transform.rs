use std::collections::HashMap;

use splat_edit::{
    EditHistory, EntityTransformOp, PlacePivotOp, SplatTransformOp, Transform,
    pivot_delta_in_frame, glam::*,
};

use crate::common::given;

fn scene_with_spare_slot(len: u32) -> (splat_edit::Scene, splat_edit::EntityId) {
    let (mut scene, id) = given::scene_with_splats(len);
    let splats = &mut scene.get_mut(id).expect("entity").splats;
    splats
        .palette
        .add_transform(Mat4::IDENTITY)
        .expect("palette slot");
    (scene, id)
}

#[test]
fn test_splat_transform_op_when_applied_should_move_captured_splats_to_new_slot() {
    let (mut scene, id) = scene_with_spare_slot(4);
    let offset = Vec3::new(1.0, 2.0, 3.0);
    let op = SplatTransformOp::new(
        id,
        Transform::IDENTITY,
        Transform::from_pos(offset),
        Mat4::IDENTITY,
        HashMap::from([(0, 1)]),
        vec![0, 2],
    );

    let mut history = EditHistory::new();
    history.add(op, &mut scene);

    let splats = given::splats_of(&scene, id);
    assert_eq!(splats.transform_index(), [1, 0, 1, 0]);
    given::assert_mat4_near(
        splats.palette.get(1).expect("slot"),
        Mat4::from_translation(offset),
        1e-6,
    );
    assert_eq!(splats.palette.get(0), Some(Mat4::IDENTITY));

    history.undo(&mut scene);
    let splats = given::splats_of(&scene, id);
    assert_eq!(splats.transform_index(), [0, 0, 0, 0]);
    assert_eq!(splats.palette.get(1), Some(Mat4::IDENTITY));

    history.redo(&mut scene);
    assert_eq!(given::splats_of(&scene, id).transform_index(), [1, 0, 1, 0]);
}

#[test]
fn test_splat_transform_op_when_entity_is_scaled_should_move_splats_by_world_delta() {
    let (mut scene, id) = scene_with_spare_slot(1);
    let entity_transform = Transform::new(Vec3::ZERO, Quat::IDENTITY, Vec3::splat(2.0));
    scene.get_mut(id).expect("entity").transform = entity_transform;

    let frame = entity_transform.world_matrix();
    let op = SplatTransformOp::new(
        id,
        Transform::IDENTITY,
        Transform::from_pos(Vec3::X),
        frame,
        HashMap::from([(0, 1)]),
        vec![0],
    );
    let mut history = EditHistory::new();
    history.add(op, &mut scene);

    let splats = given::splats_of(&scene, id);
    let local = splats.positions()[0];
    let moved = frame * splats.palette.get(1).expect("slot") * local.extend(1.0);
    given::assert_vec3_near(moved.truncate(), frame.transform_point3(local) + Vec3::X, 1e-5);
}

#[test]
fn test_pivot_delta_in_frame_when_frame_is_identity_should_equal_world_delta() {
    let old = Transform::from_pos(Vec3::new(1.0, 0.0, 0.0));
    let new = Transform::new(
        Vec3::new(1.0, 1.0, 0.0),
        Quat::from_rotation_z(0.5),
        Vec3::ONE,
    );

    given::assert_mat4_near(
        pivot_delta_in_frame(&old, &new, Mat4::IDENTITY),
        new.world_matrix() * old.world_matrix().inverse(),
        1e-6,
    );
}

#[test]
fn test_entity_transform_op_when_undone_should_restore_transform() {
    let (mut scene, id) = given::scene_with_splats(2);
    let old = Transform::IDENTITY;
    let new = Transform::from_pos(Vec3::new(0.0, 5.0, 0.0));

    let mut history = EditHistory::new();
    history.add(EntityTransformOp::new(id, old, new), &mut scene);
    assert_eq!(scene.get(id).expect("entity").transform, new);

    history.undo(&mut scene);
    assert_eq!(scene.get(id).expect("entity").transform, old);
}

#[test]
fn test_place_pivot_op_when_applied_and_undone_should_move_pivot() {
    let (mut scene, _) = given::scene_with_splats(1);
    let new = Transform::from_pos(Vec3::new(4.0, 0.0, 0.0));

    let mut history = EditHistory::new();
    history.add(PlacePivotOp::new(Transform::IDENTITY, new), &mut scene);
    assert_eq!(scene.pivot.transform, new);

    history.undo(&mut scene);
    assert_eq!(scene.pivot.transform, Transform::IDENTITY);
}
