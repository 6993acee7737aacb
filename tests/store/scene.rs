use splat_edit::{Scene, SplatEntity};

use crate::common::given;

#[test]
fn test_scene_create_entity_should_return_valid_id() {
    let mut scene = Scene::new();

    let id = scene.create_entity(SplatEntity::new("model", given::splats(3)));

    assert!(scene.valid(id));
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.get(id).expect("entity").splats.len(), 3);
}

#[test]
fn test_scene_when_slot_reused_should_invalidate_old_id() {
    let mut scene = Scene::new();
    let old = scene.create_entity(SplatEntity::new("a", given::splats(1)));

    assert!(scene.destroy(old).is_some());
    let new = scene.create_entity(SplatEntity::new("b", given::splats(2)));

    assert_eq!(old.index(), new.index());
    assert_ne!(old.generation(), new.generation());
    assert!(!scene.valid(old));
    assert!(scene.get(old).is_none());
    assert!(scene.destroy(old).is_none());
    assert_eq!(scene.get(new).expect("entity").name, "b");
}

#[test]
fn test_scene_iter_should_skip_destroyed_entities() {
    let mut scene = Scene::new();
    let a = scene.create_entity(SplatEntity::new("a", given::splats(1)));
    let b = scene.create_entity(SplatEntity::new("b", given::splats(1)));

    scene.destroy(a);

    assert_eq!(scene.iter().map(|(id, _)| id).collect::<Vec<_>>(), [b]);
    assert!(!scene.is_empty());
}
