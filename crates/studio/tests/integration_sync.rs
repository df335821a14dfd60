//! Integration tests for the renderer mirror: targeted rebuilds, resource
//! accounting and texture caching.

use archscene_lib::fixtures;
use archscene_lib::harness::TestHarness;
use archscene_lib::sync::{Texture, TextureCache, TextureError};
use shared::{MaterialPatch, ObjectPatch, PrimitiveKind, TextureMaps, TextureSlot};

fn solid_textures() -> TextureCache {
    TextureCache::new(|key: &str| {
        if key.starts_with("missing") {
            Err(TextureError::Decode(format!("no such texture: {key}")))
        } else {
            Ok(Texture {
                width: 2,
                height: 2,
                rgba: vec![255; 16],
            })
        }
    })
}

#[test]
fn test_transform_edit_keeps_geometry() {
    let mut h = TestHarness::new();
    let id = h.add_box(1.0, 2.0, 3.0);
    h.sync();
    let handle = h.render_object(&id).unwrap().geometry.handle;

    h.update(
        &id,
        ObjectPatch {
            position: Some([4.0, 1.0, -1.0]),
            rotation: Some([0.0, 1.0, 0.0]),
            ..Default::default()
        },
    );
    let report = h.sync().unwrap();
    assert_eq!(report.updated, 1);
    assert_eq!(report.rebuilt, 0);

    let render = h.render_object(&id).unwrap();
    assert_eq!(render.geometry.handle, handle);
    assert_eq!(render.position.x, 4.0);
    assert_eq!(render.rotation.y, 1.0);
}

#[test]
fn test_dimension_edit_rebuilds_and_releases() {
    let mut h = TestHarness::new();
    let id = h.add_box(1.0, 1.0, 1.0);
    h.sync();
    let old = h.render_object(&id).unwrap().geometry.handle;

    assert!(h.resize_height(&id, 6.0));
    let report = h.sync().unwrap();
    assert_eq!(report.rebuilt, 1);

    let render = h.render_object(&id).unwrap();
    assert_ne!(render.geometry.handle, old);
    assert!(!h.sync.ledger().is_live(old));
    assert_eq!(h.live_geometry(), 1);
    assert!(h.validate_mesh(&id).unwrap().dimensions_approx([1.0, 6.0, 1.0], 1e-5));
}

#[test]
fn test_deleted_objects_release_geometry() {
    let mut h = TestHarness::new();
    let a = h.add(PrimitiveKind::Sphere);
    h.add(PrimitiveKind::Cone);
    h.sync();
    assert_eq!(h.live_geometry(), 2);

    h.delete(&a);
    let report = h.sync().unwrap();
    assert_eq!(report.removed, 1);
    assert_eq!(h.live_geometry(), 1);
    assert!(h.render_object(&a).is_none());
    assert_eq!(h.sync.ledger().allocated(), 2);
    assert_eq!(h.sync.ledger().released(), 1);
}

#[test]
fn test_undo_is_mirrored() {
    let mut h = TestHarness::new();
    let id = h.add_box(1.0, 1.0, 1.0);
    h.resize_height(&id, 3.0);
    h.sync();

    h.undo();
    let report = h.sync().unwrap();
    assert_eq!(report.rebuilt, 1);
    assert!(h.validate_mesh(&id).unwrap().dimensions_approx([1.0, 1.0, 1.0], 1e-5));
}

#[test]
fn test_no_sync_without_store_change() {
    let mut h = TestHarness::new();
    h.add(PrimitiveKind::Torus);
    assert!(h.sync().is_some());
    assert!(h.sync().is_none());
}

#[test]
fn test_every_kind_mirrors_a_valid_mesh() {
    let mut h = TestHarness::new();
    let ids: Vec<_> = PrimitiveKind::generative().iter().map(|k| h.add(*k)).collect();
    h.sync();
    for id in ids {
        let v = h.validate_mesh(&id).unwrap();
        assert!(v.validate_all().is_empty(), "{id}: {:?}", v.validate_all());
    }
}

#[test]
fn test_plane_rendered_flat() {
    let mut h = TestHarness::new();
    let id = h.add(PrimitiveKind::Plane);
    h.update(
        &id,
        ObjectPatch {
            rotation: Some([0.0, 0.0, 0.0]),
            ..Default::default()
        },
    );
    h.sync();
    let rx = h.render_object(&id).unwrap().rotation.x;
    assert!((rx + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
}

#[test]
fn test_shared_texture_decoded_once() {
    let mut h = TestHarness::with_textures(solid_textures());
    let wood_a = h.store.add_material(fixtures::textured_material("a", "wood.png"));
    let wood_b = h.store.add_material(fixtures::textured_material("b", "wood.png"));
    h.sync();

    assert_eq!(h.sync.textures().decode_count(), 1);
    let a = h.sync.material(&wood_a).unwrap().texture(TextureSlot::Albedo).unwrap();
    let b = h.sync.material(&wood_b).unwrap().texture(TextureSlot::Albedo).unwrap();
    assert!(std::sync::Arc::ptr_eq(a, b));
}

#[test]
fn test_texture_swap_reloads_only_changed_slot() {
    let mut h = TestHarness::with_textures(solid_textures());
    let id = h.store.add_material(fixtures::textured_material("m", "wood.png"));
    h.sync();

    let mut maps = TextureMaps::default();
    maps.albedo = Some("wood.png".to_string());
    maps.normal = Some("wood_normal.png".to_string());
    h.store.update_material(
        &id,
        &MaterialPatch {
            maps: Some(maps),
            ..Default::default()
        },
    );
    let report = h.sync().unwrap();
    assert_eq!(report.materials_synced, 1);
    assert_eq!(h.sync.textures().decode_count(), 2);

    let material = h.sync.material(&id).unwrap();
    assert!(material.texture(TextureSlot::Albedo).is_some());
    assert!(material.texture(TextureSlot::Normal).is_some());
}

#[test]
fn test_failed_texture_is_evicted() {
    let mut h = TestHarness::with_textures(solid_textures());
    let id = h
        .store
        .add_material(fixtures::textured_material("m", "missing.png"));
    h.sync();

    assert!(h.sync.material(&id).unwrap().texture(TextureSlot::Albedo).is_none());
    assert!(!h.sync.textures().contains("missing.png"));
}
