//! Integration tests for chunked bulk import.

use archscene_lib::cad::import_cad_document;
use archscene_lib::fixtures::{self, dxf_document, dxf_square};
use archscene_lib::state::{ImportSettings, SceneStore, StudioSettings};
use shared::PrimitiveKind;

fn store_with_chunks(chunk_size: usize) -> SceneStore {
    let mut settings = StudioSettings::default();
    settings.import = ImportSettings {
        chunk_size,
        yield_ms: 0,
    };
    SceneStore::with_settings(settings)
}

#[tokio::test]
async fn test_chunked_import_admits_everything() {
    for n in [51, 100, 257] {
        let mut store = store_with_chunks(50);
        let created = store
            .import_objects_chunked(fixtures::inits(PrimitiveKind::Box, n))
            .await;

        assert_eq!(created.len(), n);
        assert_eq!(store.objects().len(), n);
        assert_eq!(store.version(), n.div_ceil(50) as u64);
        assert_eq!(store.selected_object_id(), Some(&created[n - 1].id));
        assert_eq!(created[n - 1].name, format!("Box {n}"));
    }
}

#[tokio::test]
async fn test_chunked_import_adds_to_existing_scene() {
    let mut store = store_with_chunks(4);
    store.add_object(fixtures::box_init(1.0, 1.0, 1.0));
    let created = store
        .import_objects_chunked(fixtures::inits(PrimitiveKind::Box, 10))
        .await;
    assert_eq!(store.objects().len(), 11);
    assert_eq!(created[0].name, "Box 2");
}

#[tokio::test]
async fn test_chunked_import_of_plans() {
    let plans: Vec<_> = (0..60)
        .map(|i| {
            let doc = dxf_document(&[dxf_square(f64::from(i) * 10.0, 0.0, 2.0)]);
            import_cad_document(&doc).unwrap()
        })
        .collect();

    let mut store = store_with_chunks(25);
    let created = store.import_objects_chunked(plans).await;
    assert_eq!(created.len(), 60);
    assert!(created.iter().all(|o| o.kind() == PrimitiveKind::CadPlan));
    assert_eq!(store.selected_object_id(), Some(&created[59].id));
}

#[tokio::test]
async fn test_each_chunk_is_one_undo_step() {
    let mut store = store_with_chunks(10);
    store
        .import_objects_chunked(fixtures::inits(PrimitiveKind::Sphere, 30))
        .await;
    assert!(store.undo());
    assert_eq!(store.objects().len(), 20);
}
