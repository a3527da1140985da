//! Concurrent writers against a file-backed catalog
//!
//! Many overlapping create/update requests on a WAL pool must all succeed
//! without client retries.

use soundstore_catalog::dto::{CreateSoundDto, CreateTagDto, UpdateSoundDto};
use soundstore_catalog::CatalogService;
use soundstore_common::db::init_database;
use std::collections::BTreeSet;
use tempfile::TempDir;

const WRITERS: usize = 40;

async fn setup() -> (TempDir, CatalogService) {
    let dir = TempDir::new().expect("Should create temp dir");
    let pool = init_database(&dir.path().join("soundstore.db"))
        .await
        .expect("Should create database");
    (dir, CatalogService::new(pool))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_tagged_creates_then_updates_all_succeed() {
    let (_dir, service) = setup().await;
    let drums = service
        .create_tag(CreateTagDto {
            label: "drums".to_string(),
        })
        .await
        .unwrap()
        .id;

    let creates: Vec<_> = (0..WRITERS)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create_sound(CreateSoundDto {
                        title: format!("Kick {}", i),
                        price: 1.0,
                        uploaded_on: None,
                        rank: Some(i as i64),
                        tags: BTreeSet::from([drums]),
                    })
                    .await
            })
        })
        .collect();

    let mut created = Vec::new();
    for handle in creates {
        let sound = handle
            .await
            .expect("Task should not panic")
            .expect("Concurrent create should succeed");
        created.push(sound);
    }

    let listed = service.list_sounds(&BTreeSet::from([drums])).await.unwrap();
    assert_eq!(listed.len(), WRITERS);

    let updates: Vec<_> = created
        .iter()
        .map(|sound| {
            let service = service.clone();
            let update = UpdateSoundDto {
                id: sound.id,
                title: format!("{} (edited)", sound.title),
                price: 2.0,
                uploaded_on: sound.uploaded_on,
                rank: None,
            };
            tokio::spawn(async move { service.update_sound(update.id, update).await })
        })
        .collect();

    for handle in updates {
        handle
            .await
            .expect("Task should not panic")
            .expect("Concurrent update should succeed");
    }

    for sound in &created {
        let fetched = service.get_sound(sound.id).await.unwrap();
        assert_eq!(fetched.title, format!("{} (edited)", sound.title));
        assert_eq!(fetched.price, 2.0);
        assert_eq!(fetched.rank, sound.rank);
        assert_eq!(fetched.tags, sound.tags);
    }
}
