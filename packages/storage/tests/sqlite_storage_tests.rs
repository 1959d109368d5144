// ABOUTME: Integration tests for the SQLite task storage
// ABOUTME: Covers persistence, id allocation, pagination and atomic partial updates

use chrono::NaiveDate;
use futures::future::join_all;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use taskbot_core::{TaskCreateInput, TaskUpdateInput};
use taskbot_storage::{SqliteTaskStorage, StorageError, TaskStorage};
use tempfile::TempDir;

async fn open_storage(dir: &TempDir) -> SqliteTaskStorage {
    let url = format!("sqlite://{}", dir.path().join("tasks.db").display());
    SqliteTaskStorage::connect(&url).await.unwrap()
}

fn input(title: &str) -> TaskCreateInput {
    TaskCreateInput {
        title: title.to_string(),
        description: "a simple task".to_string(),
        due_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        completed: false,
    }
}

#[tokio::test]
async fn test_create_then_get_round_trips_fields() {
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir).await;

    let created = storage.create_task(input("alpha")).await.unwrap();
    let fetched = storage.get_task(created.id).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.title, "alpha");
    assert_eq!(fetched.due_date.to_string(), "2024-01-01");
    assert!(!fetched.completed);
}

#[tokio::test]
async fn test_tasks_survive_reopening_the_database() {
    let dir = TempDir::new().unwrap();
    let id = {
        let storage = open_storage(&dir).await;
        storage.create_task(input("persisted")).await.unwrap().id
    };

    let reopened = open_storage(&dir).await;
    assert_eq!(reopened.get_task(id).await.unwrap().title, "persisted");
}

#[tokio::test]
async fn test_deleted_ids_are_never_reused() {
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir).await;

    let first = storage.create_task(input("a")).await.unwrap();
    let second = storage.create_task(input("b")).await.unwrap();
    storage.delete_task(second.id).await.unwrap();

    let third = storage.create_task(input("c")).await.unwrap();
    assert!(third.id > second.id);
    assert!(third.id > first.id);

    match storage.get_task(second.id).await {
        Err(StorageError::NotFound(id)) => assert_eq!(id, second.id),
        other => panic!("expected NotFound, got {:?}", other),
    }
    assert!(matches!(
        storage.delete_task(second.id).await,
        Err(StorageError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_list_is_in_insertion_order_with_total() {
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir).await;
    for i in 0..15 {
        storage.create_task(input(&format!("task {}", i))).await.unwrap();
    }

    let (first_page, total) = storage.list_tasks_paginated(10, 0).await.unwrap();
    let (second_page, _) = storage.list_tasks_paginated(10, 10).await.unwrap();

    assert_eq!(total, 15);
    assert_eq!(first_page.len(), 10);
    assert_eq!(first_page[0].title, "task 0");
    assert_eq!(second_page.len(), 5);
    assert_eq!(second_page[4].title, "task 14");
}

#[tokio::test]
async fn test_partial_update_leaves_other_fields() {
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir).await;
    let created = storage.create_task(input("alpha")).await.unwrap();

    let updated = storage
        .update_task(
            created.id,
            TaskUpdateInput {
                completed: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let mut expected = created.clone();
    expected.completed = true;
    assert_eq!(updated, expected);
}

#[tokio::test]
async fn test_update_unknown_task_is_not_found() {
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir).await;

    let result = storage
        .update_task(
            99,
            TaskUpdateInput {
                title: Some("ghost".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(StorageError::NotFound(99))));
}

#[tokio::test]
async fn test_empty_update_returns_task_unchanged() {
    let dir = TempDir::new().unwrap();
    let storage = open_storage(&dir).await;
    let created = storage.create_task(input("alpha")).await.unwrap();

    let updated = storage
        .update_task(created.id, TaskUpdateInput::default())
        .await
        .unwrap();
    assert_eq!(updated, created);

    let missing = storage.update_task(created.id + 1, TaskUpdateInput::default()).await;
    assert!(matches!(missing, Err(StorageError::NotFound(_))));
}

#[tokio::test]
async fn test_concurrent_partial_updates_keep_both_fields() {
    let dir = TempDir::new().unwrap();
    let storage = Arc::new(open_storage(&dir).await);
    let id = storage.create_task(input("alpha")).await.unwrap().id;

    let updates = vec![
        TaskUpdateInput {
            title: Some("renamed".to_string()),
            ..Default::default()
        },
        TaskUpdateInput {
            description: Some("rewritten".to_string()),
            ..Default::default()
        },
        TaskUpdateInput {
            completed: Some(true),
            ..Default::default()
        },
    ];

    let handles: Vec<_> = updates
        .into_iter()
        .map(|update| {
            let storage = storage.clone();
            tokio::spawn(async move { storage.update_task(id, update).await })
        })
        .collect();

    for result in join_all(handles).await {
        assert!(result.unwrap().is_ok());
    }

    let stored = storage.get_task(id).await.unwrap();
    assert_eq!(stored.title, "renamed");
    assert_eq!(stored.description, "rewritten");
    assert!(stored.completed);
}
