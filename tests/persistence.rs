use std::str::FromStr;
use std::sync::Arc;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use pocketnotes::account_directory::{AccountDirectory, AccountError, ProductionAccountDirectory};
use pocketnotes::config::app_config::AppConfig;
use pocketnotes::data::{NewNote, NotePatch};
use pocketnotes::kv_store::FileKeyValueStore;
use pocketnotes::note_store::NoteStore;
use pocketnotes::query::{QueryView, SortOrder};
use pocketnotes::username_string::UsernameString;

struct App {
    directory: ProductionAccountDirectory,
    notes: NoteStore,
}

async fn open(dir: &TempDir) -> App {
    let store = Arc::new(
        FileKeyValueStore::new(&AppConfig {
            data_directory: dir.path().to_owned(),
            ..AppConfig::default()
        })
            .await
            .expect("store creation failed")
    );
    App {
        directory: ProductionAccountDirectory::new(store.clone()),
        notes: NoteStore::new(store),
    }
}

fn username(s: &str) -> UsernameString {
    UsernameString::from_str(s).unwrap()
}

fn new_note(title: &str, body: &str) -> NewNote {
    NewNote {
        title: title.into(),
        body: body.into(),
        image_uri: None,
    }
}

#[tokio::test]
async fn accounts_and_notes_survive_reopening() {
    let dir = TempDir::new().unwrap();
    let alice = username("alice");
    let created = {
        let app = open(&dir).await;
        app.directory.register(&alice, "pw").await.unwrap();
        app.directory.authenticate(&alice, "pw").await.unwrap();
        app.notes.create_note(&alice, new_note("groceries", "milk")).await.unwrap()
    };

    let app = open(&dir).await;
    assert_eq!(app.directory.current_session().await, Some(alice.clone()));
    assert_eq!(app.directory.list_usernames().await, vec![alice.clone()]);
    assert_eq!(app.notes.get_note(&alice, &created.id).await, Some(created));
}

#[tokio::test]
async fn stored_layout_uses_fixed_keys() {
    let dir = TempDir::new().unwrap();
    let app = open(&dir).await;
    let bob = username("bob");
    app.directory.register(&bob, "pw").await.unwrap();
    app.directory.authenticate(&bob, "pw").await.unwrap();
    app.notes.create_note(&bob, new_note("t", "b")).await.unwrap();

    let kv = dir.child("kv");
    kv.child(hex::encode("@users")).assert(r#"[{"username":"bob","password":"pw"}]"#);
    kv.child(hex::encode("@current_user")).assert("bob");
    kv.child(hex::encode("@notes_bob")).assert(predicates::str::contains(r#""title":"t""#));
}

#[tokio::test]
async fn switching_accounts_scopes_notes() {
    let dir = TempDir::new().unwrap();
    let app = open(&dir).await;
    let alice = username("alice");
    let bob = username("bob");
    app.directory.register(&alice, "a").await.unwrap();
    app.directory.register(&bob, "b").await.unwrap();

    app.directory.authenticate(&alice, "a").await.unwrap();
    let session = app.directory.current_session().await.unwrap();
    app.notes.create_note(&session, new_note("alice only", "")).await.unwrap();

    assert!(!app.directory.verify_credentials(&bob, "a").await);
    assert!(app.directory.verify_credentials(&bob, "b").await);
    app.directory.switch_session(&bob).await.unwrap();
    let session = app.directory.current_session().await.unwrap();
    assert_eq!(session, bob);
    assert!(app.notes.list_notes(&session).await.is_empty());

    app.directory.end_session().await;
    assert_eq!(app.directory.current_session().await, None);
    assert_eq!(app.notes.list_notes(&alice).await.len(), 1);
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let dir = TempDir::new().unwrap();
    let app = open(&dir).await;
    app.directory.register(&username("alice"), "a").await.unwrap();
    let err = app.directory.register(&username("alice"), "other").await
        .expect_err("should fail");
    assert!(matches!(err, AccountError::DuplicateUsername), "wrong error type: {err:#?}");
    assert!(app.directory.authenticate(&username("alice"), "other").await.is_err());
}

#[tokio::test]
async fn listing_view_over_stored_notes() {
    let dir = TempDir::new().unwrap();
    let app = open(&dir).await;
    let alice = username("alice");
    let banana = app.notes.create_note(&alice, new_note("Banana", "fruit")).await.unwrap();
    app.notes.create_note(&alice, new_note("apple", "fruit")).await.unwrap();
    app.notes.create_note(&alice, new_note("Cherry", "also fruit")).await.unwrap();
    app.notes.create_note(&alice, new_note("taxes", "due soon")).await.unwrap();
    app.notes.update_note(
        &alice,
        &banana.id,
        NotePatch {
            body: Some("ripe fruit".into()),
            ..Default::default()
        },
    ).await.unwrap();

    let by_title = QueryView::apply(app.notes.list_notes(&alice).await, "FRUIT", SortOrder::TitleAsc);
    assert_eq!(
        by_title.iter().map(|n| n.title.as_str()).collect::<Vec<_>>(),
        vec!["apple", "Banana", "Cherry"],
    );

    let newest = QueryView::apply(app.notes.list_notes(&alice).await, "", SortOrder::UpdatedDesc);
    assert_eq!(newest.len(), 4);
    assert_eq!(newest[0].id, banana.id);
}

#[tokio::test]
async fn delete_is_idempotent_on_disk() {
    let dir = TempDir::new().unwrap();
    let app = open(&dir).await;
    let alice = username("alice");
    let note = app.notes.create_note(&alice, new_note("x", "")).await.unwrap();
    app.notes.delete_note(&alice, &note.id).await.unwrap();
    app.notes.delete_note(&alice, &note.id).await.unwrap();
    assert_eq!(app.notes.get_note(&alice, &note.id).await, None);
    dir.child("kv").child(hex::encode("@notes_alice")).assert("[]");
}

#[tokio::test]
async fn very_long_username_can_store_notes() {
    let dir = TempDir::new().unwrap();
    let long_name = username(&"a".repeat(200));
    let created = {
        let app = open(&dir).await;
        app.directory.register(&long_name, "pw").await.unwrap();
        app.notes.create_note(&long_name, new_note("t", "b")).await
            .expect("note creation failed")
    };

    let app = open(&dir).await;
    assert_eq!(app.notes.list_notes(&long_name).await, vec![created]);
    assert_eq!(app.directory.list_usernames().await, vec![long_name]);
}
