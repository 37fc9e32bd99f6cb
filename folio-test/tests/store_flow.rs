use folio_core::error::{FolioError, SessionError, StoreError};
use folio_core::query::{self, ProjectQuery};
use folio_core::store::LoadSource;
use folio_core::types::ProjectPatch;
use folio_test::{TestSite, sample_draft};

// ── Hydration ───────────────────────────────────────────────────

#[tokio::test]
async fn first_open_seeds_and_persists() {
    let site = TestSite::new().await;
    assert_eq!(site.source, LoadSource::Seeded);
    assert_eq!(site.store.len().await, 3);

    let json = site.projects_json().await;
    assert_eq!(json["schemaVersion"], 1);
    assert_eq!(json["projects"].as_array().unwrap().len(), 3);
    assert!(site.path().join(".folio").is_dir());
    assert!(site.db_path().exists());
}

#[tokio::test]
async fn create_survives_reopen() {
    let site = TestSite::new().await;
    let created = site
        .store
        .create(sample_draft("Test Dash", "Tableau"))
        .await
        .unwrap();
    assert!(!["1", "2", "3"].contains(&created.id.as_str()));
    assert_eq!(site.store.len().await, 4);

    let site = site.reopen().await;
    assert_eq!(site.source, LoadSource::Stored);
    let projects = site.store.projects().await;
    assert_eq!(projects.len(), 4);
    assert_eq!(projects[3], created);
}

#[tokio::test]
async fn corrupt_slot_is_backed_up_and_reseeded() {
    let site = TestSite::new().await;
    site.write_projects_blob("not json").await;

    let site = site.reopen().await;
    assert_eq!(site.source, LoadSource::Recovered);
    assert_eq!(site.store.len().await, 3);
    assert_eq!(site.projects_json().await["projects"][0]["id"], "1");

    let keys = folio_core::storage::SlotStorage::keys(site.slots.as_ref())
        .await
        .unwrap();
    assert!(keys.contains(&"projects.corrupt".to_string()));
}

#[tokio::test]
async fn legacy_array_is_migrated() {
    let site = TestSite::new().await;
    let json = site.projects_json().await;
    let legacy = serde_json::to_string(&json["projects"]).unwrap();
    site.write_projects_blob(&legacy).await;

    let site = site.reopen().await;
    assert_eq!(site.source, LoadSource::Migrated);
    assert_eq!(site.store.len().await, 3);
    assert_eq!(site.projects_json().await["schemaVersion"], 1);
}

// ── Mutations ───────────────────────────────────────────────────

#[tokio::test]
async fn update_missing_leaves_slot_unchanged() {
    let site = TestSite::new().await;
    let before = site.projects_blob().await;

    let patch = ProjectPatch {
        title: Some("Ghost".into()),
        ..ProjectPatch::default()
    };
    let err = site.store.update("404", &patch).await.unwrap_err();
    assert!(matches!(err, FolioError::Store(StoreError::NotFound(ref id)) if id == "404"));
    assert_eq!(site.projects_blob().await, before);
}

#[tokio::test]
async fn update_merges_and_keeps_identity() {
    let site = TestSite::new().await;
    let patch = ProjectPatch {
        title: Some("Renamed".into()),
        ..ProjectPatch::default()
    };
    let updated = site.store.update("2", &patch).await.unwrap();
    assert_eq!(updated.id.as_str(), "2");
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.category, "Power BI");

    let site = site.reopen().await;
    assert_eq!(site.store.get_by_id("2").await.unwrap().title, "Renamed");
}

#[tokio::test]
async fn stale_revision_is_rejected() {
    let site = TestSite::new().await;
    let stale = site.store.revision().await;
    site.store.delete("3").await.unwrap();

    let patch = ProjectPatch {
        title: Some("Late edit".into()),
        ..ProjectPatch::default()
    };
    let err = site.store.update_at("1", &patch, stale).await.unwrap_err();
    assert!(matches!(err, FolioError::Store(StoreError::Conflict { .. })));
    assert_ne!(site.store.get_by_id("1").await.unwrap().title, "Late edit");
}

#[tokio::test]
async fn double_delete_is_idempotent() {
    let site = TestSite::new().await;
    assert!(site.store.delete("1").await.unwrap());
    let blob = site.projects_blob().await;
    assert!(!site.store.delete("1").await.unwrap());
    assert_eq!(site.projects_blob().await, blob);
    assert_eq!(site.store.len().await, 2);
}

#[tokio::test]
async fn reset_restores_samples() {
    let site = TestSite::new().await;
    site.store.delete("1").await.unwrap();
    site.store
        .create(sample_draft("Extra", "D3.js"))
        .await
        .unwrap();
    site.store.reset_to_seed().await.unwrap();

    let site = site.reopen().await;
    let ids: Vec<String> = site
        .store
        .projects()
        .await
        .iter()
        .map(|p| p.id.to_string())
        .collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

// ── Queries over stored data ────────────────────────────────────

#[tokio::test]
async fn filter_scenarios() {
    let site = TestSite::new().await;
    let projects = site.store.projects().await;

    let sales = ProjectQuery::new("all", "SALES").apply(&projects);
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].id.as_str(), "1");

    assert!(ProjectQuery::new("D3.js", "").apply(&projects).is_empty());
    assert_eq!(
        query::categories(&projects),
        vec!["all", "Tableau", "Power BI", "Google Data Studio"]
    );
    assert_eq!(query::admin_search(&projects, "power").len(), 1);
}

// ── Session ─────────────────────────────────────────────────────

#[tokio::test]
async fn login_survives_reopen_and_logout_clears() {
    let site = TestSite::new().await;
    assert!(!site.session.is_authenticated());

    let err = site.session.login("x", "y").await.unwrap_err();
    assert!(matches!(
        err,
        FolioError::Session(SessionError::InvalidCredentials)
    ));

    let user = site
        .session
        .login("admin@example.com", "password")
        .await
        .unwrap();
    assert_eq!(user.id, "1");

    let site = site.reopen().await;
    assert_eq!(site.session.current(), Some(user));

    site.session.logout().await.unwrap();
    let site = site.reopen().await;
    assert!(site.session.current().is_none());
}
