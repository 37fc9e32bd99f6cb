// Integration test utilities and fixture management for Folio.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;

use folio_core::config::{FOLIO_DIR, FolioConfig};
use folio_core::session::SessionGuard;
use folio_core::storage::{SlotStorage, SqliteSlots};
use folio_core::store::{LoadSource, ProjectStore};
use folio_core::types::ProjectDraft;

/// A test fixture with a SQLite-backed site in a temporary directory.
#[derive(Debug)]
pub struct TestSite {
    pub dir: tempfile::TempDir,
    pub config: FolioConfig,
    pub slots: Arc<SqliteSlots>,
    pub store: ProjectStore,
    pub session: SessionGuard,
    pub source: LoadSource,
}

impl TestSite {
    /// Open a fresh site; the first load seeds the sample projects.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("create tempdir");
        Self::open_in(dir, FolioConfig::default())
            .await
            .expect("open test site")
    }

    /// Open a site over an existing directory, as a new process would.
    pub async fn open_in(dir: tempfile::TempDir, config: FolioConfig) -> anyhow::Result<Self> {
        let folio_dir = dir.path().join(FOLIO_DIR);
        std::fs::create_dir_all(&folio_dir)
            .with_context(|| format!("create {}", folio_dir.display()))?;
        let db_path = config.database_path(dir.path());
        let slots = Arc::new(
            SqliteSlots::open(&db_path)
                .with_context(|| format!("open {}", db_path.display()))?,
        );
        let store = ProjectStore::new(slots.clone(), &config);
        let source = store.load().await;
        let session = SessionGuard::restore(slots.clone(), &config).await;
        Ok(Self {
            dir,
            config,
            slots,
            store,
            session,
            source,
        })
    }

    /// Drop the in-memory state and open the same database again.
    pub async fn reopen(self) -> Self {
        let Self { dir, config, .. } = self;
        Self::open_in(dir, config).await.expect("reopen test site")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn db_path(&self) -> PathBuf {
        self.config.database_path(self.dir.path())
    }

    /// Raw contents of the projects slot.
    pub async fn projects_blob(&self) -> Option<String> {
        self.slots
            .get(&self.config.storage.projects_key)
            .await
            .expect("read projects slot")
    }

    /// Overwrite the projects slot with arbitrary text.
    pub async fn write_projects_blob(&self, blob: &str) {
        self.slots
            .set(&self.config.storage.projects_key, blob)
            .await
            .expect("write projects slot");
    }

    /// Parse the projects slot as JSON.
    pub async fn projects_json(&self) -> serde_json::Value {
        let blob = self.projects_blob().await.expect("projects slot present");
        serde_json::from_str(&blob).expect("projects slot is JSON")
    }
}

/// A draft with every required field filled.
pub fn sample_draft(title: &str, category: &str) -> ProjectDraft {
    ProjectDraft {
        title: title.to_string(),
        description: format!("{title} description"),
        embed_code: "<iframe src=\"https://viz.example.com/embed\"></iframe>".to_string(),
        category: category.to_string(),
        thumbnail: "https://img.example.com/thumb.png".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date"),
        ..ProjectDraft::new()
    }
}
