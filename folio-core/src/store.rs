//! The project store: single owner of the project list.
//!
//! All reads are served from the in-memory list. Every mutation runs under a
//! single writer lock: it clones the current list, computes the next one,
//! writes the whole list to the projects slot, and only then commits it in
//! memory and bumps the revision. A failed write leaves memory untouched.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::config::FolioConfig;
use crate::error::{StorageError, StoreError};
use crate::seed::seed_projects;
use crate::storage::SlotStorage;
use crate::storage::envelope;
use crate::types::{Project, ProjectDraft, ProjectId, ProjectPatch, dedup_entries};

/// Where the list came from on hydration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Read from the projects slot in the current envelope format.
    Stored,
    /// Read from a legacy bare-array blob and rewritten in the current format.
    Migrated,
    /// Slot was empty; seed data was installed and persisted.
    Seeded,
    /// Slot held an unreadable blob; it was backed up and replaced by seed data.
    Recovered,
    /// Storage could not be read; seed data is served, nothing was written,
    /// and mutations are refused until a later read succeeds.
    Unavailable,
    /// `load` had already run; nothing was read.
    AlreadyLoaded,
}

impl LoadSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stored => "stored",
            Self::Migrated => "migrated",
            Self::Seeded => "seeded",
            Self::Recovered => "recovered",
            Self::Unavailable => "unavailable",
            Self::AlreadyLoaded => "already-loaded",
        }
    }
}

/// A read-only copy of the list at one revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub revision: u64,
    pub projects: Vec<Project>,
}

#[derive(Debug, Default)]
struct State {
    projects: Vec<Project>,
    revision: u64,
    loaded: bool,
}

/// Suffix of the slot that receives an unreadable projects blob before it is replaced.
pub const CORRUPT_SUFFIX: &str = ".corrupt";

pub struct ProjectStore {
    storage: Arc<dyn SlotStorage>,
    key: String,
    read_delay: Duration,
    write_delay: Duration,
    state: RwLock<State>,
    writer: Mutex<()>,
    loading: AtomicBool,
}

impl std::fmt::Debug for ProjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectStore")
            .field("key", &self.key)
            .field("loading", &self.loading.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl ProjectStore {
    pub fn new(storage: Arc<dyn SlotStorage>, config: &FolioConfig) -> Self {
        Self {
            storage,
            key: config.storage.projects_key.clone(),
            read_delay: config.latency.read(),
            write_delay: config.latency.write(),
            state: RwLock::new(State::default()),
            writer: Mutex::new(()),
            loading: AtomicBool::new(false),
        }
    }

    /// Slot key holding the project list.
    pub fn key(&self) -> &str {
        &self.key
    }

    // ── Hydration ──────────────────────────────────────────────────

    /// Hydrate from storage on the first call; later calls do nothing.
    ///
    /// Never fails: unreadable or unparsable data falls back to the seed set.
    pub async fn load(&self) -> LoadSource {
        let _writer = self.writer.lock().await;
        if self.state.read().await.loaded {
            return LoadSource::AlreadyLoaded;
        }
        self.hydrate().await
    }

    /// Re-read storage even if already loaded.
    pub async fn reload(&self) -> LoadSource {
        let _writer = self.writer.lock().await;
        self.hydrate().await
    }

    /// Caller must hold the writer lock.
    async fn hydrate(&self) -> LoadSource {
        self.loading.store(true, Ordering::SeqCst);
        delay(self.read_delay).await;

        let (projects, source) = match self.storage.get(&self.key).await {
            Err(e) => {
                warn!(key = %self.key, error = %e, "Cannot read project list; serving seed data");
                (seed_projects(), LoadSource::Unavailable)
            }
            Ok(None) => {
                info!(key = %self.key, "No stored projects; installing seed data");
                let seeds = seed_projects();
                self.persist_quietly(&seeds).await;
                (seeds, LoadSource::Seeded)
            }
            Ok(Some(blob)) => match envelope::decode_projects(&blob) {
                Ok(decoded) => {
                    let legacy = decoded.is_legacy();
                    match sanitize(decoded.into_inner()) {
                        Ok(projects) if legacy => {
                            info!(key = %self.key, count = projects.len(), "Migrating legacy project list");
                            self.persist_quietly(&projects).await;
                            (projects, LoadSource::Migrated)
                        }
                        Ok(projects) => (projects, LoadSource::Stored),
                        Err(reason) => self.recover(&blob, &reason).await,
                    }
                }
                Err(e) => self.recover(&blob, &e.to_string()).await,
            },
        };

        let mut state = self.state.write().await;
        state.projects = projects;
        state.revision += 1;
        // A failed read is never treated as authoritative.
        state.loaded = source != LoadSource::Unavailable;
        debug!(count = state.projects.len(), revision = state.revision, source = source.as_str(), "Project store hydrated");
        drop(state);

        self.loading.store(false, Ordering::SeqCst);
        source
    }

    /// Whether a hydration is in progress.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub async fn is_loaded(&self) -> bool {
        self.state.read().await.loaded
    }

    // ── Reads ──────────────────────────────────────────────────────

    /// Look up a project in the current list. Before `load`, the list is empty.
    pub async fn get_by_id(&self, id: &str) -> Option<Project> {
        delay(self.read_delay).await;
        let state = self.state.read().await;
        state.projects.iter().find(|p| p.id.as_str() == id).cloned()
    }

    /// Like [`get_by_id`](Self::get_by_id) but absent ids are an error.
    pub async fn require(&self, id: &str) -> crate::error::Result<Project> {
        self.get_by_id(id)
            .await
            .ok_or_else(|| StoreError::NotFound(id.to_string()).into())
    }

    pub async fn snapshot(&self) -> Snapshot {
        let state = self.state.read().await;
        Snapshot {
            revision: state.revision,
            projects: state.projects.clone(),
        }
    }

    pub async fn projects(&self) -> Vec<Project> {
        self.state.read().await.projects.clone()
    }

    /// Incremented on every hydration and every committed change.
    pub async fn revision(&self) -> u64 {
        self.state.read().await.revision
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.projects.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.projects.is_empty()
    }

    // ── Mutations ──────────────────────────────────────────────────

    /// Append a new project with a freshly generated id.
    pub async fn create(&self, draft: ProjectDraft) -> crate::error::Result<Project> {
        let draft = draft.normalized();
        draft.validate()?;

        let _writer = self.writer.lock().await;
        self.ensure_loaded().await?;
        delay(self.write_delay).await;

        let mut next = self.projects().await;
        let mut id = ProjectId::generate();
        while next.iter().any(|p| p.id == id) {
            id = ProjectId::generate();
        }
        let project = Project::from_draft(id, draft);
        next.push(project.clone());

        self.persist(&next).await?;
        let revision = self.commit(next).await;
        info!(id = %project.id, title = %project.title, revision, "Created project");
        Ok(project)
    }

    /// Merge `patch` onto the project with `id`.
    pub async fn update(&self, id: &str, patch: &ProjectPatch) -> crate::error::Result<Project> {
        self.update_checked(id, patch, None).await
    }

    /// Like [`update`](Self::update), rejected with `Conflict` unless the store
    /// is still at `expected_revision`.
    pub async fn update_at(
        &self,
        id: &str,
        patch: &ProjectPatch,
        expected_revision: u64,
    ) -> crate::error::Result<Project> {
        self.update_checked(id, patch, Some(expected_revision)).await
    }

    async fn update_checked(
        &self,
        id: &str,
        patch: &ProjectPatch,
        expected_revision: Option<u64>,
    ) -> crate::error::Result<Project> {
        let _writer = self.writer.lock().await;
        self.ensure_loaded().await?;
        delay(self.write_delay).await;

        let Snapshot {
            revision,
            projects: mut next,
        } = self.snapshot().await;
        if let Some(expected) = expected_revision {
            if expected != revision {
                return Err(StoreError::Conflict {
                    expected,
                    actual: revision,
                }
                .into());
            }
        }

        let Some(index) = next.iter().position(|p| p.id.as_str() == id) else {
            debug!(id, "Update target not found");
            return Err(StoreError::NotFound(id.to_string()).into());
        };
        patch.apply_to(&mut next[index]);
        next[index].validate()?;
        let updated = next[index].clone();

        self.persist(&next).await?;
        let revision = self.commit(next).await;
        info!(id, revision, "Updated project");
        Ok(updated)
    }

    /// Remove the project with `id`. Absent ids are a successful no-op.
    /// Returns whether a project was removed.
    pub async fn delete(&self, id: &str) -> crate::error::Result<bool> {
        let _writer = self.writer.lock().await;
        self.ensure_loaded().await?;
        delay(self.write_delay).await;

        let mut next = self.projects().await;
        let before = next.len();
        next.retain(|p| p.id.as_str() != id);
        let removed = next.len() != before;

        self.persist(&next).await?;
        if removed {
            let revision = self.commit(next).await;
            info!(id, revision, "Deleted project");
        } else {
            debug!(id, "Delete target absent; nothing removed");
        }
        Ok(removed)
    }

    /// Replace the list with the seed set.
    pub async fn reset_to_seed(&self) -> crate::error::Result<()> {
        let _writer = self.writer.lock().await;
        delay(self.write_delay).await;

        let seeds = seed_projects();
        self.persist(&seeds).await?;
        let mut state = self.state.write().await;
        state.projects = seeds;
        state.revision += 1;
        state.loaded = true;
        info!(revision = state.revision, "Project list reset to seed data");
        Ok(())
    }

    // ── Internals ──────────────────────────────────────────────────

    /// Back up an unreadable blob and fall back to the seed set.
    async fn recover(&self, blob: &str, reason: &str) -> (Vec<Project>, LoadSource) {
        warn!(key = %self.key, reason, "Stored project list is unreadable; restoring seed data");
        let backup = format!("{}{CORRUPT_SUFFIX}", self.key);
        if let Err(e) = self.storage.set(&backup, blob).await {
            warn!(key = %backup, error = %e, "Failed to back up unreadable project list");
        }
        let seeds = seed_projects();
        self.persist_quietly(&seeds).await;
        (seeds, LoadSource::Recovered)
    }

    /// Hydrate if needed. Mutations are refused while storage cannot be read,
    /// so a transient read error never overwrites the stored list.
    ///
    /// Caller must hold the writer lock.
    async fn ensure_loaded(&self) -> crate::error::Result<()> {
        if self.state.read().await.loaded {
            return Ok(());
        }
        match self.hydrate().await {
            LoadSource::Unavailable => Err(StorageError::Unavailable {
                key: self.key.clone(),
            }
            .into()),
            _ => Ok(()),
        }
    }

    async fn persist(&self, projects: &[Project]) -> crate::error::Result<()> {
        let blob = envelope::encode_projects(projects).map_err(StoreError::Serialization)?;
        self.storage.set(&self.key, &blob).await
    }

    async fn persist_quietly(&self, projects: &[Project]) {
        if let Err(e) = self.persist(projects).await {
            warn!(key = %self.key, error = %e, "Failed to persist project list during load");
        }
    }

    async fn commit(&self, projects: Vec<Project>) -> u64 {
        let mut state = self.state.write().await;
        state.projects = projects;
        state.revision += 1;
        state.revision
    }
}

/// Enforce list invariants on a decoded blob: ids are unique and tag,
/// insight and tool lists hold trimmed, distinct, non-empty entries.
fn sanitize(mut projects: Vec<Project>) -> Result<Vec<Project>, String> {
    let mut seen = HashSet::new();
    for project in &mut projects {
        if !seen.insert(project.id.clone()) {
            return Err(format!("duplicate project id {}", project.id));
        }
        project.tags = dedup_entries(std::mem::take(&mut project.tags));
        project.insights = dedup_entries(std::mem::take(&mut project.insights));
        project.tools = dedup_entries(std::mem::take(&mut project.tools));
    }
    Ok(projects)
}

async fn delay(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
