pub mod auth;
pub mod create;
pub mod delete;
pub mod edit;
pub mod fields;
pub mod init;
pub mod list;
pub mod reset;
pub mod show;
pub mod status;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Subcommand;

use folio_core::config::{FOLIO_DIR, FolioConfig};
use folio_core::session::SessionGuard;
use folio_core::storage::SqliteSlots;
use folio_core::store::ProjectStore;
use folio_core::types::AdminUser;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize Folio in a directory (config, database, seed projects)
    Init(init::InitArgs),
    /// List projects, optionally filtered by category and search term
    List(list::ListArgs),
    /// List the categories offered by the gallery filter
    Categories(list::CategoriesArgs),
    /// Show one project
    Show(show::ShowArgs),
    /// Log in to the admin area
    Login(auth::LoginArgs),
    /// Log out of the admin area
    Logout,
    /// Show the logged-in admin, if any
    Whoami,
    /// Create a project (admin)
    Create(create::CreateArgs),
    /// Edit a project (admin)
    Edit(edit::EditArgs),
    /// Delete a project (admin)
    Delete(delete::DeleteArgs),
    /// Replace all projects with the built-in samples (admin)
    Reset,
    /// Show storage and session state
    Status,
}

pub async fn run(cmd: Command, dir: &Path) -> anyhow::Result<()> {
    match cmd {
        Command::Init(args) => init::run(args, dir).await,
        Command::List(args) => list::run(args, dir).await,
        Command::Categories(args) => list::run_categories(args, dir).await,
        Command::Show(args) => show::run(args, dir).await,
        Command::Login(args) => auth::run_login(args, dir).await,
        Command::Logout => auth::run_logout(dir).await,
        Command::Whoami => auth::run_whoami(dir).await,
        Command::Create(args) => create::run(args, dir).await,
        Command::Edit(args) => edit::run(args, dir).await,
        Command::Delete(args) => delete::run(args, dir).await,
        Command::Reset => reset::run(dir).await,
        Command::Status => status::run(dir).await,
    }
}

/// An opened site: config, storage, project store and session guard.
#[derive(Debug)]
pub struct Site {
    pub root: PathBuf,
    pub config: FolioConfig,
    pub db_path: PathBuf,
    pub slots: Arc<SqliteSlots>,
    pub store: ProjectStore,
    pub session: SessionGuard,
}

impl Site {
    /// Open an initialized site and hydrate its project store.
    pub async fn open(dir: &Path) -> anyhow::Result<Self> {
        let root = std::fs::canonicalize(dir)
            .with_context(|| format!("Cannot resolve path: {}", dir.display()))?;

        if !root.join(FOLIO_DIR).exists() {
            anyhow::bail!(
                "Folio is not initialized in {}. Run `folio init` first.",
                root.display()
            );
        }

        Self::open_at(root).await
    }

    /// Open a site whose `.folio` directory is known to exist.
    pub async fn open_at(root: PathBuf) -> anyhow::Result<Self> {
        let config = FolioConfig::load(&root)
            .with_context(|| format!("Cannot load config for {}", root.display()))?;
        let db_path = config.database_path(&root);
        let slots = Arc::new(
            SqliteSlots::open(&db_path)
                .with_context(|| format!("Cannot open database: {}", db_path.display()))?,
        );

        let store = ProjectStore::new(slots.clone(), &config);
        let source = store.load().await;
        tracing::debug!(source = source.as_str(), "Site opened");
        let session = SessionGuard::restore(slots.clone(), &config).await;

        Ok(Self {
            root,
            config,
            db_path,
            slots,
            store,
            session,
        })
    }

    /// The logged-in admin, or an error telling the user to log in.
    pub fn require_admin(&self) -> anyhow::Result<AdminUser> {
        self.session
            .require()
            .context("This command needs an admin session. Run `folio login` first")
    }
}
