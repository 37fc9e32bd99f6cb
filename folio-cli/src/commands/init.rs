use std::path::Path;

use anyhow::Context;
use clap::Args;

use folio_core::config::{CONFIG_FILE, FOLIO_DIR, FolioConfig};

use super::Site;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file with defaults
    #[arg(long)]
    pub force: bool,
}

pub async fn run(args: InitArgs, dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create directory: {}", dir.display()))?;
    let root = std::fs::canonicalize(dir)
        .with_context(|| format!("Cannot resolve path: {}", dir.display()))?;

    let folio_dir = root.join(FOLIO_DIR);
    std::fs::create_dir_all(&folio_dir)
        .with_context(|| format!("Cannot create {}", folio_dir.display()))?;

    let config_path = folio_dir.join(CONFIG_FILE);
    if args.force || !config_path.exists() {
        let text = FolioConfig::default()
            .to_toml()
            .context("Cannot render default config")?;
        std::fs::write(&config_path, text)
            .with_context(|| format!("Cannot write {}", config_path.display()))?;
        tracing::info!(path = %config_path.display(), "Wrote default config");
    }

    let site = Site::open_at(root).await?;
    println!(
        "Initialized Folio in {} ({} projects)",
        site.root.display(),
        site.store.len().await
    );
    println!("  Database: {}", site.db_path.display());
    Ok(())
}
