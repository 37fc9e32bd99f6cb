use std::path::Path;

use anyhow::Context;

use super::Site;

pub async fn run(dir: &Path) -> anyhow::Result<()> {
    let site = Site::open(dir).await?;
    site.require_admin()?;

    site.store
        .reset_to_seed()
        .await
        .context("Failed to restore sample projects")?;
    println!("Restored {} sample projects", site.store.len().await);
    Ok(())
}
