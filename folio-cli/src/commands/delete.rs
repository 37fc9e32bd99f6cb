use std::path::Path;

use anyhow::Context;
use clap::Args;

use super::Site;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Project id
    pub id: String,
}

pub async fn run(args: DeleteArgs, dir: &Path) -> anyhow::Result<()> {
    let site = Site::open(dir).await?;
    site.require_admin()?;

    let removed = site
        .store
        .delete(&args.id)
        .await
        .with_context(|| format!("Failed to delete project {}", args.id))?;
    if removed {
        println!("Deleted project {}", args.id);
    } else {
        println!("No project {}; nothing to delete", args.id);
    }
    Ok(())
}
