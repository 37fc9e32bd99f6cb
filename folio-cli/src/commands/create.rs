use std::path::Path;

use anyhow::Context;
use clap::Args;

use folio_core::types::ProjectDraft;

use super::Site;
use super::fields::ProjectFields;

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub fields: ProjectFields,
}

pub async fn run(args: CreateArgs, dir: &Path) -> anyhow::Result<()> {
    let site = Site::open(dir).await?;
    site.require_admin()?;

    let mut draft = ProjectDraft::new();
    args.fields.apply(&mut draft);
    let project = site
        .store
        .create(draft)
        .await
        .context("Failed to create project")?;

    println!("Created project {} ({})", project.id, project.title);
    Ok(())
}
