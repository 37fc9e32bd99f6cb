use std::path::Path;

use anyhow::Context;
use clap::Args;

use folio_core::error::{FolioError, StoreError};
use folio_core::types::{ProjectDraft, ProjectPatch};

use super::Site;
use super::fields::ProjectFields;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Project id
    pub id: String,

    #[command(flatten)]
    pub fields: ProjectFields,

    /// Remove a tag (repeatable)
    #[arg(long)]
    pub remove_tag: Vec<String>,

    /// Remove a key insight (repeatable)
    #[arg(long)]
    pub remove_insight: Vec<String>,

    /// Remove a tool (repeatable)
    #[arg(long)]
    pub remove_tool: Vec<String>,
}

pub async fn run(args: EditArgs, dir: &Path) -> anyhow::Result<()> {
    let site = Site::open(dir).await?;
    site.require_admin()?;

    // Prefill the form from the snapshot it will be saved against.
    let snapshot = site.store.snapshot().await;
    let current = snapshot
        .projects
        .iter()
        .find(|p| p.id.as_str() == args.id)
        .ok_or_else(|| FolioError::from(StoreError::NotFound(args.id.clone())))
        .with_context(|| format!("Failed to update project {}", args.id))?;

    let mut draft = ProjectDraft::from(current);
    for tag in &args.remove_tag {
        draft.remove_tag(tag);
    }
    for insight in &args.remove_insight {
        draft.remove_insight(insight);
    }
    for tool in &args.remove_tool {
        draft.remove_tool(tool);
    }
    args.fields.apply(&mut draft);

    let project = site
        .store
        .update_at(&args.id, &ProjectPatch::from(draft), snapshot.revision)
        .await
        .with_context(|| format!("Failed to update project {}", args.id))?;

    println!("Updated project {} ({})", project.id, project.title);
    Ok(())
}
