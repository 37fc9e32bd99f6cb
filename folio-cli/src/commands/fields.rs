use chrono::NaiveDate;
use clap::Args;

use folio_core::types::ProjectDraft;

/// Project form fields shared by `create` and `edit`.
#[derive(Args, Debug, Default)]
pub struct ProjectFields {
    /// Project title
    #[arg(long)]
    pub title: Option<String>,

    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,

    /// Embed markup from the visualization platform
    #[arg(long)]
    pub embed_code: Option<String>,

    /// Category label; `folio categories --known` lists the usual ones
    #[arg(long)]
    pub category: Option<String>,

    /// Thumbnail image URL
    #[arg(long)]
    pub thumbnail: Option<String>,

    /// Publication date, YYYY-MM-DD
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// How the dashboard was built (empty string clears it)
    #[arg(long)]
    pub methodology: Option<String>,

    /// Link to the source data or workbook (empty string clears it)
    #[arg(long)]
    pub source_url: Option<String>,

    /// Add a tag (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Add a key insight (repeatable)
    #[arg(long = "insight")]
    pub insights: Vec<String>,

    /// Add a tool (repeatable)
    #[arg(long = "tool")]
    pub tools: Vec<String>,
}

impl ProjectFields {
    /// Overwrite the draft's fields with those given on the command line and
    /// add list entries with the editor's skip-on-duplicate rule.
    pub fn apply(self, draft: &mut ProjectDraft) {
        if let Some(v) = self.title {
            draft.title = v;
        }
        if let Some(v) = self.description {
            draft.description = v;
        }
        if let Some(v) = self.embed_code {
            draft.embed_code = v;
        }
        if let Some(v) = self.category {
            draft.category = v;
        }
        if let Some(v) = self.thumbnail {
            draft.thumbnail = v;
        }
        if let Some(v) = self.date {
            draft.date = v;
        }
        if let Some(v) = self.methodology {
            draft.methodology = Some(v);
        }
        if let Some(v) = self.source_url {
            draft.source_url = Some(v);
        }
        for tag in &self.tags {
            if !draft.add_tag(tag) {
                tracing::info!(tag = %tag, "Skipping duplicate or empty tag");
            }
        }
        for insight in &self.insights {
            draft.add_insight(insight);
        }
        for tool in &self.tools {
            draft.add_tool(tool);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_overwrites_and_dedups() {
        let mut draft = ProjectDraft::new();
        draft.tags = vec!["Sales".into()];
        ProjectFields {
            title: Some("Ops Board".into()),
            category: Some("Other".into()),
            tags: vec!["Sales".into(), "Ops".into(), " ".into()],
            ..ProjectFields::default()
        }
        .apply(&mut draft);
        assert_eq!(draft.title, "Ops Board");
        assert_eq!(draft.category, "Other");
        assert_eq!(draft.tags, vec!["Sales", "Ops"]);
    }
}
