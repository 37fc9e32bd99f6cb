use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ── Identifiers ────────────────────────────────────────────────────

/// Opaque project identifier. Seed records use `"1"`..`"3"`, new records a UUIDv4.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    /// Generate a fresh, globally unique id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Category labels offered by the editor. Categories are open-ended; these are suggestions.
pub const KNOWN_CATEGORIES: &[&str] = &["Tableau", "Power BI", "Google Data Studio", "D3.js", "Other"];

// ── Project ────────────────────────────────────────────────────────

/// One published visualization case study.
///
/// `embed_code` is raw third-party markup. Render it through
/// [`crate::embed::sandboxed`], never by direct injection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub embed_code: String,
    pub category: String,
    pub thumbnail: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methodology: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
}

impl Project {
    /// Attach an id to a draft.
    pub fn from_draft(id: ProjectId, draft: ProjectDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            embed_code: draft.embed_code,
            category: draft.category,
            thumbnail: draft.thumbnail,
            date: draft.date,
            methodology: draft.methodology,
            source_url: draft.source_url,
            tags: draft.tags,
            insights: draft.insights,
            tools: draft.tools,
        }
    }

    /// Long US date form, e.g. `October 15, 2023`.
    pub fn display_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }

    /// Check the required-field invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required(&self.title, &self.description, &self.embed_code, &self.category, &self.thumbnail)
    }
}

fn check_required(
    title: &str,
    description: &str,
    embed_code: &str,
    category: &str,
    thumbnail: &str,
) -> Result<(), ValidationError> {
    for (name, value) in [
        ("title", title),
        ("description", description),
        ("embedCode", embed_code),
        ("category", category),
        ("thumbnail", thumbnail),
    ] {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(name));
        }
    }
    Ok(())
}

// ── List fields ────────────────────────────────────────────────────

/// Add `entry` to `list` unless it is blank or already present. Returns whether it was added.
pub fn add_unique(list: &mut Vec<String>, entry: &str) -> bool {
    let entry = entry.trim();
    if entry.is_empty() || list.iter().any(|e| e == entry) {
        return false;
    }
    list.push(entry.to_string());
    true
}

/// Rebuild a list through [`add_unique`], keeping first occurrences in order.
pub fn dedup_entries(entries: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(entries.len());
    for entry in &entries {
        add_unique(&mut out, entry);
    }
    out
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ── Draft ──────────────────────────────────────────────────────────

/// A project without an id, as filled in by the editor before creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub embed_code: String,
    pub category: String,
    pub thumbnail: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub methodology: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectDraft {
    /// Empty draft dated today (UTC), like a fresh editor form.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            embed_code: String::new(),
            category: String::new(),
            thumbnail: String::new(),
            date: Utc::now().date_naive(),
            methodology: None,
            source_url: None,
            tags: Vec::new(),
            insights: Vec::new(),
            tools: Vec::new(),
        }
    }

    pub fn add_tag(&mut self, tag: &str) -> bool {
        add_unique(&mut self.tags, tag)
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    pub fn add_insight(&mut self, insight: &str) -> bool {
        add_unique(&mut self.insights, insight)
    }

    pub fn remove_insight(&mut self, insight: &str) {
        self.insights.retain(|i| i != insight);
    }

    pub fn add_tool(&mut self, tool: &str) -> bool {
        add_unique(&mut self.tools, tool)
    }

    pub fn remove_tool(&mut self, tool: &str) {
        self.tools.retain(|t| t != tool);
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required(&self.title, &self.description, &self.embed_code, &self.category, &self.thumbnail)
    }

    /// Drop blank optionals and duplicate list entries.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            methodology: normalize_optional(self.methodology),
            source_url: normalize_optional(self.source_url),
            tags: dedup_entries(self.tags),
            insights: dedup_entries(self.insights),
            tools: dedup_entries(self.tools),
            ..self
        }
    }
}

impl From<&Project> for ProjectDraft {
    fn from(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            embed_code: project.embed_code.clone(),
            category: project.category.clone(),
            thumbnail: project.thumbnail.clone(),
            date: project.date,
            methodology: project.methodology.clone(),
            source_url: project.source_url.clone(),
            tags: project.tags.clone(),
            insights: project.insights.clone(),
            tools: project.tools.clone(),
        }
    }
}

// ── Patch ──────────────────────────────────────────────────────────

/// Partial update. `None` leaves a field unchanged; for `methodology` and
/// `source_url`, `Some("")` clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub embed_code: Option<String>,
    pub category: Option<String>,
    pub thumbnail: Option<String>,
    pub date: Option<NaiveDate>,
    pub methodology: Option<String>,
    pub source_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub insights: Option<Vec<String>>,
    pub tools: Option<Vec<String>>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge onto `project` field by field. The id is never touched.
    pub fn apply_to(&self, project: &mut Project) {
        fn set<T: Clone>(slot: &mut T, value: Option<&T>) {
            if let Some(v) = value {
                *slot = v.clone();
            }
        }
        set(&mut project.title, self.title.as_ref());
        set(&mut project.description, self.description.as_ref());
        set(&mut project.embed_code, self.embed_code.as_ref());
        set(&mut project.category, self.category.as_ref());
        set(&mut project.thumbnail, self.thumbnail.as_ref());
        set(&mut project.date, self.date.as_ref());
        if let Some(m) = &self.methodology {
            project.methodology = normalize_optional(Some(m.clone()));
        }
        if let Some(u) = &self.source_url {
            project.source_url = normalize_optional(Some(u.clone()));
        }
        if let Some(tags) = &self.tags {
            project.tags = dedup_entries(tags.clone());
        }
        if let Some(insights) = &self.insights {
            project.insights = dedup_entries(insights.clone());
        }
        if let Some(tools) = &self.tools {
            project.tools = dedup_entries(tools.clone());
        }
    }
}

impl From<ProjectDraft> for ProjectPatch {
    /// Full-form submit: every field of the editor overwrites the stored one.
    fn from(draft: ProjectDraft) -> Self {
        Self {
            title: Some(draft.title),
            description: Some(draft.description),
            embed_code: Some(draft.embed_code),
            category: Some(draft.category),
            thumbnail: Some(draft.thumbnail),
            date: Some(draft.date),
            methodology: Some(draft.methodology.unwrap_or_default()),
            source_url: Some(draft.source_url.unwrap_or_default()),
            tags: Some(draft.tags),
            insights: Some(draft.insights),
            tools: Some(draft.tools),
        }
    }
}

// ── Session identity ───────────────────────────────────────────────

/// Identity stored in the session marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: String,
    pub name: String,
    pub email: String,
}
