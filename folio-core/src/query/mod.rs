// Query layer: derived, read-only views over a project list snapshot.
//
// Used by both the CLI `list`/`categories` commands and library callers.
// Every function here is pure: same inputs, same output, no hidden state.

use std::collections::HashSet;

use crate::types::Project;

/// Label of the synthetic "no category filter" entry.
pub const ALL_CATEGORIES: &str = "all";

/// How many projects the home page features.
pub const FEATURED_COUNT: usize = 3;

/// Category selection for the gallery filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// `"all"` (or an empty string) is the wildcard; anything else is an exact label.
    pub fn parse(label: &str) -> Self {
        if label.is_empty() || label == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(label.to_string())
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => project.category == *category,
        }
    }
}

/// Gallery query: category AND case-insensitive term over title/description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectQuery {
    pub category: CategoryFilter,
    pub term: String,
}

impl ProjectQuery {
    pub fn new(category: &str, term: &str) -> Self {
        Self {
            category: CategoryFilter::parse(category),
            term: term.to_string(),
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        if !self.category.matches(project) {
            return false;
        }
        if self.term.is_empty() {
            return true;
        }
        let term = self.term.to_lowercase();
        contains_folded(&project.title, &term) || contains_folded(&project.description, &term)
    }

    /// Matching projects in list order.
    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        projects.iter().filter(|p| self.matches(p)).collect()
    }
}

fn contains_folded(haystack: &str, folded_term: &str) -> bool {
    haystack.to_lowercase().contains(folded_term)
}

/// Distinct categories in first-seen order, with `"all"` prepended.
pub fn categories(projects: &[Project]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = vec![ALL_CATEGORIES.to_string()];
    for project in projects {
        if seen.insert(project.category.as_str()) {
            out.push(project.category.clone());
        }
    }
    out
}

/// Admin table search: case-insensitive term over title or category.
pub fn admin_search<'a>(projects: &'a [Project], term: &str) -> Vec<&'a Project> {
    if term.is_empty() {
        return projects.iter().collect();
    }
    let term = term.to_lowercase();
    projects
        .iter()
        .filter(|p| contains_folded(&p.title, &term) || contains_folded(&p.category, &term))
        .collect()
}

/// The first `count` projects in list order.
pub fn featured(projects: &[Project], count: usize) -> &[Project] {
    &projects[..count.min(projects.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_projects;

    fn titles(projects: &[&Project]) -> Vec<String> {
        projects.iter().map(|p| p.title.clone()).collect()
    }

    #[test]
    fn wildcard_and_empty_term_returns_everything_in_order() {
        let seeds = seed_projects();
        let result = ProjectQuery::new("all", "").apply(&seeds);
        let expected: Vec<&Project> = seeds.iter().collect();
        assert_eq!(result, expected);
    }

    #[test]
    fn term_is_case_insensitive() {
        let seeds = seed_projects();
        let result = ProjectQuery::new("all", "SALES").apply(&seeds);
        assert_eq!(titles(&result), vec!["Sales Performance Dashboard"]);
    }

    #[test]
    fn term_searches_description() {
        let seeds = seed_projects();
        let result = ProjectQuery::new("all", "dax").apply(&seeds);
        // "DAX" only appears in the methodology, which is not searched
        assert!(result.is_empty());
        let result = ProjectQuery::new("all", "patient demographics").apply(&seeds);
        assert_eq!(titles(&result), vec!["Healthcare Patient Analytics"]);
    }

    #[test]
    fn category_is_exact() {
        let seeds = seed_projects();
        assert_eq!(
            titles(&ProjectQuery::new("Power BI", "").apply(&seeds)),
            vec!["Healthcare Patient Analytics"]
        );
        assert!(ProjectQuery::new("power bi", "").apply(&seeds).is_empty());
    }

    #[test]
    fn filters_are_conjunctive() {
        let seeds = seed_projects();
        assert!(ProjectQuery::new("Tableau", "marketing").apply(&seeds).is_empty());
        assert_eq!(
            ProjectQuery::new("Google Data Studio", "marketing")
                .apply(&seeds)
                .len(),
            1
        );
    }

    #[test]
    fn categories_dedup_with_all_first() {
        let mut seeds = seed_projects();
        let mut extra = seeds[0].clone();
        extra.id = "4".into();
        seeds.push(extra);
        assert_eq!(
            categories(&seeds),
            vec!["all", "Tableau", "Power BI", "Google Data Studio"]
        );
        assert_eq!(categories(&[]), vec!["all"]);
    }

    #[test]
    fn admin_search_matches_category_not_description() {
        let seeds = seed_projects();
        assert_eq!(
            titles(&admin_search(&seeds, "power")),
            vec!["Healthcare Patient Analytics"]
        );
        assert!(admin_search(&seeds, "forecasting").is_empty());
        assert_eq!(admin_search(&seeds, "").len(), 3);
    }

    #[test]
    fn featured_takes_prefix() {
        let seeds = seed_projects();
        assert_eq!(featured(&seeds, FEATURED_COUNT).len(), 3);
        assert_eq!(featured(&seeds, 1)[0].id.as_str(), "1");
        assert_eq!(featured(&seeds, 10).len(), 3);
    }
}
