use std::path::Path;

use anyhow::Context;
use clap::Args;

use folio_core::query::{self, ALL_CATEGORIES, FEATURED_COUNT, ProjectQuery};
use folio_core::types::{KNOWN_CATEGORIES, Project};

use super::Site;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only projects in this category ("all" for every category)
    #[arg(long, default_value = ALL_CATEGORIES)]
    pub category: String,

    /// Case-insensitive search over title and description
    #[arg(long, default_value = "")]
    pub search: String,

    /// Admin-table search over title and category instead
    #[arg(long, conflicts_with_all = ["search", "category"])]
    pub admin: Option<String>,

    /// Only the first N projects, as on the home page (N defaults to 3)
    #[arg(long, value_name = "N", num_args = 0..=1)]
    pub featured: Option<Option<usize>>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ListArgs, dir: &Path) -> anyhow::Result<()> {
    let site = Site::open(dir).await?;
    let projects = site.store.projects().await;

    let base: &[Project] = match args.featured {
        Some(n) => query::featured(&projects, n.unwrap_or(FEATURED_COUNT)),
        None => &projects,
    };
    let hits: Vec<&Project> = match &args.admin {
        Some(term) => query::admin_search(base, term),
        None => ProjectQuery::new(&args.category, &args.search).apply(base),
    };

    if args.json {
        let out = serde_json::to_string_pretty(&hits).context("Cannot encode projects")?;
        println!("{out}");
        return Ok(());
    }

    if hits.is_empty() {
        println!("No projects found. Try adjusting your search or filter criteria.");
        return Ok(());
    }
    for project in &hits {
        println!(
            "{:<36}  {:<20}  {}  {}",
            project.id, project.category, project.date, project.title
        );
    }
    Ok(())
}

#[derive(Args, Debug)]
pub struct CategoriesArgs {
    /// List the labels suggested by the editor instead of those in use
    #[arg(long)]
    pub known: bool,
}

pub async fn run_categories(args: CategoriesArgs, dir: &Path) -> anyhow::Result<()> {
    if args.known {
        for category in KNOWN_CATEGORIES {
            println!("{category}");
        }
        return Ok(());
    }

    let site = Site::open(dir).await?;
    let projects = site.store.projects().await;
    for category in query::categories(&projects) {
        println!("{category}");
    }
    Ok(())
}
