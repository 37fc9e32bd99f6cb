use std::path::Path;

use anyhow::Context;
use clap::Args;

use folio_core::embed;

use super::Site;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Project id
    pub id: String,

    /// Print JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Print sandboxed embed markup ready to place in a page
    #[arg(long, conflicts_with = "json")]
    pub embed: bool,
}

pub async fn run(args: ShowArgs, dir: &Path) -> anyhow::Result<()> {
    let site = Site::open(dir).await?;
    let project = site
        .store
        .require(&args.id)
        .await
        .with_context(|| format!("Cannot show project {}", args.id))?;

    if args.json {
        let out = serde_json::to_string_pretty(&project).context("Cannot encode project")?;
        println!("{out}");
        return Ok(());
    }
    if args.embed {
        println!("{}", embed::sandboxed(&project.embed_code, &project.title));
        return Ok(());
    }

    println!("{}", project.title);
    println!("  Id:       {}", project.id);
    println!("  Category: {}", project.category);
    println!("  Date:     {}", project.display_date());
    let info = embed::inspect(&project.embed_code);
    match (&info.host, info.has_iframe()) {
        (Some(host), _) => println!("  Embed:    iframe from {host}"),
        (None, true) => println!("  Embed:    iframe"),
        (None, false) => println!("  Embed:    markup without iframe"),
    }
    if let Some(url) = &project.source_url {
        println!("  Source:   {url}");
    }
    println!();
    println!("{}", project.description);

    if let Some(methodology) = &project.methodology {
        println!();
        println!("Methodology:");
        println!("  {methodology}");
    }
    print_list("Key insights", &project.insights);
    print_list("Tools", &project.tools);
    if !project.tags.is_empty() {
        println!();
        println!("Tags: {}", project.tags.join(", "));
    }
    Ok(())
}

fn print_list(heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("{heading}:");
    for item in items {
        println!("  - {item}");
    }
}
