use std::path::Path;

use anyhow::Context;

use folio_core::query;
use folio_core::storage::SlotStorage;
use folio_core::store::CORRUPT_SUFFIX;

use super::Site;

pub async fn run(dir: &Path) -> anyhow::Result<()> {
    let site = Site::open(dir).await?;

    println!("Folio status for {}", site.root.display());
    println!();
    println!("  Database: {}", site.db_path.display());
    if let Ok(meta) = std::fs::metadata(&site.db_path) {
        println!("  Size:     {}", format_bytes(meta.len()));
    }
    println!();

    let snapshot = site.store.snapshot().await;
    println!(
        "  Projects: {} (revision {})",
        snapshot.projects.len(),
        snapshot.revision
    );
    let categories = query::categories(&snapshot.projects);
    println!("  Categories: {}", categories[1..].join(", "));
    println!();

    let keys = site.slots.keys().await.context("Failed to list storage slots")?;
    println!(
        "  Slots (projects: `{}`, session: `{}`):",
        site.config.storage.projects_key, site.config.storage.session_key
    );
    for key in &keys {
        println!("    {key}");
    }
    let backup = format!("{}{CORRUPT_SUFFIX}", site.store.key());
    if keys.contains(&backup) {
        println!();
        println!("  Warning: an unreadable project list was backed up to `{backup}`");
    }
    println!();

    match site.session.current() {
        Some(user) => println!("  Session: {} <{}>", user.name, user.email),
        None => println!("  Session: not logged in"),
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sizes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
