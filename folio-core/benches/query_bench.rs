// Benchmark the query layer and store mutations over growing project lists.

use std::sync::Arc;

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use folio_core::config::FolioConfig;
use folio_core::query::{ProjectQuery, admin_search, categories};
use folio_core::storage::SqliteSlots;
use folio_core::store::ProjectStore;
use folio_core::types::{Project, ProjectDraft, ProjectId};

const CATEGORIES: [&str; 5] = ["Tableau", "Power BI", "Google Data Studio", "D3.js", "Other"];

fn synthetic_draft(i: usize) -> ProjectDraft {
    ProjectDraft {
        title: format!("Dashboard {i}"),
        description: format!("Quarterly metrics for region {} and segment {}", i % 17, i % 5),
        embed_code: format!("<iframe src=\"https://viz.example.com/{i}\"></iframe>"),
        category: CATEGORIES[i % CATEGORIES.len()].to_string(),
        thumbnail: format!("https://img.example.com/{i}.png"),
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        ..ProjectDraft::new()
    }
}

fn synthetic_projects(n: usize) -> Vec<Project> {
    (0..n)
        .map(|i| Project::from_draft(ProjectId(i.to_string()), synthetic_draft(i)))
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_filter");

    for count in [100, 1_000, 10_000] {
        let projects = synthetic_projects(count);
        group.bench_with_input(BenchmarkId::new("count", count), &projects, |b, projects| {
            let query = ProjectQuery::new("Power BI", "REGION 3");
            b.iter(|| query.apply(projects).len());
        });
    }
    group.finish();
}

fn bench_categories_and_admin_search(c: &mut Criterion) {
    let projects = synthetic_projects(1_000);

    c.bench_function("query_categories", |b| {
        b.iter(|| categories(&projects));
    });

    c.bench_function("query_admin_search", |b| {
        b.iter(|| admin_search(&projects, "studio").len());
    });
}

fn bench_store_create(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("store_create_100", |b| {
        b.iter(|| {
            rt.block_on(async {
                let slots = Arc::new(SqliteSlots::in_memory().unwrap());
                let store = ProjectStore::new(slots, &FolioConfig::default());
                store.load().await;
                for i in 0..100 {
                    store.create(synthetic_draft(i)).await.unwrap();
                }
            });
        });
    });
}

criterion_group!(
    benches,
    bench_filter,
    bench_categories_and_admin_search,
    bench_store_create
);
criterion_main!(benches);
