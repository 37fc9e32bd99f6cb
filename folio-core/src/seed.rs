// Built-in sample projects used when no persisted list exists.

use chrono::NaiveDate;

use crate::types::{Project, ProjectId};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// The three sample records, ids `"1"`, `"2"`, `"3"`.
pub fn seed_projects() -> Vec<Project> {
    vec![
        Project {
            id: ProjectId::from("1"),
            title: "Sales Performance Dashboard".into(),
            description: "An interactive Tableau dashboard analyzing sales performance across regions, product categories, and time periods. Includes trend analysis, forecasting, and key performance indicators.".into(),
            embed_code: r#"<iframe src="https://public.tableau.com/views/RegionalSampleWorkbook/Storms?:embed=yes&:display_count=yes&:showVizHome=no" width="100%" height="500" frameborder="0"></iframe>"#.into(),
            category: "Tableau".into(),
            thumbnail: "https://images.pexels.com/photos/7947226/pexels-photo-7947226.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=2".into(),
            date: date(2023, 10, 15),
            methodology: Some("This dashboard was created using Tableau Desktop with data from our SQL Server database. I performed data cleaning and transformation in SQL before importing into Tableau. The dashboard is updated daily with scheduled refreshes.".into()),
            source_url: Some("https://public.tableau.com/app/profile/tableau.public".into()),
            tags: strings(&["Sales", "Analytics", "KPI", "Tableau"]),
            insights: strings(&[
                "Northeast region consistently outperforms other regions by 23%",
                "Product category A shows seasonal patterns with peaks in Q4",
                "Customer retention correlates strongly with purchase frequency",
            ]),
            tools: strings(&["Tableau Desktop", "SQL Server", "Excel"]),
        },
        Project {
            id: ProjectId::from("2"),
            title: "Healthcare Patient Analytics".into(),
            description: "A comprehensive Power BI dashboard tracking patient outcomes, treatment effectiveness, and operational metrics for a healthcare provider. Visualizes patient demographics, treatment success rates, and resource utilization.".into(),
            embed_code: r#"<iframe title="Healthcare Analytics" width="100%" height="500" src="https://app.powerbi.com/view?r=eyJrIjoiZWZhZmJjMzktMGRiMC00NGMyLTkyNzAtYTUwNjRjNmQ4NTlkIiwidCI6IjE4YjVlOWI0LTdkYTUtNGFjYi05NmU0LTUwZjkxZWZjNmMyYyIsImMiOjN9" frameborder="0" allowFullScreen="true"></iframe>"#.into(),
            category: "Power BI".into(),
            thumbnail: "https://images.pexels.com/photos/7579831/pexels-photo-7579831.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=2".into(),
            date: date(2023, 9, 5),
            methodology: Some("Data was collected from the hospital's electronic health records system and anonymized for analysis. Power BI was used to create the visualization with measures created using DAX. The dashboard is refreshed daily.".into()),
            source_url: Some("https://app.powerbi.com/".into()),
            tags: strings(&["Healthcare", "Power BI", "Patient Analytics"]),
            insights: strings(&[
                "Treatment protocol B shows 15% better outcomes for patients over 65",
                "Average length of stay reduced by 2.3 days after process improvement",
                "Readmission rates decreased by 8% year-over-year",
            ]),
            tools: strings(&["Power BI Desktop", "Azure SQL Database", "R for statistical analysis"]),
        },
        Project {
            id: ProjectId::from("3"),
            title: "Marketing Campaign Performance".into(),
            description: "A Google Data Studio dashboard tracking marketing campaign performance across channels. Visualizes conversion rates, cost per acquisition, ROI, and customer journey metrics for digital marketing campaigns.".into(),
            embed_code: r#"<iframe width="100%" height="500" src="https://lookerstudio.google.com/embed/reporting/1a743209-e682-4714-9067-71ca6ae26007/page/DZ7kB" frameborder="0" allowfullscreen></iframe>"#.into(),
            category: "Google Data Studio".into(),
            thumbnail: "https://images.pexels.com/photos/590022/pexels-photo-590022.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=2".into(),
            date: date(2023, 11, 20),
            methodology: Some("This dashboard connects directly to Google Analytics, Google Ads, and Facebook Ads APIs to pull real-time marketing data. Custom calculations were created to standardize metrics across platforms.".into()),
            source_url: Some("https://lookerstudio.google.com/".into()),
            tags: strings(&["Marketing", "Google Data Studio", "Campaign Analytics"]),
            insights: strings(&[
                "Email campaigns deliver 3.2x higher ROI than social media ads",
                "Mobile conversion rate increased 18% after landing page optimization",
                "Video content generates 2.5x more engagement than static images",
            ]),
            tools: strings(&[
                "Google Data Studio",
                "Google Analytics",
                "Google Ads API",
                "Facebook Marketing API",
            ]),
        },
    ]
}
