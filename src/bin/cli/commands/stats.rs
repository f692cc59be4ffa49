use anyhow::Result;
use chrono::Utc;

use cihui_lib::vocabulary::{format_interval, PoolFilter, VocabularyStore};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let now = Utc::now();
    let stats = app.store.stats(now);
    let categories = app.store.categories();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "import": app.import_summary,
                "stats": stats,
                "categories": categories,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "Imported {} words ({} skipped)",
                app.import_summary.imported, app.import_summary.skipped
            );
            println!(
                "{} total: {} new, {} due, {} scheduled, {} learned",
                stats.total, stats.new, stats.due, stats.scheduled, stats.learned
            );
            println!();
            let pool = app.store.fetch_pool(PoolFilter::All);
            for category in &categories {
                let count = pool.iter().filter(|i| &i.category == category).count();
                println!("  {} ({})", category, count);
            }

            if let Some(next) = pool.first() {
                let days = (next.next_review_at - now).num_days();
                println!();
                println!("Next review: {}", format_interval(days));
            }
        }
    }

    Ok(())
}
