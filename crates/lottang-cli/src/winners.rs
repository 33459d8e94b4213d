//! `winners` subcommand: drive the fetch ladder over a draw range.
//!
//! Draws run strictly one at a time in ascending order, and each draw's rows
//! are flushed before the next draw is fetched. A failing draw is logged and
//! skipped; only the inability to open the output sink ends the run.

use std::path::Path;

use anyhow::Context;

use lottang_core::AppConfig;
use lottang_scraper::{fetch_winners, pacing, DebugDump, ScrapeConfig};
use lottang_store::WinnerSink;

pub(crate) async fn run(
    config: &AppConfig,
    start: u32,
    end: u32,
    out: &Path,
    append: bool,
    archive_pages: Option<u32>,
) -> anyhow::Result<()> {
    if start > end {
        anyhow::bail!("--start ({start}) must not exceed --end ({end})");
    }

    let mut scrape = ScrapeConfig::from_app(config);
    if let Some(pages) = archive_pages {
        scrape.archive_max_pages = pages;
    }

    let dump = DebugDump::new(&config.debug_dir);
    let mut sink = WinnerSink::open(out, append)
        .with_context(|| format!("opening output file {}", out.display()))?;

    let total = end - start + 1;
    println!("Scraping winners for draws {start}..={end} ({total} draws)");

    let mut written = 0usize;
    let mut missed = 0usize;

    for draw in start..=end {
        // Per-draw boundary: nothing a single draw does may end the range.
        let outcome: anyhow::Result<usize> = async {
            let rows = fetch_winners(&scrape, draw, &dump).await?;
            if rows.is_empty() {
                return Ok(0);
            }
            sink.append(&rows)?;
            sink.flush()?;
            Ok(rows.len())
        }
        .await;

        match outcome {
            Ok(0) => {
                missed += 1;
                println!("  \u{2717} draw {draw:>5}  0 rows");
            }
            Ok(count) => {
                written += count;
                println!("  \u{2713} draw {draw:>5}  {count} rows");
            }
            Err(err) => {
                missed += 1;
                tracing::error!(draw, error = %err, "draw failed; continuing with the next one");
                println!("  \u{2717} draw {draw:>5}  error");
            }
        }

        pacing::pause(config.draw_pause_min_ms, config.draw_pause_max_ms).await;
    }

    println!(
        "Done: {written} rows written, {missed} draws without rows -> {}",
        out.display()
    );
    Ok(())
}
