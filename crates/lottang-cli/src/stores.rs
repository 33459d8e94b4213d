//! `stores` subcommand: crawl the seller directory region by region.

use std::path::Path;

use anyhow::Context;

use lottang_core::{load_regions, AppConfig};
use lottang_scraper::{build_store_client, fetch_store_rows, pacing, DebugDump, ScrapeConfig};
use lottang_store::StoreSink;

pub(crate) async fn run(
    config: &AppConfig,
    sido: Option<String>,
    gugun: Option<String>,
    out: &Path,
) -> anyhow::Result<()> {
    let regions: Vec<(String, Vec<String>)> = match (sido, gugun) {
        (Some(sido), Some(gugun)) => vec![(sido, vec![gugun])],
        (None, None) => load_regions(&config.regions_path)
            .with_context(|| format!("loading regions from {}", config.regions_path.display()))?
            .regions
            .into_iter()
            .map(|r| (r.sido, r.guguns))
            .collect(),
        _ => anyhow::bail!("--sido and --gugun must be given together"),
    };

    let scrape = ScrapeConfig::from_app(config);
    let client = build_store_client(&scrape)?;
    let dump = DebugDump::new(&config.debug_dir);
    let mut sink = StoreSink::create(out)
        .with_context(|| format!("creating output file {}", out.display()))?;

    let mut total = 0usize;
    for (sido, guguns) in &regions {
        for gugun in guguns {
            match crawl_region(&client, &scrape, config, sido, gugun, &mut sink, &dump).await {
                Ok(count) => {
                    total += count;
                    println!("  \u{2713} {sido} {gugun:<8} {count} stores");
                }
                Err(err) => {
                    tracing::error!(sido = %sido, gugun = %gugun, error = %err, "region failed; continuing");
                    println!("  \u{2717} {sido} {gugun}");
                }
            }
        }
    }

    sink.flush()?;
    println!("Done: {total} stores -> {}", out.display());
    Ok(())
}

/// Page through one region until a page yields nothing from either endpoint
/// variant. Rows land in the sink page by page, so a later region's failure
/// loses nothing already crawled.
async fn crawl_region(
    client: &reqwest::Client,
    scrape: &ScrapeConfig,
    config: &AppConfig,
    sido: &str,
    gugun: &str,
    sink: &mut StoreSink,
    dump: &DebugDump,
) -> anyhow::Result<usize> {
    let mut page = 1u32;
    let mut count = 0usize;

    loop {
        let rows = fetch_store_rows(client, scrape, sido, gugun, page, dump).await?;
        if rows.is_empty() {
            // Either the listing ran out of pages or the markup changed; the
            // dumped bodies tell which.
            tracing::warn!(sido = %sido, gugun = %gugun, page, "page yielded no rows; region ends here");
            break;
        }
        sink.append(&rows)?;
        sink.flush()?;
        count += rows.len();
        page += 1;
        pacing::pause(config.store_pause_min_ms, config.store_pause_max_ms).await;
    }

    Ok(count)
}
