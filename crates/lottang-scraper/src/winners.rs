//! Ordered fetch ladder for one draw's winning-store rows.
//!
//! The site answers the same question differently depending on device
//! variant and request shape, and any single variant goes blank for long
//! stretches of draws. Strategies are tried in a fixed order and the first
//! one to parse at least one row wins; results are never merged across
//! strategies.

use lottang_core::WinnerRow;

use crate::archive::scan_archive;
use crate::detail::parse_detail;
use crate::dump::DebugDump;
use crate::error::ScrapeError;
use crate::session::Session;
use crate::types::{ScrapeConfig, Strategy, TOP_STORE_QUERY};

/// Fetch the winner rows for `draw_no`, trying each strategy in order until
/// one yields rows. An all-miss draw returns `Ok` with no rows.
///
/// A strategy's network failure is logged and counted as zero rows; it never
/// aborts the ladder. Zero-row response bodies are preserved through `dump`
/// before the next strategy runs.
///
/// # Errors
///
/// Returns [`ScrapeError`] only when a session cannot be constructed at all
/// (client build or header configuration), which no later strategy could
/// recover from.
pub async fn fetch_winners(
    config: &ScrapeConfig,
    draw_no: u32,
    dump: &DebugDump,
) -> Result<Vec<WinnerRow>, ScrapeError> {
    let desktop = Session::open(config, &config.desktop_referer()).await?;

    let drw_no = draw_no.to_string();
    let detail_form: [(&str, &str); 4] = [
        ("drwNo", drw_no.as_str()),
        ("nowPage", "1"),
        ("schKey", "all"),
        ("schVal", ""),
    ];

    // Strategy 1: desktop detail, form POST.
    let fetched = desktop
        .post_form(&config.desktop_base, TOP_STORE_QUERY, &detail_form)
        .await;
    if let Some(rows) = detail_attempt(Strategy::DesktopPost, fetched, draw_no, dump).await {
        return Ok(rows);
    }

    // Strategy 2: mobile detail, form POST, with its own cookie session.
    let mobile = Session::open(config, &config.mobile_referer()).await?;
    let fetched = mobile
        .post_form(&config.mobile_base, TOP_STORE_QUERY, &detail_form)
        .await;
    if let Some(rows) = detail_attempt(Strategy::MobilePost, fetched, draw_no, dump).await {
        return Ok(rows);
    }

    // Strategy 3: desktop detail, GET with the draw number in the query.
    let detail_query = [
        ("method", "topStore"),
        ("pageGubun", "L645"),
        ("drwNo", drw_no.as_str()),
    ];
    let fetched = desktop.get_html(&config.desktop_base, &detail_query).await;
    if let Some(rows) = detail_attempt(Strategy::DesktopGet, fetched, draw_no, dump).await {
        return Ok(rows);
    }

    // Strategy 4: archive listing fallback.
    match scan_archive(&desktop, config, config.archive_max_pages, draw_no, dump).await {
        Ok(rows) if !rows.is_empty() => {
            tracing::debug!(
                draw_no,
                strategy = Strategy::Archive.tag(),
                rows = rows.len(),
                "strategy yielded rows"
            );
            return Ok(rows);
        }
        Ok(_) => {}
        Err(err) => tracing::warn!(
            draw_no,
            strategy = Strategy::Archive.tag(),
            error = %err,
            "strategy failed"
        ),
    }

    tracing::warn!(draw_no, "no rows from any strategy (detail + archive miss)");
    Ok(Vec::new())
}

/// Parse one detail strategy's outcome. `Some` means the ladder stops here;
/// `None` (network failure or zero rows) means the next strategy runs.
async fn detail_attempt(
    strategy: Strategy,
    fetched: Result<String, ScrapeError>,
    draw_no: u32,
    dump: &DebugDump,
) -> Option<Vec<WinnerRow>> {
    match fetched {
        Ok(html) => {
            let rows = parse_detail(&html, draw_no);
            if rows.is_empty() {
                dump.save_draw(draw_no, strategy.tag(), &html).await;
                None
            } else {
                tracing::debug!(
                    draw_no,
                    strategy = strategy.tag(),
                    rows = rows.len(),
                    "strategy yielded rows"
                );
                Some(rows)
            }
        }
        Err(err) => {
            tracing::warn!(
                draw_no,
                strategy = strategy.tag(),
                error = %err,
                "strategy failed"
            );
            None
        }
    }
}
