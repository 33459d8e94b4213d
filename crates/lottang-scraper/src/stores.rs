//! Store-directory crawler.
//!
//! Unlike the winners pipeline, the seller listing is a plain paginated
//! table: one GET per page, mobile endpoint first with a desktop fallback
//! when mobile parses to nothing. No cookies are needed here.

use std::sync::LazyLock;
use std::time::Duration;

use scraper::{Html, Selector};

use lottang_core::text::normalize_ws;
use lottang_core::StoreRow;

use crate::dom;
use crate::dump::DebugDump;
use crate::error::ScrapeError;
use crate::types::ScrapeConfig;

const SELL_TYPE: &str = "lotto6/45";
const SOURCE: &str = "dhLottery";

static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("valid selector"));
static BODY_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tbody tr").expect("valid selector"));
static DATA_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("valid selector"));

/// Build the plain (cookie-less) client used for the store directory.
///
/// # Errors
///
/// Returns [`ScrapeError::Http`] if the client cannot be constructed.
pub fn build_store_client(config: &ScrapeConfig) -> Result<reqwest::Client, ScrapeError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(config.user_agent.as_str())
        .build()?;
    Ok(client)
}

/// Fetch one region page of the seller listing, falling back from the mobile
/// endpoint to the desktop one when mobile parses to zero rows. Both bodies
/// are preserved when the page yields nothing at all.
///
/// # Errors
///
/// Propagates [`ScrapeError`] from either fetch; the caller decides whether
/// that ends the region.
pub async fn fetch_store_rows(
    client: &reqwest::Client,
    config: &ScrapeConfig,
    sido: &str,
    gugun: &str,
    page: u32,
    dump: &DebugDump,
) -> Result<Vec<StoreRow>, ScrapeError> {
    let mobile_html = get_store_page(client, &config.mobile_base, sido, gugun, page).await?;
    let rows = parse_store_page(&mobile_html);
    if !rows.is_empty() {
        return Ok(rows);
    }
    dump.save_store_page(sido, gugun, page, "mobile", &mobile_html)
        .await;

    let desktop_html = get_store_page(client, &config.desktop_base, sido, gugun, page).await?;
    let rows = parse_store_page(&desktop_html);
    if rows.is_empty() {
        dump.save_store_page(sido, gugun, page, "desktop", &desktop_html)
            .await;
    }
    Ok(rows)
}

async fn get_store_page(
    client: &reqwest::Client,
    base: &str,
    sido: &str,
    gugun: &str,
    page: u32,
) -> Result<String, ScrapeError> {
    let now_page = page.to_string();
    let query = [
        ("method", "sellerInfo645"),
        ("sltSIDO", sido),
        ("sltGUGUN", gugun),
        ("nowPage", now_page.as_str()),
    ];
    let response = client.get(base).query(&query).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::UnexpectedStatus {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }
    Ok(response.text().await?)
}

/// Extract seller rows from one listing page. The listing prints
/// `[상호, 주소, 전화]` in that order, occasionally without the phone column.
#[must_use]
pub fn parse_store_page(html: &str) -> Vec<StoreRow> {
    let doc = Html::parse_document(html);
    let mut rows = Vec::new();

    for table in doc.select(&TABLE) {
        for tr in table.select(&BODY_ROW) {
            let cells: Vec<String> = tr
                .select(&DATA_CELL)
                .map(|cell| normalize_ws(&dom::text(cell)))
                .collect();
            if cells.len() < 2 {
                continue;
            }
            let store_name = cells[0].clone();
            let address_full = cells[1].clone();
            if store_name.is_empty() || address_full.is_empty() {
                continue;
            }
            rows.push(StoreRow {
                store_name,
                address_full,
                tel: cells.get(2).cloned().unwrap_or_default(),
                sell_type: SELL_TYPE.to_string(),
                source: SOURCE.to_string(),
            });
        }
    }

    rows
}
