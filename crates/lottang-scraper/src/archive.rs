//! Archive-listing fallback.
//!
//! When every detail strategy misses, the chronological archive listing is
//! paged through looking for a "제 N 회" section heading for the wanted draw.
//! Archive sections pack several rank blocks densely under one heading, so
//! the forward walk is wider than on detail pages and the rank context keeps
//! updating from intervening headings.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use lottang_core::text::normalize_ws;
use lottang_core::WinnerRow;

use crate::dom;
use crate::dump::DebugDump;
use crate::error::ScrapeError;
use crate::pacing;
use crate::rank::detect_rank;
use crate::session::Session;
use crate::table::parse_table;
use crate::types::ScrapeConfig;

const ARCHIVE_HOP_LIMIT: usize = 15;

static HEADING: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h2, h3, h4, strong, .title, .tit, .stit").expect("valid selector")
});
static DRAW_NO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"제\s*([0-9]+)\s*회").expect("valid regex"));

/// Page through the archive listing until a section for `draw_no` turns up.
///
/// Returns the rows of the first matching section, or empty when no page
/// within `max_pages` mentions the draw; in that case the last page's body
/// is preserved for diagnosis.
///
/// # Errors
///
/// Propagates [`ScrapeError`] from page fetches; the caller treats that as a
/// zero-row strategy outcome.
pub async fn scan_archive(
    session: &Session,
    config: &ScrapeConfig,
    max_pages: u32,
    draw_no: u32,
    dump: &DebugDump,
) -> Result<Vec<WinnerRow>, ScrapeError> {
    let mut last_page = String::new();

    for page in 1..=max_pages {
        let now_page = page.to_string();
        let query = [
            ("method", "topStore"),
            ("pageGubun", "L645"),
            ("nowPage", now_page.as_str()),
        ];
        let html = session.get_html(&config.desktop_base, &query).await?;

        let rows = parse_archive_page(&html, draw_no);
        if !rows.is_empty() {
            tracing::debug!(draw_no, page, rows = rows.len(), "archive section found");
            return Ok(rows);
        }

        last_page = html;
        if page < max_pages {
            pacing::pause(config.archive_pause_min_ms, config.archive_pause_max_ms).await;
        }
    }

    if !last_page.is_empty() {
        dump.save_draw(draw_no, "archive_last", &last_page).await;
    }
    Ok(Vec::new())
}

/// Extract the rows of the section headed "제 `target_draw` 회" on one
/// archive page, or empty when the page has no such section.
#[must_use]
pub fn parse_archive_page(html: &str, target_draw: u32) -> Vec<WinnerRow> {
    let doc = Html::parse_document(html);
    let mut out = Vec::new();

    for heading in doc.select(&HEADING) {
        let text = normalize_ws(&dom::text(heading));
        let Some(caps) = DRAW_NO_RE.captures(&text) else {
            continue;
        };
        let Ok(number) = caps[1].parse::<u32>() else {
            continue;
        };
        if number != target_draw {
            continue;
        }

        let mut rank = detect_rank(&text);
        let mut next = dom::first_forward_element(heading);
        let mut hops = 0;
        while let Some(el) = next {
            if hops >= ARCHIVE_HOP_LIMIT {
                break;
            }
            if el.value().name() == "table" {
                out.extend(parse_table(el, target_draw, rank));
            } else if let Some(update) = detect_rank(&dom::text(el)) {
                rank = Some(update);
            }
            next = dom::next_sibling_element(el);
            hops += 1;
        }

        // First matching section only; later duplicates are stale reprints.
        break;
    }

    out
}

#[cfg(test)]
mod tests {
    use lottang_core::Rank;

    use super::*;

    fn table(names: &[(&str, &str)]) -> String {
        let mut html =
            String::from("<table><thead><tr><th>상호</th><th>소재지</th></tr></thead><tbody>");
        for (name, addr) in names {
            html.push_str(&format!("<tr><td>{name}</td><td>{addr}</td></tr>"));
        }
        html.push_str("</tbody></table>");
        html
    }

    #[test]
    fn finds_target_section_and_carries_rank_updates() {
        let html = format!(
            "<h3>제 1049 회</h3>{}\
             <h3>제 1050 회 1등 배출점</h3>{}<strong>2등</strong>{}",
            table(&[("이전회차가게", "서울 종로구 관철동 1")]),
            table(&[("일등가게", "서울 강남구 역삼동 1-1")]),
            table(&[("이등가게", "부산 해운대구 우동 2-2")]),
        );

        let rows = parse_archive_page(&html, 1050);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].store_name, "일등가게");
        assert_eq!(rows[0].rank, Some(Rank::First));
        assert_eq!(rows[1].store_name, "이등가게");
        assert_eq!(rows[1].rank, Some(Rank::Second));
        assert!(rows.iter().all(|r| r.draw_no == 1050));
    }

    #[test]
    fn heading_number_must_match_exactly() {
        let html = format!("<h3>제 1050 회</h3>{}", table(&[("가게", "서울 중구 명동 1")]));
        assert!(parse_archive_page(&html, 1051).is_empty());
    }

    #[test]
    fn spaced_and_padded_numbers_are_recognised() {
        let html = format!("<h4>제1050회 당첨판매점</h4>{}", table(&[("가게", "서울 중구 명동 1")]));
        let rows = parse_archive_page(&html, 1050);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn stops_at_first_matching_section() {
        let html = format!(
            "<div><h3>제 1050 회 1등</h3>{}</div><div><h3>제 1050 회 재공지 2등</h3>{}</div>",
            table(&[("원본가게", "서울 강남구 역삼동 1-1")]),
            table(&[("중복가게", "서울 강북구 수유동 9")]),
        );
        let rows = parse_archive_page(&html, 1050);
        assert_eq!(rows.len(), 1, "duplicate sections are not scanned");
        assert_eq!(rows[0].store_name, "원본가게");
    }

    #[test]
    fn page_without_draw_headings_is_empty() {
        assert!(parse_archive_page("<h2>당첨판매점 안내</h2><p>안내문</p>", 1050).is_empty());
    }
}
