//! Structural interpretation of a single-draw detail page.
//!
//! Rank sections are located by text, not by structure: any heading-,
//! label-, or container-like element whose text names exactly one prize rank
//! acts as a marker, and nearby tables are parsed under that rank. When no
//! marker leads anywhere, the passes invert and each table searches backward
//! for its nearest marker.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};

use lottang_core::WinnerRow;

use crate::dom;
use crate::rank::detect_rank;
use crate::table::parse_table;

/// How far a forward or backward walk may step on a detail page. Decorative
/// markup sits between a label and its table, but never this much of it.
const DETAIL_HOP_LIMIT: usize = 8;

static MARKER: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("section, article, div, h2, h3, h4, strong, .title, .tit, .stit")
        .expect("valid selector")
});
static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("valid selector"));

/// Parse every winner row out of one fetched detail document.
///
/// Marker-first interpretation runs first; the table-first fallback is used
/// only when it yields nothing, so a document is never double-counted.
#[must_use]
pub fn parse_detail(html: &str, draw_no: u32) -> Vec<WinnerRow> {
    let doc = Html::parse_document(html);

    let rows = marker_first(&doc, draw_no);
    if !rows.is_empty() {
        return rows;
    }
    table_first(&doc, draw_no)
}

/// Pass A: walk forward from every rank marker, parsing each table found
/// within the hop bound under that marker's rank.
fn marker_first(doc: &Html, draw_no: u32) -> Vec<WinnerRow> {
    let mut out = Vec::new();
    let mut visited = HashSet::new();

    for marker in doc.select(&MARKER) {
        let Some(rank) = detect_rank(&dom::text(marker)) else {
            continue;
        };

        let mut next = dom::first_forward_element(marker);
        let mut hops = 0;
        while let Some(el) = next {
            if hops >= DETAIL_HOP_LIMIT {
                break;
            }
            if el.value().name() == "table" && visited.insert(el.id()) {
                out.extend(parse_table(el, draw_no, Some(rank)));
            }
            next = dom::next_sibling_element(el);
            hops += 1;
        }
    }

    out
}

/// Pass B: for every table, search backward for the nearest rank marker and
/// parse under whatever was found — possibly no rank at all.
fn table_first(doc: &Html, draw_no: u32) -> Vec<WinnerRow> {
    let mut out = Vec::new();

    for table in doc.select(&TABLE) {
        let mut rank = None;
        let mut prev = dom::previous_element(table);
        let mut hops = 0;
        while let Some(el) = prev {
            if hops >= DETAIL_HOP_LIMIT || rank.is_some() {
                break;
            }
            rank = detect_rank(&dom::text(el));
            prev = dom::previous_element(el);
            hops += 1;
        }
        out.extend(parse_table(table, draw_no, rank));
    }

    out
}

#[cfg(test)]
#[path = "detail_test.rs"]
mod tests;
