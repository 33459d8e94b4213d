//! Heuristic table extraction.
//!
//! Winning-store tables carry no stable markup: header wording shifts between
//! draws and devices, headers are sometimes absent entirely, and column order
//! is not guaranteed. Each table therefore gets a per-table header map, with
//! a positional fallback for headerless layouts.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use lottang_core::text::normalize_ws;
use lottang_core::{Rank, WinnerRow};

use crate::dom;

/// `source` value stamped on every heuristically parsed row.
pub(crate) const SOURCE_PARSED: &str = "parsed";

static THEAD_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("thead tr").expect("valid selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("valid selector"));
static HEADER_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th, td").expect("valid selector"));
static DATA_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("valid selector"));

/// Positional indices of the semantic columns within one table's header row.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct HeaderMap {
    no: Option<usize>,
    name: Option<usize>,
    addr: Option<usize>,
    pick: Option<usize>,
}

impl HeaderMap {
    fn is_empty(&self) -> bool {
        self.no.is_none() && self.name.is_none() && self.addr.is_none() && self.pick.is_none()
    }

    /// Match normalized header labels against the known wordings.
    ///
    /// The row-number column only matches exactly ("No"/"번호") — looser
    /// matching would capture ranking columns like "순위". The other columns
    /// match on containment because real headers embellish freely
    /// ("상호명", "도로명주소", "선택구분", ...).
    fn from_labels(labels: &[String]) -> Self {
        let mut map = Self::default();
        for (i, label) in labels.iter().enumerate() {
            if label.eq_ignore_ascii_case("no") || label == "번호" {
                map.no = Some(i);
            }
            if ["상호", "판매점", "가맹점"].iter().any(|p| label.contains(p)) {
                map.name = Some(i);
            }
            if label.contains("소재지") || label.contains("주소") {
                map.addr = Some(i);
            }
            if ["구분", "선택", "자동", "수동"].iter().any(|p| label.contains(p)) {
                map.pick = Some(i);
            }
        }
        map
    }
}

/// Extract winner rows from one table under the given rank context.
///
/// Rows missing a store name or address are discarded; everything accepted
/// gets `draw_no`, the rank context, and the parsed-source marker stamped on.
pub(crate) fn parse_table(
    table: ElementRef<'_>,
    draw_no: u32,
    rank: Option<Rank>,
) -> Vec<WinnerRow> {
    let header_row = table
        .select(&THEAD_ROW)
        .next()
        .or_else(|| table.select(&ROW).next());

    let map = header_row
        .map(|row| {
            let labels: Vec<String> = row
                .select(&HEADER_CELL)
                .map(|cell| normalize_ws(&dom::text(cell)))
                .collect();
            HeaderMap::from_labels(&labels)
        })
        .unwrap_or_default();

    // A first row that mapped to nothing is almost certainly data wearing no
    // header, so it stays in the body; thead rows never are.
    let header_id = if map.is_empty() {
        None
    } else {
        header_row.map(|row| row.id())
    };
    let mut rows = Vec::new();

    for tr in table.select(&ROW) {
        if Some(tr.id()) == header_id || in_thead(tr) {
            continue;
        }
        let cells: Vec<String> = tr
            .select(&DATA_CELL)
            .map(|cell| normalize_ws(&dom::text(cell)))
            .collect();
        if cells.is_empty() {
            continue;
        }

        let (no, store_name, address_full, pick_type) = if map.is_empty() {
            positional_fields(&cells)
        } else {
            mapped_fields(&map, &cells)
        };

        if store_name.is_empty() || address_full.is_empty() {
            continue;
        }

        rows.push(WinnerRow {
            draw_no,
            no,
            rank,
            store_name,
            address_full,
            pick_type,
            source: SOURCE_PARSED.to_string(),
        });
    }

    rows
}

fn in_thead(tr: ElementRef<'_>) -> bool {
    tr.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| ancestor.value().name() == "thead")
}

fn mapped_fields(map: &HeaderMap, cells: &[String]) -> (String, String, String, String) {
    let pick = |idx: Option<usize>| -> String {
        idx.and_then(|i| cells.get(i)).cloned().unwrap_or_default()
    };
    (pick(map.no), pick(map.name), pick(map.addr), pick(map.pick))
}

/// Headerless layout: a purely numeric first cell means a leading row-number
/// column, otherwise the row starts directly with the store name.
fn positional_fields(cells: &[String]) -> (String, String, String, String) {
    let numeric_lead =
        !cells[0].is_empty() && cells[0].chars().all(|c| c.is_ascii_digit());
    if cells.len() >= 3 && numeric_lead {
        (
            cells[0].clone(),
            cells[1].clone(),
            cells[2].clone(),
            cells.get(3).cloned().unwrap_or_default(),
        )
    } else if cells.len() >= 2 {
        (
            String::new(),
            cells[0].clone(),
            cells[1].clone(),
            cells.get(2).cloned().unwrap_or_default(),
        )
    } else {
        (String::new(), String::new(), String::new(), String::new())
    }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
