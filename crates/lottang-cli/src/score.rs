//! `score` subcommand: join winner history with the store directory and
//! rank stores by win-history score.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;

use lottang_core::score::{compute_score, years_since_draw};
use lottang_core::text::{match_key, split_address};
use lottang_core::{Rank, ScoredStore, StoreRow, WinnerRow};
use lottang_store::{read_stores, read_winners, write_scored};

pub(crate) fn run(winners_path: &Path, stores_path: &Path, out: &Path) -> anyhow::Result<()> {
    let winners = read_winners(winners_path)
        .with_context(|| format!("reading winners from {}", winners_path.display()))?;
    if winners.is_empty() {
        anyhow::bail!("no winner rows in {}", winners_path.display());
    }

    let stores = if stores_path.exists() {
        read_stores(stores_path)
            .with_context(|| format!("reading store directory from {}", stores_path.display()))?
    } else {
        tracing::warn!(
            path = %stores_path.display(),
            "store directory missing; scoring proceeds without tel/sell_type metadata"
        );
        Vec::new()
    };

    let scored = score_rows(&winners, &stores);
    write_scored(out, &scored)?;
    println!("Done: {} stores scored -> {}", scored.len(), out.display());
    Ok(())
}

struct WinAgg {
    win1: u32,
    win2: u32,
    name: String,
    addr: String,
    last_draw: u32,
}

/// Aggregate wins per store key, attach directory metadata where a store
/// matches, and sort by score descending.
fn score_rows(winners: &[WinnerRow], stores: &[StoreRow]) -> Vec<ScoredStore> {
    let max_draw = winners.iter().map(|r| r.draw_no).max().unwrap_or(0);

    let mut agg: HashMap<String, WinAgg> = HashMap::new();
    for row in winners {
        let key = match_key(&row.store_name, &row.address_full);
        let entry = agg.entry(key).or_insert_with(|| WinAgg {
            win1: 0,
            win2: 0,
            name: row.store_name.clone(),
            addr: row.address_full.clone(),
            last_draw: 0,
        });
        match row.rank {
            Some(Rank::First) => entry.win1 += 1,
            Some(Rank::Second) => entry.win2 += 1,
            None => {}
        }
        entry.last_draw = entry.last_draw.max(row.draw_no);
    }

    // First directory entry per key wins; the listing repeats stores that
    // sell several game types.
    let mut meta: HashMap<String, &StoreRow> = HashMap::new();
    for store in stores {
        meta.entry(match_key(&store.store_name, &store.address_full))
            .or_insert(store);
    }

    let mut out: Vec<ScoredStore> = agg
        .into_iter()
        .map(|(key, a)| {
            let years = years_since_draw(max_draw, a.last_draw);
            let score = compute_score(a.win1, a.win2, Some(years));
            let (store_name, address_full, tel, sell_type) = match meta.get(&key) {
                Some(store) => (
                    store.store_name.clone(),
                    store.address_full.clone(),
                    store.tel.clone(),
                    store.sell_type.clone(),
                ),
                None => (a.name, a.addr, String::new(), String::new()),
            };
            let (sido, sigungu, dong) = split_address(&address_full);
            ScoredStore {
                store_name,
                address_full,
                sido,
                sigungu,
                dong,
                tel,
                sell_type,
                win1_cnt: a.win1,
                win2_cnt: a.win2,
                years_since: years,
                score,
            }
        })
        .collect();

    out.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    out
}
