//! `geocode` subcommand: resolve coordinates for scored stores.
//!
//! Lookups run one row at a time with a jittered pause, address search first
//! and a name-plus-address keyword search as fallback. Previously written
//! output doubles as a cache keyed by address, and progress is autosaved so
//! an interrupted run resumes where it left off.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;

use lottang_core::{AppConfig, GeoStore, ScoredStore};
use lottang_geocode::{Coord, KakaoLocalClient};
use lottang_scraper::pacing;
use lottang_store::{read_geocoded, read_scored, write_geocoded};

pub(crate) async fn run(config: &AppConfig, input: &Path, out: &Path) -> anyhow::Result<()> {
    // The only hard precondition of any pipeline: no REST key, no run.
    let rest_key = config.kakao_rest_key.as_deref().ok_or_else(|| {
        anyhow::anyhow!("Kakao REST key not found; set KAKAO_REST_API_KEY (or KAKAO_REST_KEY)")
    })?;

    let client = KakaoLocalClient::new(
        rest_key,
        config.geocode_timeout_secs,
        config.geocode_max_retries,
        config.geocode_backoff_base_ms,
    )?;

    let rows = read_scored(input)
        .with_context(|| format!("reading scored stores from {}", input.display()))?;

    let cache = load_cache(out);
    if !cache.is_empty() {
        println!("[resume] loaded {} cached rows from existing geo file", cache.len());
    }

    let total = rows.len();
    let mut done: Vec<GeoStore> = Vec::with_capacity(total);

    for (index, row) in rows.into_iter().enumerate() {
        let (lat, lng) = if let Some((lat, lng)) = cache.get(&row.address_full) {
            (lat.clone(), lng.clone())
        } else {
            let coord = lookup(&client, &row).await;
            pacing::pause(config.geocode_pause_min_ms, config.geocode_pause_max_ms).await;
            coord.map_or_else(|| (String::new(), String::new()), |c| (c.lat, c.lng))
        };
        done.push(GeoStore::from_scored(row, lat, lng));

        let processed = index + 1;
        if config.geocode_autosave_every > 0 && processed % config.geocode_autosave_every == 0 {
            write_geocoded(out, &done)?;
            println!("[autosave] wrote {processed}/{total} rows");
        }
    }

    write_geocoded(out, &done)?;
    println!("Done: {} rows -> {}", done.len(), out.display());
    Ok(())
}

/// Coordinates resolved by a previous run, keyed by address. Unreadable or
/// missing prior output just means an empty cache.
fn load_cache(out: &Path) -> HashMap<String, (String, String)> {
    if !out.exists() {
        return HashMap::new();
    }
    match read_geocoded(out) {
        Ok(prior) => prior
            .into_iter()
            .filter(GeoStore::has_coords)
            .map(|row| (row.address_full, (row.lat, row.lng)))
            .collect(),
        Err(err) => {
            tracing::warn!(path = %out.display(), error = %err, "ignoring unreadable existing geo file");
            HashMap::new()
        }
    }
}

/// Address search first; when the registered address does not resolve, a
/// keyword search on "name address" often still does.
async fn lookup(client: &KakaoLocalClient, row: &ScoredStore) -> Option<Coord> {
    match client.search_address(&row.address_full).await {
        Ok(Some(coord)) => return Some(coord),
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(address = %row.address_full, error = %err, "address search failed");
        }
    }

    let query = format!("{} {}", row.store_name, row.address_full);
    match client.search_keyword(&query).await {
        Ok(coord) => coord,
        Err(err) => {
            tracing::warn!(query = %query, error = %err, "keyword search failed");
            None
        }
    }
}
