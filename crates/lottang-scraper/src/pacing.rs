//! Randomized request pacing.
//!
//! The source is scraped sequentially and politely: a jittered pause follows
//! every request so the effective rate stays well under what the site allows.

use std::time::Duration;

use rand::Rng;

/// Sleep for a uniformly random duration within `[min_ms, max_ms]`.
///
/// An inverted window is treated as its lower bound rather than panicking;
/// config validation normally rules that out.
pub async fn pause(min_ms: u64, max_ms: u64) {
    let delay_ms = if min_ms >= max_ms {
        min_ms
    } else {
        rand::rng().random_range(min_ms..=max_ms)
    };
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
}
