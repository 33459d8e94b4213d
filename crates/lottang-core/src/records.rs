//! Record types shared by the scraper, the CSV store, and the pipelines.

use serde::{Deserialize, Serialize};

/// Prize rank a winning-store row belongs to.
///
/// Serialized as `"1"` / `"2"` so the CSV layout matches what downstream
/// consumers already read; an undetermined rank is `None` on the row and
/// serializes to an empty field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "1")]
    First,
    #[serde(rename = "2")]
    Second,
}

impl Rank {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Rank::First => "1",
            Rank::Second => "2",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One winning-store row for a draw. Field order is the persisted column
/// order: `draw_no, no, rank, store_name, address_full, pick_type, source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerRow {
    pub draw_no: u32,
    /// Row number as printed in the source table; often empty.
    pub no: String,
    pub rank: Option<Rank>,
    pub store_name: String,
    pub address_full: String,
    /// Auto/manual pick marker, when the table exposes one.
    pub pick_type: String,
    /// Which producer emitted the row (`"parsed"` for the heuristic parser).
    pub source: String,
}

/// One store-directory row from the seller listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRow {
    pub store_name: String,
    pub address_full: String,
    pub tel: String,
    pub sell_type: String,
    pub source: String,
}

/// Aggregated win history and score for one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredStore {
    pub store_name: String,
    pub address_full: String,
    pub sido: String,
    pub sigungu: String,
    pub dong: String,
    pub tel: String,
    pub sell_type: String,
    pub win1_cnt: u32,
    pub win2_cnt: u32,
    /// Approximate years since the last win, in 0.1-year steps.
    pub years_since: f64,
    pub score: f64,
}

/// A [`ScoredStore`] with resolved coordinates.
///
/// `lat`/`lng` keep the provider's string form (and stay empty on a miss) so
/// re-serialization never shifts coordinate precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoStore {
    pub store_name: String,
    pub address_full: String,
    pub sido: String,
    pub sigungu: String,
    pub dong: String,
    pub tel: String,
    pub sell_type: String,
    pub win1_cnt: u32,
    pub win2_cnt: u32,
    pub years_since: f64,
    pub score: f64,
    pub lat: String,
    pub lng: String,
}

impl GeoStore {
    /// Attach coordinates to a scored row. Empty strings mean "unresolved".
    #[must_use]
    pub fn from_scored(scored: ScoredStore, lat: String, lng: String) -> Self {
        Self {
            store_name: scored.store_name,
            address_full: scored.address_full,
            sido: scored.sido,
            sigungu: scored.sigungu,
            dong: scored.dong,
            tel: scored.tel,
            sell_type: scored.sell_type,
            win1_cnt: scored.win1_cnt,
            win2_cnt: scored.win2_cnt,
            years_since: scored.years_since,
            score: scored.score,
            lat,
            lng,
        }
    }

    #[must_use]
    pub fn has_coords(&self) -> bool {
        !self.lat.is_empty() && !self.lng.is_empty()
    }
}
