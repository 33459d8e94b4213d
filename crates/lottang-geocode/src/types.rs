use serde::Deserialize;

/// Envelope of both Local search endpoints; only the documents matter here.
#[derive(Debug, Deserialize)]
pub struct LocalSearchResponse {
    pub documents: Vec<LocalDocument>,
}

/// One search hit. The API reports coordinates as strings, `x` being the
/// longitude and `y` the latitude.
#[derive(Debug, Deserialize)]
pub struct LocalDocument {
    pub x: String,
    pub y: String,
}

/// A resolved coordinate pair, kept in the provider's string form so writing
/// it back out never shifts precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coord {
    pub lat: String,
    pub lng: String,
}
