pub mod error;
pub mod scored;
pub mod stores;
pub mod winners;

pub use error::StoreError;
pub use scored::{read_geocoded, read_scored, write_geocoded, write_scored};
pub use stores::{read_stores, StoreSink};
pub use winners::{read_winners, WinnerSink};
