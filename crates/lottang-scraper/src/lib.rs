pub mod archive;
pub mod detail;
pub mod dump;
pub mod error;
pub mod pacing;
pub mod session;
pub mod stores;
pub mod types;
pub mod winners;

mod dom;
mod rank;
mod table;

pub use archive::scan_archive;
pub use detail::parse_detail;
pub use dump::DebugDump;
pub use error::ScrapeError;
pub use session::Session;
pub use stores::{build_store_client, fetch_store_rows};
pub use types::{ScrapeConfig, Strategy};
pub use winners::fetch_winners;
