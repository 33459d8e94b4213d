pub mod client;
pub mod error;
pub mod types;

mod retry;

pub use client::KakaoLocalClient;
pub use error::GeocodeError;
pub use types::Coord;
