//! Live park information for Park Guide.
//!
//! [`LiveInfoFetcher`] returns today's hours, fireworks notice and posted
//! notes. Values are served from a timestamped cache while fresh; on a miss
//! the configured [`HoursSource`] is fetched and parsed. Every failure maps
//! to [`ParkInfo::fallback`](parkguide_core::ParkInfo::fallback), so callers
//! always get a value.

pub mod cache;
pub mod fetcher;
pub mod parser;
pub mod source;

pub use cache::{CachedInfo, InfoCache};
pub use fetcher::LiveInfoFetcher;
pub use parser::parse_park_info;
pub use source::{HoursSource, HttpHoursSource};
