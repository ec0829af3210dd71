//! Attempt history: where it is read from, how it is paged, and how new
//! scores are recorded.
//!
//! - `HistoryLoader`: local cache first, remote fallback on an empty cache
//! - `HistoryPager`: fixed-size pages over the loaded list
//! - `ScoreRecorder`: the authenticated write path to the remote service

pub mod loader;
pub mod pagination;
pub mod recorder;

pub use loader::{HistoryLoader, HistorySource, LoadedHistory};
pub use pagination::{page_slice, total_pages, HistoryPager, Page, ITEMS_PER_PAGE};
pub use recorder::ScoreRecorder;
