//! Data layer: the entry store, statistics, input validation and file storage.

mod input;
mod models;
mod stats;
mod storage;
mod store;

pub use input::parse_entry;
pub use models::{Entry, Stats};
pub use stats::compute_stats;
pub use storage::Storage;
pub use store::DataStore;
