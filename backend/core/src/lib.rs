pub mod error;
pub mod record;
pub mod traits;

pub use error::TrackerError;
pub use record::{History, Record};
pub use traits::{HistoryStore, ImageFetcher, TextExtractor};
