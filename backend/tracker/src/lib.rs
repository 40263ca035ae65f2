//! Prestige tracking: the parser that reads OCR text, the ledger that
//! validates and appends records, the JSON store, and the report renderer.

pub mod ledger;
pub mod parser;
pub mod report;
pub mod store;

pub use ledger::{Ledger, SubmitOutcome};
pub use parser::{parse_prestige_value, ParseOutcome, PrestigeParser};
pub use report::{format_thousands, RenderedReport, ReportRenderer};
pub use store::{JsonFileStore, MemoryHistoryStore};
