pub mod dataset;
pub mod hub;
pub mod parse;

pub use dataset::{read_records, write_records, DatasetRecord, QUALITY_COLUMNS, RECORD_COLUMNS};
pub use parse::ParseError;
