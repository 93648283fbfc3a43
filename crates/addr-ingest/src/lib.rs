pub mod csv_batch;
pub mod frame;

pub use csv_batch::{BatchSummary, parse_csv_file};
pub use frame::{FailurePolicy, IngestOptions, expand_address_column};
