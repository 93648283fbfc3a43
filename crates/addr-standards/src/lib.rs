pub mod constants;
pub mod error;
pub mod source;

pub use constants::state_abbreviation_for;
pub use error::StandardsError;
pub use source::{ZipDataSource, ZipInfo, ZipTable, clean_zip_key};
