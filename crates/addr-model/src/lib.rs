pub mod address;
pub mod audit;
pub mod builder;
pub mod error;
pub mod international;
pub mod outcome;
pub mod result;
pub mod zip;

pub use address::{Address, RecomputeOutcome, ZipResolution};
pub use audit::{AuditRecord, EntryType, OperationKind, ProcessEntry, ProcessLog};
pub use builder::AddressBuilder;
pub use error::{AddressError, ErrorKind, Result};
pub use international::InternationalAddress;
pub use outcome::{FieldError, ValidationOutcome};
pub use result::{ParseResult, ParseSource};
pub use zip::{
    ZipCodeResult, format_zip, parse_zip, parse_zip_lenient, validate_zip4, validate_zip5,
};
