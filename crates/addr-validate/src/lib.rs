pub mod checks;
pub mod pipeline;

pub use checks::{AddressCheck, StateCheck, Zip4FormatCheck, Zip5FormatCheck, ZipCodeCheck};
pub use pipeline::{CheckPipeline, default_pipeline};
