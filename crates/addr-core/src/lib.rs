pub mod heuristic;
pub mod intl;
pub mod route;
pub mod service;
pub mod tagger;

pub use heuristic::HeuristicTagger;
pub use intl::{InternationalBackend, components_multimap, domestic_shape};
pub use route::{is_probably_international, looks_like_us};
pub use service::{AddressService, ParseOptions};
pub use tagger::{AddressTagger, TaggedToken, assemble_address, merge_consecutive_labels};
