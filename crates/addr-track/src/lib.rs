pub mod tables;
pub mod tracker;

pub use tracker::track_transformations;
