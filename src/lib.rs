//! cochange-mdg library — parsing of co-change dependency records and entity descriptors.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;

pub use adapters::scanner::RecordScanner;
pub use domain::descriptor::{DescriptorParser, EntityDescriptor};
pub use domain::record::{DependencyRecord, RecordMetrics};
