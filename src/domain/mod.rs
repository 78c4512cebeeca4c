// Domain layer - Pure types and numeric logic, no I/O
pub mod artifact;
pub mod dataset;
pub mod error;
pub mod feature_table;
pub mod field;
pub mod label;
pub mod moisture;
pub mod pipeline;
pub mod reading;
pub mod trend;
