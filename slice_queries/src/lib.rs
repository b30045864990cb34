pub mod bounding_mode;
pub mod clustering_validator;
pub mod config;
pub mod dsl_functions;
pub mod error;
pub mod executor;
pub mod executor_functions;
pub mod logger;
pub mod metadata_functions;
pub mod planner;
pub mod slice_functions;
pub mod slice_query_builder;
pub mod slice_query_properties;
pub mod transcoder;

pub use bounding_mode::BoundingMode;
pub use clustering_validator::ClusteringKeyValidator;
pub use error::ErrorType;
pub use executor::{DryRunExecutor, SliceExecutor};
pub use slice_functions::{consistency::Consistency, ordering_mode::OrderingMode, value::Value};
pub use slice_query_builder::SliceQueryBuilder;
pub use slice_query_properties::{SliceQueryProperties, StatementKind};
