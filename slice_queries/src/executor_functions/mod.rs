pub mod bound_statement;
pub mod query_parameters;
pub mod query_value;
