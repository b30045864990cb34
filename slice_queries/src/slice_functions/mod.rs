pub mod clustering_key_spec;
pub mod consistency;
pub mod operator;
pub mod ordering_mode;
pub mod partition_key_spec;
pub mod value;
