pub mod keyspace;
pub mod primary_key;
pub mod table;
