pub mod slice_context;
pub mod slice_iterator;
pub mod slice_stage;
pub mod statement_skeleton;
