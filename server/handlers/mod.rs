pub mod predict;
pub mod root;
