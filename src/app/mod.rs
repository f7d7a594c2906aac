pub mod context;
pub mod render;
