pub mod context;
pub mod extraction;
pub mod merge;
pub mod processor;
pub mod render;
