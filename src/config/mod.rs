// src/config/mod.rs
pub mod pipeline;

pub use pipeline::PipelineConfig;
