// Infrastructure layer - Configuration and record sources
pub mod config;
pub mod fixtures;
pub mod json_source;
