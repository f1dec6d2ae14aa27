// Domain layer - Records, derived metrics, navigation and render-model
pub mod metrics;
pub mod navigation;
pub mod records;
pub mod render_model;
