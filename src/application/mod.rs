// Application layer - Use cases over the domain
pub mod dashboard_service;
pub mod record_source;
pub mod view_composer;
