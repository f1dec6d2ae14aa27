// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardSession;
use crate::application::record_source::RecordSource;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct AppState {
    pub session: Mutex<DashboardSession>,
    pub source: Arc<dyn RecordSource>,
}

impl AppState {
    pub fn new(session: DashboardSession, source: Arc<dyn RecordSource>) -> Self {
        Self {
            session: Mutex::new(session),
            source,
        }
    }
}
