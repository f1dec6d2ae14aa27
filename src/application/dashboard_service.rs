// Dashboard session - Owns the records, the active tab and the rendered view
use crate::application::record_source::SourceError;
use crate::application::view_composer::{compose_view, ComposerSettings};
use crate::domain::metrics::DomainError;
use crate::domain::navigation::{Navigator, Tab, UnknownTabError};
use crate::domain::records::{DashboardRecords, ValidationError};
use crate::domain::render_model::View;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    UnknownTab(#[from] UnknownTabError),

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// One viewer's dashboard. A failed transition or refresh keeps the last
/// successfully composed view on display.
#[derive(Debug)]
pub struct DashboardSession {
    records: DashboardRecords,
    settings: ComposerSettings,
    navigator: Navigator,
    view: View,
}

impl DashboardSession {
    pub fn new(
        records: DashboardRecords,
        settings: ComposerSettings,
    ) -> Result<Self, DashboardError> {
        records.validate()?;
        let navigator = Navigator::new();
        let view = compose_view(navigator.active(), &records, &settings)?;

        tracing::info!(
            "Dashboard session ready: {} adoption customers, {} reference customers",
            records.adoption_customers.len(),
            records.reference_customers.len()
        );

        Ok(Self {
            records,
            settings,
            navigator,
            view,
        })
    }

    pub fn active_tab(&self) -> Tab {
        self.navigator.active()
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn select_tab(&mut self, tab_id: &str) -> Result<&View, DashboardError> {
        let tab = self.navigator.select_tab(tab_id).map_err(|e| {
            tracing::warn!("Rejected tab selection: {}", e);
            e
        })?;

        match compose_view(tab, &self.records, &self.settings) {
            Ok(view) => {
                let charts: Vec<&str> = view.charts.iter().map(|c| c.id()).collect();
                tracing::debug!("Switched to tab {} with charts {:?}", tab, charts);
                self.view = view;
                Ok(&self.view)
            }
            Err(e) => {
                tracing::warn!("Failed to compose tab {}, keeping previous view: {}", tab, e);
                Err(e.into())
            }
        }
    }

    /// Swap in a freshly loaded set of records and recompose the active tab.
    /// Nothing changes if the new records do not validate or compose.
    pub fn replace_records(&mut self, records: DashboardRecords) -> Result<&View, DashboardError> {
        records.validate()?;
        let view = compose_view(self.navigator.active(), &records, &self.settings)?;

        self.records = records;
        self.view = view;
        tracing::info!("Dashboard records refreshed");
        Ok(&self.view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::fixtures::sample_records;

    fn session() -> DashboardSession {
        DashboardSession::new(sample_records(), ComposerSettings::default()).unwrap()
    }

    #[test]
    fn test_starts_on_overview() {
        let session = session();
        assert_eq!(session.active_tab(), Tab::Overview);
        assert_eq!(session.view().tab, Tab::Overview);
    }

    #[test]
    fn test_unknown_tab_keeps_state_and_view() {
        let mut session = session();
        session.select_tab("overview").unwrap();

        let err = session.select_tab("bogus").unwrap_err();
        assert!(matches!(err, DashboardError::UnknownTab(_)));
        assert_eq!(session.active_tab(), Tab::Overview);
        assert_eq!(session.view().tab, Tab::Overview);
    }

    #[test]
    fn test_switching_tabs_does_not_touch_records() {
        let mut session = session();
        let before = session.records.clone();

        assert_eq!(session.select_tab("references").unwrap().tab, Tab::References);
        assert_eq!(session.select_tab("ai_champions").unwrap().tab, Tab::AiChampions);
        assert_eq!(session.records, before);
    }

    #[test]
    fn test_compose_failure_keeps_previous_view() {
        let mut session = session();
        session.select_tab("references").unwrap();
        // Bypass validation to simulate a bad value reaching the engine.
        session.records.adoption_customers[0].ai_adoption = 150;

        let err = session.select_tab("ai_champions").unwrap_err();
        assert!(matches!(err, DashboardError::Domain(DomainError::OutOfRange { .. })));
        assert_eq!(session.view().tab, Tab::References);
    }

    #[test]
    fn test_invalid_refresh_is_rejected() {
        let mut session = session();
        let mut records = sample_records();
        records.reference_customers[0].health = 101;

        let err = session.replace_records(records).unwrap_err();
        assert!(matches!(err, DashboardError::Validation(_)));
        assert_eq!(session.records, sample_records());
    }

    #[test]
    fn test_refresh_recomposes_active_tab() {
        let mut session = session();
        session.select_tab("ai_champions").unwrap();

        let mut records = sample_records();
        records.adoption_customers.truncate(2);

        let view = session.replace_records(records).unwrap();
        assert_eq!(view.tab, Tab::AiChampions);
        match &view.charts[0] {
            crate::domain::render_model::Chart::GroupedBar { data, .. } => {
                assert_eq!(data.points.len(), 2)
            }
            other => panic!("expected scorecard, got {:?}", other),
        }
    }
}
