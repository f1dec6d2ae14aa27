// Embedded sample records
use crate::application::record_source::{RecordSource, SourceError};
use crate::domain::records::{
    AdoptionCustomer, DashboardRecords, FeatureUsagePoint, ReferenceCustomer, RetentionRisk,
    TrendPoint,
};
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct FixtureSource;

#[async_trait]
impl RecordSource for FixtureSource {
    async fn load(&self) -> Result<DashboardRecords, SourceError> {
        let records = sample_records();
        records.validate()?;
        Ok(records)
    }
}

fn adoption(
    company: &str,
    arr: u64,
    ai_adoption: u8,
    ai_tickets_pct: u8,
    seats: u32,
    industry: &str,
) -> AdoptionCustomer {
    AdoptionCustomer {
        company: company.to_string(),
        arr,
        ai_adoption,
        ai_tickets_pct,
        seats,
        industry: industry.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn reference(
    company: &str,
    arr: u64,
    seats: u32,
    health: u8,
    retention_risk: RetentionRisk,
    testimonial_ready: bool,
    case_study: bool,
    industry: &str,
    monthly_engagement: u8,
) -> ReferenceCustomer {
    ReferenceCustomer {
        company: company.to_string(),
        arr,
        seats,
        health,
        retention_risk,
        testimonial_ready,
        case_study,
        industry: industry.to_string(),
        monthly_engagement,
    }
}

fn trend(month: &str, adoption_rate: u8, tickets_resolved: u64) -> TrendPoint {
    TrendPoint {
        month: month.to_string(),
        adoption_rate,
        tickets_resolved,
    }
}

fn feature(feature: &str, usage: u8, satisfaction: f64) -> FeatureUsagePoint {
    FeatureUsagePoint {
        feature: feature.to_string(),
        usage,
        satisfaction,
    }
}

pub fn sample_records() -> DashboardRecords {
    use RetentionRisk::*;

    DashboardRecords {
        adoption_customers: vec![
            adoption("TechCorp Global", 250_000, 95, 78, 45, "SaaS"),
            adoption("FinServe Inc", 180_000, 87, 72, 32, "Finance"),
            adoption("CloudScale Systems", 150_000, 92, 85, 28, "Cloud"),
            adoption("DataStream Co", 200_000, 88, 68, 38, "Analytics"),
            adoption("NextGen Platform", 175_000, 81, 61, 25, "SaaS"),
        ],
        reference_customers: vec![
            reference("TechCorp Global", 250_000, 45, 95, Low, true, true, "SaaS", 98),
            reference("CloudScale Systems", 150_000, 28, 93, Low, true, true, "Cloud", 96),
            reference("FinServe Inc", 180_000, 32, 91, Low, false, false, "Finance", 94),
            reference("DataStream Co", 200_000, 38, 89, Medium, true, true, "Analytics", 88),
            reference("EnterpriseFlow", 220_000, 42, 87, Low, true, false, "Workflows", 92),
        ],
        adoption_trend: vec![
            trend("Jan", 45, 1200),
            trend("Feb", 52, 1450),
            trend("Mar", 58, 1680),
            trend("Apr", 65, 1920),
            trend("May", 71, 2150),
            trend("Jun", 78, 2380),
        ],
        feature_usage: vec![
            feature("Auto-Reply", 92, 4.8),
            feature("AI Routing", 87, 4.6),
            feature("Sentiment Analysis", 73, 4.4),
            feature("Smart Search", 81, 4.7),
            feature("Content Suggestions", 68, 4.3),
            feature("Runbook Automation", 59, 4.5),
        ],
    }
}
