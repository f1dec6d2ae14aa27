// JSON file record source
use crate::application::record_source::{RecordSource, SourceError};
use crate::domain::records::{
    AdoptionCustomer, DashboardRecords, FeatureUsagePoint, ReferenceCustomer, RetentionRisk,
    TrendPoint, ValidationError,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

// Wire rows keep numbers signed so negative values can be reported by field
// instead of failing as an opaque parse error.
#[derive(Debug, Deserialize)]
struct RecordDocument {
    #[serde(default)]
    adoption_customers: Vec<AdoptionRow>,
    #[serde(default)]
    reference_customers: Vec<ReferenceRow>,
    #[serde(default)]
    adoption_trend: Vec<TrendRow>,
    #[serde(default)]
    feature_usage: Vec<FeatureRow>,
}

#[derive(Debug, Deserialize)]
struct AdoptionRow {
    company: String,
    arr: i64,
    ai_adoption: i64,
    ai_tickets_pct: i64,
    seats: i64,
    industry: String,
}

#[derive(Debug, Deserialize)]
struct ReferenceRow {
    company: String,
    arr: i64,
    seats: i64,
    health: i64,
    retention_risk: String,
    testimonial_ready: bool,
    case_study: bool,
    industry: String,
    monthly_engagement: i64,
}

#[derive(Debug, Deserialize)]
struct TrendRow {
    month: String,
    adoption_rate: i64,
    tickets_resolved: i64,
}

#[derive(Debug, Deserialize)]
struct FeatureRow {
    feature: String,
    usage: i64,
    satisfaction: f64,
}

fn unsigned<T: TryFrom<i64>>(
    entity: &str,
    field: &'static str,
    value: i64,
) -> Result<T, ValidationError> {
    T::try_from(value).map_err(|_| ValidationError::invalid(entity, field, value))
}

impl TryFrom<AdoptionRow> for AdoptionCustomer {
    type Error = ValidationError;

    fn try_from(row: AdoptionRow) -> Result<Self, Self::Error> {
        let key = row.company.as_str();
        Ok(AdoptionCustomer {
            arr: unsigned(key, "arr", row.arr)?,
            ai_adoption: unsigned(key, "ai_adoption", row.ai_adoption)?,
            ai_tickets_pct: unsigned(key, "ai_tickets_pct", row.ai_tickets_pct)?,
            seats: unsigned(key, "seats", row.seats)?,
            industry: row.industry,
            company: row.company,
        })
    }
}

impl TryFrom<ReferenceRow> for ReferenceCustomer {
    type Error = ValidationError;

    fn try_from(row: ReferenceRow) -> Result<Self, Self::Error> {
        let key = row.company.as_str();
        let retention_risk = row
            .retention_risk
            .parse::<RetentionRisk>()
            .map_err(|_| ValidationError::invalid(key, "retention_risk", &row.retention_risk))?;

        Ok(ReferenceCustomer {
            arr: unsigned(key, "arr", row.arr)?,
            seats: unsigned(key, "seats", row.seats)?,
            health: unsigned(key, "health", row.health)?,
            monthly_engagement: unsigned(key, "monthly_engagement", row.monthly_engagement)?,
            retention_risk,
            testimonial_ready: row.testimonial_ready,
            case_study: row.case_study,
            industry: row.industry,
            company: row.company,
        })
    }
}

impl TryFrom<TrendRow> for TrendPoint {
    type Error = ValidationError;

    fn try_from(row: TrendRow) -> Result<Self, Self::Error> {
        let key = row.month.as_str();
        Ok(TrendPoint {
            adoption_rate: unsigned(key, "adoption_rate", row.adoption_rate)?,
            tickets_resolved: unsigned(key, "tickets_resolved", row.tickets_resolved)?,
            month: row.month,
        })
    }
}

impl TryFrom<FeatureRow> for FeatureUsagePoint {
    type Error = ValidationError;

    fn try_from(row: FeatureRow) -> Result<Self, Self::Error> {
        Ok(FeatureUsagePoint {
            usage: unsigned(&row.feature, "usage", row.usage)?,
            satisfaction: row.satisfaction,
            feature: row.feature,
        })
    }
}

fn convert<R, T>(rows: Vec<R>) -> Result<Vec<T>, ValidationError>
where
    T: TryFrom<R, Error = ValidationError>,
{
    rows.into_iter().map(T::try_from).collect()
}

/// Parse and validate a record document.
pub fn parse_records(json: &str) -> Result<DashboardRecords, SourceError> {
    let doc: RecordDocument = serde_json::from_str(json)?;

    let records = DashboardRecords {
        adoption_customers: convert(doc.adoption_customers)?,
        reference_customers: convert(doc.reference_customers)?,
        adoption_trend: convert(doc.adoption_trend)?,
        feature_usage: convert(doc.feature_usage)?,
    };
    records.validate()?;

    Ok(records)
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSource for JsonFileSource {
    async fn load(&self) -> Result<DashboardRecords, SourceError> {
        tracing::debug!("Loading dashboard records from {}", self.path.display());

        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.display().to_string(),
                source,
            })?;

        let records = parse_records(&json)?;
        tracing::debug!(
            "Loaded {} adoption customers, {} reference customers from {}",
            records.adoption_customers.len(),
            records.reference_customers.len(),
            self.path.display()
        );
        Ok(records)
    }
}
