// Customer record domain models
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::metrics::DomainError;

/// Upper bound of the feature satisfaction scale.
pub const SATISFACTION_MAX: f64 = 5.0;

/// A record that failed validation at the input boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{entity}: field `{field}` has invalid value {value}")]
    InvalidField {
        entity: String,
        field: &'static str,
        value: String,
    },

    #[error("duplicate {collection} key: {key}")]
    DuplicateKey {
        collection: &'static str,
        key: String,
    },
}

impl ValidationError {
    pub fn invalid(entity: &str, field: &'static str, value: impl fmt::Display) -> Self {
        ValidationError::InvalidField {
            entity: entity.to_string(),
            field,
            value: value.to_string(),
        }
    }
}

fn check_percent(entity: &str, field: &'static str, value: u8) -> Result<(), ValidationError> {
    if value > 100 {
        return Err(ValidationError::invalid(entity, field, value));
    }
    Ok(())
}

fn check_seats(entity: &str, seats: u32) -> Result<(), ValidationError> {
    if seats == 0 {
        return Err(ValidationError::invalid(entity, "seats", seats));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RetentionRisk {
    Low,
    Medium,
    High,
}

impl RetentionRisk {
    pub const ALL: [RetentionRisk; 3] =
        [RetentionRisk::Low, RetentionRisk::Medium, RetentionRisk::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            RetentionRisk::Low => "Low",
            RetentionRisk::Medium => "Medium",
            RetentionRisk::High => "High",
        }
    }
}

impl fmt::Display for RetentionRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RetentionRisk {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(RetentionRisk::Low),
            "Medium" => Ok(RetentionRisk::Medium),
            "High" => Ok(RetentionRisk::High),
            other => Err(DomainError::UnknownRiskTier(other.to_string())),
        }
    }
}

/// Customer ranked by AI feature engagement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdoptionCustomer {
    pub company: String,
    pub arr: u64,
    pub ai_adoption: u8,
    pub ai_tickets_pct: u8,
    pub seats: u32,
    pub industry: String,
}

impl AdoptionCustomer {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_percent(&self.company, "ai_adoption", self.ai_adoption)?;
        check_percent(&self.company, "ai_tickets_pct", self.ai_tickets_pct)?;
        check_seats(&self.company, self.seats)
    }
}

/// Customer qualified (or being qualified) for testimonials and case studies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceCustomer {
    pub company: String,
    pub arr: u64,
    pub seats: u32,
    pub health: u8,
    pub retention_risk: RetentionRisk,
    pub testimonial_ready: bool,
    pub case_study: bool,
    pub industry: String,
    pub monthly_engagement: u8,
}

impl ReferenceCustomer {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_percent(&self.company, "health", self.health)?;
        check_percent(&self.company, "monthly_engagement", self.monthly_engagement)?;
        check_seats(&self.company, self.seats)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub month: String,
    pub adoption_rate: u8,
    pub tickets_resolved: u64,
}

impl TrendPoint {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_percent(&self.month, "adoption_rate", self.adoption_rate)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureUsagePoint {
    pub feature: String,
    pub usage: u8,
    pub satisfaction: f64,
}

impl FeatureUsagePoint {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_percent(&self.feature, "usage", self.usage)?;
        let in_scale = (0.0..=SATISFACTION_MAX).contains(&self.satisfaction);
        if !self.satisfaction.is_finite() || !in_scale {
            return Err(ValidationError::invalid(&self.feature, "satisfaction", self.satisfaction));
        }
        Ok(())
    }
}

/// Every collection the dashboard renders, loaded together and replaced together.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardRecords {
    pub adoption_customers: Vec<AdoptionCustomer>,
    pub reference_customers: Vec<ReferenceCustomer>,
    pub adoption_trend: Vec<TrendPoint>,
    pub feature_usage: Vec<FeatureUsagePoint>,
}

impl DashboardRecords {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for customer in &self.adoption_customers {
            customer.validate()?;
        }
        for customer in &self.reference_customers {
            customer.validate()?;
        }
        for point in &self.adoption_trend {
            point.validate()?;
        }
        for point in &self.feature_usage {
            point.validate()?;
        }

        let adoption = self.adoption_customers.iter().map(|c| c.company.as_str());
        unique_keys("adoption customer", adoption)?;
        let references = self.reference_customers.iter().map(|c| c.company.as_str());
        unique_keys("reference customer", references)?;
        unique_keys("feature", self.feature_usage.iter().map(|p| p.feature.as_str()))
    }
}

fn unique_keys<'a>(
    collection: &'static str,
    keys: impl Iterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(ValidationError::DuplicateKey {
                collection,
                key: key.to_string(),
            });
        }
    }
    Ok(())
}
