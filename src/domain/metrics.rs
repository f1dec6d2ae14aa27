// Derived metrics: display formatting, tier classification and chart series shaping
use serde::Serialize;
use std::fmt;

use super::records::{
    AdoptionCustomer, FeatureUsagePoint, ReferenceCustomer, RetentionRisk, TrendPoint,
    SATISFACTION_MAX,
};
use super::render_model::{
    CategoryPoint, ChartSeries, RiskSlice, ScatterPoint, ScatterTooltip, SeriesInfo,
};

/// Health scores at or above this value are in the strong tier.
pub const STRONG_HEALTH_THRESHOLD: u8 = 90;

pub const READY: &str = "Ready";
pub const NOT_READY: &str = "Not Ready";

/// A value handed to the engine that lies outside its documented domain.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("{entity}: field `{field}` out of range: {value}")]
    OutOfRange {
        entity: String,
        field: &'static str,
        value: String,
    },

    #[error("unknown retention risk tier: {0}")]
    UnknownRiskTier(String),

    #[error("{0} is empty")]
    EmptyCollection(&'static str),
}

impl DomainError {
    fn out_of_range(entity: &str, field: &'static str, value: impl fmt::Display) -> Self {
        DomainError::OutOfRange {
            entity: entity.to_string(),
            field,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthTier {
    Strong,
    Watch,
}

/// Style token for a retention-risk badge. The renderer owns the colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskBadge {
    #[serde(rename = "style-low")]
    Low,
    #[serde(rename = "style-medium")]
    Medium,
    #[serde(rename = "style-high")]
    High,
}

impl From<RetentionRisk> for RiskBadge {
    fn from(risk: RetentionRisk) -> Self {
        match risk {
            RetentionRisk::Low => RiskBadge::Low,
            RetentionRisk::Medium => RiskBadge::Medium,
            RetentionRisk::High => RiskBadge::High,
        }
    }
}

pub fn check_percent(entity: &str, field: &'static str, value: u8) -> Result<(), DomainError> {
    if value > 100 {
        return Err(DomainError::out_of_range(entity, field, value));
    }
    Ok(())
}

pub fn check_seats(entity: &str, seats: u32) -> Result<(), DomainError> {
    if seats == 0 {
        return Err(DomainError::out_of_range(entity, "seats", seats));
    }
    Ok(())
}

/// `numerator / denominator` rounded to the nearest integer, halves rounding up.
fn div_round_half_up(numerator: u64, denominator: u64) -> u64 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder * 2 >= denominator {
        quotient + 1
    } else {
        quotient
    }
}

/// Render an amount in thousands, e.g. 250000 -> "$250K". Halves round up,
/// so 500 -> "$1K" and 499 -> "$0K".
pub fn format_currency_abbrev(amount: u64) -> String {
    format!("${}K", div_round_half_up(amount, 1000))
}

pub fn format_percent(value: u8) -> String {
    format!("{}%", value)
}

pub fn classify_health(score: u8) -> Result<HealthTier, DomainError> {
    health_tier("health score", score)
}

fn health_tier(entity: &str, score: u8) -> Result<HealthTier, DomainError> {
    check_percent(entity, "health", score)?;
    if score >= STRONG_HEALTH_THRESHOLD {
        Ok(HealthTier::Strong)
    } else {
        Ok(HealthTier::Watch)
    }
}

pub fn classify_customer_health(customer: &ReferenceCustomer) -> Result<HealthTier, DomainError> {
    health_tier(&customer.company, customer.health)
}

/// Map a retention-risk label to its badge. Labels other than Low, Medium
/// and High are rejected.
pub fn risk_badge(retention_risk: &str) -> Result<RiskBadge, DomainError> {
    let risk = retention_risk.parse::<RetentionRisk>()?;
    Ok(RiskBadge::from(risk))
}

pub fn readiness_label(flag: bool) -> &'static str {
    if flag { READY } else { NOT_READY }
}

/// Integer mean of percentage values, halves rounding up.
pub fn mean_percent(collection: &'static str, values: &[u8]) -> Result<u8, DomainError> {
    if values.is_empty() {
        return Err(DomainError::EmptyCollection(collection));
    }
    let sum: u64 = values.iter().map(|v| u64::from(*v)).sum();
    let mean = div_round_half_up(sum, values.len() as u64) as u8;
    check_percent(collection, "mean", mean)?;
    Ok(mean)
}

/// `part` as an integer percentage of `total`, halves rounding up.
pub fn percent_of(collection: &'static str, part: usize, total: usize) -> Result<u8, DomainError> {
    if total == 0 {
        return Err(DomainError::EmptyCollection(collection));
    }
    if part > total {
        return Err(DomainError::out_of_range(collection, "part", part));
    }
    Ok(div_round_half_up(part as u64 * 100, total as u64) as u8)
}

/// Adoption-rate change between the last two trend points.
pub fn trend_delta(points: &[TrendPoint]) -> Option<i64> {
    match points {
        [.., previous, latest] => {
            Some(i64::from(latest.adoption_rate) - i64::from(previous.adoption_rate))
        }
        _ => None,
    }
}

/// Share of customers per retention-risk tier, always Low, Medium, High.
///
/// Each share is rounded half up on its own. Whatever remainder keeps the
/// shares from totalling 100 is added to the tier with the most customers
/// (the earliest tier wins a tie), so the output sums to exactly 100.
pub fn aggregate_risk_distribution(
    customers: &[ReferenceCustomer],
) -> Result<Vec<RiskSlice>, DomainError> {
    if customers.is_empty() {
        return Err(DomainError::EmptyCollection("reference customers"));
    }

    let total = customers.len() as u64;
    let mut counts = [0u64; 3];
    for customer in customers {
        let idx = match customer.retention_risk {
            RetentionRisk::Low => 0,
            RetentionRisk::Medium => 1,
            RetentionRisk::High => 2,
        };
        counts[idx] += 1;
    }

    let mut shares: [i64; 3] = counts.map(|count| div_round_half_up(count * 100, total) as i64);

    let mut largest = 0;
    for idx in 1..counts.len() {
        if counts[idx] > counts[largest] {
            largest = idx;
        }
    }
    let remainder = 100 - shares.iter().sum::<i64>();
    shares[largest] += remainder;

    if remainder != 0 {
        tracing::debug!(
            "Adjusted {} risk share by {} to keep distribution at 100",
            RetentionRisk::ALL[largest],
            remainder
        );
    }

    Ok(RetentionRisk::ALL
        .into_iter()
        .zip(shares)
        .map(|(tier, value)| RiskSlice {
            name: format!("{} Risk", tier),
            tier,
            value: value as u8,
            style: RiskBadge::from(tier),
        })
        .collect())
}

/// Grouped-bar data: AI adoption and AI-resolved ticket share per company,
/// in input order.
pub fn build_adoption_scorecard(
    customers: &[AdoptionCustomer],
) -> Result<ChartSeries, DomainError> {
    let points = customers
        .iter()
        .map(|c| {
            check_percent(&c.company, "ai_adoption", c.ai_adoption)?;
            check_percent(&c.company, "ai_tickets_pct", c.ai_tickets_pct)?;
            Ok(CategoryPoint {
                category: c.company.clone(),
                values: vec![f64::from(c.ai_adoption), f64::from(c.ai_tickets_pct)],
            })
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    Ok(ChartSeries::new(
        "company",
        vec![
            SeriesInfo::new("ai_adoption", "AI Adoption (%)"),
            SeriesInfo::new("ai_tickets_pct", "AI-Resolved Tickets (%)"),
        ],
        points,
    ))
}

/// Line data for the adoption trend. Input order is trusted to be
/// chronological and is kept as-is.
pub fn build_trend_series(points: &[TrendPoint]) -> Result<ChartSeries, DomainError> {
    let points = points
        .iter()
        .map(|p| {
            check_percent(&p.month, "adoption_rate", p.adoption_rate)?;
            Ok(CategoryPoint {
                category: p.month.clone(),
                values: vec![f64::from(p.adoption_rate), p.tickets_resolved as f64],
            })
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    Ok(ChartSeries::new(
        "month",
        vec![
            SeriesInfo::new("adoption_rate", "Adoption Rate (%)"),
            SeriesInfo::new("tickets_resolved", "Tickets Resolved"),
        ],
        points,
    ))
}

pub fn build_feature_usage_series(
    points: &[FeatureUsagePoint],
) -> Result<ChartSeries, DomainError> {
    let points = points
        .iter()
        .map(|p| {
            check_percent(&p.feature, "usage", p.usage)?;
            let in_scale = (0.0..=SATISFACTION_MAX).contains(&p.satisfaction);
            if !p.satisfaction.is_finite() || !in_scale {
                let value = p.satisfaction;
                return Err(DomainError::out_of_range(&p.feature, "satisfaction", value));
            }
            Ok(CategoryPoint {
                category: p.feature.clone(),
                values: vec![f64::from(p.usage), p.satisfaction],
            })
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    Ok(ChartSeries::new(
        "feature",
        vec![
            SeriesInfo::new("usage", "Usage (%)"),
            SeriesInfo::new("satisfaction", "Satisfaction (NPS)"),
        ],
        points,
    ))
}

/// ARR on x, health on y, seats as bubble size.
pub fn build_health_scatter(
    customers: &[ReferenceCustomer],
) -> Result<Vec<ScatterPoint>, DomainError> {
    customers
        .iter()
        .map(|c| {
            check_percent(&c.company, "health", c.health)?;
            check_seats(&c.company, c.seats)?;
            Ok(ScatterPoint {
                x: c.arr,
                y: c.health,
                size: c.seats,
                tooltip: ScatterTooltip {
                    company: c.company.clone(),
                    arr: format_currency_abbrev(c.arr),
                    health: format_percent(c.health),
                    seats: c.seats.to_string(),
                },
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reference(company: &str, risk: RetentionRisk) -> ReferenceCustomer {
        ReferenceCustomer {
            company: company.to_string(),
            arr: 120_000,
            seats: 20,
            health: 90,
            retention_risk: risk,
            testimonial_ready: true,
            case_study: false,
            industry: "SaaS".to_string(),
            monthly_engagement: 90,
        }
    }

    fn with_risks(risks: &[RetentionRisk]) -> Vec<ReferenceCustomer> {
        risks
            .iter()
            .enumerate()
            .map(|(i, risk)| reference(&format!("Customer {}", i), *risk))
            .collect()
    }

    fn values(slices: &[RiskSlice]) -> Vec<u8> {
        slices.iter().map(|s| s.value).collect()
    }

    #[test]
    fn test_currency_abbrev() {
        assert_eq!(format_currency_abbrev(250_000), "$250K");
        assert_eq!(format_currency_abbrev(999), "$1K");
        assert_eq!(format_currency_abbrev(0), "$0K");
    }

    #[test]
    fn test_currency_rounds_half_up() {
        assert_eq!(format_currency_abbrev(500), "$1K");
        assert_eq!(format_currency_abbrev(499), "$0K");
        assert_eq!(format_currency_abbrev(1_500), "$2K");
        assert_eq!(format_currency_abbrev(2_500), "$3K");
        assert_eq!(format_currency_abbrev(u64::MAX), format!("${}K", u64::MAX / 1000 + 1));
    }

    #[test]
    fn test_health_threshold_is_inclusive() {
        assert_eq!(classify_health(90).unwrap(), HealthTier::Strong);
        assert_eq!(classify_health(89).unwrap(), HealthTier::Watch);
        assert_eq!(classify_health(100).unwrap(), HealthTier::Strong);
        assert!(matches!(
            classify_health(101),
            Err(DomainError::OutOfRange { field: "health", .. })
        ));
    }

    #[test]
    fn test_risk_badge() {
        assert_eq!(risk_badge("Low").unwrap(), RiskBadge::Low);
        assert_eq!(risk_badge("Medium").unwrap(), RiskBadge::Medium);
        assert_eq!(risk_badge("High").unwrap(), RiskBadge::High);
        assert_eq!(
            risk_badge("Unknown").unwrap_err(),
            DomainError::UnknownRiskTier("Unknown".to_string())
        );
    }

    #[test]
    fn test_readiness_label() {
        assert_eq!(readiness_label(true), "Ready");
        assert_eq!(readiness_label(false), "Not Ready");
    }

    #[test]
    fn test_risk_distribution_exact_shares() {
        use RetentionRisk::*;
        let customers = with_risks(&[Low, Low, Medium, Low, Low]);
        let slices = aggregate_risk_distribution(&customers).unwrap();
        assert_eq!(values(&slices), vec![80, 20, 0]);
        assert_eq!(slices[0].name, "Low Risk");
        assert_eq!(slices[2].style, RiskBadge::High);
    }

    #[test]
    fn test_risk_distribution_rounding_down_adjusts_largest() {
        use RetentionRisk::*;
        // 33.3 each rounds to 99 total; the tie goes to Low.
        let slices = aggregate_risk_distribution(&with_risks(&[Low, Medium, High])).unwrap();
        assert_eq!(values(&slices), vec![34, 33, 33]);
    }

    #[test]
    fn test_risk_distribution_rounding_up_adjusts_largest() {
        use RetentionRisk::*;
        // 12.5 / 12.5 / 75 rounds to 13 / 13 / 75 = 101.
        let customers = with_risks(&[Low, Medium, High, High, High, High, High, High]);
        let slices = aggregate_risk_distribution(&customers).unwrap();
        assert_eq!(values(&slices), vec![13, 13, 74]);
    }

    #[test]
    fn test_risk_distribution_empty() {
        assert_eq!(
            aggregate_risk_distribution(&[]).unwrap_err(),
            DomainError::EmptyCollection("reference customers")
        );
    }

    proptest! {
        #[test]
        fn risk_distribution_always_sums_to_100(
            tiers in proptest::collection::vec(0usize..3, 1..300)
        ) {
            let risks: Vec<RetentionRisk> = tiers.iter().map(|t| RetentionRisk::ALL[*t]).collect();
            let slices = aggregate_risk_distribution(&with_risks(&risks)).unwrap();
            prop_assert_eq!(slices.len(), 3);
            prop_assert_eq!(slices.iter().map(|s| u32::from(s.value)).sum::<u32>(), 100);
        }
    }

    #[test]
    fn test_trend_series_preserves_order() {
        let months = ["Mar", "Jan", "Feb", "Feb", "Jun", "Apr"];
        let points: Vec<TrendPoint> = months
            .iter()
            .enumerate()
            .map(|(i, m)| TrendPoint {
                month: m.to_string(),
                adoption_rate: 40 + i as u8,
                tickets_resolved: 1000,
            })
            .collect();

        let series = build_trend_series(&points).unwrap();
        assert_eq!(series.points.len(), 6);
        assert_eq!(series.categories(), months.to_vec());
        assert_eq!(series.points[4].values, vec![44.0, 1000.0]);
    }

    #[test]
    fn test_scorecard_rejects_out_of_range() {
        let customers = vec![AdoptionCustomer {
            company: "Acme".to_string(),
            arr: 1,
            ai_adoption: 120,
            ai_tickets_pct: 10,
            seats: 1,
            industry: "SaaS".to_string(),
        }];

        let err = build_adoption_scorecard(&customers).unwrap_err();
        assert_eq!(err.to_string(), "Acme: field `ai_adoption` out of range: 120");
    }

    #[test]
    fn test_health_scatter_tooltip() {
        let customer = reference("TechCorp Global", RetentionRisk::Low);
        let points = build_health_scatter(&[customer]).unwrap();
        assert_eq!(points[0].x, 120_000);
        assert_eq!(points[0].y, 90);
        assert_eq!(points[0].size, 20);
        assert_eq!(points[0].tooltip.arr, "$120K");
        assert_eq!(points[0].tooltip.health, "90%");
    }

    #[test]
    fn test_health_scatter_rejects_zero_seats() {
        let mut customer = reference("TechCorp Global", RetentionRisk::Low);
        customer.seats = 0;

        let err = build_health_scatter(&[customer]).unwrap_err();
        assert_eq!(err.to_string(), "TechCorp Global: field `seats` out of range: 0");
    }

    #[test]
    fn test_feature_series_labels_satisfaction_as_nps() {
        let points = vec![FeatureUsagePoint {
            feature: "AI Triage".to_string(),
            usage: 90,
            satisfaction: 4.6,
        }];

        let series = build_feature_usage_series(&points).unwrap();
        let names: Vec<&str> = series.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names[1], "Satisfaction (NPS)");
    }

    #[test]
    fn test_mean_and_share() {
        assert_eq!(mean_percent("adoption", &[95, 87, 92, 88, 81]).unwrap(), 89);
        assert_eq!(percent_of("references", 3, 5).unwrap(), 60);
        assert_eq!(percent_of("references", 1, 8).unwrap(), 13);
        assert!(mean_percent("adoption", &[]).is_err());
        assert!(percent_of("references", 0, 0).is_err());
    }

    #[test]
    fn test_trend_delta() {
        let point = |rate| TrendPoint {
            month: "M".to_string(),
            adoption_rate: rate,
            tickets_resolved: 0,
        };
        assert_eq!(trend_delta(&[point(71), point(78)]), Some(7));
        assert_eq!(trend_delta(&[point(50), point(40)]), Some(-10));
        assert_eq!(trend_delta(&[point(71)]), None);
    }
}
