// View composer - Selects the charts and tables each tab renders
use crate::domain::metrics::{
    aggregate_risk_distribution, build_adoption_scorecard, build_feature_usage_series,
    build_health_scatter, build_trend_series, check_percent, check_seats, classify_customer_health,
    classify_health, format_currency_abbrev, format_percent, mean_percent, percent_of,
    readiness_label, risk_badge, trend_delta, DomainError, HealthTier,
};
use crate::domain::navigation::Tab;
use crate::domain::records::{AdoptionCustomer, DashboardRecords, ReferenceCustomer};
use crate::domain::render_model::{AdoptionRow, Chart, KpiTile, ReferenceRow, Table, View};

pub const DEFAULT_AI_USAGE_THRESHOLD: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposerSettings {
    /// Minimum ai_adoption for a customer to count as an enterprise AI user.
    pub ai_usage_threshold: u8,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self {
            ai_usage_threshold: DEFAULT_AI_USAGE_THRESHOLD,
        }
    }
}

pub fn compose_view(
    tab: Tab,
    records: &DashboardRecords,
    settings: &ComposerSettings,
) -> Result<View, DomainError> {
    match tab {
        Tab::Overview => overview(records, settings),
        Tab::AiChampions => ai_champions(records),
        Tab::References => references(records),
    }
}

fn overview(records: &DashboardRecords, settings: &ComposerSettings) -> Result<View, DomainError> {
    let kpis = overview_kpis(records, settings)?;

    let charts = vec![
        Chart::Line {
            id: "ai_adoption_trend".to_string(),
            title: "AI Adoption Trend".to_string(),
            data: build_trend_series(&records.adoption_trend)?,
        },
        Chart::Pie {
            id: "retention_risk".to_string(),
            title: "Retention Risk Profile".to_string(),
            slices: aggregate_risk_distribution(&records.reference_customers)?,
        },
        Chart::GroupedBar {
            id: "feature_usage".to_string(),
            title: "AI Feature Adoption & Satisfaction".to_string(),
            data: build_feature_usage_series(&records.feature_usage)?,
        },
    ];

    Ok(View {
        tab: Tab::Overview,
        heading: "Customer Success Overview".to_string(),
        subheading: "AI Feature Adoption & Reference Customer Intelligence".to_string(),
        kpis,
        charts,
        tables: Vec::new(),
    })
}

fn overview_kpis(
    records: &DashboardRecords,
    settings: &ComposerSettings,
) -> Result<Vec<KpiTile>, DomainError> {
    let adoption = records
        .adoption_customers
        .iter()
        .map(|c| {
            check_percent(&c.company, "ai_adoption", c.ai_adoption)?;
            Ok(c.ai_adoption)
        })
        .collect::<Result<Vec<u8>, DomainError>>()?;
    let avg_adoption = mean_percent("adoption customers", &adoption)?;

    let ai_users = adoption
        .iter()
        .filter(|a| **a >= settings.ai_usage_threshold)
        .count();

    let references = &records.reference_customers;
    let ready = references.iter().filter(|c| c.testimonial_ready).count();

    let mut strong = 0;
    for customer in references {
        if classify_customer_health(customer)? == HealthTier::Strong {
            strong += 1;
        }
    }
    let success_rate = percent_of("reference customers", strong, references.len())?;

    Ok(vec![
        KpiTile::new(
            "avg_ai_adoption",
            "Avg AI Adoption Rate",
            format_percent(avg_adoption),
            trend_delta(&records.adoption_trend),
        ),
        KpiTile::new("enterprise_ai_users", "Enterprise AI Users", ai_users.to_string(), None),
        KpiTile::new("ready_references", "Ready References", ready.to_string(), None),
        KpiTile::new(
            "reference_success_rate",
            "Reference Success Rate",
            format_percent(success_rate),
            None,
        ),
    ])
}

fn ai_champions(records: &DashboardRecords) -> Result<View, DomainError> {
    Ok(View {
        tab: Tab::AiChampions,
        heading: "Top Enterprise AI Adopters".to_string(),
        subheading: "Identifying customers with highest AI feature engagement and revenue impact"
            .to_string(),
        kpis: Vec::new(),
        charts: vec![Chart::GroupedBar {
            id: "ai_adoption_scorecard".to_string(),
            title: "AI Adoption Scorecard".to_string(),
            data: build_adoption_scorecard(&records.adoption_customers)?,
        }],
        tables: vec![adoption_table(&records.adoption_customers)?],
    })
}

fn references(records: &DashboardRecords) -> Result<View, DomainError> {
    Ok(View {
        tab: Tab::References,
        heading: "Reference Customer Intelligence".to_string(),
        subheading:
            "Enterprise customers qualified for case studies, testimonials, and deal acceleration"
                .to_string(),
        kpis: Vec::new(),
        charts: vec![Chart::Scatter {
            id: "arr_vs_health".to_string(),
            title: "ARR vs Health Score (Bubble size = Seats)".to_string(),
            points: build_health_scatter(&records.reference_customers)?,
        }],
        tables: vec![reference_table(&records.reference_customers)?],
    })
}

/// Rows keep the input order.
pub fn adoption_table(customers: &[AdoptionCustomer]) -> Result<Table, DomainError> {
    let rows = customers
        .iter()
        .map(|c| {
            check_percent(&c.company, "ai_adoption", c.ai_adoption)?;
            check_percent(&c.company, "ai_tickets_pct", c.ai_tickets_pct)?;
            check_seats(&c.company, c.seats)?;
            Ok(AdoptionRow {
                company: c.company.clone(),
                arr: format_currency_abbrev(c.arr),
                ai_adoption: format_percent(c.ai_adoption),
                ai_tickets_pct: format_percent(c.ai_tickets_pct),
                seats: c.seats.to_string(),
                industry: c.industry.clone(),
            })
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    Ok(Table::Adoption {
        columns: vec!["Company", "ARR", "AI Adoption", "AI Tickets %", "Seats", "Industry"],
        rows,
    })
}

pub fn reference_table(customers: &[ReferenceCustomer]) -> Result<Table, DomainError> {
    let rows = customers
        .iter()
        .map(|c| {
            check_percent(&c.company, "health", c.health)?;
            check_percent(&c.company, "monthly_engagement", c.monthly_engagement)?;
            check_seats(&c.company, c.seats)?;
            Ok(ReferenceRow {
                company: c.company.clone(),
                arr: format_currency_abbrev(c.arr),
                health: format_percent(c.health),
                health_tier: classify_health(c.health)?,
                engagement: format_percent(c.monthly_engagement),
                testimonial: readiness_label(c.testimonial_ready),
                case_study: readiness_label(c.case_study),
                risk: c.retention_risk,
                risk_badge: risk_badge(c.retention_risk.as_str())?,
            })
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    Ok(Table::References {
        columns: vec![
            "Company",
            "ARR",
            "Health",
            "Engagement",
            "Testimonial",
            "Case Study",
            "Risk",
        ],
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metrics::RiskBadge;
    use crate::infrastructure::fixtures::sample_records;

    fn compose(tab: Tab) -> View {
        compose_view(tab, &sample_records(), &ComposerSettings::default()).unwrap()
    }

    #[test]
    fn test_overview_bundle() {
        let view = compose(Tab::Overview);

        let kpis: Vec<(&str, &str)> = view
            .kpis
            .iter()
            .map(|k| (k.id.as_str(), k.value.as_str()))
            .collect();
        assert_eq!(
            kpis,
            vec![
                ("avg_ai_adoption", "89%"),
                ("enterprise_ai_users", "5"),
                ("ready_references", "4"),
                ("reference_success_rate", "60%"),
            ]
        );
        assert_eq!(view.kpis[0].change, Some(7));

        let ids: Vec<&str> = view.charts.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["ai_adoption_trend", "retention_risk", "feature_usage"]);
        assert!(view.tables.is_empty());

        match &view.charts[1] {
            Chart::Pie { slices, .. } => {
                let values: Vec<u8> = slices.iter().map(|s| s.value).collect();
                assert_eq!(values, vec![80, 20, 0]);
            }
            other => panic!("expected pie chart, got {:?}", other),
        }
    }

    #[test]
    fn test_ai_usage_threshold_is_configurable() {
        let settings = ComposerSettings {
            ai_usage_threshold: 90,
        };
        let view = compose_view(Tab::Overview, &sample_records(), &settings).unwrap();
        assert_eq!(view.kpis[1].value, "2");
    }

    #[test]
    fn test_ai_champions_bundle() {
        let view = compose(Tab::AiChampions);
        assert!(view.kpis.is_empty());
        assert_eq!(view.charts.len(), 1);

        match &view.tables[0] {
            Table::Adoption { columns, rows } => {
                assert_eq!(columns.len(), 6);
                assert_eq!(rows.len(), 5);
                assert_eq!(rows[0].company, "TechCorp Global");
                assert_eq!(rows[0].arr, "$250K");
                assert_eq!(rows[0].ai_adoption, "95%");
                assert_eq!(rows[4].company, "NextGen Platform");
            }
            other => panic!("expected adoption table, got {:?}", other),
        }
    }

    #[test]
    fn test_references_bundle() {
        let view = compose(Tab::References);

        match &view.charts[0] {
            Chart::Scatter { points, .. } => assert_eq!(points.len(), 5),
            other => panic!("expected scatter chart, got {:?}", other),
        }

        match &view.tables[0] {
            Table::References { rows, .. } => {
                let datastream = &rows[3];
                assert_eq!(datastream.company, "DataStream Co");
                assert_eq!(datastream.health_tier, HealthTier::Watch);
                assert_eq!(datastream.risk_badge, RiskBadge::Medium);
                assert_eq!(datastream.testimonial, "Ready");

                assert_eq!(rows[2].testimonial, "Not Ready");
                assert_eq!(rows[2].health_tier, HealthTier::Strong);
            }
            other => panic!("expected reference table, got {:?}", other),
        }
    }

    #[test]
    fn test_overview_without_references_fails() {
        let mut records = sample_records();
        records.reference_customers.clear();

        let err = compose_view(Tab::Overview, &records, &ComposerSettings::default()).unwrap_err();
        assert_eq!(err, DomainError::EmptyCollection("reference customers"));
    }

    #[test]
    fn test_overview_rejects_out_of_range_adoption() {
        let mut records = sample_records();
        records.adoption_customers[0].ai_adoption = 150;

        let err = compose_view(Tab::Overview, &records, &ComposerSettings::default()).unwrap_err();
        assert_eq!(
            err,
            DomainError::OutOfRange {
                entity: "TechCorp Global".to_string(),
                field: "ai_adoption",
                value: "150".to_string(),
            }
        );
    }

    #[test]
    fn test_references_reject_out_of_range_engagement() {
        let mut records = sample_records();
        records.reference_customers[0].monthly_engagement = 200;

        let err = compose_view(Tab::References, &records, &ComposerSettings::default())
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::OutOfRange { field: "monthly_engagement", .. }
        ));
    }

    #[test]
    fn test_tables_reject_zero_seats() {
        let mut records = sample_records();
        records.adoption_customers[1].seats = 0;
        records.reference_customers[1].seats = 0;

        let err = adoption_table(&records.adoption_customers).unwrap_err();
        assert_eq!(err.to_string(), "FinServe Inc: field `seats` out of range: 0");

        let err = reference_table(&records.reference_customers).unwrap_err();
        assert_eq!(err.to_string(), "CloudScale Systems: field `seats` out of range: 0");
    }
}
