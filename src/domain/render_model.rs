// Render-model handed to chart and table collaborators
use serde::Serialize;

use super::metrics::{HealthTier, RiskBadge};
use super::navigation::Tab;
use super::records::RetentionRisk;

/// One named numeric series inside a category chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesInfo {
    pub id: String,
    pub name: String,
}

impl SeriesInfo {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// A category with one value per series, in series order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPoint {
    pub category: String,
    pub values: Vec<f64>,
}

/// Data for bar and line charts: a category axis plus one or more series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub category_key: String,
    pub series: Vec<SeriesInfo>,
    pub points: Vec<CategoryPoint>,
}

impl ChartSeries {
    pub fn new(category_key: &str, series: Vec<SeriesInfo>, points: Vec<CategoryPoint>) -> Self {
        Self {
            category_key: category_key.to_string(),
            series,
            points,
        }
    }

    #[cfg(test)]
    pub fn categories(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.category.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTooltip {
    pub company: String,
    pub arr: String,
    pub health: String,
    pub seats: String,
}

/// Bubble on the ARR vs health chart; `size` drives the bubble radius.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: u64,
    pub y: u8,
    pub size: u32,
    pub tooltip: ScatterTooltip,
}

/// Share of customers in one retention-risk tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskSlice {
    pub name: String,
    pub tier: RetentionRisk,
    pub value: u8,
    pub style: RiskBadge,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiTile {
    pub id: String,
    pub label: String,
    pub value: String,
    /// Month-over-month change in percentage points, when known.
    pub change: Option<i64>,
}

impl KpiTile {
    pub fn new(id: &str, label: &str, value: String, change: Option<i64>) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            value,
            change,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    Line {
        id: String,
        title: String,
        data: ChartSeries,
    },
    GroupedBar {
        id: String,
        title: String,
        data: ChartSeries,
    },
    Pie {
        id: String,
        title: String,
        slices: Vec<RiskSlice>,
    },
    Scatter {
        id: String,
        title: String,
        points: Vec<ScatterPoint>,
    },
}

impl Chart {
    pub fn id(&self) -> &str {
        match self {
            Chart::Line { id, .. }
            | Chart::GroupedBar { id, .. }
            | Chart::Pie { id, .. }
            | Chart::Scatter { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdoptionRow {
    pub company: String,
    pub arr: String,
    pub ai_adoption: String,
    pub ai_tickets_pct: String,
    pub seats: String,
    pub industry: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceRow {
    pub company: String,
    pub arr: String,
    pub health: String,
    pub health_tier: HealthTier,
    pub engagement: String,
    pub testimonial: &'static str,
    pub case_study: &'static str,
    pub risk: RetentionRisk,
    pub risk_badge: RiskBadge,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Table {
    Adoption {
        columns: Vec<&'static str>,
        rows: Vec<AdoptionRow>,
    },
    References {
        columns: Vec<&'static str>,
        rows: Vec<ReferenceRow>,
    },
}

/// Everything a tab displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub tab: Tab,
    pub heading: String,
    pub subheading: String,
    pub kpis: Vec<KpiTile>,
    pub charts: Vec<Chart>,
    pub tables: Vec<Table>,
}
