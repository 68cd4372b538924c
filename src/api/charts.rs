//! Plotly-compatible figure specs built from a [`RecommendationResult`].
//!
//! The browser hands each figure straight to `Plotly.react(div, data, layout)`.
//! No numbers are computed here beyond formatting labels.

use serde::Serialize;

use crate::engine::format_thousands;
use crate::types::RecommendationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Scatter,
    Bar,
}

/// x values are either numeric (timeline) or categorical (bar labels).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AxisValues {
    Numbers(Vec<f64>),
    Labels(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: AxisValues,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textposition: Option<&'static str>,
}

impl Trace {
    fn line(name: &str, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            kind: TraceKind::Scatter,
            name: Some(name.to_string()),
            x: AxisValues::Numbers(x),
            y,
            mode: Some("lines"),
            text: None,
            textposition: None,
        }
    }

    fn bar(name: Option<&str>, x: Vec<String>, y: Vec<f64>) -> Self {
        Self {
            kind: TraceKind::Bar,
            name: name.map(str::to_string),
            x: AxisValues::Labels(x),
            y,
            mode: None,
            text: None,
            textposition: None,
        }
    }

    fn with_labels(mut self, text: Vec<String>) -> Self {
        self.text = Some(text);
        self.textposition = Some("auto");
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLayout {
    pub title: Title,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<AxisLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<AxisLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovermode: Option<&'static str>,
}

impl Layout {
    fn titled(title: &str) -> Self {
        Self {
            title: Some(Title {
                text: title.to_string(),
            }),
            ..Self::default()
        }
    }

    fn x_title(mut self, text: &str) -> Self {
        self.xaxis = Some(AxisLayout {
            title: Title {
                text: text.to_string(),
            },
        });
        self
    }

    fn y_title(mut self, text: &str) -> Self {
        self.yaxis = Some(AxisLayout {
            title: Title {
                text: text.to_string(),
            },
        });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// The five dashboard charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardFigures {
    pub interaction_timeline: Figure,
    pub side_effects: Figure,
    pub environmental_impact: Figure,
    pub dosage_comparison: Figure,
    pub cost_savings: Figure,
}

impl DashboardFigures {
    /// Blank placeholders shown before the first trigger.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_result(result: &RecommendationResult) -> Self {
        Self {
            interaction_timeline: interaction_timeline(result),
            side_effects: side_effects(result),
            environmental_impact: environmental_impact(result),
            dosage_comparison: dosage_comparison(result),
            cost_savings: cost_savings(result),
        }
    }
}

fn interaction_timeline(result: &RecommendationResult) -> Figure {
    let data = result
        .timeline
        .iter()
        .map(|(id, points)| {
            let (x, y) = points.iter().map(|p| (p.time, p.concentration)).unzip();
            Trace::line(result.drug_name(id), x, y)
        })
        .collect();

    let mut layout = Layout::titled("Drug Interaction Timeline")
        .x_title("Time (minutes)")
        .y_title("Drug Concentration");
    layout.hovermode = Some("x unified");

    Figure { data, layout }
}

fn side_effects(result: &RecommendationResult) -> Figure {
    let categories: Vec<String> = result
        .risk_comparison
        .iter()
        .map(|r| r.category.clone())
        .collect();
    let current = result.risk_comparison.iter().map(|r| r.current_percent).collect();
    let optimized = result.risk_comparison.iter().map(|r| r.optimized_percent).collect();

    let mut layout = Layout::titled("Side Effects Risk Comparison").y_title("Risk Percentage (%)");
    layout.barmode = Some("group");

    Figure {
        data: vec![
            Trace::bar(Some("Current Practice"), categories.clone(), current),
            Trace::bar(Some("Optimized Protocol"), categories, optimized),
        ],
        layout,
    }
}

fn environmental_impact(result: &RecommendationResult) -> Figure {
    let names = result
        .environmental_impact
        .keys()
        .map(|id| result.drug_name(id).to_string())
        .collect();
    let values: Vec<f64> = result.environmental_impact.values().copied().collect();
    let labels = values.iter().map(|v| format!("{v:.1} kg CO2e")).collect();

    Figure {
        data: vec![Trace::bar(None, names, values).with_labels(labels)],
        layout: Layout::titled("Environmental Impact (CO2 Equivalent)").y_title("kg CO2e"),
    }
}

fn dosage_comparison(result: &RecommendationResult) -> Figure {
    let data = result
        .dosage_comparison
        .iter()
        .map(|(id, c)| {
            Trace::bar(
                Some(result.drug_name(id)),
                vec!["Current Practice".to_string(), "Optimal Dosage".to_string()],
                vec![c.current_relative, c.optimal_relative],
            )
        })
        .collect();

    Figure {
        data,
        layout: Layout::titled("Dosage Comparison (Relative to Optimal)").y_title("Relative Dosage"),
    }
}

fn cost_savings(result: &RecommendationResult) -> Figure {
    let categories = result.cost_savings.iter().map(|c| c.category.clone()).collect();
    let savings: Vec<f64> = result.cost_savings.iter().map(|c| c.savings).collect();
    let labels = savings
        .iter()
        .map(|s| format!("${}", format_thousands(*s, 0)))
        .collect();

    Figure {
        data: vec![Trace::bar(None, categories, savings).with_labels(labels)],
        layout: Layout::titled("Potential Cost Savings").y_title("Savings ($)"),
    }
}
