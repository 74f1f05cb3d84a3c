// Energy series domain models
use serde::{Deserialize, Serialize};

/// X coordinate of a point. Upstream sends epoch milliseconds or date strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum XValue {
    Number(serde_json::Number),
    Text(String),
}

/// One `[x, y]` pair. Anything other than a two element array is rejected.
/// Both values keep their JSON number form, so `2` is sent back as `2`, not `2.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint(pub XValue, pub serde_json::Number);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub data: Vec<DataPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Payload of `daily_totals.json`
#[derive(Debug, Clone, Deserialize)]
pub struct DailyDataSet {
    pub consumption: Series,
    pub controlled: Series,
    pub generation: Series,
}

/// Payload of `monthly_totals.json`. The colour sits next to the series, not inside it.
#[derive(Debug, Clone, Deserialize)]
pub struct MonthlyDataSet {
    pub consumption: Series,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone)]
pub enum DataSet {
    Daily(DailyDataSet),
    Monthly(MonthlyDataSet),
}

impl DataSet {
    /// Series in the order they are plotted
    pub fn into_series(self) -> Vec<Series> {
        match self {
            DataSet::Daily(daily) => vec![daily.consumption, daily.controlled, daily.generation],
            DataSet::Monthly(monthly) => {
                let mut consumption = monthly.consumption;
                consumption.color = monthly.color;
                vec![consumption]
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: String,
}

/// Plotly-ready layer built from one series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    pub x: Vec<XValue>,
    pub y: Vec<serde_json::Number>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
}

impl Trace {
    pub fn bar(series: &Series) -> Self {
        let (x, y) = series
            .data
            .iter()
            .map(|DataPoint(x, y)| (x.clone(), y.clone()))
            .unzip();

        Self {
            kind: TraceKind::Bar,
            x,
            y,
            name: series.label.clone(),
            line: series.color.clone().map(|color| LineStyle { color }),
        }
    }
}
