// Static Plotly layout for the chart pages
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    Relative,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub orientation: &'static str,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showgrid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerLine {
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub line: MarkerLine,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub showlegend: bool,
    pub bargap: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<BarMode>,
    pub legend: Legend,
    pub xaxis: Axis,
    pub yaxis: Axis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

impl Layout {
    /// Horizontal legend above the plot, gridded x axis, kWh/day y axis
    fn base() -> Self {
        Self {
            showlegend: true,
            bargap: 0.05,
            barmode: None,
            legend: Legend {
                orientation: "h",
                x: 0.0,
                y: 1.2,
            },
            xaxis: Axis {
                showgrid: Some(true),
                title: None,
            },
            yaxis: Axis {
                showgrid: None,
                title: Some("kWh/day"),
            },
            marker: None,
        }
    }

    /// Relative bar mode with outlined markers
    pub fn daily() -> Self {
        Self {
            barmode: Some(BarMode::Relative),
            marker: Some(Marker {
                line: MarkerLine { width: 1.5 },
            }),
            ..Self::base()
        }
    }

    pub fn monthly() -> Self {
        Self::base()
    }
}
