// Plotly.js page renderer
use crate::application::chart_renderer::{ChartRenderer, ChartView};
use serde::Serialize;

pub const DEFAULT_PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

#[derive(Debug, Clone)]
pub struct PlotlyRenderer {
    plotly_src: String,
    title_prefix: String,
}

impl PlotlyRenderer {
    pub fn new(plotly_src: String, title_prefix: String) -> Self {
        Self {
            plotly_src,
            title_prefix,
        }
    }
}

/// Serialize a value for embedding inside a `<script>` block
fn script_json<T: Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json.replace("</", "<\\/"),
        Err(e) => {
            tracing::error!("Chart serialization error: {}", e);
            "null".to_string()
        }
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl ChartRenderer for PlotlyRenderer {
    fn render(&self, view: &ChartView<'_>) -> String {
        let title = escape_html(&format!(
            "{} - Meter {} - {}",
            self.title_prefix,
            view.meter,
            view.variant.title()
        ));
        let visibility = if view.loading_visible { "visible" } else { "hidden" };

        let mut script = String::new();
        if !view.traces.is_empty() {
            script.push_str(&format!(
                "var data = {};\nvar layout = {};\nPlotly.react(document.getElementById('load'), data, layout);\n",
                script_json(view.traces),
                script_json(view.layout),
            ));
            script.push_str(
                "document.getElementById('load-loading').style.visibility = 'hidden';\n",
            );
        }
        if let Some(alert) = view.alert {
            script.push_str(&format!("alert({});\n", script_json(alert)));
        }

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <script src="{src}"></script>
</head>
<body>
    <h1>{title}</h1>
    <div id="load-loading" style="visibility: {visibility};">Loading...</div>
    <div id="load"></div>
    <script>
{script}    </script>
</body>
</html>
"#,
            title = title,
            src = escape_html(&self.plotly_src),
            visibility = visibility,
            script = script,
        )
    }
}
