use super::error::{Error, Result};
use super::pipeline::ForecastPanel;
use super::DT_FORMAT;
use serde_json::{json, Value};
use std::path::Path;

pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
pub const TITLE: &str = "Load Forecasts and Revised Forecasts Over Time";

#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// the top panels follow the zoom of the bottom one
    pub shared_x: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        ChartOptions {
            title: TITLE.to_string(),
            width: 1000,
            height: 700,
            shared_x: true,
        }
    }
}

fn axis_id(i: usize) -> (String, String) {
    if i == 0 {
        ("x".to_string(), "y".to_string())
    } else {
        (format!("x{}", i + 1), format!("y{}", i + 1))
    }
}

/// vertical [bottom, top] of panel i out of n, top to bottom
fn row_domain(i: usize, n: usize) -> [f64; 2] {
    let spacing = if n > 1 { 0.3 / n as f64 } else { 0. };
    let height = (1. - spacing * (n as f64 - 1.)) / n as f64;
    let top = 1. - i as f64 * (height + spacing);
    [(top - height).max(0.), top]
}

fn range_selector() -> Value {
    json!({
        "buttons": [
            {"count": 1, "label": "1d", "step": "day", "stepmode": "backward"},
            {"count": 7, "label": "1w", "step": "day", "stepmode": "backward"},
            {"step": "all"}
        ]
    })
}

fn trace(panel: &ForecastPanel, i: usize) -> Value {
    let (x, y) = axis_id(i);
    let time: Vec<String> = panel
        .series
        .time
        .iter()
        .map(|t| t.format(DT_FORMAT).to_string())
        .collect();
    json!({
        "type": "scattergl",
        "mode": "lines",
        "name": panel.spec.title,
        "x": time,
        "y": panel.series.load,
        "line": {"color": panel.spec.color.css},
        "xaxis": x,
        "yaxis": y,
    })
}

/// The plotly figure (data and layout): one row per panel,
/// each x axis with range selector buttons (1d, 1w, all) and a range slider.
pub fn figure(panels: &[ForecastPanel], opts: &ChartOptions) -> Value {
    let n = panels.len();
    let (bottom_x, _) = axis_id(n.saturating_sub(1));
    let mut layout = json!({
        "title": {"text": opts.title},
        "width": opts.width,
        "height": opts.height,
        "showlegend": true,
    });
    let mut annotations = Vec::with_capacity(n);
    for (i, panel) in panels.iter().enumerate() {
        let (x, y) = axis_id(i);
        let domain = row_domain(i, n);
        let mut xaxis = json!({
            "anchor": y,
            "domain": [0.0, 1.0],
            "type": "date",
            "rangeselector": range_selector(),
            "rangeslider": {"visible": true},
        });
        if opts.shared_x && i + 1 < n {
            xaxis["matches"] = json!(bottom_x);
            xaxis["showticklabels"] = json!(false);
        }
        layout[format!("xaxis{}", &x[1..])] = xaxis;
        layout[format!("yaxis{}", &y[1..])] = json!({"anchor": x, "domain": domain});
        annotations.push(json!({
            "text": panel.spec.title,
            "x": 0.5,
            "y": domain[1],
            "xref": "paper",
            "yref": "paper",
            "xanchor": "center",
            "yanchor": "bottom",
            "showarrow": false,
            "font": {"size": 16},
        }));
    }
    layout["annotations"] = Value::Array(annotations);
    let data: Vec<Value> = panels.iter().enumerate().map(|(i, p)| trace(p, i)).collect();
    json!({"data": data, "layout": layout})
}

/// standalone html page drawing the figure with plotly.js
pub fn render_html(panels: &[ForecastPanel], opts: &ChartOptions) -> Result<String> {
    let figure = serde_json::to_string(&figure(panels, opts))?.replace("</", "<\\/");
    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
</head>
<body>
<div id="fcst" style="width:{width}px;height:{height}px;"></div>
<script>
var figure = {figure};
Plotly.newPlot("fcst", figure.data, figure.layout, {{responsive: true}});
</script>
</body>
</html>
"#,
        title = opts.title,
        cdn = PLOTLY_CDN,
        width = opts.width,
        height = opts.height,
        figure = figure,
    ))
}

pub fn write_html(panels: &[ForecastPanel], opts: &ChartOptions, fout: &Path) -> Result<()> {
    let html = render_html(panels, opts)?;
    std::fs::write(fout, html).map_err(|source| Error::Io {
        path: fout.to_path_buf(),
        source,
    })
}
