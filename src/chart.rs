// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Plotly chart of sampled balances
//!
//! The figure is plain serde data in Plotly's JSON schema, so it can be
//! written as JSON for another front end or embedded in a standalone HTML
//! page.

use serde::Serialize;

use crate::types::observation::Observation;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// A Plotly figure: traces plus layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// One line of the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    pub name: &'static str,
    pub x: Vec<u64>,
    pub y: Vec<f64>,
    pub hoverinfo: &'static str,
    /// Block times, shown on hover
    pub text: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub yaxis2: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autorange: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rangeslider: Option<RangeSlider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlaying: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<&'static str>,
}

/// Plotly's default range slider, serialized as `{}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RangeSlider {}

impl Figure {
    /// Free balance on the left axis, reserved on the right, by block
    ///
    /// `observations` are expected in block order.
    pub fn from_observations(observations: &[Observation]) -> Self {
        let blocks: Vec<u64> = observations.iter().map(|o| o.block).collect();
        let times: Vec<String> = observations.iter().map(|o| o.time.to_rfc3339()).collect();

        let free = Trace {
            kind: "scatter",
            mode: "lines",
            name: "Free",
            x: blocks.clone(),
            y: observations.iter().map(|o| o.free).collect(),
            hoverinfo: "y+text",
            text: times.clone(),
            yaxis: None,
        };
        let reserved = Trace {
            kind: "scatter",
            mode: "lines",
            name: "Reserved",
            x: blocks,
            y: observations.iter().map(|o| o.reserved).collect(),
            hoverinfo: "y+text",
            text: times,
            yaxis: Some("y2"),
        };

        let layout = Layout {
            title: Title {
                text: "Free Balance over Time",
            },
            xaxis: Axis {
                title: Some(Title { text: "Block" }),
                kind: Some("linear"),
                autorange: Some(true),
                rangeslider: Some(RangeSlider {}),
                ..Axis::default()
            },
            yaxis: Axis {
                title: Some(Title { text: "Free" }),
                autorange: Some(true),
                ..Axis::default()
            },
            yaxis2: Axis {
                title: Some(Title { text: "Reserved" }),
                autorange: Some(true),
                overlaying: Some("y"),
                side: Some("right"),
                ..Axis::default()
            },
        };

        Self {
            data: vec![free, reserved],
            layout,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Standalone HTML page drawing this figure with plotly.js
    pub fn render_html(&self) -> Result<String, serde_json::Error> {
        // `</` would end the script element early
        let figure = self.to_json()?.replace("</", "<\\/");
        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{PLOTLY_CDN}"></script>
</head>
<body>
<div id="graph" style="width:100%;height:90vh;"></div>
<script>
const figure = {figure};
Plotly.newPlot("graph", figure.data, figure.layout);
</script>
</body>
</html>
"#,
            title = self.layout.title.text,
        ))
    }
}
