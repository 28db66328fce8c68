// ABOUTME: Chart objects placed on slides: a plotly-compatible figure model
// ABOUTME: Defines the Chart/ToImage traits the slide and report code depend on

pub mod layout;
pub mod style;

use crate::config::Config;
use crate::errors::Result;
use crate::render;
use serde::{Deserialize, Serialize};

pub use layout::{Annotation, Axis, FontStyle, Legend, Layout, Margin, Merge, Title};

/// Raster formats a chart can be rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
        }
    }
}

/// Anything that can rasterize itself for a slide.
pub trait ToImage {
    /// Encoded image bytes; `scale` multiplies the chart's own pixel size.
    fn to_image(&self, format: ImageFormat, scale: f64) -> Result<Vec<u8>>;
}

/// The operations the report assembler needs from a chart.
pub trait Chart: ToImage + Clone {
    fn add_annotation(&mut self, annotation: Annotation) -> &mut Self;

    /// Merges layout options into the chart's layout.
    fn update_layout(&mut self, layout: &Layout) -> &mut Self;

    fn update_xaxes(&mut self, axis: &Axis) -> &mut Self;

    fn update_yaxes(&mut self, axis: &Axis) -> &mut Self;

    /// Merges line options into every trace.
    fn update_traces(&mut self, line: &Line) -> &mut Self;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
}

impl Merge for Line {
    fn merge(&mut self, other: &Self) {
        if other.width.is_some() {
            self.width = other.width;
        }
        if other.color.is_some() {
            self.color.clone_from(&other.color);
        }
        if other.dash.is_some() {
            self.dash.clone_from(&other.dash);
        }
    }
}

/// A plotted data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(rename = "type", default = "default_trace_type")]
    pub trace_type: String,
    #[serde(default)]
    pub x: Vec<f64>,
    #[serde(default)]
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `"lines"`, `"markers"` or `"lines+markers"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
}

fn default_trace_type() -> String {
    "scatter".to_string()
}

impl Trace {
    /// A line trace through the given points.
    pub fn scatter(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            trace_type: default_trace_type(),
            x,
            y,
            name: None,
            mode: Some("lines".to_string()),
            line: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A figure in plotly's JSON shape: `{"data": [...], "layout": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    #[serde(default)]
    pub data: Vec<Trace>,
    #[serde(default)]
    pub layout: Layout,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn add_trace(&mut self, trace: Trace) -> &mut Self {
        self.data.push(trace);
        self
    }
}

impl ToImage for Figure {
    /// Renders through plotly.js in a headless browser configured from the environment.
    fn to_image(&self, format: ImageFormat, scale: f64) -> Result<Vec<u8>> {
        let config = Config::from_env().get_render_config(None);
        render::render_figure(self, format, scale, &config)
    }
}

impl Chart for Figure {
    fn add_annotation(&mut self, annotation: Annotation) -> &mut Self {
        self.layout.annotations.push(annotation);
        self
    }

    fn update_layout(&mut self, layout: &Layout) -> &mut Self {
        self.layout.merge(layout);
        self
    }

    fn update_xaxes(&mut self, axis: &Axis) -> &mut Self {
        self.layout.xaxis.get_or_insert_with(Axis::default).merge(axis);
        self
    }

    fn update_yaxes(&mut self, axis: &Axis) -> &mut Self {
        self.layout.yaxis.get_or_insert_with(Axis::default).merge(axis);
        self
    }

    fn update_traces(&mut self, line: &Line) -> &mut Self {
        for trace in &mut self.data {
            trace.line.get_or_insert_with(Line::default).merge(line);
        }
        self
    }
}
