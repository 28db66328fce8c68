// ABOUTME: Typed plotly layout objects: layout, axes, legend, margins, fonts, annotations
// ABOUTME: Every field is optional and updates merge recursively, like plotly's update_layout

use serde::{Deserialize, Serialize};

/// Recursive overlay: fields set on `other` replace those on `self`.
pub trait Merge {
    fn merge(&mut self, other: &Self);
}

fn overlay<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
    if source.is_some() {
        target.clone_from(source);
    }
}

fn overlay_nested<T: Merge + Clone + Default>(target: &mut Option<T>, source: &Option<T>) {
    if let Some(source) = source {
        target.get_or_insert_with(T::default).merge(source);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FontStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Merge for FontStyle {
    fn merge(&mut self, other: &Self) {
        overlay(&mut self.family, &other.family);
        overlay(&mut self.size, &other.size);
        overlay(&mut self.color, &other.color);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub l: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<f64>,
}

impl Merge for Margin {
    fn merge(&mut self, other: &Self) {
        overlay(&mut self.l, &other.l);
        overlay(&mut self.r, &other.r);
        overlay(&mut self.t, &other.t);
        overlay(&mut self.b, &other.b);
    }
}

/// Title text of a layout, axis or legend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Title {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<FontStyle>,
}

impl Merge for Title {
    fn merge(&mut self, other: &Self) {
        overlay(&mut self.text, &other.text);
        overlay_nested(&mut self.font, &other.font);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yanchor: Option<String>,
}

impl Merge for Legend {
    fn merge(&mut self, other: &Self) {
        overlay_nested(&mut self.title, &other.title);
        overlay(&mut self.x, &other.x);
        overlay(&mut self.y, &other.y);
        overlay(&mut self.xanchor, &other.xanchor);
        overlay(&mut self.yanchor, &other.yanchor);
    }
}

/// A cartesian axis (`layout.xaxis` / `layout.yaxis`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    /// `"inside"`, `"outside"` or `""`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showgrid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zeroline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linecolor: Option<String>,
}

impl Merge for Axis {
    fn merge(&mut self, other: &Self) {
        overlay_nested(&mut self.title, &other.title);
        overlay(&mut self.axis_type, &other.axis_type);
        overlay(&mut self.range, &other.range);
        overlay(&mut self.ticks, &other.ticks);
        overlay(&mut self.mirror, &other.mirror);
        overlay(&mut self.showline, &other.showline);
        overlay(&mut self.showgrid, &other.showgrid);
        overlay(&mut self.zeroline, &other.zeroline);
        overlay(&mut self.linecolor, &other.linecolor);
    }
}

/// A text annotation placed on the figure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// `"paper"` positions relative to the plotting area instead of data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showarrow: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<FontStyle>,
}

/// Figure layout. `template` names a plotly layout template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<FontStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl Merge for Layout {
    /// Annotations in `other` are appended rather than replaced.
    fn merge(&mut self, other: &Self) {
        overlay_nested(&mut self.title, &other.title);
        overlay(&mut self.width, &other.width);
        overlay(&mut self.height, &other.height);
        overlay_nested(&mut self.margin, &other.margin);
        overlay_nested(&mut self.font, &other.font);
        overlay(&mut self.showlegend, &other.showlegend);
        overlay_nested(&mut self.legend, &other.legend);
        overlay(&mut self.template, &other.template);
        overlay_nested(&mut self.xaxis, &other.xaxis);
        overlay_nested(&mut self.yaxis, &other.yaxis);
        self.annotations.extend(other.annotations.iter().cloned());
    }
}
