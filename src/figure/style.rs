// ABOUTME: Default figure styling for slides: layout, axis and date annotation
// ABOUTME: Pure functions returning fresh values that are merged into a chart

use crate::errors::{Result, SlideError};
use crate::figure::layout::{Annotation, Axis, FontStyle, Legend, Layout, Margin, Title};
use chrono::NaiveDate;

/// Date given either as a calendar date or as `(year, month, day)` parts.
#[derive(Debug, Clone, PartialEq)]
pub enum DateSpec {
    Date(NaiveDate),
    Parts(Vec<i64>),
}

impl From<NaiveDate> for DateSpec {
    fn from(date: NaiveDate) -> Self {
        DateSpec::Date(date)
    }
}

impl From<(i32, u32, u32)> for DateSpec {
    fn from((year, month, day): (i32, u32, u32)) -> Self {
        DateSpec::Parts(vec![year.into(), month.into(), day.into()])
    }
}

impl From<&[i64]> for DateSpec {
    fn from(parts: &[i64]) -> Self {
        DateSpec::Parts(parts.to_vec())
    }
}

impl From<Vec<i64>> for DateSpec {
    fn from(parts: Vec<i64>) -> Self {
        DateSpec::Parts(parts)
    }
}

impl DateSpec {
    /// The calendar date, or `InvalidDate` when the parts do not form one.
    pub fn to_date(&self) -> Result<NaiveDate> {
        match self {
            DateSpec::Date(date) => Ok(*date),
            DateSpec::Parts(parts) => {
                let invalid = || SlideError::InvalidDate(format!("{:?}", parts));
                let [year, month, day] = parts.as_slice() else {
                    return Err(invalid());
                };
                let year = i32::try_from(*year).map_err(|_| invalid())?;
                let month = u32::try_from(*month).map_err(|_| invalid())?;
                let day = u32::try_from(*day).map_err(|_| invalid())?;
                NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
            }
        }
    }
}

/// Layout used for figures placed on slides: 450x450, Arial 18, clean white theme.
pub fn default_layout() -> Layout {
    Layout {
        width: Some(450.0),
        height: Some(450.0),
        margin: Some(Margin {
            l: Some(10.0),
            r: Some(10.0),
            t: Some(20.0),
            b: Some(10.0),
        }),
        font: Some(FontStyle {
            family: Some("Arial".to_string()),
            size: Some(18.0),
            color: None,
        }),
        legend: Some(Legend {
            title: Some(Title {
                text: Some(String::new()),
                font: None,
            }),
            x: Some(1.0),
            xanchor: Some("right".to_string()),
            ..Legend::default()
        }),
        template: Some("simple_white".to_string()),
        xaxis: Some(default_axis()),
        yaxis: Some(default_axis()),
        ..Layout::default()
    }
}

/// Inward ticks with a mirrored axis line, which boxes the plot on all four sides.
pub fn default_axis() -> Axis {
    Axis {
        ticks: Some("inside".to_string()),
        mirror: Some(true),
        showline: Some(true),
        ..Axis::default()
    }
}

/// `YYYY.MM.DD` stamp at the bottom-right corner of the plotting area.
pub fn date_annotation(date: impl Into<DateSpec>) -> Result<Annotation> {
    let date = date.into().to_date()?;
    Ok(Annotation {
        text: date.format("%Y.%m.%d").to_string(),
        x: Some(1.0),
        y: Some(-0.125),
        xref: Some("paper".to_string()),
        yref: Some("paper".to_string()),
        showarrow: Some(false),
        font: Some(FontStyle {
            size: Some(14.0),
            ..FontStyle::default()
        }),
        ..Annotation::default()
    })
}
