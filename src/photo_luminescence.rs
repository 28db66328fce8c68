// ABOUTME: Photoluminescence experiment summary slide
// ABOUTME: Lays out the title, parameter text blocks and two styled figures on one slide

use crate::errors::{Result, SlideError};
use crate::figure::style::{date_annotation, default_axis, default_layout};
use crate::figure::{Chart, Line};
use crate::presentation::Presentation;
use crate::slide::{FigureOptions, TextBoxOptions, TitleUpdate};
use chrono::NaiveDate;
use log::info;

/// Font used for the fit results.
pub const MATH_FONT: &str = "Cambria Math";

/// Parameters of one photoluminescence measurement.
#[derive(Debug, Clone)]
pub struct PhotoLuminescence<C> {
    pub title: String,
    /// Excitation wavelength in nm.
    pub excitation_wavelength: f64,
    /// Excitation power in mW.
    pub excitation_power: f64,
    /// Time range of the streak camera in ns.
    pub time_range: f64,
    /// Center wavelength of the PL spectrum in nm.
    pub center_wavelength: f64,
    /// Full width at half maximum of the PL spectrum in nm.
    pub fwhm: f64,
    /// Frame count of the streak camera.
    pub frame: f64,
    pub date: NaiveDate,
    /// PL intensity vs. time.
    pub h_fig: C,
    /// PL intensity vs. wavelength.
    pub v_fig: C,
    /// Weight of the fast decay.
    pub a: f64,
    /// Weight of the slow decay.
    pub b: f64,
    /// Fast decay time in ns.
    pub tau1: f64,
    /// Slow decay time in ns.
    pub tau2: f64,
}

impl<C: Chart> PhotoLuminescence<C> {
    /// Builds a one-slide presentation from the default template. The result is not saved.
    pub fn build(&self) -> Result<Presentation> {
        let h_fig = format_figure(&self.h_fig, self.date)?;
        let v_fig = format_figure(&self.v_fig, self.date)?;
        let ratio = weight_ratio(self.a, self.b)?;

        let mut presentation = Presentation::new()?;
        let slide = presentation.slide_mut(0).ok_or_else(|| {
            SlideError::PackageError("default template has no slides".to_string())
        })?;

        let text_options = TextBoxOptions::default();
        let math_options = TextBoxOptions::default().font_name(MATH_FONT);
        slide
            .update_title(&TitleUpdate::new().text(self.title.as_str()))?
            .add_figure(&h_fig, 0.33, 5.0, &FigureOptions::default())?
            .add_figure(&v_fig, 12.33, 5.0, &FigureOptions::default())?
            .add_text(&self.experiment_text(), 2.33, 2.5, &text_options)?
            .add_text(&self.spectrum_text(), 14.33, 2.5, &text_options)?
            .add_text(&ratio, 14.33, 17.0, &math_options)?
            .add_text(&self.decay_text(), 19.33, 17.0, &math_options)?;

        info!("Built photoluminescence slide {:?}", self.title);
        Ok(presentation)
    }

    fn experiment_text(&self) -> String {
        format!(
            "Excitation wavelength : {} nm\nExcitation power : {} mW\nTime range : {} ns\n",
            whole(self.excitation_wavelength),
            whole(self.excitation_power),
            whole(self.time_range),
        )
    }

    fn spectrum_text(&self) -> String {
        format!(
            "Center wavelength : {} nm\nFWHM : {} nm\nFrame : {}\n",
            whole(self.center_wavelength),
            format_general(self.fwhm, 2),
            whole(self.frame),
        )
    }

    fn decay_text(&self) -> String {
        format!(
            "τ₁ = {} ns\nτ₂ = {} ns\n",
            format_general(self.tau1, 2),
            format_general(self.tau2, 2),
        )
    }
}

/// Builds the photoluminescence presentation; see [`PhotoLuminescence::build`].
pub fn build<C: Chart>(report: &PhotoLuminescence<C>) -> Result<Presentation> {
    report.build()
}

/// Copy of the chart styled for the slide: date stamp, default layout without
/// legend, default axes and 1px lines.
pub fn format_figure<C: Chart>(chart: &C, date: NaiveDate) -> Result<C> {
    let mut layout = default_layout();
    layout.showlegend = Some(false);
    let axis = default_axis();

    let mut chart = chart.clone();
    chart
        .add_annotation(date_annotation(date)?)
        .update_layout(&layout)
        .update_xaxes(&axis)
        .update_yaxes(&axis)
        .update_traces(&Line {
            width: Some(1.0),
            ..Line::default()
        });
    Ok(chart)
}

/// `a : b = A : B` with the weights scaled to sum to 100.
pub fn weight_ratio(a: f64, b: f64) -> Result<String> {
    let total = a + b;
    if total == 0.0 || !total.is_finite() {
        return Err(SlideError::ValidationError(format!(
            "Decay weights must have a finite non-zero sum, got a={} b={}",
            a, b
        )));
    }
    let scaled = (100.0 * a / total).round_ties_even() as i64;
    Ok(format!("a : b = {} : {}", scaled, 100 - scaled))
}

/// Integer part of a value, printed without decimals.
fn whole(value: f64) -> i64 {
    value.trunc() as i64
}

/// Formats like printf's `%.<precision>g`: `precision` significant digits,
/// trailing zeros removed, scientific notation for very small or large values.
pub fn format_general(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    if !value.is_finite() {
        return if value.is_nan() {
            "nan".to_string()
        } else if value > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }
    let precision = precision.max(1);
    // The exponent after rounding to the requested significant digits.
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .map(|(m, e)| (m.to_string(), e.parse::<i32>().unwrap_or(0)))
        .unwrap_or((scientific.clone(), 0));

    if exponent < -4 || exponent >= precision as i32 {
        let mantissa = strip_trailing_zeros(&mantissa);
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value))
    }
}

fn strip_trailing_zeros(number: &str) -> String {
    if number.contains('.') {
        number
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        number.to_string()
    }
}
