// ABOUTME: Browser rendering module for figures
// ABOUTME: Draws a figure with plotly.js in headless Chrome and captures it as an image

use crate::errors::{Result, SlideError};
use crate::figure::{Figure, ImageFormat};
use crate::resources::ResourceFile;
use headless_chrome::protocol::cdp::Page::{CaptureScreenshotFormatOption, Viewport};
use headless_chrome::{Browser, LaunchOptionsBuilder};
use log::{debug, info, warn};
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

// plotly's own default figure size.
const DEFAULT_WIDTH: f64 = 700.0;
const DEFAULT_HEIGHT: f64 = 500.0;

/// Configuration for browser rendering
pub struct RenderConfig {
    pub timeout_ms: u64,
    pub browser_path: Option<String>,
    pub plotly_js: ResourceFile,
    pub embed_resources: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            timeout_ms: crate::config::DEFAULT_RENDER_TIMEOUT_MS,
            browser_path: None,
            plotly_js: ResourceFile::new(crate::config::DEFAULT_PLOTLY_JS),
            embed_resources: true,
        }
    }
}

/// Removes the temporary page when rendering finishes or fails.
struct TempPage(PathBuf);

impl Drop for TempPage {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.0) {
            warn!("Failed to clean up page {:?}: {}", self.0, e);
        }
    }
}

/// Layout template definitions for the template names figures may refer to.
pub fn layout_template(name: &str) -> Option<Value> {
    match name {
        "simple_white" => {
            let axis = json!({
                "showgrid": false,
                "showline": true,
                "zeroline": false,
                "linecolor": "rgb(36,36,36)",
                "ticks": "outside",
                "tickcolor": "rgb(36,36,36)",
                "automargin": true,
            });
            Some(json!({
                "layout": {
                    "paper_bgcolor": "white",
                    "plot_bgcolor": "white",
                    "font": { "color": "rgb(36,36,36)" },
                    "colorway": ["#1F77B4", "#FF7F0E", "#2CA02C", "#D62728", "#9467BD",
                                 "#8C564B", "#E377C2", "#7F7F7F", "#BCBD22", "#17BECF"],
                    "xaxis": axis,
                    "yaxis": axis,
                }
            }))
        }
        _ => None,
    }
}

/// Figure JSON as plotly.js expects it, with named templates expanded.
pub fn figure_json(figure: &Figure) -> Result<Value> {
    let mut value = serde_json::to_value(figure)?;
    if let Some(layout) = value.get_mut("layout").and_then(Value::as_object_mut) {
        if let Some(Value::String(name)) = layout.get("template").cloned() {
            match layout_template(&name) {
                Some(template) => {
                    layout.insert("template".to_string(), template);
                }
                None => {
                    warn!("Unknown layout template {:?}, rendering without it", name);
                    layout.remove("template");
                }
            }
        }
    }
    Ok(value)
}

/// Standalone HTML page drawing the figure into `#figure`.
pub fn figure_html(figure: &Figure, config: &RenderConfig) -> Result<String> {
    let (width, height) = figure_size(figure);
    // Keep "</script>" inside JSON strings from closing the tag.
    let json = serde_json::to_string(&figure_json(figure)?)?.replace("</", "<\\/");
    let script = config.plotly_js.script_tag(config.embed_resources)?;
    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
{script}
<style>html, body {{ margin: 0; padding: 0; background: white; }}</style>
</head>
<body>
<div id="figure" style="width: {width}px; height: {height}px;"></div>
<script>
var figure = {json};
Plotly.newPlot("figure", figure.data, figure.layout, {{ staticPlot: true }}).then(function () {{
    document.getElementById("figure").classList.add("rendered");
}});
</script>
</body>
</html>"#
    ))
}

fn figure_size(figure: &Figure) -> (f64, f64) {
    (
        figure.layout.width.unwrap_or(DEFAULT_WIDTH),
        figure.layout.height.unwrap_or(DEFAULT_HEIGHT),
    )
}

/// Render a figure to encoded image bytes at the given device scale.
pub fn render_figure(
    figure: &Figure,
    format: ImageFormat,
    scale: f64,
    config: &RenderConfig,
) -> Result<Vec<u8>> {
    if !(scale > 0.0) {
        return Err(SlideError::ValidationError(format!(
            "Render scale must be positive, got {}",
            scale
        )));
    }
    let (width, height) = figure_size(figure);
    info!(
        "Rendering {}x{} figure at scale {} as {}",
        width,
        height,
        scale,
        format.extension()
    );

    let page = TempPage(std::env::temp_dir().join(format!("figure-{}.html", uuid::Uuid::new_v4())));
    fs::write(&page.0, figure_html(figure, config)?)?;

    // Configure browser launch options
    let mut launch_options_builder = LaunchOptionsBuilder::default();
    launch_options_builder.window_size(Some((width.ceil() as u32, height.ceil() as u32)));
    launch_options_builder.headless(true);
    if let Some(browser_path) = &config.browser_path {
        launch_options_builder.path(Some(browser_path.into()));
    }

    let launch_options = launch_options_builder
        .build()
        .map_err(|e| SlideError::BrowserError {
            message: format!("Failed to build browser options: {:?}", e),
            source: None,
        })?;

    info!("Launching headless browser");
    let browser = Browser::new(launch_options).map_err(|e| {
        let message = format!("Failed to launch browser: {}", e);
        warn!("{}", message);
        SlideError::BrowserError {
            message,
            source: Some(e.into()),
        }
    })?;

    let url = format!("file://{}", page.0.to_string_lossy());
    debug!("Opening figure page at URL: {}", url);

    let tab = browser.new_tab().map_err(|e| SlideError::BrowserError {
        message: format!("Failed to create new tab: {}", e),
        source: None,
    })?;

    tab.navigate_to(&url).map_err(|e| SlideError::BrowserError {
        message: format!("Failed to navigate to figure page: {}", e),
        source: None,
    })?;

    tab.wait_until_navigated()
        .map_err(|e| SlideError::BrowserError {
            message: format!("Navigation failed: {}", e),
            source: None,
        })?;

    let start_time = Instant::now();
    tab.wait_for_element_with_custom_timeout(
        "#figure.rendered",
        Duration::from_millis(config.timeout_ms),
    )
    .map_err(|e| SlideError::BrowserError {
        message: format!("Figure did not finish drawing: {}", e),
        source: None,
    })?;
    debug!(
        "Figure drawn in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );

    let screenshot_format = match format {
        ImageFormat::Png => CaptureScreenshotFormatOption::Png,
        ImageFormat::Jpeg => CaptureScreenshotFormatOption::Jpeg,
    };
    let clip = Viewport {
        x: 0.0,
        y: 0.0,
        width,
        height,
        scale,
    };

    let data = tab
        .capture_screenshot(screenshot_format, None, Some(clip), true)
        .map_err(|e| SlideError::BrowserError {
            message: format!("Failed to capture figure: {}", e),
            source: None,
        })?;

    info!("Captured figure image ({} bytes)", data.len());
    Ok(data)
}
