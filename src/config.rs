// ABOUTME: Configuration module for the tlab-slides library
// ABOUTME: Provides rendering settings and environment variable handling

use crate::render::RenderConfig;
use crate::resources::ResourceFile;
use std::env;

pub const DEFAULT_PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";
pub const DEFAULT_RENDER_TIMEOUT_MS: u64 = 30000;

/// Global configuration for the library
pub struct Config {
    pub browser_path: Option<String>,
    pub render_timeout_ms: u64,
    pub plotly_js: String,
    pub embed_resources: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_path: env::var("BROWSER_PATH").ok(),
            render_timeout_ms: DEFAULT_RENDER_TIMEOUT_MS,
            plotly_js: DEFAULT_PLOTLY_JS.to_string(),
            embed_resources: true,
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let browser_path = env::var("BROWSER_PATH").ok().filter(|p| !p.is_empty());
        let render_timeout_ms = env::var("RENDER_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_RENDER_TIMEOUT_MS);
        let plotly_js = env::var("PLOTLY_JS").unwrap_or_else(|_| DEFAULT_PLOTLY_JS.to_string());
        let embed_resources = env::var("EMBED_RESOURCES")
            .ok()
            .map(|s| s.to_lowercase() != "false")
            .unwrap_or(true);

        Self {
            browser_path,
            render_timeout_ms,
            plotly_js,
            embed_resources,
        }
    }

    /// Get a render configuration with defaults from this config
    pub fn get_render_config(&self, timeout_ms: Option<u64>) -> RenderConfig {
        RenderConfig {
            timeout_ms: timeout_ms.unwrap_or(self.render_timeout_ms),
            browser_path: self.browser_path.clone(),
            plotly_js: ResourceFile::new(&self.plotly_js),
            embed_resources: self.embed_resources,
        }
    }
}
