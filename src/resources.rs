// ABOUTME: Script resources for figure rendering
// ABOUTME: Loads plotly.js from a local file or URL and emits it linked or inline

use crate::errors::{Result, SlideError};
use log::{debug, info, warn};
use reqwest::blocking::Client;
use std::fs;
use std::path::Path;
use std::time::Duration;

const FETCH_ATTEMPTS: u32 = 3;
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const FIRST_RETRY_DELAY: Duration = Duration::from_secs(1);

/// A script (plotly.js) given as a file path or URL.
#[derive(Debug, Clone)]
pub struct ResourceFile {
    pub path: String,
    pub is_remote: bool,
}

impl ResourceFile {
    /// `http://` and `https://` paths are downloaded; anything else is a local file.
    pub fn new(path: &str) -> Self {
        let is_remote = path.starts_with("http://") || path.starts_with("https://");
        Self {
            path: path.to_string(),
            is_remote,
        }
    }

    /// Script source text, read from disk or downloaded.
    pub fn content(&self) -> Result<String> {
        if self.is_remote {
            self.download()
        } else {
            self.read_from_disk()
        }
    }

    /// Downloads the script, retrying transient failures with a doubling delay.
    fn download(&self) -> Result<String> {
        info!("Downloading script {}", self.path);
        let client = Client::builder().timeout(FETCH_TIMEOUT).build()?;

        let mut delay = FIRST_RETRY_DELAY;
        let mut attempt = 1;
        loop {
            match download_once(&client, &self.path) {
                Ok(body) => return Ok(body),
                Err(e) if attempt >= FETCH_ATTEMPTS => return Err(e),
                Err(e) => {
                    warn!(
                        "Download of {} failed ({}), attempt {}/{}; retrying in {:?}",
                        self.path, e, attempt, FETCH_ATTEMPTS, delay
                    );
                    std::thread::sleep(delay);
                    delay *= 2;
                    attempt += 1;
                }
            }
        }
    }

    fn read_from_disk(&self) -> Result<String> {
        let path = Path::new(&self.path);
        if !path.is_file() {
            return Err(SlideError::InvalidResourcePath(self.path.clone()));
        }
        debug!("Reading script from {:?}", path);
        Ok(fs::read_to_string(path)?)
    }

    /// `<script>` element for the page. Remote scripts are linked unless `embed`
    /// is set; local scripts are always inlined.
    pub fn script_tag(&self, embed: bool) -> Result<String> {
        if self.is_remote && !embed {
            Ok(format!(r#"<script src="{}"></script>"#, self.path))
        } else {
            let content = self.content()?;
            Ok(format!("<script>{}</script>", content.replace("</script", "<\\/script")))
        }
    }
}

fn download_once(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(SlideError::ValidationError(format!(
            "Downloading {} returned HTTP {}",
            url, status
        )));
    }
    Ok(response.text()?)
}
