//! Image-hosting upload client (ImgBB-style API).

use anyhow::{anyhow, Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;

const UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";

/// Extensions the admin panel accepts for product images.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Whether a filename carries an accepted image extension.
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    success: bool,
    #[serde(default)]
    data: Option<UploadData>,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    url: String,
}

pub struct ImgBbClient {
    http: reqwest::Client,
    api_key: String,
}

impl ImgBbClient {
    pub fn new(api_key: &str) -> ImgBbClient {
        ImgBbClient {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Upload raw image bytes, returning the hosted URL. Uploads never
    /// expire on the host; products keep the URL for their lifetime.
    pub async fn upload(&self, filename: &str, bytes: &[u8]) -> Result<String> {
        if !self.is_configured() {
            return Err(anyhow!("image host API key not configured"));
        }
        let form = [
            ("key", self.api_key.clone()),
            ("image", BASE64.encode(bytes)),
            ("name", filename.to_string()),
            ("expiration", "0".to_string()),
        ];
        let response = self
            .http
            .post(UPLOAD_URL)
            .form(&form)
            .send()
            .await
            .context("sending image upload")?;
        let result: UploadResponse = response
            .json()
            .await
            .context("decoding image host response")?;
        match result.data {
            Some(data) if result.success => Ok(data.url),
            _ => Err(anyhow!("image host rejected upload")),
        }
    }
}
