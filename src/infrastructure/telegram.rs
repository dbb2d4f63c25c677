//! Telegram Bot API client

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::shared::errors::NotifyError;

const MESSAGE_TIMEOUT: Duration = Duration::from_secs(10);
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(20);

/// Telegram's uniform response envelope
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

/// Bot client bound to one token and one destination chat
pub struct TelegramClient {
    http: Client,
    token: String,
    chat_id: String,
    dry_run: bool,
}

impl TelegramClient {
    pub fn new(token: String, chat_id: String, dry_run: bool) -> Self {
        Self {
            http: Client::new(),
            token,
            chat_id,
            dry_run,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("https://api.telegram.org/bot{}/{}", self.token, method)
    }

    /// Send a plain text message to the configured chat
    pub async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        if self.dry_run {
            info!("[dry-run] sendMessage suppressed:\n{}", text);
            return Ok(());
        }

        let response = self
            .http
            .post(self.method_url("sendMessage"))
            .timeout(MESSAGE_TIMEOUT)
            .json(&json!({ "chat_id": self.chat_id, "text": text }))
            .send()
            .await?;

        check_response(response).await
    }

    /// Upload a PNG to the configured chat with an optional caption
    pub async fn send_photo(&self, path: &Path, caption: Option<&str>) -> Result<(), NotifyError> {
        if self.dry_run {
            info!("[dry-run] sendPhoto suppressed: {}", path.display());
            return Ok(());
        }

        let bytes = tokio::fs::read(path).await.map_err(|e| NotifyError::PhotoRead {
            path: path.display().to_string(),
            source: e,
        })?;

        let photo = Part::bytes(bytes)
            .file_name("btc_chart.png")
            .mime_str("image/png")?;
        let mut form = Form::new()
            .text("chat_id", self.chat_id.clone())
            .part("photo", photo);
        if let Some(caption) = caption {
            form = form.text("caption", caption.to_string());
        }

        let response = self
            .http
            .post(self.method_url("sendPhoto"))
            .timeout(UPLOAD_TIMEOUT)
            .multipart(form)
            .send()
            .await?;

        check_response(response).await
    }

    /// GET a bot method and return the raw JSON, for diagnostics
    pub async fn call_raw(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, NotifyError> {
        let response = self
            .http
            .get(self.method_url(method))
            .timeout(MESSAGE_TIMEOUT)
            .query(params)
            .send()
            .await?;
        Ok(response.json().await?)
    }
}

async fn check_response(response: reqwest::Response) -> Result<(), NotifyError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(NotifyError::BadStatus { status, body });
    }

    // Telegram can answer 200 with ok=false
    let api: ApiResponse = response.json().await?;
    if api.ok {
        Ok(())
    } else {
        Err(NotifyError::Rejected(
            api.description.unwrap_or_else(|| "no description".to_string()),
        ))
    }
}
