use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Translator;

pub const DEFAULT_ENDPOINT: &str = "https://translation.googleapis.com";
pub const DEFAULT_LOCATION: &str = "global";

/// Google Cloud Translation (v3) `translateText` client.
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
    project_id: String,
    location: String,
    access_token: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateRequest<'a> {
    contents: [&'a str; 1],
    mime_type: &'static str,
    source_language_code: &'a str,
    target_language_code: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    translations: Vec<TranslatedItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslatedItem {
    #[serde(default)]
    translated_text: String,
}

impl GoogleTranslator {
    pub fn new(project_id: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            project_id: project_id.into(),
            location: DEFAULT_LOCATION.to_string(),
            access_token: None,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token;
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/v3/projects/{}/locations/{}:translateText",
            self.endpoint.trim_end_matches('/'),
            self.project_id,
            self.location
        )
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate_one(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<Option<String>> {
        let body = TranslateRequest {
            contents: [text],
            mime_type: "text/plain",
            source_language_code: source,
            target_language_code: target,
        };

        let mut request = self.client.post(self.url()).json(&body);
        if let Some(token) = &self.access_token {
            request = request
                .bearer_auth(token)
                .header("x-goog-user-project", &self.project_id);
        }

        let response = request
            .send()
            .await
            .context("Translation request failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            bail!("Translation API returned {}: {}", status, detail.trim());
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .context("Invalid translation API response")?;

        Ok(parsed
            .translations
            .into_iter()
            .next()
            .map(|item| item.translated_text))
    }
}
