// Sightengine implementation.
//
// Sightengine analyzes an image URL against a requested set of moderation
// models (nudity, weapons/alcohol/drugs, offensive symbols, gore, ...) and
// returns per-model confidence scores. Credentials and the model list are
// per-deployment configuration; every call reuses the same taxonomy.
//
// API docs: https://sightengine.com/docs/reference

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::traits::ImageClassifier;
use crate::verdict::Classification;

/// Default endpoint for the image check API.
pub const DEFAULT_API_URL: &str = "https://api.sightengine.com/1.0/check.json";

/// Sightengine image classifier.
pub struct SightengineClassifier {
    client: Client,
    endpoint: String,
    api_user: String,
    api_secret: String,
    /// Comma-delimited model list sent with every request.
    models: String,
}

impl SightengineClassifier {
    /// Create a classifier for the given credentials and model taxonomy.
    ///
    /// `endpoint` defaults to the public check URL; pass a different one
    /// for testing or regional deployments.
    pub fn new(
        endpoint: &str,
        api_user: String,
        api_secret: String,
        models: &[String],
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent("palisade/0.1 (image-moderation)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_user,
            api_secret,
            models: models.join(","),
        })
    }
}

#[async_trait]
impl ImageClassifier for SightengineClassifier {
    async fn classify(&self, image_url: &str) -> Result<Classification> {
        debug!(url = image_url, models = %self.models, "Classification request");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("url", image_url),
                ("models", &self.models),
                ("api_user", &self.api_user),
                ("api_secret", &self.api_secret),
            ])
            .send()
            .await
            .context("Failed to call Sightengine API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Sightengine API returned {}: {}", status, body);
        }

        let body: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse Sightengine response")?;

        // The API reports request-level failures (bad credentials, usage
        // limits) with a 200 status and an error object in the body.
        if let Ok(envelope) = serde_json::from_value::<StatusEnvelope>(body.clone()) {
            if envelope.status != "success" {
                let message = envelope
                    .error
                    .map(|e| e.message)
                    .unwrap_or_else(|| "no error detail".to_string());
                anyhow::bail!("Sightengine check failed: {message}");
            }
        }

        Classification::from_value(body).context("Unexpected Sightengine response shape")
    }
}

// --- Sightengine response envelope ---

#[derive(Deserialize)]
struct StatusEnvelope {
    status: String,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}
