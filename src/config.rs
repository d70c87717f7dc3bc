use std::env;

use anyhow::Result;

use crate::classifier::sightengine::DEFAULT_API_URL;

/// Moderation models requested when SIGHTENGINE_MODELS isn't set.
/// `wad` is the combined weapons/alcohol/drugs model.
pub const DEFAULT_MODELS: [&str; 4] = ["nudity", "wad", "offensive", "gore"];

/// Max concurrent classification calls per message when
/// PALISADE_CONCURRENCY isn't set.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    pub api_user: String,
    pub api_secret: String,
    /// Check endpoint (defaults to the public Sightengine URL). Override
    /// for testing or regional deployments.
    pub api_url: String,
    /// Moderation model taxonomy sent with every classification call.
    pub models: Vec<String>,
    /// Bound on concurrent classification calls per message.
    pub concurrency: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything except the credentials has a default; call
    /// [`Config::require_credentials`] before any operation that talks
    /// to the classification API.
    pub fn load() -> Result<Self> {
        let models = match env::var("SIGHTENGINE_MODELS") {
            Ok(raw) => raw
                .split(',')
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect(),
            Err(_) => DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
        };

        let concurrency = env::var("PALISADE_CONCURRENCY")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_CONCURRENCY);

        Ok(Self {
            api_user: env::var("SIGHTENGINE_API_USER").unwrap_or_default(),
            api_secret: env::var("SIGHTENGINE_API_SECRET").unwrap_or_default(),
            api_url: env::var("SIGHTENGINE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            models,
            concurrency,
        })
    }

    /// Check that the Sightengine credentials are configured.
    /// Call this before any operation that classifies images.
    pub fn require_credentials(&self) -> Result<()> {
        if self.api_user.is_empty() || self.api_secret.is_empty() {
            anyhow::bail!(
                "SIGHTENGINE_API_USER / SIGHTENGINE_API_SECRET not set. Add them to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }
}
