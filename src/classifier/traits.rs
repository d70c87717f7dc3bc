// Image classifier trait: the provider seam.

use anyhow::Result;
use async_trait::async_trait;

use crate::verdict::Classification;

/// Trait for classifying an image by URL. Implementations are async
/// because providers are HTTP APIs.
///
/// An `Err` means the classification is unavailable (network failure,
/// endpoint error); callers must treat that as "cannot determine a
/// verdict", never as "appropriate". Each call is a single in-flight
/// request; there is no caching or de-duplication across concurrent
/// calls for the same URL.
#[async_trait]
pub trait ImageClassifier: Send + Sync {
    /// Classify one image, returning per-category confidence scores.
    async fn classify(&self, image_url: &str) -> Result<Classification>;
}
