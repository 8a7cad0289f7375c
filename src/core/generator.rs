use async_trait::async_trait;

use crate::error::Result;

/// Backend that turns a prompt into a completion.
///
/// The planner only depends on this trait, so retry or timeout policies can
/// wrap an implementation without touching the normalization pipeline.
#[async_trait]
pub trait TextGenerator: Send + Sync + std::fmt::Debug {
    /// Return the model's completion text for `prompt`
    async fn generate(&self, prompt: &str) -> Result<String>;
}
