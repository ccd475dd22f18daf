// Repository trait for series name discovery
use async_trait::async_trait;

#[async_trait]
pub trait SeriesRepository: Send + Sync {
    /// List every series name recorded for `host`
    async fn list_series(&self, host: &str) -> anyhow::Result<Vec<String>>;
}
