// Catalog loading from a local file or an HTTP endpoint
use crate::application::catalog_source::CatalogSource;
use crate::domain::catalog::Catalog;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Toml,
    Json,
}

impl CatalogFormat {
    /// JSON for `.json` sources, TOML otherwise
    pub fn detect(location: &str) -> Self {
        let path = location.split(['?', '#']).next().unwrap_or(location);
        if path.to_ascii_lowercase().ends_with(".json") {
            CatalogFormat::Json
        } else {
            CatalogFormat::Toml
        }
    }

    pub fn parse(self, input: &str) -> Result<Catalog> {
        let catalog = match self {
            CatalogFormat::Toml => Catalog::from_toml_str(input)?,
            CatalogFormat::Json => Catalog::from_json_str(input)?,
        };
        Ok(catalog)
    }
}

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Http { url: String, client: reqwest::Client },
}

#[derive(Debug, Clone)]
pub struct CatalogLoader {
    location: Location,
    format: CatalogFormat,
}

impl CatalogLoader {
    pub fn new(source: &str, timeout: Duration) -> Result<Self> {
        let format = CatalogFormat::detect(source);
        let location = if source.starts_with("http://") || source.starts_with("https://") {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .context("Failed to build HTTP client")?;
            Location::Http {
                url: source.to_string(),
                client,
            }
        } else {
            Location::File(PathBuf::from(source))
        };

        Ok(Self { location, format })
    }

    async fn read_source(&self) -> Result<String> {
        match &self.location {
            Location::File(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display())),
            Location::Http { url, client } => {
                let response = client
                    .get(url)
                    .send()
                    .await
                    .context("Failed to send catalog request")?;

                if !response.status().is_success() {
                    anyhow::bail!("Catalog request failed with status {}", response.status());
                }

                response.text().await.context("Failed to read catalog response")
            }
        }
    }
}

#[async_trait]
impl CatalogSource for CatalogLoader {
    async fn load_catalog(&self) -> Result<Catalog> {
        let input = self.read_source().await?;
        let catalog = self.format.parse(&input)?;

        tracing::debug!(
            "Loaded catalog from {}: {} plugins, {} groups",
            self.location(),
            catalog.plugins().count(),
            catalog.groups().len()
        );
        if catalog.is_empty() {
            tracing::warn!("Catalog at {} defines no plugins", self.location());
        }

        Ok(catalog)
    }

    fn location(&self) -> String {
        match &self.location {
            Location::File(path) => path.display().to_string(),
            Location::Http { url, .. } => url.clone(),
        }
    }
}
