// InfluxDB repository implementation (0.8 HTTP series API)
use crate::application::series_repository::SeriesRepository;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct InfluxRepository {
    client: reqwest::Client,
    url: String,
    database: String,
    user: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct InfluxSeries {
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default)]
    points: Vec<Vec<serde_json::Value>>,
}

impl InfluxRepository {
    pub fn new(
        url: String,
        database: String,
        user: String,
        password: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: url.trim_end_matches('/').to_string(),
            database,
            user,
            password,
        })
    }

    /// Query listing every series whose name contains `.host.`
    fn list_series_query(host: &str) -> String {
        format!(r"list series /\.{}\./", regex::escape(host))
    }

    fn build_query_url(&self, query: &str) -> String {
        format!(
            "{}/db/{}/series?u={}&p={}&q={}",
            self.url,
            urlencoding::encode(&self.database),
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            urlencoding::encode(query)
        )
    }

    async fn execute_query(&self, query: &str) -> Result<Vec<InfluxSeries>> {
        let url = self.build_query_url(query);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to InfluxDB")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("InfluxDB query failed with status {}: {}", status, body);
        }

        response
            .json::<Vec<InfluxSeries>>()
            .await
            .context("Failed to parse InfluxDB response")
    }

    /// Pull series names out of a `list series` result. Names live in the
    /// `name` column, which is the second one when columns are not reported.
    fn series_names(response: Vec<InfluxSeries>) -> Vec<String> {
        let mut names = Vec::new();
        for s in response {
            let name_idx = s.columns.iter().position(|c| c == "name").unwrap_or(1);
            for point in &s.points {
                if let Some(name) = point.get(name_idx).and_then(|v| v.as_str()) {
                    names.push(name.to_string());
                }
            }
        }
        names
    }
}

#[async_trait]
impl SeriesRepository for InfluxRepository {
    async fn list_series(&self, host: &str) -> Result<Vec<String>> {
        let query = Self::list_series_query(host);
        tracing::debug!("Executing series query: {}", query);

        let response = self.execute_query(&query).await?;
        let names = Self::series_names(response);

        tracing::debug!("Found {} series for host {}", names.len(), host);
        Ok(names)
    }
}
