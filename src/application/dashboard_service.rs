// Dashboard service - Use case for building dashboards
use crate::application::catalog_source::CatalogSource;
use crate::application::dashboard_builder::{DashboardBuilder, Selection};
use crate::application::series_repository::SeriesRepository;
use crate::domain::catalog::Catalog;
use crate::domain::dashboard::Dashboard;
use anyhow::Context;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn SeriesRepository>,
    catalog_source: Arc<dyn CatalogSource>,
    builder: DashboardBuilder,
}

impl DashboardService {
    pub fn new(
        repository: Arc<dyn SeriesRepository>,
        catalog_source: Arc<dyn CatalogSource>,
        builder: DashboardBuilder,
    ) -> Self {
        Self {
            repository,
            catalog_source,
            builder,
        }
    }

    pub async fn get_dashboard(&self, selection: &Selection) -> anyhow::Result<Dashboard> {
        let start_time = Instant::now();

        // Series and catalog are independent; either failure aborts the request
        let (series, catalog) = tokio::try_join!(
            async {
                self.repository
                    .list_series(&selection.host)
                    .await
                    .with_context(|| format!("Failed to list series for host {}", selection.host))
            },
            async {
                self.catalog_source
                    .load_catalog()
                    .await
                    .with_context(|| format!("Failed to load catalog from {}", self.catalog_source.location()))
            },
        )?;

        let dashboard = self.builder.generate(&series, &catalog, selection);

        tracing::info!(
            host = %selection.host,
            series = series.len(),
            rows = dashboard.rows.len(),
            panels = dashboard.panel_count(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Generated dashboard"
        );

        Ok(dashboard)
    }

    pub async fn get_catalog(&self) -> anyhow::Result<Catalog> {
        self.catalog_source
            .load_catalog()
            .await
            .with_context(|| format!("Failed to load catalog from {}", self.catalog_source.location()))
    }
}
