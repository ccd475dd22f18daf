// Dashboard generation - turns a series list and a catalog into a dashboard document
use crate::application::catalog_resolver::{parse_selector, resolve};
use crate::application::panel_factory::{DEFAULT_SPAN, build_panel};
use crate::application::series_matcher::{extended_metrics, match_series};
use crate::domain::catalog::{Catalog, Plugin};
use crate::domain::dashboard::{Dashboard, Row};
use crate::domain::time_range::TimeRange;

pub const DEFAULT_SERIES_PREFIX: &str = "collectd";

/// What a caller asked to see.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub host: String,
    /// Comma-separated plugin or group keys; `None` renders every plugin.
    pub metric: Option<String>,
    /// Compact duration token such as `6h`.
    pub time: Option<String>,
}

impl Selection {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    pub fn with_metric(mut self, metric: impl Into<String>) -> Self {
        self.metric = Some(metric.into());
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct DashboardBuilder {
    series_prefix: String,
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SERIES_PREFIX)
    }
}

impl DashboardBuilder {
    pub fn new(series_prefix: impl Into<String>) -> Self {
        Self {
            series_prefix: series_prefix.into().trim_end_matches('.').to_string(),
        }
    }

    pub fn host_prefix(&self, host: &str) -> String {
        if self.series_prefix.is_empty() {
            format!("{}.", host)
        } else {
            format!("{}.{}.", self.series_prefix, host)
        }
    }

    /// Generate the dashboard for `selection`. Each graph rule of each selected
    /// plugin becomes one panel in its own row, once per matched series group.
    pub fn generate(&self, series: &[String], catalog: &Catalog, selection: &Selection) -> Dashboard {
        let range = TimeRange::resolve(selection.time.as_deref());
        let mut dashboard = Dashboard::skeleton(&selection.host, range.time);

        if series.is_empty() {
            tracing::debug!("No series for host {}, returning empty dashboard", selection.host);
            return dashboard;
        }

        let prefix = self.host_prefix(&selection.host);
        let requested = parse_selector(selection.metric.as_deref());
        let plugins = resolve(requested.as_deref(), catalog);

        for (metric, plugin) in plugins {
            let groups = Self::series_groups(series, &prefix, metric, plugin);
            tracing::debug!(
                "Plugin {}: {} series group(s), {} rule(s)",
                metric,
                groups.len(),
                plugin.rules.len()
            );

            for group in &groups {
                for rule in plugin.rules.values() {
                    let panel = build_panel(
                        group,
                        plugin.config.alias.as_deref(),
                        Some(DEFAULT_SPAN),
                        Some(range.interval.as_str()),
                        rule,
                    );
                    dashboard.rows.push(Row::new(metric.to_string(), vec![panel]));
                }
            }
        }

        dashboard
    }

    fn series_groups(series: &[String], prefix: &str, metric: &str, plugin: &Plugin) -> Vec<Vec<String>> {
        let matched = match_series(series, prefix, metric, &plugin.config);
        if !plugin.config.multi {
            return vec![matched];
        }

        // Groups are re-matched with the plugin key, not the sub-metric name,
        // so each group holds every series of the plugin. Narrowing them
        // changes the panels the host receives.
        extended_metrics(&matched, prefix)
            .iter()
            .map(|_sub_metric| match_series(series, prefix, metric, &plugin.config))
            .collect()
    }
}

/// Generate with the default `collectd` series prefix.
pub fn generate(series: &[String], catalog: &Catalog, selection: &Selection) -> Dashboard {
    DashboardBuilder::default().generate(series, catalog, selection)
}
