// Series selection for a plugin: prefix matching and sub-metric discovery
use crate::domain::catalog::PluginConfig;
use crate::domain::series::plugin_segment;
use indexmap::IndexSet;

/// Keep the series that start with `prefix + metric` and, when the plugin
/// defines a `regexp`, whose plugin segment matches it. Input order is kept.
pub fn match_series(
    series: &[String],
    prefix: &str,
    metric: &str,
    config: &PluginConfig,
) -> Vec<String> {
    let wanted = format!("{}{}", prefix, metric);

    series
        .iter()
        .filter(|s| s.starts_with(&wanted))
        .filter(|s| match &config.regexp {
            Some(re) => plugin_segment(s).is_some_and(|seg| re.is_match(seg)),
            None => true,
        })
        .cloned()
        .collect()
}

/// Distinct names found right after `prefix` in each series, in first-seen
/// order. `collectd.h.disk-sda.disk_ops.read` under `collectd.h.` gives
/// `disk-sda`.
pub fn extended_metrics(series: &[String], prefix: &str) -> IndexSet<String> {
    series
        .iter()
        .filter_map(|s| s.strip_prefix(prefix))
        .map(|rest| rest.split('.').next().unwrap_or(rest).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn series() -> Vec<String> {
        [
            "collectd.web01.cpu-0.cpu-idle",
            "collectd.web01.cpu-1.cpu-idle",
            "collectd.web01.cpufreq.cpufreq-0",
            "collectd.web01.load.load",
            "collectd.db01.cpu-0.cpu-idle",
            "collectd.web01.cpu-0.cpu-user",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn test_prefix_match_keeps_input_order() {
        let matched = match_series(&series(), "collectd.web01.", "cpu", &PluginConfig::default());
        assert_eq!(
            matched,
            [
                "collectd.web01.cpu-0.cpu-idle",
                "collectd.web01.cpu-1.cpu-idle",
                "collectd.web01.cpufreq.cpufreq-0",
                "collectd.web01.cpu-0.cpu-user",
            ]
        );
    }

    #[test]
    fn test_regexp_filters_plugin_segment() {
        let config = PluginConfig {
            regexp: Some(Regex::new(r"^cpu-\d+$").unwrap()),
            ..Default::default()
        };
        let matched = match_series(&series(), "collectd.web01.", "cpu", &config);
        assert_eq!(matched.len(), 3);
        assert!(matched.iter().all(|s| !s.contains("cpufreq")));
    }

    #[test]
    fn test_regexp_rejects_short_names() {
        let config = PluginConfig {
            regexp: Some(Regex::new(".*").unwrap()),
            ..Default::default()
        };
        let input = vec!["collectd.web01".to_string()];
        assert!(match_series(&input, "collectd.", "web01", &config).is_empty());
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(match_series(&series(), "collectd.web01.", "memory", &PluginConfig::default()).is_empty());
        assert!(match_series(&[], "collectd.web01.", "cpu", &PluginConfig::default()).is_empty());
    }

    #[test]
    fn test_extended_metrics_are_distinct_and_ordered() {
        let matched = match_series(&series(), "collectd.web01.", "cpu", &PluginConfig::default());
        let ext = extended_metrics(&matched, "collectd.web01.");
        let ext: Vec<&String> = ext.iter().collect();
        assert_eq!(ext, ["cpu-0", "cpu-1", "cpufreq"]);
    }

    #[test]
    fn test_extended_metrics_without_trailing_segment() {
        let input = vec!["collectd.web01.uptime".to_string(), "other.web01.x".to_string()];
        let ext = extended_metrics(&input, "collectd.web01.");
        assert_eq!(ext.len(), 1);
        assert!(ext.contains("uptime"));
    }
}
