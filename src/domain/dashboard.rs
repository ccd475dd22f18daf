// Dashboard document model, serialized in the shape the visualization host expects
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

pub const ROW_HEIGHT: &str = "250px";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub from: String,
    pub to: String,
}

/// One query against the metrics store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub series: String,
    pub alias: String,
    pub column: String,
    pub interval: String,
    pub function: String,
}

impl Target {
    pub const DEFAULT_COLUMN: &'static str = "value";
    pub const DEFAULT_INTERVAL: &'static str = "1m";
    pub const DEFAULT_FUNCTION: &'static str = "mean";

    pub fn new(
        series: String,
        alias: String,
        interval: Option<&str>,
        column: Option<&str>,
        function: Option<&str>,
    ) -> Self {
        Self {
            series,
            alias,
            column: column.unwrap_or(Self::DEFAULT_COLUMN).to_string(),
            interval: interval.unwrap_or(Self::DEFAULT_INTERVAL).to_string(),
            function: function.unwrap_or(Self::DEFAULT_FUNCTION).to_string(),
        }
    }
}

/// A graph panel. `options` carries every rendering field other than the
/// title (type, span, grid, ...), in the order they were merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub title: String,
    #[serde(flatten)]
    pub options: Map<String, Value>,
    pub targets: Vec<Target>,
    #[serde(rename = "aliasColors")]
    pub alias_colors: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub title: String,
    pub height: String,
    pub panels: Vec<Panel>,
    pub grid: Value,
}

impl Row {
    pub fn new(title: String, panels: Vec<Panel>) -> Self {
        Self {
            title,
            height: ROW_HEIGHT.to_string(),
            panels,
            grid: json!({ "max": null, "min": 0 }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub title: String,
    pub time: TimeWindow,
    pub rows: Vec<Row>,
    pub services: Map<String, Value>,
}

impl Dashboard {
    /// An empty dashboard for `host`, ready to receive rows.
    pub fn skeleton(host: &str, time: TimeWindow) -> Self {
        Self {
            title: format!("Scripted Dashboard for {}", host),
            time,
            rows: Vec::new(),
            services: Map::new(),
        }
    }

    pub fn panel_count(&self) -> usize {
        self.rows.iter().map(|r| r.panels.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_defaults() {
        let target = Target::new("a.b.c".to_string(), "c.value".to_string(), None, None, None);
        assert_eq!(target.column, "value");
        assert_eq!(target.interval, "1m");
        assert_eq!(target.function, "mean");
    }

    #[test]
    fn test_serialized_field_names() {
        let mut options = Map::new();
        options.insert("type".to_string(), json!("graphite"));
        let mut alias_colors = IndexMap::new();
        alias_colors.insert("cpu.value".to_string(), "#7EB26D".to_string());

        let row = Row::new(
            "cpu".to_string(),
            vec![Panel {
                title: "CPU".to_string(),
                options,
                targets: vec![Target::new(
                    "collectd.h.cpu.value".to_string(),
                    "cpu.value".to_string(),
                    Some("30s"),
                    None,
                    Some("max"),
                )],
                alias_colors,
            }],
        );
        let mut dashboard = Dashboard::skeleton(
            "h",
            TimeWindow {
                from: "now-6h".to_string(),
                to: "now".to_string(),
            },
        );
        dashboard.rows.push(row);

        let value = serde_json::to_value(&dashboard).unwrap();
        assert_eq!(value["title"], "Scripted Dashboard for h");
        assert_eq!(value["time"]["from"], "now-6h");
        assert_eq!(value["services"], json!({}));
        assert_eq!(value["rows"][0]["height"], "250px");
        assert_eq!(value["rows"][0]["grid"], json!({ "max": null, "min": 0 }));

        let panel = &value["rows"][0]["panels"][0];
        assert_eq!(panel["type"], "graphite");
        assert_eq!(panel["aliasColors"]["cpu.value"], "#7EB26D");
        assert_eq!(panel["targets"][0]["function"], "max");
        assert_eq!(panel["targets"][0]["interval"], "30s");
        assert_eq!(dashboard.panel_count(), 1);
    }
}
