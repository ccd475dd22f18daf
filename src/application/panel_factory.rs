// Panel construction: targets, aliases, colors, and template merging
use crate::domain::catalog::GraphRule;
use crate::domain::dashboard::{Panel, Target};
use crate::domain::series::{plugin_segment, segment};
use indexmap::IndexMap;
use serde_json::{Map, Value, json};

pub const DEFAULT_SPAN: u32 = 12;
pub const DEFAULT_TITLE: &str = "Default Title";
const METRIC_PLACEHOLDER: &str = "@metric";

/// Colors handed out to aliases without an explicit color.
const PALETTE: [&str; 24] = [
    "#7EB26D", "#EAB839", "#6ED0E0", "#EF843C", "#E24D42", "#1F78C1", "#BA43A9", "#705DA0",
    "#508642", "#CCA300", "#447EBC", "#C15C17", "#890F02", "#0A437C", "#6D1F62", "#584477",
    "#B7DBAB", "#F4D598", "#70DBED", "#F9BA8F", "#F29191", "#82B5D8", "#E5A8E2", "#AEA2E0",
];

/// Stable color for an alias, so regenerated dashboards keep their colors.
pub fn alias_color(alias: &str) -> &'static str {
    // FNV-1a
    let hash = alias.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |h, b| {
        (h ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
    });
    PALETTE[(hash % PALETTE.len() as u64) as usize]
}

pub fn build_target(
    series: &str,
    alias: String,
    interval: Option<&str>,
    column: Option<&str>,
    apply: Option<&str>,
) -> Target {
    Target::new(series.to_string(), alias, interval, column, apply)
}

fn panel_defaults(span: u32) -> Map<String, Value> {
    let mut options = Map::new();
    options.insert("type".to_string(), json!("graphite"));
    options.insert("span".to_string(), json!(span));
    options.insert("y_formats".to_string(), json!(["none"]));
    options.insert("grid".to_string(), json!({ "max": null, "min": 0, "leftMin": 0 }));
    options.insert("lines".to_string(), json!(true));
    options.insert("fill".to_string(), json!(1));
    options.insert("linewidth".to_string(), json!(1));
    options.insert("nullPointMode".to_string(), json!("null"));
    options
}

/// Build the panel for one graph rule over a group of matched series.
///
/// `series_alias` prefixes every target alias; without it each series is
/// prefixed with its own plugin segment. Template fields in `rule.panel`
/// override the defaults, except `targets` and `aliasColors` which are always
/// generated.
pub fn build_panel(
    series: &[String],
    series_alias: Option<&str>,
    span: Option<u32>,
    interval: Option<&str>,
    rule: &GraphRule,
) -> Panel {
    let span = span.unwrap_or(DEFAULT_SPAN);
    let interval = interval.unwrap_or(Target::DEFAULT_INTERVAL);

    let mut targets = Vec::new();
    let mut alias_colors = IndexMap::new();

    for (suffix, style) in &rule.graph {
        for s in series.iter().filter(|s| s.ends_with(suffix.as_str())) {
            let label = rule
                .alias
                .and_then(|a| segment(s, a.position))
                .or(style.alias.as_deref())
                .unwrap_or(suffix.as_str());
            let alias = match series_alias.or_else(|| plugin_segment(s)) {
                Some(prefix) => format!("{}.{}", prefix, label),
                None => label.to_string(),
            };

            let color = match &style.color {
                Some(color) => color.clone(),
                None => alias_color(&alias).to_string(),
            };
            alias_colors.insert(alias.clone(), color);

            targets.push(build_target(
                s,
                alias,
                Some(interval),
                style.column.as_deref(),
                style.apply.as_deref(),
            ));
        }
    }

    let mut options = panel_defaults(span);
    for (key, value) in &rule.panel {
        if key == "targets" || key == "aliasColors" {
            continue;
        }
        options.insert(key.clone(), value.clone());
    }

    let mut title = match options.remove("title") {
        Some(Value::String(title)) => title,
        Some(other) => other.to_string(),
        None => DEFAULT_TITLE.to_string(),
    };
    if let Some(metric) = series.first().and_then(|s| plugin_segment(s)) {
        title = title.replacen(METRIC_PLACEHOLDER, metric, 1);
    }

    Panel {
        title,
        options,
        targets,
        alias_colors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{AliasPosition, GraphStyle};

    fn series(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn rule(suffixes: &[(&str, GraphStyle)]) -> GraphRule {
        GraphRule {
            graph: suffixes
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_and_suffix_alias() {
        let matched = series(&["collectd.web01.cpu.0.value", "collectd.web01.cpu.1.value"]);
        let panel = build_panel(&matched, None, None, None, &rule(&[("value", GraphStyle::default())]));

        assert_eq!(panel.title, "Default Title");
        assert_eq!(panel.options["type"], "graphite");
        assert_eq!(panel.options["span"], 12);
        assert_eq!(panel.options["nullPointMode"], "null");
        assert_eq!(panel.targets.len(), 2);
        for (target, name) in panel.targets.iter().zip(&matched) {
            assert_eq!(&target.series, name);
            assert_eq!(target.alias, "cpu.value");
            assert_eq!(target.column, "value");
            assert_eq!(target.interval, "1m");
            assert_eq!(target.function, "mean");
        }
        // same alias twice collapses to one color entry
        assert_eq!(panel.alias_colors.len(), 1);
    }

    #[test]
    fn test_alias_precedence() {
        let matched = series(&["collectd.web01.df.root.df_complex-free"]);
        let style = GraphStyle {
            alias: Some("free".to_string()),
            ..Default::default()
        };

        let mut graph_rule = rule(&[("free", style)]);
        let panel = build_panel(&matched, Some("disk"), None, None, &graph_rule);
        assert_eq!(panel.targets[0].alias, "disk.free");

        graph_rule.alias = Some(AliasPosition { position: 3 });
        let panel = build_panel(&matched, Some("disk"), None, None, &graph_rule);
        assert_eq!(panel.targets[0].alias, "disk.root");

        // out of range positions fall back to the style alias
        graph_rule.alias = Some(AliasPosition { position: 9 });
        let panel = build_panel(&matched, None, None, None, &graph_rule);
        assert_eq!(panel.targets[0].alias, "df.free");
    }

    #[test]
    fn test_style_overrides_target_fields_and_color() {
        let matched = series(&["collectd.web01.interface.if_octets.rx", "collectd.web01.interface.if_octets.tx"]);
        let rx = GraphStyle {
            column: Some("rx".to_string()),
            apply: Some("derivative".to_string()),
            color: Some("#447EBC".to_string()),
            alias: None,
        };
        let panel = build_panel(&matched, None, Some(6), Some("30s"), &rule(&[("rx", rx), ("tx", GraphStyle::default())]));

        assert_eq!(panel.options["span"], 6);
        assert_eq!(panel.targets[0].column, "rx");
        assert_eq!(panel.targets[0].function, "derivative");
        assert_eq!(panel.targets[0].interval, "30s");
        assert_eq!(panel.alias_colors["interface.rx"], "#447EBC");
        assert_eq!(panel.alias_colors["interface.tx"], alias_color("interface.tx"));
    }

    #[test]
    fn test_template_merge_and_metric_title() {
        let matched = series(&["collectd.web01.disk-sda.disk_ops.read"]);
        let mut graph_rule = rule(&[("read", GraphStyle::default())]);
        graph_rule.panel = json!({
            "title": "Disk ops @metric",
            "y_formats": ["ops"],
            "stack": true,
            "targets": [],
        })
        .as_object()
        .cloned()
        .unwrap();

        let panel = build_panel(&matched, None, None, None, &graph_rule);
        assert_eq!(panel.title, "Disk ops disk-sda");
        assert_eq!(panel.options["y_formats"], json!(["ops"]));
        assert_eq!(panel.options["stack"], true);
        assert_eq!(panel.options["lines"], true);
        assert!(!panel.options.contains_key("targets"));
        assert_eq!(panel.targets.len(), 1);
    }

    #[test]
    fn test_metric_title_without_series() {
        let mut graph_rule = rule(&[("value", GraphStyle::default())]);
        graph_rule.panel.insert("title".to_string(), json!("CPU @metric"));
        let panel = build_panel(&[], None, None, None, &graph_rule);
        assert_eq!(panel.title, "CPU @metric");
        assert!(panel.targets.is_empty());
    }

    #[test]
    fn test_plain_title_kept_with_series() {
        let matched = series(&["collectd.web01.memory.memory-used"]);
        let mut graph_rule = rule(&[("used", GraphStyle::default())]);
        graph_rule.panel.insert("title".to_string(), json!("Memory"));
        let panel = build_panel(&matched, None, None, None, &graph_rule);
        assert_eq!(panel.title, "Memory");
    }

    #[test]
    fn test_alias_color_is_stable() {
        assert_eq!(alias_color("cpu.user"), alias_color("cpu.user"));
        assert!(PALETTE.contains(&alias_color("")));
    }
}
