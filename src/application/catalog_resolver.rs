// Expands a metric selection into the plugins to render
use crate::domain::catalog::{Catalog, Plugin};
use indexmap::IndexMap;

/// Split a comma-separated selector. Returns `None` when nothing is selected,
/// which means "render everything".
pub fn parse_selector(selector: Option<&str>) -> Option<Vec<String>> {
    let keys: Vec<String> = selector?
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect();

    if keys.is_empty() { None } else { Some(keys) }
}

/// Resolve requested plugin or group keys against the catalog.
///
/// Plugin keys are taken as-is, group keys expand to their members. A plugin
/// appears at most once, at the position it was first selected. Unknown keys
/// and group members without a plugin entry are skipped.
pub fn resolve<'a>(requested: Option<&[String]>, catalog: &'a Catalog) -> IndexMap<&'a str, &'a Plugin> {
    let Some(requested) = requested.filter(|r| !r.is_empty()) else {
        return catalog.plugins().map(|(k, p)| (k.as_str(), p)).collect();
    };

    let mut selected = IndexMap::new();
    for key in requested {
        if let Some((name, plugin)) = catalog.plugin_entry(key) {
            selected.insert(name, plugin);
        } else if let Some(members) = catalog.group(key) {
            for member in members {
                if selected.contains_key(member.as_str()) {
                    continue;
                }
                if let Some((name, plugin)) = catalog.plugin_entry(member) {
                    selected.insert(name, plugin);
                }
            }
        } else {
            tracing::debug!("Ignoring unknown metric selector '{}'", key);
        }
    }

    selected
}
