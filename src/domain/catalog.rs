// Visualization catalog: plugins, their graph rules, and selector groups
use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to parse TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Failed to parse JSON catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Plugin '{plugin}' has an invalid regexp: {source}")]
    InvalidPattern {
        plugin: String,
        #[source]
        source: regex::Error,
    },
    #[error("Plugin '{0}' defines no graph rules")]
    NoGraphRules(String),
}

/// How a single series suffix is drawn inside a panel.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphStyle {
    pub column: Option<String>,
    pub apply: Option<String>,
    pub alias: Option<String>,
    pub color: Option<String>,
}

/// Take the alias from a fixed segment of the series name.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasPosition {
    pub position: usize,
}

/// One rendering recipe; every rule yields one panel.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphRule {
    #[serde(default)]
    pub graph: IndexMap<String, GraphStyle>,
    #[serde(default)]
    pub alias: Option<AliasPosition>,
    #[serde(default)]
    pub panel: Map<String, Value>,
}

#[derive(Debug, Clone, Default)]
pub struct PluginConfig {
    pub alias: Option<String>,
    pub multi: bool,
    pub regexp: Option<Regex>,
}

#[derive(Debug, Clone)]
pub struct Plugin {
    pub config: PluginConfig,
    pub rules: IndexMap<String, GraphRule>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    groups: IndexMap<String, Vec<String>>,
    plugins: IndexMap<String, Plugin>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPluginConfig {
    alias: Option<String>,
    #[serde(default)]
    multi: bool,
    regexp: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPlugin {
    #[serde(default)]
    config: RawPluginConfig,
    #[serde(flatten)]
    rules: IndexMap<String, GraphRule>,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    groups: IndexMap<String, Vec<String>>,
    #[serde(flatten)]
    plugins: IndexMap<String, RawPlugin>,
}

impl Catalog {
    pub fn from_toml_str(input: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = toml::from_str(input)?;
        Self::from_raw(raw)
    }

    pub fn from_json_str(input: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(input)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawCatalog) -> Result<Self, CatalogError> {
        let mut plugins = IndexMap::with_capacity(raw.plugins.len());

        for (key, plugin) in raw.plugins {
            if plugin.rules.is_empty() {
                return Err(CatalogError::NoGraphRules(key));
            }

            let regexp = match plugin.config.regexp {
                Some(pattern) => Some(Regex::new(&pattern).map_err(|source| {
                    CatalogError::InvalidPattern {
                        plugin: key.clone(),
                        source,
                    }
                })?),
                None => None,
            };

            let config = PluginConfig {
                alias: plugin.config.alias,
                multi: plugin.config.multi,
                regexp,
            };
            plugins.insert(
                key,
                Plugin {
                    config,
                    rules: plugin.rules,
                },
            );
        }

        Ok(Self {
            groups: raw.groups,
            plugins,
        })
    }

    pub fn plugin(&self, key: &str) -> Option<&Plugin> {
        self.plugins.get(key)
    }

    pub fn plugin_entry(&self, key: &str) -> Option<(&str, &Plugin)> {
        self.plugins.get_key_value(key).map(|(k, p)| (k.as_str(), p))
    }

    pub fn plugins(&self) -> impl Iterator<Item = (&String, &Plugin)> {
        self.plugins.iter()
    }

    pub fn group(&self, key: &str) -> Option<&[String]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn groups(&self) -> &IndexMap<String, Vec<String>> {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
