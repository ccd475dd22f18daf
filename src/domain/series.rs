// Series name helpers
//
// Series names are dot-delimited paths: `prefix.host.plugin[-instance].type[-instance]...`

/// Segment index holding the plugin (and plugin instance) of a series name.
pub const PLUGIN_SEGMENT: usize = 2;

/// Return the `index`-th dot-delimited segment of `series`, if present.
pub fn segment(series: &str, index: usize) -> Option<&str> {
    series.split('.').nth(index)
}

pub fn plugin_segment(series: &str) -> Option<&str> {
    segment(series, PLUGIN_SEGMENT)
}
