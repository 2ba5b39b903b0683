//! Watch settings consumed by the `watch` task.

use serde::{Deserialize, Serialize};

/// What to do with changes that arrive while a bundle run is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Coalesce every pending change into exactly one follow-up run
    #[default]
    Queue,
    /// Discard changes seen during a run
    Drop,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchConfig {
    /// Glob patterns, relative to the project root, that trigger a rebuild
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,

    /// Glob patterns that never trigger a rebuild
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,

    /// Repeated events for one path inside this window count once
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default)]
    pub overlap: OverlapPolicy,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
            ignore: default_ignore(),
            debounce_ms: default_debounce_ms(),
            overlap: OverlapPolicy::default(),
        }
    }
}

fn default_patterns() -> Vec<String> {
    vec!["src/**/*.js".to_string()]
}

fn default_ignore() -> Vec<String> {
    vec!["node_modules/**".to_string(), "dist/**".to_string()]
}

fn default_debounce_ms() -> u64 {
    50
}
