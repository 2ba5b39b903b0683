//! Top-level configuration structure for tack.
//!
//! For file discovery, see the `discovery` module.

use serde::{Deserialize, Serialize};

use crate::build::BuildConfig;
use crate::watch::WatchConfig;

/// The whole of `tack.toml`: a `[bundle]` table and a `[watch]` table.
///
/// ```
/// use tack_config::{OutputFormat, TackConfig};
///
/// let config: TackConfig = toml::from_str(
///     r#"
///     [bundle]
///     entry = "app.js"
///     format = "esm"
///     "#,
/// )
/// .unwrap();
/// assert_eq!(config.bundle.entry, "app.js");
/// assert_eq!(config.bundle.format, OutputFormat::Esm);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TackConfig {
    #[serde(default)]
    pub bundle: BuildConfig,

    #[serde(default)]
    pub watch: WatchConfig,
}
