use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User configuration.
///
/// Example YAML:
/// ```yaml
/// ledger: ~/golf/ledger.yaml
/// color: never
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Ledger file to read (default: ~/.config/golf-handicap/ledger.yaml)
    #[serde(default)]
    pub ledger: Option<PathBuf>,

    #[serde(default)]
    pub color: ColorMode,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn use_colors(self) -> bool {
        match self {
            ColorMode::Auto => crate::output::should_use_colors(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}
