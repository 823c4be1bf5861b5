/*!
 * Configuration
 * Reporter and visualizer settings, loadable from JSON and overridable from the CLI
 */

use crate::errors::{ConfigError, ConfigResult};
use crate::trace::{GrammarSpec, Tick};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use crate::trace::ParseMode;

/// Default chart path, relative to the working directory
pub const DEFAULT_OUTPUT: &str = "./trace.png";
pub const DEFAULT_WIDTH: u32 = 1200;
pub const DEFAULT_HEIGHT: u32 = 160;

/// Aggregate reporter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory holding one trace file per benchmark run
    pub dir: PathBuf,
    /// Expected task count; inferred from the largest task id when unset
    pub tasks: Option<usize>,
    /// Emit the summary as JSON instead of text
    pub json: bool,
    pub mode: ParseMode,
}

impl ReportConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            tasks: None,
            json: false,
            mode: ParseMode::Lenient,
        }
    }
}

/// Partial visualizer settings
///
/// Every field is optional so a config file and command line flags can be
/// layered with [`VisualizerSettings::merge`] before [`VisualizerSettings::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisualizerSettings {
    pub input: Option<PathBuf>,
    pub grammar: Option<GrammarSpec>,
    /// Trace end time closing the last occupancy interval
    pub end_ms: Option<Tick>,
    pub title: Option<String>,
    pub output: Option<PathBuf>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub mode: Option<ParseMode>,
}

impl VisualizerSettings {
    /// Load settings from a JSON file
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text, &path.display().to_string())
    }

    pub fn from_json(text: &str, source: &str) -> ConfigResult<Self> {
        serde_json::from_str(text).map_err(|e| ConfigError::Json {
            path: source.to_string(),
            source: e,
        })
    }

    /// Layer `overrides` on top of `self`; set fields in `overrides` win
    pub fn merge(self, overrides: VisualizerSettings) -> Self {
        Self {
            input: overrides.input.or(self.input),
            grammar: overrides.grammar.or(self.grammar),
            end_ms: overrides.end_ms.or(self.end_ms),
            title: overrides.title.or(self.title),
            output: overrides.output.or(self.output),
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
            mode: overrides.mode.or(self.mode),
        }
    }

    /// Fill defaults and check required fields
    pub fn resolve(self) -> ConfigResult<VisualizerConfig> {
        let input = self.input.ok_or(ConfigError::MissingInput)?;
        let end_ms = self.end_ms.ok_or(ConfigError::MissingEndTime)?;
        let width = self.width.unwrap_or(DEFAULT_WIDTH);
        let height = self.height.unwrap_or(DEFAULT_HEIGHT);

        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidValue(format!(
                "chart size must be non-zero, got {}x{}",
                width, height
            )));
        }

        Ok(VisualizerConfig {
            input,
            grammar: self.grammar.unwrap_or_default(),
            end_ms,
            title: self.title.filter(|t| !t.is_empty()),
            output: self.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            width,
            height,
            mode: self.mode.unwrap_or_default(),
        })
    }
}

/// Fully resolved visualizer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualizerConfig {
    pub input: PathBuf,
    pub grammar: GrammarSpec,
    pub end_ms: Tick,
    pub title: Option<String>,
    /// Overwritten on every run
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub mode: ParseMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_requires_end_time() {
        let settings = VisualizerSettings {
            input: Some("trace.log".into()),
            ..Default::default()
        };
        assert!(matches!(settings.resolve(), Err(ConfigError::MissingEndTime)));
    }

    #[test]
    fn test_resolve_requires_input() {
        let settings = VisualizerSettings {
            end_ms: Some(60),
            ..Default::default()
        };
        assert!(matches!(settings.resolve(), Err(ConfigError::MissingInput)));
    }

    #[test]
    fn test_resolve_defaults() {
        let config = VisualizerSettings {
            input: Some("trace.log".into()),
            end_ms: Some(60),
            title: Some(String::new()),
            ..Default::default()
        }
        .resolve()
        .unwrap();

        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.grammar, GrammarSpec::default());
        assert_eq!(config.mode, ParseMode::Lenient);
        assert_eq!(config.title, None);
    }

    #[test]
    fn test_resolve_rejects_zero_size() {
        let settings = VisualizerSettings {
            input: Some("trace.log".into()),
            end_ms: Some(60),
            height: Some(0),
            ..Default::default()
        };
        assert!(matches!(settings.resolve(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let file = VisualizerSettings::from_json(
            r#"{
                "input": "run1.log",
                "end_ms": 3000,
                "title": "LLREF",
                "grammar": {"kind": "core_first", "core": 1}
            }"#,
            "inline",
        )
        .unwrap();
        let cli = VisualizerSettings {
            end_ms: Some(1500),
            ..Default::default()
        };

        let config = file.merge(cli).resolve().unwrap();
        assert_eq!(config.end_ms, 1500);
        assert_eq!(config.input, PathBuf::from("run1.log"));
        assert_eq!(config.title.as_deref(), Some("LLREF"));
        assert_eq!(
            config.grammar,
            GrammarSpec::CoreFirst {
                core: 1,
                prefix: "BWorker".into(),
            }
        );
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(matches!(
            VisualizerSettings::from_json(r#"{"sentinel": 30}"#, "inline"),
            Err(ConfigError::Json { .. })
        ));
    }
}
