//! `andor.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Manifest file name searched for from the working directory upward.
pub const MANIFEST_NAME: &str = "andor.toml";

/// The top-level manifest structure for an andor project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AndorManifest {
    /// Which grammar to load and where sessions start.
    #[serde(default)]
    pub grammar: Option<GrammarConfig>,
    /// Log output settings.
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
    /// Lookahead defaults for `andor choices` and `andor walk`.
    #[serde(default)]
    pub lookahead: Option<LookaheadConfig>,
}

/// Grammar section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrammarConfig {
    /// Grammar file, relative to the manifest's directory.
    #[serde(default)]
    pub path: Option<String>,
    /// Start symbol; overrides the one in the grammar file.
    #[serde(default)]
    pub start: Option<String>,
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive: trace, debug, info, warn, error, off.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format: text or json.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Lookahead section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookaheadConfig {
    /// Depth used when `--depth` is not given.
    #[serde(default = "default_depth")]
    pub default_depth: usize,
}

fn default_depth() -> usize {
    1
}

impl AndorManifest {
    /// Search upward from `start_dir` for an `andor.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_NAME);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: AndorManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing andor.toml")
    }

    /// Grammar path from the manifest, resolved against `project_dir`.
    pub fn grammar_path(&self, project_dir: &Path) -> Option<PathBuf> {
        self.grammar
            .as_ref()
            .and_then(|g| g.path.as_deref())
            .map(|p| project_dir.join(p))
    }

    /// Start symbol from the manifest.
    pub fn start(&self) -> Option<&str> {
        self.grammar.as_ref().and_then(|g| g.start.as_deref())
    }

    /// Default lookahead depth.
    pub fn default_depth(&self) -> usize {
        self.lookahead
            .as_ref()
            .map(|l| l.default_depth)
            .unwrap_or_else(default_depth)
    }

    /// Generate the default template for `andor init`.
    pub fn template(grammar_file: &str, start: &str) -> String {
        format!(
            r#"[grammar]
path = "{grammar_file}"
start = "{start}"

[logging]
level = "warn"
format = "text"

[lookahead]
default_depth = 1
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_manifest() {
        let toml_str = r#"
[grammar]
path = "grammars/english.toml"
start = "Sentence"

[logging]
level = "debug"
format = "json"

[lookahead]
default_depth = 3
"#;
        let manifest = AndorManifest::from_str(toml_str).unwrap();
        assert_eq!(manifest.start(), Some("Sentence"));
        assert_eq!(
            manifest.grammar_path(Path::new("/proj")),
            Some(PathBuf::from("/proj/grammars/english.toml"))
        );
        let logging = manifest.logging.unwrap();
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.format, "json");
        assert_eq!(manifest.lookahead.unwrap().default_depth, 3);
    }

    #[test]
    fn parse_minimal_manifest() {
        let manifest = AndorManifest::from_str("").unwrap();
        assert!(manifest.grammar.is_none());
        assert_eq!(manifest.start(), None);
        assert_eq!(manifest.default_depth(), 1);
    }

    #[test]
    fn logging_defaults_fill_missing_keys() {
        let manifest = AndorManifest::from_str("[logging]\nlevel = \"info\"\n").unwrap();
        let logging = manifest.logging.unwrap();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "text");
    }

    #[test]
    fn template_parses() {
        let text = AndorManifest::template("grammar.toml", "S");
        let manifest = AndorManifest::from_str(&text).unwrap();
        assert_eq!(manifest.start(), Some("S"));
        assert_eq!(manifest.default_depth(), 1);
    }

    #[test]
    fn find_and_load_searches_upward() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_NAME),
            AndorManifest::template("grammar.toml", "Sentence"),
        )
        .unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let (manifest, found) = AndorManifest::find_and_load(&nested).unwrap().unwrap();
        assert_eq!(found, dir.path());
        assert_eq!(manifest.start(), Some("Sentence"));
    }
}
