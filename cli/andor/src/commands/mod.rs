//! CLI command implementations.

pub mod compile;
pub mod init;
pub mod query;
pub mod stats;
pub mod walk;

use std::path::{Path, PathBuf};

use andor_core::GuidedDecisionGraph;
use andor_grammar::GrammarGraph;
use anyhow::{bail, Context, Result};

use crate::manifest::AndorManifest;

/// Token spelling for the accept marker on the command line.
pub const ACCEPT_ARG: &str = "-";

/// How the accept marker is shown in text output.
pub const ACCEPT_LABEL: &str = "<accept>";

/// A loaded grammar plus the start symbol sessions should use.
#[derive(Debug)]
pub struct Project {
    pub grammar: GrammarGraph,
    pub start: String,
    pub default_depth: usize,
}

impl Project {
    /// Resolve the grammar and start symbol from flags and the manifest.
    ///
    /// `--grammar` is relative to the working directory; `[grammar] path` is
    /// relative to the manifest. The start symbol comes from `--start`, then
    /// `[grammar] start`, then the grammar file itself.
    pub fn load(
        cwd: &Path,
        manifest: Option<(&AndorManifest, &Path)>,
        grammar_flag: Option<&Path>,
        start_flag: Option<&str>,
    ) -> Result<Self> {
        let path: PathBuf = match (grammar_flag, manifest) {
            (Some(p), _) => cwd.join(p),
            (None, Some((m, dir))) => match m.grammar_path(dir) {
                Some(p) => p,
                None => bail!("andor.toml has no [grammar] path (or pass --grammar)"),
            },
            (None, None) => bail!("no grammar given (pass --grammar or run `andor init` first)"),
        };

        let grammar = andor_grammar::load(&path)
            .with_context(|| format!("loading grammar {}", path.display()))?;

        let start = start_flag
            .or_else(|| manifest.and_then(|(m, _)| m.start()))
            .or_else(|| grammar.default_start())
            .map(str::to_string);
        let Some(start) = start else {
            bail!("no start symbol (pass --start or set [grammar] start)");
        };

        let default_depth = manifest.map(|(m, _)| m.default_depth()).unwrap_or(1);
        if default_depth == 0 {
            bail!("[lookahead] default_depth must be at least 1");
        }
        Ok(Self {
            grammar,
            start,
            default_depth,
        })
    }

    /// Open a fresh session at the resolved start symbol.
    pub fn guide(&self) -> Result<GuidedDecisionGraph<'_>> {
        self.grammar
            .guide(&self.start)
            .with_context(|| format!("starting at '{}'", self.start))
    }
}

/// Parse a lookahead depth; zero would always list nothing.
pub fn parse_depth(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("depth must be at least 1".to_string()),
        Ok(depth) => Ok(depth),
        Err(_) => Err(format!("expected a depth of at least 1, got {s:?}")),
    }
}

/// Map command-line tokens to session tokens.
pub fn token_arg(arg: &str) -> &str {
    if arg == ACCEPT_ARG {
        ""
    } else {
        arg
    }
}

/// Apply `tokens` in order, naming the position of the first one rejected.
pub fn apply_tokens(guide: &mut GuidedDecisionGraph<'_>, tokens: &[String]) -> Result<()> {
    for (i, token) in tokens.iter().enumerate() {
        guide
            .choose(token_arg(token))
            .with_context(|| format!("token {} of {}", i + 1, tokens.len()))?;
    }
    Ok(())
}

/// Render one token for text output.
pub fn display_token(token: &str) -> &str {
    if token.is_empty() {
        ACCEPT_LABEL
    } else {
        token
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_arg_maps_to_empty_token() {
        assert_eq!(token_arg("-"), "");
        assert_eq!(token_arg("dog"), "dog");
        assert_eq!(display_token(""), "<accept>");
    }

    #[test]
    fn depth_must_be_positive() {
        assert_eq!(parse_depth("3"), Ok(3));
        assert!(parse_depth("0").unwrap_err().contains("at least 1"));
        assert!(parse_depth("-1").is_err());
    }

    #[test]
    fn zero_default_depth_in_manifest_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("p");
        init::create_project(&root).unwrap();
        let manifest_path = root.join("andor.toml");
        let text = std::fs::read_to_string(&manifest_path).unwrap();
        let text = text.replace("default_depth = 1", "default_depth = 0");
        std::fs::write(&manifest_path, text).unwrap();

        let (manifest, found) = AndorManifest::find_and_load(&root).unwrap().unwrap();
        let err = Project::load(&root, Some((&manifest, found.as_path())), None, None).unwrap_err();
        assert!(err.to_string().contains("default_depth must be at least 1"));
    }

    #[test]
    fn load_uses_manifest_grammar_and_start() {
        let dir = tempfile::tempdir().unwrap();
        let project = testing::sample_project(&dir.path().join("p"));
        assert_eq!(project.start, "Sentence");
        assert_eq!(project.default_depth, 1);
        assert_eq!(project.grammar.graph().terminal_count(), 10);
    }

    #[test]
    fn start_flag_overrides_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("p");
        init::create_project(&root).unwrap();
        let (manifest, found) = AndorManifest::find_and_load(&root).unwrap().unwrap();
        let manifest = Some((&manifest, found.as_path()));
        let project = Project::load(&root, manifest, None, Some("NounPhrase")).unwrap();
        assert_eq!(project.start, "NounPhrase");
    }

    #[test]
    fn grammar_flag_without_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("p");
        init::create_project(&root).unwrap();
        let grammar = Path::new("p/grammar.toml");
        let project = Project::load(dir.path(), None, Some(grammar), None).unwrap();
        // Falls back to the start named in the grammar file.
        assert_eq!(project.start, "Sentence");
    }

    #[test]
    fn missing_grammar_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = Project::load(dir.path(), None, None, None).unwrap_err();
        assert!(err.to_string().contains("no grammar given"));
    }

    #[test]
    fn unknown_start_is_reported_when_guiding() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("p");
        init::create_project(&root).unwrap();
        let grammar = Path::new("p/grammar.toml");
        let project = Project::load(dir.path(), None, Some(grammar), Some("Nope")).unwrap();
        let err = project.guide().unwrap_err();
        assert!(format!("{err:#}").contains("Nope"));
    }

    #[test]
    fn apply_tokens_names_the_bad_position() {
        let dir = tempfile::tempdir().unwrap();
        let project = testing::sample_project(&dir.path().join("p"));
        let mut guide = project.guide().unwrap();
        let tokens = vec!["the".to_string(), "zebra".to_string()];
        let err = apply_tokens(&mut guide, &tokens).unwrap_err();
        assert!(format!("{err:#}").starts_with("token 2 of 2"));
    }
}
