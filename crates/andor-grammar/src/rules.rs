//! The compact grammar notation: symbol -> list of alternatives.
//!
//! Each alternative is a space-separated sequence of tokens. A token that
//! names another rule is a nonterminal; anything else is a literal.
//!
//! In TOML:
//!
//! ```toml
//! start = "Sentence"
//!
//! [rules]
//! Sentence = ["NounPhrase VerbPhrase"]
//! NounPhrase = ["the Noun"]
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::GrammarError;

/// A grammar in alternative-list form, with an optional default start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    pub rules: BTreeMap<String, Vec<String>>,
}

impl Grammar {
    /// Wrap a rule map without a default start.
    pub fn new(rules: BTreeMap<String, Vec<String>>) -> Self {
        Self { start: None, rules }
    }

    /// Builder: set the default start symbol.
    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Parse the TOML form.
    pub fn from_toml_str(s: &str) -> Result<Self, GrammarError> {
        toml::from_str(s).map_err(|e| GrammarError::Parse {
            format: "TOML",
            message: e.to_string(),
        })
    }

    /// Parse the JSON form.
    pub fn from_json_str(s: &str) -> Result<Self, GrammarError> {
        serde_json::from_str(s).map_err(|e| GrammarError::Parse {
            format: "JSON",
            message: e.to_string(),
        })
    }

    /// Render the TOML form.
    pub fn to_toml_string(&self) -> Result<String, GrammarError> {
        toml::to_string(self).map_err(|e| GrammarError::Parse {
            format: "TOML",
            message: e.to_string(),
        })
    }

}

/// The sample grammar used by `andor init` and the tests.
pub fn sample() -> Grammar {
    let rule = |alts: &[&str]| alts.iter().map(|a| a.to_string()).collect::<Vec<_>>();
    let rules = BTreeMap::from([
        ("Sentence".to_string(), rule(&["NounPhrase VerbPhrase"])),
        (
            "NounPhrase".to_string(),
            rule(&["the Noun", "the Noun RelativeClause"]),
        ),
        ("VerbPhrase".to_string(), rule(&["Verb", "Verb NounPhrase"])),
        ("RelativeClause".to_string(), rule(&["that VerbPhrase"])),
        ("Noun".to_string(), rule(&["dog", "cat", "bird", "squirrel"])),
        (
            "Verb".to_string(),
            rule(&["befriended", "loved", "ate", "attacked"]),
        ),
    ]);
    Grammar::new(rules).with_start("Sentence")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_toml() {
        let grammar = Grammar::from_toml_str(
            r#"
start = "Greeting"

[rules]
Greeting = ["hello Name"]
Name = ["world", "there"]
"#,
        )
        .unwrap();
        assert_eq!(grammar.start.as_deref(), Some("Greeting"));
        assert_eq!(
            grammar.rules["Name"],
            vec!["world".to_string(), "there".to_string()]
        );
        assert!(!grammar.rules.contains_key("world"));
    }

    #[test]
    fn parse_json_without_start() {
        let grammar =
            Grammar::from_json_str(r#"{"rules": {"Yes": ["yes", "yep"]}}"#).unwrap();
        assert_eq!(grammar.start, None);
        assert_eq!(grammar.rules.len(), 1);
    }

    #[test]
    fn parse_errors_name_the_format() {
        let err = Grammar::from_toml_str("rules = 3").unwrap_err();
        assert!(err.to_string().starts_with("parsing TOML grammar"));
        let err = Grammar::from_json_str("{").unwrap_err();
        assert!(err.to_string().starts_with("parsing JSON grammar"));
    }

    #[test]
    fn toml_round_trip() {
        let grammar = sample();
        let text = grammar.to_toml_string().unwrap();
        assert_eq!(Grammar::from_toml_str(&text).unwrap(), grammar);
    }
}
