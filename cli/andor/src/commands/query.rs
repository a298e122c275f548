//! `andor choices` and `andor constructs`: one-shot session queries.

use anyhow::Result;

use super::{apply_tokens, display_token, Project};

/// Next tokens (depth 1) or token sequences (depth > 1) after `tokens`.
pub fn choices(project: &Project, tokens: &[String], depth: usize) -> Result<Vec<Vec<String>>> {
    let mut guide = project.guide()?;
    apply_tokens(&mut guide, tokens)?;
    Ok(guide.lookahead(depth).into_iter().collect())
}

/// Partially expanded sentence forms after `tokens`.
pub fn constructs(project: &Project, tokens: &[String]) -> Result<Vec<String>> {
    let mut guide = project.guide()?;
    apply_tokens(&mut guide, tokens)?;
    Ok(guide.constructs().into_iter().collect())
}

pub fn run_choices(project: &Project, tokens: &[String], depth: usize, json: bool) -> Result<()> {
    let sequences = choices(project, tokens, depth)?;
    if json {
        println!("{}", serde_json::to_string(&sequences)?);
        return Ok(());
    }
    for seq in &sequences {
        let line: Vec<&str> = seq.iter().map(|t| display_token(t)).collect();
        println!("{}", line.join(" "));
    }
    Ok(())
}

pub fn run_constructs(project: &Project, tokens: &[String], json: bool) -> Result<()> {
    let forms = constructs(project, tokens)?;
    if json {
        println!("{}", serde_json::to_string(&forms)?);
        return Ok(());
    }
    for form in &forms {
        println!("{form}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::sample_project;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn choices_after_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let project = sample_project(dir.path());

        let seqs = choices(&project, &args(&["the", "dog", "ate"]), 1).unwrap();
        assert_eq!(seqs, vec![vec![String::new()], vec!["the".to_string()]]);
    }

    #[test]
    fn deeper_choices() {
        let dir = tempfile::tempdir().unwrap();
        let project = sample_project(dir.path());

        let seqs = choices(&project, &args(&["the"]), 2).unwrap();
        // 4 nouns, each followed by "that" or one of 4 verbs
        assert_eq!(seqs.len(), 20);
        assert!(seqs.contains(&args(&["dog", "that"])));
        assert!(seqs.contains(&args(&["bird", "ate"])));
    }

    #[test]
    fn accept_arg_completes_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let project = sample_project(dir.path());

        let seqs = choices(&project, &args(&["the", "cat", "loved", "-"]), 1).unwrap();
        assert!(seqs.is_empty());
    }

    #[test]
    fn constructs_after_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let project = sample_project(dir.path());

        let forms = constructs(&project, &args(&["the", "bird"])).unwrap();
        assert_eq!(
            forms,
            vec![
                "the bird RelativeClause VerbPhrase".to_string(),
                "the bird VerbPhrase".to_string(),
            ]
        );
    }

    #[test]
    fn invalid_token_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let project = sample_project(dir.path());
        assert!(constructs(&project, &args(&["dog"])).is_err());
    }
}
