//! `andor walk`: interactive guided construction.
//!
//! Each input line is either a token to choose or a `:command`.

use std::io::{self, BufRead, Write};

use andor_core::GuidedDecisionGraph;
use anyhow::Result;
use tracing::debug;

use super::{display_token, parse_depth, token_arg, Project};

const HELP: &str = "\
commands:
  <token>        choose a token (- chooses the accept marker)
  :pop           undo the last choice
  :choices       show the next token sequences (default depth)
  :look N        show token sequences of length N
  :constructs    show partially expanded forms
  :done          accept the sentence as it stands
  :reset         start over
  :quit          leave";

pub fn run(project: &Project) -> Result<()> {
    let mut guide = project.guide()?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    repl(&mut guide, stdin.lock(), stdout.lock(), project.default_depth)
}

/// Drive `guide` from `input` until `:quit` or end of input.
pub fn repl<R: BufRead, W: Write>(
    guide: &mut GuidedDecisionGraph<'_>,
    input: R,
    mut out: W,
    default_depth: usize,
) -> Result<()> {
    writeln!(out, "walking from {} (:help for commands)", guide.start())?;
    show_status(guide, &mut out)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!(input = line, "walk");

        match line.split_once(char::is_whitespace).unwrap_or((line, "")) {
            (":quit" | ":q", _) => return Ok(()),
            (":help", _) => writeln!(out, "{HELP}")?,
            (":pop", _) => match guide.pop() {
                Ok(token) => writeln!(out, "popped {}", display_token(&token))?,
                Err(e) => writeln!(out, "error: {e}")?,
            },
            (":choices", _) => show_sequences(guide, default_depth, &mut out)?,
            (":look", arg) => match parse_depth(arg) {
                Ok(depth) => show_sequences(guide, depth, &mut out)?,
                Err(e) => writeln!(out, "error: :look: {e}")?,
            },
            (":constructs", _) => {
                for form in guide.constructs() {
                    writeln!(out, "  {form}")?;
                }
            }
            (":done", _) => {
                choose(guide, "", &mut out)?;
            }
            (":reset", _) => guide.reset(),
            (cmd, _) if cmd.starts_with(':') => {
                writeln!(out, "error: unknown command {cmd} (:help for commands)")?
            }
            _ => {
                for token in line.split_whitespace() {
                    if !choose(guide, token_arg(token), &mut out)? {
                        break;
                    }
                }
            }
        }
        show_status(guide, &mut out)?;
    }
    Ok(())
}

/// Choose one token, reporting a rejection. Returns whether it was accepted.
fn choose<W: Write>(guide: &mut GuidedDecisionGraph<'_>, token: &str, out: &mut W) -> Result<bool> {
    match guide.choose(token) {
        Ok(()) => Ok(true),
        Err(e) => {
            writeln!(out, "error: {e}")?;
            Ok(false)
        }
    }
}

fn show_status<W: Write>(guide: &GuidedDecisionGraph<'_>, out: &mut W) -> Result<()> {
    let construction = guide.construction().join(" ");
    if guide.is_complete() {
        writeln!(out, "complete: {construction}")?;
        return Ok(());
    }
    let choices = guide.choices();
    let choices: Vec<&str> = choices.iter().map(|t| display_token(t)).collect();
    writeln!(out, "> {construction}")?;
    writeln!(out, "  choices: {}", choices.join(" "))?;
    Ok(())
}

fn show_sequences<W: Write>(
    guide: &GuidedDecisionGraph<'_>,
    depth: usize,
    out: &mut W,
) -> Result<()> {
    for seq in guide.lookahead(depth) {
        let line: Vec<&str> = seq.iter().map(|t| display_token(t)).collect();
        writeln!(out, "  {}", line.join(" "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::sample_project;
    use std::io::Cursor;

    fn transcript(script: &str) -> String {
        let dir = tempfile::tempdir().unwrap();
        let project = sample_project(dir.path());
        let mut guide = project.guide().unwrap();
        let mut out = Vec::new();
        repl(&mut guide, Cursor::new(script), &mut out, project.default_depth).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn walk_to_completion() {
        let out = transcript("the dog\nate\n:done\n");
        assert!(out.contains("walking from Sentence"));
        assert!(out.contains("> the dog\n"));
        assert!(out.contains("  choices: <accept> the\n"));
        assert!(out.trim_end().ends_with("complete: the dog ate"));
    }

    #[test]
    fn rejected_token_leaves_session_alone() {
        let out = transcript("the zebra\n");
        assert!(out.contains("error: \"zebra\" is not a valid choice here"));
        assert!(out.trim_end().ends_with("choices: bird cat dog squirrel"));
    }

    #[test]
    fn pop_and_reset() {
        let out = transcript("the cat\n:pop\n:reset\n:pop\n");
        assert!(out.contains("popped cat"));
        assert!(out.contains("error: cannot pop an empty construction"));
    }

    #[test]
    fn look_and_constructs() {
        let out = transcript(":look 2\n:constructs\n:look x\n");
        assert!(out.contains("  the dog\n"));
        assert!(out.contains("  the Noun VerbPhrase\n"));
        assert!(out.contains("error: :look: expected a depth of at least 1"));
    }

    #[test]
    fn look_zero_is_rejected() {
        let out = transcript(":look 0\n");
        assert!(out.contains("error: :look: depth must be at least 1"));
    }

    #[test]
    fn quit_stops_reading() {
        let out = transcript(":quit\nthe\n");
        assert!(!out.contains("> the\n"));
    }

    #[test]
    fn unknown_command() {
        let out = transcript(":frobnicate\n");
        assert!(out.contains("error: unknown command :frobnicate"));
    }
}
