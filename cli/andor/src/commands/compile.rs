//! `andor compile`: write a `.aog` snapshot of the loaded grammar.

use std::path::Path;

use anyhow::{Context, Result};

use super::Project;

pub fn run(project: &Project, output: &Path) -> Result<()> {
    andor_grammar::save_snapshot(&project.grammar, output)
        .with_context(|| format!("writing {}", output.display()))?;
    println!(
        "Wrote {} ({} vertices, {} terminals)",
        output.display(),
        project.grammar.graph().vertex_count(),
        project.grammar.graph().terminal_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::sample_project;

    #[test]
    fn compiled_snapshot_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let project = sample_project(dir.path());
        let out = dir.path().join("sentence.aog");

        run(&project, &out).unwrap();

        let reloaded = andor_grammar::load(&out).unwrap();
        assert_eq!(reloaded, project.grammar);
        assert_eq!(reloaded.default_start(), Some("Sentence"));
    }
}
