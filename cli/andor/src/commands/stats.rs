//! `andor stats`: vertex counts for the loaded grammar.

use andor_core::VertexKind;
use anyhow::Result;
use serde::Serialize;

use super::Project;

/// Shape summary of a compiled grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub start: String,
    pub vertices: usize,
    pub terminals: usize,
    pub and_vertices: usize,
    pub or_vertices: usize,
}

pub fn collect(project: &Project) -> GraphStats {
    let graph = project.grammar.graph();
    GraphStats {
        start: project.start.clone(),
        vertices: graph.vertex_count(),
        terminals: graph.terminal_count(),
        and_vertices: graph.count_of(VertexKind::And),
        or_vertices: graph.count_of(VertexKind::Or),
    }
}

pub fn run(project: &Project, json: bool) -> Result<()> {
    let stats = collect(project);
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Grammar statistics:");
    println!("  Start:      {}", stats.start);
    println!("  Vertices:   {}", stats.vertices);
    println!("  Terminals:  {}", stats.terminals);
    println!("  AND:        {}", stats.and_vertices);
    println!("  OR:         {}", stats.or_vertices);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::sample_project;

    #[test]
    fn sample_grammar_stats() {
        let dir = tempfile::tempdir().unwrap();
        let stats = collect(&sample_project(dir.path()));
        assert_eq!(
            stats,
            GraphStats {
                start: "Sentence".into(),
                vertices: 30,
                terminals: 10,
                // 14 alternatives + 10 terminals
                and_vertices: 24,
                or_vertices: 6,
            }
        );
    }
}
