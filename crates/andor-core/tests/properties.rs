//! Property tests over random guided walks.

use std::collections::BTreeSet;

use andor_core::{DecisionGraph, GuidedDecisionGraph, LiveSet};
use proptest::collection::vec;
use proptest::prelude::*;

/// Same sentence grammar as the walk test, plus a second recursive rule so
/// walks hit ambiguity and accept markers often.
fn grammar() -> DecisionGraph {
    let mut dg = DecisionGraph::new();
    for name in [
        "Sentence",
        "Simple",
        "Relative",
        "Transitive",
        "RelativeClause",
        "the",
        "that",
        "dog",
        "cat",
        "ate",
        "saw",
    ] {
        dg.add_vertex_and(name).unwrap();
    }
    for name in ["NounPhrase", "VerbPhrase", "Noun", "Verb"] {
        dg.add_vertex_or(name).unwrap();
    }
    dg.add_edge("Sentence", ["NounPhrase", "VerbPhrase"]).unwrap();
    dg.add_edge("NounPhrase", ["Simple", "Relative"]).unwrap();
    dg.add_edge("Simple", ["the", "Noun"]).unwrap();
    dg.add_edge("Relative", ["the", "Noun", "RelativeClause"]).unwrap();
    dg.add_edge("VerbPhrase", ["Verb", "Transitive"]).unwrap();
    dg.add_edge("Transitive", ["Verb", "NounPhrase"]).unwrap();
    dg.add_edge("RelativeClause", ["that", "VerbPhrase"]).unwrap();
    dg.add_edge("Noun", ["dog", "cat"]).unwrap();
    dg.add_edge("Verb", ["ate", "saw"]).unwrap();
    dg
}

/// Every token the grammar knows, plus the accept marker and junk.
fn candidate_tokens(dg: &DecisionGraph) -> Vec<String> {
    let mut tokens: Vec<String> = dg.terminals().map(String::from).collect();
    tokens.extend(["".to_string(), "Noun".to_string(), "zebra".to_string()]);
    tokens
}

/// Drive a walk: each pick selects one of the current choices.
fn walk<'g>(dg: &'g DecisionGraph, picks: &[usize]) -> GuidedDecisionGraph<'g> {
    let mut guide = GuidedDecisionGraph::new(dg, "Sentence").unwrap();
    for &pick in picks {
        let choices: Vec<String> = guide.choices().into_iter().collect();
        if choices.is_empty() {
            break;
        }
        guide.choose(&choices[pick % choices.len()]).unwrap();
    }
    guide
}

proptest! {
    #[test]
    fn pop_undoes_choose(picks in vec(any::<usize>(), 0..14)) {
        let dg = grammar();
        let mut guide = GuidedDecisionGraph::new(&dg, "Sentence").unwrap();
        let mut snapshots: Vec<(Vec<String>, LiveSet)> = Vec::new();

        for &pick in &picks {
            let choices: Vec<String> = guide.choices().into_iter().collect();
            if choices.is_empty() {
                break;
            }
            snapshots.push((guide.construction(), guide.live_configurations().clone()));
            guide.choose(&choices[pick % choices.len()]).unwrap();
        }

        while let Some((construction, live)) = snapshots.pop() {
            guide.pop().unwrap();
            prop_assert_eq!(guide.construction(), construction);
            prop_assert_eq!(guide.live_configurations(), &live);
        }
        prop_assert_eq!(guide.depth(), 0);
    }

    #[test]
    fn choose_succeeds_exactly_on_choices(picks in vec(any::<usize>(), 0..10)) {
        let dg = grammar();
        let guide = walk(&dg, &picks);
        let choices = guide.choices();

        for token in candidate_tokens(&dg) {
            let mut probe = guide.clone();
            let result = probe.choose(&token);
            prop_assert_eq!(result.is_ok(), choices.contains(&token), "token {:?}", token);
            if result.is_err() {
                prop_assert_eq!(probe.live_configurations(), guide.live_configurations());
                prop_assert_eq!(probe.depth(), guide.depth());
            }
        }
    }

    #[test]
    fn lookahead_one_matches_choices(picks in vec(any::<usize>(), 0..10)) {
        let dg = grammar();
        let guide = walk(&dg, &picks);
        let singletons: BTreeSet<Vec<String>> =
            guide.choices().into_iter().map(|t| vec![t]).collect();
        prop_assert_eq!(guide.lookahead(1), singletons);
    }

    #[test]
    fn lookahead_extends_monotonically(
        picks in vec(any::<usize>(), 0..8),
        depth in 1usize..4,
    ) {
        let dg = grammar();
        let guide = walk(&dg, &picks);
        let shorter = guide.lookahead(depth);
        let longer = guide.lookahead(depth + 1);

        for seq in &shorter {
            let accepted = seq.last().is_some_and(|t| t.is_empty());
            let extended = longer.iter().any(|l| l.len() > seq.len() && l.starts_with(seq));
            prop_assert!(accepted || extended, "{:?} neither accepted nor extended", seq);
            prop_assert!(accepted || seq.len() == depth);
        }
    }

    #[test]
    fn completion_means_every_hypothesis_is_done(picks in vec(any::<usize>(), 0..16)) {
        let dg = grammar();
        let guide = walk(&dg, &picks);
        let all_empty = guide.live_configurations().iter().all(|q| q.is_empty());
        prop_assert_eq!(guide.is_complete(), all_empty);
        if guide.is_complete() {
            prop_assert!(guide.choices().is_empty());
            prop_assert!(guide.lookahead(2).is_empty());
        } else {
            prop_assert!(!guide.choices().is_empty());
        }
    }
}
