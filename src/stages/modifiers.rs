//! Lexical-modifier stage — the residual pass over adjectives, adverbs and
//! dependency-marked negation that no earlier stage explained.

use crate::dep::Governor;
use crate::input::Sentence;
use crate::model::{Triple, Value};
use crate::Result;

use super::{AnnotatorStage, SentenceState};

/// Attaches leftover `amod`/`advmod`/`neg` dependents to their governors'
/// variables.
pub struct ModifierStage;

impl AnnotatorStage for ModifierStage {
    fn name(&self) -> &'static str {
        "modifiers"
    }

    fn run(&self, sentence: &Sentence, mut state: SentenceState) -> Result<SentenceState> {
        let mut triples = Vec::new();

        for token in 0..sentence.tokens.len() {
            if state.coverage.is_token_covered(token) {
                continue;
            }
            let mut explained = false;

            for edge in sentence.dep.governors_of(token) {
                let Governor::Token(governor) = edge.governor else {
                    continue;
                };
                if state.coverage.is_edge_covered(edge.governor, token) {
                    continue;
                }
                // only attach under a governor that already has a node
                let Some(governor_var) = state.alignment.lookup(governor) else {
                    continue;
                };

                match edge.relation.as_str() {
                    "neg" => {
                        triples.push(Triple::new(governor_var, "polarity", Value::atom("-")));
                    }
                    relation @ ("amod" | "advmod") => {
                        let x = match state.alignment.lookup(token) {
                            Some(x) => x,
                            None => state.graph.alloc_for_token(
                                token,
                                None,
                                &sentence.tokens,
                                &mut state.alignment,
                            )?,
                        };
                        let relation = if relation == "amod" { "mod" } else { "manner" };
                        triples.push(Triple::new(governor_var, relation, x));
                    }
                    _ => continue,
                }
                state.coverage.cover_edge(edge.governor, token);
                explained = true;
            }

            if explained {
                if let Err(error) = state.coverage.claim_token(token) {
                    state.report(self.name(), &error);
                }
            }
        }

        state.graph = state.graph.with_triples(triples)?;
        Ok(state)
    }
}
