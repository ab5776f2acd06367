//! Concept graph — the versioned node/edge store the stages build up.
//!
//! Nodes are variables labeled with concepts; edges are relation triples
//! whose target is another variable or a literal. The concept map and the
//! triple set are append-only across a sentence: a later stage may add but
//! never remove or relabel. The one exception is the `-DUMMY` placeholder
//! triple, added only so a freshly allocated variable participates in some
//! triple, and superseded once the variable gains a real one.
//!
//! Triple commits go through [`ConceptGraph::with_triples`], which returns a
//! new snapshot: a stage assembles its candidate triples locally and commits
//! once, so partial failures inside a stage are never observable downstream.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::align::Alignment;
use crate::lex::token_to_concept;
use crate::model::{Token, Triple, Value, Var};
use crate::{Error, Result};

/// Placeholder relation keeping a new variable non-orphaned until a real
/// triple arrives.
pub const DUMMY_REL: &str = "-DUMMY";

/// Concept-labeled variables plus the relation triples between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptGraph {
    /// Concept label per variable; the index is the variable's identity.
    concepts: Vec<String>,
    triples: HashSet<Triple>,
}

impl ConceptGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of allocated variables.
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    pub fn triple_count(&self) -> usize {
        self.triples.len()
    }

    /// Allocate the next variable and bind it to `concept`. Pure
    /// allocation; alignment is untouched.
    pub fn alloc(&mut self, concept: impl Into<String>) -> Var {
        let variable = Var(self.concepts.len() as u32);
        self.concepts.push(concept.into());
        variable
    }

    /// Allocate a variable for a specific token: bind the concept
    /// (defaulting to the lexical normalization of the token's surface form)
    /// and link the alignment in one step. The standard way a stage creates
    /// a node for a word.
    pub fn alloc_for_token(
        &mut self,
        token: usize,
        concept: Option<&str>,
        tokens: &[Token],
        alignment: &mut Alignment,
    ) -> Result<Var> {
        let concept = match concept {
            Some(c) => c.to_owned(),
            None => {
                let form = tokens
                    .get(token)
                    .map(|t| t.form.as_str())
                    .ok_or_else(|| Error::MalformedInput(format!("token index {token} out of range")))?;
                token_to_concept(form)
            }
        };
        let variable = self.alloc(concept);
        alignment.link(variable, token);
        Ok(variable)
    }

    pub fn contains(&self, variable: Var) -> bool {
        (variable.0 as usize) < self.concepts.len()
    }

    pub fn concept_of(&self, variable: Var) -> Option<&str> {
        self.concepts.get(variable.0 as usize).map(String::as_str)
    }

    /// A new snapshot containing the union of existing and new triples.
    ///
    /// Every referenced variable must already exist in the node map —
    /// anything else is a programming error, not bad input. `-DUMMY`
    /// placeholders whose variable now has a real outgoing triple are
    /// dropped.
    pub fn with_triples(&self, new_triples: impl IntoIterator<Item = Triple>) -> Result<Self> {
        let mut next = self.clone();
        for triple in new_triples {
            if !next.contains(triple.source) {
                return Err(Error::GraphInvariant(format!(
                    "triple source {} was never allocated",
                    triple.source
                )));
            }
            if let Value::Var(target) = triple.target {
                if !next.contains(target) {
                    return Err(Error::GraphInvariant(format!(
                        "triple target {target} was never allocated"
                    )));
                }
            }
            next.triples.insert(triple);
        }

        let has_real: HashSet<Var> = next
            .triples
            .iter()
            .filter(|t| t.relation != DUMMY_REL)
            .map(|t| t.source)
            .collect();
        next.triples
            .retain(|t| t.relation != DUMMY_REL || !has_real.contains(&t.source));

        Ok(next)
    }

    pub fn triples(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    pub fn triples_from(&self, source: Var) -> impl Iterator<Item = &Triple> {
        self.triples.iter().filter(move |t| t.source == source)
    }

    pub fn has_triple(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_allocation_is_monotonic() {
        let mut graph = ConceptGraph::new();
        assert_eq!(graph.alloc("person"), Var(0));
        assert_eq!(graph.alloc("name"), Var(1));
        assert_eq!(graph.alloc("company"), Var(2));
        assert_eq!(graph.concept_of(Var(1)), Some("name"));
        assert_eq!(graph.concept_of(Var(3)), None);
    }

    #[test]
    fn test_alloc_for_token_links_alignment() {
        let mut graph = ConceptGraph::new();
        let mut alignment = Alignment::new();
        let tokens = vec![Token::new("Rudolph"), Token::new("Agnew!")];

        let x = graph
            .alloc_for_token(1, None, &tokens, &mut alignment)
            .unwrap();
        assert_eq!(graph.concept_of(x), Some("agnew"));
        assert_eq!(alignment.lookup(1), Some(x));
    }

    #[test]
    fn test_with_triples_rejects_unknown_variable() {
        let mut graph = ConceptGraph::new();
        let x = graph.alloc("person");

        let err = graph
            .with_triples([Triple::new(Var(9), "name", x)])
            .unwrap_err();
        assert!(matches!(err, Error::GraphInvariant(_)));

        let err = graph
            .with_triples([Triple::new(x, "name", Var(9))])
            .unwrap_err();
        assert!(matches!(err, Error::GraphInvariant(_)));
    }

    #[test]
    fn test_snapshot_leaves_original_untouched() {
        let mut graph = ConceptGraph::new();
        let x = graph.alloc("thing");
        let next = graph.with_triples([Triple::new(x, "quant", 3i64)]).unwrap();

        assert_eq!(graph.triple_count(), 0);
        assert_eq!(next.triple_count(), 1);
    }

    #[test]
    fn test_dummy_is_superseded_by_real_triple() {
        let mut graph = ConceptGraph::new();
        let x = graph.alloc("director");
        let mut graph = graph
            .with_triples([Triple::new(x, DUMMY_REL, "")])
            .unwrap();
        assert_eq!(graph.triple_count(), 1);

        let m = graph.alloc("former");
        let graph = graph.with_triples([Triple::new(x, "mod", m)]).unwrap();

        assert!(!graph.has_triple(&Triple::new(x, DUMMY_REL, "")));
        assert!(graph.has_triple(&Triple::new(x, "mod", m)));
        assert_eq!(graph.triple_count(), 1);
    }

    #[test]
    fn test_disjoint_commits_commute() {
        let mut graph = ConceptGraph::new();
        let a = graph.alloc("person");
        let b = graph.alloc("company");

        let first = Triple::new(a, "ARG0", Value::atom("-"));
        let second = Triple::new(b, "quant", 41i64);

        let ab = graph
            .with_triples([first.clone()])
            .unwrap()
            .with_triples([second.clone()])
            .unwrap();
        let ba = graph
            .with_triples([second])
            .unwrap()
            .with_triples([first])
            .unwrap();

        assert_eq!(ab, ba);
    }

    proptest! {
        #[test]
        fn prop_nth_allocation_is_var_n(count in 1usize..64) {
            let mut graph = ConceptGraph::new();
            for n in 0..count {
                prop_assert_eq!(graph.alloc(format!("c{n}")), Var(n as u32));
            }
            prop_assert_eq!(graph.len(), count);
        }
    }
}
