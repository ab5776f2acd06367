//! Dependency graph over sentence tokens.
//!
//! Token-indexed, read-only once loaded. A token may appear as dependent in
//! several edges (shared and raised arguments make this a DAG, not a tree);
//! it may equally have no edges at all — the root verb, punctuation, or a
//! function word absorbed into another token's relation label.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{Error, Result};

/// Governor end of a dependency edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Governor {
    /// Sentence root — distinct from every valid token index.
    Root,
    Token(usize),
}

impl Governor {
    pub fn token(self) -> Option<usize> {
        match self {
            Governor::Token(i) => Some(i),
            Governor::Root => None,
        }
    }
}

impl std::fmt::Display for Governor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Governor::Root => write!(f, "ROOT"),
            Governor::Token(i) => write!(f, "{i}"),
        }
    }
}

/// One governor relation of a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepEdge {
    pub governor: Governor,
    pub relation: String,
}

/// The full dependency structure of one sentence. Fixed at load time; the
/// pipeline never mutates it, only marks edges as explained elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepGraph {
    governors: Vec<SmallVec<[DepEdge; 2]>>,
}

impl DepGraph {
    /// Build from raw `(governor, dependent, relation)` tuples.
    ///
    /// An edge referencing a token outside `0..token_count` is a fatal load
    /// error.
    pub fn new(
        token_count: usize,
        edges: impl IntoIterator<Item = (Governor, usize, String)>,
    ) -> Result<Self> {
        let mut governors: Vec<SmallVec<[DepEdge; 2]>> = vec![SmallVec::new(); token_count];
        for (gov, dep, relation) in edges {
            if dep >= token_count {
                return Err(Error::MalformedInput(format!(
                    "dependent index {dep} out of range (sentence has {token_count} tokens)"
                )));
            }
            if let Governor::Token(g) = gov {
                if g >= token_count {
                    return Err(Error::MalformedInput(format!(
                        "governor index {g} out of range (sentence has {token_count} tokens)"
                    )));
                }
            }
            governors[dep].push(DepEdge { governor: gov, relation });
        }
        Ok(Self { governors })
    }

    pub fn len(&self) -> usize {
        self.governors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.governors.is_empty()
    }

    /// All governor relations of a token; empty for roots, punctuation, or
    /// tokens realized only inside another token's relation label.
    pub fn governors_of(&self, token: usize) -> &[DepEdge] {
        self.governors.get(token).map_or(&[], |edges| edges.as_slice())
    }

    /// Every `(governor, dependent)` pair in the graph.
    pub fn edges(&self) -> impl Iterator<Item = (Governor, usize)> + '_ {
        self.governors
            .iter()
            .enumerate()
            .flat_map(|(dep, edges)| edges.iter().map(move |e| (e.governor, dep)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(gov: Governor, dep: usize, rel: &str) -> (Governor, usize, String) {
        (gov, dep, rel.to_string())
    }

    #[test]
    fn test_multiple_governors() {
        // token 0 is a shared argument of tokens 1 and 2
        let dep = DepGraph::new(
            3,
            [
                edge(Governor::Token(1), 0, "nsubj"),
                edge(Governor::Token(2), 0, "xsubj"),
                edge(Governor::Root, 1, "root"),
                edge(Governor::Token(1), 2, "xcomp"),
            ],
        )
        .unwrap();

        assert_eq!(dep.governors_of(0).len(), 2);
        assert_eq!(dep.governors_of(1), &[DepEdge { governor: Governor::Root, relation: "root".into() }]);
        assert_eq!(dep.edges().count(), 4);
    }

    #[test]
    fn test_token_without_edges() {
        let dep = DepGraph::new(2, [edge(Governor::Root, 0, "root")]).unwrap();
        assert!(dep.governors_of(1).is_empty());
    }

    #[test]
    fn test_out_of_range_is_fatal() {
        let err = DepGraph::new(2, [edge(Governor::Token(5), 0, "nsubj")]).unwrap_err();
        assert!(matches!(err, crate::Error::MalformedInput(_)));

        let err = DepGraph::new(2, [edge(Governor::Root, 7, "root")]).unwrap_err();
        assert!(matches!(err, crate::Error::MalformedInput(_)));
    }
}
