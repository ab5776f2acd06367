//! Completion tracker — which tokens and dependency edges have already been
//! explained in the semantics.
//!
//! Flags are initialized false and only ever move to true. `claim_token` is
//! the strict variant: claiming an already-explained token is an
//! `OverlapViolation` (two annotations competing for the same word; first
//! writer wins). `cover_token` is the idempotent variant for stages that
//! knowingly revisit a token an earlier stage aligned, e.g. a predicate head
//! that is also an entity head.

use hashbrown::HashMap;

use crate::dep::{DepGraph, Governor};
use crate::{Error, Result};

/// Per-token and per-edge "already explained" flags for one sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct Coverage {
    tokens: Vec<bool>,
    edges: HashMap<(Governor, usize), bool>,
}

/// Tokens and edges never explained by any stage. Diagnostic output; an
/// empty residue means full coverage, a non-empty one is not an error.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Residue {
    pub tokens: Vec<usize>,
    pub edges: Vec<(Governor, usize)>,
}

impl Residue {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.edges.is_empty()
    }
}

impl Coverage {
    /// Fresh tracker with one flag per token and one per dependency edge.
    pub fn for_sentence(dep: &DepGraph) -> Self {
        Self {
            tokens: vec![false; dep.len()],
            edges: dep.edges().map(|edge| (edge, false)).collect(),
        }
    }

    /// Strictly mark a token explained. Fails if it already was.
    pub fn claim_token(&mut self, token: usize) -> Result<()> {
        let flag = self
            .tokens
            .get_mut(token)
            .ok_or_else(|| Error::MalformedInput(format!("token index {token} out of range")))?;
        if *flag {
            return Err(Error::OverlapViolation { token });
        }
        *flag = true;
        Ok(())
    }

    /// Idempotently mark a token explained.
    pub fn cover_token(&mut self, token: usize) {
        if let Some(flag) = self.tokens.get_mut(token) {
            *flag = true;
        }
    }

    /// Mark a dependency edge explained. Safe no-op if the edge is not in
    /// the dependency graph.
    pub fn cover_edge(&mut self, governor: Governor, dependent: usize) {
        if let Some(flag) = self.edges.get_mut(&(governor, dependent)) {
            *flag = true;
        }
    }

    pub fn is_token_covered(&self, token: usize) -> bool {
        self.tokens.get(token).copied().unwrap_or(false)
    }

    pub fn is_edge_covered(&self, governor: Governor, dependent: usize) -> bool {
        self.edges.get(&(governor, dependent)).copied().unwrap_or(false)
    }

    /// Everything still unexplained, in deterministic order.
    pub fn residue(&self) -> Residue {
        let tokens = self
            .tokens
            .iter()
            .enumerate()
            .filter(|(_, covered)| !**covered)
            .map(|(i, _)| i)
            .collect();
        let mut edges: Vec<(Governor, usize)> = self
            .edges
            .iter()
            .filter(|(_, covered)| !**covered)
            .map(|(edge, _)| *edge)
            .collect();
        edges.sort_unstable();
        Residue { tokens, edges }
    }
}
