//! Alignment store — bidirectional token ↔ variable mapping.
//!
//! Several tokens may align to the same variable (all components of a
//! multi-word name align to the name node). The head-selection query
//! `lookup(token)` answers with at most one variable per token, and "no
//! variable" is `None` — never a sentinel that collides with `Var(0)`.

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::model::Var;

/// Append-only token ↔ variable alignment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alignment {
    by_token: HashMap<usize, SmallVec<[Var; 1]>>,
    by_var: HashMap<Var, SmallVec<[usize; 2]>>,
}

impl Alignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `token` aligns to `variable`. Appends; idempotent when
    /// called twice with the same pair.
    pub fn link(&mut self, variable: Var, token: usize) {
        let vars = self.by_token.entry(token).or_default();
        if vars.contains(&variable) {
            return;
        }
        vars.push(variable);
        self.by_var.entry(variable).or_default().push(token);
    }

    /// The variable aligned to `token`, if exactly one is known.
    pub fn lookup(&self, token: usize) -> Option<Var> {
        match self.by_token.get(&token).map(|vars| vars.as_slice()) {
            Some([single]) => Some(*single),
            _ => None,
        }
    }

    /// All tokens aligned to `variable`, in link order.
    pub fn tokens_of(&self, variable: Var) -> &[usize] {
        self.by_var.get(&variable).map_or(&[], |tokens| tokens.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }
}
