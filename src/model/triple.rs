//! Relation triple in the concept graph.

use serde::{Deserialize, Serialize};

use super::{Value, Var};

/// A labeled relation from a concept node to a variable or literal target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub source: Var,
    pub relation: String,
    pub target: Value,
}

impl Triple {
    pub fn new(source: Var, relation: impl Into<String>, target: impl Into<Value>) -> Self {
        Self {
            source,
            relation: relation.into(),
            target: target.into(),
        }
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} :{} {}", self.source, self.relation, self.target)
    }
}
