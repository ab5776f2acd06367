//! Variable — node identifier in the concept graph.

use serde::{Deserialize, Serialize};

/// Opaque concept-graph variable.
///
/// Allocated in strictly increasing order starting at 0; never reused within
/// a sentence. "No variable" is always `Option<Var>::None`, never a sentinel
/// value — `Var(0)` is a perfectly valid identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Var(pub u32);

impl std::fmt::Display for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}
