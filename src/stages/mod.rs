//! Annotator stages — the ordered passes that extend the shared state.
//!
//! A stage is a pure function of the sentence input and the current state
//! tuple (concept graph, alignment, completion flags, issue log) to an
//! updated tuple, run to completion without suspension. Stages never see
//! each other's annotation lists; they coordinate only through alignment
//! and completion. An existing alignment for a token always means "attach
//! to that variable, do not allocate a second one".

pub mod entities;
pub mod props;
pub mod modifiers;

pub use entities::EntityStage;
pub use props::PropositionStage;
pub use modifiers::ModifierStage;

use serde::Serialize;
use tracing::warn;

use crate::align::Alignment;
use crate::cover::Coverage;
use crate::graph::ConceptGraph;
use crate::input::Sentence;
use crate::{Error, Result};

/// A per-annotation problem that was isolated, reported and skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub stage: &'static str,
    pub detail: String,
}

/// The state tuple threaded through the stage fold.
#[derive(Debug, Clone)]
pub struct SentenceState {
    pub graph: ConceptGraph,
    pub alignment: Alignment,
    pub coverage: Coverage,
    pub issues: Vec<Issue>,
}

impl SentenceState {
    /// Empty state for a fresh sentence.
    pub fn for_sentence(sentence: &Sentence) -> Self {
        Self {
            graph: ConceptGraph::new(),
            alignment: Alignment::new(),
            coverage: Coverage::for_sentence(&sentence.dep),
            issues: Vec::new(),
        }
    }

    /// Record a per-annotation failure and carry on. Structural errors
    /// abort the sentence instead and never go through here.
    pub fn report(&mut self, stage: &'static str, error: &Error) {
        warn!(stage, %error, "annotation skipped");
        self.issues.push(Issue { stage, detail: error.to_string() });
    }
}

/// One pass of the pipeline. Applied in a fixed order by the driver;
/// the order is a correctness requirement, not an optimization.
pub trait AnnotatorStage {
    fn name(&self) -> &'static str;

    fn run(&self, sentence: &Sentence, state: SentenceState) -> Result<SentenceState>;
}

/// Is this error isolated to one annotation (skip and continue) rather
/// than structural (abort the sentence)?
pub(crate) fn is_annotation_error(error: &Error) -> bool {
    matches!(
        error,
        Error::AmbiguousSpan { .. }
            | Error::OverlapViolation { .. }
            | Error::UnrecognizedAnnotation(_)
    )
}
