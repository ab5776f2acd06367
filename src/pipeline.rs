//! Pipeline driver — folds the ordered annotator stages over one sentence.

use tracing::debug;

use crate::cover::Residue;
use crate::graph::ConceptGraph;
use crate::input::Sentence;
use crate::stages::{
    AnnotatorStage, EntityStage, Issue, ModifierStage, PropositionStage, SentenceState,
};
use crate::Result;

/// The finished product for one sentence: the concept graph, plus the
/// diagnostics a treebank run wants to inspect afterwards.
#[derive(Debug)]
pub struct Annotation {
    pub graph: ConceptGraph,
    /// Tokens and dependency edges no stage explained.
    pub residue: Residue,
    /// Per-annotation failures that were isolated and skipped.
    pub issues: Vec<Issue>,
}

/// An ordered list of annotator stages. Sentences are independent: one
/// `Pipeline` may be reused (or cloned per thread) across a corpus, since
/// every sentence owns its own state tuple.
pub struct Pipeline {
    stages: Vec<Box<dyn AnnotatorStage>>,
}

impl Pipeline {
    /// The reference order: entities, then propositions, then lexical
    /// modifiers. The order is a correctness requirement — later stages
    /// must observe the alignments and completion flags of earlier ones.
    pub fn standard() -> Self {
        Self::with_stages(vec![
            Box::new(EntityStage),
            Box::new(PropositionStage),
            Box::new(ModifierStage),
        ])
    }

    pub fn with_stages(stages: Vec<Box<dyn AnnotatorStage>>) -> Self {
        Self { stages }
    }

    /// Run every stage over the sentence, threading the state tuple
    /// through the fixed order.
    pub fn annotate(&self, sentence: &Sentence) -> Result<Annotation> {
        let mut state = SentenceState::for_sentence(sentence);

        for stage in &self.stages {
            state = stage.run(sentence, state)?;
            debug!(
                sentence = %sentence.id,
                stage = stage.name(),
                nodes = state.graph.len(),
                triples = state.graph.triple_count(),
                "stage complete"
            );
        }

        let residue = state.coverage.residue();
        if !residue.is_empty() {
            debug!(
                sentence = %sentence.id,
                unexplained_tokens = residue.tokens.len(),
                unexplained_edges = residue.edges.len(),
                "coverage incomplete"
            );
        }

        Ok(Annotation {
            graph: state.graph,
            residue,
            issues: state.issues,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}
