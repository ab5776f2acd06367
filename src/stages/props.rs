//! Proposition stage — PropBank-style predicate-argument structures.

use crate::dep::Governor;
use crate::graph::DUMMY_REL;
use crate::head::choose_head;
use crate::input::{PropArg, PropFrame, Sentence};
use crate::lex::{roles, token_to_concept};
use crate::model::{Triple, Var};
use crate::{Error, Result};

use super::{AnnotatorStage, SentenceState, is_annotation_error};

/// Consumes the proposition frames.
pub struct PropositionStage;

impl AnnotatorStage for PropositionStage {
    fn name(&self) -> &'static str {
        "propositions"
    }

    fn run(&self, sentence: &Sentence, mut state: SentenceState) -> Result<SentenceState> {
        let mut triples = Vec::new();

        // all predicates first, so every argument can refer to its variable
        let mut heads: Vec<Option<usize>> = Vec::with_capacity(sentence.props.len());
        for frame in &sentence.props {
            match predicate(sentence, &mut state, &mut triples, frame) {
                Ok(head) => heads.push(head),
                Err(error) if is_annotation_error(&error) => {
                    state.report(self.name(), &error);
                    heads.push(None);
                }
                Err(error) => return Err(error),
            }
        }

        for (frame, head) in sentence.props.iter().zip(&heads) {
            let Some(pred_head) = *head else { continue };
            let Some(pred_var) = state.alignment.lookup(pred_head) else { continue };
            for row in &frame.args {
                match argument(sentence, &mut state, &mut triples, pred_head, pred_var, row) {
                    Ok(()) => {}
                    Err(error) if is_annotation_error(&error) => state.report(self.name(), &error),
                    Err(error) => return Err(error),
                }
            }
        }

        state.graph = state.graph.with_triples(triples)?;
        Ok(state)
    }
}

/// Resolve the frame's single-token predicate and make sure it has a
/// variable. Returns the predicate token, or `None` for a trace-only
/// predicate the frame is skipped over.
fn predicate(
    sentence: &Sentence,
    state: &mut SentenceState,
    triples: &mut Vec<Triple>,
    frame: &PropFrame,
) -> Result<Option<usize>> {
    let mut rel_spans: Vec<(Option<usize>, Option<usize>)> = frame
        .args
        .iter()
        .filter(|arg| arg.role == "rel")
        .map(|arg| (arg.start, arg.end))
        .collect();
    rel_spans.sort_unstable();
    rel_spans.dedup();

    let [(start, end)] = rel_spans.as_slice() else {
        return Err(Error::UnrecognizedAnnotation(format!(
            "frame {:?} carries {} distinct predicate markers",
            frame.frame,
            rel_spans.len()
        )));
    };
    if start != end {
        return Err(Error::UnrecognizedAnnotation(format!(
            "multiword predicate in frame {:?}",
            frame.frame
        )));
    }
    let Some(head) = *start else {
        return Ok(None);
    };

    if state.alignment.lookup(head).is_none() {
        let concept = token_to_concept(&frame.frame.replace('.', "-"));
        let px = state
            .graph
            .alloc_for_token(head, Some(&concept), &sentence.tokens, &mut state.alignment)?;
        // a frame with no real arguments still keeps its predicate printable
        let no_real_args = frame.args.len() == 1
            || frame.args.get(1).is_some_and(|arg| arg.role.starts_with("LINK"));
        if no_real_args {
            triples.push(Triple::new(px, DUMMY_REL, ""));
        }
    }
    state.coverage.cover_token(head);
    Ok(Some(head))
}

fn argument(
    sentence: &Sentence,
    state: &mut SentenceState,
    triples: &mut Vec<Triple>,
    pred_head: usize,
    pred_var: Var,
    row: &PropArg,
) -> Result<()> {
    let Some((i, j)) = row.span() else {
        return Ok(());
    };
    if matches!(row.role.as_str(), "rel" | "LINK-PCR" | "LINK-SLC") {
        return Ok(());
    }
    if !row.role.starts_with("ARG") {
        return Err(Error::UnrecognizedAnnotation(format!(
            "role {:?} on argument {:?}",
            row.role, row.text
        )));
    }
    // single-token argument with no dependency entry (e.g. an empty
    // element the parse absorbed)
    if i == j && sentence.dep.governors_of(i).is_empty() {
        return Ok(());
    }

    let span: Vec<usize> = (i..=j).collect();
    let head = choose_head(&span, &sentence.dep, None)?;
    let existing = state.alignment.lookup(head);

    let mapping = match existing.and_then(|x| state.graph.concept_of(x)) {
        Some(concept) => roles::remap(&row.role, Some(concept), &[]),
        None => {
            let dep_rels: Vec<&str> = sentence
                .dep
                .governors_of(head)
                .iter()
                .map(|edge| edge.relation.as_str())
                .collect();
            roles::remap(&row.role, None, &dep_rels)
        }
    };

    if mapping.relation == "ARGM-MOD" {
        // 'will' is a bare future auxiliary, absorbed without a triple;
        // other modals are left to later tooling
        if row.text == "will" {
            state.coverage.cover_token(head);
        }
        return Ok(());
    }

    if let Some(target) = mapping.target {
        triples.push(Triple::new(pred_var, mapping.relation, target));
    } else {
        let x = match existing {
            Some(x) => x,
            None => {
                state
                    .graph
                    .alloc_for_token(head, None, &sentence.tokens, &mut state.alignment)?
            }
        };
        triples.push(Triple::new(pred_var, mapping.relation, x));
    }
    state.coverage.cover_token(head);

    // an SRL link that coincides with a dependency edge explains that
    // edge, in either direction
    state.coverage.cover_edge(Governor::Token(pred_head), head);
    state.coverage.cover_edge(Governor::Token(head), pred_head);
    Ok(())
}
