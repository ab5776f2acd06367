//! Named-entity stage — AMR fragments for entity annotations.

use tracing::debug;

use crate::graph::DUMMY_REL;
use crate::head::choose_head;
use crate::input::{Entity, Sentence};
use crate::lex::{amrify, numeric, token_to_concept};
use crate::model::{NORMALIZED_NE_TAG, Triple, Var};
use crate::{Error, Result};

use super::{AnnotatorStage, SentenceState, is_annotation_error};

/// Formal titles absorbed into a following person name; they get no
/// concept of their own.
const TITLES: [&str; 8] = ["mr", "mr.", "mister", "master", "sir", "mrs", "mrs.", "miss"];

/// Consumes the named-entity spans.
pub struct EntityStage;

impl AnnotatorStage for EntityStage {
    fn name(&self) -> &'static str {
        "entities"
    }

    fn run(&self, sentence: &Sentence, mut state: SentenceState) -> Result<SentenceState> {
        let mut triples = Vec::new();
        for entity in &sentence.entities {
            match annotate(sentence, &mut state, &mut triples, entity) {
                Ok(()) => {}
                Err(error) if is_annotation_error(&error) => state.report(self.name(), &error),
                Err(error) => return Err(error),
            }
        }
        state.graph = state.graph.with_triples(triples)?;
        Ok(state)
    }
}

fn annotate(
    sentence: &Sentence,
    state: &mut SentenceState,
    triples: &mut Vec<Triple>,
    entity: &Entity,
) -> Result<()> {
    if entity.raw_tag.starts_with("<TIMEX") {
        // timex output is a separate annotation source
        debug!(text = %entity.text, "skipping TIMEX entity");
        return Ok(());
    }

    let span: Vec<usize> = (entity.start..=entity.end).collect();
    // in 'more than 3 times', [more than 3] is a value expression but both
    // 'than' and '3' attach to 'times' in the dependency parse
    let than_quirk = |frontier: &[usize], _span: &[usize]| -> Option<usize> {
        match frontier {
            [lo, hi] if sentence.tokens[*lo].form == "than" => Some(*hi),
            _ => None,
        }
    };
    let head = choose_head(&span, &sentence.dep, Some(&than_quirk))?;
    let existing = state.alignment.lookup(head);

    let mut start = entity.start;
    if entity.raw_tag.starts_with("<NUMEX") {
        annotate_numeric(sentence, state, triples, entity, head, existing)?;
    } else if entity.coarse.ends_with("_DESC") {
        // the phrase head word becomes the concept (it may be a multiword
        // term, like Trade Representative)
        if existing.is_none() {
            let x = state
                .graph
                .alloc_for_token(head, None, &sentence.tokens, &mut state.alignment)?;
            triples.push(Triple::new(x, DUMMY_REL, ""));
        }
    } else {
        start = annotate_name(sentence, state, triples, entity, head, existing)?;
    }

    // non-head parts of the span need no attachment anywhere else
    for k in start..=entity.end {
        if let Err(error) = state.coverage.claim_token(k) {
            state.report("entities", &error);
        }
        if k != head {
            for edge in sentence.dep.governors_of(k) {
                state.coverage.cover_edge(edge.governor, k);
            }
        }
    }
    Ok(())
}

fn annotate_numeric(
    sentence: &Sentence,
    state: &mut SentenceState,
    triples: &mut Vec<Triple>,
    entity: &Entity,
    head: usize,
    existing: Option<Var>,
) -> Result<()> {
    match entity.coarse.as_str() {
        "MONEY" | "CARDINAL" | "PERCENT" => {}
        // no special treatment in the AMR guidelines, though the
        // normalized value could be used
        "ORDINAL" => return Ok(()),
        other => {
            return Err(Error::UnrecognizedAnnotation(format!(
                "NUMEX type {other:?} on {:?}",
                entity.text
            )));
        }
    }

    let normalized = sentence.tokens[head].tag(NORMALIZED_NE_TAG).ok_or_else(|| {
        Error::UnrecognizedAnnotation(format!(
            "{} entity {:?} has no normalized value",
            entity.coarse, entity.text
        ))
    })?;

    let (wrapper_concept, magnitude) = numeric::split_comparison(normalized);
    let (unit, value) = match entity.coarse.as_str() {
        "MONEY" => {
            let (unit, value) = numeric::parse_money(magnitude)?;
            (Some(unit), value)
        }
        "PERCENT" => (None, numeric::parse_percent(magnitude)?),
        _ => (None, numeric::numeric_value(magnitude)),
    };

    let wrapper = match wrapper_concept {
        Some(concept) => Some(state.graph.alloc_for_token(
            head,
            Some(concept),
            &sentence.tokens,
            &mut state.alignment,
        )?),
        None => None,
    };

    let mut x = existing;
    if (wrapper.is_none() || entity.coarse == "MONEY") && x.is_none() {
        let kind = match entity.coarse.as_str() {
            "MONEY" => "monetary-quantity".to_string(),
            "PERCENT" => "percentage-entity".to_string(),
            other => other.to_uppercase(),
        };
        // a wrapper is already aligned to the head; the quantity node under
        // it then gets no alignment of its own
        x = Some(match wrapper {
            None => {
                state
                    .graph
                    .alloc_for_token(head, Some(&kind), &sentence.tokens, &mut state.alignment)?
            }
            Some(_) => state.graph.alloc(kind),
        });
    }

    let quant_rel = if entity.coarse == "PERCENT" { "value" } else { "quant" };
    match x {
        Some(x) => {
            triples.push(Triple::new(x, quant_rel, value));
            if let Some(wrapper) = wrapper {
                triples.push(Triple::new(wrapper, "op1", x));
            }
        }
        None => {
            if let Some(wrapper) = wrapper {
                // e.g. more-than :op1 41
                triples.push(Triple::new(wrapper, "op1", value));
            }
        }
    }

    if let Some(unit) = unit {
        let y = state.graph.alloc(unit);
        if let Some(x) = x {
            triples.push(Triple::new(x, "unit", y));
        }
    }
    Ok(())
}

/// Name entity: a concept carrying the entity class plus a `name` child
/// whose operands spell the (possibly rewritten) name. Returns the span
/// start, moved left when a title was absorbed.
fn annotate_name(
    sentence: &Sentence,
    state: &mut SentenceState,
    triples: &mut Vec<Triple>,
    entity: &Entity,
    head: usize,
    existing: Option<Var>,
) -> Result<usize> {
    let mut start = entity.start;
    let mut name = entity.text.clone();

    if entity.coarse.eq_ignore_ascii_case("person") && start > 0 {
        let previous = sentence.tokens[start - 1].form.as_str();
        if TITLES.contains(&previous.to_lowercase().as_str()) {
            name = format!("{previous} {name}");
            start -= 1;
        }
    }

    if existing.is_none() {
        let fine = entity.fine.to_lowercase().replace("other", "");
        let ne_class = if fine.is_empty() { entity.coarse.to_lowercase() } else { fine };
        let (concept, amr_name) = amrify(&ne_class, &name);
        // -FALLBACK marks information not present in the sentence itself
        // (the entity class)
        let concept = format!("{}-FALLBACK", token_to_concept(&concept));
        let x = state
            .graph
            .alloc_for_token(head, Some(&concept), &sentence.tokens, &mut state.alignment)?;
        let n = state.graph.alloc("name");
        triples.push(Triple::new(x, "name", n));
        for (i, word) in amr_name.split_whitespace().enumerate() {
            triples.push(Triple::new(n, format!("op{}", i + 1), word));
        }
    }
    Ok(start)
}
