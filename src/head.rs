//! Head selection — mapping a token span to its single syntactic head.
//!
//! Restricted least-common-subsumer: assume that for every token in the
//! span, all tokens on the ancestor path up to the span's head are also in
//! the span. A token whose attachments all point inside the span is
//! dominated within it and cannot be the external attachment point.

use hashbrown::HashSet;

use crate::dep::{DepGraph, Governor};
use crate::{Error, Result};

/// Caller-supplied disambiguation for spans that are not well-formed
/// constituents. Receives the ambiguous frontier and the full span; returns
/// a fallback head index, or `None` to let the ambiguity propagate.
pub type TieBreak<'a> = &'a dyn Fn(&[usize], &[usize]) -> Option<usize>;

/// Select the head of `span`: the unique token attached outside the span
/// (or to the root).
///
/// Starting from the whole span, drop every token that either has no
/// governor edges at all or whose governors all lie inside the span.
/// Exactly one survivor is the head. Zero or several survivors mean the
/// span is not a well-formed constituent: the tie-break (if any) may still
/// name a head, otherwise the span fails with [`Error::AmbiguousSpan`] and
/// the caller skips the annotation rather than fabricating an attachment.
pub fn choose_head(span: &[usize], dep: &DepGraph, tie_break: Option<TieBreak>) -> Result<usize> {
    let in_span: HashSet<usize> = span.iter().copied().collect();

    let mut frontier: Vec<usize> = in_span
        .iter()
        .copied()
        .filter(|&token| {
            let governors = dep.governors_of(token);
            !governors.is_empty()
                && !governors.iter().all(|edge| match edge.governor {
                    Governor::Token(g) => in_span.contains(&g),
                    Governor::Root => false,
                })
        })
        .collect();
    frontier.sort_unstable();

    if let [head] = frontier.as_slice() {
        return Ok(*head);
    }
    if let Some(resolve) = tie_break {
        if let Some(head) = resolve(&frontier, span) {
            return Ok(head);
        }
    }
    Err(Error::AmbiguousSpan {
        span: span.to_vec(),
        frontier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chain(len: usize) -> DepGraph {
        // token i governed by i+1, last token governed by root
        let edges = (0..len).map(|i| {
            if i + 1 < len {
                (Governor::Token(i + 1), i, "dep".to_string())
            } else {
                (Governor::Root, i, "root".to_string())
            }
        });
        DepGraph::new(len, edges).unwrap()
    }

    #[test]
    fn test_head_attaches_outside_span() {
        let dep = chain(5);
        // span [1, 2, 3]: 1 and 2 attach inside, 3 attaches to 4 outside
        assert_eq!(choose_head(&[1, 2, 3], &dep, None).unwrap(), 3);
    }

    #[test]
    fn test_root_attachment_is_a_head() {
        let dep = chain(3);
        assert_eq!(choose_head(&[0, 1, 2], &dep, None).unwrap(), 2);
    }

    #[test]
    fn test_disconnected_span_is_ambiguous() {
        // two tokens each governed by a distinct token outside the span
        let dep = DepGraph::new(
            4,
            [
                (Governor::Token(2), 0, "amod".to_string()),
                (Governor::Token(3), 1, "amod".to_string()),
                (Governor::Root, 2, "root".to_string()),
                (Governor::Token(2), 3, "conj".to_string()),
            ],
        )
        .unwrap();

        let err = choose_head(&[0, 1], &dep, None).unwrap_err();
        match err {
            Error::AmbiguousSpan { frontier, .. } => assert_eq!(frontier, vec![0, 1]),
            other => panic!("expected AmbiguousSpan, got {other:?}"),
        }
    }

    #[test]
    fn test_tie_break_resolves() {
        let dep = DepGraph::new(
            4,
            [
                (Governor::Token(2), 0, "advmod".to_string()),
                (Governor::Token(2), 1, "num".to_string()),
                (Governor::Root, 2, "root".to_string()),
            ],
        )
        .unwrap();

        // both 0 and 1 attach to 2, outside the span
        let pick_max = |frontier: &[usize], _span: &[usize]| frontier.iter().copied().max();
        assert_eq!(choose_head(&[0, 1], &dep, Some(&pick_max)).unwrap(), 1);
    }

    #[test]
    fn test_failed_tie_break_propagates() {
        let dep = chain(4);
        let refuse = |_: &[usize], _: &[usize]| None;
        // span of isolated... tokens 0 and 2 both attach outside {0, 2}
        let err = choose_head(&[0, 2], &dep, Some(&refuse)).unwrap_err();
        assert!(matches!(err, Error::AmbiguousSpan { .. }));
    }

    proptest! {
        /// Contiguous prefixes of a dependency chain are well-formed
        /// constituents: the selector must name their last token.
        #[test]
        fn prop_chain_prefix_head_is_last(len in 2usize..12, span_len in 1usize..12) {
            let span_len = span_len.min(len);
            let dep = chain(len);
            let span: Vec<usize> = (0..span_len).collect();
            prop_assert_eq!(choose_head(&span, &dep, None).unwrap(), span_len - 1);
        }
    }
}
