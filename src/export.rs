//! PENMAN export — serialize a concept graph as AMR notation.
//!
//! Produces the bracketed notation AMR tooling reads:
//!
//! ```text
//! (v0 / person-FALLBACK
//!     :name (v1 / name
//!         :op1 "Rudolph"))
//! ```
//!
//! Reentrant variables are printed once and referenced bare afterwards.
//! A graph whose fragments never got connected prints one fragment per
//! root, in variable order.

use std::io::Write;

use hashbrown::HashSet;

use crate::graph::{ConceptGraph, DUMMY_REL};
use crate::model::{Triple, Value, Var};
use crate::Result;

/// Write the graph as PENMAN fragments.
pub fn write_penman<W: Write>(graph: &ConceptGraph, writer: &mut W) -> Result<()> {
    let targets: HashSet<Var> = graph
        .triples()
        .filter_map(|t| t.target.as_var())
        .collect();

    // roots: sources that are nobody's target
    let mut roots: Vec<Var> = graph
        .triples()
        .map(|t| t.source)
        .filter(|v| !targets.contains(v))
        .collect();
    roots.sort_unstable();
    roots.dedup();

    let mut visited = HashSet::new();
    for (i, root) in roots.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        write_node(graph, *root, 0, &mut visited, writer)?;
        writeln!(writer)?;
    }
    Ok(())
}

/// The graph as a PENMAN string.
pub fn to_penman_string(graph: &ConceptGraph) -> Result<String> {
    let mut buffer = Vec::new();
    write_penman(graph, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn write_node<W: Write>(
    graph: &ConceptGraph,
    variable: Var,
    depth: usize,
    visited: &mut HashSet<Var>,
    writer: &mut W,
) -> Result<()> {
    if !visited.insert(variable) {
        // reentrancy: reference, don't expand
        write!(writer, "{variable}")?;
        return Ok(());
    }

    let concept = graph.concept_of(variable).unwrap_or("??");
    write!(writer, "({variable} / {concept}")?;

    let mut outgoing: Vec<&Triple> = graph
        .triples_from(variable)
        .filter(|t| t.relation != DUMMY_REL)
        .collect();
    outgoing.sort_by(|a, b| {
        (a.relation.as_str(), a.target.to_string())
            .cmp(&(b.relation.as_str(), b.target.to_string()))
    });

    for triple in outgoing {
        writeln!(writer)?;
        for _ in 0..=depth {
            write!(writer, "    ")?;
        }
        write!(writer, ":{} ", triple.relation)?;
        match &triple.target {
            Value::Var(child) => write_node(graph, *child, depth + 1, visited, writer)?,
            literal => write!(writer, "{literal}")?,
        }
    }
    write!(writer, ")")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_fragment() {
        let mut graph = ConceptGraph::new();
        let x = graph.alloc("person-FALLBACK");
        let n = graph.alloc("name");
        let graph = graph
            .with_triples([
                Triple::new(x, "name", n),
                Triple::new(n, "op1", "Rudolph"),
                Triple::new(n, "op2", "Agnew"),
            ])
            .unwrap();

        let penman = to_penman_string(&graph).unwrap();
        assert_eq!(
            penman,
            "(v0 / person-FALLBACK\n    :name (v1 / name\n        :op1 \"Rudolph\"\n        :op2 \"Agnew\"))\n"
        );
    }

    #[test]
    fn test_atom_and_number_print_bare() {
        let mut graph = ConceptGraph::new();
        let p = graph.alloc("name-01");
        let graph = graph
            .with_triples([
                Triple::new(p, "polarity", Value::atom("-")),
                Triple::new(p, "quant", 1900000i64),
            ])
            .unwrap();

        let penman = to_penman_string(&graph).unwrap();
        assert!(penman.contains(":polarity -\n") || penman.contains(":polarity -)"));
        assert!(penman.contains(":quant 1900000"));
    }

    #[test]
    fn test_dummy_keeps_bare_variable_printable() {
        let mut graph = ConceptGraph::new();
        let x = graph.alloc("director");
        let graph = graph.with_triples([Triple::new(x, DUMMY_REL, "")]).unwrap();

        assert_eq!(to_penman_string(&graph).unwrap(), "(v0 / director)\n");
    }

    #[test]
    fn test_reentrancy_prints_reference() {
        let mut graph = ConceptGraph::new();
        let p = graph.alloc("want-01");
        let a = graph.alloc("person");
        let graph = graph
            .with_triples([
                Triple::new(p, "ARG0", a),
                Triple::new(p, "ARG1", a),
            ])
            .unwrap();

        let penman = to_penman_string(&graph).unwrap();
        // expanded once, referenced the second time
        assert_eq!(penman.matches("(v1 / person)").count(), 1);
        assert_eq!(penman.matches("v1").count(), 2);
    }
}
