//! Per-sentence annotation input.
//!
//! Decodes the JSON bundle the upstream tools emit for each sentence —
//! token/tag pairs, Stanford dependency tuples, BBN named-entity spans and
//! PropBank proposition frames — and validates it into the read-only
//! [`Sentence`] the pipeline threads through its stages. File I/O stays the
//! caller's concern.

use serde::Deserialize;

use crate::dep::{DepGraph, Governor};
use crate::model::Token;
use crate::{Error, Result};

// ============================================================================
// Raw JSON shapes
// ============================================================================

/// The per-sentence JSON bundle as found on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct SentenceJson {
    /// `[surface, {tag: value, ...}]` pairs.
    pub words: Vec<(String, crate::model::TagMap)>,
    #[serde(default)]
    pub stanford_dep: Vec<DepEntry>,
    #[serde(default, rename = "bbn_ne")]
    pub entities: Vec<Entity>,
    #[serde(default, rename = "prop")]
    pub props: Vec<PropFrame>,
}

/// One dependency tuple. `gov_idx == -1` encodes the sentence root.
#[derive(Debug, Clone, Deserialize)]
pub struct DepEntry {
    pub gov_idx: i64,
    pub dep_idx: usize,
    pub rel: String,
}

/// A named-entity span, inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawEntity")]
pub struct Entity {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub coarse: String,
    pub fine: String,
    pub raw_tag: String,
    pub flag: bool,
}

#[derive(Deserialize)]
struct RawEntity(usize, usize, String, String, String, String, bool);

impl From<RawEntity> for Entity {
    fn from(raw: RawEntity) -> Self {
        Entity {
            start: raw.0,
            end: raw.1,
            text: raw.2,
            coarse: raw.3,
            fine: raw.4,
            raw_tag: raw.5,
            flag: raw.6,
        }
    }
}

/// A PropBank proposition frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropFrame {
    pub baseform: String,
    /// The roleset, e.g. `name.01`. Older bundles call this `roleset`.
    #[serde(alias = "roleset")]
    pub frame: String,
    #[serde(default)]
    pub basepos: Option<String>,
    #[serde(default)]
    pub inflection: Option<String>,
    pub args: Vec<PropArg>,
}

/// One argument row of a proposition frame: the predicate marker (`rel`),
/// an argument role, or a cross-reference link marker. Boundaries are
/// absent for trace-only arguments.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawArg")]
pub struct PropArg {
    pub role: String,
    pub tree_node: String,
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub text: String,
}

#[derive(Deserialize)]
struct RawArg(String, String, Option<usize>, Option<usize>, String);

impl From<RawArg> for PropArg {
    fn from(raw: RawArg) -> Self {
        PropArg {
            role: raw.0,
            tree_node: raw.1,
            start: raw.2,
            end: raw.3,
            text: raw.4,
        }
    }
}

impl PropArg {
    /// Span boundaries when both are present.
    pub fn span(&self) -> Option<(usize, usize)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

// ============================================================================
// Validated sentence
// ============================================================================

/// The read-only input tuple for one sentence.
#[derive(Debug, Clone)]
pub struct Sentence {
    pub id: String,
    pub tokens: Vec<Token>,
    pub dep: DepGraph,
    pub entities: Vec<Entity>,
    pub props: Vec<PropFrame>,
}

impl Sentence {
    pub fn from_json(id: impl Into<String>, json: &str) -> Result<Self> {
        let raw: SentenceJson = serde_json::from_str(json)?;
        Self::from_parts(id, raw)
    }

    /// Assemble and validate a sentence from its decoded parts.
    ///
    /// Out-of-range token references and inconsistent span boundaries are
    /// fatal for the sentence.
    pub fn from_parts(id: impl Into<String>, raw: SentenceJson) -> Result<Self> {
        let tokens: Vec<Token> = raw
            .words
            .into_iter()
            .map(|(form, tags)| Token { form, tags })
            .collect();
        let token_count = tokens.len();

        let mut edges = Vec::with_capacity(raw.stanford_dep.len());
        for entry in raw.stanford_dep {
            let governor = match entry.gov_idx {
                -1 => Governor::Root,
                g if g >= 0 => Governor::Token(g as usize),
                g => {
                    return Err(Error::MalformedInput(format!("governor index {g}")));
                }
            };
            edges.push((governor, entry.dep_idx, entry.rel));
        }
        let dep = DepGraph::new(token_count, edges)?;

        for entity in &raw.entities {
            if entity.start > entity.end || entity.end >= token_count {
                return Err(Error::MalformedInput(format!(
                    "entity span {}..={} out of range for {:?}",
                    entity.start, entity.end, entity.text
                )));
            }
        }
        for frame in &raw.props {
            for arg in &frame.args {
                if let Some((start, end)) = arg.span() {
                    if start > end || end >= token_count {
                        return Err(Error::MalformedInput(format!(
                            "argument span {start}..={end} out of range in frame {:?}",
                            frame.frame
                        )));
                    }
                }
            }
        }

        Ok(Self {
            id: id.into(),
            tokens,
            dep,
            entities: raw.entities,
            props: raw.props,
        })
    }
}
