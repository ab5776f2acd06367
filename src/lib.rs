//! # amr-rs — English-to-AMR Annotation Pipeline
//!
//! Converts per-sentence linguistic annotations (a dependency parse,
//! named-entity spans, PropBank-style predicate-argument structures) into a
//! single semantic graph of concept nodes and labeled relations, following
//! the Abstract Meaning Representation model.
//!
//! ## Design Principles
//!
//! 1. **One graph, many sources**: independent annotator stages extend a
//!    shared graph without double-counting tokens or dependency edges
//! 2. **Clean DTOs**: `Var`, `Value`, `Triple`, `Token` cross all boundaries
//! 3. **Snapshot commits**: a stage builds its triples locally and commits
//!    them once; half-finished work is never observable downstream
//! 4. **No falsy sentinels**: every alignment lookup is an `Option<Var>` —
//!    variable 0 is a valid identifier
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use amr_rs::{Pipeline, Sentence};
//!
//! # fn example(json: &str) -> amr_rs::Result<()> {
//! let sentence = Sentence::from_json("wsj_0002.0", json)?;
//! let annotation = Pipeline::standard().annotate(&sentence)?;
//!
//! for triple in annotation.graph.triples() {
//!     println!("{triple}");
//! }
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod dep;
pub mod align;
pub mod cover;
pub mod graph;
pub mod head;
pub mod lex;
pub mod input;
pub mod stages;
pub mod pipeline;
pub mod export;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{Var, Value, Triple, Token, TagMap, NORMALIZED_NE_TAG};

// ============================================================================
// Re-exports: Core state
// ============================================================================

pub use dep::{DepGraph, DepEdge, Governor};
pub use align::Alignment;
pub use cover::{Coverage, Residue};
pub use graph::{ConceptGraph, DUMMY_REL};
pub use head::{choose_head, TieBreak};

// ============================================================================
// Re-exports: Input, stages, driver
// ============================================================================

pub use input::{Sentence, Entity, PropFrame, PropArg};
pub use stages::{AnnotatorStage, SentenceState, Issue};
pub use pipeline::{Pipeline, Annotation};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structurally broken input (out-of-range indices, inconsistent span
    /// boundaries). Fatal for the sentence.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Head selection left zero or several candidates and no tie-break
    /// resolved it. The offending annotation is skipped, not fabricated.
    #[error("ambiguous span {span:?}: head frontier {frontier:?}")]
    AmbiguousSpan { span: Vec<usize>, frontier: Vec<usize> },

    /// Two annotations claimed the same token. First writer wins; the
    /// second claim is rejected and reported.
    #[error("token {token} is already explained")]
    OverlapViolation { token: usize },

    /// An annotation whose shape matches no recognized case. Rejected
    /// explicitly and surfaced for manual review, never silently dropped.
    #[error("unrecognized annotation: {0}")]
    UnrecognizedAnnotation(String),

    /// Programming invariant violation inside the concept graph, e.g. a
    /// triple referencing a variable that was never allocated.
    #[error("graph invariant violated: {0}")]
    GraphInvariant(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
