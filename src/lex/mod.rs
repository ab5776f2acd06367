//! Lexical rule tables — pure lookup/transform helpers with no shared state.
//!
//! Each submodule is an independent, individually testable transformation
//! consumed by an annotator stage; none of them touch the graph or the
//! completion bookkeeping.

pub mod nationality;
pub mod numeric;
pub mod roles;

pub use nationality::amrify;
pub use roles::{remap, RoleMapping};

use once_cell::sync::Lazy;
use regex::Regex;

static NON_CONCEPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9-]").expect("hard-coded pattern"));

/// Normalize a surface form into a concept label: strip everything outside
/// `[A-Za-z0-9-]`, lowercase, `??` when nothing is left.
pub fn token_to_concept(form: &str) -> String {
    let cleaned = NON_CONCEPT.replace_all(form, "").to_lowercase();
    if cleaned.is_empty() { "??".to_string() } else { cleaned }
}
