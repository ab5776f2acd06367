//! PropBank role-label remapping to AMR relations.

use tracing::warn;

use crate::model::Value;

/// TIMEX3 expression types a temporal concept may carry.
pub const TIMEX_TYPES: [&str; 4] = ["DATE", "TIME", "DURATION", "SET"];

/// Result of remapping a PropBank role label.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleMapping {
    pub relation: String,
    /// A literal target replacing the argument node, e.g. polarity `-`.
    /// `None` means the argument's own variable is the target.
    pub target: Option<Value>,
}

impl RoleMapping {
    fn relation(relation: impl Into<String>) -> Self {
        Self { relation: relation.into(), target: None }
    }
}

/// Map a proposition role label to an AMR relation, using the concept
/// already attached to the argument head (when aligned) or its incoming
/// dependency relations as context.
///
/// `ARGM-MOD` passes through unmapped — modality is verb-specific and
/// handled by the proposition stage itself.
pub fn remap(role: &str, concept: Option<&str>, dep_rels: &[&str]) -> RoleMapping {
    let base = role.replace("-REF", "");
    match base.as_str() {
        "ARGM-TMP" => {
            if let Some(c) = concept {
                if c.split('-').any(|part| TIMEX_TYPES.contains(&part)) {
                    let relation = if c.split('-').any(|part| part == "DURATION") {
                        "duration"
                    } else {
                        "time"
                    };
                    return RoleMapping::relation(relation);
                }
                warn!(concept = c, "ARGM-TMP argument is not a known time expression");
            }
            // fallback: does it at least look syntactically temporal?
            if dep_rels.contains(&"tmod") {
                RoleMapping::relation("time")
            } else if dep_rels.contains(&"amod") {
                // e.g. 'former': temporal but not itself a time
                RoleMapping::relation("mod")
            } else {
                RoleMapping::relation(base)
            }
        }
        "ARGM-NEG" => RoleMapping {
            relation: "polarity".to_string(),
            target: Some(Value::atom("-")),
        },
        "ARGM-MOD" => RoleMapping::relation(base),
        _ => match base.strip_prefix("ARGM-") {
            Some(modifier) => RoleMapping::relation(match modifier {
                "CAU" => "cause",
                // two people performing an action together
                "COM" => "accompanier",
                "DIR" => "direction",
                // extent
                "EXT" => "degree",
                // could also be :destination
                "GOL" => "beneficiary",
                // possibly also :source. look at the preposition?
                "LOC" => "location",
                "MNR" => "manner",
                "PRP" => "purpose",
                // purpose not cause
                "PNC" => "purpose",
                // ADV, ADJ, DIS, DSP, PRD, REC, LVB all default here
                _ => "mod",
            }),
            None => RoleMapping::relation(base),
        },
    }
}
