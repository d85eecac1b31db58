//! Part-number assembler
//!
//! Concatenates a base code with resolved code fragments. Fragments carry
//! their resolution outcome as a tagged value, so an unresolved fragment
//! can only ever be omitted; error markers cannot leak into a part number.

use crate::error::SelectionError;
use serde::{Deserialize, Serialize};

/// How fragments are joined into the final part number.
/// Different product families follow different catalog conventions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinStyle {
    /// Direct concatenation, no separator (e.g. `15-LE200T03C`)
    #[default]
    #[serde(rename = "concat")]
    Concat,

    /// Hyphen between base code and every fragment (e.g. `DT-600T-4-0058CC`)
    #[serde(rename = "hyphenated")]
    Hyphenated,
}

/// One part-number fragment, tagged with its resolution outcome
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// Successfully resolved (or literal) code text
    Code(String),

    /// Fragment that could not be resolved; contributes nothing
    Missing(SelectionError),
}

impl Fragment {
    /// Literal fragment that is always valid (option letters, rating codes)
    pub fn literal(code: impl Into<String>) -> Self {
        Fragment::Code(code.into())
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Fragment::Code(_))
    }
}

impl From<Result<String, SelectionError>> for Fragment {
    fn from(outcome: Result<String, SelectionError>) -> Self {
        match outcome {
            Ok(code) => Fragment::Code(code),
            Err(err) => Fragment::Missing(err),
        }
    }
}

/// Assemble a part number from a base code and fragments.
///
/// Invalid fragments are omitted entirely, never replaced with placeholder
/// text, so adjacent valid fragments join cleanly in both styles.
pub fn assemble(base_code: &str, fragments: &[Fragment], style: JoinStyle) -> String {
    let separator = match style {
        JoinStyle::Concat => "",
        JoinStyle::Hyphenated => "-",
    };

    let mut out = base_code.to_string();
    for fragment in fragments {
        if let Fragment::Code(code) = fragment {
            out.push_str(separator);
            out.push_str(code);
        }
    }
    out
}
