use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Simple,
    Medium,
    Complex,
}

/// Per-block reveal bounds consumed by the masker: between `min_reveal`
/// and `max_reveal` givens in each of `block_count` randomly chosen blocks.
/// Values beyond the nine cells of a block (or nine blocks) are clamped
/// by [`mask`](crate::puzzle::mask).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealProfile {
    pub min_reveal: usize,
    pub max_reveal: usize,
    pub block_count: usize,
}

impl Default for RevealProfile {
    /// Fallback bounds for difficulty settings the engine does not
    /// recognize.
    fn default() -> Self {
        RevealProfile { min_reveal: 3, max_reveal: 6, block_count: 7 }
    }
}

impl Difficulty {
    pub fn label(&self) -> &str {
        match self {
            Difficulty::Simple => "Simple",
            Difficulty::Medium => "Medium",
            Difficulty::Complex => "Complex",
        }
    }

    pub fn profile(&self) -> RevealProfile {
        match self {
            Difficulty::Simple => RevealProfile { min_reveal: 4, max_reveal: 6, block_count: 8 },
            Difficulty::Medium => RevealProfile { min_reveal: 3, max_reveal: 5, block_count: 7 },
            Difficulty::Complex => RevealProfile { min_reveal: 3, max_reveal: 5, block_count: 6 },
        }
    }

    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Simple, Difficulty::Medium, Difficulty::Complex]
    }

    pub fn next(&self) -> Difficulty {
        match self {
            Difficulty::Simple => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Complex,
            Difficulty::Complex => Difficulty::Simple,
        }
    }

    pub fn prev(&self) -> Difficulty {
        match self {
            Difficulty::Simple => Difficulty::Complex,
            Difficulty::Medium => Difficulty::Simple,
            Difficulty::Complex => Difficulty::Medium,
        }
    }
}
