use serde::{Deserialize, Serialize};

/// One modified residue instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifiedResidue {
    /// Entity containing the residue.
    pub entity_id: String,
    /// Label chain id.
    pub label_chain_id: String,
    /// Author chain id.
    pub auth_chain_id: String,
    /// Label residue number.
    pub residue_number: i32,
    /// Chemical component id, e.g. `MSE`.
    pub compound_id: String,
    /// Chemical component name.
    pub compound_name: String,
}

/// Observed residue ranges of one polymer chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainCoverage {
    /// Entity the chain belongs to.
    pub entity_id: String,
    /// Label chain id.
    pub chain_id: String,
    /// Author chain id.
    pub auth_chain_id: String,
    /// Inclusive observed residue ranges (label numbering).
    pub observed: Vec<(i32, i32)>,
}

impl ChainCoverage {
    /// Number of observed residues.
    #[must_use]
    pub fn residue_count(&self) -> usize {
        self.observed
            .iter()
            .map(|&(start, end)| (end - start).unsigned_abs() as usize + 1)
            .sum()
    }

    /// Whether any observed range overlaps `[start, end]`.
    #[must_use]
    pub fn overlaps(&self, start: i32, end: i32) -> bool {
        self.observed
            .iter()
            .any(|&(lo, hi)| lo.min(hi) <= end && start <= lo.max(hi))
    }
}
