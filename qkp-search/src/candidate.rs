use serde::{Deserialize, Serialize};

/// A measured bit vector after evaluation and repair.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub bits: Vec<u8>,
    pub value: u64,
    pub weight: u64,
}

impl Candidate {
    /// Selected item indices.
    pub fn items(&self) -> Vec<usize> {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, &bit)| if bit == 1 { Some(i) } else { None })
            .collect()
    }

    /// Whether this candidate replaces `incumbent` as best-known: strictly
    /// higher value, or equal value at strictly lower weight.
    pub fn improves(&self, incumbent: &Candidate) -> bool {
        self.value > incumbent.value
            || (self.value == incumbent.value && self.weight < incumbent.weight)
    }
}

/// Result of one full search run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best: Candidate,
    /// Iteration (1-based) of the last improvement; `None` when the value
    /// observed before the loop was never improved on.
    pub found_at: Option<u32>,
    /// One tracked value per iteration, with the pre-loop value at index 0.
    pub history: Vec<u64>,
}
