use crate::Qubit;
use std::collections::HashMap;

/// Remaining freeze tenure per bit index. Positions not present are free.
#[derive(Debug, Clone, Default)]
pub struct TabuLedger {
    entries: HashMap<usize, u32>,
}

impl TabuLedger {
    pub fn new() -> TabuLedger {
        TabuLedger {
            entries: HashMap::new(),
        }
    }

    pub fn is_frozen(&self, index: usize) -> bool {
        self.entries.get(&index).map_or(false, |&tenure| tenure > 0)
    }

    /// Remaining tenure for `index`, 0 when free.
    pub fn remaining(&self, index: usize) -> u32 {
        self.entries.get(&index).copied().unwrap_or(0)
    }

    pub fn freeze(&mut self, index: usize, tenure: u32) {
        self.entries.insert(index, tenure);
    }

    /// One bookkeeping tick: every tenure drops by one and expired entries
    /// leave the ledger, so a tenure never goes negative.
    pub fn decay(&mut self) {
        self.entries.retain(|_, tenure| {
            *tenure -= 1;
            *tenure > 0
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rotates every unfrozen position where the two reference vectors disagree
/// and freezes it for `tenure` iterations. The step is `theta` scaled by the
/// bit difference `toward - away_from`, with the sign flipped in the
/// `alpha * beta < 0` quadrants so the pull still points at `toward`.
pub fn steer(
    register: &mut [Qubit],
    ledger: &mut TabuLedger,
    tenure: u32,
    toward: &[u8],
    away_from: &[u8],
    theta: f64,
) {
    for (i, qubit) in register.iter_mut().enumerate() {
        if ledger.is_frozen(i) {
            continue;
        }
        let mut direction = toward[i] as i32 - away_from[i] as i32;
        if direction == 0 {
            continue;
        }
        if qubit.alpha * qubit.beta < 0.0 {
            direction = -direction;
        }
        qubit.rotate(theta * direction as f64);
        ledger.freeze(i, tenure);
    }
}
