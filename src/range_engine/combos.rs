//! The fixed 169-hand combo universe and the range map over it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::range_engine::models::{Combo, PaintAction, RANKS_DESC};

/// Every canonical starting hand: 13 pairs, 78 suited, 78 offsuit = 169.
///
/// Iteration order walks the 13x13 grid row by row (pair on the diagonal,
/// suited then offsuit above it), which is stable across runs.
pub fn all_combos() -> Vec<Combo> {
    let mut keys = Vec::with_capacity(169);
    for (i, &r1) in RANKS_DESC.iter().enumerate() {
        for (j, &r2) in RANKS_DESC.iter().enumerate() {
            if i == j {
                keys.push(Combo::new(r1, r2, false));
            } else if i < j {
                keys.push(Combo::new(r1, r2, true));
                keys.push(Combo::new(r1, r2, false));
            }
        }
    }
    keys
}

/// A total mapping from all 169 combos to a paint action.
///
/// `RangeMap::new()` assigns FOLD everywhere. Lookups on maps that arrived
/// partially populated (hand-edited imports) also default to FOLD, so the
/// mapping is total regardless of how the map was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RangeMap {
    cells: BTreeMap<Combo, PaintAction>,
}

impl RangeMap {
    /// Fresh map with every combo set to FOLD.
    pub fn new() -> RangeMap {
        let cells = all_combos().into_iter().map(|c| (c, PaintAction::Fold)).collect();
        RangeMap { cells }
    }

    pub fn get(&self, combo: Combo) -> PaintAction {
        self.cells.get(&combo).copied().unwrap_or(PaintAction::Fold)
    }

    pub fn set(&mut self, combo: Combo, action: PaintAction) {
        self.cells.insert(combo, action);
    }

    /// Combos currently assigned a non-FOLD action.
    pub fn assigned(&self) -> impl Iterator<Item = (Combo, PaintAction)> + '_ {
        self.cells
            .iter()
            .filter(|(_, a)| **a != PaintAction::Fold)
            .map(|(c, a)| (*c, *a))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Default for RangeMap {
    fn default() -> RangeMap {
        RangeMap::new()
    }
}
