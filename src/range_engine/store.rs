//! The range store: one flat map from (mode, depth, position, context) to a
//! 169-cell range map.
//!
//! The flat composite key replaces the nested dictionaries of the persisted
//! wire format — intermediate levels can never exist without a populated
//! leaf, and the idempotent ensure operation is a single upsert. The nested
//! shape only appears at the serialization boundary (see `persist`).

use std::collections::BTreeMap;

use thiserror::Error;

use crate::range_engine::combos::{all_combos, RangeMap};
use crate::range_engine::context::{context_check, ContextKey};
use crate::range_engine::models::{Combo, History, PaintAction, Position, TableMode};

// ---------------------------------------------------------------------------
// Keys and the store itself
// ---------------------------------------------------------------------------

/// Composite key addressing one leaf range map.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoreKey {
    pub mode: TableMode,
    pub depth: u32,
    pub position: Position,
    pub context: ContextKey,
}

/// Sparse store of every range map the user has painted. A single logical
/// writer mutates it; persistence is the caller's explicit side effect
/// after each successful mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeStore {
    leaves: BTreeMap<StoreKey, RangeMap>,
}

impl RangeStore {
    pub fn new() -> RangeStore {
        RangeStore::default()
    }

    /// Create the leaf for the actor's current context if it does not exist
    /// yet. No-op (returns `None`) when the context is not reachable per the
    /// validator — invalid states are never materialized.
    ///
    /// Returns the context key of the (now existing) leaf. Idempotent: an
    /// existing leaf is left untouched.
    pub fn ensure_leaf(
        &mut self,
        mode: TableMode,
        depth: u32,
        position: Position,
        history: &History,
    ) -> Option<ContextKey> {
        if !context_check(position, mode, history).valid {
            return None;
        }
        let context = ContextKey::from_history(history, position, mode);
        let key = StoreKey { mode, depth, position, context: context.clone() };
        self.leaves.entry(key).or_insert_with(RangeMap::new);
        Some(context)
    }

    /// Overwrite one combo's action in the targeted leaf, creating the leaf
    /// first via [`ensure_leaf`] semantics. Returns `false` (and changes
    /// nothing) when the context is invalid. All other leaves are untouched.
    ///
    /// [`ensure_leaf`]: RangeStore::ensure_leaf
    pub fn paint(
        &mut self,
        mode: TableMode,
        depth: u32,
        position: Position,
        history: &History,
        combo: Combo,
        action: PaintAction,
    ) -> bool {
        let Some(context) = self.ensure_leaf(mode, depth, position, history) else {
            return false;
        };
        let key = StoreKey { mode, depth, position, context };
        if let Some(leaf) = self.leaves.get_mut(&key) {
            leaf.set(combo, action);
        }
        true
    }

    pub fn leaf(
        &self,
        mode: TableMode,
        depth: u32,
        position: Position,
        context: &ContextKey,
    ) -> Option<&RangeMap> {
        let key = StoreKey { mode, depth, position, context: context.clone() };
        self.leaves.get(&key)
    }

    /// Every context key stored at (mode, depth, position).
    pub fn contexts_at(&self, mode: TableMode, depth: u32, position: Position) -> Vec<ContextKey> {
        self.leaves
            .keys()
            .filter(|k| k.mode == mode && k.depth == depth && k.position == position)
            .map(|k| k.context.clone())
            .collect()
    }

    /// True when any leaf exists at (mode, depth, position).
    fn has_data_at(&self, mode: TableMode, depth: u32, position: Position) -> bool {
        self.leaves
            .keys()
            .any(|k| k.mode == mode && k.depth == depth && k.position == position)
    }

    /// Copy `position`'s ranges from one stack depth to another, merging
    /// into whatever already exists at the destination (see
    /// [`merge_range_maps`] for the overwrite/fill-gaps distinction).
    ///
    /// The failure cases are user-visible notices, not faults: the store is
    /// left unchanged whenever an error is returned.
    pub fn copy_between_depths(
        &mut self,
        mode: TableMode,
        from_depth: u32,
        to_depth: u32,
        position: Position,
        scope: &CopyScope,
        overwrite: bool,
    ) -> Result<CopySummary, CopyError> {
        if from_depth == to_depth {
            return Err(CopyError::SameDepth(from_depth));
        }
        if !self.has_data_at(mode, from_depth, position) {
            return Err(CopyError::NoSourceData { depth: from_depth, position });
        }

        let contexts: Vec<ContextKey> = match scope {
            CopyScope::CurrentContext(ctx) => {
                if self.leaf(mode, from_depth, position, ctx).is_some() {
                    vec![ctx.clone()]
                } else {
                    Vec::new()
                }
            }
            CopyScope::AllContexts => self.contexts_at(mode, from_depth, position),
        };
        if contexts.is_empty() {
            return Err(CopyError::EmptyScope(from_depth));
        }

        for context in &contexts {
            let source = self
                .leaf(mode, from_depth, position, context)
                .cloned()
                .unwrap_or_default();
            let dest_key = StoreKey { mode, depth: to_depth, position, context: context.clone() };
            let merged = merge_range_maps(self.leaves.get(&dest_key), &source, overwrite);
            self.leaves.insert(dest_key, merged);
        }

        Ok(CopySummary { contexts_copied: contexts.len() })
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub(crate) fn leaves(&self) -> &BTreeMap<StoreKey, RangeMap> {
        &self.leaves
    }

    pub(crate) fn insert_leaf(&mut self, key: StoreKey, map: RangeMap) {
        self.leaves.insert(key, map);
    }
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Merge `source` into `target`.
///
/// With `overwrite` the result is a plain copy of `source`. Otherwise this
/// is a fill-the-gaps merge: only combos that are absent or FOLD in the
/// target take the source value; a combo the user already assigned a
/// non-FOLD action keeps it. A missing target behaves like a copy.
pub fn merge_range_maps(target: Option<&RangeMap>, source: &RangeMap, overwrite: bool) -> RangeMap {
    let Some(target) = target else {
        return source.clone();
    };
    if overwrite {
        return source.clone();
    }
    let mut out = target.clone();
    for combo in all_combos() {
        if out.get(combo) == PaintAction::Fold {
            out.set(combo, source.get(combo));
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Copy parameters and outcomes
// ---------------------------------------------------------------------------

/// Which contexts a depth copy covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyScope {
    /// Exactly one context — the one currently active in the editor.
    CurrentContext(ContextKey),
    /// Every context stored at the source depth for the position.
    AllContexts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopySummary {
    pub contexts_copied: usize,
}

/// Reportable copy failures. None of these mutate the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopyError {
    #[error("source and destination depth are both {0}bb — nothing to copy")]
    SameDepth(u32),
    #[error("no ranges stored at {depth}bb for {position}")]
    NoSourceData { depth: u32, position: Position },
    #[error("no stored context matches the requested scope at {0}bb")]
    EmptyScope(u32),
}
