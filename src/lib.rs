//! # preflop_trainer
//!
//! The core engine of a preflop range training tool: a user paints
//! "correct" actions into 13x13 range grids, then drills random hands
//! against them. This crate holds everything below the UI — the data model,
//! validation, storage, scoring and drill synthesis — as pure synchronous
//! functions over an in-memory store. The presentation layer owns rendering
//! and the persistence medium (local storage, files) and calls in here.
//!
//! ## How it fits together
//!
//! 1. Ranges live in a [`RangeStore`], keyed by table mode (3-max or
//!    heads-up), stack depth in big blinds, seat position, and a
//!    [`ContextKey`] describing what happened before the seat acted.
//! 2. [`context_check`] gates editing and answering: unreachable spots
//!    (e.g. the Big Blind acting after everyone folded) are refused with a
//!    human-readable reason.
//! 3. [`next_drill`] synthesizes a spot — position, depth, a plausible
//!    preceding history, a random hand — and [`correct_action`] grades the
//!    trainee's answer against the painted range.
//! 4. [`SavedState`] round-trips the whole store through the versioned JSON
//!    document used for autosave and import/export, including migration of
//!    the legacy mode-less format.
//!
//! ## Quick start
//!
//! ```rust
//! use preflop_trainer::{
//!     correct_action, next_drill, ContextKey, DecisionAction, History,
//!     PaintAction, Position, RangeStore, TableMode,
//! };
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! // Paint: heads-up SB, 10bb, unopened pot — shove A5s.
//! let mut store = RangeStore::new();
//! let unopened = History::new();
//! store.paint(
//!     TableMode::HeadsUp, 10, Position::SB, &unopened,
//!     "A5s".parse().unwrap(), PaintAction::Shove,
//! );
//!
//! // Drill: draw a spot and grade an answer against the painted range.
//! let mut rng = StdRng::seed_from_u64(42);
//! let drill = next_drill(&mut rng, TableMode::HeadsUp, &[10]);
//! let ctx = ContextKey::from_history(&drill.history, drill.position, TableMode::HeadsUp);
//! let map = store.leaf(TableMode::HeadsUp, drill.depth, drill.position, &ctx);
//! let correct = correct_action(map, drill.hand, drill.position, TableMode::HeadsUp, &drill.history);
//! println!("correct answer for {}: {}", drill.hand, correct);
//! ```

pub mod range_engine;

// Convenience re-exports so callers can use `preflop_trainer::RangeStore`
// directly without reaching into `range_engine::`.
pub use range_engine::{
    aggregate_sessions, all_combos, allowed_decision_actions, allowed_history_actions,
    allowed_paint_actions, context_check, correct_action, default_depths, export_file_name,
    has_shove_before, load_or_default, merge_range_maps, next_drill, normalize,
    parse_depth_list, random_hand, random_history, Combo, ContextCheck, ContextKey, CopyError,
    CopyScope, CopySummary, Counter, DecisionAction, Drill, History, ImportError,
    MistakeSnapshot, PaintAction, Position, Rank, RangeMap, RangeStore, SavedSession,
    SavedState, SessionStats, StoreKey, TableMode, DECISION_ACTIONS, PAINT_ACTIONS, RANKS_DESC,
    STATE_VERSION, UNOPENED_LABEL,
};

#[cfg(test)]
mod tests;
