//! Core range/context engine — keys, validation, storage, scoring, drills.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Shared types: ranks, combos, modes, positions, actions, history |
//! | `combos`    | The fixed 169-hand universe and the default-FOLD range map |
//! | `context`   | Context key derivation + the reachability validator |
//! | `rules`     | Allowed-action filters and the paint-to-decision normalizer |
//! | `store`     | Flat-keyed sparse range store: ensure, paint, merge, depth copy |
//! | `persist`   | Versioned JSON state, legacy v1 migration, import/export |
//! | `session`   | Attempt counters, saved-session aggregation, mistake snapshots |
//! | `generator` | Weighted random histories, hands, and full drills |

pub mod combos;
pub mod context;
pub mod generator;
pub mod models;
pub mod persist;
pub mod rules;
pub mod session;
pub mod store;

// Re-export the public API surface so callers can reach everything without
// diving into sub-modules.
pub use combos::{all_combos, RangeMap};
pub use context::{context_check, ContextKey};
pub use generator::{next_drill, parse_depth_list, random_hand, random_history, Drill};
pub use models::{
    Combo, ContextCheck, DecisionAction, History, PaintAction, Position, Rank, TableMode,
    DECISION_ACTIONS, PAINT_ACTIONS, RANKS_DESC,
};
pub use persist::{
    default_depths, export_file_name, load_or_default, ImportError, SavedState, STATE_VERSION,
};
pub use rules::{
    allowed_decision_actions, allowed_history_actions, allowed_paint_actions, correct_action,
    has_shove_before, normalize,
};
pub use session::{
    aggregate_sessions, Counter, MistakeSnapshot, SavedSession, SessionStats, UNOPENED_LABEL,
};
pub use store::{merge_range_maps, CopyError, CopyScope, CopySummary, RangeStore, StoreKey};
