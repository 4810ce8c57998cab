//! Probabilistic drill synthesis: plausible preceding histories, random
//! hands, and the combined next-drill draw.
//!
//! The history generator is a small decision tree of categorical
//! distributions keyed by (mode, acting position, preceding outcome). The
//! tables are explicit consts so their support can be checked exhaustively:
//! every draw must produce a history the context validator accepts.

use rand::Rng;

use crate::range_engine::models::{
    Combo, DecisionAction, History, Position, TableMode, RANKS_DESC,
};

// ---------------------------------------------------------------------------
// Categorical tables
// ---------------------------------------------------------------------------

type WeightedActions = &'static [(DecisionAction, f64)];

/// Heads-up, BB acting: what the SB did. No fold — a SB fold ends the hand.
const HU_SB_ACTION: WeightedActions = &[
    (DecisionAction::Call, 0.45),
    (DecisionAction::Raise, 0.50),
    (DecisionAction::Shove, 0.05),
];

/// 3-max, SB acting: what the BTN did.
const BTN_BEFORE_SB: WeightedActions = &[
    (DecisionAction::Fold, 0.35),
    (DecisionAction::Raise, 0.55),
    (DecisionAction::Shove, 0.10),
];

/// 3-max, BB acting: what the BTN did.
const BTN_BEFORE_BB: WeightedActions = &[
    (DecisionAction::Fold, 0.25),
    (DecisionAction::Raise, 0.60),
    (DecisionAction::Shove, 0.15),
];

/// 3-max, BB acting, BTN folded: the SB completes, raises or shoves.
/// No fold — BTN fold + SB fold would end the hand before the BB acts.
const SB_AFTER_BTN_FOLD: WeightedActions = &[
    (DecisionAction::Call, 0.25),
    (DecisionAction::Raise, 0.55),
    (DecisionAction::Shove, 0.20),
];

/// 3-max, BB acting, BTN raised: the SB's full response set.
const SB_AFTER_BTN_RAISE: WeightedActions = &[
    (DecisionAction::Fold, 0.50),
    (DecisionAction::Call, 0.30),
    (DecisionAction::Raise, 0.15),
    (DecisionAction::Shove, 0.05),
];

/// 3-max, BB acting, BTN shoved: the SB can only fold or call (nobody
/// raises over an all-in). Weights are the fold/call shares of the
/// facing-a-raise table, renormalized.
const SB_AFTER_BTN_SHOVE: WeightedActions = &[
    (DecisionAction::Fold, 0.625),
    (DecisionAction::Call, 0.375),
];

/// Cumulative draw from a weighted table.
fn pick<R: Rng>(rng: &mut R, table: WeightedActions) -> DecisionAction {
    let total: f64 = table.iter().map(|(_, w)| w).sum();
    let mut r = rng.gen_range(0.0..total);
    for &(action, weight) in table {
        r -= weight;
        if r <= 0.0 {
            return action;
        }
    }
    table[0].0
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Synthesize a preceding-action history for `actor` under `mode`. The
/// result always passes the context validator for that (mode, actor).
pub fn random_history<R: Rng>(rng: &mut R, actor: Position, mode: TableMode) -> History {
    let mut history = History::new();
    match mode {
        TableMode::HeadsUp => {
            if actor == Position::BB {
                history.set(Position::SB, pick(rng, HU_SB_ACTION));
            }
        }
        TableMode::ThreeMax => match actor {
            Position::BTN => {}
            Position::SB => {
                history.set(Position::BTN, pick(rng, BTN_BEFORE_SB));
            }
            Position::BB => {
                let btn = pick(rng, BTN_BEFORE_BB);
                history.set(Position::BTN, btn);
                let sb_table = match btn {
                    DecisionAction::Fold => SB_AFTER_BTN_FOLD,
                    DecisionAction::Shove => SB_AFTER_BTN_SHOVE,
                    _ => SB_AFTER_BTN_RAISE,
                };
                history.set(Position::SB, pick(rng, sb_table));
            }
        },
    }
    history
}

/// Uniform draw over the 13x13 grid: both-ranks-equal is a pair, otherwise
/// a fair coin picks suited or offsuit.
pub fn random_hand<R: Rng>(rng: &mut R) -> Combo {
    let r1 = RANKS_DESC[rng.gen_range(0..RANKS_DESC.len())];
    let r2 = RANKS_DESC[rng.gen_range(0..RANKS_DESC.len())];
    let suited = r1 != r2 && rng.gen_bool(0.5);
    Combo::new(r1, r2, suited)
}

/// One synthesized training spot.
#[derive(Debug, Clone, PartialEq)]
pub struct Drill {
    pub position: Position,
    pub depth: u32,
    pub history: History,
    pub hand: Combo,
}

/// Draw the next drill: random position from the mode's seat pool, random
/// depth from the configured list, auto history, random hand.
///
/// Panics if `depths` is empty — the depth list is validated at the
/// configuration boundary (`parse_depth_list`).
pub fn next_drill<R: Rng>(rng: &mut R, mode: TableMode, depths: &[u32]) -> Drill {
    assert!(!depths.is_empty(), "depth list must not be empty");
    let pool = mode.seat_order();
    let position = pool[rng.gen_range(0..pool.len())];
    let depth = depths[rng.gen_range(0..depths.len())];
    let history = random_history(rng, position, mode);
    let hand = random_hand(rng);
    Drill { position, depth, history, hand }
}

/// Parse the options screen's comma-separated depth list ("25,24,23").
/// Non-numeric entries are skipped; `None` when nothing valid remains.
pub fn parse_depth_list(input: &str) -> Option<Vec<u32>> {
    let depths: Vec<u32> = input
        .split(',')
        .filter_map(|part| part.trim().parse().ok())
        .filter(|&d| d > 0)
        .collect();
    if depths.is_empty() {
        None
    } else {
        Some(depths)
    }
}
