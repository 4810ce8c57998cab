//! Context keys and the reachability rules that gate them.
//!
//! A context identifies "what happened before this seat acted". It is the
//! join attribute between a hand history and the stored ranges, so there is
//! exactly one way to derive it: [`ContextKey::from_history`]. The string
//! encoding (`"BTN:RAISE,SB:CALL"`, empty = unopened pot) matches the keys
//! found in persisted range files, and parsing accepts exactly that form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::range_engine::models::{
    ContextCheck, DecisionAction, History, Position, TableMode,
};

// ---------------------------------------------------------------------------
// ContextKey
// ---------------------------------------------------------------------------

/// Canonical encoding of the actions preceding an actor: an ordered list of
/// `(seat, action)` pairs in canonical seat order, with folds and seats
/// at-or-after the actor excluded. The empty key denotes an unopened pot.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContextKey {
    pairs: Vec<(Position, DecisionAction)>,
}

impl ContextKey {
    /// The unopened-pot key.
    pub fn unopened() -> ContextKey {
        ContextKey::default()
    }

    /// Derive the key for `actor` under `mode`. This is the sole
    /// History-to-key derivation in the crate.
    ///
    /// Folds are implicit (omitted), and entries for seats at or after the
    /// actor are ignored, so two histories differing only in those map to
    /// the same key.
    pub fn from_history(history: &History, actor: Position, mode: TableMode) -> ContextKey {
        let order = mode.seat_order();
        let acting_idx = order.iter().position(|&p| p == actor).unwrap_or(0);
        let pairs = order[..acting_idx]
            .iter()
            .filter_map(|&seat| match history.get(seat) {
                Some(DecisionAction::Fold) | None => None,
                Some(action) => Some((seat, action)),
            })
            .collect();
        ContextKey { pairs }
    }

    /// The legacy comma-joined string form, e.g. `"BTN:RAISE,SB:CALL"`.
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(seat, action)| format!("{seat}:{action}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn is_unopened(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(Position, DecisionAction)] {
        &self.pairs
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl FromStr for ContextKey {
    type Err = ParseContextKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(ContextKey::unopened());
        }
        let mut pairs = Vec::new();
        for part in s.split(',') {
            let (seat, action) = part
                .split_once(':')
                .ok_or_else(|| ParseContextKeyError(part.to_string()))?;
            let seat: Position =
                seat.parse().map_err(|_| ParseContextKeyError(part.to_string()))?;
            let action: DecisionAction =
                action.parse().map_err(|_| ParseContextKeyError(part.to_string()))?;
            pairs.push((seat, action));
        }
        Ok(ContextKey { pairs })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid context key segment {0:?}")]
pub struct ParseContextKeyError(String);

impl Serialize for ContextKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContextKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;
        impl serde::de::Visitor<'_> for KeyVisitor {
            type Value = ContextKey;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a context key like \"BTN:RAISE,SB:CALL\" (empty = unopened)")
            }
            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<ContextKey, E> {
                v.parse().map_err(E::custom)
            }
        }
        deserializer.deserialize_str(KeyVisitor)
    }
}

// ---------------------------------------------------------------------------
// Context validator
// ---------------------------------------------------------------------------

/// Is the implied game state reachable for `actor` under `mode`?
///
/// Heads-up: the SB (Button role) acts first and is always valid; the BB
/// needs a non-fold SB action (a fold ends the hand). 3-max: the BTN acts
/// first; the SB needs a recorded BTN action (a fold counts — the SB must
/// know what the BTN did); the BB needs both prior actions recorded and at
/// least one of them not a fold.
pub fn context_check(actor: Position, mode: TableMode, history: &History) -> ContextCheck {
    match mode {
        TableMode::HeadsUp => match actor {
            Position::SB | Position::BTN => ContextCheck::ok(),
            Position::BB => match history.get(Position::SB) {
                None => ContextCheck::rejected(
                    "Heads-up: the Big Blind acts after the Small Blind — set the SB's action (limp = CALL, raise or shove).",
                ),
                Some(DecisionAction::Fold) => ContextCheck::rejected(
                    "The Small Blind folded — the hand is over.",
                ),
                Some(_) => ContextCheck::ok(),
            },
        },
        TableMode::ThreeMax => match actor {
            Position::BTN => ContextCheck::ok(),
            Position::SB => {
                if history.get(Position::BTN).is_none() {
                    ContextCheck::rejected(
                        "3-max: the Small Blind acts after the Button — set the BTN's action first.",
                    )
                } else {
                    ContextCheck::ok()
                }
            }
            Position::BB => {
                let btn = history.get(Position::BTN);
                let sb = history.get(Position::SB);
                if btn.is_none() {
                    return ContextCheck::rejected(
                        "3-max: the Big Blind acts after the Button — set the BTN's action first.",
                    );
                }
                if sb.is_none() {
                    return ContextCheck::rejected(
                        "3-max: the Big Blind acts after the Small Blind — set the SB's action first.",
                    );
                }
                if btn == Some(DecisionAction::Fold) && sb == Some(DecisionAction::Fold) {
                    return ContextCheck::rejected(
                        "The Button and the Small Blind both folded — the hand is over.",
                    );
                }
                ContextCheck::ok()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DecisionAction::*;
    use Position::*;
    use TableMode::*;

    #[test]
    fn context_key_is_deterministic_and_ordered() {
        let history = History::new().with(BTN, Raise).with(SB, Call);
        let key = ContextKey::from_history(&history, BB, ThreeMax);
        assert_eq!(key.encode(), "BTN:RAISE,SB:CALL");
    }

    #[test]
    fn explicit_folds_do_not_change_the_key() {
        let without_fold = History::new().with(SB, Call);
        let with_fold = History::new().with(BTN, Fold).with(SB, Call);
        let a = ContextKey::from_history(&without_fold, BB, ThreeMax);
        let b = ContextKey::from_history(&with_fold, BB, ThreeMax);
        assert_eq!(a, b);
        assert_eq!(a.encode(), "SB:CALL");
    }

    #[test]
    fn seats_at_or_after_the_actor_are_ignored() {
        let history = History::new().with(BTN, Raise).with(SB, Shove).with(BB, Call);
        let key = ContextKey::from_history(&history, SB, ThreeMax);
        assert_eq!(key.encode(), "BTN:RAISE");
    }

    #[test]
    fn unopened_pot_encodes_to_the_empty_string() {
        let key = ContextKey::from_history(&History::new(), BTN, ThreeMax);
        assert!(key.is_unopened());
        assert_eq!(key.encode(), "");
    }

    #[test]
    fn context_key_parses_its_own_encoding() {
        let history = History::new().with(BTN, Shove).with(SB, Call);
        let key = ContextKey::from_history(&history, BB, ThreeMax);
        let parsed: ContextKey = key.encode().parse().unwrap();
        assert_eq!(parsed, key);

        let unopened: ContextKey = "".parse().unwrap();
        assert!(unopened.is_unopened());

        assert!("BTN-RAISE".parse::<ContextKey>().is_err());
        assert!("UTG:RAISE".parse::<ContextKey>().is_err());
    }

    #[test]
    fn heads_up_validation() {
        assert!(context_check(SB, HeadsUp, &History::new()).valid);
        let missing = context_check(BB, HeadsUp, &History::new());
        assert!(!missing.valid);
        assert!(missing.reason.unwrap().contains("Small Blind"));

        let folded = context_check(BB, HeadsUp, &History::new().with(SB, Fold));
        assert!(!folded.valid);
        assert!(folded.reason.unwrap().contains("hand is over"));
        assert_ne!(missing.reason, folded.reason, "each invalid case has its own reason");

        assert!(context_check(BB, HeadsUp, &History::new().with(SB, Call)).valid);
    }

    #[test]
    fn three_max_validation() {
        assert!(context_check(BTN, ThreeMax, &History::new()).valid);

        // SB needs some BTN action, a fold included.
        assert!(!context_check(SB, ThreeMax, &History::new()).valid);
        assert!(context_check(SB, ThreeMax, &History::new().with(BTN, Fold)).valid);

        // BB needs both prior actions.
        assert!(!context_check(BB, ThreeMax, &History::new()).valid);
        assert!(!context_check(BB, ThreeMax, &History::new().with(BTN, Raise)).valid);

        // Both prior folds end the hand.
        let over = context_check(BB, ThreeMax, &History::new().with(BTN, Fold).with(SB, Fold));
        assert!(!over.valid);
        assert!(over.reason.unwrap().contains("hand is over"));

        assert!(context_check(BB, ThreeMax, &History::new().with(BTN, Raise).with(SB, Call)).valid);
        assert!(context_check(BB, ThreeMax, &History::new().with(BTN, Fold).with(SB, Raise)).valid);
    }
}
