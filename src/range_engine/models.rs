use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Card-rank primitives
// ---------------------------------------------------------------------------

/// Rank 2..=14 where 14 = Ace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rank(pub u8);

/// The 13 ranks in display order, highest first.
pub const RANKS_DESC: [Rank; 13] = [
    Rank(14), Rank(13), Rank(12), Rank(11), Rank(10), Rank(9), Rank(8),
    Rank(7), Rank(6), Rank(5), Rank(4), Rank(3), Rank(2),
];

impl Rank {
    pub fn symbol(self) -> &'static str {
        match self.0 {
            2 => "2", 3 => "3", 4 => "4", 5 => "5", 6 => "6",
            7 => "7", 8 => "8", 9 => "9", 10 => "T",
            11 => "J", 12 => "Q", 13 => "K", 14 => "A",
            _ => "?",
        }
    }

    pub fn from_symbol(c: char) -> Option<Rank> {
        let v = match c {
            '2'..='9' => c as u8 - b'0',
            'T' => 10,
            'J' => 11,
            'Q' => 12,
            'K' => 13,
            'A' => 14,
            _ => return None,
        };
        Some(Rank(v))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ---------------------------------------------------------------------------
// Combo — canonical starting-hand category
// ---------------------------------------------------------------------------

/// One of the 169 canonical two-card starting hands: a pair ("AA"), suited
/// ("AKs") or offsuit ("AKo") combo. Construction always puts the higher
/// rank first, so `Combo::new` is order-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Combo {
    hi: Rank,
    lo: Rank,
    suited: bool,
}

impl Combo {
    /// Canonicalize two ranks + suitedness. Pairs ignore the suited flag
    /// (a pair can never be suited).
    pub fn new(r1: Rank, r2: Rank, suited: bool) -> Combo {
        let (hi, lo) = if r1 >= r2 { (r1, r2) } else { (r2, r1) };
        Combo { hi, lo, suited: suited && hi != lo }
    }

    pub fn hi(self) -> Rank {
        self.hi
    }

    pub fn lo(self) -> Rank {
        self.lo
    }

    pub fn is_pair(self) -> bool {
        self.hi == self.lo
    }

    pub fn is_suited(self) -> bool {
        self.suited
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pair() {
            write!(f, "{}{}", self.hi, self.lo)
        } else {
            write!(f, "{}{}{}", self.hi, self.lo, if self.suited { "s" } else { "o" })
        }
    }
}

/// Parse the canonical string form: "AA", "AKs", "AKo".
impl FromStr for Combo {
    type Err = ParseComboError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParseComboError(s.to_string());
        let mut chars = s.chars();
        let c1 = chars.next().ok_or_else(bad)?;
        let c2 = chars.next().ok_or_else(bad)?;
        let r1 = Rank::from_symbol(c1).ok_or_else(bad)?;
        let r2 = Rank::from_symbol(c2).ok_or_else(bad)?;
        let suited = match (chars.next(), chars.next()) {
            (None, _) if r1 == r2 => false,
            (Some('s'), None) if r1 != r2 => true,
            (Some('o'), None) if r1 != r2 => false,
            _ => return Err(bad()),
        };
        // Reject non-canonical order ("KAs") so every combo has one spelling.
        if r1 < r2 {
            return Err(bad());
        }
        Ok(Combo::new(r1, r2, suited))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid combo key {0:?}")]
pub struct ParseComboError(String);

impl Serialize for Combo {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Combo {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ComboVisitor;
        impl serde::de::Visitor<'_> for ComboVisitor {
            type Value = Combo;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a combo key like \"AA\", \"AKs\" or \"AKo\"")
            }
            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Combo, E> {
                v.parse().map_err(E::custom)
            }
        }
        deserializer.deserialize_str(ComboVisitor)
    }
}

// ---------------------------------------------------------------------------
// Table configuration
// ---------------------------------------------------------------------------

/// Table configuration: 3-max (BTN, SB, BB) or heads-up (SB, BB — the SB
/// plays the Button role and acts first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TableMode {
    #[serde(rename = "3MAX")]
    ThreeMax,
    #[serde(rename = "HU")]
    HeadsUp,
}

impl TableMode {
    /// Canonical preflop acting order for this mode.
    pub fn seat_order(self) -> &'static [Position] {
        match self {
            TableMode::ThreeMax => &[Position::BTN, Position::SB, Position::BB],
            TableMode::HeadsUp => &[Position::SB, Position::BB],
        }
    }

    pub fn contains(self, p: Position) -> bool {
        self.seat_order().contains(&p)
    }

    /// First seat to act — the default selection when switching modes.
    pub fn default_position(self) -> Position {
        self.seat_order()[0]
    }
}

impl fmt::Display for TableMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableMode::ThreeMax => write!(f, "3-max"),
            TableMode::HeadsUp => write!(f, "Heads-Up"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    BTN,
    SB,
    BB,
}

impl Position {
    pub fn as_str(self) -> &'static str {
        match self {
            Position::BTN => "BTN",
            Position::SB => "SB",
            Position::BB => "BB",
        }
    }

    /// UI label: in heads-up the Small Blind doubles as the Button.
    pub fn label(self, mode: TableMode) -> &'static str {
        if mode == TableMode::HeadsUp && self == Position::SB {
            "SB (BTN)"
        } else {
            self.as_str()
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Position {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BTN" => Ok(Position::BTN),
            "SB" => Ok(Position::SB),
            "BB" => Ok(Position::BB),
            _ => Err(ParseActionError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Editor-level action used when painting a range cell. `RaiseCall` is a
/// presentation nuance (raise, then call a re-raise) that scores as a raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaintAction {
    Fold,
    Call,
    Raise,
    Shove,
    RaiseCall,
    TierStack,
}

/// Action a trainee can answer with — the paint set minus `RaiseCall`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DecisionAction {
    Fold,
    Call,
    Raise,
    Shove,
    TierStack,
}

/// Full editor action set, in display order.
pub const PAINT_ACTIONS: [PaintAction; 6] = [
    PaintAction::Fold,
    PaintAction::Call,
    PaintAction::Raise,
    PaintAction::Shove,
    PaintAction::RaiseCall,
    PaintAction::TierStack,
];

/// Full trainee action set, in display order.
pub const DECISION_ACTIONS: [DecisionAction; 5] = [
    DecisionAction::Fold,
    DecisionAction::Call,
    DecisionAction::Raise,
    DecisionAction::Shove,
    DecisionAction::TierStack,
];

impl PaintAction {
    pub fn as_str(self) -> &'static str {
        match self {
            PaintAction::Fold => "FOLD",
            PaintAction::Call => "CALL",
            PaintAction::Raise => "RAISE",
            PaintAction::Shove => "SHOVE",
            PaintAction::RaiseCall => "RAISECALL",
            PaintAction::TierStack => "TIERSTACK",
        }
    }
}

impl DecisionAction {
    pub fn as_str(self) -> &'static str {
        match self {
            DecisionAction::Fold => "FOLD",
            DecisionAction::Call => "CALL",
            DecisionAction::Raise => "RAISE",
            DecisionAction::Shove => "SHOVE",
            DecisionAction::TierStack => "TIERSTACK",
        }
    }
}

impl fmt::Display for PaintAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for DecisionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DecisionAction {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FOLD" => Ok(DecisionAction::Fold),
            "CALL" => Ok(DecisionAction::Call),
            "RAISE" => Ok(DecisionAction::Raise),
            "SHOVE" => Ok(DecisionAction::Shove),
            "TIERSTACK" => Ok(DecisionAction::TierStack),
            _ => Err(ParseActionError(s.to_string())),
        }
    }
}

impl From<DecisionAction> for PaintAction {
    fn from(a: DecisionAction) -> PaintAction {
        match a {
            DecisionAction::Fold => PaintAction::Fold,
            DecisionAction::Call => PaintAction::Call,
            DecisionAction::Raise => PaintAction::Raise,
            DecisionAction::Shove => PaintAction::Shove,
            DecisionAction::TierStack => PaintAction::TierStack,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action or position {0:?}")]
pub struct ParseActionError(String);

// ---------------------------------------------------------------------------
// History — what happened before the current actor
// ---------------------------------------------------------------------------

/// Recorded actions of seats in the current hand. A missing entry means the
/// seat has not acted (or its entry was cleared). Consumers ignore entries
/// for seats at or after the acting position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: BTreeMap<Position, DecisionAction>,
}

impl History {
    pub fn new() -> History {
        History::default()
    }

    /// Builder-style setter, convenient in tests and demos.
    pub fn with(mut self, seat: Position, action: DecisionAction) -> History {
        self.set(seat, action);
        self
    }

    pub fn set(&mut self, seat: Position, action: DecisionAction) {
        self.entries.insert(seat, action);
    }

    pub fn clear(&mut self, seat: Position) {
        self.entries.remove(&seat);
    }

    /// Toggle semantics used by the editor's history picker: selecting the
    /// already-set action clears the entry.
    pub fn toggle(&mut self, seat: Position, action: DecisionAction) {
        if self.get(seat) == Some(action) {
            self.clear(seat);
        } else {
            self.set(seat, action);
        }
    }

    pub fn get(&self, seat: Position) -> Option<DecisionAction> {
        self.entries.get(&seat).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Context validation result
// ---------------------------------------------------------------------------

/// Outcome of the context validator — a first-class value, not an error.
/// When invalid, `reason` explains which prior action is missing or which
/// terminal condition was hit, ready to surface to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextCheck {
    pub valid: bool,
    pub reason: Option<&'static str>,
}

impl ContextCheck {
    pub fn ok() -> ContextCheck {
        ContextCheck { valid: true, reason: None }
    }

    pub fn rejected(reason: &'static str) -> ContextCheck {
        ContextCheck { valid: false, reason: Some(reason) }
    }
}
