//! Session scoring: per-attempt counters and saved-session aggregation.
//!
//! The core stays clock-free — timestamps (milliseconds since epoch) are
//! supplied by the caller, which also owns persistence of the saved-session
//! list. Wire field names are camelCase to match the session records the
//! presentation layer already stores.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::range_engine::combos::RangeMap;
use crate::range_engine::context::ContextKey;
use crate::range_engine::models::{Combo, DecisionAction, History, Position, TableMode};

/// Stats bucket label for the unopened pot (the empty context key).
pub const UNOPENED_LABEL: &str = "unopened";

// ---------------------------------------------------------------------------
// Counters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub correct: u32,
    pub total: u32,
}

impl Counter {
    pub fn record(&mut self, ok: bool) {
        if ok {
            self.correct += 1;
        }
        self.total += 1;
    }

    pub fn merge(self, other: Counter) -> Counter {
        Counter {
            correct: self.correct + other.correct,
            total: self.total + other.total,
        }
    }

    /// Accuracy as a rounded percentage; 0 for an empty counter.
    pub fn pct(self) -> u32 {
        if self.total == 0 {
            0
        } else {
            (100 * self.correct + self.total / 2) / self.total
        }
    }
}

// ---------------------------------------------------------------------------
// Session stats
// ---------------------------------------------------------------------------

/// Aggregate correct/total counters for one training session: overall, by
/// position, by stack depth, and by context key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub active: bool,
    pub start_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_at: Option<u64>,
    pub overall: Counter,
    pub by_position: BTreeMap<Position, Counter>,
    pub by_depth: BTreeMap<u32, Counter>,
    pub by_context: BTreeMap<String, Counter>,
}

impl SessionStats {
    pub fn new(start_at: u64) -> SessionStats {
        SessionStats {
            active: true,
            start_at,
            end_at: None,
            overall: Counter::default(),
            by_position: BTreeMap::new(),
            by_depth: BTreeMap::new(),
            by_context: BTreeMap::new(),
        }
    }

    /// Record one graded answer into every bucket it belongs to.
    pub fn record_attempt(
        &mut self,
        position: Position,
        depth: u32,
        context: &ContextKey,
        ok: bool,
    ) {
        let context_label = if context.is_unopened() {
            UNOPENED_LABEL.to_string()
        } else {
            context.encode()
        };
        self.overall.record(ok);
        self.by_position.entry(position).or_default().record(ok);
        self.by_depth.entry(depth).or_default().record(ok);
        self.by_context.entry(context_label).or_default().record(ok);
    }

    pub fn close(&mut self, end_at: u64) {
        self.active = false;
        self.end_at = Some(end_at);
    }

    pub fn duration_ms(&self) -> Option<u64> {
        self.end_at.map(|end| end.saturating_sub(self.start_at))
    }
}

/// A closed session as stored in the saved-sessions list. `mode` is
/// optional because records predating the mode dimension lack it.
///
/// The wire form inlines the stats fields next to `id`/`mode` (the stored
/// records have always been flat). Spelled out via `SavedSessionWire`
/// rather than `#[serde(flatten)]`, which cannot round-trip the
/// integer-keyed `byDepth` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SavedSessionWire", into = "SavedSessionWire")]
pub struct SavedSession {
    pub id: String,
    pub mode: Option<TableMode>,
    pub stats: SessionStats,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedSessionWire {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mode: Option<TableMode>,
    active: bool,
    start_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_at: Option<u64>,
    overall: Counter,
    by_position: BTreeMap<Position, Counter>,
    by_depth: BTreeMap<u32, Counter>,
    by_context: BTreeMap<String, Counter>,
}

impl From<SavedSessionWire> for SavedSession {
    fn from(w: SavedSessionWire) -> SavedSession {
        SavedSession {
            id: w.id,
            mode: w.mode,
            stats: SessionStats {
                active: w.active,
                start_at: w.start_at,
                end_at: w.end_at,
                overall: w.overall,
                by_position: w.by_position,
                by_depth: w.by_depth,
                by_context: w.by_context,
            },
        }
    }
}

impl From<SavedSession> for SavedSessionWire {
    fn from(s: SavedSession) -> SavedSessionWire {
        SavedSessionWire {
            id: s.id,
            mode: s.mode,
            active: s.stats.active,
            start_at: s.stats.start_at,
            end_at: s.stats.end_at,
            overall: s.stats.overall,
            by_position: s.stats.by_position,
            by_depth: s.stats.by_depth,
            by_context: s.stats.by_context,
        }
    }
}

/// Merge a list of saved sessions into one aggregate view (the account
/// screen's lifetime totals). Start/end span the first and last records.
pub fn aggregate_sessions(list: &[SavedSession]) -> SessionStats {
    let mut agg = SessionStats::new(list.first().map(|s| s.stats.start_at).unwrap_or(0));
    agg.active = false;
    agg.end_at = list.last().and_then(|s| s.stats.end_at);

    for session in list {
        let s = &session.stats;
        agg.overall = agg.overall.merge(s.overall);
        for (&pos, &c) in &s.by_position {
            let slot = agg.by_position.entry(pos).or_default();
            *slot = slot.merge(c);
        }
        for (&depth, &c) in &s.by_depth {
            let slot = agg.by_depth.entry(depth).or_default();
            *slot = slot.merge(c);
        }
        for (ctx, &c) in &s.by_context {
            let slot = agg.by_context.entry(ctx.clone()).or_default();
            *slot = slot.merge(c);
        }
    }
    agg
}

// ---------------------------------------------------------------------------
// Mistake snapshot
// ---------------------------------------------------------------------------

/// Everything needed to replay a missed spot: the full table state, the
/// expected answer, and the range map that defined it (absent when no range
/// was stored for the context).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MistakeSnapshot {
    pub mode: TableMode,
    pub position: Position,
    pub depth: u32,
    pub history: History,
    pub hand: Combo,
    pub correct: DecisionAction,
    pub context: ContextKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<RangeMap>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use Position::*;

    #[test]
    fn record_attempt_updates_every_bucket() {
        let mut stats = SessionStats::new(1_000);
        let ctx: ContextKey = "BTN:RAISE".parse().unwrap();
        stats.record_attempt(SB, 15, &ctx, true);
        stats.record_attempt(SB, 15, &ctx, false);
        stats.record_attempt(BB, 10, &ContextKey::unopened(), true);

        assert_eq!(stats.overall, Counter { correct: 2, total: 3 });
        assert_eq!(stats.by_position[&SB], Counter { correct: 1, total: 2 });
        assert_eq!(stats.by_depth[&10], Counter { correct: 1, total: 1 });
        assert_eq!(stats.by_context["BTN:RAISE"], Counter { correct: 1, total: 2 });
        assert_eq!(stats.by_context[UNOPENED_LABEL], Counter { correct: 1, total: 1 });
    }

    #[test]
    fn pct_rounds_and_handles_empty() {
        assert_eq!(Counter::default().pct(), 0);
        assert_eq!(Counter { correct: 2, total: 3 }.pct(), 67);
        assert_eq!(Counter { correct: 1, total: 2 }.pct(), 50);
    }

    #[test]
    fn aggregation_sums_counters_across_sessions() {
        let mut a = SessionStats::new(100);
        a.record_attempt(SB, 15, &ContextKey::unopened(), true);
        a.close(200);
        let mut b = SessionStats::new(300);
        b.record_attempt(SB, 15, &ContextKey::unopened(), false);
        b.record_attempt(BB, 15, &ContextKey::unopened(), true);
        b.close(400);

        let list = vec![
            SavedSession { id: "1".into(), mode: Some(TableMode::ThreeMax), stats: a },
            SavedSession { id: "2".into(), mode: Some(TableMode::ThreeMax), stats: b },
        ];
        let agg = aggregate_sessions(&list);
        assert!(!agg.active);
        assert_eq!(agg.start_at, 100);
        assert_eq!(agg.end_at, Some(400));
        assert_eq!(agg.overall, Counter { correct: 2, total: 3 });
        assert_eq!(agg.by_position[&SB], Counter { correct: 1, total: 2 });
        assert_eq!(agg.by_depth[&15], Counter { correct: 2, total: 3 });
    }

    #[test]
    fn saved_session_wire_uses_camel_case() {
        let mut stats = SessionStats::new(42);
        stats.record_attempt(BB, 5, &ContextKey::unopened(), true);
        stats.close(99);
        let session = SavedSession { id: "s".into(), mode: Some(TableMode::HeadsUp), stats };

        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["startAt"], 42);
        assert_eq!(value["endAt"], 99);
        assert_eq!(value["mode"], "HU");
        assert_eq!(value["byPosition"]["BB"]["total"], 1);
        assert_eq!(value["byDepth"]["5"]["correct"], 1);

        let back: SavedSession = serde_json::from_value(value).unwrap();
        assert_eq!(back, session);
    }

    #[test]
    fn legacy_session_without_mode_still_loads() {
        let json = r#"{
            "id": "1700000000000",
            "active": false,
            "startAt": 1,
            "overall": {"correct": 0, "total": 0},
            "byPosition": {},
            "byDepth": {},
            "byContext": {}
        }"#;
        let session: SavedSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.mode, None);
        assert_eq!(session.stats.end_at, None);
    }
}
