//! End-to-end walkthrough of the range-trainer core.
//!
//! Run with: `cargo run --example demo`
//!
//! This example shows how `preflop_trainer` works end to end:
//!
//! 1. **Paint** — build heads-up SB shove/raise ranges at two depths, plus
//!    a BB defense range, exactly the way the editor would.
//! 2. **Copy** — propagate the 25bb SB range down to 20bb with a
//!    fill-the-gaps merge.
//! 3. **Drill** — draw seeded drills, grade an always-call trainee against
//!    the painted ranges, and record session stats.
//! 4. **Persist** — export the store to the versioned JSON document and
//!    import it back, then load a legacy v1 file.

use rand::rngs::StdRng;
use rand::SeedableRng;

use preflop_trainer::{
    allowed_decision_actions, context_check, correct_action, next_drill, ContextKey, CopyScope,
    DecisionAction, History, PaintAction, Position, RangeStore, SavedState, SessionStats,
    TableMode,
};

fn main() {
    let mode = TableMode::HeadsUp;
    let depths = vec![25, 20, 10];
    let mut store = RangeStore::new();

    // ── Paint ────────────────────────────────────────────────────────────
    let unopened = History::new();
    let vs_raise = History::new().with(Position::SB, DecisionAction::Raise);

    for (combo, action) in [
        ("AA", PaintAction::Raise),
        ("A5s", PaintAction::Shove),
        ("K9o", PaintAction::Call),
    ] {
        store.paint(mode, 25, Position::SB, &unopened, combo.parse().unwrap(), action);
    }
    store.paint(mode, 25, Position::BB, &vs_raise, "AA".parse().unwrap(), PaintAction::RaiseCall);

    // Trying to paint an unreachable spot is refused with a reason.
    let check = context_check(Position::BB, mode, &History::new());
    println!("BB with no SB action: valid={} ({})", check.valid, check.reason.unwrap_or("-"));

    // ── Copy 25bb → 20bb ─────────────────────────────────────────────────
    let sb_ctx = ContextKey::from_history(&unopened, Position::SB, mode);
    match store.copy_between_depths(mode, 25, 20, Position::SB, &CopyScope::CurrentContext(sb_ctx.clone()), false) {
        Ok(summary) => println!("copied {} context(s) from 25bb to 20bb", summary.contexts_copied),
        Err(err) => println!("copy refused: {err}"),
    }
    // Same-depth copies are a benign notice, not a crash.
    if let Err(err) = store.copy_between_depths(mode, 20, 20, Position::SB, &CopyScope::AllContexts, false) {
        println!("copy refused: {err}");
    }

    // ── Drill ────────────────────────────────────────────────────────────
    let mut rng = StdRng::seed_from_u64(42);
    let mut session = SessionStats::new(0);
    println!("\n── ten seeded drills ──");
    for _ in 0..10 {
        let drill = next_drill(&mut rng, mode, &depths);
        let ctx = ContextKey::from_history(&drill.history, drill.position, mode);
        let map = store.leaf(mode, drill.depth, drill.position, &ctx);
        let correct = correct_action(map, drill.hand, drill.position, mode, &drill.history);
        let offered = allowed_decision_actions(drill.position, mode, &drill.history);

        // This trainee always answers CALL.
        let answer = DecisionAction::Call;
        let ok = answer == correct;
        session.record_attempt(drill.position, drill.depth, &ctx, ok);

        println!(
            "  {} {:>3}bb {:<8} ctx={:<12} offered={}  correct={} {}",
            drill.position.label(mode),
            drill.depth,
            drill.hand.to_string(),
            if ctx.is_unopened() { "unopened".to_string() } else { ctx.encode() },
            offered.len(),
            correct,
            if ok { "✓" } else { "✗" },
        );
    }
    session.close(60_000);
    println!(
        "session: {}/{} correct ({}%)",
        session.overall.correct,
        session.overall.total,
        session.overall.pct()
    );

    // ── Persist ──────────────────────────────────────────────────────────
    let state = SavedState { ranges_by_mode: store, depths, ..SavedState::empty() };
    let json = state.to_json().expect("serialize state");
    println!("\nexport document: {} bytes", json.len());

    let imported = SavedState::from_json(&json).expect("re-import own export");
    assert_eq!(imported, state);
    println!("re-import: deep-equal ✓");

    // Legacy v1 files (no mode dimension) land under 3-max.
    let legacy = r#"{"ranges": {"15bb": {"BTN": {"": {"T9s": "RAISE"}}}}, "depths": [15]}"#;
    let migrated = SavedState::from_json(legacy).expect("legacy import");
    let leaf = migrated
        .ranges_by_mode
        .leaf(TableMode::ThreeMax, 15, Position::BTN, &ContextKey::unopened())
        .expect("migrated leaf");
    println!("legacy import: T9s = {} under 3-max ✓", leaf.get("T9s".parse().unwrap()));
}
