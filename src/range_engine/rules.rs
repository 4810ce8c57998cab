//! Allowed-action filters and the paint-to-decision normalizer.
//!
//! The one legality rule with teeth: once a prior seat has shoved, nobody
//! can raise over the all-in, so both the trainee's answer set and the
//! editor's palette collapse to fold/call.

use crate::range_engine::combos::RangeMap;
use crate::range_engine::models::{
    Combo, DecisionAction, History, PaintAction, Position, TableMode, DECISION_ACTIONS,
    PAINT_ACTIONS,
};

const FOLD_CALL_DECISION: [DecisionAction; 2] = [DecisionAction::Fold, DecisionAction::Call];
const FOLD_CALL_PAINT: [PaintAction; 2] = [PaintAction::Fold, PaintAction::Call];

/// True iff any seat acting before `actor` (in canonical order) shoved.
pub fn has_shove_before(actor: Position, mode: TableMode, history: &History) -> bool {
    let order = mode.seat_order();
    let acting_idx = order.iter().position(|&p| p == actor).unwrap_or(0);
    order[..acting_idx]
        .iter()
        .any(|&seat| history.get(seat) == Some(DecisionAction::Shove))
}

/// Actions a trainee may answer with in this spot.
pub fn allowed_decision_actions(
    actor: Position,
    mode: TableMode,
    history: &History,
) -> &'static [DecisionAction] {
    if has_shove_before(actor, mode, history) {
        &FOLD_CALL_DECISION
    } else {
        &DECISION_ACTIONS
    }
}

/// Actions the editor may paint with in this spot — same restriction.
pub fn allowed_paint_actions(
    actor: Position,
    mode: TableMode,
    history: &History,
) -> &'static [PaintAction] {
    if has_shove_before(actor, mode, history) {
        &FOLD_CALL_PAINT
    } else {
        &PAINT_ACTIONS
    }
}

/// Actions selectable for `seat`'s history entry while editing `actor`'s
/// context. Only one case is restricted: in 3-max with the BB acting, the
/// SB entry cannot be a raise over a BTN shove. This rule is deliberately
/// kept separate from [`allowed_decision_actions`] (see DESIGN.md).
pub fn allowed_history_actions(
    seat: Position,
    actor: Position,
    mode: TableMode,
    history: &History,
) -> &'static [DecisionAction] {
    if mode == TableMode::ThreeMax
        && actor == Position::BB
        && seat == Position::SB
        && history.get(Position::BTN) == Some(DecisionAction::Shove)
    {
        &FOLD_CALL_DECISION
    } else {
        &DECISION_ACTIONS
    }
}

/// Collapse an editor action to the trainee vocabulary: RAISECALL scores as
/// a raise, everything else maps to itself.
pub fn normalize(action: PaintAction) -> DecisionAction {
    match action {
        PaintAction::Fold => DecisionAction::Fold,
        PaintAction::Call => DecisionAction::Call,
        PaintAction::Raise | PaintAction::RaiseCall => DecisionAction::Raise,
        PaintAction::Shove => DecisionAction::Shove,
        PaintAction::TierStack => DecisionAction::TierStack,
    }
}

/// The action the trainee should have answered for `combo`.
///
/// Looks up the painted action (FOLD when no map exists for the context),
/// normalizes it, then reconciles with current legality: a painted raise,
/// shove or tier-stack raise behind a prior shove becomes CALL.
pub fn correct_action(
    map: Option<&RangeMap>,
    combo: Combo,
    actor: Position,
    mode: TableMode,
    history: &History,
) -> DecisionAction {
    let painted = map.map(|m| m.get(combo)).unwrap_or(PaintAction::Fold);
    let mut answer = normalize(painted);
    if has_shove_before(actor, mode, history) {
        if matches!(
            answer,
            DecisionAction::Raise | DecisionAction::Shove | DecisionAction::TierStack
        ) {
            answer = DecisionAction::Call;
        }
    }
    answer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range_engine::models::Rank;
    use DecisionAction as D;
    use PaintAction as P;
    use Position::*;
    use TableMode::*;

    #[test]
    fn post_shove_restriction_applies_in_both_modes() {
        let hu = History::new().with(SB, D::Shove);
        assert_eq!(allowed_decision_actions(BB, HeadsUp, &hu), &[D::Fold, D::Call]);
        assert_eq!(allowed_paint_actions(BB, HeadsUp, &hu), &[P::Fold, P::Call]);

        let three = History::new().with(BTN, D::Shove).with(SB, D::Call);
        assert_eq!(allowed_decision_actions(BB, ThreeMax, &three), &[D::Fold, D::Call]);

        let sb_spot = History::new().with(BTN, D::Shove);
        assert_eq!(allowed_decision_actions(SB, ThreeMax, &sb_spot), &[D::Fold, D::Call]);
    }

    #[test]
    fn full_action_sets_without_a_prior_shove() {
        let open = History::new().with(BTN, D::Raise);
        assert_eq!(allowed_decision_actions(SB, ThreeMax, &open).len(), 5);
        assert_eq!(allowed_paint_actions(SB, ThreeMax, &open).len(), 6);
        // A shove at or after the actor does not restrict the actor.
        let later = History::new().with(BB, D::Shove);
        assert_eq!(allowed_decision_actions(SB, HeadsUp, &later).len(), 5);
    }

    #[test]
    fn sb_history_entry_is_restricted_after_a_btn_shove() {
        let h = History::new().with(BTN, D::Shove);
        assert_eq!(allowed_history_actions(SB, BB, ThreeMax, &h), &[D::Fold, D::Call]);
        // Unrestricted when BTN merely raised, or for the BTN's own entry.
        let raised = History::new().with(BTN, D::Raise);
        assert_eq!(allowed_history_actions(SB, BB, ThreeMax, &raised).len(), 5);
        assert_eq!(allowed_history_actions(BTN, BB, ThreeMax, &h).len(), 5);
    }

    #[test]
    fn normalize_collapses_only_raisecall() {
        assert_eq!(normalize(P::RaiseCall), D::Raise);
        assert_eq!(normalize(P::Fold), D::Fold);
        assert_eq!(normalize(P::Call), D::Call);
        assert_eq!(normalize(P::Raise), D::Raise);
        assert_eq!(normalize(P::Shove), D::Shove);
        assert_eq!(normalize(P::TierStack), D::TierStack);
    }

    #[test]
    fn correct_action_reconciles_stale_paints_with_a_prior_shove() {
        let aa = Combo::new(Rank(14), Rank(14), false);
        let mut map = RangeMap::new();
        map.set(aa, P::Raise);

        let open = History::new().with(SB, D::Raise);
        assert_eq!(correct_action(Some(&map), aa, BB, HeadsUp, &open), D::Raise);

        // Same painted range, but the SB shoved: the raise collapses to CALL.
        let shoved = History::new().with(SB, D::Shove);
        assert_eq!(correct_action(Some(&map), aa, BB, HeadsUp, &shoved), D::Call);

        // A painted fold stays a fold even behind a shove.
        let k2 = Combo::new(Rank(13), Rank(2), false);
        assert_eq!(correct_action(Some(&map), k2, BB, HeadsUp, &shoved), D::Fold);

        // No stored map for the context: everything defaults to FOLD.
        assert_eq!(correct_action(None, aa, BB, HeadsUp, &open), D::Fold);
    }
}
