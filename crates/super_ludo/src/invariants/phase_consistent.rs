//! Phase consistency: the pending selection matches the pending event.

use super::Invariant;
use crate::event::Event;
use crate::state::{GameState, SelectionPhase};

/// Invariant: a pending selection always has a matching pending event,
/// a non-empty eligible set owned by the right party, and no game over.
/// Outside a selection nothing is pending and no extra turn is left over.
pub struct PhaseConsistentInvariant;

impl Invariant<GameState> for PhaseConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let current = state.current_player().color();
        match (state.selection(), state.pending_event()) {
            (SelectionPhase::None, None) => !state.extra_turn_pending(),
            (SelectionPhase::None, Some(_)) => false,
            (_, _) if state.is_game_over() => false,
            (
                SelectionPhase::AwaitingPieceSelection { eligible },
                Some(Event::NormalRoll(_) | Event::Wormhole),
            ) => !eligible.is_empty() && eligible.iter().all(|id| id.owner == current),
            (
                SelectionPhase::AwaitingTargetSelection { eligible },
                Some(Event::MeteorStrike | Event::AlienInvasion),
            ) => !eligible.is_empty() && eligible.iter().all(|id| id.owner != current),
            _ => false,
        }
    }

    fn description() -> &'static str {
        "Pending selection matches the pending event and its eligible owners"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;
    use crate::{Color, PieceId};

    fn state() -> GameState {
        GameState::new(vec![
            Player::new(Color::Red, "A"),
            Player::new(Color::Green, "B"),
        ])
    }

    #[test]
    fn test_holds_when_idle() {
        assert!(PhaseConsistentInvariant::holds(&state()));
    }

    #[test]
    fn test_holds_for_matching_piece_selection() {
        let mut state = state();
        state.pending_event = Some(Event::NormalRoll(6));
        state.selection = SelectionPhase::AwaitingPieceSelection {
            eligible: vec![PieceId::new(Color::Red, 1)],
        };
        assert!(PhaseConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_target_selection_of_own_piece_detected() {
        let mut state = state();
        state.pending_event = Some(Event::MeteorStrike);
        state.selection = SelectionPhase::AwaitingTargetSelection {
            eligible: vec![PieceId::new(Color::Red, 1)],
        };
        assert!(!PhaseConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_mismatched_event_detected() {
        let mut state = state();
        state.pending_event = Some(Event::BlackHole);
        state.selection = SelectionPhase::AwaitingPieceSelection {
            eligible: vec![PieceId::new(Color::Red, 1)],
        };
        assert!(!PhaseConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_leftover_event_detected() {
        let mut state = state();
        state.pending_event = Some(Event::Wormhole);
        assert!(!PhaseConsistentInvariant::holds(&state));
    }
}
