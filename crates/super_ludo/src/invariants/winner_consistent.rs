//! Winner consistency: game over and winner are set together, and only
//! for a player whose pieces are all home.

use super::Invariant;
use crate::state::GameState;

/// Invariant: `game_over` iff a winner is recorded; the winner has all
/// three pieces home; while the game runs nobody has all pieces home.
pub struct WinnerConsistentInvariant;

impl Invariant<GameState> for WinnerConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        match (state.is_game_over(), state.winner()) {
            (true, Some(color)) => state.player(color).is_some_and(|p| p.has_won()),
            (false, None) => !state.players().iter().any(|p| p.has_won()),
            _ => false,
        }
    }

    fn description() -> &'static str {
        "Game over and winner are set together, for a player with all pieces home"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;
    use crate::board::LinearPosition;
    use crate::player::Player;

    fn state() -> GameState {
        GameState::new(vec![
            Player::new(Color::Red, "A"),
            Player::new(Color::Green, "B"),
        ])
    }

    fn send_all_home(state: &mut GameState, color: Color) {
        let index = state.player_index(color).unwrap();
        for piece in state.players[index].pieces_mut() {
            piece.set_position(LinearPosition::HOME);
        }
    }

    #[test]
    fn test_holds_while_running() {
        assert!(WinnerConsistentInvariant::holds(&state()));
    }

    #[test]
    fn test_holds_for_recorded_winner() {
        let mut state = state();
        send_all_home(&mut state, Color::Green);
        state.game_over = true;
        state.winner = Some(Color::Green);
        assert!(WinnerConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_unrecorded_win_detected() {
        let mut state = state();
        send_all_home(&mut state, Color::Red);
        assert!(!WinnerConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_game_over_without_winner_detected() {
        let mut state = state();
        state.game_over = true;
        assert!(!WinnerConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_winner_with_pieces_out_detected() {
        let mut state = state();
        state.game_over = true;
        state.winner = Some(Color::Red);
        assert!(!WinnerConsistentInvariant::holds(&state));
    }
}
