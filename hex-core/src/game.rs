//! Game controller: turn sequencing, move application and termination

use tracing::{debug, info, warn};

use crate::board::{Board, Side, DEFAULT_DIMENSION};
use crate::connectivity::ConnectivityTracker;
use crate::error::{GameError, IllegalMove};
use crate::observer::{GameObserver, GamePhase, GameSnapshot, SnapshotPublisher};
use crate::player::{Move, Player};

// ============================================================================
// RESULT TYPES
// ============================================================================

/// What happened during one [`HexGame::step`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Move applied, the other side is to move
    Continue,
    /// Move applied and it completed a chain for this side
    Won(Side),
}

/// Summary of a finished game
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOutcome {
    pub winner: Side,
    /// Applied moves in order
    pub moves: Vec<Move>,
}

// ============================================================================
// HEX GAME
// ============================================================================

/// Owns the board and connectivity tracker for one pair of players.
///
/// Player 1 claims as [`Side::Red`] and moves first; player 2 claims as
/// [`Side::Blue`]. The players are borrowed, not owned.
pub struct HexGame<'p> {
    board: Board,
    tracker: ConnectivityTracker,
    players: [&'p mut dyn Player; 2],
    /// Index into `players` of the side to move
    current: usize,
    phase: GamePhase,
    winner: Option<Side>,
    history: Vec<Move>,
    publisher: SnapshotPublisher,
}

impl<'p> HexGame<'p> {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    pub fn new(
        width: usize,
        height: usize,
        player1: &'p mut dyn Player,
        player2: &'p mut dyn Player,
    ) -> Result<Self, GameError> {
        let board = Board::new(width, height)?;
        check_side(1, Side::Red, player1.side())?;
        check_side(2, Side::Blue, player2.side())?;

        let tracker = ConnectivityTracker::new(board.dimension());
        let publisher = SnapshotPublisher::new(GameSnapshot::capture(
            &board,
            GamePhase::NotStarted,
            None,
            None,
            0,
        ));

        Ok(Self {
            board,
            tracker,
            players: [player1, player2],
            current: 0,
            phase: GamePhase::NotStarted,
            winner: None,
            history: Vec::new(),
            publisher,
        })
    }

    /// Game on a [`DEFAULT_DIMENSION`] board
    pub fn with_default_board(
        player1: &'p mut dyn Player,
        player2: &'p mut dyn Player,
    ) -> Result<Self, GameError> {
        Self::new(DEFAULT_DIMENSION, DEFAULT_DIMENSION, player1, player2)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::Ended
    }

    /// Winner of an ended game; `None` if it was abandoned or is not over
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Side to move next, while running
    pub fn current_side(&self) -> Option<Side> {
        (self.phase == GamePhase::Running).then(|| self.players[self.current].side())
    }

    /// Applied moves in order
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn has_won(&mut self, side: Side) -> bool {
        self.tracker.has_won(side)
    }

    /// Handle for reading published snapshots from other threads
    pub fn observer(&self) -> GameObserver {
        self.publisher.observer()
    }

    // ========================================================================
    // STATE TRANSITIONS
    // ========================================================================

    /// Start the game and play it to the end, player 1 first.
    ///
    /// Blocks for as long as the players take to answer.
    pub fn start(&mut self) -> Result<GameOutcome, GameError> {
        self.begin()?;

        loop {
            if let TurnOutcome::Won(winner) = self.step()? {
                return Ok(GameOutcome {
                    winner,
                    moves: self.history.clone(),
                });
            }
        }
    }

    /// Move to `Running` without playing a turn. Use with [`step`](Self::step)
    /// to drive the game one turn at a time.
    pub fn begin(&mut self) -> Result<(), GameError> {
        if self.phase != GamePhase::NotStarted {
            return Err(GameError::AlreadyStarted);
        }

        self.phase = GamePhase::Running;
        self.current = 0;
        info!(
            dimension = self.board.dimension(),
            red = self.players[0].name(),
            blue = self.players[1].name(),
            "Game started"
        );
        self.publish();
        Ok(())
    }

    /// Play exactly one applied move for the side to move.
    ///
    /// Rejected moves are logged and the same player is asked again.
    pub fn step(&mut self) -> Result<TurnOutcome, GameError> {
        if self.phase != GamePhase::Running {
            return Err(GameError::NotRunning);
        }

        let idx = self.current;
        let side = self.players[idx].side();

        let mv = loop {
            let mv = match self.players[idx].request_move(&self.board) {
                Ok(mv) => mv,
                Err(source) => {
                    let name = self.players[idx].name().to_string();
                    warn!(player = %name, %side, error = %source, "Player failed, abandoning game");
                    self.abandon();
                    return Err(GameError::PlayerFailed { side, name, source });
                }
            };

            match self.apply(mv, side) {
                Ok(()) => break mv,
                Err(err) => {
                    warn!(
                        player = self.players[idx].name(),
                        row = mv.row,
                        column = mv.column,
                        reason = %err,
                        "Rejected move, asking again"
                    );
                }
            }
        };

        debug!(%side, row = mv.row, column = mv.column, turn = self.history.len(), "Applied move");

        if self.tracker.has_won(side) {
            self.phase = GamePhase::Ended;
            self.winner = Some(side);
            info!(winner = %side, moves = self.history.len(), "Game over");
            self.publish();
            return Ok(TurnOutcome::Won(side));
        }

        let n = self.board.dimension();
        assert!(
            self.history.len() < n * n,
            "board filled without a winner; connectivity tracking is broken"
        );

        self.current = 1 - self.current;
        self.publish();
        Ok(TurnOutcome::Continue)
    }

    /// Clear the board for a new game with the same players and board size.
    /// Only legal once the game has ended.
    pub fn reset(&mut self) -> Result<(), GameError> {
        if self.phase != GamePhase::Ended {
            return Err(GameError::NotYetCompleted);
        }

        self.board.reset_tiles();
        self.tracker.reset();
        self.phase = GamePhase::NotStarted;
        self.winner = None;
        self.current = 0;
        self.history.clear();
        info!("Game reset");
        self.publish();
        Ok(())
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn apply(&mut self, mv: Move, side: Side) -> Result<(), IllegalMove> {
        if mv.side != side {
            return Err(IllegalMove::WrongSide {
                expected: side,
                found: mv.side,
            });
        }

        self.board.claim(mv.row, mv.column, side)?;
        self.tracker.record_claim(&self.board, mv.row, mv.column, side);
        self.history.push(mv);
        Ok(())
    }

    fn abandon(&mut self) {
        self.phase = GamePhase::Ended;
        self.winner = None;
        self.publish();
    }

    fn publish(&self) {
        self.publisher.publish(GameSnapshot::capture(
            &self.board,
            self.phase,
            self.winner,
            self.current_side(),
            self.history.len(),
        ));
    }
}

fn check_side(player: u8, expected: Side, found: Side) -> Result<(), GameError> {
    if expected != found {
        return Err(GameError::SideMismatch {
            player,
            expected,
            found,
        });
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ScriptedPlayer;

    fn red(cells: &[(usize, usize)]) -> ScriptedPlayer {
        ScriptedPlayer::new("red", Side::Red, cells.iter().copied())
    }

    fn blue(cells: &[(usize, usize)]) -> ScriptedPlayer {
        ScriptedPlayer::new("blue", Side::Blue, cells.iter().copied())
    }

    /// Red goes straight down column 0, Blue plays harmlessly in column 8
    fn column_race() -> (ScriptedPlayer, ScriptedPlayer) {
        let red_cells: Vec<_> = (0..9).map(|r| (r, 0)).collect();
        let blue_cells: Vec<_> = (0..9).map(|r| (r, 8)).collect();
        (red(&red_cells), blue(&blue_cells))
    }

    #[test]
    fn test_construction_checks_sides() {
        let (mut r, mut b) = column_race();
        assert!(matches!(
            HexGame::new(9, 9, &mut b, &mut r),
            Err(GameError::SideMismatch { player: 1, .. })
        ));

        let mut r2 = red(&[]);
        assert!(matches!(
            HexGame::new(9, 9, &mut r, &mut r2),
            Err(GameError::SideMismatch { player: 2, .. })
        ));
    }

    #[test]
    fn test_construction_checks_dimension() {
        let (mut r, mut b) = column_race();
        assert!(matches!(
            HexGame::new(9, 10, &mut r, &mut b),
            Err(GameError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_default_board() {
        let (mut r, mut b) = column_race();
        let game = HexGame::with_default_board(&mut r, &mut b).unwrap();
        assert_eq!(game.board().dimension(), DEFAULT_DIMENSION);
        assert_eq!(game.phase(), GamePhase::NotStarted);
        assert_eq!(game.current_side(), None);
    }

    #[test]
    fn test_start_plays_to_completion() {
        let (mut r, mut b) = column_race();
        let mut game = HexGame::new(9, 9, &mut r, &mut b).unwrap();

        let outcome = game.start().unwrap();
        assert_eq!(outcome.winner, Side::Red);
        // Red's 9th move comes after Blue's 8th
        assert_eq!(outcome.moves.len(), 17);
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(Side::Red));
        assert!(game.has_won(Side::Red));
        assert!(!game.has_won(Side::Blue));
    }

    #[test]
    fn test_step_before_begin() {
        let (mut r, mut b) = column_race();
        let mut game = HexGame::new(9, 9, &mut r, &mut b).unwrap();
        assert!(matches!(game.step(), Err(GameError::NotRunning)));
    }

    #[test]
    fn test_step_alternates_sides() {
        let (mut r, mut b) = column_race();
        let mut game = HexGame::new(9, 9, &mut r, &mut b).unwrap();
        game.begin().unwrap();

        assert_eq!(game.current_side(), Some(Side::Red));
        assert_eq!(game.step().unwrap(), TurnOutcome::Continue);
        assert_eq!(game.current_side(), Some(Side::Blue));
        assert_eq!(game.step().unwrap(), TurnOutcome::Continue);
        assert_eq!(game.current_side(), Some(Side::Red));

        let sides: Vec<_> = game.history().iter().map(|m| m.side).collect();
        assert_eq!(sides, vec![Side::Red, Side::Blue]);
    }

    #[test]
    fn test_rejected_moves_are_retried() {
        // Blue first tries Red's cell, then an off-board cell, then a legal one
        let mut r = red(&[(0, 0), (1, 0)]);
        let mut b = blue(&[(0, 0), (20, 3), (4, 4)]);
        let mut game = HexGame::new(9, 9, &mut r, &mut b).unwrap();
        game.begin().unwrap();

        game.step().unwrap();
        game.step().unwrap();

        assert_eq!(game.history().len(), 2);
        assert_eq!(game.board().owner(0, 0).unwrap(), Some(Side::Red));
        assert_eq!(game.board().owner(4, 4).unwrap(), Some(Side::Blue));
        assert_eq!(game.current_side(), Some(Side::Red));
    }

    #[test]
    fn test_wrong_side_move_is_retried() {
        struct Impostor {
            tries: usize,
        }

        impl Player for Impostor {
            fn name(&self) -> &str {
                "impostor"
            }

            fn side(&self) -> Side {
                Side::Red
            }

            fn request_move(&mut self, _board: &Board) -> anyhow::Result<Move> {
                self.tries += 1;
                let side = if self.tries == 1 { Side::Blue } else { Side::Red };
                Ok(Move::new(3, 3, side))
            }
        }

        let mut r = Impostor { tries: 0 };
        let mut b = blue(&[]);
        let mut game = HexGame::new(9, 9, &mut r, &mut b).unwrap();
        game.begin().unwrap();
        game.step().unwrap();

        assert_eq!(game.board().owner(3, 3).unwrap(), Some(Side::Red));
        drop(game);
        assert_eq!(r.tries, 2);
    }

    #[test]
    fn test_player_failure_abandons_game() {
        let mut r = red(&[(0, 0)]);
        let mut b = blue(&[]);
        let mut game = HexGame::new(9, 9, &mut r, &mut b).unwrap();
        game.begin().unwrap();
        game.step().unwrap();

        let err = game.step().unwrap_err();
        assert!(matches!(err, GameError::PlayerFailed { side: Side::Blue, .. }));
        assert!(game.is_game_over());
        assert_eq!(game.winner(), None);

        // An abandoned game can be reset
        game.reset().unwrap();
        assert_eq!(game.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn test_start_twice() {
        let (mut r, mut b) = column_race();
        let mut game = HexGame::new(9, 9, &mut r, &mut b).unwrap();
        game.start().unwrap();
        let cells = game.board().cells();

        assert!(matches!(game.start(), Err(GameError::AlreadyStarted)));
        assert!(matches!(game.begin(), Err(GameError::AlreadyStarted)));
        assert_eq!(game.board().cells(), cells);
    }

    #[test]
    fn test_reset_requires_end() {
        let (mut r, mut b) = column_race();
        let mut game = HexGame::new(9, 9, &mut r, &mut b).unwrap();
        assert!(matches!(game.reset(), Err(GameError::NotYetCompleted)));

        game.begin().unwrap();
        game.step().unwrap();
        assert!(matches!(game.reset(), Err(GameError::NotYetCompleted)));
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_reset_after_end() {
        let mut r = red(&(0..9).map(|row| (row, 0)).chain((0..9).map(|row| (row, 1))).collect::<Vec<_>>());
        let mut b = blue(&(0..9).map(|row| (row, 8)).chain((0..9).map(|row| (row, 7))).collect::<Vec<_>>());
        let mut game = HexGame::new(9, 9, &mut r, &mut b).unwrap();
        game.start().unwrap();

        game.reset().unwrap();
        assert_eq!(game.phase(), GamePhase::NotStarted);
        assert_eq!(game.board().claimed_count(), 0);
        assert!(game.history().is_empty());
        assert!(!game.has_won(Side::Red));
        assert!(!game.has_won(Side::Blue));
        assert_eq!(game.board().dimension(), 9);

        // Second game: Red continues its script down column 1
        let outcome = game.start().unwrap();
        assert_eq!(outcome.winner, Side::Red);
        assert_eq!(game.board().owner(8, 1).unwrap(), Some(Side::Red));
    }

    #[test]
    fn test_observer_tracks_game() {
        let (mut r, mut b) = column_race();
        let mut game = HexGame::new(9, 9, &mut r, &mut b).unwrap();
        let observer = game.observer();
        assert_eq!(observer.phase(), GamePhase::NotStarted);

        game.begin().unwrap();
        game.step().unwrap();
        let snap = observer.snapshot();
        assert_eq!(snap.phase, GamePhase::Running);
        assert_eq!(snap.moves_played, 1);
        assert_eq!(snap.owner(0, 0), Some(Side::Red));
        assert_eq!(snap.to_move, Some(Side::Blue));

        while game.step().unwrap() == TurnOutcome::Continue {}
        assert!(observer.is_game_over());
        assert_eq!(observer.winner(), Some(Side::Red));
        assert_eq!(observer.snapshot().to_move, None);
    }
}
