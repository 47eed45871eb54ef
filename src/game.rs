use crate::config::LINE_CLEAR_BONUS;
use crate::grid::Grid;
use crate::piece::Piece;
use crate::shape::{PieceProvider, RandomPieceProvider, ShapeKind};

// ============================================================================
// Types
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    Spawning,
    Falling,
    Landing,
    GameOver,
}

/// Player command applied to the live piece.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameEvent {
    PieceSpawned(ShapeKind),
    PieceMoved,
    PieceRotated,
    PieceLocked,
    LinesCleared(u32),
    GameOver,
    GameRestarted,
}

// ============================================================================
// Game Session
// ============================================================================

/// Everything one game owns: board, live piece, preview, score and state.
pub struct GameSession {
    pub grid: Grid,
    pub piece: Option<Piece>,
    pub next: ShapeKind,
    pub score: u32,
    pub state: GameState,
    piece_provider: Box<dyn PieceProvider>,
    events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::with_provider(Box::new(RandomPieceProvider))
    }

    /// Starts in `Spawning` with the preview already drawn.
    pub fn with_provider(mut provider: Box<dyn PieceProvider>) -> Self {
        let next = provider.next_piece();
        Self {
            grid: Grid::new(),
            piece: None,
            next,
            score: 0,
            state: GameState::Spawning,
            piece_provider: provider,
            events: Vec::new(),
        }
    }

    /// Same as [`GameSession::with_provider`] on a pre-filled board.
    pub fn with_grid(grid: Grid, provider: Box<dyn PieceProvider>) -> Self {
        let mut session = Self::with_provider(provider);
        session.grid = grid;
        session
    }

    /// Turns the preview into the live piece. Returns false and ends the game if it collides.
    pub fn spawn(&mut self) -> bool {
        let piece = Piece::spawn(self.next);
        let fits = piece.can_place(&self.grid, 0, 0);
        self.piece = Some(piece);

        if !fits {
            self.state = GameState::GameOver;
            self.events.push(GameEvent::GameOver);
            return false;
        }

        self.events.push(GameEvent::PieceSpawned(self.next));
        self.next = self.piece_provider.next_piece();
        self.state = GameState::Falling;
        true
    }

    /// One gravity step. A blocked fall moves the game to `Landing`.
    pub fn tick(&mut self) {
        if self.state != GameState::Falling {
            return;
        }
        if !self.move_piece(0, 1) {
            self.state = GameState::Landing;
        }
    }

    /// Applies a player command. Ignored unless a piece is falling.
    pub fn apply(&mut self, command: Command) {
        if self.state != GameState::Falling {
            return;
        }
        match command {
            Command::MoveLeft => {
                self.move_piece(-1, 0);
            }
            Command::MoveRight => {
                self.move_piece(1, 0);
            }
            Command::SoftDrop => {
                if !self.move_piece(0, 1) {
                    self.state = GameState::Landing;
                }
            }
            Command::Rotate => {
                self.rotate_piece();
            }
        }
    }

    fn move_piece(&mut self, dx: i16, dy: i16) -> bool {
        let Some(piece) = self.piece.as_mut() else {
            return false;
        };
        let moved = piece.try_move(&self.grid, dx, dy);
        if moved {
            self.events.push(GameEvent::PieceMoved);
        }
        moved
    }

    fn rotate_piece(&mut self) -> bool {
        let Some(piece) = self.piece.as_mut() else {
            return false;
        };
        let rotated = piece.try_rotate(&self.grid);
        if rotated {
            self.events.push(GameEvent::PieceRotated);
        }
        rotated
    }

    /// Commits a landed piece, clears rows, scores them and spawns the next piece.
    /// Returns the number of rows cleared.
    pub fn land(&mut self) -> u32 {
        if self.state != GameState::Landing {
            return 0;
        }
        let Some(piece) = self.piece.take() else {
            self.state = GameState::Spawning;
            return 0;
        };

        self.grid.commit(&piece.occupied_cells());
        self.events.push(GameEvent::PieceLocked);

        let cleared = self.grid.clear_full_rows();
        if cleared > 0 {
            self.score += LINE_CLEAR_BONUS * cleared;
            self.events.push(GameEvent::LinesCleared(cleared));
        }

        self.state = GameState::Spawning;
        self.spawn();
        cleared
    }

    /// Runs any pending state transition: spawning or landing.
    pub fn advance(&mut self) {
        match self.state {
            GameState::Spawning => {
                self.spawn();
            }
            GameState::Landing => {
                self.land();
            }
            GameState::Falling | GameState::GameOver => {}
        }
    }

    /// Clears board, score and events and draws a fresh preview. The session is left in `Spawning`.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.piece = None;
        self.score = 0;
        self.events.clear();
        self.next = self.piece_provider.next_piece();
        self.state = GameState::Spawning;
        self.events.push(GameEvent::GameRestarted);
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// Takes and clears all pending events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
