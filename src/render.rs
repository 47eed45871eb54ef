use crate::config::{GRID_HEIGHT, GRID_WIDTH, PREVIEW_SIZE};
use crate::error::Result;
use crate::game::GameSession;
use crate::grid::{CellState, Cells, Grid};
use crate::piece::Piece;
use crate::shape::ShapeKind;

// ============================================================================
// Visual Constants
// ============================================================================

const BLOCK_CHAR: &str = "[ ]";
const EMPTY_CHAR: &str = "   ";
const SIDE_BORDER: char = '|';
const FLOOR_CHAR: char = '-';

pub type Preview = [[bool; PREVIEW_SIZE]; PREVIEW_SIZE];

// ============================================================================
// Snapshot
// ============================================================================

/// What one frame shows: board with the live piece merged in, score and preview.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Snapshot {
    pub score: u32,
    pub cells: Cells,
    pub preview: Preview,
}

impl Snapshot {
    pub fn new(grid: &Grid, piece: Option<&Piece>, score: u32, next: ShapeKind) -> Self {
        let mut cells = *grid.cells();

        if let Some(piece) = piece {
            for block in piece.occupied_cells() {
                if block.y >= 0
                    && block.y < GRID_HEIGHT as i16
                    && block.x >= 0
                    && block.x < GRID_WIDTH as i16
                {
                    cells[block.y as usize][block.x as usize] = CellState::Filled;
                }
            }
        }

        Self {
            score,
            cells,
            preview: preview_of(next),
        }
    }

    pub fn of(session: &GameSession) -> Self {
        Self::new(&session.grid, session.piece.as_ref(), session.score, session.next)
    }

    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        self.cells[y][x] == CellState::Filled
    }

    /// Fixed-width text: score line, bordered board, floor rule and preview panel.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(GRID_HEIGHT + PREVIEW_SIZE + 3);
        lines.push(format!("Score: {}", self.score));

        for row in &self.cells {
            let mut line = String::with_capacity(GRID_WIDTH * BLOCK_CHAR.len() + 2);
            line.push(SIDE_BORDER);
            for cell in row {
                line.push_str(match cell {
                    CellState::Filled => BLOCK_CHAR,
                    CellState::Empty => EMPTY_CHAR,
                });
            }
            line.push(SIDE_BORDER);
            lines.push(line);
        }

        lines.push(FLOOR_CHAR.to_string().repeat(GRID_WIDTH * BLOCK_CHAR.len() + 2));
        lines.push("Next:".to_string());

        for row in &self.preview {
            let mut line = String::from(" ");
            for &filled in row {
                line.push_str(if filled { BLOCK_CHAR } else { EMPTY_CHAR });
            }
            lines.push(line);
        }

        lines
    }
}

/// Base offsets of `kind` inside a 4x4 window; anything outside is dropped.
pub fn preview_of(kind: ShapeKind) -> Preview {
    let mut preview = [[false; PREVIEW_SIZE]; PREVIEW_SIZE];
    for o in kind.offsets() {
        if (0..PREVIEW_SIZE as i16).contains(&o.dx) && (0..PREVIEW_SIZE as i16).contains(&o.dy) {
            preview[o.dy as usize][o.dx as usize] = true;
        }
    }
    preview
}

// ============================================================================
// Display Sink
// ============================================================================

pub trait DisplaySink {
    /// Redraws the frame in place.
    fn draw(&mut self, snapshot: &Snapshot) -> Result<()>;

    /// Final screen after a game ends, including the play-again prompt.
    fn show_game_over(&mut self, score: u32) -> Result<()>;
}

pub fn game_over_lines(score: u32) -> Vec<String> {
    vec![
        "Game Over!".to_string(),
        format!("Final Score: {score}"),
        "Do you want to play again? (Y/N):".to_string(),
    ]
}
