use crate::config::{GRID_HEIGHT, GRID_WIDTH};

// ============================================================================
// Types
// ============================================================================

/// Board coordinate. `y` grows downward and may be negative above the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CellState {
    #[default]
    Empty,
    Filled,
}

pub type Cells = [[CellState; GRID_WIDTH]; GRID_HEIGHT];

/// Fixed 10x20 occupancy matrix, indexed `cells[y][x]`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    cells: Cells,
}

// ============================================================================
// Grid Logic
// ============================================================================

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [[CellState::Empty; GRID_WIDTH]; GRID_HEIGHT],
        }
    }

    pub fn from_cells(cells: Cells) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    /// Space above the board is always free; anything beside or below it is occupied.
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        if y < 0 {
            return false;
        }
        if x < 0 || x >= GRID_WIDTH as i16 || y >= GRID_HEIGHT as i16 {
            return true;
        }
        self.cells[y as usize][x as usize] == CellState::Filled
    }

    /// Marks the given cells filled. Cells above the board are dropped.
    pub fn commit(&mut self, cells: &[Position]) {
        for cell in cells {
            if cell.y < 0 {
                continue;
            }
            debug_assert!(
                cell.x >= 0 && cell.x < GRID_WIDTH as i16 && cell.y < GRID_HEIGHT as i16,
                "commit outside the board: {cell:?}"
            );
            if let Some(slot) = self
                .cells
                .get_mut(cell.y as usize)
                .and_then(|row| row.get_mut(cell.x as usize))
            {
                *slot = CellState::Filled;
            }
        }
    }

    /// Clears full rows bottom to top and returns how many were removed.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = GRID_HEIGHT;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                cleared += 1;
                self.shift_down_into(row);
                // Row above now sits at `row`; examine it again.
            } else {
                y -= 1;
            }
        }

        cleared
    }

    fn shift_down_into(&mut self, row: usize) {
        for r in (1..=row).rev() {
            self.cells[r] = self.cells[r - 1];
        }
        self.cells[0] = [CellState::Empty; GRID_WIDTH];
    }

    pub fn reset(&mut self) {
        self.cells = [[CellState::Empty; GRID_WIDTH]; GRID_HEIGHT];
    }

    /// Rows outside the board are never full.
    pub fn is_row_full(&self, y: usize) -> bool {
        self.cells
            .get(y)
            .is_some_and(|row| row.iter().all(|cell| *cell == CellState::Filled))
    }

    pub fn filled_count_in_row(&self, y: usize) -> usize {
        self.cells
            .get(y)
            .map_or(0, |row| row.iter().filter(|cell| **cell == CellState::Filled).count())
    }

    pub fn total_filled_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| **cell == CellState::Filled).count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

pub mod test_helpers {
    use super::*;

    pub fn empty_grid() -> Grid {
        Grid::new()
    }

    pub fn fill_row(grid: &mut Grid, y: usize) {
        for x in 0..GRID_WIDTH {
            grid.cells[y][x] = CellState::Filled;
        }
    }

    pub fn fill_row_with_gap(grid: &mut Grid, y: usize, gap_x: usize) {
        for x in 0..GRID_WIDTH {
            if x != gap_x {
                grid.cells[y][x] = CellState::Filled;
            }
        }
    }

    pub fn fill_cell(grid: &mut Grid, x: usize, y: usize) {
        grid.cells[y][x] = CellState::Filled;
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;

    #[test]
    fn above_board_is_free_for_any_column() {
        let mut grid = empty_grid();
        fill_row(&mut grid, 0);
        for x in -3..(GRID_WIDTH as i16 + 3) {
            assert!(!grid.is_occupied(x, -1));
            assert!(!grid.is_occupied(x, -20));
        }
    }

    #[test]
    fn outside_walls_and_floor_fail_closed() {
        let grid = empty_grid();
        assert!(grid.is_occupied(-1, 0));
        assert!(grid.is_occupied(GRID_WIDTH as i16, 5));
        assert!(grid.is_occupied(0, GRID_HEIGHT as i16));
        assert!(!grid.is_occupied(0, GRID_HEIGHT as i16 - 1));
        assert!(!grid.is_occupied(GRID_WIDTH as i16 - 1, 0));
    }

    #[test]
    fn commit_skips_cells_above_board() {
        let mut grid = empty_grid();
        grid.commit(&[Position::new(2, -1), Position::new(2, 0), Position::new(3, 7)]);

        assert!(grid.is_occupied(2, 0));
        assert!(grid.is_occupied(3, 7));
        assert_eq!(grid.total_filled_cells(), 2);
    }

    #[test]
    fn clears_two_adjacent_rows() {
        let mut grid = empty_grid();
        fill_cell(&mut grid, 4, 17);
        fill_row(&mut grid, 18);
        fill_row(&mut grid, 19);

        assert_eq!(grid.clear_full_rows(), 2);
        assert!(grid.is_occupied(4, 19));
        assert_eq!(grid.total_filled_cells(), 1);
    }

    #[test]
    fn full_row_shifting_into_cleared_row_is_also_cleared() {
        let mut grid = empty_grid();
        fill_row(&mut grid, 10);
        fill_row_with_gap(&mut grid, 11, 0);
        fill_row(&mut grid, 12);

        assert_eq!(grid.clear_full_rows(), 2);
        assert_eq!(grid.filled_count_in_row(12), GRID_WIDTH - 1);
        assert_eq!(grid.total_filled_cells(), GRID_WIDTH - 1);
    }

    #[test]
    fn no_full_rows_leaves_grid_untouched() {
        let mut grid = empty_grid();
        fill_row_with_gap(&mut grid, 19, 3);
        fill_cell(&mut grid, 0, 5);
        let before = grid.clone();

        assert_eq!(grid.clear_full_rows(), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn row_queries_past_the_floor_read_empty() {
        let mut grid = empty_grid();
        fill_row(&mut grid, GRID_HEIGHT - 1);
        assert!(grid.is_row_full(GRID_HEIGHT - 1));
        assert!(!grid.is_row_full(GRID_HEIGHT));
        assert_eq!(grid.filled_count_in_row(GRID_HEIGHT), 0);
        assert_eq!(grid.filled_count_in_row(usize::MAX), 0);
    }

    #[test]
    fn reset_empties_everything() {
        let mut grid = empty_grid();
        fill_row(&mut grid, 3);
        fill_row_with_gap(&mut grid, 19, 1);
        grid.reset();
        assert_eq!(grid.total_filled_cells(), 0);
    }
}
