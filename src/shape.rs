use rand::Rng;

// ============================================================================
// Types
// ============================================================================

/// A cell offset relative to a piece's anchor.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Offset {
    pub dx: i16,
    pub dy: i16,
}

impl Offset {
    pub const fn new(dx: i16, dy: i16) -> Self {
        Self { dx, dy }
    }

    /// Quarter turn clockwise about the anchor: (x, y) -> (-y, x).
    pub fn rotated(self) -> Self {
        Self {
            dx: -self.dy,
            dy: self.dx,
        }
    }
}

pub type ShapeOffsets = [Offset; 4];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ShapeKind {
    Square,
    T,
    L,
    J,
    S,
    Z,
    Line,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Square,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::Line,
    ];

    /// Base orientation as spawned.
    pub const fn offsets(self) -> ShapeOffsets {
        const fn o(dx: i16, dy: i16) -> Offset {
            Offset::new(dx, dy)
        }
        match self {
            ShapeKind::Square => [o(0, 0), o(1, 0), o(0, 1), o(1, 1)],
            ShapeKind::T => [o(0, 0), o(-1, 0), o(1, 0), o(0, 1)],
            ShapeKind::L => [o(0, 0), o(1, 0), o(0, 1), o(0, 2)],
            ShapeKind::J => [o(0, 0), o(-1, 0), o(0, 1), o(0, 2)],
            ShapeKind::S => [o(0, 0), o(1, 0), o(0, 1), o(-1, 1)],
            ShapeKind::Z => [o(0, 0), o(-1, 0), o(0, 1), o(1, 1)],
            ShapeKind::Line => [o(0, 0), o(1, 0), o(2, 0), o(3, 0)],
        }
    }

    fn random() -> Self {
        let mut rng = rand::thread_rng();
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Rotates every offset a quarter turn clockwise.
pub fn rotate_offsets(offsets: &ShapeOffsets) -> ShapeOffsets {
    offsets.map(Offset::rotated)
}

// ============================================================================
// Piece Provider Trait
// ============================================================================

pub trait PieceProvider {
    fn next_piece(&mut self) -> ShapeKind;
}

/// Uniform draw from the seven shapes.
pub struct RandomPieceProvider;

impl PieceProvider for RandomPieceProvider {
    fn next_piece(&mut self) -> ShapeKind {
        ShapeKind::random()
    }
}

pub struct SequencePieceProvider {
    pieces: Vec<ShapeKind>,
    index: usize,
}

impl SequencePieceProvider {
    /// Cycles through `pieces`, which must not be empty.
    pub fn new(pieces: Vec<ShapeKind>) -> Self {
        assert!(!pieces.is_empty(), "piece sequence must not be empty");
        Self { pieces, index: 0 }
    }
}

impl PieceProvider for SequencePieceProvider {
    fn next_piece(&mut self) -> ShapeKind {
        let piece = self.pieces[self.index % self.pieces.len()];
        self.index += 1;
        piece
    }
}
