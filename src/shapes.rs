//! Shape catalog: the seven tetrominoes, each tagged with its colour id.

use crate::piece::Mask;
use rand::Rng;

/// Tetromino kinds. The discriminant is the cell value the shape writes into the playfield,
/// so a nonzero cell always tells which shape (and colour) it came from. `0` means empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ShapeKind {
    I = 1,
    J = 2,
    L = 3,
    O = 4,
    S = 5,
    T = 6,
    Z = 7,
}

impl ShapeKind {
    pub const ALL: [Self; 7] = [Self::I, Self::J, Self::L, Self::O, Self::S, Self::T, Self::Z];

    /// Cell value / colour id (1..=7).
    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.id() == id)
    }

    /// Spawn orientation rows.
    fn rows(self) -> &'static [&'static [u8]] {
        match self {
            Self::I => &[&[1, 1, 1, 1]],
            Self::J => &[&[2, 0, 0], &[2, 2, 2]],
            Self::L => &[&[0, 0, 3], &[3, 3, 3]],
            Self::O => &[&[4, 4], &[4, 4]],
            Self::S => &[&[0, 5, 5], &[5, 5, 0]],
            Self::T => &[&[0, 6, 0], &[6, 6, 6]],
            Self::Z => &[&[7, 7, 0], &[0, 7, 7]],
        }
    }

    pub fn mask(self) -> Mask {
        Mask::from_rows(self.rows())
    }

    /// Uniform choice over the whole catalog.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Largest (width, height) of any shape in spawn orientation. A playfield smaller than this
    /// could not fit a freshly spawned piece even when empty.
    pub fn spawn_extent() -> (usize, usize) {
        Self::ALL.iter().fold((0, 0), |(w, h), kind| {
            let rows = kind.rows();
            let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
            (w.max(width), h.max(rows.len()))
        })
    }
}
