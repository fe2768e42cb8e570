//! Active piece: cell mask, anchor position, rotation with horizontal kicks.

use crate::playfield::Playfield;
use crate::shapes::ShapeKind;

/// Rectangular cell mask of a piece in its local frame; `0` cells are empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    /// rows[y][x]. Never empty; every row has the same length.
    rows: Vec<Vec<u8>>,
}

impl Mask {
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Self {
        let rows: Vec<Vec<u8>> = rows.iter().map(|r| r.as_ref().to_vec()).collect();
        debug_assert!(!rows.is_empty() && !rows[0].is_empty(), "empty mask");
        debug_assert!(
            rows.iter().all(|r| r.len() == rows[0].len()),
            "ragged mask"
        );
        Self { rows }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Occupied cells as (x, y, value) in the local frame.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &v)| v != 0)
                .map(move |(x, &v)| (x, y, v))
        })
    }

    /// Quarter turn: transpose, then reverse each row. Always turns the same way
    /// (clockwise with y pointing down).
    pub fn rotated(&self) -> Self {
        let h = self.height();
        let rows = (0..self.width())
            .map(|x| (0..h).rev().map(|y| self.rows[y][x]).collect())
            .collect();
        Self { rows }
    }
}

/// Free-function form of [`Mask::rotated`].
#[inline]
pub fn rotate(mask: &Mask) -> Mask {
    mask.rotated()
}

/// Falling piece: mask plus the grid position of its top-left corner.
/// The position may leave the playfield while a kick is being searched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub mask: Mask,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    pub fn new(mask: Mask, x: i32, y: i32) -> Self {
        Self { mask, x, y }
    }

    /// New piece on the top row, horizontally centred.
    pub fn spawn(kind: ShapeKind, field_width: usize) -> Self {
        let mask = kind.mask();
        let x = (field_width / 2) as i32 - (mask.width() / 2) as i32;
        Self::new(mask, x, 0)
    }

    /// Shape this piece was spawned from, read back from its cell values.
    pub fn kind(&self) -> Option<ShapeKind> {
        self.mask
            .cells()
            .next()
            .and_then(|(_, _, v)| ShapeKind::from_id(v))
    }

    /// Occupied cells in playfield coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, u8)> + '_ {
        self.mask
            .cells()
            .map(|(cx, cy, v)| (self.x + cx as i32, self.y + cy as i32, v))
    }
}

/// Rotate `piece` in place, kicking sideways by +1, -2, +3, -4, ... while the rotated mask
/// collides. Gives up once the next shift would be wider than the rotated mask, restoring the
/// original mask and column. Returns whether the rotation stuck.
///
/// Only horizontal kicks are tried, so a piece wedged under an overhang may refuse to turn.
pub fn player_rotate(playfield: &Playfield, piece: &mut Piece) -> bool {
    let original_x = piece.x;
    let rotated = rotate(&piece.mask);
    let original = std::mem::replace(&mut piece.mask, rotated);
    let limit = piece.mask.width() as i32;

    let mut offset = 1i32;
    while playfield.collides(piece) {
        if offset.abs() > limit {
            piece.mask = original;
            piece.x = original_x;
            return false;
        }
        piece.x += offset;
        offset = -(offset + offset.signum());
    }
    true
}
