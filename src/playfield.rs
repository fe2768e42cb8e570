//! Playfield: the grid of landed cells, collision, merge, line sweep.

use crate::piece::Piece;
use std::collections::VecDeque;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("piece at ({x}, {y}) overlaps the stack or leaves the playfield")]
    Collision { x: i32, y: i32 },
}

/// Playfield: grid of cell values, `0` = empty. y=0 is top; rows are stored [0..height].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playfield {
    width: usize,
    height: usize,
    /// rows[y][x] = cell. rows[0] is top.
    rows: VecDeque<Vec<u8>>,
}

impl Playfield {
    pub fn new(width: usize, height: usize) -> Self {
        let rows = (0..height).map(|_| vec![0; width]).collect();
        Self {
            width,
            height,
            rows,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    #[cfg(test)]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = value;
        }
    }

    /// Nonzero cells as (x, y, value), top row first.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &v)| v != 0)
                .map(move |(x, &v)| (x, y, v))
        })
    }

    /// True if any filled cell of `piece` is left of column 0, right of the last column, below
    /// the floor, or on a filled cell. Cells above the top row never collide, so pieces may
    /// poke out of the top.
    pub fn collides(&self, piece: &Piece) -> bool {
        piece.cells().any(|(x, y, _)| {
            if x < 0 || x >= self.width as i32 || y >= self.height as i32 {
                return true;
            }
            if y < 0 {
                return false;
            }
            self.get(x as usize, y as usize).is_some_and(|v| v != 0)
        })
    }

    /// Bake `piece` into the grid. Refuses, leaving the grid untouched, if the piece collides.
    /// Cells above the top row are dropped.
    pub fn merge(&mut self, piece: &Piece) -> Result<(), MergeError> {
        if self.collides(piece) {
            return Err(MergeError::Collision {
                x: piece.x,
                y: piece.y,
            });
        }
        for (x, y, value) in piece.cells() {
            if y < 0 {
                continue;
            }
            if let Some(cell) = self
                .rows
                .get_mut(y as usize)
                .and_then(|row| row.get_mut(x as usize))
            {
                *cell = value;
            }
        }
        Ok(())
    }

    /// Remove every full row, scanning bottom-up, and push an empty row in on top for each.
    /// After a removal the same index is checked again since the row above has dropped into it.
    /// Returns the number of rows removed.
    pub fn sweep(&mut self) -> usize {
        let mut removed = 0;
        let mut y = self.height;
        while y > 0 {
            let full = self.rows[y - 1].iter().all(|&v| v != 0);
            if full {
                self.rows.remove(y - 1);
                self.rows.push_front(vec![0; self.width]);
                removed += 1;
                // The new top row is empty, so the scan always makes progress.
                continue;
            }
            y -= 1;
        }
        removed
    }

    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(0);
        }
    }

    #[cfg(test)]
    pub fn rows(&self) -> impl Iterator<Item = &Vec<u8>> + '_ {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Mask;
    use crate::shapes::ShapeKind;

    fn fill_row(field: &mut Playfield, y: usize, value: u8) {
        for x in 0..field.width() {
            field.set(x, y, value);
        }
    }

    fn snapshot(field: &Playfield) -> Vec<Vec<u8>> {
        field.rows().cloned().collect()
    }

    #[test]
    fn test_new_is_empty() {
        let field = Playfield::new(10, 20);
        assert_eq!((field.width(), field.height()), (10, 20));
        assert_eq!(field.rows().count(), 20);
        assert!(field.rows().all(|r| r.len() == 10 && r.iter().all(|&v| v == 0)));
        assert_eq!(field.occupied().count(), 0);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let field = Playfield::new(4, 4);
        assert_eq!(field.get(0, 0), Some(0));
        assert_eq!(field.get(4, 0), None);
        assert_eq!(field.get(0, 4), None);
    }

    #[test]
    fn test_collides_with_walls_and_floor() {
        let field = Playfield::new(10, 20);
        let o = ShapeKind::O.mask();
        assert!(!field.collides(&Piece::new(o.clone(), 0, 0)));
        assert!(!field.collides(&Piece::new(o.clone(), 8, 18)));
        assert!(field.collides(&Piece::new(o.clone(), -1, 5)));
        assert!(field.collides(&Piece::new(o.clone(), 9, 5)));
        assert!(field.collides(&Piece::new(o, 4, 19)));
    }

    #[test]
    fn test_collides_ignores_rows_above_top() {
        let mut field = Playfield::new(10, 20);
        fill_row(&mut field, 0, 1);
        let o = ShapeKind::O.mask();
        // Fully above the top: never collides even though row 0 is full.
        assert!(!field.collides(&Piece::new(o.clone(), 4, -2)));
        // Lower half reaches row 0.
        assert!(field.collides(&Piece::new(o.clone(), 4, -1)));
        // Still subject to the side walls up there.
        assert!(field.collides(&Piece::new(o, -1, -5)));
    }

    #[test]
    fn test_collides_only_on_filled_mask_cells() {
        let mut field = Playfield::new(10, 20);
        field.set(4, 10, 2);
        // S piece at (4, 10): the top-left mask cell is empty and sits on the block.
        let s = Piece::new(ShapeKind::S.mask(), 4, 10);
        assert!(!field.collides(&s));
        let t = Piece::new(ShapeKind::T.mask(), 3, 9);
        // T bottom row covers (3..=5, 10).
        assert!(field.collides(&t));
    }

    #[test]
    fn test_merge_writes_piece_value() {
        let mut field = Playfield::new(10, 20);
        let piece = Piece::new(ShapeKind::J.mask(), 2, 18);
        field.merge(&piece).unwrap();
        let cells: Vec<_> = field.occupied().collect();
        assert_eq!(cells, vec![(2, 18, 2), (2, 19, 2), (3, 19, 2), (4, 19, 2)]);
    }

    #[test]
    fn test_merge_refuses_overlap() {
        let mut field = Playfield::new(10, 20);
        field.set(5, 19, 7);
        let before = snapshot(&field);
        let piece = Piece::new(ShapeKind::O.mask(), 4, 18);
        assert_eq!(
            field.merge(&piece),
            Err(MergeError::Collision { x: 4, y: 18 })
        );
        assert_eq!(snapshot(&field), before);
    }

    #[test]
    fn test_merge_drops_cells_above_top() {
        let mut field = Playfield::new(10, 20);
        let piece = Piece::new(ShapeKind::O.mask(), 0, -1);
        field.merge(&piece).unwrap();
        let cells: Vec<_> = field.occupied().collect();
        assert_eq!(cells, vec![(0, 0, 4), (1, 0, 4)]);
    }

    #[test]
    fn test_sweep_no_full_rows_is_noop() {
        let mut field = Playfield::new(10, 20);
        field.set(3, 19, 1);
        field.set(0, 10, 5);
        let before = snapshot(&field);
        assert_eq!(field.sweep(), 0);
        assert_eq!(snapshot(&field), before);
    }

    #[test]
    fn test_sweep_bottom_row() {
        let mut field = Playfield::new(10, 20);
        fill_row(&mut field, 19, 1);
        field.set(0, 19, 0);
        field.set(3, 18, 6);
        let plug = Piece::new(Mask::from_rows(&[[2u8]]), 0, 19);
        field.merge(&plug).unwrap();

        assert_eq!(field.sweep(), 1);
        assert_eq!(field.height(), 20);
        assert!(field.rows().next().is_some_and(|r| r.iter().all(|&v| v == 0)));
        // Old row 18 is now the bottom row.
        let bottom: Vec<_> = field.occupied().collect();
        assert_eq!(bottom, vec![(3, 19, 6)]);
    }

    #[test]
    fn test_sweep_adjacent_full_rows() {
        let mut field = Playfield::new(4, 6);
        fill_row(&mut field, 5, 1);
        fill_row(&mut field, 4, 2);
        field.set(1, 3, 3);

        assert_eq!(field.sweep(), 2);
        assert_eq!(
            snapshot(&field),
            vec![
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
                vec![0, 3, 0, 0],
            ]
        );
    }

    #[test]
    fn test_sweep_keeps_order_of_partial_rows() {
        let mut field = Playfield::new(3, 7);
        let rows: [[u8; 3]; 7] = [
            [0, 0, 0],
            [1, 0, 0],
            [2, 2, 2],
            [0, 3, 0],
            [4, 4, 4],
            [5, 5, 5],
            [0, 0, 6],
        ];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                field.set(x, y, v);
            }
        }

        assert_eq!(field.sweep(), 3);
        assert_eq!(
            snapshot(&field),
            vec![
                vec![0, 0, 0],
                vec![0, 0, 0],
                vec![0, 0, 0],
                vec![0, 0, 0],
                vec![1, 0, 0],
                vec![0, 3, 0],
                vec![0, 0, 6],
            ]
        );
    }

    #[test]
    fn test_sweep_whole_board() {
        let mut field = Playfield::new(2, 3);
        for y in 0..3 {
            fill_row(&mut field, y, 1);
        }
        assert_eq!(field.sweep(), 3);
        assert_eq!(field.occupied().count(), 0);
        assert_eq!(field.rows().count(), 3);
    }

    #[test]
    fn test_clear() {
        let mut field = Playfield::new(10, 20);
        fill_row(&mut field, 19, 1);
        field.set(4, 0, 3);
        field.clear();
        assert_eq!(field.occupied().count(), 0);
        assert_eq!(snapshot(&field), snapshot(&Playfield::new(10, 20)));
    }
}
