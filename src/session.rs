//! Game session: owns the playfield and the falling piece, runs the drop timer and player
//! commands, and paints itself onto any [`Canvas`].

use crate::config::{ConfigError, GameConfig};
use crate::piece::{Piece, player_rotate};
use crate::playfield::Playfield;
use crate::shapes::ShapeKind;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

/// Anything that can paint coloured cells at grid coordinates.
pub trait Canvas {
    fn clear_surface(&mut self);
    /// `color` is a nonzero cell value (shape id).
    fn paint_cell(&mut self, x: usize, y: usize, color: u8);
}

/// One independent game: playfield, active piece, drop timer and RNG.
#[derive(Debug)]
pub struct Session {
    playfield: Playfield,
    piece: Piece,
    /// Time accumulated towards the next automatic drop.
    drop_counter: Duration,
    drop_interval: Duration,
    rng: StdRng,
    /// Rows removed by sweeps since the session started.
    rows_cleared: u64,
}

impl Session {
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let kind = ShapeKind::random(&mut rng);
        let session = Self {
            playfield: Playfield::new(config.width, config.height),
            piece: Piece::spawn(kind, config.width),
            drop_counter: Duration::ZERO,
            drop_interval: config.drop_interval,
            rng,
            rows_cleared: 0,
        };
        log::info!(
            "new session {}x{}, drop every {:?}",
            config.width,
            config.height,
            config.drop_interval
        );
        Ok(session)
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    #[cfg(test)]
    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn rows_cleared(&self) -> u64 {
        self.rows_cleared
    }

    /// Advance the drop timer by `delta`; drops the piece one row once the interval is exceeded.
    pub fn tick(&mut self, delta: Duration) {
        self.drop_counter += delta;
        if self.drop_counter > self.drop_interval {
            self.soft_drop();
            self.drop_counter = Duration::ZERO;
        }
    }

    /// Move the piece down one row, landing it if it cannot go further.
    pub fn soft_drop(&mut self) {
        self.piece.y += 1;
        if self.playfield.collides(&self.piece) {
            self.piece.y -= 1;
            self.land();
        }
    }

    pub fn move_left(&mut self) {
        self.shift(-1);
    }

    pub fn move_right(&mut self) {
        self.shift(1);
    }

    fn shift(&mut self, dir: i32) {
        self.piece.x += dir;
        if self.playfield.collides(&self.piece) {
            self.piece.x -= dir;
        }
    }

    pub fn rotate(&mut self) {
        if !player_rotate(&self.playfield, &mut self.piece) {
            log::debug!("rotation rejected at ({}, {})", self.piece.x, self.piece.y);
        }
    }

    /// Replace the active piece with a random new one. Clears the board when there is no room.
    pub fn spawn(&mut self) {
        let kind = ShapeKind::random(&mut self.rng);
        self.spawn_kind(kind);
    }

    fn spawn_kind(&mut self, kind: ShapeKind) {
        self.piece = Piece::spawn(kind, self.playfield.width());
        if self.playfield.collides(&self.piece) {
            log::warn!("no room to spawn {kind:?}; clearing playfield");
            self.playfield.clear();
        }
    }

    fn land(&mut self) {
        log::debug!(
            "{:?} landed at ({}, {})",
            self.piece.kind(),
            self.piece.x,
            self.piece.y
        );
        if let Err(err) = self.playfield.merge(&self.piece) {
            log::error!("landing skipped merge: {err}");
        }
        let removed = self.playfield.sweep();
        if removed > 0 {
            self.rows_cleared += removed as u64;
            log::info!("cleared {removed} row(s), {} total", self.rows_cleared);
        }
        self.spawn();
    }

    /// Paint the landed cells, then the active piece over them. Piece cells above the top row
    /// are not painted.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.clear_surface();
        for (x, y, value) in self.playfield.occupied() {
            canvas.paint_cell(x, y, value);
        }
        for (x, y, value) in self.piece.cells() {
            if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
                canvas.paint_cell(x, y, value);
            }
        }
    }
}
