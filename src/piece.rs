//! Falling pair: axis cell + companion cell, rotation table, movement with wall kicks, timed drop.

use crate::board::{Board, CellValue, EMPTY};
use crate::config::Config;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub const ROTATION_UP: u8 = 0;
pub const ROTATION_RIGHT: u8 = 1;
pub const ROTATION_DOWN: u8 = 2;
pub const ROTATION_LEFT: u8 = 3;

/// Companion offset (dx, dy) from the axis: above, right, below, left.
#[inline]
pub fn companion_offset(rotation: u8) -> (i32, i32) {
    match rotation % 4 {
        ROTATION_UP => (0, -1),
        ROTATION_RIGHT => (1, 0),
        ROTATION_DOWN => (0, 1),
        _ => (-1, 0),
    }
}

/// The falling pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub x: i32,
    pub y: i32,
    pub rotation: u8, // 0..4
    pub axis_color: CellValue,
    pub companion_color: CellValue,
}

impl Piece {
    #[inline]
    pub fn companion(&self) -> (i32, i32) {
        let (dx, dy) = companion_offset(self.rotation);
        (self.x + dx, self.y + dy)
    }

    /// Both cells as (x, y, colour), axis first.
    pub fn cells(&self) -> [(i32, i32, CellValue); 2] {
        let (cx, cy) = self.companion();
        [
            (self.x, self.y, self.axis_color),
            (cx, cy, self.companion_color),
        ]
    }
}

/// Random colour pairs with one pair of lookahead for the "next" preview.
#[derive(Debug, Clone)]
pub struct ColorSource {
    rng: SmallRng,
    colors: u8,
    next: (CellValue, CellValue),
}

impl ColorSource {
    pub fn new(colors: u8, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        let mut source = Self {
            rng,
            colors,
            next: (EMPTY, EMPTY),
        };
        source.next = source.draw_pair();
        source
    }

    fn draw_color(&mut self) -> CellValue {
        self.rng.random_range(1..=self.colors) as CellValue
    }

    fn draw_pair(&mut self) -> (CellValue, CellValue) {
        let axis = self.draw_color();
        let companion = self.draw_color();
        (axis, companion)
    }

    /// Pair shown in the preview; the next call to [`ColorSource::take`] returns it.
    #[inline]
    pub fn peek(&self) -> (CellValue, CellValue) {
        self.next
    }

    pub fn take(&mut self) -> (CellValue, CellValue) {
        let pair = self.next;
        self.next = self.draw_pair();
        pair
    }
}

#[derive(Debug, Clone)]
pub struct PieceController {
    piece: Piece,
    spawn_point: (i32, i32),
    source: ColorSource,
    drop_interval_ms: u32,
    fast_drop_multiplier: u32,
    /// Scaled time accumulated towards the next one-row drop.
    drop_timer_ms: u32,
    landed: bool,
}

impl PieceController {
    pub fn new(config: &Config) -> Self {
        let spawn_point = config.spawn_point();
        Self {
            piece: Piece {
                x: spawn_point.0,
                y: spawn_point.1,
                rotation: ROTATION_UP,
                axis_color: EMPTY,
                companion_color: EMPTY,
            },
            spawn_point,
            source: ColorSource::new(config.colors, config.seed),
            drop_interval_ms: config.drop_interval_ms,
            fast_drop_multiplier: config.fast_drop_multiplier,
            drop_timer_ms: 0,
            landed: false,
        }
    }

    #[inline]
    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    #[inline]
    pub fn next_colors(&self) -> (CellValue, CellValue) {
        self.source.peek()
    }

    /// Progress towards the next automatic drop, 0.0..1.0.
    pub fn drop_progress(&self) -> f64 {
        (f64::from(self.drop_timer_ms) / f64::from(self.drop_interval_ms)).min(1.0)
    }

    #[inline]
    pub fn has_landed(&self) -> bool {
        self.landed
    }

    /// Puts a fresh pair at the spawn point, upright, with the lookahead colours.
    pub fn spawn(&mut self) {
        let (axis_color, companion_color) = self.source.take();
        self.piece = Piece {
            x: self.spawn_point.0,
            y: self.spawn_point.1,
            rotation: ROTATION_UP,
            axis_color,
            companion_color,
        };
        self.drop_timer_ms = 0;
        self.landed = false;
    }

    /// True when the spawn cell, or the cell above it, is already taken.
    pub fn check_game_over(&self, board: &Board) -> bool {
        let (x, y) = self.spawn_point;
        let (dx, dy) = companion_offset(ROTATION_UP);
        board.get(x, y) > EMPTY || board.get(x + dx, y + dy) > EMPTY
    }

    pub fn move_left(&mut self, board: &Board) -> bool {
        self.shift(board, -1)
    }

    pub fn move_right(&mut self, board: &Board) -> bool {
        self.shift(board, 1)
    }

    fn shift(&mut self, board: &Board, dx: i32) -> bool {
        if self.landed {
            return false;
        }
        let x = self.piece.x + dx;
        if !fits(board, x, self.piece.y, self.piece.rotation) {
            return false;
        }
        self.piece.x = x;
        true
    }

    pub fn rotate_clockwise(&mut self, board: &Board) -> bool {
        self.rotate_to(board, (self.piece.rotation + 1) % 4)
    }

    pub fn rotate_counterclockwise(&mut self, board: &Board) -> bool {
        self.rotate_to(board, (self.piece.rotation + 3) % 4)
    }

    /// Rotates in place, or kicks the axis one column away from a side wall the companion
    /// would cross. Rejected when the resulting cells collide or leave the grid.
    fn rotate_to(&mut self, board: &Board, rotation: u8) -> bool {
        if self.landed {
            return false;
        }
        let (dx, _) = companion_offset(rotation);
        let companion_x = self.piece.x + dx;
        let kick = if companion_x >= board.cols() as i32 {
            -1
        } else if companion_x < 0 {
            1
        } else {
            0
        };
        let x = self.piece.x + kick;
        if !fits(board, x, self.piece.y, rotation) {
            return false;
        }
        self.piece.x = x;
        self.piece.rotation = rotation;
        true
    }

    /// Advances the drop timer; once it reaches the drop interval the pair moves down a row,
    /// or is fixed onto the board if it cannot.
    pub fn tick(&mut self, board: &mut Board, delta_ms: u32, fast_drop: bool) {
        if self.landed {
            return;
        }
        let scale = if fast_drop { self.fast_drop_multiplier } else { 1 };
        self.drop_timer_ms = self
            .drop_timer_ms
            .saturating_add(delta_ms.saturating_mul(scale));
        if self.drop_timer_ms < self.drop_interval_ms {
            return;
        }
        self.drop_timer_ms = 0;
        if self.can_move_down(board) {
            self.piece.y += 1;
        } else {
            self.fix(board);
        }
    }

    fn can_move_down(&self, board: &Board) -> bool {
        let p = &self.piece;
        if !axis_free(board, p.x, p.y + 1) {
            return false;
        }
        // An upright companion drops into the cell the axis leaves.
        if p.rotation == ROTATION_UP {
            return true;
        }
        let (cx, cy) = p.companion();
        companion_free(board, cx, cy + 1)
    }

    /// Writes both cells into the board. A companion still in the hidden row is lost.
    fn fix(&mut self, board: &mut Board) {
        for (x, y, color) in self.piece.cells() {
            board.set(x, y, color);
        }
        self.landed = true;
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, x: i32, y: i32, rotation: u8) {
        self.piece.x = x;
        self.piece.y = y;
        self.piece.rotation = rotation;
    }
}

#[inline]
fn axis_free(board: &Board, x: i32, y: i32) -> bool {
    board.get(x, y) == EMPTY
}

/// Like [`axis_free`], but the row just above the grid counts as free space.
#[inline]
fn companion_free(board: &Board, x: i32, y: i32) -> bool {
    if y == -1 {
        return x >= 0 && x < board.cols() as i32;
    }
    board.get(x, y) == EMPTY
}

fn fits(board: &Board, x: i32, y: i32, rotation: u8) -> bool {
    let (dx, dy) = companion_offset(rotation);
    axis_free(board, x, y) && companion_free(board, x + dx, y + dy)
}
