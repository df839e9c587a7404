//! Game state machine: spawn, play, gravity settle, erase check, chain loop, game over.
//!
//! [`Game::update`] is called once per fixed tick. Each tick advances exactly one phase
//! transition (or one frame of play), so the `Fall` and `Erasing` phases are always visible to
//! the presentation layer for one tick each.

use crate::board::{Board, CellValue, ErasedCell};
use crate::config::{Config, ConfigError};
use crate::piece::{Piece, PieceController};
use crate::score::ScoreKeeper;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Idle until confirm.
    #[default]
    Title,
    Start,
    Spawn,
    Playing,
    /// Apply one gravity step.
    CheckFall,
    /// One-tick pause after a gravity step.
    Fall,
    CheckErase,
    /// One-tick pause after an erase.
    Erasing,
    GameOver,
}

/// Input signals for one tick, supplied by the input layer before [`Game::update`].
/// Everything except `fast_drop` is an edge (pressed this tick); `fast_drop` is held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Input {
    pub move_left: bool,
    pub move_right: bool,
    pub rotate_cw: bool,
    pub rotate_ccw: bool,
    pub fast_drop: bool,
    pub confirm: bool,
}

/// Things that happened during a tick, for effects and popups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Spawned,
    Landed,
    Erased {
        count: usize,
        groups: usize,
        chain: usize,
        score: u32,
        cells: Vec<ErasedCell>,
    },
    AllClear {
        bonus: u32,
    },
    GameOver,
}

/// Read-only view of everything the presentation layer draws.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub phase: Phase,
    pub board: &'a Board,
    /// Falling pair while playing.
    pub piece: Option<Piece>,
    pub next: (CellValue, CellValue),
    pub score: u32,
    pub chain: usize,
    pub max_chain: usize,
    pub all_clear: bool,
    pub drop_progress: f64,
}

#[derive(Debug)]
pub struct Game {
    config: Config,
    board: Board,
    controller: PieceController,
    score: ScoreKeeper,
    phase: Phase,
    chain_count: usize,
    max_chain: usize,
    all_clear: bool,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            board: Board::new(config.cols, config.rows),
            controller: PieceController::new(&config),
            score: ScoreKeeper::new(&config),
            phase: Phase::Title,
            chain_count: 0,
            max_chain: 0,
            all_clear: false,
            events: Vec::new(),
            config,
        })
    }

    /// Throws away the session (board, score, chain, colour sequence) and goes to `Start`.
    pub fn restart(&mut self) {
        self.board.clear();
        self.score.reset();
        self.controller = PieceController::new(&self.config);
        self.chain_count = 0;
        self.max_chain = 0;
        self.all_clear = false;
        self.events.clear();
        self.phase = Phase::Start;
    }

    pub fn update(&mut self, delta_ms: u32, input: &Input) {
        self.phase = match self.phase {
            Phase::Title => {
                if input.confirm {
                    Phase::Start
                } else {
                    Phase::Title
                }
            }
            Phase::Start => Phase::Spawn,
            Phase::Spawn => self.spawn(),
            Phase::Playing => self.play(delta_ms, input),
            Phase::CheckFall => {
                if self.board.apply_gravity() {
                    Phase::Fall
                } else {
                    Phase::CheckErase
                }
            }
            Phase::Fall => Phase::CheckFall,
            Phase::CheckErase => self.check_erase(),
            Phase::Erasing => Phase::CheckFall,
            Phase::GameOver => {
                if input.confirm {
                    self.restart();
                }
                self.phase
            }
        };
    }

    fn spawn(&mut self) -> Phase {
        self.controller.spawn();
        if self.controller.check_game_over(&self.board) {
            self.events.push(GameEvent::GameOver);
            Phase::GameOver
        } else {
            self.events.push(GameEvent::Spawned);
            Phase::Playing
        }
    }

    fn play(&mut self, delta_ms: u32, input: &Input) -> Phase {
        if input.move_left {
            self.controller.move_left(&self.board);
        }
        if input.move_right {
            self.controller.move_right(&self.board);
        }
        if input.rotate_cw {
            self.controller.rotate_clockwise(&self.board);
        }
        if input.rotate_ccw {
            self.controller.rotate_counterclockwise(&self.board);
        }
        self.controller
            .tick(&mut self.board, delta_ms, input.fast_drop);
        if self.controller.has_landed() {
            self.events.push(GameEvent::Landed);
            Phase::CheckFall
        } else {
            Phase::Playing
        }
    }

    fn check_erase(&mut self) -> Phase {
        let report = self.board.find_erasable_groups();
        if report.count > 0 {
            self.board.clear_cells(&report.positions());
            self.chain_count += 1;
            self.max_chain = self.max_chain.max(self.chain_count);
            self.all_clear = false;
            let added = self
                .score
                .calculate_score(report.count, self.chain_count, false);
            self.events.push(GameEvent::Erased {
                count: report.count,
                groups: report.groups,
                chain: self.chain_count,
                score: added,
                cells: report.cells,
            });
            return Phase::Erasing;
        }

        self.all_clear = self.chain_count > 0 && self.board.is_empty();
        if self.all_clear {
            let bonus = self.score.calculate_score(0, 0, true);
            self.events.push(GameEvent::AllClear { bonus });
        }
        self.chain_count = 0;
        Phase::Spawn
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let piece = matches!(self.phase, Phase::Playing).then(|| *self.controller.piece());
        Snapshot {
            phase: self.phase,
            board: &self.board,
            piece,
            next: self.controller.next_colors(),
            score: self.score.total(),
            chain: self.chain_count,
            max_chain: self.max_chain,
            all_clear: self.all_clear,
            drop_progress: self.controller.drop_progress(),
        }
    }

    /// Events since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Forces a phase, for tests and scripted setups.
    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    #[cfg(test)]
    fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}
